use serde::Serialize;

use crate::args::{check_range, Arguments, Choice};
use crate::constants::{MAX_STRING_COUNT, MAX_STRING_LENGTH, TOOL_RANDOM_STRING};
use crate::error::{Result, ValidationError};
use crate::ops::{Output, Tool};
use crate::sampling;
use crate::schema::{OperationSpec, ParamKind, ParamSpec};
use crate::traits::random::SecureRandom;

const DIGITS: &str = "0123456789";

const ALPHANUMERIC: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const ALPHABETIC: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const HEX: &str = "0123456789abcdef";
const BASE64: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
/// Code points 33..=126.
const ASCII_PRINTABLE: &str =
    "!\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Charset {
    Alphanumeric,
    Alphabetic,
    Numeric,
    Hex,
    Base64,
    AsciiPrintable,
}

impl Choice for Charset {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("alphanumeric", Charset::Alphanumeric),
        ("alphabetic", Charset::Alphabetic),
        ("numeric", Charset::Numeric),
        ("hex", Charset::Hex),
        ("base64", Charset::Base64),
        ("ascii_printable", Charset::AsciiPrintable),
    ];
}

impl Charset {
    /// The symbol alphabet. Always non-empty ASCII.
    pub fn symbols(self) -> &'static [u8] {
        match self {
            Charset::Alphanumeric => ALPHANUMERIC.as_bytes(),
            Charset::Alphabetic => ALPHABETIC.as_bytes(),
            Charset::Numeric => DIGITS.as_bytes(),
            Charset::Hex => HEX.as_bytes(),
            Charset::Base64 => BASE64.as_bytes(),
            Charset::AsciiPrintable => ASCII_PRINTABLE.as_bytes(),
        }
    }
}

/// Strings whose characters are drawn independently and uniformly from a charset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StringRequest {
    pub length: i64,
    pub charset: Charset,
    pub count: i64,
}

impl Default for StringRequest {
    fn default() -> Self {
        Self {
            length: 16,
            charset: Charset::Alphanumeric,
            count: 1,
        }
    }
}

impl StringRequest {
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        check_range("length", self.length, 1, MAX_STRING_LENGTH)?;
        check_range("count", self.count, 1, MAX_STRING_COUNT)
    }

    pub fn generate(&self, rng: &dyn SecureRandom) -> Result<Vec<String>> {
        self.validate()?;
        let symbols = self.charset.symbols();
        (0..self.count)
            .map(|_| {
                (0..self.length)
                    .map(|_| Ok(symbols[sampling::index(rng, symbols.len())?] as char))
                    .collect::<Result<String>>()
            })
            .collect()
    }
}

impl Tool for StringRequest {
    const NAME: &'static str = TOOL_RANDOM_STRING;
    const RESULT_TYPE: &'static str = "random_strings";

    fn spec() -> OperationSpec {
        let d = Self::default();
        OperationSpec {
            name: Self::NAME,
            description: "Generate cryptographically secure random strings with customizable character sets",
            params: vec![
                ParamSpec::new("length", ParamKind::Integer, "String length")
                    .default_value(d.length)
                    .range(1, MAX_STRING_LENGTH),
                ParamSpec::new("charset", ParamKind::String, "Character set to use")
                    .default_value(d.charset.as_str())
                    .allowed(Charset::allowed()),
                ParamSpec::new("count", ParamKind::Integer, "Number of strings to generate")
                    .default_value(d.count)
                    .range(1, MAX_STRING_COUNT),
            ],
        }
    }

    fn from_args(args: &Arguments<'_>) -> std::result::Result<Self, ValidationError> {
        let d = Self::default();
        Ok(Self {
            length: args.integer("length", d.length)?,
            charset: args.choice("charset", d.charset)?,
            count: args.integer("count", d.count)?,
        })
    }

    fn execute(&self, rng: &dyn SecureRandom) -> Result<Output> {
        Ok(Output::values(self.generate(rng)?))
    }
}

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::Serialize;

use crate::args::{check_range, Arguments, Choice};
use crate::constants::{MAX_BYTES_LENGTH, TOOL_RANDOM_BYTES};
use crate::error::{Result, ValidationError};
use crate::ops::{Output, Tool};
use crate::schema::{OperationSpec, ParamKind, ParamSpec};
use crate::traits::random::SecureRandom;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Hex,
    Base64,
}

impl Choice for Encoding {
    const VARIANTS: &'static [(&'static str, Self)] =
        &[("hex", Encoding::Hex), ("base64", Encoding::Base64)];
}

impl Encoding {
    pub fn encode(self, bytes: &[u8]) -> String {
        match self {
            Encoding::Hex => hex::encode(bytes),
            Encoding::Base64 => BASE64.encode(bytes),
        }
    }
}

/// A single blob of `length` secure bytes, returned encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BytesRequest {
    pub length: i64,
    pub encoding: Encoding,
}

impl Default for BytesRequest {
    fn default() -> Self {
        Self {
            length: 32,
            encoding: Encoding::Hex,
        }
    }
}

impl BytesRequest {
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        check_range("length", self.length, 1, MAX_BYTES_LENGTH)
    }

    pub fn generate(&self, rng: &dyn SecureRandom) -> Result<String> {
        self.validate()?;
        let bytes = rng.random_bytes(self.length as usize)?;
        Ok(self.encoding.encode(&bytes))
    }
}

impl Tool for BytesRequest {
    const NAME: &'static str = TOOL_RANDOM_BYTES;
    const RESULT_TYPE: &'static str = "random_bytes";

    fn spec() -> OperationSpec {
        let d = Self::default();
        OperationSpec {
            name: Self::NAME,
            description: "Generate cryptographically secure random bytes in various encodings",
            params: vec![
                ParamSpec::new("length", ParamKind::Integer, "Number of bytes to generate")
                    .default_value(d.length)
                    .range(1, MAX_BYTES_LENGTH),
                ParamSpec::new("encoding", ParamKind::String, "Output encoding")
                    .default_value(d.encoding.as_str())
                    .allowed(Encoding::allowed()),
            ],
        }
    }

    fn from_args(args: &Arguments<'_>) -> std::result::Result<Self, ValidationError> {
        let d = Self::default();
        Ok(Self {
            length: args.integer("length", d.length)?,
            encoding: args.choice("encoding", d.encoding)?,
        })
    }

    fn execute(&self, rng: &dyn SecureRandom) -> Result<Output> {
        Ok(Output::Value(self.generate(rng)?.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::OsRandom;
    use crate::testing::{CountingRandom, FixedRandom};

    #[test]
    fn test_hex_length_and_alphabet() {
        let req = BytesRequest { length: 16, encoding: Encoding::Hex };
        let out = req.generate(&OsRandom::new()).unwrap();
        assert_eq!(out.len(), 32);
        assert!(out.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_base64_decodes_to_length() {
        let req = BytesRequest { length: 1024, encoding: Encoding::Base64 };
        let out = req.generate(&OsRandom::new()).unwrap();
        assert_eq!(BASE64.decode(out).unwrap().len(), 1024);
    }

    #[test]
    fn test_known_bytes_encode() {
        let rng = FixedRandom::new(vec![0xde, 0xad, 0xbe, 0xef]);
        let req = BytesRequest { length: 4, encoding: Encoding::Hex };
        assert_eq!(req.generate(&rng).unwrap(), "deadbeef");

        let req = BytesRequest { length: 4, encoding: Encoding::Base64 };
        assert_eq!(req.generate(&rng).unwrap(), "3q2+7w==");
    }

    #[test]
    fn test_length_bounds() {
        let rng = CountingRandom::default();
        for length in [0, MAX_BYTES_LENGTH + 1] {
            let req = BytesRequest { length, ..Default::default() };
            assert!(req.generate(&rng).is_err());
        }
        assert_eq!(rng.calls(), 0);
    }
}

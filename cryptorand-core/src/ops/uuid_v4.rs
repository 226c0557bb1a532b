use serde::Serialize;
use uuid::Builder;

use crate::args::{check_range, Arguments, Choice};
use crate::constants::{MAX_UUID_COUNT, TOOL_UUID};
use crate::error::{Result, ValidationError};
use crate::ops::{Output, Tool};
use crate::schema::{OperationSpec, ParamKind, ParamSpec};
use crate::traits::random::SecureRandom;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UuidFormat {
    /// Hyphenated, lower-case.
    Standard,
    /// 32 lower-case hex digits, no hyphens.
    Compact,
}

impl Choice for UuidFormat {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("standard", UuidFormat::Standard),
        ("compact", UuidFormat::Compact),
    ];
}

/// Version 4 UUIDs built from secure random bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UuidRequest {
    pub count: i64,
    pub format: UuidFormat,
}

impl Default for UuidRequest {
    fn default() -> Self {
        Self {
            count: 1,
            format: UuidFormat::Standard,
        }
    }
}

impl UuidRequest {
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        check_range("count", self.count, 1, MAX_UUID_COUNT)
    }

    pub fn generate(&self, rng: &dyn SecureRandom) -> Result<Vec<String>> {
        self.validate()?;
        (0..self.count)
            .map(|_| {
                let mut bytes = [0u8; 16];
                rng.fill_bytes(&mut bytes)?;
                // Builder sets the version nibble and RFC 4122 variant bits.
                let id = Builder::from_random_bytes(bytes).into_uuid();
                Ok(match self.format {
                    UuidFormat::Standard => id.hyphenated().to_string(),
                    UuidFormat::Compact => id.simple().to_string(),
                })
            })
            .collect()
    }
}

impl Tool for UuidRequest {
    const NAME: &'static str = TOOL_UUID;
    const RESULT_TYPE: &'static str = "uuids";

    fn spec() -> OperationSpec {
        let d = Self::default();
        OperationSpec {
            name: Self::NAME,
            description: "Generate cryptographically secure UUID version 4 identifiers",
            params: vec![
                ParamSpec::new("count", ParamKind::Integer, "Number of UUIDs to generate")
                    .default_value(d.count)
                    .range(1, MAX_UUID_COUNT),
                ParamSpec::new(
                    "format",
                    ParamKind::String,
                    "UUID format: 'standard' with hyphens or 'compact' without",
                )
                .default_value(d.format.as_str())
                .allowed(UuidFormat::allowed()),
            ],
        }
    }

    fn from_args(args: &Arguments<'_>) -> std::result::Result<Self, ValidationError> {
        let d = Self::default();
        Ok(Self {
            count: args.integer("count", d.count)?,
            format: args.choice("format", d.format)?,
        })
    }

    fn execute(&self, rng: &dyn SecureRandom) -> Result<Output> {
        Ok(Output::values(self.generate(rng)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::OsRandom;
    use crate::testing::{CountingRandom, FixedRandom};

    /// Version nibble is 4 and the variant nibble is one of 8, 9, a, b.
    fn assert_v4_hex(hex32: &str) {
        assert_eq!(hex32.len(), 32);
        assert!(hex32.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        assert_eq!(&hex32[12..13], "4");
        assert!(matches!(&hex32[16..17], "8" | "9" | "a" | "b"));
    }

    #[test]
    fn test_standard_format() {
        let req = UuidRequest { count: 100, format: UuidFormat::Standard };
        let ids = req.generate(&OsRandom::new()).unwrap();
        assert_eq!(ids.len(), 100);
        for id in ids {
            assert_eq!(id.len(), 36);
            let dashes: Vec<usize> = id.match_indices('-').map(|(i, _)| i).collect();
            assert_eq!(dashes, vec![8, 13, 18, 23]);
            assert_v4_hex(&id.replace('-', ""));
        }
    }

    #[test]
    fn test_compact_format() {
        let req = UuidRequest { count: 1, format: UuidFormat::Compact };
        let ids = req.generate(&OsRandom::new()).unwrap();
        assert_eq!(ids.len(), 1);
        assert!(!ids[0].contains('-'));
        assert_v4_hex(&ids[0]);
    }

    #[test]
    fn test_formats_differ_only_in_hyphens() {
        let bytes: Vec<u8> = (0u8..16).collect();
        let standard = UuidRequest { count: 1, format: UuidFormat::Standard }
            .generate(&FixedRandom::new(bytes.clone()))
            .unwrap();
        let compact = UuidRequest { count: 1, format: UuidFormat::Compact }
            .generate(&FixedRandom::new(bytes))
            .unwrap();
        assert_eq!(standard[0].replace('-', ""), compact[0]);
    }

    #[test]
    fn test_count_bounds() {
        let rng = CountingRandom::default();
        assert!(UuidRequest { count: 0, ..Default::default() }.generate(&rng).is_err());
        assert!(UuidRequest { count: 101, ..Default::default() }.generate(&rng).is_err());
        assert_eq!(rng.calls(), 0);
    }
}

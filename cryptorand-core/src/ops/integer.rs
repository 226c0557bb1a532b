use serde::Serialize;

use crate::args::{check_range, Arguments};
use crate::constants::{MAX_INTEGER_COUNT, TOOL_RANDOM_INTEGER};
use crate::error::{Result, ValidationError};
use crate::ops::{Output, Tool};
use crate::sampling;
use crate::schema::{OperationSpec, ParamKind, ParamSpec};
use crate::traits::random::SecureRandom;

/// Integers drawn uniformly from `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntegerRequest {
    pub min: i64,
    pub max: i64,
    pub count: i64,
}

impl Default for IntegerRequest {
    fn default() -> Self {
        Self {
            min: 0,
            max: 100,
            count: 1,
        }
    }
}

impl IntegerRequest {
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.min > self.max {
            return Err(ValidationError::new(
                "min",
                "Minimum value cannot be greater than maximum value",
                "min <= max",
            ));
        }
        check_range("count", self.count, 1, MAX_INTEGER_COUNT)
    }

    pub fn generate(&self, rng: &dyn SecureRandom) -> Result<Vec<i64>> {
        self.validate()?;
        (0..self.count)
            .map(|_| sampling::range_inclusive(rng, self.min, self.max))
            .collect()
    }
}

impl Tool for IntegerRequest {
    const NAME: &'static str = TOOL_RANDOM_INTEGER;
    const RESULT_TYPE: &'static str = "random_integers";

    fn spec() -> OperationSpec {
        let d = Self::default();
        OperationSpec {
            name: Self::NAME,
            description: "Generate cryptographically secure random integers within a specified range",
            params: vec![
                ParamSpec::new("min", ParamKind::Integer, "Minimum value (inclusive)")
                    .default_value(d.min),
                ParamSpec::new("max", ParamKind::Integer, "Maximum value (inclusive)")
                    .default_value(d.max),
                ParamSpec::new("count", ParamKind::Integer, "Number of integers to generate")
                    .default_value(d.count)
                    .range(1, MAX_INTEGER_COUNT),
            ],
        }
    }

    fn from_args(args: &Arguments<'_>) -> std::result::Result<Self, ValidationError> {
        let d = Self::default();
        Ok(Self {
            min: args.integer("min", d.min)?,
            max: args.integer("max", d.max)?,
            count: args.integer("count", d.count)?,
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
    use crate::error::RandError;
    use crate::testing::CountingRandom;
    use proptest::prelude::*;

    #[test]
    fn test_equal_bounds_repeat_value() {
        let req = IntegerRequest { min: 5, max: 5, count: 3 };
        assert_eq!(req.generate(&OsRandom::new()).unwrap(), vec![5, 5, 5]);
    }

    #[test]
    fn test_inverted_bounds_rejected_without_draw() {
        let rng = CountingRandom::default();
        let req = IntegerRequest { min: 100, max: 0, count: 1 };
        match req.generate(&rng) {
            Err(RandError::Validation(e)) => {
                assert_eq!(e.field, "min");
                assert!(e.reason.contains("Minimum value cannot be greater than maximum value"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(rng.calls(), 0);
    }

    #[test]
    fn test_count_ceiling_rejected_not_truncated() {
        let rng = CountingRandom::default();
        for count in [0, -1, MAX_INTEGER_COUNT + 1] {
            let req = IntegerRequest { count, ..Default::default() };
            let err = req.generate(&rng).unwrap_err();
            assert!(matches!(err, RandError::Validation(ref e) if e.field == "count"));
        }
        assert_eq!(rng.calls(), 0);
    }

    #[test]
    fn test_extreme_bounds() {
        let req = IntegerRequest { min: i64::MIN, max: i64::MAX, count: 20 };
        assert_eq!(req.generate(&OsRandom::new()).unwrap().len(), 20);
    }

    #[test]
    fn test_defaults_cover_both_ends() {
        let req = IntegerRequest { min: 0, max: 1, count: 1000 };
        let values = req.generate(&OsRandom::new()).unwrap();
        assert!(values.contains(&0));
        assert!(values.contains(&1));
    }

    proptest! {
        #[test]
        fn prop_values_within_bounds(
            min in -1_000_000i64..1_000_000,
            width in 0i64..1_000_000,
            count in 1i64..=50,
        ) {
            let req = IntegerRequest { min, max: min + width, count };
            let values = req.generate(&OsRandom::new()).unwrap();
            prop_assert_eq!(values.len() as i64, count);
            prop_assert!(values.iter().all(|v| min <= *v && *v <= min + width));
        }
    }
}

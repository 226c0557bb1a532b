use serde::Serialize;

use crate::args::{check_range, Arguments};
use crate::constants::{MAX_BOOLEAN_COUNT, TOOL_RANDOM_BOOLEAN};
use crate::error::{Result, ValidationError};
use crate::ops::{Output, Tool};
use crate::sampling;
use crate::schema::{OperationSpec, ParamKind, ParamSpec};
use crate::traits::random::SecureRandom;

/// Booleans that are `true` with the given probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BooleanRequest {
    pub count: i64,
    pub probability: f64,
}

impl Default for BooleanRequest {
    fn default() -> Self {
        Self {
            count: 1,
            probability: 0.5,
        }
    }
}

impl BooleanRequest {
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        check_range("count", self.count, 1, MAX_BOOLEAN_COUNT)?;
        // NaN fails `contains` as well.
        if !(0.0..=1.0).contains(&self.probability) {
            return Err(ValidationError::new(
                "probability",
                "Probability must be between 0.0 and 1.0",
                "0.0 <= probability <= 1.0",
            ));
        }
        Ok(())
    }

    pub fn generate(&self, rng: &dyn SecureRandom) -> Result<Vec<bool>> {
        self.validate()?;
        (0..self.count)
            .map(|_| Ok(sampling::unit_f64(rng)? < self.probability))
            .collect()
    }
}

impl Tool for BooleanRequest {
    const NAME: &'static str = TOOL_RANDOM_BOOLEAN;
    const RESULT_TYPE: &'static str = "random_booleans";

    fn spec() -> OperationSpec {
        let d = Self::default();
        OperationSpec {
            name: Self::NAME,
            description: "Generate cryptographically secure random boolean values with configurable probability",
            params: vec![
                ParamSpec::new("count", ParamKind::Integer, "Number of booleans to generate")
                    .default_value(d.count)
                    .range(1, MAX_BOOLEAN_COUNT),
                ParamSpec::new("probability", ParamKind::Number, "Probability of true")
                    .default_value(d.probability)
                    .range(0.0, 1.0),
            ],
        }
    }

    fn from_args(args: &Arguments<'_>) -> std::result::Result<Self, ValidationError> {
        let d = Self::default();
        Ok(Self {
            count: args.integer("count", d.count)?,
            probability: args.number("probability", d.probability)?,
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
    use crate::testing::CountingRandom;

    #[test]
    fn test_certain_outcomes() {
        let rng = OsRandom::new();
        let all_true = BooleanRequest { count: 1000, probability: 1.0 }.generate(&rng).unwrap();
        assert!(all_true.iter().all(|b| *b));

        let all_false = BooleanRequest { count: 1000, probability: 0.0 }.generate(&rng).unwrap();
        assert!(all_false.iter().all(|b| !*b));
    }

    #[test]
    fn test_fair_coin_within_band() {
        let rng = OsRandom::new();
        let req = BooleanRequest { count: 1000, probability: 0.5 };
        let trues: usize = (0..10)
            .map(|_| req.generate(&rng).unwrap().into_iter().filter(|b| *b).count())
            .sum();
        // 10,000 draws: sigma is 50, so 45%..55% is ten sigma wide.
        assert!((4500..=5500).contains(&trues), "true count {trues}");
    }

    #[test]
    fn test_probability_out_of_range() {
        let rng = CountingRandom::default();
        for probability in [-0.1, 1.000_001, f64::NAN, f64::INFINITY] {
            let err = BooleanRequest { count: 1, probability }.generate(&rng).unwrap_err();
            assert!(err.to_string().contains("Probability must be between 0.0 and 1.0"));
        }
        assert_eq!(rng.calls(), 0);
    }

    #[test]
    fn test_count_bounds() {
        assert!(BooleanRequest { count: 0, ..Default::default() }.validate().is_err());
        assert!(BooleanRequest { count: 1001, ..Default::default() }.validate().is_err());
        assert!(BooleanRequest { count: 1000, ..Default::default() }.validate().is_ok());
    }
}

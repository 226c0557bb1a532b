use serde::Serialize;

use crate::args::{check_range, Arguments};
use crate::constants::{MAX_CHOICE_COUNT, TOOL_RANDOM_CHOICE};
use crate::error::{Result, ValidationError};
use crate::ops::{Output, Tool};
use crate::sampling;
use crate::schema::{OperationSpec, ParamKind, ParamSpec};
use crate::traits::random::SecureRandom;

/// Uniform selections from a caller-supplied list.
///
/// With duplicates allowed every pick is independent. Without, the picks are
/// a uniform sample without replacement, so no position is returned twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceRequest {
    pub choices: Vec<String>,
    pub count: i64,
    pub allow_duplicates: bool,
}

impl ChoiceRequest {
    pub fn new(choices: Vec<String>) -> Self {
        Self {
            choices,
            count: 1,
            allow_duplicates: true,
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.choices.is_empty() {
            return Err(ValidationError::new(
                "choices",
                "Choices array cannot be empty",
                "non-empty array",
            ));
        }
        check_range("count", self.count, 1, MAX_CHOICE_COUNT)?;
        if !self.allow_duplicates && self.count as usize > self.choices.len() {
            return Err(ValidationError::new(
                "count",
                format!(
                    "Cannot select {} unique items from {} choices",
                    self.count,
                    self.choices.len()
                ),
                "count <= len(choices) when allow_duplicates is false",
            ));
        }
        Ok(())
    }

    pub fn generate(&self, rng: &dyn SecureRandom) -> Result<Vec<String>> {
        self.validate()?;
        let count = self.count as usize;
        let picks = if self.allow_duplicates {
            (0..count)
                .map(|_| sampling::index(rng, self.choices.len()))
                .collect::<Result<Vec<_>>>()?
        } else {
            sampling::sample_indices(rng, self.choices.len(), count)?
        };
        Ok(picks.into_iter().map(|i| self.choices[i].clone()).collect())
    }
}

impl Tool for ChoiceRequest {
    const NAME: &'static str = TOOL_RANDOM_CHOICE;
    const RESULT_TYPE: &'static str = "random_choices";

    fn spec() -> OperationSpec {
        OperationSpec {
            name: Self::NAME,
            description: "Randomly select items from a provided list using cryptographically secure randomness",
            params: vec![
                ParamSpec::new("choices", ParamKind::StringArray, "Array of items to choose from")
                    .minimum(1)
                    .required(),
                ParamSpec::new("count", ParamKind::Integer, "Number of items to select")
                    .default_value(1)
                    .range(1, MAX_CHOICE_COUNT),
                ParamSpec::new(
                    "allow_duplicates",
                    ParamKind::Boolean,
                    "Whether to allow duplicate selections",
                )
                .default_value(true),
            ],
        }
    }

    fn from_args(args: &Arguments<'_>) -> std::result::Result<Self, ValidationError> {
        Ok(Self {
            choices: args.string_list("choices")?,
            count: args.integer("count", 1)?,
            allow_duplicates: args.boolean("allow_duplicates", true)?,
        })
    }

    fn execute(&self, rng: &dyn SecureRandom) -> Result<Output> {
        Ok(Output::values(self.generate(rng)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use crate::entropy::OsRandom;
    use crate::testing::CountingRandom;
    use proptest::prelude::*;

    fn fruits() -> Vec<String> {
        ["apple", "banana", "cherry", "date"].map(String::from).to_vec()
    }

    #[test]
    fn test_with_duplicates_picks_members() {
        let req = ChoiceRequest { count: 3, ..ChoiceRequest::new(fruits()) };
        let picks = req.generate(&OsRandom::new()).unwrap();
        assert_eq!(picks.len(), 3);
        assert!(picks.iter().all(|p| fruits().contains(p)));
    }

    #[test]
    fn test_with_duplicates_may_exceed_list_length() {
        let req = ChoiceRequest { count: 50, ..ChoiceRequest::new(vec!["only".into()]) };
        assert_eq!(req.generate(&OsRandom::new()).unwrap(), vec!["only"; 50]);
    }

    #[test]
    fn test_without_duplicates_full_permutation() {
        let req = ChoiceRequest { count: 4, allow_duplicates: false, ..ChoiceRequest::new(fruits()) };
        let mut picks = req.generate(&OsRandom::new()).unwrap();
        picks.sort();
        assert_eq!(picks, fruits());
    }

    #[test]
    fn test_without_duplicates_rejects_oversized_count() {
        let rng = CountingRandom::default();
        let req = ChoiceRequest { count: 5, allow_duplicates: false, ..ChoiceRequest::new(fruits()) };
        let err = req.generate(&rng).unwrap_err();
        assert!(err.to_string().contains("Cannot select 5 unique items from 4 choices"));
        assert_eq!(rng.calls(), 0);
    }

    #[test]
    fn test_empty_choices_rejected() {
        let rng = CountingRandom::default();
        assert!(ChoiceRequest::new(vec![]).generate(&rng).is_err());
        assert_eq!(rng.calls(), 0);
    }

    #[test]
    fn test_count_ceiling_applies_with_duplicates() {
        let req = ChoiceRequest { count: MAX_CHOICE_COUNT + 1, ..ChoiceRequest::new(fruits()) };
        assert!(req.validate().is_err());
    }

    proptest! {
        #[test]
        fn prop_no_repeats_without_duplicates(len in 1usize..40, pick in 1usize..40) {
            let count = pick.min(len);
            let choices: Vec<String> = (0..len).map(|i| format!("item-{i}")).collect();
            let req = ChoiceRequest {
                choices,
                count: count as i64,
                allow_duplicates: false,
            };
            let picks = req.generate(&OsRandom::new()).unwrap();
            let unique: HashSet<_> = picks.iter().collect();
            prop_assert_eq!(picks.len(), count);
            prop_assert_eq!(unique.len(), count);
        }
    }
}

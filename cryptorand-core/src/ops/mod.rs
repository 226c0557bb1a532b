//! The seven generators. Each request type validates itself fully before it
//! touches the entropy source.

pub mod integer;
pub mod float;
pub mod bytes;
pub mod uuid_v4;
pub mod string;
pub mod choice;
pub mod boolean;

use serde::Serialize;
use serde_json::Value;

use crate::args::Arguments;
use crate::error::{Result, ValidationError};
use crate::schema::OperationSpec;
use crate::traits::random::SecureRandom;

/// Generated payload: a sequence of values, or a single encoded value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Output {
    Values(Vec<Value>),
    Value(Value),
}

impl Output {
    pub fn values<T: Into<Value>>(items: Vec<T>) -> Self {
        Output::Values(items.into_iter().map(Into::into).collect())
    }

    pub fn len(&self) -> usize {
        match self {
            Output::Values(v) => v.len(),
            Output::Value(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Validate-then-execute contract shared by every operation.
///
/// `Serialize` renders the effective parameters (defaults applied) that are
/// echoed back to the caller.
pub trait Tool: Serialize + Sized {
    const NAME: &'static str;
    /// Tag reported in the result's `type` field.
    const RESULT_TYPE: &'static str;

    fn spec() -> OperationSpec;

    /// Typed extraction only. Range checks happen in `execute`.
    fn from_args(args: &Arguments<'_>) -> std::result::Result<Self, ValidationError>;

    fn execute(&self, rng: &dyn SecureRandom) -> Result<Output>;
}

//! Name-to-operation dispatch.
//!
//! The registry is built once at startup and never mutated afterwards, so it
//! can be shared between request tasks behind an `Arc` without locking.

use std::collections::HashMap;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::args::Arguments;
use crate::error::{RandError, Result};
use crate::ops::boolean::BooleanRequest;
use crate::ops::bytes::BytesRequest;
use crate::ops::choice::ChoiceRequest;
use crate::ops::float::FloatRequest;
use crate::ops::integer::IntegerRequest;
use crate::ops::string::StringRequest;
use crate::ops::uuid_v4::UuidRequest;
use crate::ops::{Output, Tool};
use crate::schema::OperationSpec;
use crate::traits::random::SecureRandom;

/// The closed set of supported operations, in listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Integer,
    Float,
    Bytes,
    Uuid,
    String,
    Choice,
    Boolean,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::Integer,
        Operation::Float,
        Operation::Bytes,
        Operation::Uuid,
        Operation::String,
        Operation::Choice,
        Operation::Boolean,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Integer => IntegerRequest::NAME,
            Operation::Float => FloatRequest::NAME,
            Operation::Bytes => BytesRequest::NAME,
            Operation::Uuid => UuidRequest::NAME,
            Operation::String => StringRequest::NAME,
            Operation::Choice => ChoiceRequest::NAME,
            Operation::Boolean => BooleanRequest::NAME,
        }
    }

    pub fn spec(self) -> OperationSpec {
        match self {
            Operation::Integer => IntegerRequest::spec(),
            Operation::Float => FloatRequest::spec(),
            Operation::Bytes => BytesRequest::spec(),
            Operation::Uuid => UuidRequest::spec(),
            Operation::String => StringRequest::spec(),
            Operation::Choice => ChoiceRequest::spec(),
            Operation::Boolean => BooleanRequest::spec(),
        }
    }

    /// Parses, validates and executes. No entropy is drawn unless the
    /// arguments are fully valid.
    pub fn run(self, args: &Arguments<'_>, rng: &dyn SecureRandom) -> Result<OperationResult> {
        match self {
            Operation::Integer => execute::<IntegerRequest>(args, rng),
            Operation::Float => execute::<FloatRequest>(args, rng),
            Operation::Bytes => execute::<BytesRequest>(args, rng),
            Operation::Uuid => execute::<UuidRequest>(args, rng),
            Operation::String => execute::<StringRequest>(args, rng),
            Operation::Choice => execute::<ChoiceRequest>(args, rng),
            Operation::Boolean => execute::<BooleanRequest>(args, rng),
        }
    }
}

fn execute<T: Tool>(args: &Arguments<'_>, rng: &dyn SecureRandom) -> Result<OperationResult> {
    let request = T::from_args(args)?;
    let output = request.execute(rng)?;
    let parameters =
        serde_json::to_value(&request).map_err(|e| RandError::Serialization(e.to_string()))?;
    Ok(OperationResult {
        kind: T::RESULT_TYPE,
        output,
        parameters,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
    })
}

/// Generated values plus the effective parameters that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationResult {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(flatten)]
    pub output: Output,
    pub parameters: Value,
    /// ISO-8601 UTC, `Z` suffixed.
    pub timestamp: String,
}

/// Immutable operation table.
#[derive(Debug, Clone)]
pub struct Registry {
    specs: Vec<OperationSpec>,
    by_name: HashMap<&'static str, (Operation, usize)>,
}

impl Registry {
    pub fn new() -> Self {
        let specs: Vec<OperationSpec> = Operation::ALL.iter().map(|op| op.spec()).collect();
        let by_name = Operation::ALL
            .iter()
            .enumerate()
            .map(|(i, op)| (op.name(), (*op, i)))
            .collect();
        Self { specs, by_name }
    }

    /// All operation schemas, in stable order.
    pub fn list_operations(&self) -> &[OperationSpec] {
        &self.specs
    }

    pub fn lookup(&self, name: &str) -> Option<Operation> {
        self.by_name.get(name).map(|(op, _)| *op)
    }

    pub fn spec(&self, name: &str) -> Option<&OperationSpec> {
        self.by_name.get(name).map(|(_, i)| &self.specs[*i])
    }

    /// Dispatches a call by name. Unknown argument names are rejected against
    /// the operation's schema before the operation sees them.
    pub fn invoke(
        &self,
        name: &str,
        arguments: &Map<String, Value>,
        rng: &dyn SecureRandom,
    ) -> Result<OperationResult> {
        let (op, index) = self
            .by_name
            .get(name)
            .copied()
            .ok_or_else(|| RandError::UnknownOperation(name.to_string()))?;
        let args = Arguments::new(arguments);
        args.reject_unknown(&self.specs[index].param_names())?;
        op.run(&args, rng)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

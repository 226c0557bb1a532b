use serde::Serialize;

use crate::args::{check_range, Arguments};
use crate::constants::{MAX_FLOAT_COUNT, MAX_FLOAT_PRECISION, TOOL_RANDOM_FLOAT};
use crate::error::{Result, ValidationError};
use crate::ops::{Output, Tool};
use crate::sampling;
use crate::schema::{OperationSpec, ParamKind, ParamSpec};
use crate::traits::random::SecureRandom;

/// Beyond this many steps the decimal grid is finer than f64 resolution.
const EXACT_STEP_LIMIT: f64 = (1u64 << 53) as f64;

/// Floats drawn uniformly from `[min, max)` and rounded to `precision` decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FloatRequest {
    pub min: f64,
    pub max: f64,
    pub count: i64,
    pub precision: i64,
}

impl Default for FloatRequest {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            count: 1,
            precision: 6,
        }
    }
}

/// Integer step indices `lo..=hi` such that `step / factor` lies in `[min, max)`.
#[derive(Debug, Clone, Copy)]
struct DecimalGrid {
    factor: f64,
    lo: f64,
    hi: f64,
}

impl DecimalGrid {
    /// `None` when the grid is finer than f64 can represent for this range,
    /// in which case values are already as precise as requested.
    fn new(min: f64, max: f64, precision: i64) -> Option<Self> {
        let factor = 10f64.powi(precision as i32);
        let (smin, smax) = (min * factor, max * factor);
        if !smin.is_finite()
            || !smax.is_finite()
            || smin.abs() >= EXACT_STEP_LIMIT
            || smax.abs() >= EXACT_STEP_LIMIT
        {
            return None;
        }

        let mut lo = smin.ceil();
        if (lo - 1.0) / factor >= min {
            lo -= 1.0;
        }
        if lo / factor < min {
            lo += 1.0;
        }

        let mut hi = smax.ceil() - 1.0;
        if (hi + 1.0) / factor < max {
            hi += 1.0;
        }
        if hi / factor >= max {
            hi -= 1.0;
        }

        Some(Self { factor, lo, hi })
    }

    fn is_empty(&self) -> bool {
        self.lo > self.hi
    }

    fn round(&self, x: f64) -> f64 {
        (x * self.factor).round().clamp(self.lo, self.hi) / self.factor
    }
}

impl FloatRequest {
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            let field = if self.min.is_finite() { "max" } else { "min" };
            return Err(ValidationError::new(
                field,
                "Bounds must be finite numbers",
                "finite number",
            ));
        }
        if self.min >= self.max {
            return Err(ValidationError::new(
                "min",
                "Minimum value must be less than maximum value",
                "min < max",
            ));
        }
        if !(self.max - self.min).is_finite() {
            return Err(ValidationError::new(
                "max",
                "Range between minimum and maximum is too wide",
                "max - min finite",
            ));
        }
        check_range("count", self.count, 1, MAX_FLOAT_COUNT)?;
        check_range("precision", self.precision, 0, MAX_FLOAT_PRECISION)?;
        if let Some(grid) = DecimalGrid::new(self.min, self.max, self.precision) {
            if grid.is_empty() {
                return Err(ValidationError::new(
                    "precision",
                    format!(
                        "No value with {} decimal places lies in [{}, {})",
                        self.precision, self.min, self.max
                    ),
                    "range contains a value at precision",
                ));
            }
        }
        Ok(())
    }

    pub fn generate(&self, rng: &dyn SecureRandom) -> Result<Vec<f64>> {
        self.validate()?;
        let grid = DecimalGrid::new(self.min, self.max, self.precision);
        let below_max = prev_float(self.max);
        (0..self.count)
            .map(|_| {
                let u = sampling::unit_f64(rng)?;
                let scaled = (self.min + (self.max - self.min) * u).clamp(self.min, below_max);
                Ok(match grid {
                    Some(g) => g.round(scaled),
                    None => scaled,
                })
            })
            .collect()
    }
}

/// Largest f64 strictly below `v`.
fn prev_float(v: f64) -> f64 {
    if v == 0.0 {
        -f64::from_bits(1)
    } else if v > 0.0 {
        f64::from_bits(v.to_bits() - 1)
    } else {
        f64::from_bits(v.to_bits() + 1)
    }
}

impl Tool for FloatRequest {
    const NAME: &'static str = TOOL_RANDOM_FLOAT;
    const RESULT_TYPE: &'static str = "random_floats";

    fn spec() -> OperationSpec {
        let d = Self::default();
        OperationSpec {
            name: Self::NAME,
            description: "Generate cryptographically secure random floating-point numbers",
            params: vec![
                ParamSpec::new("min", ParamKind::Number, "Minimum value (inclusive)")
                    .default_value(d.min),
                ParamSpec::new("max", ParamKind::Number, "Maximum value (exclusive)")
                    .default_value(d.max),
                ParamSpec::new("count", ParamKind::Integer, "Number of floats to generate")
                    .default_value(d.count)
                    .range(1, MAX_FLOAT_COUNT),
                ParamSpec::new("precision", ParamKind::Integer, "Decimal places to round to")
                    .default_value(d.precision)
                    .range(0, MAX_FLOAT_PRECISION),
            ],
        }
    }

    fn from_args(args: &Arguments<'_>) -> std::result::Result<Self, ValidationError> {
        let d = Self::default();
        Ok(Self {
            min: args.number("min", d.min)?,
            max: args.number("max", d.max)?,
            count: args.integer("count", d.count)?,
            precision: args.integer("precision", d.precision)?,
        })
    }

    fn execute(&self, rng: &dyn SecureRandom) -> Result<Output> {
        Ok(Output::values(self.generate(rng)?))
    }
}

//! Body mass index and weekly exercise calculators.
//!
//! Both calculators are pure functions over plain numbers. Input that would make the
//! arithmetic meaningless (non-finite values, a zero height, an empty period) is rejected
//! with a [`CalculatorError`] instead of producing `NaN` or infinity in the result.

mod bmi;
mod exercises;

pub use bmi::{calculate_bmi, BmiResult};
pub use exercises::{calculate_exercises, ExerciseResult};

/// Errors that can occur when running a calculator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalculatorError {
    #[error("invalid weight/height given")]
    InvalidMeasurement,
    #[error("no days given")]
    EmptyPeriod,
    #[error("exercise hours and target must be finite and non-negative")]
    InvalidHours,
}

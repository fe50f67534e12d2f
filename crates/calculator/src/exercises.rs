use crate::CalculatorError;
use serde::Serialize;

/// Summary of a training period against a daily target.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseResult {
    pub period_length: usize,
    pub training_days: usize,
    pub success: bool,
    pub rating: u8,
    pub rating_description: String,
    pub target: f64,
    pub average: f64,
}

/// Rates `daily_hours` against a daily `target`.
///
/// A training day is any day with non-zero hours. The average is over all days.
/// Ratings: 1 below target, 2 at least target but under twice the target, 3 otherwise.
///
/// # Errors
///
/// - [`CalculatorError::EmptyPeriod`] if `daily_hours` is empty,
/// - [`CalculatorError::InvalidHours`] if any value is negative or not finite.
pub fn calculate_exercises(
    daily_hours: &[f64],
    target: f64,
) -> Result<ExerciseResult, CalculatorError> {
    if daily_hours.is_empty() {
        return Err(CalculatorError::EmptyPeriod);
    }
    if daily_hours
        .iter()
        .chain(std::iter::once(&target))
        .any(|h| !h.is_finite() || *h < 0.0)
    {
        return Err(CalculatorError::InvalidHours);
    }

    let period_length = daily_hours.len();
    let training_days = daily_hours.iter().filter(|&&h| h != 0.0).count();
    let average = daily_hours.iter().sum::<f64>() / period_length as f64;

    let (rating, rating_description, success) = if average < target {
        (1, "You did not hit the target", false)
    } else if average < 2.0 * target {
        (2, "not too bad but could be better", true)
    } else {
        (3, "Good job, target exceeded", true)
    };

    Ok(ExerciseResult {
        period_length,
        training_days,
        success,
        rating,
        rating_description: rating_description.to_string(),
        target,
        average,
    })
}

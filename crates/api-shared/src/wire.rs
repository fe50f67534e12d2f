//! Request and response bodies.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// JSON error body: `{"error": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Query string for `GET /bmi`. Both values arrive as text and are parsed by the handler.
#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BmiQuery {
    /// Height in centimetres.
    pub height: Option<String>,
    /// Weight in kilograms.
    pub weight: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BmiRes {
    pub weight: f64,
    pub height: f64,
    pub bmi: String,
}

/// Body for `POST /exercises`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ExercisesReq {
    /// Hours exercised on each day of the period.
    pub daily_exercises: Vec<f64>,
    /// Target hours per day.
    pub target: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExercisesRes {
    pub period_length: usize,
    pub training_days: usize,
    pub success: bool,
    pub rating: u8,
    pub rating_description: String,
    pub target: f64,
    pub average: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exercises_req_uses_snake_case_keys() {
        let req: ExercisesReq =
            serde_json::from_str(r#"{"daily_exercises": [1, 0, 2.5], "target": 2}"#).unwrap();
        assert_eq!(req.daily_exercises, vec![1.0, 0.0, 2.5]);
        assert_eq!(req.target, 2.0);
    }

    #[test]
    fn exercises_req_rejects_wrong_shapes() {
        assert!(serde_json::from_str::<ExercisesReq>(r#"{"daily_exercises": "1,2", "target": 2}"#).is_err());
        assert!(serde_json::from_str::<ExercisesReq>(r#"{"daily_exercises": [1], "target": "2"}"#).is_err());
    }
}

//! Calculator endpoints: `/hello`, `/bmi` and `/exercises`.

use axum::{
    extract::{rejection::JsonRejection, Query},
    response::Json,
};
use serde_json::Value;

use api_shared::{BmiQuery, BmiRes, ErrorRes, ExercisesReq, ExercisesRes};
use patientor_calculator::{calculate_bmi, calculate_exercises};

use crate::ApiError;

const MALFORMATTED: &str = "malformatted parameters";
const MISSING: &str = "parameters missing";

#[utoipa::path(
    get,
    path = "/hello",
    responses((status = 200, description = "Greeting", body = String))
)]
pub async fn hello() -> &'static str {
    "Hello Full Stack!"
}

#[utoipa::path(
    get,
    path = "/bmi",
    params(BmiQuery),
    responses(
        (status = 200, description = "BMI category", body = BmiRes),
        (status = 400, description = "Missing or non-numeric parameters", body = ErrorRes)
    )
)]
/// Classify a body mass index from `height` (cm) and `weight` (kg).
#[axum::debug_handler]
pub async fn bmi(Query(query): Query<BmiQuery>) -> Result<Json<BmiRes>, ApiError> {
    let height = parse_number(query.height.as_deref())?;
    let weight = parse_number(query.weight.as_deref())?;

    let result = calculate_bmi(height, weight).map_err(|e| {
        tracing::debug!("bmi rejected: {}", e);
        ApiError::BadRequest(MALFORMATTED)
    })?;

    Ok(Json(BmiRes {
        weight: result.weight,
        height: result.height,
        bmi: result.bmi,
    }))
}

#[utoipa::path(
    post,
    path = "/exercises",
    request_body = ExercisesReq,
    responses(
        (status = 200, description = "Exercise summary", body = ExercisesRes),
        (status = 400, description = "Missing or malformed parameters", body = ErrorRes)
    )
)]
/// Rate a period of daily exercise hours against a target.
///
/// A body without `daily_exercises` or `target` is "parameters missing"; anything present
/// but of the wrong shape is "malformatted parameters". So is a body that is not JSON.
#[axum::debug_handler]
pub async fn exercises(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ExercisesRes>, ApiError> {
    let Json(body) = body.map_err(|_| ApiError::BadRequest(MALFORMATTED))?;
    if body.get("daily_exercises").is_none() || body.get("target").is_none() {
        return Err(ApiError::BadRequest(MISSING));
    }

    let req: ExercisesReq =
        serde_json::from_value(body).map_err(|_| ApiError::BadRequest(MALFORMATTED))?;
    let result = calculate_exercises(&req.daily_exercises, req.target).map_err(|e| {
        tracing::debug!("exercises rejected: {}", e);
        ApiError::BadRequest(MALFORMATTED)
    })?;

    Ok(Json(ExercisesRes {
        period_length: result.period_length,
        training_days: result.training_days,
        success: result.success,
        rating: result.rating,
        rating_description: result.rating_description,
        target: result.target,
        average: result.average,
    }))
}

fn parse_number(raw: Option<&str>) -> Result<f64, ApiError> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .ok_or(ApiError::BadRequest(MALFORMATTED))
}

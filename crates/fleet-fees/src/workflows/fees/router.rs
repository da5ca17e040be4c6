use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::roster::{StudentId, StudentRoster};
use super::scholarships::EvaluationResult;
use super::service::{CalculationRequest, FeeService};
use super::summary::{FeeAssessment, FeeSummary};
use crate::error::AppError;

/// Router builder exposing the scholarship calculator and fee reporting endpoints.
pub fn fee_router<R>(service: Arc<FeeService<R>>) -> Router
where
    R: StudentRoster + 'static,
{
    Router::new()
        .route("/api/v1/scholarships", get(catalog_handler::<R>))
        .route(
            "/api/v1/scholarships/calculate",
            post(calculate_handler::<R>),
        )
        .route("/api/v1/fees/summary", get(summary_handler::<R>))
        .route(
            "/api/v1/fees/students/:student_id",
            get(student_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn catalog_handler<R>(
    State(service): State<Arc<FeeService<R>>>,
) -> Json<serde_json::Value>
where
    R: StudentRoster + 'static,
{
    Json(json!({ "scholarship_types": service.catalog() }))
}

pub(crate) async fn calculate_handler<R>(
    State(service): State<Arc<FeeService<R>>>,
    Json(request): Json<CalculationRequest>,
) -> Result<Json<EvaluationResult>, AppError>
where
    R: StudentRoster + 'static,
{
    Ok(Json(service.calculate(&request)?))
}

pub(crate) async fn summary_handler<R>(
    State(service): State<Arc<FeeService<R>>>,
) -> Result<Json<FeeSummary>, AppError>
where
    R: StudentRoster + 'static,
{
    Ok(Json(service.summary()?))
}

pub(crate) async fn student_handler<R>(
    State(service): State<Arc<FeeService<R>>>,
    Path(student_id): Path<String>,
) -> Result<Json<FeeAssessment>, AppError>
where
    R: StudentRoster + 'static,
{
    Ok(Json(service.assess(&StudentId(student_id))?))
}

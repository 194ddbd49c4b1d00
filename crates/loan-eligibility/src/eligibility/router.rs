use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use super::domain::ApplicationForm;
use super::intake::InputError;
use super::service::{EligibilityService, ServiceError};
use crate::advice::{AdviceError, EducationTopic};

/// Router builder exposing HTTP endpoints for eligibility checks and advice.
pub fn eligibility_router(service: EligibilityService) -> Router {
    Router::new()
        .route("/api/v1/eligibility", post(check_handler))
        .route("/api/v1/eligibility/thresholds", get(thresholds_handler))
        .route("/api/v1/eligibility/advice", post(advice_handler))
        .route("/api/v1/education", get(topics_handler))
        .route("/api/v1/education/:topic", get(education_handler))
        .with_state(service)
}

pub(crate) async fn check_handler(
    State(service): State<EligibilityService>,
    Json(form): Json<ApplicationForm>,
) -> Response {
    match service.check(&form) {
        Ok(decision) => (StatusCode::OK, Json(decision)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn thresholds_handler(State(service): State<EligibilityService>) -> Response {
    (StatusCode::OK, Json(service.engine().config().clone())).into_response()
}

pub(crate) async fn advice_handler(
    State(service): State<EligibilityService>,
    Json(form): Json<ApplicationForm>,
) -> Response {
    match service.advise(&form).await {
        Ok(advised) => (StatusCode::OK, Json(advised)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn topics_handler(State(service): State<EligibilityService>) -> Response {
    let topics: Vec<Value> = EducationTopic::ALL
        .into_iter()
        .map(|topic| json!({ "slug": topic.slug(), "title": topic.title() }))
        .collect();

    let payload = json!({
        "available": service.advice_available(),
        "topics": topics,
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn education_handler(
    State(service): State<EligibilityService>,
    Path(topic): Path<String>,
) -> Response {
    let Some(resolved) = EducationTopic::from_slug(&topic) else {
        let payload = json!({
            "error": format!("unknown education topic '{topic}'"),
        });
        return (StatusCode::NOT_FOUND, Json(payload)).into_response();
    };

    match service.educate(resolved).await {
        Ok(content) => {
            let payload = json!({
                "topic": resolved.slug(),
                "title": resolved.title(),
                "content": content,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

fn service_error_response(error: ServiceError) -> Response {
    match error {
        ServiceError::Input(problems) => {
            let payload = json!({ "errors": problem_views(&problems) });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        ServiceError::Advice(AdviceError::Unavailable) => {
            let payload = json!({ "error": AdviceError::Unavailable.to_string() });
            (StatusCode::SERVICE_UNAVAILABLE, Json(payload)).into_response()
        }
        ServiceError::Advice(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::BAD_GATEWAY, Json(payload)).into_response()
        }
    }
}

pub(crate) fn problem_views(problems: &[InputError]) -> Vec<Value> {
    problems
        .iter()
        .map(|problem| {
            json!({
                "field": problem.field(),
                "message": problem.to_string(),
            })
        })
        .collect()
}

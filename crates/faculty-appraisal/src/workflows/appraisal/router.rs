use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{FacultyId, FacultyProfile, PartId};
use super::forms::{AppraisalInputs, DeanEvaluation, PartInputs};
use super::scoring::ScoringEngine;
use super::service::{AppraisalError, AppraisalService, PortfolioReview, ResearchVerification};
use super::store::{AppraisalStore, StoreError};

/// Router builder exposing the appraisal load, save, submit, and review endpoints.
pub fn appraisal_router<S>(service: Arc<AppraisalService<S>>) -> Router
where
    S: AppraisalStore + 'static,
{
    Router::new()
        .route("/api/v1/appraisals/:faculty_id", get(load_handler::<S>))
        .route(
            "/api/v1/appraisals/:faculty_id/parts/:part",
            put(save_part_handler::<S>),
        )
        .route(
            "/api/v1/appraisals/:faculty_id/submit",
            post(submit_handler::<S>),
        )
        .route(
            "/api/v1/appraisals/:faculty_id/portfolio/review",
            post(portfolio_review_handler::<S>),
        )
        .route(
            "/api/v1/appraisals/:faculty_id/portfolio/dean-evaluation",
            post(dean_evaluation_handler::<S>),
        )
        .route(
            "/api/v1/appraisals/:faculty_id/research/verification",
            post(verification_handler::<S>),
        )
        .route("/api/v1/scoring/preview", post(preview_handler))
        .with_state(service)
}

/// Translate a service failure into the JSON error contract.
pub(crate) fn error_response(error: AppraisalError) -> Response {
    match error {
        AppraisalError::Validation(validation) => {
            let payload = json!({
                "error": validation.to_string(),
                "missing_sections": validation.missing,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        AppraisalError::Locked(locked) => {
            let payload = json!({
                "error": locked.to_string(),
                "status": locked.status,
                "part": locked.part,
            });
            (StatusCode::LOCKED, axum::Json(payload)).into_response()
        }
        err @ AppraisalError::NotAdministrative(_) => {
            bad_request(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
        }
        AppraisalError::Persistence(StoreError::NotFound(faculty_id)) => {
            let payload = json!({
                "error": format!("no appraisal on record for faculty {faculty_id}"),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        AppraisalError::Persistence(other) => {
            let payload = json!({
                "error": other.to_string(),
                "retryable": other.is_retryable(),
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
    }
}

fn bad_request(status: StatusCode, message: String) -> Response {
    (status, axum::Json(json!({ "error": message }))).into_response()
}

pub(crate) async fn load_handler<S>(
    State(service): State<Arc<AppraisalService<S>>>,
    Path(faculty_id): Path<String>,
) -> Response
where
    S: AppraisalStore + 'static,
{
    match service.load(&FacultyId(faculty_id)).await {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn save_part_handler<S>(
    State(service): State<Arc<AppraisalService<S>>>,
    Path((faculty_id, part)): Path<(String, String)>,
    body: Bytes,
) -> Response
where
    S: AppraisalStore + 'static,
{
    let part: PartId = match part.parse() {
        Ok(part) => part,
        Err(message) => return bad_request(StatusCode::NOT_FOUND, message),
    };
    // Decoded by hand so malformed JSON gets the same 422 as a mistyped field.
    let body = match serde_json::from_slice::<serde_json::Value>(&body) {
        Ok(body) => body,
        Err(err) => {
            return bad_request(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("invalid {part} body: {err}"),
            )
        }
    };
    let inputs = match PartInputs::from_value(part, body) {
        Ok(inputs) => inputs,
        Err(err) => {
            return bad_request(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("invalid {part} inputs: {err}"),
            )
        }
    };

    match service.save_part(&FacultyId(faculty_id), inputs).await {
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<AppraisalService<S>>>,
    Path(faculty_id): Path<String>,
) -> Response
where
    S: AppraisalStore + 'static,
{
    match service.submit(&FacultyId(faculty_id)).await {
        Ok(snapshot) => (StatusCode::ACCEPTED, axum::Json(snapshot)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn portfolio_review_handler<S>(
    State(service): State<Arc<AppraisalService<S>>>,
    Path(faculty_id): Path<String>,
    axum::Json(review): axum::Json<PortfolioReview>,
) -> Response
where
    S: AppraisalStore + 'static,
{
    match service
        .record_portfolio_marks(&FacultyId(faculty_id), review)
        .await
    {
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn dean_evaluation_handler<S>(
    State(service): State<Arc<AppraisalService<S>>>,
    Path(faculty_id): Path<String>,
    axum::Json(evaluation): axum::Json<DeanEvaluation>,
) -> Response
where
    S: AppraisalStore + 'static,
{
    match service
        .record_dean_evaluation(&FacultyId(faculty_id), evaluation)
        .await
    {
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn verification_handler<S>(
    State(service): State<Arc<AppraisalService<S>>>,
    Path(faculty_id): Path<String>,
    axum::Json(verification): axum::Json<ResearchVerification>,
) -> Response
where
    S: AppraisalStore + 'static,
{
    match service
        .record_verification(&FacultyId(faculty_id), verification)
        .await
    {
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(error) => error_response(error),
    }
}

/// Inputs for a stateless score preview.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    pub profile: FacultyProfile,
    #[serde(flatten)]
    pub inputs: AppraisalInputs,
}

pub(crate) async fn preview_handler(axum::Json(request): axum::Json<PreviewRequest>) -> Response {
    let score = ScoringEngine::new(request.profile).score_all(&request.inputs);
    (StatusCode::OK, axum::Json(score)).into_response()
}

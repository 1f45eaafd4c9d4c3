// region:    --- Imports
use crate::api::MarketplaceApi;
use crate::bidding::model::{BidFieldErrors, BidForm};
use crate::bidding::workflow::{BidSubmissionWorkflow, BidSubmitError, SubmitOutcome};
use crate::error::AppError;
use crate::job::model::lenient_text;
use crate::job::update::{JobUpdateForm, JobUpdateWorkflow, UpdateOutcome};
use crate::job::view::{JobDetailView, JobSummary};
use crate::session::SessionUser;
use crate::ui::{Notification, ViewEffects, FETCH_ERROR_TEXT};
use async_trait::async_trait;
use axum::extract::{FromRequestParts, Path, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

// endregion: --- Imports

pub const USER_EMAIL_HEADER: &str = "x-user-email";
pub const USER_NAME_HEADER: &str = "x-user-name";
pub const USER_PHOTO_HEADER: &str = "x-user-photo";

// region:    --- Router
pub fn router<A: MarketplaceApi + 'static>(api: Arc<A>) -> Router {
    Router::new()
        .route("/jobs", get(handle_get_jobs::<A>))
        .route("/job/:id", get(handle_get_job::<A>))
        .route("/job/:id/bids", post(handle_place_bid::<A>))
        .route(
            "/update/:id",
            get(handle_get_update_form::<A>).put(handle_update_job::<A>),
        )
        .with_state(api)
}

// endregion: --- Router

// region:    --- Session
#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        session_from_headers(&parts.headers).ok_or(AppError::MissingSession)
    }
}

fn session_from_headers(headers: &HeaderMap) -> Option<SessionUser> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let mut session = SessionUser::new(header(USER_EMAIL_HEADER)?);
    session.name = header(USER_NAME_HEADER);
    session.photo_url = header(USER_PHOTO_HEADER);
    Some(session)
}

// endregion: --- Session

// region:    --- Responses
#[derive(Debug, Serialize)]
pub struct JobPage {
    pub job: JobDetailView,
    pub form: BidForm,
}

#[derive(Debug, Serialize)]
pub struct ViewFailure {
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Serialize)]
pub struct BidResponse {
    pub outcome: &'static str,
    pub inserted_id: Option<String>,
    pub message: Option<String>,
    pub form: BidForm,
    pub field_errors: BidFieldErrors,
    pub notifications: Vec<Notification>,
    pub redirect: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub outcome: &'static str,
    pub modified_count: u64,
    pub message: Option<String>,
    pub notifications: Vec<Notification>,
    pub redirect: Option<String>,
}

fn unavailable(effects: &ViewEffects) -> Response {
    let mut notifications = effects.notifications();
    if notifications.is_empty() {
        notifications.push(Notification::error("Error").with_text(FETCH_ERROR_TEXT));
    }
    (StatusCode::BAD_GATEWAY, Json(ViewFailure { notifications })).into_response()
}

// endregion: --- Responses

// region:    --- Query Handlers

/// 작업 목록 카드 조회
pub async fn handle_get_jobs<A: MarketplaceApi>(State(api): State<Arc<A>>) -> Response {
    info!("{:<12} --> 작업 목록 조회", "Handler");
    match api.fetch_jobs().await {
        Ok(jobs) => {
            let cards: Vec<JobSummary> = jobs.iter().map(JobSummary::from).collect();
            Json(cards).into_response()
        }
        Err(e) => {
            error!("{:<12} --> 작업 목록 조회 실패: {}", "Handler", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// 작업 상세 + 입찰 폼 초기값
pub async fn handle_get_job<A: MarketplaceApi>(
    State(api): State<Arc<A>>,
    session: SessionUser,
    Path(id): Path<String>,
) -> Response {
    info!("{:<12} --> 작업 상세 조회 id: {}", "Handler", id);
    let effects = Arc::new(ViewEffects::new());
    let workflow = BidSubmissionWorkflow::new(api, id, session, effects.clone(), effects.clone());

    match workflow.load().await {
        Some(job) => Json(JobPage {
            job: JobDetailView::from(&job),
            form: workflow.form(),
        })
        .into_response(),
        None => unavailable(&effects),
    }
}

/// 수정 폼 초기값
pub async fn handle_get_update_form<A: MarketplaceApi>(
    State(api): State<Arc<A>>,
    session: SessionUser,
    Path(id): Path<String>,
) -> Response {
    info!("{:<12} --> 작업 수정 폼 조회 id: {}", "Handler", id);
    let effects = Arc::new(ViewEffects::new());
    let workflow = JobUpdateWorkflow::new(api, id, session, effects.clone(), effects.clone());

    match workflow.load().await {
        Some(form) => Json(form).into_response(),
        None => unavailable(&effects),
    }
}

// endregion: --- Query Handlers

// region:    --- Command Handlers

#[derive(Debug, Deserialize)]
pub struct BidRequest {
    /// 150 또는 "150" 모두 허용
    #[serde(default, deserialize_with = "lenient_text")]
    pub price: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
}

/// 입찰 제출
pub async fn handle_place_bid<A: MarketplaceApi>(
    State(api): State<Arc<A>>,
    session: SessionUser,
    Path(id): Path<String>,
    Json(request): Json<BidRequest>,
) -> Response {
    info!("{:<12} --> 입찰 요청 처리 시작 id: {}", "Handler", id);
    let effects = Arc::new(ViewEffects::new());
    let workflow = BidSubmissionWorkflow::new(api, id, session, effects.clone(), effects.clone());

    if workflow.load().await.is_none() {
        return unavailable(&effects);
    }

    workflow.set_price(request.price);
    workflow.set_comment(request.comment.unwrap_or_default());
    if let Some(deadline) = request.deadline {
        workflow.set_deadline(deadline);
    }

    let (status, outcome, inserted_id, message) = match workflow.submit().await {
        SubmitOutcome::Placed { inserted_id } => {
            (StatusCode::CREATED, "placed", Some(inserted_id), None)
        }
        SubmitOutcome::Rejected(rejection) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "rejected",
            None,
            Some(rejection.to_string()),
        ),
        SubmitOutcome::Failed(err) => {
            let status = match &err {
                BidSubmitError::AlreadyBid => StatusCode::CONFLICT,
                BidSubmitError::Backend(_) => StatusCode::BAD_GATEWAY,
            };
            (status, "failed", None, Some(err.to_string()))
        }
        SubmitOutcome::Ignored => (StatusCode::CONFLICT, "ignored", None, None),
        SubmitOutcome::Cancelled => (StatusCode::SERVICE_UNAVAILABLE, "cancelled", None, None),
    };

    let body = BidResponse {
        outcome,
        inserted_id,
        message,
        form: workflow.form(),
        field_errors: workflow.field_errors(),
        notifications: effects.notifications(),
        redirect: effects.redirect(),
    };
    (status, Json(body)).into_response()
}

/// 작업 수정
pub async fn handle_update_job<A: MarketplaceApi>(
    State(api): State<Arc<A>>,
    session: SessionUser,
    Path(id): Path<String>,
    Json(form): Json<JobUpdateForm>,
) -> Response {
    info!("{:<12} --> 작업 수정 요청 처리 시작 id: {}", "Handler", id);
    let effects = Arc::new(ViewEffects::new());
    let workflow = JobUpdateWorkflow::new(api, id, session, effects.clone(), effects.clone());

    if workflow.load().await.is_none() {
        return unavailable(&effects);
    }
    workflow.edit(|current| *current = form);

    let (status, outcome, modified_count, message) = match workflow.submit().await {
        UpdateOutcome::Updated { modified_count } => (StatusCode::OK, "updated", modified_count, None),
        UpdateOutcome::Unchanged => (StatusCode::OK, "unchanged", 0, None),
        UpdateOutcome::Rejected(e) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "rejected",
            0,
            Some(e.to_string()),
        ),
        UpdateOutcome::Failed(e) => (StatusCode::BAD_GATEWAY, "failed", 0, Some(e.to_string())),
        UpdateOutcome::Ignored => (StatusCode::CONFLICT, "ignored", 0, None),
        UpdateOutcome::Cancelled => (StatusCode::SERVICE_UNAVAILABLE, "cancelled", 0, None),
    };

    let body = UpdateResponse {
        outcome,
        modified_count,
        message,
        notifications: effects.notifications(),
        redirect: effects.redirect(),
    };
    (status, Json(body)).into_response()
}

// endregion: --- Command Handlers

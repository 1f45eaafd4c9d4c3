/// 작업 수정 워크플로우
/// 1. 마운트 시 작업 1회 조회 후 폼 초기화
/// 2. 폼 상태에서 전체 문서 조립
/// 3. 전체 문서 교체(PUT) 및 결과 처리
// region:    --- Imports
use super::model::{Buyer, Category, Job, JobDocument};
use crate::api::{cancellable, MarketplaceApi};
use crate::error::ApiError;
use crate::session::SessionUser;
use crate::ui::{lock, Navigator, Notification, Notifier, Route, SubmitGuard, FETCH_ERROR_TEXT};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

// endregion: --- Imports

pub const UPDATE_SUCCESS_TITLE: &str = "Update Successful";
pub const UPDATE_ERROR_TITLE: &str = "Error updating job";

// region:    --- Form
/// 수정 폼 상태 (모든 필드의 단일 진실 공급원)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobUpdateForm {
    pub job_title: String,
    pub email: String,
    pub category: Category,
    pub min_price: String,
    pub max_price: String,
    pub description: String,
    pub deadline: DateTime<Utc>,
}

impl From<&Job> for JobUpdateForm {
    fn from(job: &Job) -> Self {
        Self {
            job_title: job.title.clone(),
            email: job.email.clone(),
            category: job.category,
            min_price: job.min_price.map(|p| p.to_string()).unwrap_or_default(),
            max_price: job.max_price.map(|p| p.to_string()).unwrap_or_default(),
            description: job.description.clone(),
            deadline: job.deadline,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum JobFormError {
    #[error("Job details are not available yet")]
    JobUnavailable,

    #[error("Minimum price must be a number")]
    InvalidMinPrice,

    #[error("Maximum price must be a number")]
    InvalidMaxPrice,

    #[error("Minimum price should not exceed maximum price")]
    PriceRangeInverted,
}

impl JobUpdateForm {
    /// 전체 문서 조립 (total_bids 와 등록자는 조회한 작업에서 유지)
    pub fn to_document(&self, job: &Job, session: &SessionUser) -> Result<JobDocument, JobFormError> {
        let min_price = parse_price(&self.min_price).ok_or(JobFormError::InvalidMinPrice)?;
        let max_price = parse_price(&self.max_price).ok_or(JobFormError::InvalidMaxPrice)?;
        if min_price > max_price {
            return Err(JobFormError::PriceRangeInverted);
        }

        let buyer = if job.buyer.email.is_empty() {
            Buyer {
                name: session.name.clone(),
                email: session.email.clone(),
                image: session.photo_url.clone(),
            }
        } else {
            job.buyer.clone()
        };

        Ok(JobDocument {
            title: self.job_title.clone(),
            email: self.email.clone(),
            buyer,
            category: self.category,
            min_price,
            max_price,
            description: self.description.clone(),
            deadline: self.deadline,
            total_bids: job.total_bids,
        })
    }
}

fn parse_price(input: &str) -> Option<f64> {
    input.trim().parse::<f64>().ok().filter(|p| p.is_finite())
}

// endregion: --- Form

// region:    --- Outcome
#[derive(Debug)]
pub enum UpdateOutcome {
    Ignored,
    Rejected(JobFormError),
    Updated { modified_count: u64 },
    /// 서버가 변경 없음 보고
    Unchanged,
    Failed(ApiError),
    Cancelled,
}

// endregion: --- Outcome

// region:    --- Job Update Workflow
#[derive(Debug, Default)]
struct UpdateView {
    job: Option<Job>,
    form: Option<JobUpdateForm>,
}

pub struct JobUpdateWorkflow<A: MarketplaceApi> {
    api: Arc<A>,
    job_id: String,
    session: SessionUser,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    view: Mutex<UpdateView>,
    submitting: AtomicBool,
    scope: CancellationToken,
}

impl<A: MarketplaceApi> JobUpdateWorkflow<A> {
    pub fn new(
        api: Arc<A>,
        job_id: impl Into<String>,
        session: SessionUser,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            api,
            job_id: job_id.into(),
            session,
            notifier,
            navigator,
            view: Mutex::new(UpdateView::default()),
            submitting: AtomicBool::new(false),
            scope: CancellationToken::new(),
        }
    }

    /// 작업 조회 후 폼 초기화
    pub async fn load(&self) -> Option<JobUpdateForm> {
        info!("{:<12} --> 작업 조회 시작 id: {}", "JobUpdate", self.job_id);
        match cancellable(&self.scope, self.api.fetch_job(&self.job_id)).await {
            Ok(job) => {
                let form = JobUpdateForm::from(&job);
                let mut view = lock(&self.view);
                view.job = Some(job);
                view.form = Some(form.clone());
                Some(form)
            }
            Err(ApiError::Cancelled) => None,
            Err(e) => {
                error!("{:<12} --> 작업 조회 실패: {}", "JobUpdate", e);
                self.notifier
                    .notify(Notification::error("Error").with_text(FETCH_ERROR_TEXT));
                None
            }
        }
    }

    pub fn form(&self) -> Option<JobUpdateForm> {
        lock(&self.view).form.clone()
    }

    /// 필드 변경 (로드 전이면 false)
    pub fn edit<F>(&self, change: F) -> bool
    where
        F: FnOnce(&mut JobUpdateForm),
    {
        match lock(&self.view).form.as_mut() {
            Some(form) => {
                change(form);
                true
            }
            None => false,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// 수정 제출 (동시에 하나만 진행)
    pub async fn submit(&self) -> UpdateOutcome {
        let Some(_guard) = SubmitGuard::acquire(&self.submitting) else {
            info!("{:<12} --> 제출 진행 중: 요청 무시", "JobUpdate");
            return UpdateOutcome::Ignored;
        };

        let document = match self.prepare() {
            Ok(document) => document,
            Err(e) => {
                warn!("{:<12} --> 수정 폼 검증 실패: {}", "JobUpdate", e);
                if e == JobFormError::JobUnavailable {
                    self.notifier.notify(Notification::error(e.to_string()));
                }
                return UpdateOutcome::Rejected(e);
            }
        };

        let result = cancellable(&self.scope, self.api.update_job(&self.job_id, &document)).await;
        match result {
            Ok(updated) if updated.modified_count > 0 => {
                info!(
                    "{:<12} --> 작업 수정 성공: modified={}",
                    "JobUpdate", updated.modified_count
                );
                self.notifier.notify(Notification::success(UPDATE_SUCCESS_TITLE));
                self.navigator.navigate(Route::MyPostedJobs);
                UpdateOutcome::Updated {
                    modified_count: updated.modified_count,
                }
            }
            Ok(_) => {
                info!("{:<12} --> 변경된 문서 없음", "JobUpdate");
                UpdateOutcome::Unchanged
            }
            Err(ApiError::Cancelled) => {
                info!("{:<12} --> 화면 종료로 수정 요청 취소", "JobUpdate");
                UpdateOutcome::Cancelled
            }
            Err(e) => {
                error!("{:<12} --> 작업 수정 실패: {}", "JobUpdate", e);
                self.notifier
                    .notify(Notification::error(UPDATE_ERROR_TITLE).with_text(e.to_string()));
                UpdateOutcome::Failed(e)
            }
        }
    }

    fn prepare(&self) -> Result<JobDocument, JobFormError> {
        let view = lock(&self.view);
        match (&view.job, &view.form) {
            (Some(job), Some(form)) => form.to_document(job, &self.session),
            _ => Err(JobFormError::JobUnavailable),
        }
    }

    pub fn teardown(&self) {
        self.scope.cancel();
    }

    /// 화면 수명에 묶인 토큰 (teardown 또는 drop 시 취소)
    pub fn scope(&self) -> CancellationToken {
        self.scope.child_token()
    }
}

impl<A: MarketplaceApi> Drop for JobUpdateWorkflow<A> {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}

// endregion: --- Job Update Workflow

/// 입찰 제출 워크플로우
/// 1. 마운트 시 작업 1회 조회
/// 2. 폼 입력 검증
/// 3. 입찰 생성 및 결과 처리
// region:    --- Imports
use super::model::{BidFieldErrors, BidForm, NewBid};
use super::validation::{validate_bid, BidRejection};
use crate::api::{cancellable, MarketplaceApi};
use crate::error::ApiError;
use crate::job::model::Job;
use crate::session::SessionUser;
use crate::ui::{lock, Navigator, Notification, Notifier, Route, SubmitGuard, FETCH_ERROR_TEXT};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

// endregion: --- Imports

pub const BID_PLACED_TITLE: &str = "Bid placed successfully!";
pub const ALREADY_BID_TITLE: &str = "You have already bid on this job";
pub const BID_FAILED_TITLE: &str = "Unable to place bid";
const OWN_JOB_TOAST: Duration = Duration::from_millis(1500);

// region:    --- Outcome
#[derive(Debug)]
pub enum SubmitOutcome {
    /// 이미 제출 중 (무시됨)
    Ignored,
    Rejected(BidRejection),
    Placed { inserted_id: String },
    Failed(BidSubmitError),
    Cancelled,
}

#[derive(Debug, thiserror::Error)]
pub enum BidSubmitError {
    #[error("You have already bid on this job")]
    AlreadyBid,

    #[error(transparent)]
    Backend(ApiError),
}

impl From<ApiError> for BidSubmitError {
    fn from(err: ApiError) -> Self {
        if err.is_duplicate() {
            BidSubmitError::AlreadyBid
        } else {
            BidSubmitError::Backend(err)
        }
    }
}

// endregion: --- Outcome

// region:    --- View State
#[derive(Debug)]
struct BidView {
    job: Option<Job>,
    form: BidForm,
    errors: BidFieldErrors,
}

// endregion: --- View State

// region:    --- Bid Submission Workflow
pub struct BidSubmissionWorkflow<A: MarketplaceApi> {
    api: Arc<A>,
    job_id: String,
    session: SessionUser,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    view: Mutex<BidView>,
    submitting: AtomicBool,
    scope: CancellationToken,
}

impl<A: MarketplaceApi> BidSubmissionWorkflow<A> {
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
            view: Mutex::new(BidView {
                job: None,
                form: BidForm::new(Utc::now()),
                errors: BidFieldErrors::default(),
            }),
            submitting: AtomicBool::new(false),
            scope: CancellationToken::new(),
        }
    }

    /// 작업 조회 후 날짜 선택 값을 작업 마감일로 설정
    pub async fn load(&self) -> Option<Job> {
        info!("{:<12} --> 작업 조회 시작 id: {}", "Bid", self.job_id);
        match cancellable(&self.scope, self.api.fetch_job(&self.job_id)).await {
            Ok(job) => {
                let mut view = lock(&self.view);
                view.form.deadline = job.deadline;
                view.job = Some(job.clone());
                Some(job)
            }
            Err(ApiError::Cancelled) => None,
            Err(e) => {
                error!("{:<12} --> 작업 조회 실패: {}", "Bid", e);
                self.notifier
                    .notify(Notification::error("Error").with_text(FETCH_ERROR_TEXT));
                None
            }
        }
    }

    // region:    --- Form Fields
    pub fn set_price(&self, price: impl Into<String>) {
        lock(&self.view).form.price = price.into();
    }

    pub fn set_comment(&self, comment: impl Into<String>) {
        lock(&self.view).form.comment = comment.into();
    }

    pub fn set_deadline(&self, deadline: DateTime<Utc>) {
        lock(&self.view).form.deadline = deadline;
    }

    pub fn form(&self) -> BidForm {
        lock(&self.view).form.clone()
    }

    pub fn field_errors(&self) -> BidFieldErrors {
        lock(&self.view).errors.clone()
    }

    pub fn job(&self) -> Option<Job> {
        lock(&self.view).job.clone()
    }
    // endregion: --- Form Fields

    /// 제출 버튼 비활성화 여부
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// 입찰 제출 (동시에 하나만 진행)
    pub async fn submit(&self) -> SubmitOutcome {
        let Some(_guard) = SubmitGuard::acquire(&self.submitting) else {
            info!("{:<12} --> 제출 진행 중: 요청 무시", "Bid");
            return SubmitOutcome::Ignored;
        };

        let bid = match self.prepare() {
            Ok(bid) => bid,
            Err(rejection) => {
                warn!("{:<12} --> 입찰 검증 실패: {}", "Bid", rejection);
                if rejection.is_blocking() {
                    let notification = Notification::error(rejection.to_string());
                    let notification = match rejection {
                        BidRejection::OwnJob => notification.toast(OWN_JOB_TOAST),
                        _ => notification,
                    };
                    self.notifier.notify(notification);
                }
                return SubmitOutcome::Rejected(rejection);
            }
        };

        info!(
            "{:<12} --> 입찰 요청: job_id={}, price={}",
            "Bid", bid.job_id, bid.price
        );
        let result = cancellable(&self.scope, self.api.create_bid(&bid)).await;

        match result {
            Ok(inserted) => match inserted.inserted_id {
                Some(inserted_id) => {
                    lock(&self.view).form.reset();
                    info!("{:<12} --> 입찰 성공: {}", "Bid", inserted_id);
                    self.notifier.notify(Notification::success(BID_PLACED_TITLE));
                    self.navigator.navigate(Route::MyBids);
                    SubmitOutcome::Placed { inserted_id }
                }
                None => {
                    warn!("{:<12} --> insertedId 없음: 중복 입찰로 처리", "Bid");
                    self.fail(BidSubmitError::AlreadyBid)
                }
            },
            Err(ApiError::Cancelled) => {
                info!("{:<12} --> 화면 종료로 입찰 요청 취소", "Bid");
                SubmitOutcome::Cancelled
            }
            Err(e) => self.fail(e.into()),
        }
    }

    /// 검증 후 입찰 레코드 생성
    fn prepare(&self) -> Result<NewBid, BidRejection> {
        let mut view = lock(&self.view);
        let BidView { job, form, errors } = &mut *view;
        let job = job.as_ref().ok_or(BidRejection::JobUnavailable)?;

        match validate_bid(job, form, &self.session) {
            Ok(price) => {
                *errors = BidFieldErrors::default();
                Ok(NewBid::new(job, price, form, &self.session))
            }
            Err(rejection) => {
                rejection.apply_to(errors);
                Err(rejection)
            }
        }
    }

    fn fail(&self, err: BidSubmitError) -> SubmitOutcome {
        error!("{:<12} --> 입찰 실패: {}", "Bid", err);
        let notification = match &err {
            BidSubmitError::AlreadyBid => Notification::error(ALREADY_BID_TITLE),
            BidSubmitError::Backend(e) => Notification::error(BID_FAILED_TITLE).with_text(e.to_string()),
        };
        self.notifier.notify(notification);
        SubmitOutcome::Failed(err)
    }

    /// 화면 종료: 진행 중인 호출 취소
    pub fn teardown(&self) {
        self.scope.cancel();
    }

    /// 화면 수명에 묶인 토큰 (teardown 또는 drop 시 취소)
    pub fn scope(&self) -> CancellationToken {
        self.scope.child_token()
    }
}

impl<A: MarketplaceApi> Drop for BidSubmissionWorkflow<A> {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}

// endregion: --- Bid Submission Workflow

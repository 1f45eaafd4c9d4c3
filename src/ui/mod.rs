/// 외부 UI 협력자 (알림 다이얼로그, 라우터)
/// 워크플로우는 이 트레이트를 통해서만 화면에 영향을 준다.
// region:    --- Imports
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

// endregion: --- Imports

/// 최초 조회 실패 알림 본문
pub const FETCH_ERROR_TEXT: &str = "Unable to fetch job details. Please try again later.";

// region:    --- Notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Top,
    Center,
}

/// 모달 알림
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub text: Option<String>,
    pub position: Position,
    pub show_confirm: bool,
    /// 자동 닫힘 시간 (밀리초)
    #[serde(rename = "timer_ms", serialize_with = "serialize_timer")]
    pub timer: Option<Duration>,
}

impl Notification {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            text: None,
            position: Position::Center,
            show_confirm: true,
            timer: None,
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            ..Self::success(title)
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// 확인 버튼 없이 상단에 잠시 표시
    pub fn toast(mut self, timer: Duration) -> Self {
        self.position = Position::Top;
        self.show_confirm = false;
        self.timer = Some(timer);
        self
    }
}

fn serialize_timer<S>(timer: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match timer {
        Some(timer) => serializer.serialize_some(&(timer.as_millis() as u64)),
        None => serializer.serialize_none(),
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

// endregion: --- Notification

// region:    --- Navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    JobDetail(String),
    MyBids,
    MyPostedJobs,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::JobDetail(id) => format!("/job/{id}"),
            Route::MyBids => "/my-bids".to_string(),
            Route::MyPostedJobs => "/my-posted-jobs".to_string(),
        }
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

// endregion: --- Navigation

// region:    --- View Effects
/// 알림과 이동 요청을 기록하는 화면 호스트
#[derive(Debug, Default)]
pub struct ViewEffects {
    notifications: Mutex<Vec<Notification>>,
    routes: Mutex<Vec<Route>>,
}

impl ViewEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        lock(&self.notifications).clone()
    }

    pub fn routes(&self) -> Vec<Route> {
        lock(&self.routes).clone()
    }

    /// 마지막 이동 경로
    pub fn redirect(&self) -> Option<String> {
        lock(&self.routes).last().map(Route::path)
    }
}

impl Notifier for ViewEffects {
    fn notify(&self, notification: Notification) {
        lock(&self.notifications).push(notification);
    }
}

impl Navigator for ViewEffects {
    fn navigate(&self, route: Route) {
        lock(&self.routes).push(route);
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// endregion: --- View Effects

// region:    --- Submit Guard
/// 단일 슬롯 제출 플래그. Drop 시 해제
pub(crate) struct SubmitGuard<'a>(&'a AtomicBool);

impl<'a> SubmitGuard<'a> {
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        if flag.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// endregion: --- Submit Guard

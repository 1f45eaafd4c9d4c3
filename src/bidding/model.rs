use crate::job::model::{Category, Job};
use crate::session::SessionUser;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 입찰 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BidStatus {
    Pending,
}

// 입찰 생성 요청 (생성 시점 스냅샷)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBid {
    pub price: f64,
    pub comment: String,
    pub deadline: DateTime<Utc>,
    /// 입찰자 이메일
    pub email: String,
    #[serde(rename = "jobId")]
    pub job_id: String,
    #[serde(rename = "jobTitle")]
    pub job_title: String,
    pub category: Category,
    /// 작업 등록자 이메일
    pub buyer: String,
    pub status: BidStatus,
}

impl NewBid {
    pub fn new(job: &Job, price: f64, form: &BidForm, session: &SessionUser) -> Self {
        Self {
            price,
            comment: form.comment.clone(),
            deadline: form.deadline,
            email: session.email.clone(),
            job_id: job.id.clone(),
            job_title: job.title.clone(),
            category: job.category,
            buyer: job.buyer.email.clone(),
            status: BidStatus::Pending,
        }
    }
}

// 입찰 폼 상태 (단일 진실 공급원)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidForm {
    pub price: String,
    #[serde(default)]
    pub comment: String,
    pub deadline: DateTime<Utc>,
}

impl BidForm {
    pub fn new(deadline: DateTime<Utc>) -> Self {
        Self {
            price: String::new(),
            comment: String::new(),
            deadline,
        }
    }

    /// 입력 필드 초기화 (날짜 선택 값은 유지)
    pub fn reset(&mut self) {
        self.price.clear();
        self.comment.clear();
    }
}

// 필드별 인라인 오류
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BidFieldErrors {
    pub price: Option<String>,
    pub deadline: Option<String>,
}

impl BidFieldErrors {
    pub fn is_empty(&self) -> bool {
        self.price.is_none() && self.deadline.is_none()
    }
}

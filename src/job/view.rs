/// 작업 요약 카드 및 상세 헤더 표시 모델
// region:    --- Imports
use super::model::{Category, Job};
use crate::ui::Route;
use chrono::{DateTime, Utc};
use serde::Serialize;

// endregion: --- Imports

const EXCERPT_CHARS: usize = 18;
pub const DEFAULT_AVATAR: &str = "/default-avatar.png";

// region:    --- Job Summary
/// 목록 카드
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobSummary {
    pub link: String,
    pub deadline: String,
    pub category: Category,
    pub title: String,
    pub excerpt: String,
    pub price_range: String,
    pub total_bids: u64,
}

impl From<&Job> for JobSummary {
    fn from(job: &Job) -> Self {
        Self {
            link: Route::JobDetail(job.id.clone()).path(),
            deadline: short_date(&job.deadline),
            category: job.category,
            title: job.title.clone(),
            excerpt: excerpt(&job.description),
            price_range: format!("{} - {}", bound(job.min_price, ""), bound(job.max_price, "")),
            total_bids: job.total_bids,
        }
    }
}

// endregion: --- Job Summary

// region:    --- Job Detail
/// 상세 화면 헤더
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobDetailView {
    pub id: String,
    pub deadline: String,
    pub category: Category,
    pub buyer_avatar: String,
    pub title: String,
    pub description: String,
    pub buyer_name: Option<String>,
    pub buyer_email: String,
    pub price_range: String,
}

impl From<&Job> for JobDetailView {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id.clone(),
            deadline: short_date(&job.deadline),
            category: job.category,
            buyer_avatar: job
                .buyer
                .image
                .clone()
                .filter(|image| !image.is_empty())
                .unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
            title: job.title.clone(),
            description: job.description.clone(),
            buyer_name: job.buyer.name.clone(),
            buyer_email: job.buyer.email.clone(),
            price_range: format!("{} - {}", bound(job.min_price, "$"), bound(job.max_price, "$")),
        }
    }
}

// endregion: --- Job Detail

/// MM/DD/YYYY
pub fn short_date(at: &DateTime<Utc>) -> String {
    at.format("%m/%d/%Y").to_string()
}

/// 빈 가격은 N/A
fn bound(price: Option<f64>, prefix: &str) -> String {
    match price {
        Some(price) => format!("{prefix}{price}"),
        None => "N/A".to_string(),
    }
}

fn excerpt(description: &str) -> String {
    let head: String = description.chars().take(EXCERPT_CHARS).collect();
    format!("{head}...")
}

// region:    --- Imports
use crate::bidding::model::NewBid;
use crate::error::ApiError;
use crate::job::model::{Job, JobDocument};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::future::Future;
use tokio_util::sync::CancellationToken;

// endregion: --- Imports

// region:    --- Modules
mod http;

pub use http::HttpMarketplaceApi;

// endregion: --- Modules

// region:    --- Responses
/// 입찰 생성 응답
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsertResult {
    #[serde(rename = "insertedId", default, skip_serializing_if = "Option::is_none")]
    pub inserted_id: Option<String>,
}

/// 작업 수정 응답
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateResult {
    #[serde(rename = "modifiedCount", default)]
    pub modified_count: u64,
}

// endregion: --- Responses

// region:    --- Marketplace Api Trait
/// 마켓플레이스 REST API 계약
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    async fn fetch_jobs(&self) -> Result<Vec<Job>, ApiError>;

    /// 단건 조회 (부수 효과 없음)
    async fn fetch_job(&self, id: &str) -> Result<Job, ApiError>;

    async fn create_bid(&self, bid: &NewBid) -> Result<InsertResult, ApiError>;

    /// 전체 문서 교체
    async fn update_job(&self, id: &str, job: &JobDocument) -> Result<UpdateResult, ApiError>;
}

// endregion: --- Marketplace Api Trait

/// 취소 토큰과 경쟁하며 호출 실행
pub async fn cancellable<T, F>(token: &CancellationToken, call: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(ApiError::Cancelled),
        result = call => result,
    }
}

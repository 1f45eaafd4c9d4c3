// region:    --- Imports
use super::{InsertResult, MarketplaceApi, UpdateResult};
use crate::bidding::model::NewBid;
use crate::config::Config;
use crate::error::ApiError;
use crate::job::model::{Job, JobDocument};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{error, info};

// endregion: --- Imports

const JOBS_ENDPOINT: &str = "/jobs";
const JOB_ENDPOINT: &str = "/job";
const BIDS_ENDPOINT: &str = "/bids";

// region:    --- Http Marketplace Api
/// reqwest 기반 API 클라이언트 (상태 없음)
#[derive(Clone)]
pub struct HttpMarketplaceApi {
    client: Client,
    base_url: String,
}

impl HttpMarketplaceApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(config.api_base_url.clone(), config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 성공 응답은 역직렬화, 실패 응답은 서버 메시지로 변환
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = server_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });
        error!(
            "{:<12} --> 서버 오류 응답: status={}, message={}",
            "Api", status, message
        );
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl MarketplaceApi for HttpMarketplaceApi {
    async fn fetch_jobs(&self) -> Result<Vec<Job>, ApiError> {
        let url = self.url(JOBS_ENDPOINT);
        info!("{:<12} --> 작업 목록 조회: {}", "Api", url);
        let response = self.client.get(&url).send().await?;
        Self::decode(response).await
    }

    async fn fetch_job(&self, id: &str) -> Result<Job, ApiError> {
        let url = self.url(&format!("{JOB_ENDPOINT}/{id}"));
        info!("{:<12} --> 작업 조회: {}", "Api", url);
        let response = self.client.get(&url).send().await?;
        Self::decode(response).await
    }

    async fn create_bid(&self, bid: &NewBid) -> Result<InsertResult, ApiError> {
        let url = self.url(BIDS_ENDPOINT);
        info!(
            "{:<12} --> 입찰 생성: job_id={}, bidder={}",
            "Api", bid.job_id, bid.email
        );
        let response = self.client.post(&url).json(bid).send().await?;
        Self::decode(response).await
    }

    async fn update_job(&self, id: &str, job: &JobDocument) -> Result<UpdateResult, ApiError> {
        let url = self.url(&format!("{JOB_ENDPOINT}/{id}"));
        info!("{:<12} --> 작업 수정: {}", "Api", url);
        let response = self.client.put(&url).json(job).send().await?;
        Self::decode(response).await
    }
}

// endregion: --- Http Marketplace Api

/// 오류 본문에서 메시지 추출 ({"message"} / {"error"} / 일반 텍스트)
fn server_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => ["message", "error"]
            .iter()
            .find_map(|key| map.get(*key).and_then(|v| v.as_str()))
            .map(str::to_string),
        Ok(serde_json::Value::String(text)) => Some(text),
        _ => Some(body.to_string()),
    }
}

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use job_bidding::api::{InsertResult, MarketplaceApi, UpdateResult};
use job_bidding::bidding::model::NewBid;
use job_bidding::error::ApiError;
use job_bidding::job::model::{Buyer, Category, Job, JobDocument};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// 트레이싱 초기화 (여러 테스트에서 호출 가능)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .without_time()
        .with_target(false)
        .with_test_writer()
        .try_init();
}

pub fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// 테스트용 작업 (50~200, 마감 2025-06-01, 등록자 a@x.com)
pub fn sample_job() -> Job {
    Job {
        id: "job-1".to_string(),
        title: "Landing page".to_string(),
        email: "a@x.com".to_string(),
        category: Category::WebDevelopment,
        min_price: Some(50.0),
        max_price: Some(200.0),
        description: "Build a responsive landing page".to_string(),
        deadline: date(2025, 6, 1),
        total_bids: 2,
        buyer: Buyer {
            name: Some("Ann".to_string()),
            email: "a@x.com".to_string(),
            image: Some("https://img/ann.png".to_string()),
        },
    }
}

/// 메모리 기반 API
pub struct FakeApi {
    jobs: HashMap<String, Job>,
    bid_reply: Result<Option<String>, (u16, String)>,
    update_reply: Result<u64, (u16, String)>,
    gate: Option<Arc<Notify>>,
    fetch_gate: Option<Arc<Notify>>,
    pub started: Notify,
    pub bids: Mutex<Vec<NewBid>>,
    pub updates: Mutex<Vec<(String, JobDocument)>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            jobs: HashMap::new(),
            bid_reply: Ok(Some("abc".to_string())),
            update_reply: Ok(1),
            gate: None,
            fetch_gate: None,
            started: Notify::new(),
            bids: Mutex::new(Vec::new()),
            updates: Mutex::new(Vec::new()),
        }
    }

    pub fn with_job(mut self, job: Job) -> Self {
        self.jobs.insert(job.id.clone(), job);
        self
    }

    pub fn bid_reply(mut self, reply: Result<Option<String>, (u16, &str)>) -> Self {
        self.bid_reply = reply.map_err(|(status, message)| (status, message.to_string()));
        self
    }

    pub fn update_reply(mut self, reply: Result<u64, (u16, &str)>) -> Self {
        self.update_reply = reply.map_err(|(status, message)| (status, message.to_string()));
        self
    }

    /// 쓰기 호출을 gate 가 열릴 때까지 대기시킴
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// 단건 조회를 gate 가 열릴 때까지 대기시킴
    pub fn gated_fetch(mut self, gate: Arc<Notify>) -> Self {
        self.fetch_gate = Some(gate);
        self
    }

    pub fn bids(&self) -> Vec<NewBid> {
        self.bids.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<(String, JobDocument)> {
        self.updates.lock().unwrap().clone()
    }

    async fn wait_gate(&self) {
        self.started.notify_one();
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

fn status_error((status, message): &(u16, String)) -> ApiError {
    ApiError::Status {
        status: *status,
        message: message.clone(),
    }
}

#[async_trait]
impl MarketplaceApi for FakeApi {
    async fn fetch_jobs(&self) -> Result<Vec<Job>, ApiError> {
        let mut jobs: Vec<Job> = self.jobs.values().cloned().collect();
        jobs.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(jobs)
    }

    async fn fetch_job(&self, id: &str) -> Result<Job, ApiError> {
        if let Some(gate) = &self.fetch_gate {
            self.started.notify_one();
            gate.notified().await;
        }
        self.jobs.get(id).cloned().ok_or(ApiError::Status {
            status: 404,
            message: "Job not found".to_string(),
        })
    }

    async fn create_bid(&self, bid: &NewBid) -> Result<InsertResult, ApiError> {
        self.bids.lock().unwrap().push(bid.clone());
        self.wait_gate().await;
        match &self.bid_reply {
            Ok(inserted_id) => Ok(InsertResult {
                inserted_id: inserted_id.clone(),
            }),
            Err(e) => Err(status_error(e)),
        }
    }

    async fn update_job(&self, id: &str, job: &JobDocument) -> Result<UpdateResult, ApiError> {
        self.updates
            .lock()
            .unwrap()
            .push((id.to_string(), job.clone()));
        self.wait_gate().await;
        match &self.update_reply {
            Ok(modified_count) => Ok(UpdateResult {
                modified_count: *modified_count,
            }),
            Err(e) => Err(status_error(e)),
        }
    }
}

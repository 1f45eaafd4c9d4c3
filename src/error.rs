// region:    --- Imports
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

// endregion: --- Imports

// region:    --- Api Error
/// 마켓플레이스 API 호출 오류
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    /// 중복 입찰 거절 여부 (409 또는 서버 메시지에 "already" 포함)
    pub fn is_duplicate(&self) -> bool {
        match self {
            ApiError::Status { status, message } => {
                *status == StatusCode::CONFLICT.as_u16()
                    || message.to_ascii_lowercase().contains("already")
            }
            _ => false,
        }
    }
}

// endregion: --- Api Error

// region:    --- Config Error
/// 환경 설정 오류
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),

    #[error("invalid {key} value: {reason}")]
    Invalid { key: &'static str, reason: String },
}

// endregion: --- Config Error

// region:    --- App Error
/// BFF 레벨 오류
#[derive(Error, Debug)]
pub enum AppError {
    #[error("missing session identity")]
    MissingSession,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MissingSession => StatusCode::UNAUTHORIZED,
        };

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

// endregion: --- App Error

use serde::{Deserialize, Serialize};

/// 인증 공급자가 전달하는 세션 사용자 (읽기 전용)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
    pub name: Option<String>,
    pub photo_url: Option<String>,
}

impl SessionUser {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
            photo_url: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_photo(mut self, photo_url: impl Into<String>) -> Self {
        self.photo_url = Some(photo_url.into());
        self
    }

    /// 이메일 동일 여부 (ASCII 대소문자 무시)
    pub fn is(&self, email: &str) -> bool {
        !email.is_empty() && self.email.eq_ignore_ascii_case(email)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// 작업 카테고리
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "Graphics Design")]
    GraphicsDesign,
    #[serde(rename = "Digital Marketing")]
    DigitalMarketing,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::WebDevelopment => "Web Development",
            Category::GraphicsDesign => "Graphics Design",
            Category::DigitalMarketing => "Digital Marketing",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// 작업 등록자
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Buyer {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub image: Option<String>,
}

// 작업 모델 (백엔드 소유, 화면별 임시 사본)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "jobTitle")]
    pub title: String,
    #[serde(default)]
    pub email: String,
    pub category: Category,
    /// 빈 값이면 None
    #[serde(default, deserialize_with = "lenient_bound")]
    pub min_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_bound")]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub description: String,
    pub deadline: DateTime<Utc>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total_bids: u64,
    #[serde(default)]
    pub buyer: Buyer,
}

impl Job {
    /// 입찰 가능한 가격 범위 (두 값이 모두 있어야 함)
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        Some((self.min_price?, self.max_price?))
    }
}

// 작업 수정 요청 본문 (전체 문서 교체)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDocument {
    #[serde(rename = "jobTitle")]
    pub title: String,
    pub email: String,
    pub buyer: Buyer,
    pub category: Category,
    pub min_price: f64,
    pub max_price: f64,
    pub description: String,
    pub deadline: DateTime<Utc>,
    pub total_bids: u64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            NumberOrText::Number(n) => Ok(n),
            NumberOrText::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| E::custom(format!("invalid number: {s:?}"))),
        }
    }
}

/// 숫자 또는 문자열을 폼 입력 문자열로
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => n.to_string(),
        NumberOrText::Text(s) => s,
    })
}

/// 숫자 또는 숫자 문자열 허용, null 과 빈 문자열은 None
fn lenient_bound<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(value) => value.into_f64().map(Some),
    }
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = NumberOrText::deserialize(deserializer)?.into_f64::<D::Error>()?;
    if value < 0.0 || value.fract() != 0.0 {
        return Err(serde::de::Error::custom(format!(
            "invalid counter: {value}"
        )));
    }
    Ok(value as u64)
}

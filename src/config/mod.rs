/// 환경 변수 기반 설정
// region:    --- Imports
use crate::error::ConfigError;
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

// endregion: --- Imports

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_TIMEOUT_SECS: &str = "30";

// region:    --- Config
#[derive(Debug, Clone)]
pub struct Config {
    /// 마켓플레이스 REST API 주소 (끝의 '/' 제거)
    pub api_base_url: String,
    pub listen_addr: String,
    pub request_timeout: Duration,
}

impl Config {
    /// 환경 변수에서 설정 로드
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 임의의 조회 함수로 설정 로드
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::Missing("API_URL"))?;

        let listen_addr: String = try_load(&lookup, "LISTEN_ADDR", DEFAULT_LISTEN_ADDR)?;
        let timeout_secs: u64 = try_load(&lookup, "REQUEST_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;

        Ok(Self {
            api_base_url,
            listen_addr,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn try_load<F, T>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    lookup(key)
        .unwrap_or_else(|| {
            info!("{:<12} --> {key} not set, using default: {default}", "Config");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        })
}

// endregion: --- Config

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_optional_values_are_absent() {
        let config = Config::from_lookup(lookup_from(&[("API_URL", "http://api.local/")])).unwrap();
        assert_eq!(config.api_base_url, "http://api.local");
        assert_eq!(config.listen_addr, DEFAULT_LISTEN_ADDR);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn missing_api_url_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("API_URL")));
    }

    #[test]
    fn unparsable_timeout_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[
            ("API_URL", "http://api.local"),
            ("REQUEST_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "REQUEST_TIMEOUT_SECS",
                ..
            }
        ));
    }
}

use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_AI_ENDPOINT: &str = "https://api.siliconflow.cn/v1/chat/completions";
pub const DEFAULT_AI_MODEL: &str = "Qwen/QwQ-32B";
pub const DEFAULT_PUBLISH_ENDPOINT: &str = "https://note.limyai.com/api/openapi/publish_note";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

pub const AI_API_KEY_VAR: &str = "AI_API_KEY";
pub const XHS_API_KEY_VAR: &str = "XHS_API_KEY";

/// Runtime configuration, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub ai_endpoint: String,
    pub ai_model: String,
    pub ai_api_key: Option<String>,
    pub xhs_api_key: Option<String>,
    pub publish_endpoint: String,
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Loads `.env` (if present) and then reads the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds a config from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| non_empty(lookup(var));

        AppConfig {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(get("PORT"), DEFAULT_PORT),
            ai_endpoint: get("AI_ENDPOINT").unwrap_or_else(|| DEFAULT_AI_ENDPOINT.to_string()),
            ai_model: get("AI_MODEL").unwrap_or_else(|| DEFAULT_AI_MODEL.to_string()),
            ai_api_key: get(AI_API_KEY_VAR),
            xhs_api_key: get(XHS_API_KEY_VAR),
            publish_endpoint: get("XHS_PUBLISH_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_PUBLISH_ENDPOINT.to_string()),
            request_timeout: Duration::from_secs(parse_or(
                get("REQUEST_TIMEOUT_SECS"),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Names of credentials that are not configured.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.ai_api_key.is_none() {
            missing.push(AI_API_KEY_VAR);
        }
        if self.xhs_api_key.is_none() {
            missing.push(XHS_API_KEY_VAR);
        }
        missing
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.ai_endpoint, DEFAULT_AI_ENDPOINT);
        assert_eq!(config.ai_model, DEFAULT_AI_MODEL);
        assert_eq!(config.publish_endpoint, DEFAULT_PUBLISH_ENDPOINT);
        assert_eq!(config.request_timeout, Duration::from_secs(120));
        assert_eq!(config.missing_credentials(), vec!["AI_API_KEY", "XHS_API_KEY"]);
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("AI_MODEL", "deepseek-ai/DeepSeek-V3"),
            ("AI_API_KEY", " sk-test "),
            ("XHS_API_KEY", "xhs"),
            ("REQUEST_TIMEOUT_SECS", "5"),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.ai_model, "deepseek-ai/DeepSeek-V3");
        assert_eq!(config.ai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert!(config.missing_credentials().is_empty());
    }

    #[test]
    fn test_empty_and_invalid_values_fall_back() {
        let config = config_from(&[("PORT", "not-a-port"), ("AI_API_KEY", "   "), ("HOST", "")]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.host, DEFAULT_HOST);
        assert!(config.ai_api_key.is_none());
    }
}

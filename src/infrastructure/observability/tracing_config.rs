pub const DEFAULT_LOG_FILTER: &str = "info,scoutout=debug,tower_http=debug";

/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    pub filter: String,
}

impl TracingConfig {
    pub fn new(environment: impl Into<String>, json_format: bool, filter: Option<&str>) -> Self {
        Self {
            environment: environment.into(),
            json_format: json_format || json_requested_by_env(),
            filter: filter
                .filter(|f| !f.trim().is_empty())
                .unwrap_or(DEFAULT_LOG_FILTER)
                .to_string(),
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string()),
            json_format: json_requested_by_env(),
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

fn json_requested_by_env() -> bool {
    std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

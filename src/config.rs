use std::time::Duration;

use worker::Env;

pub const DEFAULT_API_BASE: &str = "https://i.instagram.com/api/v1";
pub const DEFAULT_APP_ID: &str = "936619743392459";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                                      AppleWebKit/537.36 (KHTML, like Gecko) \
                                      Chrome/120.0.0.0 Safari/537.36";

/// Scraper settings. Every field can be overridden by a worker var.
#[derive(Debug, Clone, PartialEq)]
pub struct ScraperConfig {
    pub api_base: String,
    pub app_id: String,
    pub user_agent: String,
    /// Most recent posts sampled per profile.
    pub post_limit: usize,
    /// Attempts before giving up with the zero-result.
    pub max_retries: u32,
    /// Backoff after failed attempt `n` is `backoff_base * 2^n`.
    pub backoff_base: Duration,
    /// Fixed wait after a transport error.
    pub error_delay: Duration,
    pub request_timeout: Duration,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        ScraperConfig {
            api_base: DEFAULT_API_BASE.to_string(),
            app_id: DEFAULT_APP_ID.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            post_limit: 30,
            max_retries: 3,
            backoff_base: Duration::from_secs(1),
            error_delay: Duration::from_secs(2),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl ScraperConfig {
    /// Reads overrides from the worker environment (wrangler `[vars]`).
    pub fn from_env(env: &Env) -> Self {
        Self::from_lookup(|key| env.var(key).ok().map(|v| v.to_string()))
    }

    /// Builds a config from any key lookup. Missing or unparsable values keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ScraperConfig::default();
        let text = |key: &str, default: String| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };
        let millis = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(default)
        };

        ScraperConfig {
            api_base: text("IG_API_BASE", defaults.api_base)
                .trim_end_matches('/')
                .to_string(),
            app_id: text("IG_APP_ID", defaults.app_id),
            user_agent: text("IG_USER_AGENT", defaults.user_agent),
            post_limit: lookup("POST_LIMIT")
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(defaults.post_limit),
            max_retries: lookup("MAX_RETRIES")
                .and_then(|v| v.trim().parse::<u32>().ok())
                .filter(|&n| n >= 1)
                .unwrap_or(defaults.max_retries),
            backoff_base: millis("BACKOFF_BASE_MS", defaults.backoff_base),
            error_delay: millis("ERROR_DELAY_MS", defaults.error_delay),
            request_timeout: millis("REQUEST_TIMEOUT_MS", defaults.request_timeout),
        }
    }
}

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
    fn defaults_match_scraper_contract() {
        let config = ScraperConfig::default();
        assert_eq!(config.post_limit, 30);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.backoff_base, Duration::from_secs(1));
        assert_eq!(config.error_delay, Duration::from_secs(2));
        assert_eq!(config.app_id, "936619743392459");
    }

    #[test]
    fn empty_lookup_yields_defaults() {
        assert_eq!(ScraperConfig::from_lookup(|_| None), ScraperConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = ScraperConfig::from_lookup(lookup_from(&[
            ("IG_API_BASE", "http://localhost:8787/api/v1/"),
            ("POST_LIMIT", "12"),
            ("MAX_RETRIES", "5"),
            ("BACKOFF_BASE_MS", "250"),
            ("REQUEST_TIMEOUT_MS", "3000"),
        ]));
        assert_eq!(config.api_base, "http://localhost:8787/api/v1");
        assert_eq!(config.post_limit, 12);
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.backoff_base, Duration::from_millis(250));
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.error_delay, Duration::from_secs(2));
    }

    #[test]
    fn unparsable_values_keep_defaults() {
        let config = ScraperConfig::from_lookup(lookup_from(&[
            ("POST_LIMIT", "thirty"),
            ("MAX_RETRIES", "0"),
            ("ERROR_DELAY_MS", "-5"),
            ("IG_APP_ID", "   "),
        ]));
        assert_eq!(config.post_limit, 30);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.error_delay, Duration::from_secs(2));
        assert_eq!(config.app_id, DEFAULT_APP_ID);
    }
}

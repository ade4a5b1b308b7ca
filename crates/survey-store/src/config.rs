use std::env;
use std::time::Duration;

use tracing::warn;

/// Store used when nothing else is configured.
pub const DEFAULT_STORE_URL: &str = "http://localhost:3000";

/// Environment variable holding the store base URL.
pub const STORE_URL_ENV: &str = "SURVEY_STORE_URL";

/// Environment variable naming the question answered as first + last name.
pub const NAME_QUESTION_ENV: &str = "SURVEY_NAME_QUESTION_ID";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the remote answer store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Re-tags this text question as the composite-name question.
    pub name_question_id: Option<i64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_URL)
    }
}

impl StoreConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            name_question_id: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_name_question_id(mut self, question_id: Option<i64>) -> Self {
        self.name_question_id = question_id;
        self
    }

    /// Resolves the configuration from an explicit URL, then the process
    /// environment, then the defaults.
    pub fn resolve(base_url: Option<String>) -> Self {
        Self::resolve_with(base_url, |key| env::var(key).ok())
    }

    pub fn resolve_with<F>(base_url: Option<String>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = base_url
            .filter(|value| !value.trim().is_empty())
            .or_else(|| lookup(STORE_URL_ENV).filter(|value| !value.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_STORE_URL.to_string());
        let name_question_id = lookup(NAME_QUESTION_ENV).and_then(|raw| {
            raw.trim()
                .parse::<i64>()
                .map_err(|_| warn!(value = %raw, "ignoring non-numeric {}", NAME_QUESTION_ENV))
                .ok()
        });
        Self::new(base_url).with_name_question_id(name_question_id)
    }

    /// Joins `path` onto the base URL without doubling slashes.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

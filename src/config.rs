use anyhow::Context;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Total join attempts, first try included
pub const DEFAULT_JOIN_ATTEMPTS: u32 = 3;

/// Pause after a 503 before the next join attempt
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub join_attempts: u32,
    pub retry_delay: Duration,
    /// `None` leaves the transport default in place
    pub request_timeout: Option<Duration>,
    /// How often the console polls for messages
    pub poll_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVER_URL.to_string(),
            join_attempts: DEFAULT_JOIN_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Values below 1 are clamped to 1.
    #[must_use]
    pub fn with_join_attempts(mut self, attempts: u32) -> Self {
        self.join_attempts = attempts.max(1);
        self
    }

    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Build a config from `SPACEWARS_*` environment variables, falling back
    /// to defaults for anything unset.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("SPACEWARS_SERVER_URL") {
            config.base_url = url;
        }
        if let Some(attempts) = parse_var::<u32, _>(&lookup, "SPACEWARS_JOIN_ATTEMPTS")? {
            config = config.with_join_attempts(attempts);
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, "SPACEWARS_RETRY_DELAY_MS")? {
            config.retry_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, "SPACEWARS_TIMEOUT_MS")? {
            // 0 disables the per-request timeout
            config.request_timeout = (ms > 0).then(|| Duration::from_millis(ms));
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, "SPACEWARS_POLL_MS")? {
            config.poll_interval = Duration::from_millis(ms);
        }

        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => {
            let value = raw
                .trim()
                .parse::<T>()
                .with_context(|| format!("Invalid value for {}: {:?}", key, raw))?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

use std::{fmt::Display, str::FromStr, time::Duration};

use shared::models::OptionLabels;
use tracing::{info, warn};

pub const DEFAULT_OPTION_A: &str = "Cats";
pub const DEFAULT_OPTION_B: &str = "Dogs";
pub const DEFAULT_REDIS_URL: &str = "redis://redis:6379/0";
pub const DEFAULT_QUEUE_KEY: &str = "votes";
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 2_000;

/// Everything the service reads from its environment, resolved once at
/// start-up and handed to each component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub option_a: String,
    pub option_b: String,
    pub redis_url: String,
    pub queue_key: String,
    pub store_timeout: Duration,
    pub probe_timeout: Duration,
    pub hostname: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            option_a: DEFAULT_OPTION_A.into(),
            option_b: DEFAULT_OPTION_B.into(),
            redis_url: DEFAULT_REDIS_URL.into(),
            queue_key: DEFAULT_QUEUE_KEY.into(),
            store_timeout: Duration::from_millis(DEFAULT_STORE_TIMEOUT_MS),
            probe_timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
            hostname: "unknown".into(),
        }
    }
}

impl AppConfig {
    /// Builds the config from any key lookup (secret store, environment, a
    /// test map). Missing or unparsable keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            option_a: try_load(&lookup, "OPTION_A", defaults.option_a),
            option_b: try_load(&lookup, "OPTION_B", defaults.option_b),
            redis_url: try_load(&lookup, "REDIS_URL", defaults.redis_url),
            queue_key: try_load(&lookup, "VOTE_QUEUE_KEY", defaults.queue_key),
            store_timeout: Duration::from_millis(try_load(
                &lookup,
                "STORE_TIMEOUT_MS",
                DEFAULT_STORE_TIMEOUT_MS,
            )),
            probe_timeout: Duration::from_millis(try_load(
                &lookup,
                "PROBE_TIMEOUT_MS",
                DEFAULT_PROBE_TIMEOUT_MS,
            )),
            hostname: try_load(&lookup, "HOSTNAME", defaults.hostname),
        }
    }

    pub fn option_labels(&self) -> OptionLabels {
        OptionLabels {
            a: self.option_a.clone(),
            b: self.option_b.clone(),
        }
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key).filter(|v| !v.trim().is_empty()) else {
        info!("{key} not set, using default: {default}");
        return default;
    };

    match raw.trim().parse() {
        Ok(value) => value,
        Err(e) => {
            warn!("Invalid {key} value: {e}, using default: {default}");
            default
        }
    }
}

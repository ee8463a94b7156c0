use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::{FetchError, LocationQuery, WeatherResult};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Connection settings for the weather provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Base URL without trailing slash, e.g. `https://api.openweathermap.org/data/2.5`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upper bound for the whole lookup (both requests), in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

pub fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

pub const fn default_timeout_secs() -> u64 {
    10
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetches current conditions and the daily forecast for `query`.
    ///
    /// `credential` is the provider API key; it is only read.
    async fn fetch_current_and_forecast(
        &self,
        query: &LocationQuery,
        credential: &str,
    ) -> Result<WeatherResult, FetchError>;
}

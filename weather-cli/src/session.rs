use thiserror::Error;
use weather_core::{FetchError, LocationQuery, WeatherProvider, WeatherResult};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Nothing to retry: no location has been looked up yet")]
    NothingToRetry,

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Remembers the last location so a failed lookup can be re-issued as-is.
#[derive(Debug)]
pub struct Session<'p> {
    provider: &'p dyn WeatherProvider,
    last_query: Option<LocationQuery>,
}

impl<'p> Session<'p> {
    pub fn new(provider: &'p dyn WeatherProvider) -> Self {
        Self {
            provider,
            last_query: None,
        }
    }

    pub async fn lookup(
        &mut self,
        query: LocationQuery,
        credential: &str,
    ) -> Result<WeatherResult, SessionError> {
        let query = self.last_query.insert(query);
        Ok(self.provider.fetch_current_and_forecast(query, credential).await?)
    }

    pub async fn retry_last(&self, credential: &str) -> Result<WeatherResult, SessionError> {
        let query = self.last_query.as_ref().ok_or(SessionError::NothingToRetry)?;
        tracing::debug!(query = %query, "retrying last lookup");
        Ok(self.provider.fetch_current_and_forecast(query, credential).await?)
    }
}

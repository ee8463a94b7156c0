use async_trait::async_trait;
use chrono::Local;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    error::{Endpoint, FetchError},
    model::{LocationQuery, WeatherResult},
    process::process_weather_data,
    schema::{OwCurrentResponse, OwForecastResponse},
};

use super::{ProviderSettings, WeatherProvider};

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    http: Client,
    settings: ProviderSettings,
}

impl OpenWeatherProvider {
    pub fn new(settings: ProviderSettings) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self { http, settings })
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), name)
    }

    fn query_params(query: &LocationQuery, credential: &str) -> Vec<(&'static str, String)> {
        let mut params = match query {
            LocationQuery::Place(name) => vec![("q", name.clone())],
            LocationQuery::Coordinates { lat, lon } => {
                vec![("lat", lat.to_string()), ("lon", lon.to_string())]
            }
        };
        params.push(("appid", credential.to_string()));
        params.push(("units", "metric".to_string()));
        params
    }

    /// Issues both requests concurrently and reads both bodies.
    async fn fetch_both(
        &self,
        params: &[(&'static str, String)],
    ) -> Result<((StatusCode, String), (StatusCode, String)), FetchError> {
        let current = self.http.get(self.endpoint("weather")).query(params).send();
        let forecast = self.http.get(self.endpoint("forecast")).query(params).send();

        let (current, forecast) = tokio::join!(current, forecast);
        let (current, forecast) = (current?, forecast?);

        debug!(
            current_status = %current.status(),
            forecast_status = %forecast.status(),
            "OpenWeather responses received"
        );

        let (current, forecast) = tokio::join!(read_body(current), read_body(forecast));
        Ok((current?, forecast?))
    }
}

async fn read_body(res: Response) -> Result<(StatusCode, String), FetchError> {
    let status = res.status();
    let body = res.text().await?;
    Ok((status, body))
}

/// Maps a non-success current-conditions status to an error.
fn classify_current(status: StatusCode, query: &LocationQuery) -> Option<FetchError> {
    if status.is_success() {
        return None;
    }

    Some(match status.as_u16() {
        401 => FetchError::InvalidCredential,
        404 if query.is_place() => FetchError::LocationNotFound,
        other => FetchError::Provider {
            endpoint: Endpoint::Current,
            status: other,
        },
    })
}

fn classify_forecast(status: StatusCode) -> Option<FetchError> {
    (!status.is_success()).then(|| FetchError::Provider {
        endpoint: Endpoint::Forecast,
        status: status.as_u16(),
    })
}

fn parse<T: DeserializeOwned>(body: &str, what: &str) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|e| {
        FetchError::MalformedResponse(format!(
            "{what}: {e} (body: {})",
            truncate_body(body)
        ))
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self, credential), fields(query = %query))]
    async fn fetch_current_and_forecast(
        &self,
        query: &LocationQuery,
        credential: &str,
    ) -> Result<WeatherResult, FetchError> {
        let params = Self::query_params(query, credential);
        let limit = Duration::from_secs(self.settings.timeout_secs);

        let ((current_status, current_body), (forecast_status, forecast_body)) =
            tokio::time::timeout(limit, self.fetch_both(&params))
                .await
                .map_err(|_| {
                    FetchError::Network(format!(
                        "request timed out after {}s",
                        self.settings.timeout_secs
                    ))
                })??;

        if let Some(err) = classify_current(current_status, query) {
            debug!(status = %current_status, error = %err, "current conditions rejected");
            return Err(err);
        }
        if let Some(err) = classify_forecast(forecast_status) {
            debug!(status = %forecast_status, "forecast rejected");
            return Err(err);
        }

        let current: OwCurrentResponse = parse(&current_body, "current conditions")?;
        let forecast: OwForecastResponse = parse(&forecast_body, "forecast")?;

        let result = process_weather_data(&current, &forecast, &Local::now())?;
        debug!(days = result.forecast.len(), "weather lookup complete");
        Ok(result)
    }
}

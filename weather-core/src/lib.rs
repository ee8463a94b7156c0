//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Location queries and the weather result model
//! - The OpenWeather fetcher (current conditions + forecast, fetched concurrently)
//! - Daily aggregation of the 3-hourly forecast
//! - API key configuration
//!
//! It performs no user-facing output; rendering belongs to the caller.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod model;
pub mod process;
pub mod provider;
pub mod schema;

pub use aggregate::{MAX_FORECAST_DAYS, aggregate_daily, round_temperature};
pub use config::Config;
pub use error::{Endpoint, FetchError, QueryError};
pub use model::{
    Condition, CurrentConditions, DailyForecast, LocationQuery, RawForecastEntry, WeatherResult,
};
pub use process::process_weather_data;
pub use provider::{OpenWeatherProvider, ProviderSettings, WeatherProvider};

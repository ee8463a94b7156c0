use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{Confirm, Password, PasswordDisplayMode};
use std::io::IsTerminal;
use weather_core::{
    Config, FetchError, LocationQuery, OpenWeatherProvider, ProviderSettings, QueryError,
    WeatherResult,
    config::API_KEY_ENV,
    provider::{default_base_url, default_timeout_secs},
};

use crate::{
    render,
    session::{Session, SessionError},
};

/// Place looked up when neither a city nor coordinates are given.
const DEFAULT_CITY: &str = "London";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather and 5-day forecast")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show current conditions and the daily forecast.
    Show {
        /// City name, e.g. "Paris" or "Paris,FR". Defaults to London.
        #[arg(conflicts_with = "lat")]
        city: Option<String>,

        /// Latitude in decimal degrees.
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude in decimal degrees.
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,

        /// Provider base URL.
        #[arg(long, default_value_t = default_base_url(), hide = true)]
        base_url: String,

        /// Timeout for the whole lookup, in seconds.
        #[arg(long, default_value_t = default_timeout_secs())]
        timeout: u64,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => {
                let mut config = Config::load()?;
                prompt_api_key(&mut config)?;
                println!(
                    "API key saved to {}",
                    Config::config_file_path()?.display()
                );
            }
            Command::Show {
                city,
                lat,
                lon,
                json,
                base_url,
                timeout,
            } => {
                let query = location_query(city.as_deref(), lat, lon)?;
                let settings = ProviderSettings {
                    base_url,
                    timeout_secs: timeout,
                };
                let result = show(query, settings).await?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                } else {
                    print!("{}", render::render(&result, &Local)?);
                }
            }
        }

        Ok(())
    }
}

fn location_query(
    city: Option<&str>,
    lat: Option<f64>,
    lon: Option<f64>,
) -> Result<LocationQuery, QueryError> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => LocationQuery::coordinates(lat, lon),
        _ => LocationQuery::place(city.unwrap_or(DEFAULT_CITY)),
    }
}

/// Looks up `query`, re-prompting for the key or offering a retry when that can help.
async fn show(query: LocationQuery, settings: ProviderSettings) -> anyhow::Result<WeatherResult> {
    let interactive = std::io::stdin().is_terminal();
    let mut config = Config::load()?;

    let env_key = std::env::var(API_KEY_ENV).ok();
    let mut credential = match config.resolve_api_key(env_key.as_deref()) {
        Some(key) => key.to_string(),
        None if interactive => prompt_api_key(&mut config)?,
        None => anyhow::bail!(
            "No API key configured.\n\
             Hint: run `weather configure` or set {API_KEY_ENV}."
        ),
    };

    let provider = OpenWeatherProvider::new(settings)?;
    let mut session = Session::new(&provider);
    let mut outcome = session.lookup(query, &credential).await;

    loop {
        match outcome {
            Ok(result) => return Ok(result),
            Err(SessionError::Fetch(FetchError::InvalidCredential)) if interactive => {
                eprintln!("{}", FetchError::InvalidCredential);
                credential = prompt_api_key(&mut config)?;
            }
            Err(SessionError::Fetch(ref err)) if interactive && err.is_retryable() => {
                eprintln!("{err}");
                let retry = Confirm::new("Retry?")
                    .with_default(true)
                    .prompt()
                    .context("Failed to read answer")?;
                if !retry {
                    return Err(err.clone().into());
                }
            }
            Err(err) => return Err(err.into()),
        }

        outcome = session.retry_last(&credential).await;
    }
}

/// Asks for an API key, stores it, and returns it.
fn prompt_api_key(config: &mut Config) -> anyhow::Result<String> {
    let key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Get a free key at https://openweathermap.org/api")
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(&key)?;
    config.save()?;

    Ok(config.api_key().unwrap_or_default().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_london() {
        let query = location_query(None, None, None).unwrap();
        assert_eq!(query, LocationQuery::Place("London".into()));
    }

    #[test]
    fn coordinates_take_precedence() {
        let query = location_query(None, Some(-33.87), Some(151.21)).unwrap();
        assert_eq!(query, LocationQuery::Coordinates { lat: -33.87, lon: 151.21 });
    }

    #[test]
    fn blank_city_is_rejected() {
        assert_eq!(location_query(Some("  "), None, None), Err(QueryError::EmptyPlace));
    }

    #[test]
    fn parses_negative_coordinates() {
        let cli = Cli::try_parse_from(["weather", "show", "--lat", "-33.87", "--lon", "151.21"])
            .unwrap();
        match cli.command {
            Command::Show { lat, lon, city, .. } => {
                assert_eq!(lat, Some(-33.87));
                assert_eq!(lon, Some(151.21));
                assert_eq!(city, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn lat_requires_lon() {
        assert!(Cli::try_parse_from(["weather", "show", "--lat", "10"]).is_err());
    }

    #[test]
    fn city_conflicts_with_coordinates() {
        let res = Cli::try_parse_from(["weather", "show", "Paris", "--lat", "1", "--lon", "2"]);
        assert!(res.is_err());
    }

    #[test]
    fn show_defaults() {
        let cli = Cli::try_parse_from(["weather", "show", "Paris"]).unwrap();
        match cli.command {
            Command::Show {
                city,
                json,
                base_url,
                timeout,
                ..
            } => {
                assert_eq!(city.as_deref(), Some("Paris"));
                assert!(!json);
                assert_eq!(base_url, default_base_url());
                assert_eq!(timeout, 10);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}

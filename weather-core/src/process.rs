//! Turns parsed provider payloads into a [`WeatherResult`]. No I/O happens here.

use chrono::{DateTime, TimeZone, Utc};

use crate::{
    aggregate::{aggregate_daily, round_temperature},
    error::FetchError,
    model::{Condition, CurrentConditions, RawForecastEntry, WeatherResult},
    schema::{OwCurrentResponse, OwForecastEntry, OwForecastResponse, OwWeather},
};

/// Builds the combined result; `now` decides which calendar day is "today".
pub fn process_weather_data<Tz: TimeZone>(
    current: &OwCurrentResponse,
    forecast: &OwForecastResponse,
    now: &DateTime<Tz>,
) -> Result<WeatherResult, FetchError> {
    let current = current_conditions(current)?;

    let entries = forecast
        .list
        .iter()
        .map(raw_entry)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(WeatherResult {
        current,
        forecast: aggregate_daily(&entries, now),
    })
}

fn current_conditions(parsed: &OwCurrentResponse) -> Result<CurrentConditions, FetchError> {
    Ok(CurrentConditions {
        location: location_label(&parsed.name, parsed.sys.country.as_deref()),
        temperature_c: round_temperature(parsed.main.temp),
        feels_like_c: round_temperature(parsed.main.feels_like),
        condition: first_condition(&parsed.weather, "current conditions")?,
        humidity_pct: parsed.main.humidity,
        pressure_hpa: parsed.main.pressure,
        wind_speed_mps: parsed.wind.speed,
        visibility_km: parsed.visibility.map(|m| (m / 1000.0).round() as i64),
        sunrise: unix_to_utc(parsed.sys.sunrise)?,
        sunset: unix_to_utc(parsed.sys.sunset)?,
    })
}

/// "{name}, {country}", or whichever part is present.
fn location_label(name: &str, country: Option<&str>) -> String {
    let parts: Vec<&str> = [Some(name), country]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        "Unknown location".to_string()
    } else {
        parts.join(", ")
    }
}

fn raw_entry(entry: &OwForecastEntry) -> Result<RawForecastEntry, FetchError> {
    Ok(RawForecastEntry {
        timestamp: unix_to_utc(entry.dt)?,
        temperature_c: entry.main.temp,
        condition: first_condition(&entry.weather, "forecast entry")?,
    })
}

fn first_condition(weather: &[OwWeather], what: &str) -> Result<Condition, FetchError> {
    let w = weather
        .first()
        .ok_or_else(|| FetchError::MalformedResponse(format!("{what} has no weather condition")))?;

    Ok(Condition {
        description: w.description.clone(),
        icon: w.icon.clone(),
    })
}

fn unix_to_utc(ts: i64) -> Result<DateTime<Utc>, FetchError> {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .ok_or_else(|| FetchError::MalformedResponse(format!("timestamp {ts} out of range")))
}

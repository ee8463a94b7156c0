use chrono::TimeZone;
use std::fmt::{self, Display, Write};
use weather_core::WeatherResult;

/// Emoji for an OpenWeather icon code such as "10d".
pub fn weather_icon(code: &str) -> &'static str {
    match code {
        "01d" => "☀️",
        "01n" => "🌙",
        "02d" => "⛅",
        "02n" | "03d" | "03n" | "04d" | "04n" => "☁️",
        "09d" | "09n" | "10n" => "🌧️",
        "10d" => "🌦️",
        "11d" | "11n" => "⛈️",
        "13d" | "13n" => "❄️",
        "50d" | "50n" => "🌫️",
        _ => "🌤️",
    }
}

/// Plain-text rendering; times and dates are shown in `tz`.
pub fn render<Tz>(result: &WeatherResult, tz: &Tz) -> Result<String, fmt::Error>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let current = &result.current;
    let mut out = String::new();

    let visibility = current
        .visibility_km
        .map(|km| format!("{km} km"))
        .unwrap_or_else(|| "n/a".to_string());

    writeln!(out, "Current Weather")?;
    writeln!(out, "{}", current.location)?;
    writeln!(
        out,
        "{} {}°C  {}",
        weather_icon(&current.condition.icon),
        current.temperature_c,
        current.condition.description
    )?;
    writeln!(out, "Feels like {}°C", current.feels_like_c)?;
    writeln!(out)?;
    writeln!(out, "  Humidity    {}%", current.humidity_pct)?;
    writeln!(out, "  Pressure    {} hPa", current.pressure_hpa)?;
    writeln!(out, "  Wind Speed  {} m/s", current.wind_speed_mps)?;
    writeln!(out, "  Visibility  {visibility}")?;
    writeln!(
        out,
        "  Sunrise     {}",
        current.sunrise.with_timezone(tz).format("%H:%M")
    )?;
    writeln!(
        out,
        "  Sunset      {}",
        current.sunset.with_timezone(tz).format("%H:%M")
    )?;

    writeln!(out)?;
    writeln!(out, "5-Day Forecast")?;
    if result.forecast.is_empty() {
        writeln!(out, "  No forecast available beyond today.")?;
    }
    for day in &result.forecast {
        writeln!(
            out,
            "  {:<12} {} {:>4}° {:>4}°  {}",
            day.date.format("%a, %b %-d").to_string(),
            weather_icon(&day.condition.icon),
            day.max_temp_c,
            day.min_temp_c,
            day.condition.description
        )?;
    }

    Ok(out)
}

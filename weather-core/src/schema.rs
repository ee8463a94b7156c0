//! Response shapes of the OpenWeather `/weather` and `/forecast` endpoints.
//!
//! Only the fields the lookup consumes are declared; serde ignores the rest.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OwMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: u32,
}

/// Forecast samples only contribute their temperature.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OwForecastMain {
    pub temp: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OwWeather {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OwWind {
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OwSys {
    /// Absent for points outside any country, e.g. at sea.
    #[serde(default)]
    pub country: Option<String>,
    pub sunrise: i64,
    pub sunset: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OwCurrentResponse {
    pub name: String,
    pub main: OwMain,
    pub weather: Vec<OwWeather>,
    pub wind: OwWind,
    /// Metres.
    pub visibility: Option<f64>,
    pub sys: OwSys,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OwForecastEntry {
    pub dt: i64,
    pub main: OwForecastMain,
    pub weather: Vec<OwWeather>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OwForecastResponse {
    pub list: Vec<OwForecastEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_payload_parses() {
        let body = r#"{
            "coord": {"lon": -0.13, "lat": 51.51},
            "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
            "main": {"temp": 11.62, "feels_like": 10.9, "pressure": 1012, "humidity": 81},
            "visibility": 10000,
            "wind": {"speed": 4.12, "deg": 250},
            "sys": {"country": "GB", "sunrise": 1760768400, "sunset": 1760806200},
            "name": "London",
            "cod": 200
        }"#;

        let parsed: OwCurrentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.name, "London");
        assert_eq!(parsed.sys.country.as_deref(), Some("GB"));
        assert_eq!(parsed.main.pressure, 1012);
        assert_eq!(parsed.visibility, Some(10000.0));
        assert_eq!(parsed.weather[0].icon, "10d");
    }

    #[test]
    fn missing_visibility_is_none() {
        let body = r#"{
            "weather": [{"description": "clear sky", "icon": "01n"}],
            "main": {"temp": 3.0, "feels_like": 1.0, "pressure": 1030, "humidity": 60},
            "wind": {"speed": 1.0},
            "sys": {"country": "NO", "sunrise": 0, "sunset": 0},
            "name": "Tromsø"
        }"#;

        let parsed: OwCurrentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.visibility, None);
    }

    #[test]
    fn current_without_humidity_is_rejected() {
        let body = r#"{
            "weather": [{"description": "clear sky", "icon": "01d"}],
            "main": {"temp": 11.5, "feels_like": 10.0, "pressure": 1012},
            "wind": {"speed": 1.0},
            "sys": {"country": "GB", "sunrise": 1, "sunset": 2},
            "name": "London"
        }"#;

        let err = serde_json::from_str::<OwCurrentResponse>(body).unwrap_err();
        assert!(err.to_string().contains("humidity"));
    }

    #[test]
    fn country_is_optional() {
        let body = r#"{
            "weather": [{"description": "overcast clouds", "icon": "04n"}],
            "main": {"temp": 18.0, "feels_like": 17.6, "pressure": 1015, "humidity": 77},
            "wind": {"speed": 7.2},
            "sys": {"sunrise": 1, "sunset": 2},
            "name": ""
        }"#;

        let parsed: OwCurrentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.sys.country, None);
        assert_eq!(parsed.name, "");
    }

    #[test]
    fn forecast_entry_needs_only_temperature() {
        let body = r#"{"list": [{"dt": 1710072000, "main": {"temp": 4.2},
            "weather": [{"description": "snow", "icon": "13d"}]}]}"#;

        let parsed: OwForecastResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.list[0].main.temp, 4.2);
    }

    #[test]
    fn forecast_without_list_is_rejected() {
        let res = serde_json::from_str::<OwForecastResponse>(r#"{"cod": "200", "cnt": 0}"#);
        assert!(res.is_err());
    }
}

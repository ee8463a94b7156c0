use std::fmt;
use thiserror::Error;

/// Which of the two provider requests an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Current,
    Forecast,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Current => f.write_str("weather"),
            Endpoint::Forecast => f.write_str("forecast"),
        }
    }
}

/// Failure of a single current-conditions + forecast lookup.
///
/// Every variant is terminal for that attempt; retrying is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The provider rejected the API key (HTTP 401 on current conditions).
    #[error("Invalid API key. Please check your API key.")]
    InvalidCredential,

    /// No match for a place-name query.
    #[error("City not found. Please check the city name.")]
    LocationNotFound,

    /// Any other non-success HTTP status from either endpoint.
    #[error("Failed to fetch {endpoint} data: {status}")]
    Provider { endpoint: Endpoint, status: u16 },

    /// The request never completed: connect failure, DNS, timeout, broken body.
    #[error("Network error: {0}")]
    Network(String),

    /// The provider answered 2xx but the payload did not match the expected shape.
    #[error("Malformed response from weather provider: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    /// Whether re-issuing the same query could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Network(_) | FetchError::Provider { .. })
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}

/// Rejected [`LocationQuery`](crate::LocationQuery) input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("Please enter a city name")]
    EmptyPlace,

    #[error(
        "Coordinates out of range ({lat}, {lon}): latitude must be -90..=90, longitude -180..=180"
    )]
    CoordinatesOutOfRange { lat: f64, lon: f64 },
}

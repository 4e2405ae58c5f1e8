use thiserror::Error;

/// Every way a client operation can fail.
///
/// Validation variants are produced before any request is sent.
/// `UnknownLocation`, `UpstreamError`, `MalformedResponse` and `Transport`
/// only surface from awaited network calls.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Invalid API key: the key must be a non-empty string")]
    InvalidKey,

    #[error("Unsupported language '{0}'")]
    UnsupportedLanguage(String),

    #[error("Unsupported units '{0}'. Supported units: standard, metric, imperial.")]
    UnsupportedUnits(String),

    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    #[error("Invalid location name: the name must be a non-empty string")]
    InvalidLocationName,

    #[error("Unknown parameter '{0}'")]
    UnknownParameter(String),

    #[error("Options must be an object, got {0}")]
    MalformedOptionsArgument(String),

    #[error("No location configured: set a location name or coordinates")]
    MissingLocation,

    #[error("Unknown location '{0}'")]
    UnknownLocation(String),

    #[error("OpenWeather API error: {0}")]
    UpstreamError(String),

    #[error("Malformed response from OpenWeather: {0}")]
    MalformedResponse(String),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;

use thiserror::Error;

/// Why a weather query failed. Never shown to the user; only logged.
#[derive(Debug, Error)]
pub enum QueryCause {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service answered {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("unexpected response shape: {0}")]
    Shape(String),
}

impl From<serde_json::Error> for QueryCause {
    fn from(err: serde_json::Error) -> Self {
        QueryCause::Shape(err.to_string())
    }
}

/// Any failure to obtain or parse the weather data for `city`.
///
/// Network errors, bad statuses and malformed payloads all collapse into
/// this one error; only `city` reaches the screen.
#[derive(Debug, Error)]
#[error("{city} not found")]
pub struct QueryFailure {
    pub city: String,
    #[source]
    pub cause: QueryCause,
}

impl QueryFailure {
    pub fn new(city: impl Into<String>, cause: impl Into<QueryCause>) -> Self {
        Self {
            city: city.into(),
            cause: cause.into(),
        }
    }
}

/// Failure to download or decode a weather icon. Non-fatal.
#[derive(Debug, Error)]
pub enum IconFailure {
    #[error("icon {icon} request failed: {source}")]
    Transport {
        icon: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("icon {icon} request answered {status}")]
    Status {
        icon: String,
        status: reqwest::StatusCode,
    },

    #[error("icon {icon} could not be decoded: {source}")]
    Decode {
        icon: String,
        #[source]
        source: image::ImageError,
    },
}

use thiserror::Error;

use crate::envelope::ApiError;
use crate::monitor::Monitor;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("unexpected response status {status}: {body:?}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("decoding error for {body:?}: {source}")]
    Decode {
        body: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("API error: {0}")]
    Api(ApiError),
    #[error("monitor {0} not found")]
    NotFound(i64),
    #[error("malformed field `{field}`: {value}")]
    MalformedField { field: &'static str, value: String },
    #[error("request cancelled")]
    Cancelled,
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for failures below the API layer: network errors, non-2xx
    /// statuses and bodies that are not a response envelope.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::HttpRequest(_) | Error::UnexpectedStatus { .. } | Error::Decode { .. }
        )
    }

    pub(crate) fn malformed(field: &'static str, value: impl ToString) -> Self {
        Error::MalformedField {
            field,
            value: value.to_string(),
        }
    }
}

/// A listing that stopped part-way. `monitors` holds every page received
/// before `source` occurred.
#[derive(Error, Debug)]
#[error("listing interrupted after {} monitors: {source}", .monitors.len())]
pub struct PartialListing {
    pub monitors: Vec<Monitor>,
    #[source]
    pub source: Error,
}

impl From<PartialListing> for Error {
    fn from(partial: PartialListing) -> Self {
        partial.source
    }
}

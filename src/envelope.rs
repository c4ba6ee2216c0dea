use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::account::Account;
use crate::alert_contact::AlertContact;
use crate::error::{Error, Result};

/// Status tag of a successful response.
pub const STAT_OK: &str = "ok";

/// Free-form error payload returned with a failed response. The service has
/// no fixed error schema, so the payload is kept as-is.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(transparent)]
pub struct ApiError(pub Map<String, Value>);

impl ApiError {
    /// The `message` entry, which most error payloads carry.
    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string_pretty(&self.0) {
            Ok(rendered) => f.write_str(&rendered),
            Err(_) => write!(f, "{:?}", self.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
    pub total: u64,
}

/// Body of every API response. Which entity field is populated depends on
/// the operation that was called. Monitors are left as raw JSON so that
/// [`crate::codec`] can normalise them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResponseEnvelope {
    pub stat: String,
    pub monitor: Option<Value>,
    pub monitors: Option<Vec<Value>>,
    pub account: Option<Account>,
    pub alert_contacts: Option<Vec<AlertContact>>,
    pub error: Option<ApiError>,
    pub pagination: Option<Pagination>,
}

impl ResponseEnvelope {
    /// Envelope returned for requests that were only previewed.
    pub(crate) fn dry_run() -> Self {
        ResponseEnvelope {
            stat: STAT_OK.to_string(),
            ..ResponseEnvelope::default()
        }
    }

    pub fn is_ok(&self) -> bool {
        self.stat == STAT_OK
    }
}

/// Classifies a raw HTTP exchange. Non-2xx statuses and bodies that are not
/// an envelope are transport failures; a well-formed envelope with a failure
/// tag is an API error.
pub fn classify(status: u16, body: &str) -> Result<ResponseEnvelope> {
    if !(200..300).contains(&status) {
        return Err(Error::UnexpectedStatus {
            status,
            body: body.to_string(),
        });
    }

    let envelope: ResponseEnvelope =
        serde_json::from_str(body).map_err(|source| Error::Decode {
            body: body.to_string(),
            source,
        })?;

    if envelope.is_ok() {
        Ok(envelope)
    } else {
        Err(Error::Api(envelope.error.unwrap_or_default()))
    }
}

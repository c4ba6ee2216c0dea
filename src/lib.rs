//! Client for the UptimeRobot v2 API.
//!
//! [`Client`] turns typed operations (create, look up, list, pause, resume,
//! delete, ensure) into API calls and decodes the responses, including the
//! service's habit of sending unset integers as empty strings.

pub mod account;
pub mod alert_contact;
pub mod client;
pub mod codec;
pub mod config;
mod ensure;
pub mod envelope;
pub mod error;
pub mod monitor;
mod monitors;
pub mod pagination;
pub mod trace;
pub mod transport;

pub use account::Account;
pub use alert_contact::{AlertContact, AlertContactType};
pub use client::{BodyFormat, Client, DEFAULT_URL};
pub use config::Config;
pub use envelope::{ApiError, Pagination, ResponseEnvelope};
pub use error::{Error, PartialListing, Result};
pub use monitor::{KeywordType, Monitor, MonitorStatus, MonitorType, SubType};
pub use trace::{DebugMode, Tracer};
pub use transport::{ApiRequest, HttpTransport, RawResponse, Transport};

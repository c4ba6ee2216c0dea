use log::{debug, warn};
use serde_json::Value;
use tokio::select;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::codec::Params;
use crate::config::Config;
use crate::envelope::{self, ResponseEnvelope};
use crate::error::{Error, Result};
use crate::trace::{DebugMode, Tracer};
use crate::transport::{ApiRequest, DEFAULT_TIMEOUT_SECS, HttpTransport, Transport};

pub const DEFAULT_URL: &str = "https://api.uptimerobot.com";

/// How request parameters are put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyFormat {
    #[default]
    Json,
    Form,
}

impl BodyFormat {
    fn content_type(self) -> &'static str {
        match self {
            BodyFormat::Json => "application/json",
            BodyFormat::Form => "application/x-www-form-urlencoded",
        }
    }

    fn encode(self, params: &Params) -> Vec<u8> {
        match self {
            BodyFormat::Json => Value::Object(params.clone()).to_string().into_bytes(),
            BodyFormat::Form => {
                let mut form = url::form_urlencoded::Serializer::new(String::new());
                for (key, value) in params {
                    match value {
                        Value::String(s) => form.append_pair(key, s),
                        other => form.append_pair(key, &other.to_string()),
                    };
                }
                form.finish().into_bytes()
            }
        }
    }
}

/// Client for the v2 API.
///
/// Configuration is fixed once built; a client can be shared between tasks
/// by reference. Every operation performs its requests sequentially and
/// never retries.
#[derive(Debug)]
pub struct Client<T = HttpTransport> {
    api_key: String,
    base_url: Url,
    transport: T,
    format: BodyFormat,
    tracer: Option<Tracer>,
    cancel: CancellationToken,
}

impl Client<HttpTransport> {
    /// Client against the public endpoint with the default timeout.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Client::with_transport(
            api_key,
            DEFAULT_URL,
            HttpTransport::new(DEFAULT_TIMEOUT_SECS)?,
        )
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::with_transport(
            config.api_key.clone(),
            &config.url,
            HttpTransport::new(config.timeout_secs)?,
        )?;
        Ok(if config.debug {
            client.with_tracer(Tracer::stdout(DebugMode::Trace))
        } else {
            client
        })
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(api_key: impl Into<String>, base_url: &str, transport: T) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Error::Config("API key is empty".to_string()));
        }
        Ok(Client {
            api_key,
            base_url: Url::parse(base_url)?,
            transport,
            format: BodyFormat::default(),
            tracer: None,
            cancel: CancellationToken::new(),
        })
    }

    #[must_use]
    pub fn with_tracer(mut self, tracer: Tracer) -> Self {
        self.tracer = Some(tracer);
        self
    }

    #[must_use]
    pub fn with_body_format(mut self, format: BodyFormat) -> Self {
        self.format = format;
        self
    }

    /// Aborts in-flight and future requests once `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, operation: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/v2/{operation}"))?)
    }

    /// Performs one named API operation and classifies the outcome.
    ///
    /// The API key and `format=json` are added to a copy of `params`. Only a
    /// well-formed, `ok`-tagged envelope is returned.
    pub async fn call(&self, operation: &str, params: &Params) -> Result<ResponseEnvelope> {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let mut params = params.clone();
        params.insert("api_key".into(), self.api_key.clone().into());
        params.insert("format".into(), "json".into());

        let request = ApiRequest::new(
            self.endpoint(operation)?,
            self.format.content_type(),
            self.format.encode(&params),
        );

        if let Some(tracer) = &self.tracer {
            tracer.request(&request)?;
            if tracer.mode() == DebugMode::DryRun {
                debug!("{operation}: dry run, request not sent");
                return Ok(ResponseEnvelope::dry_run());
            }
        }

        debug!("{operation}: sending request");
        let response = select! {
            response = self.transport.send(request) => response?,
            () = self.cancel.cancelled() => {
                debug!("{operation}: cancelled while in flight");
                return Err(Error::Cancelled);
            }
        };

        if let Some(tracer) = &self.tracer {
            tracer.response(&response)?;
        }

        envelope::classify(response.status, &response.body).inspect_err(|e| {
            warn!("{operation} failed: {e}");
        })
    }
}

//! Request/response dumps for the debug sink.

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use std::fmt::Write as _;
use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::transport::{ApiRequest, RawResponse};

/// What the client does when a debug sink is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebugMode {
    /// Dump the request and the response; the request is still sent.
    #[default]
    Trace,
    /// Dump the request and return an empty successful envelope without
    /// sending anything.
    DryRun,
}

/// Shared, writable debug sink.
#[derive(Clone)]
pub struct Tracer {
    sink: Arc<Mutex<Box<dyn Write + Send>>>,
    mode: DebugMode,
}

impl std::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracer").field("mode", &self.mode).finish()
    }
}

impl Tracer {
    pub fn new(sink: impl Write + Send + 'static, mode: DebugMode) -> Self {
        Tracer {
            sink: Arc::new(Mutex::new(Box::new(sink))),
            mode,
        }
    }

    pub fn stdout(mode: DebugMode) -> Self {
        Tracer::new(std::io::stdout(), mode)
    }

    pub fn mode(&self) -> DebugMode {
        self.mode
    }

    pub fn request(&self, request: &ApiRequest) -> Result<()> {
        self.emit(&render_request(request))
    }

    pub fn response(&self, response: &RawResponse) -> Result<()> {
        self.emit(&render_response(response))
    }

    fn emit(&self, dump: &str) -> Result<()> {
        // A poisoned sink only means another dump panicked mid-write.
        let mut sink = self
            .sink
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        writeln!(sink, "{dump}")?;
        writeln!(sink)?;
        sink.flush()?;
        Ok(())
    }
}

fn render_headers(out: &mut String, headers: &HeaderMap) {
    for (name, value) in headers {
        let _ = writeln!(out, "{name}: {}", value.to_str().unwrap_or("<binary>"));
    }
}

pub fn render_request(request: &ApiRequest) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "POST {} HTTP/1.1", request.url.path());
    if let Some(host) = request.url.host_str() {
        match request.url.port() {
            Some(port) => {
                let _ = writeln!(out, "Host: {host}:{port}");
            }
            None => {
                let _ = writeln!(out, "Host: {host}");
            }
        }
    }
    render_headers(&mut out, &request.headers);
    let _ = writeln!(out, "Content-Length: {}", request.body.len());
    out.push('\n');
    out.push_str(&request.body_text());
    out
}

pub fn render_response(response: &RawResponse) -> String {
    let mut out = String::new();
    let reason = StatusCode::from_u16(response.status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("");
    let _ = writeln!(out, "HTTP/1.1 {} {reason}", response.status);
    render_headers(&mut out, &response.headers);
    out.push('\n');
    out.push_str(&response.body);
    out
}

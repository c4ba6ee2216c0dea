use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Kind of check the service runs against a monitor's target.
///
/// Kinds this client has no name for (heartbeat, for one) are kept as
/// `Other` with their wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MonitorType {
    #[default]
    Http,
    Keyword,
    Ping,
    Port,
    Other(i64),
}

impl MonitorType {
    pub fn code(self) -> i64 {
        match self {
            MonitorType::Http => 1,
            MonitorType::Keyword => 2,
            MonitorType::Ping => 3,
            MonitorType::Port => 4,
            MonitorType::Other(code) => code,
        }
    }

    pub fn from_code(code: i64) -> Self {
        match code {
            1 => MonitorType::Http,
            2 => MonitorType::Keyword,
            3 => MonitorType::Ping,
            4 => MonitorType::Port,
            other => MonitorType::Other(other),
        }
    }
}

impl fmt::Display for MonitorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MonitorType::Http => "HTTP",
            MonitorType::Keyword => "Keyword",
            MonitorType::Ping => "Ping",
            MonitorType::Port => "Port",
            MonitorType::Other(code) => return write!(f, "{code}"),
        };
        f.write_str(name)
    }
}

impl FromStr for MonitorType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(MonitorType::Http),
            "keyword" => Ok(MonitorType::Keyword),
            "ping" => Ok(MonitorType::Ping),
            "port" => Ok(MonitorType::Port),
            _ => Err(Error::Config(format!("unknown monitor type {s:?}"))),
        }
    }
}

/// Protocol checked by Port monitors (and reused by some Keyword monitors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubType {
    Http,
    Https,
    Ftp,
    Smtp,
    Pop3,
    Imap,
    CustomPort,
}

impl SubType {
    pub fn code(self) -> i64 {
        match self {
            SubType::Http => 1,
            SubType::Https => 2,
            SubType::Ftp => 3,
            SubType::Smtp => 4,
            SubType::Pop3 => 5,
            SubType::Imap => 6,
            SubType::CustomPort => 99,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(SubType::Http),
            2 => Some(SubType::Https),
            3 => Some(SubType::Ftp),
            4 => Some(SubType::Smtp),
            5 => Some(SubType::Pop3),
            6 => Some(SubType::Imap),
            99 => Some(SubType::CustomPort),
            _ => None,
        }
    }

    /// Well-known port for the protocol. `CustomPort` has none; its port
    /// must be set on the monitor.
    pub fn default_port(self) -> Option<u16> {
        match self {
            SubType::Http => Some(80),
            SubType::Https => Some(443),
            SubType::Ftp => Some(21),
            SubType::Smtp => Some(25),
            SubType::Pop3 => Some(110),
            SubType::Imap => Some(143),
            SubType::CustomPort => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SubType::Http => "HTTP",
            SubType::Https => "HTTPS",
            SubType::Ftp => "FTP",
            SubType::Smtp => "SMTP",
            SubType::Pop3 => "POP3",
            SubType::Imap => "IMAP",
            SubType::CustomPort => "Custom port",
        }
    }
}

impl fmt::Display for SubType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(SubType::Http),
            "https" => Ok(SubType::Https),
            "ftp" => Ok(SubType::Ftp),
            "smtp" => Ok(SubType::Smtp),
            "pop3" => Ok(SubType::Pop3),
            "imap" => Ok(SubType::Imap),
            "custom" | "custom port" | "customport" => Ok(SubType::CustomPort),
            _ => Err(Error::Config(format!("unknown monitor subtype {s:?}"))),
        }
    }
}

/// Whether a Keyword monitor alerts when the keyword is present or absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordType {
    Exists,
    NotExists,
}

impl KeywordType {
    pub fn code(self) -> i64 {
        match self {
            KeywordType::Exists => 1,
            KeywordType::NotExists => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(KeywordType::Exists),
            2 => Some(KeywordType::NotExists),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            KeywordType::Exists => "Exists",
            KeywordType::NotExists => "NotExists",
        }
    }
}

impl fmt::Display for KeywordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeywordType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exists" => Ok(KeywordType::Exists),
            "notexists" | "not-exists" => Ok(KeywordType::NotExists),
            _ => Err(Error::Config(format!("unknown keyword type {s:?}"))),
        }
    }
}

/// Check state reported by the service. Read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonitorStatus {
    Paused,
    NotChecked,
    Up,
    SeemsDown,
    Down,
    Other(i64),
}

impl MonitorStatus {
    pub fn code(self) -> i64 {
        match self {
            MonitorStatus::Paused => 0,
            MonitorStatus::NotChecked => 1,
            MonitorStatus::Up => 2,
            MonitorStatus::SeemsDown => 8,
            MonitorStatus::Down => 9,
            MonitorStatus::Other(code) => code,
        }
    }

    pub fn from_code(code: i64) -> Self {
        match code {
            0 => MonitorStatus::Paused,
            1 => MonitorStatus::NotChecked,
            2 => MonitorStatus::Up,
            8 => MonitorStatus::SeemsDown,
            9 => MonitorStatus::Down,
            other => MonitorStatus::Other(other),
        }
    }
}

impl fmt::Display for MonitorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MonitorStatus::Paused => "Paused",
            MonitorStatus::NotChecked => "Not checked yet",
            MonitorStatus::Up => "Up",
            MonitorStatus::SeemsDown => "Seems down",
            MonitorStatus::Down => "Down",
            MonitorStatus::Other(code) => return write!(f, "{code}"),
        };
        f.write_str(name)
    }
}

/// Status values accepted by `editMonitor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusChange {
    Pause,
    Resume,
}

impl StatusChange {
    pub(crate) fn code(self) -> i64 {
        match self {
            StatusChange::Pause => 0,
            StatusChange::Resume => 1,
        }
    }
}

/// A single check configured on the service.
///
/// `id` is zero until the service assigns one. `sub_type`, `keyword_type`
/// and a zero `port` mean "unset"; see [`crate::codec`] for how those map
/// onto the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Monitor {
    pub id: i64,
    pub friendly_name: String,
    pub url: String,
    pub monitor_type: MonitorType,
    pub sub_type: Option<SubType>,
    pub keyword_type: Option<KeywordType>,
    pub keyword_value: String,
    pub port: u16,
    pub alert_contacts: Vec<String>,
    pub status: Option<MonitorStatus>,
}

impl Monitor {
    /// An HTTP monitor for `url`, with the port taken from its scheme.
    pub fn http(url: impl Into<String>, friendly_name: impl Into<String>) -> Self {
        let url = url.into();
        let port = if url.starts_with("https") { 443 } else { 80 };
        Monitor {
            friendly_name: friendly_name.into(),
            url,
            port,
            ..Monitor::default()
        }
    }

    /// The port the check actually targets: the explicit port if set,
    /// otherwise the subtype's well-known port.
    pub fn effective_port(&self) -> Option<u16> {
        if self.port != 0 {
            return Some(self.port);
        }
        self.sub_type.and_then(SubType::default_port)
    }

    /// Subtype name with its port, e.g. `HTTPS (443)` or `Custom port (8080)`.
    pub fn friendly_sub_type(&self) -> Option<String> {
        self.sub_type.map(|sub_type| match sub_type.default_port() {
            Some(port) => format!("{sub_type} ({port})"),
            None => format!("{sub_type} ({})", self.port),
        })
    }
}

impl fmt::Display for Monitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Name: {}", self.friendly_name)?;
        write!(f, "URL: {}", self.url)?;
        if self.port != 0 {
            write!(f, "\nPort: {}", self.port)?;
        }
        write!(f, "\nType: {}", self.monitor_type)?;
        if let Some(status) = self.status {
            write!(f, "\nStatus: {status}")?;
        }
        if let Some(sub_type) = self.friendly_sub_type() {
            write!(f, "\nSubtype: {sub_type}")?;
        }
        if let Some(keyword_type) = self.keyword_type {
            write!(f, "\nKeywordType: {keyword_type}")?;
        }
        if !self.keyword_value.is_empty() {
            write!(f, "\nKeyword: {}", self.keyword_value)?;
        }
        Ok(())
    }
}

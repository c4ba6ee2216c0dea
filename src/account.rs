use serde::Deserialize;
use std::fmt;

/// Snapshot of the account that owns the API key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Account {
    pub email: String,
    pub monitor_limit: i64,
    pub monitor_interval: i64,
    pub up_monitors: i64,
    pub down_monitors: i64,
    pub paused_monitors: i64,
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Email: {}", self.email)?;
        writeln!(f, "Monitor limit: {}", self.monitor_limit)?;
        writeln!(f, "Monitor interval: {}", self.monitor_interval)?;
        writeln!(f, "Up monitors: {}", self.up_monitors)?;
        writeln!(f, "Down monitors: {}", self.down_monitors)?;
        write!(f, "Paused monitors: {}", self.paused_monitors)
    }
}

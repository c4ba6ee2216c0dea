use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// Notification channel of an alert contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertContactType {
    Sms,
    Email,
    Twitter,
    Boxcar,
    Webhook,
    Pushbullet,
    Zapier,
    Pushover,
    HipChat,
    Slack,
    Voice,
    Splunk,
    PagerDuty,
    OpsGenie,
    Telegram,
    Teams,
    GoogleChat,
    Discord,
    Other(i64),
}

impl AlertContactType {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => AlertContactType::Sms,
            2 => AlertContactType::Email,
            3 => AlertContactType::Twitter,
            4 => AlertContactType::Boxcar,
            5 => AlertContactType::Webhook,
            6 => AlertContactType::Pushbullet,
            7 => AlertContactType::Zapier,
            9 => AlertContactType::Pushover,
            10 => AlertContactType::HipChat,
            11 => AlertContactType::Slack,
            14 => AlertContactType::Voice,
            15 => AlertContactType::Splunk,
            16 => AlertContactType::PagerDuty,
            17 => AlertContactType::OpsGenie,
            18 => AlertContactType::Telegram,
            20 => AlertContactType::Teams,
            21 => AlertContactType::GoogleChat,
            23 => AlertContactType::Discord,
            other => AlertContactType::Other(other),
        }
    }

    pub fn code(self) -> i64 {
        match self {
            AlertContactType::Sms => 1,
            AlertContactType::Email => 2,
            AlertContactType::Twitter => 3,
            AlertContactType::Boxcar => 4,
            AlertContactType::Webhook => 5,
            AlertContactType::Pushbullet => 6,
            AlertContactType::Zapier => 7,
            AlertContactType::Pushover => 9,
            AlertContactType::HipChat => 10,
            AlertContactType::Slack => 11,
            AlertContactType::Voice => 14,
            AlertContactType::Splunk => 15,
            AlertContactType::PagerDuty => 16,
            AlertContactType::OpsGenie => 17,
            AlertContactType::Telegram => 18,
            AlertContactType::Teams => 20,
            AlertContactType::GoogleChat => 21,
            AlertContactType::Discord => 23,
            AlertContactType::Other(code) => code,
        }
    }
}

impl fmt::Display for AlertContactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlertContactType::Sms => "SMS",
            AlertContactType::Email => "Email",
            AlertContactType::Twitter => "Twitter",
            AlertContactType::Boxcar => "Boxcar",
            AlertContactType::Webhook => "Webhook",
            AlertContactType::Pushbullet => "Pushbullet",
            AlertContactType::Zapier => "Zapier",
            AlertContactType::Pushover => "Pushover",
            AlertContactType::HipChat => "HipChat",
            AlertContactType::Slack => "Slack",
            AlertContactType::Voice => "Voice",
            AlertContactType::Splunk => "Splunk",
            AlertContactType::PagerDuty => "PagerDuty",
            AlertContactType::OpsGenie => "OpsGenie",
            AlertContactType::Telegram => "Telegram",
            AlertContactType::Teams => "Teams",
            AlertContactType::GoogleChat => "GoogleChat",
            AlertContactType::Discord => "Discord",
            AlertContactType::Other(code) => return write!(f, "{code}"),
        };
        f.write_str(name)
    }
}

/// A notification target configured on the account.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct AlertContact {
    /// Opaque identifier. The service sends it as a string or a number.
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    pub friendly_name: String,
    #[serde(rename = "type")]
    pub contact_type: i64,
    pub status: i64,
    pub value: String,
}

impl AlertContact {
    pub fn kind(&self) -> AlertContactType {
        AlertContactType::from_code(self.contact_type)
    }
}

impl fmt::Display for AlertContact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Name: {}", self.friendly_name)?;
        writeln!(f, "Type: {}", self.kind())?;
        writeln!(f, "Status: {}", self.status)?;
        write!(f, "Value: {}", self.value)
    }
}

fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "unexpected alert contact id {other}"
        ))),
    }
}

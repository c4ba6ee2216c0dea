//! Mapping between [`Monitor`] and the service's wire representation.
//!
//! The service sends `sub_type`, `keyword_type` and `port` as an empty
//! string when unset and as a number (often a quoted one) when set. Monitors
//! are therefore decoded through a `serde_json` map, normalised field by
//! field, and only then projected onto the strict wire struct.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::monitor::{KeywordType, Monitor, MonitorStatus, MonitorType, SubType};

/// Request parameters for a single API operation.
pub type Params = Map<String, Value>;

/// Integer fields the service may send as an empty or quoted string.
const LOOSE_INT_FIELDS: [&str; 5] = ["id", "type", "sub_type", "keyword_type", "port"];

/// Marker the service expects after each contact ID: `<threshold>_<recurrence>`.
const ALERT_CONTACT_SUFFIX: &str = "_0_0";
const ALERT_CONTACT_SEPARATOR: &str = "-";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireMonitor {
    id: i64,
    friendly_name: String,
    url: String,
    #[serde(rename = "type")]
    monitor_type: i64,
    sub_type: i64,
    keyword_type: i64,
    keyword_value: String,
    port: i64,
    alert_contacts: Option<Value>,
    status: Option<i64>,
}

/// Encodes a monitor as request parameters. Unset optional fields are left
/// out; set ones are always plain integers.
pub fn encode(monitor: &Monitor) -> Params {
    let mut params = Params::new();
    if monitor.id != 0 {
        params.insert("id".into(), monitor.id.into());
    }
    params.insert("friendly_name".into(), monitor.friendly_name.clone().into());
    params.insert("url".into(), monitor.url.clone().into());
    params.insert("type".into(), monitor.monitor_type.code().into());
    if let Some(sub_type) = monitor.sub_type {
        params.insert("sub_type".into(), sub_type.code().into());
    }
    if let Some(keyword_type) = monitor.keyword_type {
        params.insert("keyword_type".into(), keyword_type.code().into());
    }
    if !monitor.keyword_value.is_empty() {
        params.insert("keyword_value".into(), monitor.keyword_value.clone().into());
    }
    if monitor.port != 0 {
        params.insert("port".into(), monitor.port.into());
    }
    if !monitor.alert_contacts.is_empty() {
        params.insert(
            "alert_contacts".into(),
            encode_alert_contacts(&monitor.alert_contacts).into(),
        );
    }
    params
}

/// Encodes a monitor as a JSON document.
pub fn encode_bytes(monitor: &Monitor) -> Vec<u8> {
    Value::Object(encode(monitor)).to_string().into_bytes()
}

/// `["3", "5"]` becomes `"3_0_0-5_0_0"`.
pub fn encode_alert_contacts(contacts: &[String]) -> String {
    contacts
        .iter()
        .map(|id| format!("{id}{ALERT_CONTACT_SUFFIX}"))
        .collect::<Vec<_>>()
        .join(ALERT_CONTACT_SEPARATOR)
}

/// Decodes a single monitor from a JSON document.
pub fn decode(bytes: &[u8]) -> Result<Monitor> {
    let value: Value = serde_json::from_slice(bytes)?;
    decode_value(value)
}

/// Decodes a single monitor from an already-parsed JSON value.
pub fn decode_value(value: Value) -> Result<Monitor> {
    let mut raw = match value {
        Value::Object(raw) => raw,
        other => return Err(Error::malformed("monitor", other)),
    };

    // Null reads as unset, the same as an absent field.
    raw.retain(|_, v| !v.is_null());
    if raw.get("status").and_then(Value::as_str).is_some_and(|s| s.trim().is_empty()) {
        raw.remove("status");
    }

    for field in LOOSE_INT_FIELDS.into_iter().chain(["status"]) {
        if let Some(v) = raw.get_mut(field) {
            *v = Value::from(loose_int(field, v)?);
        }
    }

    let wire: WireMonitor =
        serde_json::from_value(Value::Object(raw)).map_err(|e| Error::malformed("monitor", e))?;
    project(wire)
}

pub fn decode_all(values: Vec<Value>) -> Result<Vec<Monitor>> {
    values.into_iter().map(decode_value).collect()
}

fn project(wire: WireMonitor) -> Result<Monitor> {
    // Minimal echoes (editMonitor, newMonitor) carry no type.
    let monitor_type = match wire.monitor_type {
        0 => MonitorType::default(),
        code => MonitorType::from_code(code),
    };
    let sub_type = match wire.sub_type {
        0 => None,
        code => Some(SubType::from_code(code).ok_or_else(|| Error::malformed("sub_type", code))?),
    };
    let keyword_type = match wire.keyword_type {
        0 => None,
        code => Some(
            KeywordType::from_code(code).ok_or_else(|| Error::malformed("keyword_type", code))?,
        ),
    };
    let port = u16::try_from(wire.port).map_err(|_| Error::malformed("port", wire.port))?;
    let status = wire.status.map(MonitorStatus::from_code);
    let alert_contacts = match wire.alert_contacts {
        Some(contacts) => decode_alert_contacts(&contacts)?,
        None => Vec::new(),
    };

    Ok(Monitor {
        id: wire.id,
        friendly_name: wire.friendly_name,
        url: wire.url,
        monitor_type,
        sub_type,
        keyword_type,
        keyword_value: wire.keyword_value,
        port,
        alert_contacts,
        status,
    })
}

/// Empty string and null mean zero; numbers and numeric strings are taken
/// as integers. Anything else is malformed.
fn loose_int(field: &'static str, value: &Value) -> Result<i64> {
    match value {
        Value::Null => Ok(0),
        Value::Number(n) => n.as_i64().ok_or_else(|| Error::malformed(field, n)),
        Value::String(s) if s.trim().is_empty() => Ok(0),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| Error::malformed(field, format!("{s:?}"))),
        other => Err(Error::malformed(field, other)),
    }
}

/// Accepts the encoded `"id_0_0-id_0_0"` form, a list of IDs, or a list of
/// contact objects carrying an `id`.
fn decode_alert_contacts(value: &Value) -> Result<Vec<String>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(s) => Ok(s
            .split(ALERT_CONTACT_SEPARATOR)
            .filter(|part| !part.is_empty())
            .map(|part| part.split('_').next().unwrap_or(part).to_string())
            .collect()),
        Value::Array(items) => items.iter().map(alert_contact_id).collect(),
        other => Err(Error::malformed("alert_contacts", other)),
    }
}

fn alert_contact_id(item: &Value) -> Result<String> {
    match item {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Object(contact) => match contact.get("id") {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            _ => Err(Error::malformed("alert_contacts", item)),
        },
        other => Err(Error::malformed("alert_contacts", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn port_monitor() -> Monitor {
        Monitor {
            id: 777_712_827,
            friendly_name: "PortTest".to_string(),
            url: "mail.example.com".to_string(),
            monitor_type: MonitorType::Port,
            sub_type: Some(SubType::CustomPort),
            keyword_type: None,
            keyword_value: String::new(),
            port: 2525,
            alert_contacts: vec!["3".to_string(), "5".to_string(), "7".to_string()],
            status: None,
        }
    }

    #[test]
    fn test_alert_contact_encoding() {
        let contacts = vec!["2353888".to_string(), "0132759".to_string()];
        assert_eq!(encode_alert_contacts(&contacts), "2353888_0_0-0132759_0_0");
    }

    #[test]
    fn test_encode_uses_plain_integers() {
        let params = encode(&port_monitor());
        assert_eq!(params["type"], json!(4));
        assert_eq!(params["sub_type"], json!(99));
        assert_eq!(params["port"], json!(2525));
        assert_eq!(params["alert_contacts"], json!("3_0_0-5_0_0-7_0_0"));
        assert!(!params.contains_key("keyword_type"));
        assert!(!params.contains_key("status"));
    }

    #[test]
    fn test_round_trip() {
        let keyword = Monitor {
            id: 0,
            friendly_name: "Keyword check".to_string(),
            url: "https://example.com".to_string(),
            monitor_type: MonitorType::Keyword,
            sub_type: Some(SubType::Https),
            keyword_type: Some(KeywordType::NotExists),
            keyword_value: "error".to_string(),
            port: 443,
            alert_contacts: vec!["0132759".to_string()],
            status: None,
        };
        let heartbeat = Monitor {
            friendly_name: "Nightly backup".to_string(),
            monitor_type: MonitorType::Other(5),
            ..Monitor::default()
        };
        for m in [port_monitor(), keyword, heartbeat] {
            let decoded = decode(&encode_bytes(&m)).unwrap();
            assert_eq!(decoded, m);
        }
    }

    #[test]
    fn test_empty_strings_decode_to_zero() {
        let raw = json!({
            "id": 777_749_809,
            "friendly_name": "Google",
            "url": "http://www.google.com",
            "type": 1,
            "sub_type": "",
            "keyword_type": "",
            "keyword_value": "",
            "port": "",
            "status": 2
        });
        let m = decode_value(raw).unwrap();
        assert_eq!(m.sub_type, None);
        assert_eq!(m.keyword_type, None);
        assert_eq!(m.port, 0);
        assert_eq!(m.status, Some(MonitorStatus::Up));
    }

    #[test]
    fn test_quoted_numbers_are_parsed() {
        let raw = json!({"id": 1, "type": 4, "sub_type": "99", "port": "8080", "keyword_type": 0});
        let m = decode_value(raw).unwrap();
        assert_eq!(m.sub_type, Some(SubType::CustomPort));
        assert_eq!(m.port, 8080);
        assert_eq!(m.keyword_type, None);
    }

    #[test]
    fn test_non_numeric_string_is_malformed() {
        let err = decode_value(json!({"port": "eighty"})).unwrap_err();
        assert!(matches!(err, Error::MalformedField { field: "port", .. }));

        let err = decode_value(json!({"sub_type": true})).unwrap_err();
        assert!(matches!(err, Error::MalformedField { field: "sub_type", .. }));
    }

    #[test]
    fn test_out_of_range_values_are_malformed() {
        let err = decode_value(json!({"port": 70000})).unwrap_err();
        assert!(matches!(err, Error::MalformedField { field: "port", .. }));

        let err = decode_value(json!({"sub_type": 42})).unwrap_err();
        assert!(matches!(err, Error::MalformedField { field: "sub_type", .. }));
    }

    #[test]
    fn test_unknown_type_and_status_are_kept() {
        let m = decode_value(json!({"id": 9, "type": 5, "status": 3})).unwrap();
        assert_eq!(m.monitor_type, MonitorType::Other(5));
        assert_eq!(m.status, Some(MonitorStatus::Other(3)));
        assert_eq!(encode(&m)["type"], json!(5));
    }

    #[test]
    fn test_null_fields_decode_to_defaults() {
        let raw = json!({
            "id": 1,
            "friendly_name": null,
            "url": "http://a",
            "type": null,
            "keyword_value": null,
            "port": null,
            "alert_contacts": null,
            "status": null
        });
        let m = decode_value(raw).unwrap();
        assert_eq!(m.friendly_name, "");
        assert_eq!(m.url, "http://a");
        assert_eq!(m.monitor_type, MonitorType::Http);
        assert_eq!(m.keyword_value, "");
        assert_eq!(m.port, 0);
        assert_eq!(m.status, None);
    }

    #[test]
    fn test_quoted_id_type_and_status() {
        let m = decode_value(json!({"id": "777", "type": "2", "status": "9"})).unwrap();
        assert_eq!(m.id, 777);
        assert_eq!(m.monitor_type, MonitorType::Keyword);
        assert_eq!(m.status, Some(MonitorStatus::Down));

        let m = decode_value(json!({"id": 1, "status": ""})).unwrap();
        assert_eq!(m.status, None);
    }

    #[test]
    fn test_wrongly_typed_field_is_malformed() {
        let err = decode_value(json!({"id": 1, "friendly_name": ["not", "a", "name"]})).unwrap_err();
        assert!(matches!(err, Error::MalformedField { field: "monitor", .. }));

        let err = decode_value(json!({"status": "up"})).unwrap_err();
        assert!(matches!(err, Error::MalformedField { field: "status", .. }));
    }

    #[test]
    fn test_absent_fields_default() {
        let m = decode_value(json!({"id": 777_810_874, "status": 1})).unwrap();
        assert_eq!(m.id, 777_810_874);
        assert_eq!(m.monitor_type, MonitorType::Http);
        assert_eq!(m.status, Some(MonitorStatus::NotChecked));
        assert!(m.alert_contacts.is_empty());
    }

    #[test]
    fn test_alert_contacts_as_objects() {
        let raw = json!({
            "alert_contacts": [{"id": "2353888", "type": 2}, {"id": 132_759}]
        });
        let m = decode_value(raw).unwrap();
        assert_eq!(m.alert_contacts, vec!["2353888", "132759"]);
    }

    #[test]
    fn test_non_object_is_malformed() {
        assert!(matches!(
            decode_value(json!([1, 2])),
            Err(Error::MalformedField { field: "monitor", .. })
        ));
    }
}

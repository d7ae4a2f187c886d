//! Decoding of device messages received on the upgrade WebSocket
//!
//! Every text frame carries one JSON object. Keys with a fixed meaning
//! (`result`, `errors`, `retries`, `processor`, `firmware`) become typed
//! fields; any other key addresses a UI target of the same id.

use serde_json::{Map, Value};
use thiserror::Error;

use super::inventory::field_text;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("frame is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("frame is not a JSON object")]
    NotAnObject,
}

/// One decoded key of a device message
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// Raw upgrade result code
    Result(i64),
    /// `errors` or `retries` counter
    Counter { name: String, value: String },
    Processor(String),
    Firmware { name: String, version: String },
    /// Value for the UI target with this id
    Target { id: String, value: Value },
}

/// Fields of one frame in the order the device sent them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceMessage {
    pub fields: Vec<Field>,
}

fn decode_field(key: String, value: Value) -> Option<Field> {
    match key.as_str() {
        "result" => match integer_of(&value) {
            Some(code) => Some(Field::Result(code)),
            None => {
                log::warn!("Ignoring non-integer result {value}");
                None
            }
        },
        "errors" | "retries" => Some(Field::Counter {
            value: field_text(&value),
            name: key,
        }),
        "processor" => Some(Field::Processor(field_text(&value))),
        "firmware" => match value.as_array().map(Vec::as_slice) {
            Some([Value::String(name), Value::String(version)]) => Some(Field::Firmware {
                name: name.clone(),
                version: version.clone(),
            }),
            _ => {
                log::warn!("Ignoring malformed firmware pair {value}");
                None
            }
        },
        _ => Some(Field::Target { id: key, value }),
    }
}

/// Decode one text frame
pub fn decode_frame(text: &str) -> Result<DeviceMessage, ProtocolError> {
    let object: Map<String, Value> = match serde_json::from_str(text)? {
        Value::Object(object) => object,
        _ => return Err(ProtocolError::NotAnObject),
    };

    Ok(DeviceMessage {
        fields: object
            .into_iter()
            .filter_map(|(key, value)| decode_field(key, value))
            .collect(),
    })
}

/// Integer from a JSON number or numeric string
pub fn integer_of(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Fill percentage from a JSON number or numeric string, clamped to 0..=100
pub fn percent_of(value: &Value) -> Option<u8> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if raw.is_nan() {
        return None;
    }
    Some(raw.clamp(0.0, 100.0).round() as u8)
}

/// Checkbox state: checked exactly when the value is 1
pub fn is_checked(value: &Value) -> bool {
    integer_of(value) == Some(1)
}

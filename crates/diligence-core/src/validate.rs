//! Strict validation of backend responses.
//!
//! The language backend returns loosely-typed JSON. Everything crossing
//! into the typed verdicts goes through here: parse, don't validate.
//! Non-conforming responses become [`ProcedureError::Malformed`].

use crate::error::ProcedureError;
use crate::model::Claim;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parse a backend response into one of the typed verdicts.
pub fn parse_verdict<T: DeserializeOwned>(
    profile: &str,
    mut response: Value,
) -> Result<T, ProcedureError> {
    normalize_enums(&mut response);
    serde_json::from_value(response).map_err(|e| ProcedureError::Malformed {
        profile: profile.to_string(),
        detail: e.to_string(),
    })
}

/// Parse a claim-extraction response. Accepts either `{"claims": [...]}`
/// or a bare array.
pub fn parse_claims(profile: &str, response: Value) -> Result<Vec<Claim>, ProcedureError> {
    let items = match response {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => map.remove("claims").ok_or_else(|| {
            ProcedureError::Malformed {
                profile: profile.to_string(),
                detail: "missing \"claims\" field".into(),
            }
        })?,
        other => {
            return Err(ProcedureError::Malformed {
                profile: profile.to_string(),
                detail: format!("expected an object or array, got {other}"),
            })
        }
    };
    serde_json::from_value(items).map_err(|e| ProcedureError::Malformed {
        profile: profile.to_string(),
        detail: e.to_string(),
    })
}

/// Backends are inconsistent about enum casing; normalize before serde.
fn normalize_enums(value: &mut Value) {
    if let Some(v) = value.get_mut("verdict") {
        if let Some(s) = v.as_str() {
            *v = Value::String(s.to_ascii_uppercase());
        }
    }
    if let Some(v) = value.get_mut("confidence") {
        if let Some(s) = v.as_str() {
            *v = Value::String(s.to_ascii_lowercase());
        }
    }
}

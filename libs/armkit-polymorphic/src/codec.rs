//! Decode/encode entry points for discriminated-union families.
//!
//! Absent or `null` payloads decode to `None`. Unknown discriminators decode to the
//! base variant. Collection decoders are all-or-nothing: the first failing element
//! fails the whole batch.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::Polymorphic;

#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object for {family}, found {found}")]
    NotAnObject {
        family: &'static str,
        found: &'static str,
    },

    #[error("cannot decode {family} as '{variant}': {source}")]
    Variant {
        family: &'static str,
        variant: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{family} collection has a null element at {position}")]
    NullElement {
        family: &'static str,
        position: String,
    },

    #[error("{family} collection element {position}: {source}")]
    Element {
        family: &'static str,
        position: String,
        #[source]
        source: Box<CodecError>,
    },
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn parse_raw(raw: Option<&[u8]>) -> Result<Option<Value>, CodecError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let value: Value = serde_json::from_slice(raw)?;
    Ok((!value.is_null()).then_some(value))
}

/// Decode one payload of family `U` from an already-parsed JSON value.
///
/// # Errors
/// Returns `CodecError::NotAnObject` for non-object payloads and
/// `CodecError::Variant` when the payload does not fit the selected variant.
pub fn decode_value<U: Polymorphic>(value: &Value) -> Result<Option<U>, CodecError> {
    let map = match value {
        Value::Null => return Ok(None),
        Value::Object(map) => map,
        other => {
            return Err(CodecError::NotAnObject {
                family: U::FAMILY,
                found: json_type_name(other),
            });
        }
    };

    let raw_tag = map.get(U::FIELD);
    let tag = raw_tag.and_then(Value::as_str);
    let decoded = match raw_tag {
        // A non-string discriminator is dropped before the base decoder sees it.
        Some(other) if !other.is_string() && !other.is_null() => {
            let mut stripped = map.clone();
            stripped.remove(U::FIELD);
            (U::BASE)(&Value::Object(stripped))
        }
        _ => U::decoder_for(tag)(value),
    };
    decoded.map(Some).map_err(|source| CodecError::Variant {
        family: U::FAMILY,
        variant: match tag {
            Some(t) if U::is_known(t) => t.to_owned(),
            _ => "base".to_owned(),
        },
        source,
    })
}

/// Decode one raw payload of family `U`.
///
/// # Errors
/// Returns `CodecError::Json` for malformed input, otherwise see [`decode_value`].
pub fn decode<U: Polymorphic>(raw: Option<&[u8]>) -> Result<Option<U>, CodecError> {
    match parse_raw(raw)? {
        Some(value) => decode_value(&value),
        None => Ok(None),
    }
}

fn decode_element<U: Polymorphic>(value: &Value, position: String) -> Result<U, CodecError> {
    match decode_value::<U>(value) {
        Ok(Some(v)) => Ok(v),
        Ok(None) => Err(CodecError::NullElement {
            family: U::FAMILY,
            position,
        }),
        Err(e) => Err(CodecError::Element {
            family: U::FAMILY,
            position,
            source: Box::new(e),
        }),
    }
}

/// Decode a JSON array of family `U`.
///
/// # Errors
/// Returns `CodecError::Json` if the payload is not an array, and the first element
/// error otherwise. `null` elements are rejected.
pub fn decode_array<U: Polymorphic>(raw: Option<&[u8]>) -> Result<Option<Vec<U>>, CodecError> {
    let Some(value) = parse_raw(raw)? else {
        return Ok(None);
    };
    let elements: Vec<Value> = serde_json::from_value(value)?;
    elements
        .iter()
        .enumerate()
        .map(|(i, v)| decode_element(v, format!("[{i}]")))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Decode a JSON object whose values are of family `U`.
///
/// # Errors
/// Returns `CodecError::Json` if the payload is not an object, and the first value
/// error otherwise. `null` values are rejected.
pub fn decode_map<U: Polymorphic>(
    raw: Option<&[u8]>,
) -> Result<Option<BTreeMap<String, U>>, CodecError> {
    let Some(value) = parse_raw(raw)? else {
        return Ok(None);
    };
    let entries: serde_json::Map<String, Value> = serde_json::from_value(value)?;
    entries
        .iter()
        .map(|(k, v)| decode_element(v, format!("[{k:?}]")).map(|u| (k.clone(), u)))
        .collect::<Result<BTreeMap<_, _>, _>>()
        .map(Some)
}

/// Encode a value of family `U`, always emitting its discriminator.
///
/// # Errors
/// Returns `CodecError::Json` if the inner value cannot be serialized.
pub fn encode<U: Polymorphic>(value: &U) -> Result<Vec<u8>, CodecError> {
    Ok(serde_json::to_vec(&value.to_value()?)?)
}

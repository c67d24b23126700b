// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Text conversion for values.
//!
//! Scalars use their natural text form (`-156`, `true`, `2010-05-24`, base64
//! for binary). Lists and maps use a JSON rendering so that the text form is
//! self-describing and exact: a list is an array of element texts, a map is an
//! object whose entries are tagged with their kind
//! (`{"mi":{"integer":"2"}}`). For every value `v`,
//! `decode(&encode(&v), v.kind()) == v`.

use super::{ScalarKind, Uri, Value, ValueKind, ValueList, ValueMap};
use crate::errors::{CoreError, CoreResult};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::{Map as JsonMap, Value as Json};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Text form of any value.
pub fn encode(value: &Value) -> String {
    match value {
        Value::List(list) => Json::Array(list_payload(list)).to_string(),
        Value::Map(map) => Json::Object(map_payload(map)).to_string(),
        scalar => encode_scalar(scalar),
    }
}

/// Text form of a scalar; composites fall back to [`encode`].
pub fn encode_scalar(value: &Value) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::UInt(u) => u.to_string(),
        Value::Real(r) => r.to_string(),
        Value::String(s) => s.clone(),
        Value::Uri(uri) => uri.to_string(),
        Value::Date(date) => {
            if date.time() == NaiveTime::MIN {
                date.format(DATE_FORMAT).to_string()
            } else {
                date.format(DATE_TIME_FORMAT).to_string()
            }
        }
        Value::Binary(bytes) => STANDARD.encode(bytes),
        composite => encode(composite),
    }
}

/// Decode `text` as a value of `kind`.
pub fn decode(text: &str, kind: ValueKind) -> CoreResult<Value> {
    match kind {
        ValueKind::Scalar(scalar) => decode_scalar(text, scalar),
        ValueKind::List(element) => {
            let json = parse_json(text, kind)?;
            decode_list_payload(&json, element, text)
        }
        ValueKind::Map => {
            let json = parse_json(text, kind)?;
            decode_map_payload(&json, text)
        }
    }
}

/// Decode `text` as a scalar. Surrounding whitespace is ignored for every
/// kind except `string`, which is taken verbatim.
pub fn decode_scalar(text: &str, kind: ScalarKind) -> CoreResult<Value> {
    let trimmed = text.trim();
    let fail = |reason: String| CoreError::format(kind.wire_name(), text, reason);
    match kind {
        ScalarKind::Bool => match trimmed.to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(Value::Bool(true)),
            "false" | "0" => Ok(Value::Bool(false)),
            _ => Err(fail("expected true, false, 1 or 0".to_string())),
        },
        ScalarKind::Int => trimmed
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|e| fail(e.to_string())),
        ScalarKind::UInt => trimmed
            .parse::<u64>()
            .map(Value::UInt)
            .map_err(|e| fail(e.to_string())),
        ScalarKind::Real => trimmed
            .parse::<f64>()
            .map(Value::Real)
            .map_err(|e| fail(e.to_string())),
        ScalarKind::String => Ok(Value::String(text.to_string())),
        ScalarKind::Uri => Uri::parse(trimmed).map(Value::Uri),
        ScalarKind::Date => decode_date(trimmed).map(Value::Date).map_err(fail),
        ScalarKind::Binary => STANDARD
            .decode(trimmed)
            .map(Value::Binary)
            .map_err(|e| fail(e.to_string())),
    }
}

fn decode_date(text: &str) -> Result<NaiveDateTime, String> {
    if let Ok(date_time) = NaiveDateTime::parse_from_str(text, DATE_TIME_FORMAT) {
        return Ok(date_time);
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|e| format!("expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS ({})", e))
}

fn parse_json(text: &str, kind: ValueKind) -> CoreResult<Json> {
    serde_json::from_str(text).map_err(|e| CoreError::format(kind.to_string(), text, e.to_string()))
}

fn list_payload(list: &ValueList) -> Vec<Json> {
    list.items()
        .iter()
        .map(|item| Json::String(encode_scalar(item)))
        .collect()
}

fn map_payload(map: &ValueMap) -> JsonMap<String, Json> {
    map.iter()
        .map(|(key, value)| (key.clone(), tagged(value)))
        .collect()
}

fn tagged(value: &Value) -> Json {
    let payload = match value {
        Value::List(list) => Json::Array(list_payload(list)),
        Value::Map(map) => Json::Object(map_payload(map)),
        scalar => Json::String(encode_scalar(scalar)),
    };
    let mut entry = JsonMap::new();
    entry.insert(value.kind().to_string(), payload);
    Json::Object(entry)
}

fn decode_list_payload(json: &Json, element: ScalarKind, text: &str) -> CoreResult<Value> {
    let kind = ValueKind::List(element);
    let items = json
        .as_array()
        .ok_or_else(|| CoreError::format(kind.to_string(), text, "expected an array"))?;
    let values = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let item_text = item.as_str().ok_or_else(|| {
                CoreError::format(element.wire_name(), &item.to_string(), "expected a string element")
                    .located(&format!("[{}]", index))
            })?;
            decode_scalar(item_text, element).map_err(|e| e.located(&format!("[{}]", index)))
        })
        .collect::<CoreResult<Vec<_>>>()?;
    Value::list(element, values)
}

fn decode_map_payload(json: &Json, text: &str) -> CoreResult<Value> {
    let object = json
        .as_object()
        .ok_or_else(|| CoreError::format("map", text, "expected an object"))?;
    let mut map = ValueMap::new();
    for (key, entry) in object {
        let value = decode_tagged(entry).map_err(|e| e.located(key))?;
        map.insert(key.clone(), value);
    }
    Ok(Value::Map(map))
}

fn decode_tagged(entry: &Json) -> CoreResult<Value> {
    let entry_text = entry.to_string();
    let (kind_name, payload) = entry
        .as_object()
        .filter(|object| object.len() == 1)
        .and_then(|object| object.iter().next())
        .ok_or_else(|| CoreError::format("map", &entry_text, "expected a single {kind: value} entry"))?;
    let kind = ValueKind::parse(kind_name)
        .ok_or_else(|| CoreError::format("map", &entry_text, format!("unknown kind '{}'", kind_name)))?;
    match kind {
        ValueKind::Scalar(scalar) => {
            let text = payload.as_str().ok_or_else(|| {
                CoreError::format(scalar.wire_name(), &payload.to_string(), "expected a string")
            })?;
            decode_scalar(text, scalar)
        }
        ValueKind::List(element) => decode_list_payload(payload, element, &entry_text),
        ValueKind::Map => decode_map_payload(payload, &entry_text),
    }
}

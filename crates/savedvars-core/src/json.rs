//! JSON export for downstream consumers.
//!
//! Mapping rules:
//!
//! - `nil` → `null`, booleans and strings as-is
//! - integral numbers that fit an `i64` → JSON integers, all others → JSON floats
//! - tables whose keys are exactly `1..=n` → arrays in index order
//! - every other table (including `{}`) → an object keyed by the key's display
//!   form, in entry order
//!
//! Export fails with an error instead of losing data when two keys of one
//! table share a display form (e.g. `[1]` and `["1"]`), or when a number's
//! magnitude is not finite (e.g. `1e999`), which JSON cannot represent.
//!
//! Object order relies on `serde_json`'s `preserve_order` feature.

use crate::error::Result;
use crate::types::{Number, Root, Table, Value};
use serde::ser::{Error as _, SerializeMap, SerializeSeq, Serializer};
use serde::Serialize;
use std::collections::HashSet;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Nil => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Table(t) => t.serialize(serializer),
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.as_i64() {
            Some(i) => serializer.serialize_i64(i),
            None if self.as_f64().is_finite() => serializer.serialize_f64(self.as_f64()),
            None => Err(S::Error::custom(format!(
                "number {} is out of range for JSON",
                self.as_str()
            ))),
        }
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.is_sequence() {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for value in self.sequence_values() {
                seq.serialize_element(value)?;
            }
            seq.end()
        } else {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            let mut seen = HashSet::with_capacity(self.len());
            for (key, value) in self.iter() {
                let name = key.to_string();
                if !seen.insert(name.clone()) {
                    return Err(S::Error::custom(format!(
                        "table keys collide as JSON object key \"{name}\""
                    )));
                }
                map.serialize_entry(&name, value)?;
            }
            map.end()
        }
    }
}

impl Serialize for Root {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Convert a parsed tree into a `serde_json::Value`.
pub fn to_json_value(root: &Root) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(root)?)
}

/// Serialize a parsed tree as compact JSON.
pub fn to_json_string(root: &Root) -> Result<String> {
    Ok(serde_json::to_string(root)?)
}

/// Serialize a parsed tree as pretty-printed JSON.
pub fn to_json_string_pretty(root: &Root) -> Result<String> {
    Ok(serde_json::to_string_pretty(root)?)
}

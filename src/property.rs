//! Registry property keys and values.
//!
//! Hardware registries expose untyped key/value properties. This module names the
//! handful of keys the poller reads and gives their values a small typed shape, so
//! lookups return `Option` instead of being cast blindly.
//!
//! # Conventions
//! - `Product`, `SerialNumber`, and `Transport` are text.
//! - `BatteryPercent` is an integer, nominally `0..=100`.
//! - A property with an unexpected type is treated the same as an absent one.

use serde::{Deserialize, Serialize};

/// Property names read from each registry entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PropertyKey {
    Product,
    SerialNumber,
    Transport,
    BatteryPercent,
}

impl PropertyKey {
    /// All keys, in the order the poller reads them.
    pub const ALL: [PropertyKey; 4] = [
        PropertyKey::Product,
        PropertyKey::SerialNumber,
        PropertyKey::Transport,
        PropertyKey::BatteryPercent,
    ];

    /// Registry key name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyKey::Product => "Product",
            PropertyKey::SerialNumber => "SerialNumber",
            PropertyKey::Transport => "Transport",
            PropertyKey::BatteryPercent => "BatteryPercent",
        }
    }

    /// Inverse of [`as_str`](Self::as_str). Matching is exact, as registry keys are.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

impl std::fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A property value as reported by the registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Text(String),
    Integer(i64),
}

impl PropertyValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            PropertyValue::Integer(_) => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(n) => Some(*n),
            PropertyValue::Text(_) => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

impl From<i64> for PropertyValue {
    fn from(n: i64) -> Self {
        PropertyValue::Integer(n)
    }
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyValue::Text(s) => write!(f, "{s:?}"),
            PropertyValue::Integer(n) => write!(f, "{n}"),
        }
    }
}

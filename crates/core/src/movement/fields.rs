//! Tolerant field lookup over loosely-typed upstream JSON.
//!
//! Upstreams disagree on naming (`valor_documento`, `ValorDocumento`,
//! `valorDocumento`), so keys are matched exactly first and then by their
//! canonical form: lowercase with `_` removed.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Map, Value};

/// Read-only view over one JSON object.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Fields<'a> {
    map: Option<&'a Map<String, Value>>,
}

fn canonical(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

impl<'a> Fields<'a> {
    /// Wraps `value`; anything that is not an object behaves as empty.
    pub(crate) fn new(value: &'a Value) -> Self {
        Self {
            map: value.as_object(),
        }
    }

    /// Looks up a key, ignoring explicit nulls.
    pub(crate) fn get(&self, key: &str) -> Option<&'a Value> {
        let map = self.map?;
        let found = map.get(key).or_else(|| {
            let wanted = canonical(key);
            map.iter()
                .find(|(k, _)| canonical(k) == wanted)
                .map(|(_, v)| v)
        })?;
        (!found.is_null()).then_some(found)
    }

    /// Nested object under `key`.
    pub(crate) fn nested(&self, key: &str) -> Fields<'a> {
        Fields {
            map: self.get(key).and_then(Value::as_object),
        }
    }

    /// First non-empty text among `keys`. Numbers are rendered as text.
    pub(crate) fn text(&self, keys: &[&str]) -> String {
        keys.iter()
            .find_map(|key| match self.get(key)? {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// First present amount among `keys`.
    ///
    /// Like a `??` chain: a present zero stops the search.
    pub(crate) fn decimal(&self, keys: &[&str]) -> Option<Decimal> {
        keys.iter().find_map(|key| match self.get(key)? {
            Value::Number(n) => parse_decimal(&n.to_string()),
            Value::String(s) => parse_decimal(s),
            _ => None,
        })
    }

    /// First present non-negative integer among `keys`.
    pub(crate) fn unsigned(&self, keys: &[&str]) -> Option<u32> {
        keys.iter().find_map(|key| match self.get(key)? {
            Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    /// Boolean flag; accepts `true`/`false` and Omie's `"S"`/`"N"`.
    pub(crate) fn flag(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim().to_uppercase().as_str() {
                "S" | "SIM" | "TRUE" => Some(true),
                "N" | "NAO" | "NÃO" | "FALSE" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// First parseable date among `keys`.
    pub(crate) fn date(&self, keys: &[&str]) -> Option<NaiveDate> {
        keys.iter()
            .find_map(|key| self.get(key)?.as_str().and_then(parse_date))
    }

    /// Array under `key`, or an empty slice.
    pub(crate) fn array(&self, key: &str) -> &'a [Value] {
        self.get(key)
            .and_then(Value::as_array)
            .map_or(&[][..], Vec::as_slice)
    }
}

/// Parses `1234.56`, `1.234,56`, `1234,56` or scientific notation.
pub(crate) fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
        .or_else(|| {
            raw.contains(',')
                .then(|| raw.replace('.', "").replace(',', "."))
                .and_then(|s| Decimal::from_str(&s).ok())
        })
}

/// Parses `YYYY-MM-DD`, an ISO date-time, or `DD/MM/YYYY`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.contains('/') {
        return NaiveDate::parse_from_str(raw, "%d/%m/%Y").ok();
    }
    let date_part = raw.get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

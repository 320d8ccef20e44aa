//! Key/value settings store interface and its text format
//!
//! Values live under `(category, name)` pairs and are always stored as strings.
//! Typed accessors for floats, integers and timestamps are layered on top as
//! provided trait methods, so every backend gets them for free.
//!
//! The on-disk representation is an INI-like text:
//!
//! ```text
//! [rates]
//! EUR_USD=1.0843
//! EUR_USD_time=2024-05-01T10:00:00+00:00
//! ```

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// `category -> name -> value`
pub type Sections = BTreeMap<String, BTreeMap<String, String>>;

/// String storage addressed by `(category, name)`.
///
/// Methods take `&mut self` so backends can load lazily on first access.
pub trait KeyValueStore {
    fn value(&mut self, category: &str, name: &str) -> Result<Option<String>>;

    fn set_value(&mut self, category: &str, name: &str, value: &str) -> Result<()>;

    fn value_f64(&mut self, category: &str, name: &str) -> Result<Option<f64>> {
        self.value(category, name)?
            .map(|s| {
                s.parse::<f64>().map_err(|e| {
                    Error::PersistenceFailure(format!("{category}.{name} is not a number: {e}"))
                })
            })
            .transpose()
    }

    fn set_value_f64(&mut self, category: &str, name: &str, value: f64) -> Result<()> {
        self.set_value(category, name, &value.to_string())
    }

    fn value_i64(&mut self, category: &str, name: &str) -> Result<Option<i64>> {
        self.value(category, name)?
            .map(|s| {
                s.parse::<i64>().map_err(|e| {
                    Error::PersistenceFailure(format!("{category}.{name} is not an integer: {e}"))
                })
            })
            .transpose()
    }

    fn set_value_i64(&mut self, category: &str, name: &str, value: i64) -> Result<()> {
        self.set_value(category, name, &value.to_string())
    }

    fn value_time(&mut self, category: &str, name: &str) -> Result<Option<DateTime<Utc>>> {
        self.value(category, name)?
            .map(|s| {
                DateTime::parse_from_rfc3339(&s)
                    .map(|t| t.with_timezone(&Utc))
                    .map_err(|e| {
                        Error::PersistenceFailure(format!(
                            "{category}.{name} is not a timestamp: {e}"
                        ))
                    })
            })
            .transpose()
    }

    fn set_value_time(&mut self, category: &str, name: &str, value: DateTime<Utc>) -> Result<()> {
        self.set_value(category, name, &value.to_rfc3339())
    }
}

/// Rejects keys and values the text format cannot represent.
pub fn validate_entry(category: &str, name: &str, value: &str) -> Result<()> {
    if category.is_empty() || name.is_empty() {
        return Err(Error::PersistenceFailure(
            "category and name must not be empty".to_string(),
        ));
    }
    if category.contains(['[', ']', '\n', '\r']) {
        return Err(Error::PersistenceFailure(format!(
            "invalid category name: {category:?}"
        )));
    }
    if name.contains(['=', '\n', '\r']) {
        return Err(Error::PersistenceFailure(format!(
            "invalid property name: {name:?}"
        )));
    }
    if value.contains(['\n', '\r']) {
        return Err(Error::PersistenceFailure(format!(
            "value for {category}.{name} must not contain newlines"
        )));
    }
    Ok(())
}

/// Inserts `value` and reports whether the stored sections changed.
pub fn upsert(sections: &mut Sections, category: &str, name: &str, value: &str) -> bool {
    let properties = sections.entry(category.to_string()).or_default();
    if properties.get(name).map(String::as_str) == Some(value) {
        return false;
    }
    properties.insert(name.to_string(), value.to_string());
    true
}

/// Parses the settings text.
///
/// Blank lines and lines without `=` are skipped. Properties that appear before
/// any section header are ignored. Names and values are split at the first `=`.
pub fn parse_settings(content: &str) -> Sections {
    let mut sections = Sections::new();
    let mut current: Option<String> = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.len() >= 2 && line.starts_with('[') && line.ends_with(']') {
            let category = line[1..line.len() - 1].to_string();
            sections.entry(category.clone()).or_default();
            current = Some(category);
            continue;
        }

        let Some((name, value)) = line.split_once('=') else {
            continue;
        };
        if let Some(category) = &current {
            sections
                .entry(category.clone())
                .or_default()
                .insert(name.to_string(), value.to_string());
        }
    }

    sections
}

/// Renders sections back to text, in sorted order.
pub fn render_settings(sections: &Sections) -> String {
    let mut out = String::new();
    for (category, properties) in sections {
        out.push('[');
        out.push_str(category);
        out.push_str("]\n");
        for (name, value) in properties {
            out.push_str(name);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
    }
    out
}

/// Process-lifetime store with no durable backing.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    sections: Sections,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of mutations that actually changed a value.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn sections(&self) -> &Sections {
        &self.sections
    }
}

impl KeyValueStore for MemoryStore {
    fn value(&mut self, category: &str, name: &str) -> Result<Option<String>> {
        Ok(self
            .sections
            .get(category)
            .and_then(|properties| properties.get(name))
            .cloned())
    }

    fn set_value(&mut self, category: &str, name: &str, value: &str) -> Result<()> {
        validate_entry(category, name, value)?;
        if upsert(&mut self.sections, category, name, value) {
            self.writes += 1;
        }
        Ok(())
    }
}

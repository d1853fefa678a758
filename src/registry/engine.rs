//! Tera adapters
//!
//! A piped tera filter receives the value and a keyword map, so the piped
//! value binds to the first parameter and the rest bind by name. Testers get
//! positional arguments after the tested value.

use super::{FilterEntry, FilterRegistry};
use crate::error::{FilterError, Result};
use crate::value::{is_truthy, Record};
use std::collections::HashMap;
use std::sync::Arc;
use tera::{Context, Tera, Value};
use tracing::debug;

/// Wrap a filter failure so tera reports which filter raised it
pub fn to_tera_error(name: &str, error: FilterError) -> tera::Error {
    tera::Error::chain(format!("Filter '{}' failed", name), error)
}

pub(super) struct EntryFilter {
    name: String,
    entry: Arc<FilterEntry>,
}

impl EntryFilter {
    pub(super) fn new(name: &str, entry: Arc<FilterEntry>) -> Self {
        Self {
            name: name.to_string(),
            entry,
        }
    }
}

impl tera::Filter for EntryFilter {
    fn filter(&self, value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let kwargs: Record = args
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        self.entry
            .invoke(std::slice::from_ref(value), &kwargs)
            .map_err(|e| to_tera_error(&self.name, e))
    }
}

pub(super) struct EntryTest {
    name: String,
    entry: Arc<FilterEntry>,
}

impl EntryTest {
    pub(super) fn new(name: &str, entry: Arc<FilterEntry>) -> Self {
        Self {
            name: name.to_string(),
            entry,
        }
    }
}

impl tera::Test for EntryTest {
    fn test(&self, value: Option<&Value>, args: &[Value]) -> tera::Result<bool> {
        // Undefined values fail the test rather than the render
        let Some(value) = value else {
            return Ok(false);
        };

        let mut positional = Vec::with_capacity(args.len() + 1);
        positional.push(value.clone());
        positional.extend_from_slice(args);

        self.entry
            .invoke(&positional, &Record::new())
            .map(|result| is_truthy(&result))
            .map_err(|e| to_tera_error(&self.name, e))
    }
}

/// Render a one-off template with every registered filter and test installed
///
/// `data` must be a mapping (or null for an empty context).
pub fn render_str(registry: &FilterRegistry, template: &str, data: &Value) -> Result<String> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    registry.register_tera(&mut tera);

    let context = match data {
        Value::Null => Context::new(),
        other => Context::from_value(other.clone())?,
    };

    debug!("Rendering template of {} bytes", template.len());
    Ok(tera.render_str(template, &context)?)
}

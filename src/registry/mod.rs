//! Named filter registry
//!
//! The template host looks filters up by name and passes positional and
//! keyword arguments. Each `FilterEntry` declares its parameters, including
//! defaults, so the registry can bind those arguments the same way for every
//! filter before handing them to the typed function.
//!
//! Defaults are stored as plain values and cloned into every call, so no
//! call can observe another call's arguments.

mod builtin;
mod engine;

pub use engine::{render_str, to_tera_error};

use crate::config::RegistryConfig;
use crate::error::{FilterError, Result};
use crate::value::{
    expect_record, expect_sequence, expect_str, is_truthy, key_list, py_repr, py_str, Record,
};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

static NULL: Value = Value::Null;

/// How an entry may be used by the template host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Filter,
    FilterAndTest,
}

impl EntryKind {
    pub fn is_test(self) -> bool {
        matches!(self, EntryKind::FilterAndTest)
    }
}

/// A declared parameter; `default` of `None` means required
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: &'static str,
    pub default: Option<Value>,
}

pub type FilterFn = fn(&BoundArgs) -> Result<Value>;

/// One registered function with its parameter list
#[derive(Clone)]
pub struct FilterEntry {
    pub name: &'static str,
    pub summary: &'static str,
    pub kind: EntryKind,
    pub params: Vec<Param>,
    /// Historical keyword names accepted in place of a parameter name
    pub keyword_aliases: Vec<(&'static str, &'static str)>,
    call: FilterFn,
}

impl fmt::Debug for FilterEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterEntry")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("params", &self.params)
            .field("keyword_aliases", &self.keyword_aliases)
            .finish()
    }
}

impl FilterEntry {
    pub fn new(name: &'static str, kind: EntryKind, summary: &'static str, call: FilterFn) -> Self {
        Self {
            name,
            summary,
            kind,
            params: Vec::new(),
            keyword_aliases: Vec::new(),
            call,
        }
    }

    /// Add a required parameter
    pub fn param(mut self, name: &'static str) -> Self {
        self.params.push(Param {
            name,
            default: None,
        });
        self
    }

    /// Add an optional parameter
    pub fn param_default(mut self, name: &'static str, default: impl Into<Value>) -> Self {
        self.params.push(Param {
            name,
            default: Some(default.into()),
        });
        self
    }

    /// Accept `old` as a keyword for the parameter `new`
    pub fn keyword_alias(mut self, old: &'static str, new: &'static str) -> Self {
        self.keyword_aliases.push((old, new));
        self
    }

    /// Human readable signature, e.g. `to_kv(value, sep='.', prefix='')`
    pub fn signature(&self) -> String {
        let params: Vec<String> = self
            .params
            .iter()
            .map(|p| match &p.default {
                None => p.name.to_string(),
                Some(default) => format!("{}={}", p.name, py_repr(default)),
            })
            .collect();
        format!("{}({})", self.name, params.join(", "))
    }

    /// Rename historical keywords to the declared parameter names
    fn canonical_kwargs<'k>(&self, kwargs: &'k Record) -> Result<Cow<'k, Record>> {
        if self.keyword_aliases.is_empty() {
            return Ok(Cow::Borrowed(kwargs));
        }

        let mut renamed = Record::new();
        for (key, value) in kwargs {
            let name = self
                .keyword_aliases
                .iter()
                .find(|(old, _)| *old == key.as_str())
                .map_or(key.as_str(), |(_, new)| *new);
            if renamed.insert(name.to_string(), value.clone()).is_some() {
                return Err(FilterError::argument(
                    self.name,
                    format!("got multiple values for argument '{}'", name),
                ));
            }
        }
        Ok(Cow::Owned(renamed))
    }

    /// Bind arguments to the declared parameters
    pub fn bind(&self, positional: &[Value], kwargs: &Record) -> Result<BoundArgs> {
        let kwargs = self.canonical_kwargs(kwargs)?;

        if positional.len() > self.params.len() {
            return Err(FilterError::argument(
                self.name,
                format!(
                    "takes at most {} arguments, got {}",
                    self.params.len(),
                    positional.len()
                ),
            ));
        }

        if let Some(unknown) = kwargs
            .keys()
            .find(|key| !self.params.iter().any(|p| p.name == key.as_str()))
        {
            return Err(FilterError::argument(
                self.name,
                format!("unexpected keyword argument '{}'", unknown),
            ));
        }

        let mut values = Vec::with_capacity(self.params.len());
        for (index, param) in self.params.iter().enumerate() {
            let value = match (positional.get(index), kwargs.get(param.name)) {
                (Some(_), Some(_)) => {
                    return Err(FilterError::argument(
                        self.name,
                        format!("got multiple values for argument '{}'", param.name),
                    ))
                }
                (Some(value), None) | (None, Some(value)) => value.clone(),
                (None, None) => match &param.default {
                    Some(default) => default.clone(),
                    None => {
                        return Err(FilterError::argument(
                            self.name,
                            format!("missing required argument '{}'", param.name),
                        ))
                    }
                },
            };
            values.push((param.name, value));
        }

        Ok(BoundArgs { values })
    }

    /// Bind and call
    pub fn invoke(&self, positional: &[Value], kwargs: &Record) -> Result<Value> {
        let args = self.bind(positional, kwargs)?;
        debug!(
            "Invoking {} with {} positional and {} keyword arguments",
            self.name,
            positional.len(),
            kwargs.len()
        );
        (self.call)(&args)
    }
}

/// Arguments bound to an entry's parameters
#[derive(Debug, Clone)]
pub struct BoundArgs {
    values: Vec<(&'static str, Value)>,
}

impl BoundArgs {
    /// Bound value; parameters not declared read as null
    pub fn value(&self, name: &str) -> &Value {
        self.values
            .iter()
            .find(|(param, _)| *param == name)
            .map(|(_, value)| value)
            .unwrap_or(&NULL)
    }

    /// Bound value, treating null as absent
    pub fn optional(&self, name: &str) -> Option<&Value> {
        Some(self.value(name)).filter(|v| !v.is_null())
    }

    pub fn record(&self, name: &str) -> Result<&Record> {
        expect_record(self.value(name), name)
    }

    pub fn sequence(&self, name: &str) -> Result<&[Value]> {
        expect_sequence(self.value(name), name)
    }

    pub fn text(&self, name: &str) -> Result<&str> {
        expect_str(self.value(name), name)
    }

    /// Bound value rendered with `str()`
    pub fn string(&self, name: &str) -> String {
        py_str(self.value(name))
    }

    pub fn flag(&self, name: &str) -> bool {
        is_truthy(self.value(name))
    }

    /// A single key or a sequence of keys
    pub fn keys(&self, name: &str) -> Vec<String> {
        key_list(self.value(name))
    }
}

/// Flat name -> entry registry
#[derive(Debug, Clone)]
pub struct FilterRegistry {
    entries: BTreeMap<String, Arc<FilterEntry>>,
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::with_config(&RegistryConfig::default())
    }
}

impl FilterRegistry {
    /// Build the registry described by `config`
    pub fn with_config(config: &RegistryConfig) -> Self {
        let mut entries = BTreeMap::new();

        for entry in builtin::entries(config) {
            if config.is_disabled(entry.name) {
                debug!("Skipping disabled filter {}", entry.name);
                continue;
            }
            entries.insert(entry.name.to_string(), Arc::new(entry));
        }

        if config.legacy_names {
            for (legacy, canonical, keywords) in builtin::LEGACY_NAMES {
                if config.is_disabled(legacy) {
                    continue;
                }
                let Some(entry) = entries.get(*canonical).cloned() else {
                    continue;
                };
                let entry = if keywords.is_empty() {
                    entry
                } else {
                    let renamed = keywords
                        .iter()
                        .fold((*entry).clone(), |e, &(old, new)| e.keyword_alias(old, new));
                    Arc::new(renamed)
                };
                entries.insert(legacy.to_string(), entry);
            }
        }

        debug!("Filter registry built with {} names", entries.len());
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&FilterEntry> {
        self.entries.get(name).map(Arc::as_ref)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered `(name, entry)` pairs in sorted order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterEntry)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry.as_ref()))
    }

    fn lookup(&self, name: &str) -> Result<&Arc<FilterEntry>> {
        self.entries.get(name).ok_or_else(|| FilterError::UnknownFilter {
            name: name.to_string(),
        })
    }

    /// Call a filter by name
    pub fn call(&self, name: &str, positional: &[Value], kwargs: &Record) -> Result<Value> {
        self.lookup(name)?.invoke(positional, kwargs)
    }

    /// Evaluate a test by name; the result is the truthiness of the call
    pub fn test(&self, name: &str, positional: &[Value], kwargs: &Record) -> Result<bool> {
        let entry = self.lookup(name)?;
        if !entry.kind.is_test() {
            return Err(FilterError::argument(name, "is a filter, not a test"));
        }
        entry.invoke(positional, kwargs).map(|v| is_truthy(&v))
    }

    /// Install every entry into a tera instance under its registered name
    pub fn register_tera(&self, tera: &mut tera::Tera) {
        for (name, entry) in &self.entries {
            tera.register_filter(name, engine::EntryFilter::new(name, entry.clone()));
            if entry.kind.is_test() {
                tera.register_tester(name, engine::EntryTest::new(name, entry.clone()));
            }
        }
    }
}

//! Predicates and selection helpers
//!
//! Boolean reductions, prefix-anchored regex tests, first-present lookups and
//! the record tests `network_contains` / `field_matches`. The record tests
//! hand back the record itself on a match and `None` otherwise, so they work
//! both as filters and as truthiness tests.

use crate::error::{ErrorCode, FilterError, Result};
use crate::value::{expect_str, is_truthy, py_str, Record};
use ipnetwork::IpNetwork;
use regex::Regex;
use serde_json::Value;
use std::net::{IpAddr, Ipv4Addr};
use tracing::trace;

/// Network used by `network_contains` when none is given
pub const ANY_NETWORK: &str = "0.0.0.0/0";

/// Field used by `network_contains` when none is given
pub const DEFAULT_ADDRESS_FIELD: &str = "ansible_host";

/// Regex used by `field_matches` when none is given
pub const MATCH_ANYTHING: &str = ".*";

/// True if any element is truthy; false for an empty sequence
pub fn is_any_true(values: &[Value]) -> bool {
    values.iter().any(is_truthy)
}

/// True if every element is truthy; true for an empty sequence
pub fn is_all_true(values: &[Value]) -> bool {
    values.iter().all(is_truthy)
}

/// Compile `pattern` so it only matches at the start of the text
fn anchored_regex(pattern: &str) -> Result<Regex> {
    Regex::new(&format!(r"\A(?:{})", pattern)).map_err(|e| {
        FilterError::value_with_code(
            ErrorCode::VALUE_INVALID_REGEX,
            format!("invalid regex '{}': {}", pattern, e),
        )
    })
}

/// True if `pattern` matches at the start of `text`
pub fn search_regex(pattern: &str, text: &str) -> Result<bool> {
    Ok(anchored_regex(pattern)?.is_match(text))
}

/// Value of the first candidate key present in `mapping`
pub fn first_present<S: AsRef<str>>(mapping: &Record, candidate_keys: &[S]) -> Result<Value> {
    candidate_keys
        .iter()
        .find_map(|key| mapping.get(key.as_ref()).cloned())
        .ok_or_else(|| {
            let listed: Vec<&str> = candidate_keys.iter().map(AsRef::as_ref).collect();
            FilterError::lookup_with_code(
                ErrorCode::LOOKUP_NO_CANDIDATE,
                listed.join(", "),
                format!("none of the keys [{}] is present", listed.join(", ")),
            )
        })
}

fn parse_network(network: &str) -> Result<IpNetwork> {
    network.trim().parse::<IpNetwork>().map_err(|e| {
        FilterError::value_with_code(
            ErrorCode::VALUE_INVALID_NETWORK,
            format!("invalid network '{}': {}", network, e),
        )
    })
}

/// Parse an address given as text or as an IPv4 integer
fn parse_address(value: &Value) -> Result<IpAddr> {
    let invalid = || {
        FilterError::value_with_code(
            ErrorCode::VALUE_INVALID_ADDRESS,
            format!("invalid IP address '{}'", py_str(value)),
        )
    };

    match value {
        Value::String(text) => text.trim().parse::<IpAddr>().map_err(|_| invalid()),
        Value::Number(n) => n
            .as_u64()
            .and_then(|raw| u32::try_from(raw).ok())
            .map(|raw| IpAddr::V4(Ipv4Addr::from(raw)))
            .ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

/// The record, if `record[field]` is an address inside `network`
///
/// A missing field is never an error. The network is only parsed once the
/// field is known to be present.
pub fn network_contains(record: &Record, network: &str, field: &str) -> Result<Option<Record>> {
    let Some(address) = record.get(field) else {
        trace!("record has no '{}' field", field);
        return Ok(None);
    };

    let network = parse_network(network)?;
    let address = parse_address(address)?;
    Ok(network.contains(address).then(|| record.clone()))
}

/// The record, if `record[field]` matches `regex` from its start
pub fn field_matches(record: &Record, regex: &str, field: &str) -> Result<Option<Record>> {
    let Some(value) = record.get(field) else {
        trace!("record has no '{}' field", field);
        return Ok(None);
    };

    let text = expect_str(value, field)?;
    Ok(anchored_regex(regex)?
        .is_match(text)
        .then(|| record.clone()))
}

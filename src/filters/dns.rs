//! DNS record helpers

use crate::error::{FilterError, Result};
use crate::value::{expect_str, Record};
use serde_json::Value;

/// Reverse the octets of a dotted address under `in-addr.arpa`
pub fn reverse_address(address: &str) -> String {
    let reversed: Vec<&str> = address.split('.').rev().collect();
    format!("{}.in-addr.arpa", reversed.join("."))
}

/// Build the PTR record for a `{host, ip-address}` record
pub fn reverse_dns_record(record: &Record) -> Result<Record> {
    let host = record
        .get("host")
        .ok_or_else(|| FilterError::missing_key("host"))?;
    let address = record
        .get("ip-address")
        .ok_or_else(|| FilterError::missing_key("ip-address"))?;
    let address = expect_str(address, "ip-address")?;

    let mut ptr = Record::new();
    ptr.insert("host".to_string(), Value::String(reverse_address(address)));
    ptr.insert("ip-address".to_string(), host.clone());
    ptr.insert("type".to_string(), Value::String("PTR".to_string()));
    Ok(ptr)
}

/// Forward-only zone declaration for `zone` using `servers`
pub fn zone_forward_block(zone: &str, servers: &Value) -> Record {
    let mut block = Record::new();
    block.insert("type".to_string(), Value::String("forward".to_string()));
    block.insert("forward".to_string(), Value::String("only".to_string()));
    block.insert("forwarders".to_string(), servers.clone());

    let mut declaration = Record::new();
    declaration.insert(format!("zone \"{}\" IN", zone), Value::Object(block));
    declaration
}

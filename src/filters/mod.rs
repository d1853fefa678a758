//! The filter functions
//!
//! Each submodule holds one family of pure functions with a typed Rust API.
//! The registry binds template arguments onto these functions by name.

pub mod dns;
pub mod flatten;
pub mod format;
pub mod predicates;
pub mod printf;
pub mod reshape;
pub mod text;

pub use dns::{reverse_dns_record, zone_forward_block};
pub use flatten::{flatten, to_kv, PathEntry};
pub use format::{format_attribute, format_value, join_attributes, merge_joined};
pub use predicates::{
    field_matches, first_present, is_all_true, is_any_true, network_contains, search_regex,
};
pub use reshape::{
    alias, attributes, drop, extract_key, group, map_from_records, merge, merge_into,
    merge_reverse, record_to_dict, records_from_map, select, KeySpec,
};
pub use text::{filename, head, join_with, split_with, tail, to_safe_yaml, with_ext};

//! Built-in registry entries
//!
//! One thin adapter per filter: read the bound arguments, call the typed
//! function, turn the result back into a value.

use super::{BoundArgs, EntryKind, FilterEntry};
use crate::config::RegistryConfig;
use crate::error::{ErrorCode, FilterError, Result};
use crate::filters::{self, predicates, KeySpec, PathEntry};
use crate::value::{expect_record, py_str, Record};
use serde_json::Value;

pub type KeywordRenames = &'static [(&'static str, &'static str)];

const NETWORK_KEYWORDS: KeywordRenames = &[("net", "network"), ("prop", "field")];

/// Historical names, the canonical entry each one resolves to and the
/// historical keyword names it still accepts
pub const LEGACY_NAMES: &[(&str, &str, KeywordRenames)] = &[
    ("merge_dicts", "merge", &[("x", "base"), ("y", "override")]),
    ("merge_dicts_reverse", "merge_reverse", &[("x", "a"), ("y", "b")]),
    ("alias_keys", "alias", &[("d", "record"), ("alias", "alias_map")]),
    ("select_attributes", "select", &[("d", "record"), ("atts", "keys")]),
    ("map_format", "format_value", &[]),
    ("map_format_attr", "format_attribute", &[("d", "record"), ("attr", "key")]),
    ("reverse_record", "reverse_dns_record", &[]),
    ("zone_fwd", "zone_forward_block", &[]),
    ("test_network", "network_contains", NETWORK_KEYWORDS),
    ("filter_network", "network_contains", NETWORK_KEYWORDS),
    ("map_flatten", "flatten", &[]),
    ("map_group", "group", &[]),
    ("mergekd", "merge_into", &[]),
    ("merge_item", "merge_into", &[]),
    ("dict2list", "records_from_map", &[]),
    ("dict_to_list", "records_from_map", &[]),
    ("list_to_dict", "map_from_records", &[]),
];

pub fn entries(config: &RegistryConfig) -> Vec<FilterEntry> {
    use EntryKind::{Filter, FilterAndTest};

    vec![
        // Structural reshaping
        FilterEntry::new("merge", Filter, "Shallow union, override wins", merge)
            .param("base")
            .param("override"),
        FilterEntry::new("merge_reverse", Filter, "merge(b, a)", merge_reverse)
            .param("a")
            .param("b"),
        FilterEntry::new("alias", Filter, "Copy values to new keys", alias)
            .param("record")
            .param_default("alias_map", Value::Object(Record::new())),
        FilterEntry::new("select", Filter, "Keep only the listed keys", select)
            .param("record")
            .param("keys"),
        FilterEntry::new("drop", Filter, "Remove the listed keys", drop)
            .param("record")
            .param("keys"),
        FilterEntry::new("attributes", Filter, "Values of the listed keys", attributes)
            .param("record")
            .param("keys"),
        FilterEntry::new("record_to_dict", Filter, "Wrap a value into a mapping", record_to_dict)
            .param("value")
            .param_default("keyed_by", Value::Null),
        FilterEntry::new("merge_into", Filter, "Fold a keyed value into its record", merge_into)
            .param("pair")
            .param("key_field"),
        FilterEntry::new("extract_key", Filter, "Split a key out of a record", extract_key)
            .param("record")
            .param("key_field")
            .param_default("remove_key", true),
        FilterEntry::new("records_from_map", Filter, "Map of records to a list", records_from_map)
            .param("mapping")
            .param("key_field"),
        FilterEntry::new("map_from_records", Filter, "Records to a map", map_from_records)
            .param("records")
            .param("key_field")
            .param_default("remove_key", true),
        FilterEntry::new("group", Filter, "Bucket records by key fields", group)
            .param("records")
            .param("key_fields")
            .param_default("group_field", Value::Null),
        // Path flattening
        FilterEntry::new("to_kv", Filter, "Leaf paths as key/value pairs", to_kv)
            .param("value")
            .param_default("sep", config.separator.as_str())
            .param_default("prefix", ""),
        FilterEntry::new("flatten", Filter, "Leaf paths as one mapping", flatten).param("value"),
        // String templating
        FilterEntry::new("format_value", Filter, "printf-style formatting", format_value)
            .param("value")
            .param("pattern"),
        FilterEntry::new("format_attribute", Filter, "Format one field", format_attribute)
            .param("record")
            .param("key")
            .param("pattern"),
        FilterEntry::new("join_attributes", Filter, "Join field values", join_attributes)
            .param("record")
            .param("keys")
            .param_default("sep", config.join_separator.as_str()),
        FilterEntry::new("merge_joined", Filter, "Store joined fields", merge_joined)
            .param("record")
            .param("target_key")
            .param("keys")
            .param_default("sep", config.join_separator.as_str()),
        // Predicates
        FilterEntry::new("is_any_true", FilterAndTest, "Any element truthy", is_any_true)
            .param("values"),
        FilterEntry::new("is_all_true", FilterAndTest, "Every element truthy", is_all_true)
            .param("values"),
        FilterEntry::new("search_regex", FilterAndTest, "Prefix regex match", search_regex)
            .param("pattern")
            .param("text"),
        FilterEntry::new("first_present", Filter, "First candidate key present", first_present)
            .param("mapping")
            .param("candidate_keys"),
        FilterEntry::new("network_contains", FilterAndTest, "Address inside CIDR", network_contains)
            .param("record")
            .param_default("network", predicates::ANY_NETWORK)
            .param_default("field", predicates::DEFAULT_ADDRESS_FIELD),
        FilterEntry::new("field_matches", FilterAndTest, "Field matches regex", field_matches)
            .param("record")
            .param_default("regex", predicates::MATCH_ANYTHING)
            .param_default("field", ""),
        // DNS
        FilterEntry::new("reverse_dns_record", Filter, "PTR record for a host", reverse_dns_record)
            .param("record"),
        FilterEntry::new("zone_forward_block", Filter, "Forward-only zone", zone_forward_block)
            .param("zone")
            .param("servers"),
        // Text helpers
        FilterEntry::new("filename", Filter, "Name before the first dot", filename)
            .param("basename"),
        FilterEntry::new("with_ext", Filter, "Replace the extension", with_ext)
            .param("basename")
            .param("ext"),
        FilterEntry::new("head", Filter, "First element", head)
            .param("value")
            .keyword_alias("x", "value"),
        FilterEntry::new("tail", Filter, "All but the first element", tail)
            .param("value")
            .keyword_alias("x", "value"),
        FilterEntry::new("split_with", Filter, "Split on a delimiter", split_with)
            .param("text")
            .param("delimiter")
            .keyword_alias("x", "text")
            .keyword_alias("d", "delimiter"),
        FilterEntry::new("join_with", Filter, "Join with a delimiter", join_with)
            .param("items")
            .param("delimiter")
            .keyword_alias("x", "items")
            .keyword_alias("d", "delimiter"),
        FilterEntry::new("to_safe_yaml", Filter, "Render as YAML", to_safe_yaml).param("value"),
    ]
}

fn records(values: Vec<Value>) -> Value {
    Value::Array(values)
}

fn optional_record(record: Option<Record>) -> Value {
    record.map(Value::Object).unwrap_or(Value::Null)
}

fn merge(args: &BoundArgs) -> Result<Value> {
    Ok(Value::Object(filters::merge(
        args.record("base")?,
        args.record("override")?,
    )))
}

fn merge_reverse(args: &BoundArgs) -> Result<Value> {
    Ok(Value::Object(filters::merge_reverse(
        args.record("a")?,
        args.record("b")?,
    )))
}

fn alias(args: &BoundArgs) -> Result<Value> {
    let aliases = match args.optional("alias_map") {
        Some(value) => expect_record(value, "alias_map")?.clone(),
        None => Record::new(),
    };
    filters::alias(args.record("record")?, &aliases).map(Value::Object)
}

fn select(args: &BoundArgs) -> Result<Value> {
    Ok(Value::Object(filters::select(
        args.record("record")?,
        &args.keys("keys"),
    )))
}

fn drop(args: &BoundArgs) -> Result<Value> {
    Ok(Value::Object(filters::drop(
        args.record("record")?,
        &args.keys("keys"),
    )))
}

fn attributes(args: &BoundArgs) -> Result<Value> {
    Ok(records(filters::attributes(
        args.record("record")?,
        &args.keys("keys"),
    )))
}

fn record_to_dict(args: &BoundArgs) -> Result<Value> {
    let keyed_by = KeySpec::from_value(args.optional("keyed_by"));
    filters::record_to_dict(args.value("value"), &keyed_by).map(Value::Object)
}

fn merge_into(args: &BoundArgs) -> Result<Value> {
    let [keyed_value, record] = args.sequence("pair")? else {
        return Err(FilterError::value_with_code(
            ErrorCode::VALUE_INVALID_PAIR,
            "merge_into expects a [value, record] pair",
        ));
    };
    let record = expect_record(record, "pair[1]")?;
    let key_field = KeySpec::from_value(Some(args.value("key_field")));
    filters::merge_into(keyed_value, record, &key_field).map(Value::Object)
}

fn extract_key(args: &BoundArgs) -> Result<Value> {
    let (value, remainder) = filters::extract_key(
        args.record("record")?,
        &args.string("key_field"),
        args.flag("remove_key"),
    )?;
    Ok(records(vec![value, Value::Object(remainder)]))
}

fn records_from_map(args: &BoundArgs) -> Result<Value> {
    let key_field = KeySpec::from_value(Some(args.value("key_field")));
    filters::records_from_map(args.record("mapping")?, &key_field).map(records)
}

fn map_from_records(args: &BoundArgs) -> Result<Value> {
    filters::map_from_records(
        args.sequence("records")?,
        &args.string("key_field"),
        args.flag("remove_key"),
    )
    .map(Value::Object)
}

fn group(args: &BoundArgs) -> Result<Value> {
    let group_field = args.optional("group_field").map(py_str);
    filters::group(
        args.sequence("records")?,
        &args.keys("key_fields"),
        group_field.as_deref(),
    )
    .map(records)
}

fn path_entry(entry: PathEntry) -> Value {
    let mut pair = Record::new();
    pair.insert("key".to_string(), Value::String(entry.key));
    pair.insert("value".to_string(), entry.value);
    Value::Object(pair)
}

fn to_kv(args: &BoundArgs) -> Result<Value> {
    let entries = filters::to_kv(
        args.value("value"),
        &args.string("sep"),
        &args.string("prefix"),
    );
    Ok(records(entries.into_iter().map(path_entry).collect()))
}

fn flatten(args: &BoundArgs) -> Result<Value> {
    filters::flatten(args.value("value")).map(Value::Object)
}

fn format_value(args: &BoundArgs) -> Result<Value> {
    filters::format_value(args.value("value"), args.value("pattern"))
}

fn format_attribute(args: &BoundArgs) -> Result<Value> {
    filters::format_attribute(
        args.record("record")?,
        &args.string("key"),
        args.value("pattern"),
    )
    .map(Value::Object)
}

fn join_attributes(args: &BoundArgs) -> Result<Value> {
    Ok(Value::String(filters::join_attributes(
        args.record("record")?,
        &args.keys("keys"),
        &args.string("sep"),
    )))
}

fn merge_joined(args: &BoundArgs) -> Result<Value> {
    Ok(Value::Object(filters::merge_joined(
        args.record("record")?,
        &args.string("target_key"),
        &args.keys("keys"),
        &args.string("sep"),
    )))
}

fn is_any_true(args: &BoundArgs) -> Result<Value> {
    Ok(Value::Bool(filters::is_any_true(args.sequence("values")?)))
}

fn is_all_true(args: &BoundArgs) -> Result<Value> {
    Ok(Value::Bool(filters::is_all_true(args.sequence("values")?)))
}

fn search_regex(args: &BoundArgs) -> Result<Value> {
    filters::search_regex(&args.string("pattern"), args.text("text")?).map(Value::Bool)
}

fn first_present(args: &BoundArgs) -> Result<Value> {
    filters::first_present(args.record("mapping")?, &args.keys("candidate_keys"))
}

fn network_contains(args: &BoundArgs) -> Result<Value> {
    filters::network_contains(
        args.record("record")?,
        &args.string("network"),
        &args.string("field"),
    )
    .map(optional_record)
}

fn field_matches(args: &BoundArgs) -> Result<Value> {
    filters::field_matches(
        args.record("record")?,
        &args.string("regex"),
        &args.string("field"),
    )
    .map(optional_record)
}

fn reverse_dns_record(args: &BoundArgs) -> Result<Value> {
    filters::reverse_dns_record(args.record("record")?).map(Value::Object)
}

fn zone_forward_block(args: &BoundArgs) -> Result<Value> {
    Ok(Value::Object(filters::zone_forward_block(
        &args.string("zone"),
        args.value("servers"),
    )))
}

fn filename(args: &BoundArgs) -> Result<Value> {
    Ok(Value::String(
        filters::filename(args.text("basename")?).to_string(),
    ))
}

fn with_ext(args: &BoundArgs) -> Result<Value> {
    Ok(Value::String(filters::with_ext(
        args.text("basename")?,
        &args.string("ext"),
    )))
}

fn head(args: &BoundArgs) -> Result<Value> {
    filters::head(args.value("value"))
}

fn tail(args: &BoundArgs) -> Result<Value> {
    filters::tail(args.value("value"))
}

fn split_with(args: &BoundArgs) -> Result<Value> {
    let parts = filters::split_with(args.text("text")?, &args.string("delimiter"))?;
    Ok(records(parts.into_iter().map(Value::String).collect()))
}

fn join_with(args: &BoundArgs) -> Result<Value> {
    Ok(Value::String(filters::join_with(
        args.sequence("items")?,
        &args.string("delimiter"),
    )))
}

fn to_safe_yaml(args: &BoundArgs) -> Result<Value> {
    filters::to_safe_yaml(args.value("value")).map(Value::String)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FilterRegistry;
    use serde_json::json;

    fn call(name: &str, positional: &[Value]) -> Result<Value> {
        FilterRegistry::default().call(name, positional, &Record::new())
    }

    fn call_kw(name: &str, positional: &[Value], kwargs: Value) -> Result<Value> {
        let kwargs = kwargs.as_object().cloned().unwrap_or_default();
        FilterRegistry::default().call(name, positional, &kwargs)
    }

    #[test]
    fn test_every_legacy_name_has_a_canonical_entry() {
        let names: Vec<&str> = entries(&RegistryConfig::default())
            .iter()
            .map(|e| e.name)
            .collect();
        for (legacy, canonical, keywords) in LEGACY_NAMES {
            assert!(names.contains(canonical), "{} -> {}", legacy, canonical);

            let entry = entries(&RegistryConfig::default())
                .into_iter()
                .find(|e| e.name == *canonical)
                .unwrap();
            for (old, new) in *keywords {
                assert!(
                    entry.params.iter().any(|p| p.name == *new),
                    "{}: keyword {} renames to unknown parameter {}",
                    legacy,
                    old,
                    new
                );
            }
        }
    }

    #[test]
    fn test_merge_and_alias() {
        assert_eq!(
            call("merge", &[json!({"a": 1, "b": 2}), json!({"b": 3})]).unwrap(),
            json!({"a": 1, "b": 3})
        );
        assert_eq!(
            call("merge_dicts_reverse", &[json!({"b": 3}), json!({"a": 1, "b": 2})]).unwrap(),
            json!({"a": 1, "b": 3})
        );
        assert_eq!(
            call("alias_keys", &[json!({"a": 1}), json!({"a": "b"})]).unwrap(),
            json!({"a": 1, "b": 1})
        );
        // Default alias map is empty
        assert_eq!(call("alias", &[json!({"a": 1})]).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_keys_accept_single_key_or_list() {
        let record = json!({"a": 1, "b": 2, "c": 3});
        assert_eq!(
            call("select", &[record.clone(), json!(["c", "a"])]).unwrap(),
            json!({"a": 1, "c": 3})
        );
        assert_eq!(
            call("drop", &[record.clone(), json!("b")]).unwrap(),
            json!({"a": 1, "c": 3})
        );
        assert_eq!(
            call("attributes", &[record, json!(["c", "x", "a"])]).unwrap(),
            json!([3, 1])
        );
    }

    #[test]
    fn test_extract_key_returns_pair() {
        let record = json!({"name": "web", "port": 80});
        assert_eq!(
            call("extract_key", &[record.clone(), json!("name")]).unwrap(),
            json!(["web", {"port": 80}])
        );
        assert_eq!(
            call_kw("extract_key", &[record.clone(), json!("name")], json!({"remove_key": false}))
                .unwrap(),
            json!(["web", record])
        );
    }

    #[test]
    fn test_merge_into_round_trip_through_registry() {
        let record = json!({"name": "web", "port": 80});
        let pair = call_kw(
            "extract_key",
            &[record.clone(), json!("name")],
            json!({"remove_key": false}),
        )
        .unwrap();
        assert_eq!(call("mergekd", &[pair, json!("name")]).unwrap(), record);
    }

    #[test]
    fn test_merge_into_rejects_non_pairs() {
        let err = call("merge_into", &[json!([1, 2, 3]), json!("k")]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::VALUE_INVALID_PAIR);
    }

    #[test]
    fn test_records_and_maps() {
        let mapping = json!({"web": {"port": 80}, "db": {"port": 5432}});
        let list = call("dict2list", &[mapping.clone(), json!("name")]).unwrap();
        assert_eq!(
            list,
            json!([{"port": 80, "name": "web"}, {"port": 5432, "name": "db"}])
        );
        assert_eq!(call("list_to_dict", &[list, json!("name")]).unwrap(), mapping);
    }

    #[test]
    fn test_group_through_registry() {
        let records = json!([
            {"a": "uno", "b": "one", "c": "x"},
            {"a": "uno", "b": "one", "c": "y"}
        ]);
        assert_eq!(
            call("map_group", &[records, json!(["a", "b"])]).unwrap(),
            json!([{"a": "uno", "b": "one", "data": [{"c": "x"}, {"c": "y"}]}])
        );
    }

    #[test]
    fn test_to_kv_uses_configured_separator() {
        let value = json!({"a": {"b": "c"}, "d": "e"});
        assert_eq!(
            call("to_kv", &[value.clone()]).unwrap(),
            json!([{"key": "a.b", "value": "c"}, {"key": "d", "value": "e"}])
        );

        let config = RegistryConfig {
            separator: "/".to_string(),
            ..RegistryConfig::default()
        };
        let registry = FilterRegistry::with_config(&config);
        assert_eq!(
            registry.call("to_kv", &[value], &Record::new()).unwrap(),
            json!([{"key": "a/b", "value": "c"}, {"key": "d", "value": "e"}])
        );
    }

    #[test]
    fn test_map_flatten_builds_a_mapping() {
        assert_eq!(
            call("map_flatten", &[json!({"a": {"b": 1}, "c": [2]})]).unwrap(),
            json!({"a.b": 1, "c.0": 2})
        );
        assert_eq!(
            call("map_flatten", &[json!({"a": {"b": 1}})]).unwrap(),
            call("flatten", &[json!({"a": {"b": 1}})]).unwrap()
        );
    }

    #[test]
    fn test_formatting_entries() {
        assert_eq!(call("map_format", &[json!("a"), json!("%sx")]).unwrap(), json!("ax"));
        assert_eq!(
            call("map_format_attr", &[json!({"port": 80}), json!("port"), json!("%05d")]).unwrap(),
            json!({"port": "00080"})
        );
        let record = json!({"first": "Ada", "last": "Lovelace"});
        assert_eq!(
            call("join_attributes", &[record.clone(), json!(["first", "last"])]).unwrap(),
            json!("Ada Lovelace")
        );
        assert_eq!(
            call_kw(
                "merge_joined",
                &[record, json!("full"), json!(["last", "first"])],
                json!({"sep": ", "})
            )
            .unwrap(),
            json!({"first": "Ada", "last": "Lovelace", "full": "Lovelace, Ada"})
        );
    }

    #[test]
    fn test_predicate_entries() {
        assert_eq!(call("is_any_true", &[json!([0, 1])]).unwrap(), json!(true));
        assert_eq!(call("is_all_true", &[json!([])]).unwrap(), json!(true));
        assert_eq!(
            call("search_regex", &[json!("web"), json!("web01")]).unwrap(),
            json!(true)
        );
        assert_eq!(
            call("first_present", &[json!({"b": 2}), json!(["a", "b"])]).unwrap(),
            json!(2)
        );
        assert!(call("first_present", &[json!({}), json!(["a"])])
            .unwrap_err()
            .is_lookup());
    }

    #[test]
    fn test_network_entries_return_record_or_null() {
        let record = json!({"host": "test.com", "address": "10.0.0.1"});
        assert_eq!(
            call("test_network", &[record.clone(), json!("10.0.0.0/24"), json!("address")])
                .unwrap(),
            record
        );
        assert_eq!(
            call_kw(
                "network_contains",
                &[record.clone()],
                json!({"network": "10.1.0.0/24", "field": "address"})
            )
            .unwrap(),
            Value::Null
        );
        assert_eq!(
            call_kw("field_matches", &[record.clone()], json!({"regex": "test", "field": "host"}))
                .unwrap(),
            record
        );
        // Default field is the empty key, which this record lacks
        assert_eq!(call("field_matches", &[record]).unwrap(), Value::Null);
    }

    #[test]
    fn test_legacy_names_accept_historical_keywords() {
        let record = json!({"host": "test.com", "address": "10.0.0.1"});
        assert_eq!(
            call_kw(
                "test_network",
                &[record.clone()],
                json!({"net": "10.0.0.0/24", "prop": "address"})
            )
            .unwrap(),
            record
        );
        assert_eq!(
            call_kw(
                "filter_network",
                &[record.clone()],
                json!({"net": "10.1.0.0/24", "prop": "address"})
            )
            .unwrap(),
            Value::Null
        );
        assert_eq!(
            call_kw("merge_dicts", &[], json!({"x": {"a": 1}, "y": {"a": 2}})).unwrap(),
            json!({"a": 2})
        );
        assert_eq!(
            call_kw("select_attributes", &[], json!({"d": {"a": 1, "b": 2}, "atts": ["b"]}))
                .unwrap(),
            json!({"b": 2})
        );
        assert_eq!(
            call_kw("split_with", &[], json!({"x": "a:b", "d": ":"})).unwrap(),
            json!(["a", "b"])
        );
        assert_eq!(
            call_kw("join_with", &[json!(["a", "b"])], json!({"d": "-"})).unwrap(),
            json!("a-b")
        );
        assert_eq!(call_kw("head", &[], json!({"x": [1, 2]})).unwrap(), json!(1));

        // Canonical names keep only their own keywords
        let err = call_kw("network_contains", &[record.clone()], json!({"net": "10.0.0.0/24"}))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::REGISTRY_ARGUMENT);

        // Old and new spelling of one parameter collide
        let err = call_kw(
            "test_network",
            &[record],
            json!({"net": "10.0.0.0/24", "network": "10.0.0.0/8"}),
        )
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::REGISTRY_ARGUMENT);
        assert!(err.to_string().contains("multiple values for argument 'network'"));
    }

    #[test]
    fn test_dns_entries() {
        assert_eq!(
            call("reverse_record", &[json!({"host": "test.com", "ip-address": "10.0.0.1"})])
                .unwrap(),
            json!({"host": "1.0.0.10.in-addr.arpa", "ip-address": "test.com", "type": "PTR"})
        );
        assert_eq!(
            call("zone_fwd", &[json!("example.com"), json!(["10.0.0.53"])]).unwrap(),
            json!({"zone \"example.com\" IN": {
                "type": "forward", "forward": "only", "forwarders": ["10.0.0.53"]
            }})
        );
    }

    #[test]
    fn test_text_entries() {
        assert_eq!(call("filename", &[json!("a.b.c")]).unwrap(), json!("a"));
        assert_eq!(call("with_ext", &[json!("a.b"), json!("j2")]).unwrap(), json!("a.j2"));
        assert_eq!(call("head", &[json!([1, 2])]).unwrap(), json!(1));
        assert_eq!(call("tail", &[json!([1, 2])]).unwrap(), json!([2]));
        assert_eq!(
            call("split_with", &[json!("a:b"), json!(":")]).unwrap(),
            json!(["a", "b"])
        );
        assert_eq!(
            call("join_with", &[json!(["a", 1]), json!("-")]).unwrap(),
            json!("a-1")
        );
        assert_eq!(call("to_safe_yaml", &[json!({"a": 1})]).unwrap(), json!("a: 1\n"));
    }

    #[test]
    fn test_type_errors_surface() {
        assert!(call("merge", &[json!([1]), json!({})]).unwrap_err().is_type());
        assert!(call("flatten", &[json!([1])]).unwrap_err().is_type());
        assert!(call("filename", &[json!(5)]).unwrap_err().is_type());
    }
}

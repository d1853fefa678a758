//! Integration tests for the CLI interface
//!
//! Runs the binary against temporary input files and checks stdout/stderr

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn reshape() -> Command {
    let mut cmd = Command::cargo_bin("reshape").unwrap();
    for var in [
        "RESHAPE_LEGACY_NAMES",
        "RESHAPE_DISABLED",
        "RESHAPE_SEPARATOR",
        "RESHAPE_JOIN_SEPARATOR",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_cli_help_flag() {
    reshape()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_missing_subcommand_is_an_error() {
    reshape()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_list_shows_signatures_and_aliases() {
    reshape()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "network_contains(record, network='0.0.0.0/0', field='ansible_host')",
        ))
        .stdout(predicate::str::contains("alias of merge"));
}

#[test]
fn test_list_without_legacy_names() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("reshape.toml");
    fs::write(&config, "legacy_names = false\n").unwrap();

    reshape()
        .arg("--config")
        .arg(&config)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("merge_dicts").not())
        .stdout(predicate::str::contains("merge_reverse(a, b)"));
}

#[test]
fn test_apply_reads_json_input_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("host.json");
    fs::write(&input, r#"{"host": "test.com", "ip-address": "10.0.0.1"}"#).unwrap();

    reshape()
        .args(["apply", "reverse_dns_record", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""host": "1.0.0.10.in-addr.arpa""#))
        .stdout(predicate::str::contains(r#""type": "PTR""#));
}

#[test]
fn test_apply_reads_yaml_from_stdin() {
    reshape()
        .args(["apply", "to_kv", "--kwarg", "sep=/"])
        .write_stdin("a:\n  b: c\nd: e\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""key": "a/b""#))
        .stdout(predicate::str::contains(r#""key": "d""#));
}

#[test]
fn test_apply_with_positional_arguments() {
    reshape()
        .args(["apply", "format_value", "--arg", "%sx", "--raw"])
        .write_stdin(r#""a""#)
        .assert()
        .success()
        .stdout("ax\n");
}

#[test]
fn test_apply_unknown_filter_fails() {
    reshape()
        .args(["apply", "does_not_exist"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown filter: does_not_exist"));
}

#[test]
fn test_apply_reports_lookup_errors() {
    reshape()
        .args(["apply", "extract_key", "--arg", "name"])
        .write_stdin(r#"{"port": 80}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("[E1001]"))
        .stderr(predicate::str::contains("E1001: Required key is missing"));
}

#[test]
fn test_apply_rejects_malformed_kwarg() {
    reshape()
        .args(["apply", "to_kv", "--kwarg", "nosign"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must look like name=value"));
}

#[test]
fn test_render_template_with_data() {
    let temp_dir = TempDir::new().unwrap();
    let template = temp_dir.path().join("hosts.j2");
    let data = temp_dir.path().join("inventory.yaml");
    fs::write(
        &template,
        "{% for h in hosts %}{% if h is network_contains(\"10.0.0.0/8\", \"ip\") %}{{ h | join_attributes(keys=[\"name\", \"ip\"]) }}\n{% endif %}{% endfor %}",
    )
    .unwrap();
    fs::write(
        &data,
        "hosts:\n  - name: web\n    ip: 10.0.0.5\n  - name: edge\n    ip: 192.168.1.1\n",
    )
    .unwrap();

    reshape()
        .arg("render")
        .arg(&template)
        .arg("--data")
        .arg(&data)
        .assert()
        .success()
        .stdout("web 10.0.0.5\n");
}

#[test]
fn test_render_missing_template_fails() {
    reshape()
        .args(["render", "/definitely/not/here.j2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read template"));
}

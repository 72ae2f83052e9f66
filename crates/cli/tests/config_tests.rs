//! Configuration resolution tests.

use bookmarket_cli::args::CliArgs;
use bookmarket_cli::config::{load_programs, resolve};
use bookmarket_config::{NetworkType, DEFAULT_MARKER};
use clap::Parser;
use std::fs;
use tempfile::TempDir;

fn parse(args: &[&str]) -> CliArgs {
    CliArgs::try_parse_from(args).unwrap()
}

#[test]
fn defaults_without_config_file() {
    let config = resolve(&parse(&["bookmarket", "list"])).unwrap();
    assert_eq!(config.network.network_type, NetworkType::TestNet);
    assert_eq!(config.contract.marker, DEFAULT_MARKER);
    assert_eq!(config.submission.wait_rounds, 4);
}

#[test]
fn network_flag_selects_endpoints() {
    let config = resolve(&parse(&["bookmarket", "list", "--network", "localnet"])).unwrap();
    assert_eq!(
        config.network.node_url().unwrap().as_str(),
        "http://localhost:4001/"
    );
    assert_eq!(
        config.network.indexer_url().unwrap().as_str(),
        "http://localhost:8980/"
    );
}

#[test]
fn file_values_and_url_overrides() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("market.toml");
    fs::write(
        &path,
        r#"
[network]
network_type = "localnet"
node_token = "secret"

[contract]
marker = "books:test"
approval_program = "teal/approval.teal"
clear_program = "/abs/clear.teal"

[submission]
wait_rounds = 8
"#,
    )
    .unwrap();
    let path_arg = path.to_str().unwrap();

    let config = resolve(&parse(&[
        "bookmarket",
        "list",
        "-c",
        path_arg,
        "--node-url",
        "http://node.example:4001",
    ]))
    .unwrap();

    assert_eq!(config.contract.marker, "books:test");
    assert_eq!(config.submission.wait_rounds, 8);
    assert_eq!(config.network.node_token.as_deref(), Some("secret"));
    assert_eq!(
        config.network.node_url().unwrap().as_str(),
        "http://node.example:4001/"
    );
    assert_eq!(
        config.contract.approval_program,
        dir.path().join("teal/approval.teal")
    );
    assert_eq!(
        config.contract.clear_program,
        std::path::PathBuf::from("/abs/clear.teal")
    );
}

#[test]
fn invalid_override_is_reported() {
    let err = resolve(&parse(&["bookmarket", "list", "--indexer-url", "not a url"])).unwrap_err();
    assert!(format!("{err:#}").contains("indexer_url"));
}

#[test]
fn missing_config_file_is_reported() {
    let err = resolve(&parse(&["bookmarket", "list", "-c", "/nonexistent/market.toml"]))
        .unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/market.toml"));
}

#[test]
fn programs_are_read_from_disk() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("approval.teal"), "#pragma version 6\nint 1\n").unwrap();
    fs::write(dir.path().join("clear.teal"), "#pragma version 6\nint 1\n").unwrap();
    let mut config = resolve(&parse(&["bookmarket", "list"])).unwrap();
    config.contract.approval_program = dir.path().join("approval.teal");
    config.contract.clear_program = dir.path().join("clear.teal");

    let programs = load_programs(&config.contract).unwrap();
    assert!(programs.approval_source.starts_with("#pragma"));

    config.contract.clear_program = dir.path().join("missing.teal");
    let err = load_programs(&config.contract).unwrap_err();
    assert!(err.to_string().contains("missing.teal"));
}

//! Configuration loading tests.

use bookmarket_config::{
    ConfigError, MarketplaceConfig, NetworkType, DEFAULT_MARKER, DEFAULT_WAIT_ROUNDS,
};
use std::io::Write;

#[test]
fn defaults_are_valid() {
    let config = MarketplaceConfig::default();
    config.validate().unwrap();
    assert_eq!(config.contract.marker, DEFAULT_MARKER);
    assert_eq!(config.submission.wait_rounds, DEFAULT_WAIT_ROUNDS);
    assert_eq!(config.network.network_type, NetworkType::TestNet);
    assert_eq!(config.contract.global_schema.num_uints, 4);
}

#[test]
fn network_type_parsing() {
    assert_eq!("MainNet".parse::<NetworkType>().unwrap(), NetworkType::MainNet);
    assert_eq!("test".parse::<NetworkType>().unwrap(), NetworkType::TestNet);
    assert_eq!("local".parse::<NetworkType>().unwrap(), NetworkType::LocalNet);
    assert!("moon".parse::<NetworkType>().is_err());
    assert_eq!(NetworkType::LocalNet.to_string(), "localnet");
}

#[test]
fn endpoints_follow_network_unless_overridden() {
    let mut config = MarketplaceConfig::for_network(NetworkType::LocalNet);
    assert_eq!(config.network.node_url().unwrap().as_str(), "http://localhost:4001/");
    assert_eq!(config.network.indexer_url().unwrap().as_str(), "http://localhost:8980/");

    config.network.node_url = Some("http://10.0.0.5:8080".to_string());
    assert_eq!(config.network.node_url().unwrap().as_str(), "http://10.0.0.5:8080/");
}

#[test]
fn partial_toml_keeps_defaults() {
    let config = MarketplaceConfig::from_toml_str(
        r#"
        [network]
        network_type = "mainnet"
        node_token = "secret"

        [contract]
        min_round = 21540981
        "#,
    )
    .unwrap();
    assert_eq!(config.network.network_type, NetworkType::MainNet);
    assert_eq!(config.network.node_token.as_deref(), Some("secret"));
    assert_eq!(config.contract.min_round, 21_540_981);
    assert_eq!(config.contract.marker, DEFAULT_MARKER);
    assert_eq!(config.submission.wait_rounds, DEFAULT_WAIT_ROUNDS);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn validation_rejects_bad_values() {
    let empty_marker = MarketplaceConfig::from_toml_str("[contract]\nmarker = \"\"\n");
    assert!(matches!(empty_marker, Err(ConfigError::Invalid(_))));

    let no_wait = MarketplaceConfig::from_toml_str("[submission]\nwait_rounds = 0\n");
    assert!(matches!(no_wait, Err(ConfigError::Invalid(_))));

    let bad_url = MarketplaceConfig::from_toml_str("[network]\nindexer_url = \"not a url\"\n");
    assert!(matches!(bad_url, Err(ConfigError::Invalid(_))));

    let bad_type = MarketplaceConfig::from_toml_str("[submission]\nwait_rounds = \"four\"\n");
    assert!(matches!(bad_type, Err(ConfigError::Parse(_))));
}

#[test]
fn load_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[submission]\nwait_rounds = 10").unwrap();
    let config = MarketplaceConfig::load(file.path()).unwrap();
    assert_eq!(config.submission.wait_rounds, 10);

    let missing = MarketplaceConfig::load("/definitely/not/here.toml");
    assert!(matches!(missing, Err(ConfigError::Io { .. })));
}

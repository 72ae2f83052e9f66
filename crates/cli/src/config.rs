//! Configuration resolution for the command line.

use crate::args::CliArgs;
use anyhow::{Context, Result};
use bookmarket_config::{ContractConfig, MarketplaceConfig};
use bookmarket_marketplace::ContractPrograms;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Builds the effective configuration: the config file (or the network
/// defaults), then command-line endpoint overrides.
///
/// Relative program paths in a config file are resolved against the file's
/// directory.
pub fn resolve(args: &CliArgs) -> Result<MarketplaceConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let mut config = MarketplaceConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            if let Some(base) = path.parent() {
                anchor_programs(&mut config.contract, base);
            }
            config
        }
        None => MarketplaceConfig::for_network(args.network.unwrap_or_default()),
    };

    if let Some(network) = args.network {
        config.network.network_type = network;
    }
    if let Some(url) = &args.node_url {
        config.network.node_url = Some(url.clone());
    }
    if let Some(url) = &args.indexer_url {
        config.network.indexer_url = Some(url.clone());
    }
    config.validate().context("invalid configuration")?;
    debug!(network = %config.network.network_type, "configuration resolved");
    Ok(config)
}

fn anchor_programs(contract: &mut ContractConfig, base: &Path) {
    let anchor = |path: &PathBuf| {
        if path.is_relative() {
            base.join(path)
        } else {
            path.clone()
        }
    };
    contract.approval_program = anchor(&contract.approval_program);
    contract.clear_program = anchor(&contract.clear_program);
}

/// Reads the contract program sources named by the configuration.
pub fn load_programs(contract: &ContractConfig) -> Result<ContractPrograms> {
    let read = |path: &Path| {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read contract program {}", path.display()))
    };
    Ok(ContractPrograms::new(
        read(&contract.approval_program)?,
        read(&contract.clear_program)?,
    ))
}

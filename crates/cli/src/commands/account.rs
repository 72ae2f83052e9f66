//! Account commands.

use super::{CommandContext, CommandResult};
use crate::console;
use anyhow::anyhow;
use bookmarket_core::{format_units, Address};
use bookmarket_wallets::KeyPair;
use serde::Serialize;

#[derive(Serialize)]
struct Balance {
    address: Address,
    amount: u64,
}

#[derive(Serialize)]
struct GeneratedKey {
    address: Address,
    secret_key: String,
}

pub async fn balance(context: &CommandContext, address: Option<Address>) -> CommandResult {
    let address = address
        .or(context.account_opt())
        .ok_or_else(|| anyhow!("no address given and no signing key configured"))?;
    let amount = context.market().balance(&address).await?;
    if context.json() {
        return console::json(&Balance { address, amount });
    }
    Ok(format!("{address}: {}", format_units(amount)))
}

/// Generates a key pair; nothing is stored.
pub fn keygen(json: bool) -> CommandResult {
    let key = KeyPair::generate();
    let generated = GeneratedKey {
        address: key.address(),
        secret_key: key.secret_hex(),
    };
    if json {
        return console::json(&generated);
    }
    Ok(format!(
        "address:    {}\nsecret key: {}",
        generated.address, generated.secret_key
    ))
}

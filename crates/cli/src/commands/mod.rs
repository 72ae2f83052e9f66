//! Command dispatch.

pub mod account;
pub mod listing;

use crate::args::{CliArgs, Command};
use crate::config;
use anyhow::{anyhow, Context, Result};
use bookmarket_config::MarketplaceConfig;
use bookmarket_core::{format_units, Address};
use bookmarket_marketplace::{ContractPrograms, Marketplace};
use bookmarket_rpc_client::{HttpIndexerClient, HttpLedgerClient};
use bookmarket_transaction::Transaction;
use bookmarket_wallets::{KeyPair, LocalSigner};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

/// Rendered command output.
pub type CommandResult = Result<String>;

/// Everything a command needs.
pub struct CommandContext {
    market: Marketplace,
    account: Option<Address>,
    json: bool,
}

impl CommandContext {
    /// Wraps an assembled marketplace.
    pub fn new(market: Marketplace, account: Option<Address>, json: bool) -> Self {
        Self {
            market,
            account,
            json,
        }
    }

    /// Connects to the configured endpoints and loads the signing key.
    pub fn connect(args: &CliArgs, config: &MarketplaceConfig) -> Result<Self> {
        let ledger = HttpLedgerClient::from_config(&config.network)
            .context("failed to create ledger client")?;
        let indexer = HttpIndexerClient::from_config(&config.network)
            .context("failed to create indexer client")?;

        let mut signer = LocalSigner::new();
        let account = match &args.secret_key {
            Some(secret) => {
                let key = KeyPair::from_secret_hex(secret).context("invalid secret key")?;
                Some(signer.add_key(key))
            }
            None => None,
        };
        if !args.yes {
            signer = signer.with_approval(confirm_on_terminal);
        }

        let programs = if matches!(args.command, Command::Create { .. }) {
            config::load_programs(&config.contract)?
        } else {
            ContractPrograms::new(String::new(), String::new())
        };

        let market = Marketplace::new(
            config,
            Arc::new(ledger),
            Arc::new(indexer),
            Arc::new(signer),
            programs,
        );
        Ok(Self::new(market, account, args.json))
    }

    /// The marketplace.
    pub fn market(&self) -> &Marketplace {
        &self.market
    }

    /// Whether output is JSON.
    pub fn json(&self) -> bool {
        self.json
    }

    /// The acting account; required by write commands.
    pub fn account(&self) -> Result<Address> {
        self.account.ok_or_else(|| {
            anyhow!(
                "no signing key; pass --secret-key or set {}",
                crate::args::SECRET_KEY_ENV
            )
        })
    }

    /// The acting account, if a key was given.
    pub fn account_opt(&self) -> Option<Address> {
        self.account
    }
}

/// Runs one command.
pub async fn execute(context: &CommandContext, command: &Command) -> CommandResult {
    match command {
        Command::List => listing::list(context).await,
        Command::Show { app_id } => listing::show(context, *app_id).await,
        Command::Create {
            name,
            image,
            description,
            price,
        } => listing::create(context, name, image, description, price).await,
        Command::Buy { app_id, count } => listing::buy(context, *app_id, *count).await,
        Command::Like { app_id } => listing::like(context, *app_id).await,
        Command::Dislike { app_id } => listing::dislike(context, *app_id).await,
        Command::Delete { app_id } => listing::delete(context, *app_id).await,
        Command::Balance { address } => account::balance(context, *address).await,
        Command::Keygen => account::keygen(context.json()),
    }
}

/// Entry point used by the binary.
pub async fn run(args: CliArgs, config: MarketplaceConfig) -> CommandResult {
    if args.command == Command::Keygen {
        return account::keygen(args.json);
    }
    let context = CommandContext::connect(&args, &config)?;
    execute(&context, &args.command).await
}

/// Describes the batch on stderr and asks for a yes/no answer.
fn confirm_on_terminal(transactions: &[Transaction]) -> bool {
    let mut stderr = io::stderr();
    let _ = writeln!(stderr, "About to sign {} transaction(s):", transactions.len());
    for tx in transactions {
        let _ = writeln!(stderr, "  {}", describe(tx));
    }
    let _ = write!(stderr, "Sign? [y/N] ");
    let _ = stderr.flush();

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}

fn describe(tx: &Transaction) -> String {
    match (tx.payment(), tx.application_call()) {
        (Some((receiver, amount)), _) => {
            format!("pay {} to {receiver}", format_units(amount))
        }
        (None, Some(call)) => match call.app_id {
            Some(app_id) => format!("call listing {app_id} ({:?})", call.on_complete),
            None => "create listing".to_string(),
        },
        (None, None) => "transaction".to_string(),
    }
}

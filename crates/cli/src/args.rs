use bookmarket_config::NetworkType;
use bookmarket_core::{AppId, Address};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Environment variable holding the hex-encoded signing key.
pub const SECRET_KEY_ENV: &str = "BOOKMARKET_SECRET_KEY";

/// Command-line arguments for the bookmarket client.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bookmarket",
    version = env!("CARGO_PKG_VERSION"),
    about = "Bookmarket - buy and sell books on the ledger",
    long_about = "Bookmarket lists, creates, buys, rates and deletes book listings held by the marketplace contract. Write operations are signed with a local ed25519 key."
)]
pub struct CliArgs {
    /// Specifies the config file
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Network whose default endpoints are used when no config file is given
    #[arg(long = "network", value_name = "NETWORK", global = true)]
    pub network: Option<NetworkType>,

    /// Overrides the ledger node URL
    #[arg(long = "node-url", value_name = "URL", global = true)]
    pub node_url: Option<String>,

    /// Overrides the indexer URL
    #[arg(long = "indexer-url", value_name = "URL", global = true)]
    pub indexer_url: Option<String>,

    /// Hex-encoded ed25519 secret key of the acting account
    #[arg(
        long = "secret-key",
        env = SECRET_KEY_ENV,
        value_name = "HEX",
        hide_env_values = true,
        global = true
    )]
    pub secret_key: Option<String>,

    /// Sign without asking for confirmation
    #[arg(short = 'y', long = "yes", global = true)]
    pub yes: bool,

    /// Print results as JSON
    #[arg(long = "json", global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Marketplace commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List active listings
    List,

    /// Show one listing
    Show {
        /// Listing id
        app_id: AppId,
    },

    /// Create a listing owned by the acting account
    Create {
        /// Title
        #[arg(long)]
        name: String,
        /// Cover image URL
        #[arg(long, default_value = "")]
        image: String,
        /// Description
        #[arg(long, default_value = "")]
        description: String,
        /// Unit price in whole units, e.g. 2.5
        #[arg(long)]
        price: String,
    },

    /// Buy copies of a listing
    Buy {
        /// Listing id
        app_id: AppId,
        /// Number of copies
        #[arg(long, default_value_t = 1)]
        count: u64,
    },

    /// Like a listing
    Like {
        /// Listing id
        app_id: AppId,
    },

    /// Dislike a listing
    Dislike {
        /// Listing id
        app_id: AppId,
    },

    /// Delete a listing you own
    Delete {
        /// Listing id
        app_id: AppId,
    },

    /// Show an account balance
    Balance {
        /// Account; the acting account when omitted
        address: Option<Address>,
    },

    /// Generate a new signing key
    Keygen,
}

impl Command {
    /// Whether the command submits transactions.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Command::Create { .. }
                | Command::Buy { .. }
                | Command::Like { .. }
                | Command::Dislike { .. }
                | Command::Delete { .. }
        )
    }
}

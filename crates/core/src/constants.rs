//! Ledger limits and the fixed interface of the marketplace contract.

/// Maximum bytes of a single global-state key plus its value.
pub const MAX_KEY_VALUE_BYTES: usize = 128;

/// Maximum combined bytes of all application call arguments.
pub const MAX_APP_ARGS_TOTAL_BYTES: usize = 2048;

/// Maximum number of application call arguments.
pub const MAX_APP_ARGS: usize = 16;

/// Maximum note size on a transaction.
pub const MAX_NOTE_BYTES: usize = 1024;

/// Maximum number of transactions in one atomic group.
pub const MAX_GROUP_SIZE: usize = 16;

/// Largest unit count accepted for a single purchase.
pub const MAX_PURCHASE_COUNT: u64 = 10;

/// Base units per whole currency unit.
pub const MICRO_UNITS_PER_UNIT: u64 = 1_000_000;

/// Global-state field names written by the marketplace contract.
pub mod fields {
    /// Book title (bytes).
    pub const NAME: &str = "NAME";
    /// Cover image URI (bytes).
    pub const IMAGE: &str = "IMAGE";
    /// Free-text description (bytes).
    pub const DESCRIPTION: &str = "DESCRIPTION";
    /// Unit price (uint).
    pub const PRICE: &str = "PRICE";
    /// Units sold (uint).
    pub const SOLD: &str = "SOLD";
    /// Like counter (uint).
    pub const LIKES: &str = "Likes";
    /// Dislike counter (uint).
    pub const DISLIKES: &str = "dislikes";
}

/// First application argument selecting the contract method.
pub mod methods {
    /// Purchase; followed by the 8-byte unit count.
    pub const BUY: &str = "buy";
    /// Increment the like counter.
    pub const LIKES: &str = "likes";
    /// Increment the dislike counter.
    pub const DISLIKES: &str = "dislikes";
}

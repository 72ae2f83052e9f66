//! Book listing model.

use crate::address::Address;
use crate::codec::{check_field_size, GlobalState};
use crate::constants::{fields, MICRO_UNITS_PER_UNIT};
use crate::error::{CodecError, CoreError, CoreResult};
use crate::identifiers::AppId;
use serde::{Deserialize, Serialize};

/// A marketplace listing as reconstructed from ledger state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Title.
    pub name: String,
    /// Cover image URI.
    pub image: String,
    /// Free-text description.
    pub description: String,
    /// Unit price in base units.
    pub price: u64,
    /// Units sold so far.
    pub sold: u64,
    /// Like counter.
    pub likes: u64,
    /// Dislike counter.
    pub dislikes: u64,
    /// Ledger-assigned application id.
    pub app_id: AppId,
    /// Creator and seller.
    pub owner: Address,
}

impl Book {
    /// Materializes a listing from an application's decoded global state.
    ///
    /// Absent fields take their zero value; a field of the wrong storage type
    /// or with undecodable bytes is an error.
    pub fn from_state(
        app_id: AppId,
        owner: Address,
        state: &GlobalState,
    ) -> Result<Self, CodecError> {
        Ok(Self {
            name: state.text(fields::NAME)?,
            image: state.text(fields::IMAGE)?,
            description: state.text(fields::DESCRIPTION)?,
            price: state.uint(fields::PRICE)?,
            sold: state.uint(fields::SOLD)?,
            likes: state.uint(fields::LIKES)?,
            dislikes: state.uint(fields::DISLIKES)?,
            app_id,
            owner,
        })
    }

    /// Whether `address` created this listing and may delete it.
    pub fn is_owned_by(&self, address: &Address) -> bool {
        self.owner == *address
    }

    /// Price of `count` units.
    pub fn total_price(&self, count: u64) -> CoreResult<u64> {
        self.price
            .checked_mul(count)
            .ok_or(CoreError::AmountOverflow {
                price: self.price,
                count,
            })
    }
}

/// Input for creating a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    /// Title.
    pub name: String,
    /// Cover image URI.
    pub image: String,
    /// Free-text description.
    pub description: String,
    /// Unit price in base units.
    pub price: u64,
}

impl NewBook {
    /// Creates a listing input.
    pub fn new(
        name: impl Into<String>,
        image: impl Into<String>,
        description: impl Into<String>,
        price: u64,
    ) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            description: description.into(),
            price,
        }
    }

    /// Checks the input against the contract's creation rules and the
    /// ledger's storage limits.
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::InvalidListing("name must not be empty".to_string()));
        }
        if self.price == 0 {
            return Err(CoreError::InvalidListing("price must be positive".to_string()));
        }
        check_field_size(fields::NAME, self.name.len())?;
        check_field_size(fields::IMAGE, self.image.len())?;
        check_field_size(fields::DESCRIPTION, self.description.len())?;
        Ok(())
    }
}

/// Renders a base-unit amount in whole units, trimming trailing zeros.
pub fn format_units(amount: u64) -> String {
    let whole = amount / MICRO_UNITS_PER_UNIT;
    let fraction = amount % MICRO_UNITS_PER_UNIT;
    if fraction == 0 {
        return whole.to_string();
    }
    let digits = format!("{fraction:06}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

/// Parses a whole-unit amount such as `"2.5"` into base units.
pub fn parse_units(text: &str) -> CoreResult<u64> {
    let invalid = || CoreError::InvalidAmount(text.to_string());
    let text = text.trim();
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !digits(whole) || !digits(fraction) || fraction.len() > 6 {
        return Err(invalid());
    }
    let whole: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };
    let fraction: u64 = format!("{fraction:0<6}").parse().map_err(|_| invalid())?;
    whole
        .checked_mul(MICRO_UNITS_PER_UNIT)
        .and_then(|base| base.checked_add(fraction))
        .ok_or_else(invalid)
}

//! Output rendering.

use anyhow::{Context, Result};
use bookmarket_core::{format_units, Book};
use bookmarket_marketplace::{Confirmation, ErrorKind, ListingSync, MarketplaceError};
use serde::Serialize;
use std::fmt::Write;

/// Pretty JSON.
pub fn json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to render JSON")
}

/// One line per listing, followed by any listings that could not be read.
pub fn listings(sync: &ListingSync) -> String {
    if sync.books.is_empty() && sync.failures.is_empty() {
        return "no listings".to_string();
    }
    let mut out = String::new();
    for book in &sync.books {
        let _ = writeln!(
            out,
            "{:>10}  {:<32}  {:>12}  sold {:<4} +{} -{}",
            book.app_id,
            truncate(&book.name, 32),
            format_units(book.price),
            book.sold,
            book.likes,
            book.dislikes
        );
    }
    for failure in &sync.failures {
        let _ = writeln!(out, "{:>10}  <unreadable: {}>", failure.app_id, failure.error);
    }
    out.trim_end().to_string()
}

/// Full listing details.
pub fn book(book: &Book) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "id:          {}", book.app_id);
    let _ = writeln!(out, "name:        {}", book.name);
    let _ = writeln!(out, "image:       {}", book.image);
    let _ = writeln!(out, "description: {}", book.description);
    let _ = writeln!(out, "price:       {}", format_units(book.price));
    let _ = writeln!(out, "sold:        {}", book.sold);
    let _ = writeln!(out, "likes:       {}", book.likes);
    let _ = writeln!(out, "dislikes:    {}", book.dislikes);
    let _ = write!(out, "owner:       {}", book.owner);
    out
}

/// Summary of a confirmed operation.
pub fn confirmation(action: &str, confirmation: &Confirmation) -> String {
    format!(
        "{action} confirmed in round {} (tx {})",
        confirmation.confirmed_round, confirmation.tx_id
    )
}

/// Message shown for a failed command.
pub fn error_message(error: &anyhow::Error) -> String {
    let Some(marketplace) = error.downcast_ref::<MarketplaceError>() else {
        return format!("{error:#}");
    };
    match marketplace.kind() {
        ErrorKind::SigningRefused => "cancelled by signer".to_string(),
        ErrorKind::Connectivity => format!("could not reach the ledger: {marketplace}"),
        ErrorKind::ConfirmationTimeout => {
            format!("{marketplace}; it may still be confirmed later")
        }
        ErrorKind::Rejected => format!("the ledger refused the operation: {marketplace}"),
        ErrorKind::NotOwner => format!("only the owner can do that: {marketplace}"),
        ErrorKind::Encoding | ErrorKind::InvalidInput | ErrorKind::Signing => {
            marketplace.to_string()
        }
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

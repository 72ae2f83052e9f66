//! Listing commands.

use super::{CommandContext, CommandResult};
use crate::console;
use anyhow::anyhow;
use bookmarket_core::{format_units, parse_units, AppId, Book, NewBook};
use bookmarket_marketplace::Confirmation;
use serde::Serialize;

#[derive(Serialize)]
struct Created {
    app_id: AppId,
}

#[derive(Serialize)]
struct Done<'a> {
    action: &'a str,
    app_id: AppId,
    #[serde(flatten)]
    confirmation: &'a Confirmation,
}

pub async fn list(context: &CommandContext) -> CommandResult {
    let sync = context.market().sync_books().await?;
    if context.json() {
        return console::json(&sync);
    }
    Ok(console::listings(&sync))
}

pub async fn show(context: &CommandContext, app_id: AppId) -> CommandResult {
    let book = fetch(context, app_id).await?;
    if context.json() {
        return console::json(&book);
    }
    Ok(console::book(&book))
}

pub async fn create(
    context: &CommandContext,
    name: &str,
    image: &str,
    description: &str,
    price: &str,
) -> CommandResult {
    let sender = context.account()?;
    let price = parse_units(price)?;
    let app_id = context
        .market()
        .create_book(sender, NewBook::new(name, image, description, price))
        .await?;
    if context.json() {
        return console::json(&Created { app_id });
    }
    Ok(format!(
        "created listing {app_id}: {name} at {}",
        format_units(price)
    ))
}

pub async fn buy(context: &CommandContext, app_id: AppId, count: u64) -> CommandResult {
    let sender = context.account()?;
    let book = fetch(context, app_id).await?;
    let confirmation = context.market().buy_book(sender, &book, count).await?;
    let action = format!(
        "purchase of {count} x {} for {}",
        book.name,
        format_units(book.price.saturating_mul(count))
    );
    finish(context, &action, app_id, &confirmation)
}

pub async fn like(context: &CommandContext, app_id: AppId) -> CommandResult {
    let sender = context.account()?;
    let book = fetch(context, app_id).await?;
    let confirmation = context.market().like_book(sender, &book).await?;
    finish(context, "like", app_id, &confirmation)
}

pub async fn dislike(context: &CommandContext, app_id: AppId) -> CommandResult {
    let sender = context.account()?;
    let book = fetch(context, app_id).await?;
    let confirmation = context.market().dislike_book(sender, &book).await?;
    finish(context, "dislike", app_id, &confirmation)
}

pub async fn delete(context: &CommandContext, app_id: AppId) -> CommandResult {
    let sender = context.account()?;
    let book = fetch(context, app_id).await?;
    let confirmation = context.market().delete_book(sender, &book).await?;
    finish(context, "deletion", app_id, &confirmation)
}

async fn fetch(context: &CommandContext, app_id: AppId) -> anyhow::Result<Book> {
    context
        .market()
        .get_book(app_id)
        .await?
        .ok_or_else(|| anyhow!("listing {app_id} not found"))
}

fn finish(
    context: &CommandContext,
    action: &str,
    app_id: AppId,
    confirmation: &Confirmation,
) -> CommandResult {
    if context.json() {
        return console::json(&Done {
            action,
            app_id,
            confirmation,
        });
    }
    Ok(console::confirmation(action, confirmation))
}

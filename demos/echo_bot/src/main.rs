//! Echo Bot Example
//!
//! Exercises every kind of registration:
//!
//! - commands: `/start`, `/repeat <text>`, `/ping`, `/dice`, `/pages`, `/hide`
//! - exact text: `hello`
//! - exact callback data: `close`
//! - callback payload prefix: `page_`
//!
//! # Usage
//!
//! ```bash
//! TELEBOT_BOT__TOKEN=123456:ABC cargo run --package echo-bot
//! cargo run --package echo-bot -- --config telebot.toml --profile production
//! ```

use std::future::Future;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use telebot::prelude::*;

#[derive(Debug, Parser)]
#[command(about = "Telebot echo bot demo")]
struct Args {
    /// Configuration file; searched in the current directory when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Configuration profile.
    #[arg(short, long)]
    profile: Option<String>,
}

const PAGES: u32 = 3;

/// Adapts `f(bot, update)` into a handler closure owning a clone of `bot`.
fn with_bot<F, Fut>(bot: &Bot, f: F) -> impl Fn(Arc<Update>) -> Fut + Send + Sync + 'static
where
    F: Fn(Bot, Arc<Update>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ApiResult<()>> + Send + 'static,
{
    let bot = bot.clone();
    move |update| f(bot.clone(), update)
}

fn pages_keyboard(current: u32) -> InlineKeyboardMarkup {
    let buttons = (1..=PAGES)
        .map(|page| {
            let label = if page == current {
                format!("· {page} ·")
            } else {
                page.to_string()
            };
            InlineKeyboardButton::new(label, format!("page_{page}"))
        })
        .collect();

    InlineKeyboardMarkup::new()
        .row(buttons)
        .row(vec![InlineKeyboardButton::new("Close", "close")])
}

// ============================================================================
// Handlers
// ============================================================================

async fn start(bot: Bot, update: Arc<Update>) -> ApiResult<()> {
    let Some(chat_id) = update.chat_id() else {
        return Ok(());
    };
    let name = update
        .sender()
        .and_then(|u| u.username.as_deref())
        .unwrap_or("there");

    let keyboard = ReplyKeyboardMarkup::new()
        .row(["/ping", "/dice"])
        .row(["/pages", "hello"])
        .resize(true);

    bot.send_reply_keyboard_markup_text_message(
        chat_id,
        &format!("Hi {name}! Try the buttons below, or /repeat something."),
        &keyboard,
        SendMessageOptions::default(),
    )
    .await?;
    Ok(())
}

async fn repeat(bot: Bot, update: Arc<Update>) -> ApiResult<()> {
    let (Some(chat_id), Some(text)) = (update.chat_id(), update.text()) else {
        return Ok(());
    };

    // The dispatcher hands over the full text; drop the command token here.
    let payload = text.split_once(' ').map(|(_, rest)| rest.trim()).unwrap_or("");
    if payload.is_empty() {
        bot.send_text_message(chat_id, "Usage: /repeat <text>", SendMessageOptions::default())
            .await?;
        return Ok(());
    }

    let message_id = update.message.as_ref().map(|m| m.message_id).unwrap_or_default();
    bot.send_text_message(chat_id, payload, SendMessageOptions::new().reply_to(message_id))
        .await?;
    Ok(())
}

async fn ping(bot: Bot, update: Arc<Update>) -> ApiResult<()> {
    if let Some(chat_id) = update.chat_id() {
        bot.send_text_message(chat_id, "*Pong!*", SendMessageOptions::new().parse_mode(ParseMode::Markdown))
            .await?;
    }
    Ok(())
}

async fn dice(bot: Bot, update: Arc<Update>) -> ApiResult<()> {
    if let Some(chat_id) = update.chat_id() {
        bot.send_random_dice(chat_id, SendMessageOptions::default())
            .await?;
    }
    Ok(())
}

async fn pages(bot: Bot, update: Arc<Update>) -> ApiResult<()> {
    if let Some(chat_id) = update.chat_id() {
        bot.send_inline_keyboard_markup_text_message(
            chat_id,
            "Page 1",
            &pages_keyboard(1),
            SendMessageOptions::default(),
        )
        .await?;
    }
    Ok(())
}

async fn hide(bot: Bot, update: Arc<Update>) -> ApiResult<()> {
    if let Some(chat_id) = update.chat_id() {
        bot.send_reply_keyboard_remove_text_message(
            chat_id,
            "Keyboard removed.",
            false,
            SendMessageOptions::default(),
        )
        .await?;
    }
    Ok(())
}

async fn hello(bot: Bot, update: Arc<Update>) -> ApiResult<()> {
    if let Some(chat_id) = update.chat_id() {
        bot.send_text_message(chat_id, "Hello to you too!", SendMessageOptions::default())
            .await?;
    }
    Ok(())
}

async fn turn_page(bot: Bot, update: Arc<Update>) -> ApiResult<()> {
    let Some(query) = update.callback_query.as_ref() else {
        return Ok(());
    };

    let page = query
        .data
        .strip_prefix("page_")
        .and_then(|n| n.parse::<u32>().ok())
        .filter(|n| (1..=PAGES).contains(n));
    let Some(page) = page else {
        bot.answer_callback_query_notification(&query.id, "Unknown page", true)
            .await?;
        return Ok(());
    };

    bot.edit_inline_keyboard_text_message(
        query.message.chat.id,
        query.message.message_id,
        &format!("Page {page}"),
        &pages_keyboard(page),
        SendMessageOptions::default(),
    )
    .await?;
    bot.answer_callback_query(&query.id).await?;
    Ok(())
}

async fn close(bot: Bot, update: Arc<Update>) -> ApiResult<()> {
    let Some(query) = update.callback_query.as_ref() else {
        return Ok(());
    };

    bot.delete_message(query.message.chat.id, query.message.message_id)
        .await?;
    bot.answer_callback_query_notification(&query.id, "Closed", false)
        .await?;
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut builder = BotRuntime::builder();
    if let Some(path) = &args.config {
        builder = builder.config_file(path);
    }
    if let Some(profile) = &args.profile {
        builder = builder.profile(profile);
    }
    let runtime = builder.build()?;

    let bot = runtime.bot().clone();
    let registry = runtime.registry();

    registry.on_command("/start", "Show the welcome keyboard", with_bot(&bot, start));
    registry.on_command("/repeat", "Repeat the text after the command", with_bot(&bot, repeat));
    registry.on_command("/ping", "Check the bot is alive", with_bot(&bot, ping));
    registry.on_command("/dice", "Roll a random dice", with_bot(&bot, dice));
    registry.on_command("/pages", "Browse pages with inline buttons", with_bot(&bot, pages));
    registry.on_command("/hide", "Remove the reply keyboard", with_bot(&bot, hide));
    registry.on_text("hello", with_bot(&bot, hello));
    registry.on_callback("close", with_bot(&bot, close));
    registry.on_payload("page_", with_bot(&bot, turn_page));

    // An empty prefix matches every callback.
    registry.on_payload("", |update: Arc<Update>| async move {
        info!(update_id = update.update_id, data = ?update.callback_data(), "Callback received");
    });

    if let Err(e) = runtime.set_commands().await {
        warn!(error = %e, "Failed to publish the command list");
    }

    runtime.run().await?;
    Ok(())
}

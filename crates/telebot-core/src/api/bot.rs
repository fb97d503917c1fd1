//! Typed API surface.
//!
//! [`Bot`] turns each remote method into a strongly-typed async call. It holds
//! an `Arc<dyn ApiCaller>` and is unaware of the transport in use, so handlers
//! can capture a clone of it cheaply:
//!
//! ```rust,ignore
//! let bot = runtime.bot();
//! runtime.registry().on_command("/ping", "Check the bot is alive", move |update: Arc<Update>| {
//!     let bot = bot.clone();
//!     async move {
//!         let chat_id = update.chat_id().unwrap_or_default();
//!         bot.send_text_message(chat_id, "pong", SendMessageOptions::default()).await?;
//!         Ok::<_, ApiError>(())
//!     }
//! });
//! ```

use std::sync::Arc;

use rand::seq::SliceRandom;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};

use crate::api::caller::{ApiCaller, Endpoint, FormParams};
use crate::error::ApiResult;
use crate::model::{
    ApiResponse, BotCommand, InlineKeyboardMarkup, Message, ReplyKeyboardMarkup,
    ReplyKeyboardRemove, SendMessageOptions, Update,
};

/// Emojis accepted by `sendDice`. The platform defaults to the first one.
pub const DICE_EMOJIS: [&str; 6] = ["🎲", "🎯", "🏀", "⚽", "🎳", "🎰"];

/// Handle for calling the remote bot API.
#[derive(Clone)]
pub struct Bot {
    caller: Arc<dyn ApiCaller>,
}

impl Bot {
    /// Creates a bot over the given caller.
    pub fn new(caller: Arc<dyn ApiCaller>) -> Self {
        Self { caller }
    }

    /// Calls `endpoint` and returns the `result` of a successful reply.
    ///
    /// # Errors
    /// Transport failures, undecodable bodies and `ok: false` replies.
    pub async fn call_api(&self, endpoint: Endpoint, form: FormParams) -> ApiResult<Value> {
        debug!(endpoint = %endpoint, fields = form.len(), "Calling API");

        let body = self.caller.call(endpoint, form).await?;
        trace!(endpoint = %endpoint, body = %body, "API response");

        let response: ApiResponse<Value> = serde_json::from_str(&body)?;
        response.into_result()
    }

    /// Like [`call_api`](Self::call_api), decoding the result into `T`.
    pub async fn call_api_as<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        form: FormParams,
    ) -> ApiResult<T> {
        let value = self.call_api(endpoint, form).await?;
        Ok(serde_json::from_value(value)?)
    }

    // =========================================================================
    // Update retrieval
    // =========================================================================

    /// Fetches the updates with an identifier of at least `offset`.
    pub async fn get_updates(&self, offset: i64) -> ApiResult<Vec<Update>> {
        let form = FormParams::new().field("offset", offset);
        self.call_api_as(Endpoint::GetUpdates, form).await
    }

    /// Subscribes `url` to receive updates by push.
    pub async fn set_webhook(&self, url: &str, ip_address: Option<&str>) -> ApiResult<bool> {
        let form = FormParams::new()
            .field("url", url)
            .field_opt("ip_address", ip_address);
        self.call_api_as(Endpoint::SetWebhook, form).await
    }

    /// Removes any webhook subscription so that polling works.
    pub async fn delete_webhook(&self) -> ApiResult<bool> {
        self.call_api_as(Endpoint::DeleteWebhook, FormParams::new())
            .await
    }

    // =========================================================================
    // Messages
    // =========================================================================

    /// Common fields of the `sendMessage` family.
    fn send_form(chat_id: i64, text: &str, options: &SendMessageOptions) -> FormParams {
        FormParams::new()
            .field("chat_id", chat_id)
            .field("text", text)
            .field("disable_web_page_preview", options.disable_web_page_preview)
            .field("disable_notification", options.disable_notification)
            .field(
                "allow_sending_without_reply",
                options.allow_sending_without_reply,
            )
            .field_opt("parse_mode", options.parse_mode)
            .field_opt("reply_to_message_id", options.reply_to_message_id)
    }

    /// Common fields of the `editMessageText` family.
    fn edit_form(
        chat_id: i64,
        message_id: i64,
        text: &str,
        options: &SendMessageOptions,
    ) -> FormParams {
        FormParams::new()
            .field("chat_id", chat_id)
            .field("message_id", message_id)
            .field("text", text)
            .field("disable_web_page_preview", options.disable_web_page_preview)
            .field_opt("parse_mode", options.parse_mode)
    }

    /// Sends `text` to `chat_id`.
    pub async fn send_text_message(
        &self,
        chat_id: i64,
        text: &str,
        options: SendMessageOptions,
    ) -> ApiResult<Message> {
        let form = Self::send_form(chat_id, text, &options);
        self.call_api_as(Endpoint::SendMessage, form).await
    }

    /// Sends `text` together with a custom reply keyboard.
    pub async fn send_reply_keyboard_markup_text_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: &ReplyKeyboardMarkup,
        options: SendMessageOptions,
    ) -> ApiResult<Message> {
        let form = Self::send_form(chat_id, text, &options).json("reply_markup", keyboard)?;
        self.call_api_as(Endpoint::SendMessage, form).await
    }

    /// Sends `text` and removes the custom reply keyboard.
    pub async fn send_reply_keyboard_remove_text_message(
        &self,
        chat_id: i64,
        text: &str,
        selective: bool,
        options: SendMessageOptions,
    ) -> ApiResult<Message> {
        let form = Self::send_form(chat_id, text, &options)
            .json("reply_markup", &ReplyKeyboardRemove::new(selective))?;
        self.call_api_as(Endpoint::SendMessage, form).await
    }

    /// Sends `text` with an inline keyboard attached.
    pub async fn send_inline_keyboard_markup_text_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: &InlineKeyboardMarkup,
        options: SendMessageOptions,
    ) -> ApiResult<Message> {
        let form = Self::send_form(chat_id, text, &options).json("reply_markup", keyboard)?;
        self.call_api_as(Endpoint::SendMessage, form).await
    }

    /// Replaces the text of a message.
    pub async fn edit_text_message(
        &self,
        chat_id: i64,
        message_id: i64,
        new_text: &str,
        options: SendMessageOptions,
    ) -> ApiResult<Message> {
        let form = Self::edit_form(chat_id, message_id, new_text, &options);
        self.call_api_as(Endpoint::EditMessageText, form).await
    }

    /// Replaces the text and the inline keyboard of a message.
    pub async fn edit_inline_keyboard_text_message(
        &self,
        chat_id: i64,
        message_id: i64,
        new_text: &str,
        keyboard: &InlineKeyboardMarkup,
        options: SendMessageOptions,
    ) -> ApiResult<Message> {
        let form = Self::edit_form(chat_id, message_id, new_text, &options)
            .json("reply_markup", keyboard)?;
        self.call_api_as(Endpoint::EditMessageText, form).await
    }

    /// Replaces only the inline keyboard of a message.
    pub async fn edit_message_inline_keyboard_markup(
        &self,
        chat_id: i64,
        message_id: i64,
        keyboard: &InlineKeyboardMarkup,
    ) -> ApiResult<Message> {
        let form = FormParams::new()
            .field("chat_id", chat_id)
            .field("message_id", message_id)
            .json("reply_markup", keyboard)?;
        self.call_api_as(Endpoint::EditMessageReplyMarkup, form)
            .await
    }

    /// Deletes a message.
    pub async fn delete_message(&self, chat_id: i64, message_id: i64) -> ApiResult<bool> {
        let form = FormParams::new()
            .field("chat_id", chat_id)
            .field("message_id", message_id);
        self.call_api_as(Endpoint::DeleteMessage, form).await
    }

    // =========================================================================
    // Dice
    // =========================================================================

    /// Sends the default dice.
    pub async fn send_dice(&self, chat_id: i64, options: SendMessageOptions) -> ApiResult<Message> {
        self.send_dice_emoji(chat_id, None, options).await
    }

    /// Sends a dice with one of the [`DICE_EMOJIS`] chosen at random.
    pub async fn send_random_dice(
        &self,
        chat_id: i64,
        options: SendMessageOptions,
    ) -> ApiResult<Message> {
        let emoji = DICE_EMOJIS.choose(&mut rand::thread_rng()).copied();
        self.send_dice_emoji(chat_id, emoji, options).await
    }

    /// Sends an animated emoji with a random value. `None` lets the platform
    /// pick its default.
    pub async fn send_dice_emoji(
        &self,
        chat_id: i64,
        emoji: Option<&str>,
        options: SendMessageOptions,
    ) -> ApiResult<Message> {
        let form = FormParams::new()
            .field("chat_id", chat_id)
            .field("disable_notification", options.disable_notification)
            .field(
                "allow_sending_without_reply",
                options.allow_sending_without_reply,
            )
            .field_opt("emoji", emoji.filter(|e| !e.is_empty()))
            .field_opt("reply_to_message_id", options.reply_to_message_id);
        self.call_api_as(Endpoint::SendDice, form).await
    }

    // =========================================================================
    // Callback queries
    // =========================================================================

    /// Acknowledges a callback query without showing anything.
    pub async fn answer_callback_query(&self, callback_query_id: &str) -> ApiResult<bool> {
        let form = FormParams::new().field("callback_query_id", callback_query_id);
        self.call_api_as(Endpoint::AnswerCallbackQuery, form).await
    }

    /// Acknowledges a callback query with a notification, or an alert when
    /// `show_alert` is set.
    pub async fn answer_callback_query_notification(
        &self,
        callback_query_id: &str,
        text: &str,
        show_alert: bool,
    ) -> ApiResult<bool> {
        let form = FormParams::new()
            .field("callback_query_id", callback_query_id)
            .field("text", text)
            .field("show_alert", show_alert);
        self.call_api_as(Endpoint::AnswerCallbackQuery, form).await
    }

    // =========================================================================
    // Chat administration
    // =========================================================================

    /// Removes a user from a group.
    pub async fn kick_chat_member(&self, chat_id: i64, user_id: i64) -> ApiResult<bool> {
        let form = FormParams::new()
            .field("chat_id", chat_id)
            .field("user_id", user_id);
        self.call_api_as(Endpoint::BanChatMember, form).await
    }

    /// Lifts a previous kick.
    pub async fn unban_chat_member(&self, chat_id: i64, user_id: i64) -> ApiResult<bool> {
        let form = FormParams::new()
            .field("chat_id", chat_id)
            .field("user_id", user_id);
        self.call_api_as(Endpoint::UnbanChatMember, form).await
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Publishes the command menu. An empty slice clears it.
    pub async fn set_commands(&self, commands: &[BotCommand]) -> ApiResult<bool> {
        let form = FormParams::new().json("commands", commands)?;
        self.call_api_as(Endpoint::SetMyCommands, form).await
    }
}

impl std::fmt::Debug for Bot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bot").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::RecordingCaller;
    use crate::error::{ApiError, TransportError};
    use crate::model::{InlineKeyboardButton, ParseMode};

    fn bot_with(caller: &Arc<RecordingCaller>) -> Bot {
        Bot::new(Arc::clone(caller) as Arc<dyn ApiCaller>)
    }

    const SENT: &str = r#"{"ok":true,"result":{"message_id":99,"chat":{"id":42},"text":"hi"}}"#;

    #[tokio::test]
    async fn test_send_text_message_fields() {
        let caller = Arc::new(RecordingCaller::new());
        caller.reply(SENT);
        let bot = bot_with(&caller);

        let msg = bot
            .send_text_message(42, "hi", SendMessageOptions::default())
            .await
            .unwrap();
        assert_eq!(msg.message_id, 99);

        let (endpoint, form) = caller.last_call().unwrap();
        assert_eq!(endpoint, Endpoint::SendMessage);
        assert_eq!(form.get("chat_id"), Some("42"));
        assert_eq!(form.get("text"), Some("hi"));
        assert_eq!(form.get("disable_web_page_preview"), Some("false"));
        assert_eq!(form.get("disable_notification"), Some("false"));
        assert_eq!(form.get("allow_sending_without_reply"), Some("false"));
        assert_eq!(form.get("parse_mode"), None);
        assert_eq!(form.get("reply_to_message_id"), None);
    }

    #[tokio::test]
    async fn test_send_options_are_forwarded() {
        let caller = Arc::new(RecordingCaller::new());
        caller.reply(SENT);
        let bot = bot_with(&caller);

        let options = SendMessageOptions::new()
            .parse_mode(ParseMode::Html)
            .reply_to(5)
            .disable_notification(true);
        bot.send_text_message(42, "<b>hi</b>", options).await.unwrap();

        let (_, form) = caller.last_call().unwrap();
        assert_eq!(form.get("parse_mode"), Some("HTML"));
        assert_eq!(form.get("reply_to_message_id"), Some("5"));
        assert_eq!(form.get("disable_notification"), Some("true"));
    }

    #[tokio::test]
    async fn test_inline_keyboard_is_json_encoded() {
        let caller = Arc::new(RecordingCaller::new());
        caller.reply(SENT);
        let bot = bot_with(&caller);

        let keyboard =
            InlineKeyboardMarkup::new().row(vec![InlineKeyboardButton::new("Next", "page_2")]);
        bot.send_inline_keyboard_markup_text_message(
            42,
            "Pick",
            &keyboard,
            SendMessageOptions::default(),
        )
        .await
        .unwrap();

        let (_, form) = caller.last_call().unwrap();
        assert_eq!(
            form.get("reply_markup"),
            Some(r#"{"inline_keyboard":[[{"text":"Next","callback_data":"page_2"}]]}"#)
        );
    }

    #[tokio::test]
    async fn test_keyboard_remove() {
        let caller = Arc::new(RecordingCaller::new());
        caller.reply(SENT);
        let bot = bot_with(&caller);

        bot.send_reply_keyboard_remove_text_message(42, "bye", true, SendMessageOptions::default())
            .await
            .unwrap();

        let (_, form) = caller.last_call().unwrap();
        assert_eq!(
            form.get("reply_markup"),
            Some(r#"{"remove_keyboard":true,"selective":true}"#)
        );
    }

    #[tokio::test]
    async fn test_edit_message_fields() {
        let caller = Arc::new(RecordingCaller::new());
        caller.reply(SENT);
        let bot = bot_with(&caller);

        bot.edit_text_message(42, 7, "edited", SendMessageOptions::default())
            .await
            .unwrap();

        let (endpoint, form) = caller.last_call().unwrap();
        assert_eq!(endpoint, Endpoint::EditMessageText);
        assert_eq!(form.get("message_id"), Some("7"));
        assert_eq!(form.get("text"), Some("edited"));
        assert_eq!(form.get("disable_notification"), None);
    }

    #[tokio::test]
    async fn test_dice_emoji() {
        let caller = Arc::new(RecordingCaller::new());
        caller.reply(SENT).reply(SENT);
        let bot = bot_with(&caller);

        bot.send_dice(1, SendMessageOptions::default()).await.unwrap();
        let (endpoint, form) = caller.last_call().unwrap();
        assert_eq!(endpoint, Endpoint::SendDice);
        assert_eq!(form.get("emoji"), None);

        bot.send_random_dice(1, SendMessageOptions::default())
            .await
            .unwrap();
        let (_, form) = caller.last_call().unwrap();
        let emoji = form.get("emoji").unwrap();
        assert!(DICE_EMOJIS.contains(&emoji));
    }

    #[tokio::test]
    async fn test_answer_callback_notification() {
        let caller = Arc::new(RecordingCaller::new());
        let bot = bot_with(&caller);

        assert!(
            bot.answer_callback_query_notification("cb-1", "Done", true)
                .await
                .unwrap()
        );
        let (endpoint, form) = caller.last_call().unwrap();
        assert_eq!(endpoint, Endpoint::AnswerCallbackQuery);
        assert_eq!(form.get("show_alert"), Some("true"));
    }

    #[tokio::test]
    async fn test_chat_administration() {
        let caller = Arc::new(RecordingCaller::new());
        let bot = bot_with(&caller);

        bot.kick_chat_member(-100, 7).await.unwrap();
        bot.unban_chat_member(-100, 7).await.unwrap();

        let calls = caller.calls();
        assert_eq!(calls[0].0, Endpoint::BanChatMember);
        assert_eq!(calls[1].0, Endpoint::UnbanChatMember);
        assert_eq!(calls[1].1.get("user_id"), Some("7"));
    }

    #[tokio::test]
    async fn test_set_commands() {
        let caller = Arc::new(RecordingCaller::new());
        let bot = bot_with(&caller);

        bot.set_commands(&[]).await.unwrap();
        assert_eq!(caller.last_call().unwrap().1.get("commands"), Some("[]"));

        let commands = vec![BotCommand::from_filter("/start", "Start the bot").unwrap()];
        bot.set_commands(&commands).await.unwrap();
        assert_eq!(
            caller.last_call().unwrap().1.get("commands"),
            Some(r#"[{"command":"start","description":"Start the bot"}]"#)
        );
    }

    #[tokio::test]
    async fn test_get_updates_offset() {
        let caller = Arc::new(RecordingCaller::new());
        caller.reply(r#"{"ok":true,"result":[{"update_id":10},{"update_id":11}]}"#);
        let bot = bot_with(&caller);

        let updates = bot.get_updates(10).await.unwrap();
        assert_eq!(updates.len(), 2);

        let (endpoint, form) = caller.last_call().unwrap();
        assert_eq!(endpoint, Endpoint::GetUpdates);
        assert_eq!(form.get("offset"), Some("10"));
    }

    #[tokio::test]
    async fn test_error_taxonomy() {
        let caller = Arc::new(RecordingCaller::new());
        caller
            .reply_with(Err(TransportError::RequestFailed {
                endpoint: "getUpdates".into(),
                reason: "connection refused".into(),
            }))
            .reply("<html>bad gateway</html>")
            .reply(r#"{"ok":false,"error_code":401,"description":"Unauthorized"}"#);
        let bot = bot_with(&caller);

        assert!(matches!(
            bot.get_updates(0).await,
            Err(ApiError::Transport(_))
        ));
        assert!(matches!(bot.get_updates(0).await, Err(ApiError::Decode(_))));
        assert!(matches!(
            bot.get_updates(0).await,
            Err(ApiError::NotOk {
                error_code: Some(401),
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_set_webhook_ip_address() {
        let caller = Arc::new(RecordingCaller::new());
        let bot = bot_with(&caller);

        bot.set_webhook("https://example.com/hook/TOKEN", None)
            .await
            .unwrap();
        let (_, form) = caller.last_call().unwrap();
        assert_eq!(form.get("url"), Some("https://example.com/hook/TOKEN"));
        assert_eq!(form.get("ip_address"), None);

        bot.set_webhook("https://example.com/hook/TOKEN", Some("1.2.3.4"))
            .await
            .unwrap();
        let (_, form) = caller.last_call().unwrap();
        assert_eq!(form.get("ip_address"), Some("1.2.3.4"));
    }
}

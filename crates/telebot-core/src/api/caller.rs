//! The outbound call abstraction.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{ApiError, ApiResult, TransportResult};

/// Remote API methods used by the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    GetUpdates,
    SetWebhook,
    DeleteWebhook,
    SendMessage,
    EditMessageText,
    EditMessageReplyMarkup,
    DeleteMessage,
    SendDice,
    AnswerCallbackQuery,
    /// Formerly `kickChatMember`.
    BanChatMember,
    UnbanChatMember,
    SetMyCommands,
}

impl Endpoint {
    /// Method name as it appears in the request path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetUpdates => "getUpdates",
            Self::SetWebhook => "setWebhook",
            Self::DeleteWebhook => "deleteWebhook",
            Self::SendMessage => "sendMessage",
            Self::EditMessageText => "editMessageText",
            Self::EditMessageReplyMarkup => "editMessageReplyMarkup",
            Self::DeleteMessage => "deleteMessage",
            Self::SendDice => "sendDice",
            Self::AnswerCallbackQuery => "answerCallbackQuery",
            Self::BanChatMember => "banChatMember",
            Self::UnbanChatMember => "unbanChatMember",
            Self::SetMyCommands => "setMyCommands",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// URL-encoded form fields of one request, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormParams {
    fields: Vec<(&'static str, String)>,
}

impl FormParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field. Booleans render as `true`/`false`, integers in decimal.
    pub fn field(mut self, key: &'static str, value: impl ToString) -> Self {
        self.fields.push((key, value.to_string()));
        self
    }

    /// Appends a field only when `value` is present.
    pub fn field_opt<V: ToString>(self, key: &'static str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.field(key, v),
            None => self,
        }
    }

    /// Appends a field holding `value` serialized as compact JSON.
    pub fn json<T: Serialize + ?Sized>(self, key: &'static str, value: &T) -> ApiResult<Self> {
        let encoded = serde_json::to_string(value).map_err(|e| ApiError::Encode {
            field: key.to_string(),
            reason: e.to_string(),
        })?;
        Ok(self.field(key, encoded))
    }

    /// Returns the value of the first field named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns all fields as key/value pairs.
    pub fn as_pairs(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Posts a form to `<base>/<endpoint>` and returns the raw response body.
///
/// The reqwest-backed implementation lives in `telebot-transport`; tests use
/// in-memory doubles.
#[async_trait]
pub trait ApiCaller: Send + Sync {
    /// Performs one call.
    ///
    /// # Errors
    /// Returns a [`TransportError`](crate::TransportError) when no response
    /// body could be obtained. A body reporting `ok: false` is still `Ok`.
    async fn call(&self, endpoint: Endpoint, form: FormParams) -> TransportResult<String>;
}

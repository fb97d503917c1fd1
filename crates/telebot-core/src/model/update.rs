//! Incoming update objects.
//!
//! Only the part of the remote objects the library actually reads is modelled.
//! Unknown fields are ignored and missing ones fall back to their defaults, so
//! an update the platform extends later still decodes.

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

/// A user account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    #[serde(default)]
    pub id: i64,
    /// Public username, when the user has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// A chat (private, group or channel).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    /// Unique chat identifier.
    #[serde(default)]
    pub id: i64,
}

/// A message posted in a chat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Identifier of the message inside its chat.
    #[serde(default)]
    pub message_id: i64,
    /// Text content; empty for non-text messages.
    #[serde(default)]
    pub text: String,
    /// Sender.
    #[serde(default)]
    pub from: User,
    /// Chat the message belongs to.
    #[serde(default)]
    pub chat: Chat,
}

/// A press on an inline keyboard button.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackQuery {
    /// Identifier used to answer the query.
    #[serde(default)]
    pub id: String,
    /// User who pressed the button.
    #[serde(default)]
    pub from: User,
    /// Message carrying the keyboard.
    #[serde(default)]
    pub message: Message,
    /// Opaque `callback_data` of the pressed button.
    #[serde(default)]
    pub data: String,
}

/// One incoming event.
///
/// `update_id` grows monotonically and doubles as the polling cursor. In
/// practice exactly one of `message` / `callback_query` is populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    /// Update identifier.
    pub update_id: i64,
    /// New incoming message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    /// New incoming callback query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_query: Option<CallbackQuery>,
}

impl Update {
    /// Decodes a single update from a JSON body (webhook payload).
    pub fn from_slice(body: &[u8]) -> ApiResult<Self> {
        serde_json::from_slice(body).map_err(ApiError::from)
    }

    /// Returns the message text, if the update carries a non-empty one.
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_ref()
            .map(|m| m.text.as_str())
            .filter(|t| !t.is_empty())
    }

    /// Returns the callback data, if the update carries a non-empty one.
    pub fn callback_data(&self) -> Option<&str> {
        self.callback_query
            .as_ref()
            .map(|q| q.data.as_str())
            .filter(|d| !d.is_empty())
    }

    /// Returns the chat the update originates from.
    ///
    /// For callback queries this is the chat of the message carrying the keyboard.
    pub fn chat_id(&self) -> Option<i64> {
        self.message
            .as_ref()
            .map(|m| m.chat.id)
            .or_else(|| self.callback_query.as_ref().map(|q| q.message.chat.id))
    }

    /// Returns the user who triggered the update.
    pub fn sender(&self) -> Option<&User> {
        self.message
            .as_ref()
            .map(|m| &m.from)
            .or_else(|| self.callback_query.as_ref().map(|q| &q.from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_text_message() {
        let raw = br#"{"update_id":5,"message":{"message_id":1,"text":"/ping","from":{"id":7,"username":"a"},"chat":{"id":42}}}"#;
        let update = Update::from_slice(raw).unwrap();

        assert_eq!(update.update_id, 5);
        assert_eq!(update.text(), Some("/ping"));
        assert_eq!(update.callback_data(), None);
        assert_eq!(update.chat_id(), Some(42));
        assert_eq!(update.sender().and_then(|u| u.username.as_deref()), Some("a"));
    }

    #[test]
    fn test_decode_callback_query() {
        let raw = br#"{
            "update_id": 9,
            "callback_query": {
                "id": "cb-1",
                "from": {"id": 3},
                "message": {"message_id": 11, "chat": {"id": -100}},
                "data": "page_2",
                "chat_instance": "ignored"
            }
        }"#;
        let update = Update::from_slice(raw).unwrap();

        assert_eq!(update.text(), None);
        assert_eq!(update.callback_data(), Some("page_2"));
        assert_eq!(update.chat_id(), Some(-100));
        assert_eq!(update.sender().map(|u| u.id), Some(3));
    }

    #[test]
    fn test_empty_text_is_not_populated() {
        let raw = br#"{"update_id":1,"message":{"message_id":1,"chat":{"id":1}}}"#;
        let update = Update::from_slice(raw).unwrap();
        assert!(update.message.is_some());
        assert_eq!(update.text(), None);
    }

    #[test]
    fn test_malformed_body() {
        assert!(matches!(
            Update::from_slice(b"{\"update_id\":"),
            Err(ApiError::Decode(_))
        ));
    }
}

//! Reply markup objects sent in the `reply_markup` form field.

use serde::{Deserialize, Serialize};

/// One button of a custom reply keyboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardButton {
    /// Text sent as a message when the button is pressed.
    pub text: String,
}

impl KeyboardButton {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A custom keyboard replacing the user's keyboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyKeyboardMarkup {
    /// Rows of buttons.
    pub keyboard: Vec<Vec<KeyboardButton>>,
    /// Ask clients to resize the keyboard vertically.
    pub resize_keyboard: bool,
    /// Hide the keyboard once it has been used.
    pub one_time_keyboard: bool,
    /// Show the keyboard to specific users only.
    pub selective: bool,
}

impl ReplyKeyboardMarkup {
    /// Creates an empty keyboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row of text buttons.
    pub fn row<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keyboard
            .push(labels.into_iter().map(KeyboardButton::new).collect());
        self
    }

    pub fn resize(mut self, resize: bool) -> Self {
        self.resize_keyboard = resize;
        self
    }

    pub fn one_time(mut self, one_time: bool) -> Self {
        self.one_time_keyboard = one_time;
        self
    }

    pub fn selective(mut self, selective: bool) -> Self {
        self.selective = selective;
        self
    }
}

/// Removes a previously sent custom keyboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyKeyboardRemove {
    /// Always `true`.
    pub remove_keyboard: bool,
    /// Remove the keyboard for specific users only.
    pub selective: bool,
}

impl ReplyKeyboardRemove {
    pub fn new(selective: bool) -> Self {
        Self {
            remove_keyboard: true,
            selective,
        }
    }
}

/// One button of an inline keyboard.
///
/// Pressing it produces a callback query whose `data` equals `callback_data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineKeyboardButton {
    /// Label.
    pub text: String,
    /// Data echoed back in the callback query.
    pub callback_data: String,
}

impl InlineKeyboardButton {
    pub fn new(text: impl Into<String>, callback_data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: callback_data.into(),
        }
    }
}

/// A keyboard attached to a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineKeyboardMarkup {
    /// Rows of buttons.
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row of buttons.
    pub fn row(mut self, buttons: Vec<InlineKeyboardButton>) -> Self {
        self.inline_keyboard.push(buttons);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reply_keyboard_shape() {
        let kb = ReplyKeyboardMarkup::new()
            .row(["Yes", "No"])
            .resize(true)
            .one_time(true);

        assert_eq!(
            serde_json::to_value(&kb).unwrap(),
            json!({
                "keyboard": [[{"text": "Yes"}, {"text": "No"}]],
                "resize_keyboard": true,
                "one_time_keyboard": true,
                "selective": false
            })
        );
    }

    #[test]
    fn test_inline_keyboard_shape() {
        let kb = InlineKeyboardMarkup::new().row(vec![
            InlineKeyboardButton::new("Prev", "page_1"),
            InlineKeyboardButton::new("Next", "page_3"),
        ]);

        assert_eq!(
            serde_json::to_value(&kb).unwrap(),
            json!({
                "inline_keyboard": [[
                    {"text": "Prev", "callback_data": "page_1"},
                    {"text": "Next", "callback_data": "page_3"}
                ]]
            })
        );
    }

    #[test]
    fn test_keyboard_remove_always_removes() {
        let remove = ReplyKeyboardRemove::new(false);
        assert!(remove.remove_keyboard);
    }
}

//! Wire-format types mirroring the remote API's JSON objects.

pub mod command;
pub mod keyboard;
pub mod options;
pub mod response;
pub mod update;

pub use command::{BotCommand, MIN_DESCRIPTION_LEN};
pub use keyboard::{
    InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, ReplyKeyboardMarkup,
    ReplyKeyboardRemove,
};
pub use options::{ParseMode, SendMessageOptions};
pub use response::ApiResponse;
pub use update::{CallbackQuery, Chat, Message, Update, User};

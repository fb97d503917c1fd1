//! Bot command descriptors published through `setMyCommands`.

use serde::{Deserialize, Serialize};

/// Descriptions shorter than this are rejected by the platform, so such
/// commands are never recorded.
pub const MIN_DESCRIPTION_LEN: usize = 3;

/// A command shown in the client's command menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotCommand {
    /// Command name without the leading `/`.
    pub command: String,
    /// Human-readable description.
    pub description: String,
}

impl BotCommand {
    /// Builds a descriptor from a command filter, or `None` when the
    /// description is too short to be published.
    pub fn from_filter(filter: &str, description: &str) -> Option<Self> {
        if description.chars().count() < MIN_DESCRIPTION_LEN {
            return None;
        }
        Some(Self {
            command: filter.trim_start_matches('/').to_string(),
            description: description.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_slash() {
        let cmd = BotCommand::from_filter("/start", "Start the bot").unwrap();
        assert_eq!(cmd.command, "start");

        let cmd = BotCommand::from_filter("help", "Show help").unwrap();
        assert_eq!(cmd.command, "help");
    }

    #[test]
    fn test_short_description_dropped() {
        assert!(BotCommand::from_filter("/x", "").is_none());
        assert!(BotCommand::from_filter("/x", "ab").is_none());
        assert!(BotCommand::from_filter("/x", "abc").is_some());
    }
}

//! Event kinds, their filter-matching rules, and update classification.
//!
//! Every [`EventKind`] carries its own comparison between a registered filter
//! and the discriminating value of an incoming [`Update`]:
//!
//! | Kind | Value | Rule |
//! |------|-------|------|
//! | [`EventKind::Text`] | message text | exact equality |
//! | [`EventKind::Command`] | message text | text starts with the filter, `/` prepended to the filter if missing |
//! | [`EventKind::CallbackExact`] | callback data | exact equality |
//! | [`EventKind::CallbackPrefix`] | callback data | data starts with the filter |

use crate::model::Update;

/// A closed category of dispatchable events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Message text equal to the filter.
    Text,
    /// Message text starting with the filter as a `/command` token.
    Command,
    /// Callback data equal to the filter.
    CallbackExact,
    /// Callback data starting with the filter (payload-carrying buttons).
    CallbackPrefix,
}

impl EventKind {
    /// All kinds, in classification order.
    pub const ALL: [EventKind; 4] = [
        Self::Command,
        Self::Text,
        Self::CallbackExact,
        Self::CallbackPrefix,
    ];

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Command => "command",
            Self::CallbackExact => "callback",
            Self::CallbackPrefix => "payload",
        }
    }

    /// Returns whether `filter`, registered under this kind, matches `value`.
    pub fn matches(&self, filter: &str, value: &str) -> bool {
        match self {
            Self::Text | Self::CallbackExact => filter == value,
            Self::Command => {
                let token = filter.strip_prefix('/').unwrap_or(filter);
                value
                    .strip_prefix('/')
                    .is_some_and(|rest| rest.starts_with(token))
            }
            Self::CallbackPrefix => value.starts_with(filter),
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Determines which kinds `update` is eligible for, with the value each
/// kind's filters are compared against.
///
/// A non-empty message text yields `Command` and `Text`; otherwise non-empty
/// callback data yields `CallbackExact` and `CallbackPrefix`. Anything else
/// yields nothing and is silently dropped by the dispatcher.
pub fn classify(update: &Update) -> Vec<(EventKind, &str)> {
    if let Some(text) = update.text() {
        vec![(EventKind::Command, text), (EventKind::Text, text)]
    } else if let Some(data) = update.callback_data() {
        vec![
            (EventKind::CallbackExact, data),
            (EventKind::CallbackPrefix, data),
        ]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CallbackQuery, Message};

    fn text_update(text: &str) -> Update {
        Update {
            update_id: 1,
            message: Some(Message {
                text: text.into(),
                ..Default::default()
            }),
            callback_query: None,
        }
    }

    fn callback_update(data: &str) -> Update {
        Update {
            update_id: 1,
            message: None,
            callback_query: Some(CallbackQuery {
                data: data.into(),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_command_prefix_match() {
        assert!(EventKind::Command.matches("/start", "/start now"));
        assert!(EventKind::Command.matches("/start", "/start"));
        assert!(!EventKind::Command.matches("/start", "start"));
        assert!(!EventKind::Command.matches("/start", "say /start"));
    }

    #[test]
    fn test_command_implicit_slash() {
        assert!(EventKind::Command.matches("start", "/start now"));
        assert!(!EventKind::Command.matches("start", "start now"));
    }

    #[test]
    fn test_text_requires_equality() {
        assert!(!EventKind::Text.matches("hello", "hello world"));
        assert!(EventKind::Text.matches("hello", "hello"));
    }

    #[test]
    fn test_callback_prefix() {
        assert!(EventKind::CallbackPrefix.matches("page_", "page_2"));
        assert!(!EventKind::CallbackPrefix.matches("page_", "pag_2"));
    }

    #[test]
    fn test_callback_exact() {
        assert!(EventKind::CallbackExact.matches("yes", "yes"));
        assert!(!EventKind::CallbackExact.matches("yes", "yes_please"));
    }

    #[test]
    fn test_classify_text() {
        let update = text_update("/ping");
        assert_eq!(
            classify(&update),
            vec![(EventKind::Command, "/ping"), (EventKind::Text, "/ping")]
        );
    }

    #[test]
    fn test_classify_callback() {
        let update = callback_update("page_2");
        assert_eq!(
            classify(&update),
            vec![
                (EventKind::CallbackExact, "page_2"),
                (EventKind::CallbackPrefix, "page_2")
            ]
        );
    }

    #[test]
    fn test_classify_nothing() {
        assert!(classify(&Update::default()).is_empty());
        assert!(classify(&text_update("")).is_empty());
        assert!(classify(&callback_update("")).is_empty());
    }

    #[test]
    fn test_text_takes_precedence() {
        let mut update = text_update("hi");
        update.callback_query = Some(CallbackQuery {
            data: "page_1".into(),
            ..Default::default()
        });
        let kinds: Vec<_> = classify(&update).into_iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![EventKind::Command, EventKind::Text]);
    }
}

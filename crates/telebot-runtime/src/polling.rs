//! Poll-mode update source.
//!
//! Each cycle sleeps for the configured interval, fetches the updates newer
//! than the cursor, dispatches them in arrival order and advances the cursor
//! past the last one. Fetch failures are logged and the cursor is kept, so the
//! next tick simply retries.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{Instrument, Level, debug, error, info, span, trace, warn};

use telebot_core::{ApiError, Bot, Dispatcher};

/// Drives the `getUpdates` loop.
pub struct Poller {
    bot: Bot,
    dispatcher: Dispatcher,
    interval: Duration,
    offset: i64,
}

impl Poller {
    pub fn new(bot: Bot, dispatcher: Dispatcher, interval: Duration) -> Self {
        Self {
            bot,
            dispatcher,
            interval,
            offset: 0,
        }
    }

    /// Starts from `offset` instead of 0.
    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    /// Current cursor: the lowest update id still to be fetched.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs one fetch/dispatch cycle without sleeping.
    ///
    /// Returns the number of updates dispatched.
    pub async fn poll_once(&mut self) -> usize {
        let updates = match self.bot.get_updates(self.offset).await {
            Ok(updates) => updates,
            Err(ApiError::NotOk {
                error_code,
                description,
            }) => {
                error!(
                    offset = self.offset,
                    ?error_code,
                    description = description.as_deref().unwrap_or(""),
                    "getUpdates rejected"
                );
                return 0;
            }
            Err(e) => {
                warn!(offset = self.offset, error = %e, "Failed to fetch updates");
                return 0;
            }
        };

        let Some(last_id) = updates.last().map(|u| u.update_id) else {
            trace!(offset = self.offset, "No new updates");
            return 0;
        };

        let count = updates.len();
        debug!(offset = self.offset, count, "Fetched updates");

        for update in updates {
            self.dispatcher.dispatch(update).await;
        }

        self.offset = last_id + 1;
        count
    }

    /// Polls until `cancel` fires. A cycle already in progress completes.
    ///
    /// Returns the final cursor.
    pub async fn run(mut self, cancel: CancellationToken) -> i64 {
        info!(interval_ms = self.interval.as_millis() as u64, "Polling for updates");

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }

            let span = span!(Level::TRACE, "poll", offset = self.offset);
            self.poll_once().instrument(span).await;
        }

        info!(offset = self.offset, "Polling stopped");
        self.offset
    }
}

impl std::fmt::Debug for Poller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poller")
            .field("interval", &self.interval)
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use parking_lot::Mutex;
    use telebot_core::api::mock::RecordingCaller;
    use telebot_core::{ApiCaller, Endpoint, EventKind, Registry, TransportError, Update};

    const BATCH: &str = r#"{"ok":true,"result":[
        {"update_id":10,"message":{"message_id":1,"text":"/start","chat":{"id":1}}},
        {"update_id":11,"message":{"message_id":2,"text":"hello","chat":{"id":1}}},
        {"update_id":12,"callback_query":{"id":"q","data":"page_2"}}
    ]}"#;

    /// Poller whose registry records the update ids it sees.
    fn poller(caller: &Arc<RecordingCaller>) -> (Poller, Arc<Mutex<Vec<i64>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let registry = Registry::new();
        for (kind, filter) in [
            (EventKind::Command, "/start"),
            (EventKind::Text, "hello"),
            (EventKind::CallbackPrefix, "page_"),
        ] {
            let s = Arc::clone(&seen);
            registry.register(kind, filter, move |update: Arc<Update>| {
                let s = Arc::clone(&s);
                async move { s.lock().push(update.update_id) }
            });
        }

        let bot = Bot::new(Arc::clone(caller) as Arc<dyn ApiCaller>);
        let dispatcher = Dispatcher::new(registry.into_shared());
        (
            Poller::new(bot, dispatcher, Duration::from_millis(1)),
            seen,
        )
    }

    #[tokio::test]
    async fn test_cursor_advances_past_batch() {
        let caller = Arc::new(RecordingCaller::new());
        caller.reply(BATCH);
        let (mut poller, seen) = poller(&caller);

        assert_eq!(poller.poll_once().await, 3);
        assert_eq!(poller.offset(), 13);
        assert_eq!(*seen.lock(), vec![10, 11, 12]);

        let (endpoint, form) = caller.last_call().unwrap();
        assert_eq!(endpoint, Endpoint::GetUpdates);
        assert_eq!(form.get("offset"), Some("0"));
    }

    #[tokio::test]
    async fn test_next_fetch_uses_advanced_cursor() {
        let caller = Arc::new(RecordingCaller::new());
        caller.reply(BATCH).reply(r#"{"ok":true,"result":[]}"#);
        let (mut poller, _seen) = poller(&caller);

        poller.poll_once().await;
        poller.poll_once().await;

        assert_eq!(caller.last_call().unwrap().1.get("offset"), Some("13"));
        assert_eq!(poller.offset(), 13);
    }

    #[tokio::test]
    async fn test_fetch_error_keeps_cursor() {
        let caller = Arc::new(RecordingCaller::new());
        caller.reply_with(Err(TransportError::RequestFailed {
            endpoint: "getUpdates".into(),
            reason: "connection refused".into(),
        }));
        let (poller, seen) = poller(&caller);
        let mut poller = poller.with_offset(7);

        assert_eq!(poller.poll_once().await, 0);
        assert_eq!(poller.offset(), 7);
        assert!(seen.lock().is_empty());
    }

    #[tokio::test]
    async fn test_not_ok_keeps_cursor() {
        let caller = Arc::new(RecordingCaller::new());
        caller.reply(r#"{"ok":false,"error_code":409,"description":"Conflict"}"#);
        let (poller, _seen) = poller(&caller);
        let mut poller = poller.with_offset(7);

        assert_eq!(poller.poll_once().await, 0);
        assert_eq!(poller.offset(), 7);
    }

    #[tokio::test]
    async fn test_decode_error_keeps_cursor() {
        let caller = Arc::new(RecordingCaller::new());
        caller.reply("<html>bad gateway</html>");
        let (poller, _seen) = poller(&caller);
        let mut poller = poller.with_offset(7);

        assert_eq!(poller.poll_once().await, 0);
        assert_eq!(poller.offset(), 7);
    }

    #[tokio::test]
    async fn test_empty_batch_keeps_cursor() {
        let caller = Arc::new(RecordingCaller::new());
        caller.reply(r#"{"ok":true,"result":[]}"#);
        let (poller, _seen) = poller(&caller);
        let mut poller = poller.with_offset(7);

        assert_eq!(poller.poll_once().await, 0);
        assert_eq!(poller.offset(), 7);
    }

    #[tokio::test]
    async fn test_run_stops_on_cancel() {
        let caller = Arc::new(RecordingCaller::new());
        caller.reply(BATCH);
        let (poller, seen) = poller(&caller);

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(poller.run(cancel.clone()));

        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();

        let offset = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(offset, 13);
        assert_eq!(*seen.lock(), vec![10, 11, 12]);
        assert!(caller.calls().len() >= 2);
    }

    #[tokio::test]
    async fn test_run_cancelled_before_first_tick() {
        let caller = Arc::new(RecordingCaller::new());
        let (poller, _seen) = poller(&caller);

        let cancel = CancellationToken::new();
        cancel.cancel();

        assert_eq!(poller.run(cancel).await, 0);
        assert!(caller.calls().is_empty());
    }
}

//! Text generation usage accounting.
//!
//! Token counts are an estimate (four characters per token), not the
//! provider's billing figures.

use serde::Serialize;
use tokio::sync::watch;

/// Running totals since the tracker was created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    pub calls: u64,
    pub tokens: u64,
}

/// Owned by the application and shared with whoever generates text.
pub struct UsageTracker {
    tx: watch::Sender<UsageStats>,
}

impl UsageTracker {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(UsageStats::default());
        Self { tx }
    }

    /// Count one successful generation
    pub fn record(&self, prompt: &str, reply: &str) {
        let tokens = estimate_tokens(prompt) + estimate_tokens(reply);
        self.tx.send_modify(|stats| {
            stats.calls += 1;
            stats.tokens += tokens;
        });
        tracing::debug!(tokens, "Recorded text generation usage");
    }

    pub fn snapshot(&self) -> UsageStats {
        *self.tx.borrow()
    }

    /// The receiver sees the current totals immediately. Drop it to unsubscribe.
    pub fn subscribe(&self) -> watch::Receiver<UsageStats> {
        self.tx.subscribe()
    }
}

impl Default for UsageTracker {
    fn default() -> Self {
        Self::new()
    }
}

fn estimate_tokens(text: &str) -> u64 {
    (text.chars().count() as u64).div_ceil(4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_estimate_rounds_up() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abc"), 1);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
    }

    #[test]
    fn record_accumulates_calls_and_tokens() {
        let tracker = UsageTracker::new();
        tracker.record("12345", "1234");
        tracker.record("", "123456789");
        assert_eq!(
            tracker.snapshot(),
            UsageStats {
                calls: 2,
                tokens: 2 + 1 + 3
            }
        );
    }

    #[tokio::test]
    async fn subscriber_sees_current_value_and_updates() {
        let tracker = UsageTracker::new();
        tracker.record("abcd", "abcd");

        let mut rx = tracker.subscribe();
        assert_eq!(rx.borrow().calls, 1);

        tracker.record("abcd", "");
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), UsageStats { calls: 2, tokens: 3 });
    }

    #[test]
    fn dropped_subscriber_does_not_block_recording() {
        let tracker = UsageTracker::new();
        drop(tracker.subscribe());
        tracker.record("a", "b");
        assert_eq!(tracker.snapshot().calls, 1);
    }
}

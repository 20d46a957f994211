//! The selective-receive mailbox.

// Layer 1: Standard library imports
use std::collections::VecDeque;
use std::time::Duration;

// Layer 2: Third-party crate imports
use parking_lot::Mutex;
use tokio::sync::Notify;

// Layer 3: Internal module imports
use crate::message::Value;
use crate::shape::Pattern;

/// A FIFO buffer of delivered messages with pattern-filtered extraction.
///
/// Push is non-blocking and callable from any task. Extraction scans the
/// queue in insertion order and removes the first message conforming to one
/// of the given patterns; when several patterns match the same message, the
/// earliest pattern in the argument list wins. Messages that match nothing
/// stay queued in their original order, which is what makes Erlang-style
/// selective receive work: later receives with different patterns still see
/// them.
///
/// Exactly one task extracts at a time (the owning actor); the queue
/// interior is a mutex solely to synchronize with concurrent pushes.
#[derive(Debug, Default)]
pub struct Mailbox {
    queue: Mutex<VecDeque<Value>>,
    arrival: Notify,
}

impl Mailbox {
    /// Create an empty mailbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and wake the owner if it is suspended in a receive.
    pub fn push(&self, message: Value) {
        self.queue.lock().push_back(message);
        self.arrival.notify_one();
    }

    /// Number of queued messages.
    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    /// True when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    /// Extract the first message matching one of `patterns`, waiting for new
    /// arrivals as long as necessary. An empty pattern slice matches any
    /// message. Returns the index of the winning pattern and the message.
    pub async fn pop_matching(&self, patterns: &[Pattern]) -> (usize, Value) {
        loop {
            // Register interest before scanning so a push that lands between
            // the scan and the await still wakes us.
            let arrival = self.arrival.notified();
            if let Some(hit) = self.try_pop_matching(patterns) {
                return hit;
            }
            arrival.await;
        }
    }

    /// Like [`pop_matching`](Self::pop_matching), giving up after `timeout`.
    /// A zero timeout is an immediate probe of the current queue contents.
    /// The queue is unmodified when `None` is returned.
    pub async fn pop_matching_timeout(
        &self,
        patterns: &[Pattern],
        timeout: Duration,
    ) -> Option<(usize, Value)> {
        tokio::time::timeout(timeout, self.pop_matching(patterns))
            .await
            .ok()
    }

    /// One synchronous scan of the queue; never suspends.
    pub fn try_pop_matching(&self, patterns: &[Pattern]) -> Option<(usize, Value)> {
        let mut queue = self.queue.lock();
        for position in 0..queue.len() {
            let matched = if patterns.is_empty() {
                Some(0)
            } else {
                patterns
                    .iter()
                    .position(|pattern| pattern.matches(&queue[position]))
            };
            if let Some(index) = matched {
                // Position is in range; remove cannot miss.
                let message = queue.remove(position)?;
                return Some((index, message));
            }
        }
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Instant;

    #[tokio::test]
    async fn test_push_then_pop_any() {
        let mailbox = Mailbox::new();
        mailbox.push(Value::from(1));

        let (index, message) = mailbox.pop_matching(&[]).await;
        assert_eq!(index, 0);
        assert_eq!(message, Value::Int(1));
        assert!(mailbox.is_empty());
    }

    #[tokio::test]
    async fn test_fifo_order_for_one_pattern() {
        let mailbox = Mailbox::new();
        mailbox.push(Value::from(1));
        mailbox.push(Value::from(2));
        mailbox.push(Value::from(3));

        let patterns = [Pattern::Integer];
        assert_eq!(mailbox.pop_matching(&patterns).await.1, Value::Int(1));
        assert_eq!(mailbox.pop_matching(&patterns).await.1, Value::Int(2));
        assert_eq!(mailbox.pop_matching(&patterns).await.1, Value::Int(3));
    }

    #[tokio::test]
    async fn test_selective_receive_preserves_skipped_order() {
        let mailbox = Mailbox::new();
        mailbox.push(Value::from("a"));
        mailbox.push(Value::from("b"));
        mailbox.push(Value::from("c"));

        let (_, message) = mailbox.pop_matching(&[Pattern::eq("c")]).await;
        assert_eq!(message, Value::from("c"));

        // The two skipped messages are still there, in order.
        assert_eq!(mailbox.pop_matching(&[]).await.1, Value::from("a"));
        assert_eq!(mailbox.pop_matching(&[]).await.1, Value::from("b"));
    }

    #[tokio::test]
    async fn test_earlier_pattern_wins_ties() {
        let mailbox = Mailbox::new();
        mailbox.push(Value::from(7));

        let patterns = [Pattern::Number, Pattern::Integer];
        let (index, _) = mailbox.pop_matching(&patterns).await;
        assert_eq!(index, 0);
    }

    #[tokio::test]
    async fn test_message_order_beats_pattern_order() {
        let mailbox = Mailbox::new();
        mailbox.push(Value::from("later-pattern"));
        mailbox.push(Value::from("earlier-pattern"));

        // The first queued message wins even though it matches the second
        // pattern in the list.
        let patterns = [Pattern::eq("earlier-pattern"), Pattern::eq("later-pattern")];
        let (index, message) = mailbox.pop_matching(&patterns).await;
        assert_eq!(index, 1);
        assert_eq!(message, Value::from("later-pattern"));
    }

    #[tokio::test]
    async fn test_zero_timeout_probe() {
        let mailbox = Mailbox::new();
        assert!(mailbox
            .pop_matching_timeout(&[], Duration::ZERO)
            .await
            .is_none());

        mailbox.push(Value::Null);
        assert!(mailbox
            .pop_matching_timeout(&[], Duration::ZERO)
            .await
            .is_some());
    }

    #[tokio::test]
    async fn test_timeout_leaves_queue_unmodified() {
        let mailbox = Mailbox::new();
        mailbox.push(Value::from("unmatched"));

        let outcome = mailbox
            .pop_matching_timeout(&[Pattern::Integer], Duration::from_millis(20))
            .await;
        assert!(outcome.is_none());
        assert_eq!(mailbox.len(), 1);
    }

    #[tokio::test]
    async fn test_blocked_receive_wakes_on_push() {
        let mailbox = Arc::new(Mailbox::new());
        let pusher = Arc::clone(&mailbox);

        let started = Instant::now();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(30)).await;
            pusher.push(Value::from("late"));
        });

        let (_, message) = mailbox.pop_matching(&[Pattern::String]).await;
        assert_eq!(message, Value::from("late"));
        assert!(started.elapsed() >= Duration::from_millis(25));
    }

    #[tokio::test]
    async fn test_push_skips_non_matching_wakeup() {
        let mailbox = Arc::new(Mailbox::new());
        let pusher = Arc::clone(&mailbox);

        tokio::spawn(async move {
            pusher.push(Value::from("noise"));
            tokio::time::sleep(Duration::from_millis(20)).await;
            pusher.push(Value::from(42));
        });

        let (_, message) = mailbox.pop_matching(&[Pattern::Integer]).await;
        assert_eq!(message, Value::Int(42));
        // The non-matching message is still queued.
        assert_eq!(mailbox.len(), 1);
    }
}

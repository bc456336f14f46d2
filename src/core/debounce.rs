//! Debounced query updates
//!
//! The search box feeds a keystroke stream; issuing one listing query per
//! keystroke would hammer the store. [`QueryDebouncer`] enforces the
//! contract: at most one emitted update per idle interval after the last
//! input, carrying only the latest value.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

/// Input handle for a debounced value stream.
///
/// Dropping the handle closes the stream; a value still pending at that
/// point is flushed before the output channel closes.
pub struct QueryDebouncer<T> {
    input: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> QueryDebouncer<T> {
    /// Spawn the debounce task. Returns the input handle and the receiver
    /// on which settled values arrive.
    pub fn new(idle: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (input_tx, mut input_rx) = mpsc::unbounded_channel::<T>();
        let (output_tx, output_rx) = mpsc::unbounded_channel::<T>();

        tokio::spawn(async move {
            let mut pending: Option<T> = None;
            let mut deadline = Instant::now();

            loop {
                tokio::select! {
                    received = input_rx.recv() => match received {
                        Some(value) => {
                            pending = Some(value);
                            deadline = Instant::now() + idle;
                        }
                        None => {
                            if let Some(value) = pending.take() {
                                let _ = output_tx.send(value);
                            }
                            break;
                        }
                    },
                    _ = sleep_until(deadline), if pending.is_some() => {
                        if let Some(value) = pending.take() {
                            if output_tx.send(value).is_err() {
                                break;
                            }
                        }
                    }
                }
            }
        });

        (Self { input: input_tx }, output_rx)
    }

    /// Submit a new value, resetting the idle timer.
    /// Returns false when the debounce task has shut down.
    pub fn submit(&self, value: T) -> bool {
        self.input.send(value).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_burst_emits_only_latest_value() {
        let (debouncer, mut out) = QueryDebouncer::new(Duration::from_millis(300));

        debouncer.submit("l");
        debouncer.submit("le");
        debouncer.submit("lee");
        tokio::time::advance(Duration::from_millis(301)).await;

        assert_eq!(out.recv().await, Some("lee"));
        assert!(out.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_input_resets_the_idle_timer() {
        let (debouncer, mut out) = QueryDebouncer::new(Duration::from_millis(300));

        debouncer.submit("a");
        tokio::time::advance(Duration::from_millis(200)).await;
        debouncer.submit("ab");
        tokio::time::advance(Duration::from_millis(200)).await;

        // 400ms of wall time, but never 300ms idle: nothing emitted yet
        assert!(out.try_recv().is_err());

        tokio::time::advance(Duration::from_millis(101)).await;
        assert_eq!(out.recv().await, Some("ab"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_inputs_emit_separately() {
        let (debouncer, mut out) = QueryDebouncer::new(Duration::from_millis(300));

        debouncer.submit("first");
        tokio::time::advance(Duration::from_millis(301)).await;
        assert_eq!(out.recv().await, Some("first"));

        debouncer.submit("second");
        tokio::time::advance(Duration::from_millis(301)).await;
        assert_eq!(out.recv().await, Some("second"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_flushes_pending_value() {
        let (debouncer, mut out) = QueryDebouncer::new(Duration::from_millis(300));

        debouncer.submit("pending");
        drop(debouncer);

        assert_eq!(out.recv().await, Some("pending"));
        assert_eq!(out.recv().await, None);
    }
}

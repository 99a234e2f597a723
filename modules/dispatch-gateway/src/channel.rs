//! EventChannel implementations.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use crate::traits::{Dispatchable, Envelope, EventChannel};

// ---------------------------------------------------------------------------
// RecordingChannel (tests, captures instead of delivering)
// ---------------------------------------------------------------------------

/// A submission as seen by [`RecordingChannel`].
#[derive(Debug, Clone)]
pub struct Recorded {
    pub seq: u64,
    pub ts: DateTime<Utc>,
    pub envelope: Envelope,
}

/// In-memory channel that records every submission and delivers nothing.
/// Thread-safe. Assertion helpers panic with a readable message.
#[derive(Debug, Default)]
pub struct RecordingChannel {
    next_seq: AtomicU64,
    submissions: Mutex<Vec<Recorded>>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything submitted so far, in submission order.
    pub fn submissions(&self) -> Vec<Recorded> {
        self.lock().clone()
    }

    /// Every submitted instance of `E`, in submission order.
    pub fn dispatched<E: Dispatchable>(&self) -> Vec<Arc<E>> {
        self.lock()
            .iter()
            .filter_map(|r| r.envelope.downcast::<E>())
            .collect()
    }

    /// Envelopes carrying an `E` (to inspect the route as well).
    pub fn envelopes<E: Dispatchable>(&self) -> Vec<Envelope> {
        self.lock()
            .iter()
            .filter(|r| r.envelope.is::<E>())
            .map(|r| r.envelope.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Panics unless some submitted `E` satisfies `predicate`.
    pub fn assert_dispatched<E: Dispatchable>(&self, predicate: impl Fn(&E) -> bool) {
        let matched = self
            .lock()
            .iter()
            .filter_map(|r| r.envelope.downcast_ref::<E>())
            .any(predicate);
        assert!(
            matched,
            "expected {} to be dispatched matching the predicate",
            E::event_type()
        );
    }

    /// Panics unless exactly `times` instances of `E` were submitted.
    pub fn assert_dispatched_times<E: Dispatchable>(&self, times: usize) {
        let count = self.envelopes::<E>().len();
        assert_eq!(
            count,
            times,
            "expected {} to be dispatched {times} time(s), was {count}",
            E::event_type()
        );
    }

    /// Panics if any `E` was submitted.
    pub fn assert_not_dispatched<E: Dispatchable>(&self) {
        let count = self.envelopes::<E>().len();
        assert!(
            count == 0,
            "expected {} not to be dispatched, was dispatched {count} time(s)",
            E::event_type()
        );
    }

    /// Panics if anything at all was submitted.
    pub fn assert_nothing_dispatched(&self) {
        let submissions = self.lock();
        assert!(
            submissions.is_empty(),
            "expected no submissions, found {:?}",
            submissions
                .iter()
                .map(|r| r.envelope.event_type())
                .collect::<Vec<_>>()
        );
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Recorded>> {
        // Recover from poisoning left by a failed assertion.
        self.submissions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl EventChannel for RecordingChannel {
    fn submit(&self, envelope: Envelope) -> Result<()> {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.lock().push(Recorded {
            seq,
            ts: Utc::now(),
            envelope,
        });
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// QueuedChannel (hands envelopes to an async consumer)
// ---------------------------------------------------------------------------

/// Channel that enqueues envelopes for a consumer task.
///
/// Submission never blocks. Once the receiver is dropped every submission
/// fails.
#[derive(Debug, Clone)]
pub struct QueuedChannel {
    tx: mpsc::UnboundedSender<Envelope>,
}

impl QueuedChannel {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Envelope>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl EventChannel for QueuedChannel {
    fn submit(&self, envelope: Envelope) -> Result<()> {
        self.tx
            .send(envelope)
            .map_err(|err| anyhow!("event queue closed, dropped {}", err.0.event_type()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Route;
    use dispatch_args::{Binding, Signature};

    #[derive(Debug, PartialEq)]
    struct Tick;

    impl Dispatchable for Tick {
        fn signature() -> &'static Signature {
            static SIGNATURE: Signature = Signature::empty();
            &SIGNATURE
        }

        fn from_binding(_: Binding) -> Result<Self> {
            Ok(Tick)
        }
    }

    #[derive(Debug)]
    struct Tock;

    impl Dispatchable for Tock {
        fn signature() -> &'static Signature {
            static SIGNATURE: Signature = Signature::empty();
            &SIGNATURE
        }

        fn from_binding(_: Binding) -> Result<Self> {
            Ok(Tock)
        }
    }

    #[test]
    fn recording_assigns_increasing_sequence_numbers() {
        let channel = RecordingChannel::new();
        channel.submit(Envelope::new(Tick, Route::Normal)).unwrap();
        channel.submit(Envelope::new(Tock, Route::Broadcast)).unwrap();

        let seqs: Vec<_> = channel.submissions().iter().map(|r| r.seq).collect();
        assert_eq!(seqs, vec![1, 2]);
    }

    #[test]
    fn recording_filters_by_type() {
        let channel = RecordingChannel::new();
        channel.submit(Envelope::new(Tick, Route::Normal)).unwrap();
        channel.submit(Envelope::new(Tock, Route::Broadcast)).unwrap();
        channel.submit(Envelope::new(Tick, Route::Normal)).unwrap();

        channel.assert_dispatched_times::<Tick>(2);
        channel.assert_dispatched_times::<Tock>(1);
        assert!(channel.envelopes::<Tock>()[0].is_broadcast());
        assert_eq!(*channel.dispatched::<Tick>()[0], Tick);
    }

    #[test]
    #[should_panic(expected = "not to be dispatched")]
    fn assert_not_dispatched_panics_when_present() {
        let channel = RecordingChannel::new();
        channel.submit(Envelope::new(Tick, Route::Normal)).unwrap();
        channel.assert_not_dispatched::<Tick>();
    }

    #[test]
    fn clear_forgets_submissions() {
        let channel = RecordingChannel::new();
        channel.submit(Envelope::new(Tick, Route::Normal)).unwrap();
        channel.clear();
        channel.assert_nothing_dispatched();
    }

    #[tokio::test]
    async fn queued_channel_delivers_in_order() {
        let (channel, mut rx) = QueuedChannel::new();
        channel.submit(Envelope::new(Tick, Route::Normal)).unwrap();
        channel.submit(Envelope::new(Tock, Route::Broadcast)).unwrap();

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert!(first.is::<Tick>());
        assert!(second.is::<Tock>() && second.is_broadcast());
    }

    #[tokio::test]
    async fn queued_channel_fails_after_receiver_drops() {
        let (channel, rx) = QueuedChannel::new();
        drop(rx);
        assert!(channel.is_closed());
        let err = channel.submit(Envelope::new(Tick, Route::Normal)).unwrap_err();
        assert!(err.to_string().contains("queue closed"));
    }
}

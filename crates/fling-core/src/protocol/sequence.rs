//! Sequence counter for outgoing casting messages.
//!
//! Each direction of a casting session numbers its messages with a
//! monotonically increasing integer. The receiver uses the numbers to
//! reject stale or duplicated commands and to pair each ack with the
//! command it answers; the controller does the same with status reports.
//! A [`SequenceCounter`] is the sole source of numbers for one direction:
//! one `next()` per sent message, never skipped, never reused.
//!
//! The counter is an `AtomicU64` fetch-add. Message handling is
//! single-threaded event dispatch, but the atomic makes the
//! increment-then-send ordering unconditional: the number is claimed
//! before any downstream effect of the send can run.

use std::sync::atomic::{AtomicU64, Ordering};

/// A monotonically increasing counter for casting-message sequence numbers.
///
/// Numbers start at 0 and increase by 1 per [`next`] call, wrapping at
/// `u64::MAX` without panicking.
///
/// # Examples
///
/// ```rust
/// use fling_core::protocol::SequenceCounter;
///
/// let counter = SequenceCounter::new();
/// assert_eq!(counter.next(), 0);
/// assert_eq!(counter.next(), 1);
/// ```
///
/// [`next`]: SequenceCounter::next
pub struct SequenceCounter {
    inner: AtomicU64,
}

impl SequenceCounter {
    /// Creates a counter starting at 0.
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Creates a counter whose first [`next`] returns `value`.
    ///
    /// [`next`]: SequenceCounter::next
    pub fn starting_at(value: u64) -> Self {
        Self {
            inner: AtomicU64::new(value),
        }
    }

    /// Claims and returns the next sequence number.
    ///
    /// Relaxed ordering suffices: the numbers order messages, they do not
    /// synchronize memory between threads.
    pub fn next(&self) -> u64 {
        self.inner.fetch_add(1, Ordering::Relaxed)
    }

    /// Returns the value the next [`next`] call would claim, without
    /// claiming it. For logging and diagnostics only.
    ///
    /// [`next`]: SequenceCounter::next
    pub fn current(&self) -> u64 {
        self.inner.load(Ordering::Relaxed)
    }
}

impl Default for SequenceCounter {
    fn default() -> Self {
        Self::new()
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use tokio::time::Instant;

/// Trailing-edge debouncer over a value.
///
/// Every [`push`](Self::push) restarts the quiet period; once it elapses the
/// latest value settles, and is reported only if it differs from the last
/// settled one.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
    settled: T,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            settled: initial,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// The last settled value.
    pub fn value(&self) -> &T {
        &self.settled
    }

    /// Records a new raw value and restarts the quiet period.
    pub fn push(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.delay));
    }

    /// When the pending value settles, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Settles the pending value if its quiet period has elapsed.
    ///
    /// Returns the new settled value only when it changed.
    pub fn poll_settled(&mut self) -> Option<T> {
        match &self.pending {
            Some((_, at)) if *at <= Instant::now() => self.take_pending(),
            _ => None,
        }
    }

    /// Waits for the pending value to settle.
    ///
    /// Returns `None` immediately when nothing is pending.
    pub async fn settle(&mut self) -> Option<T> {
        let deadline = self.deadline()?;
        tokio::time::sleep_until(deadline).await;
        self.take_pending()
    }

    /// Settles the pending value now, without waiting for the deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.take_pending()
    }

    /// Drops the pending value without settling it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    fn take_pending(&mut self) -> Option<T> {
        let (value, _) = self.pending.take()?;
        if value == self.settled {
            return None;
        }
        self.settled = value.clone();
        Some(value)
    }
}

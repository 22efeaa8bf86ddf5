use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::types::{PaymentBook, PaymentId, SimTime};

/// A scheduled payment-completion event.
///
/// Ordered by `(fire_at, seq)`; the sequence number makes equal-time
/// events fire in scheduling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Scheduled {
    fire_at: SimTime,
    seq: u64,
    payment: PaymentId,
}

/// Single-threaded cooperative discrete-event clock.
///
/// Work items are `(fire_time, payment)` entries processed in strict
/// time order by [`EventClock::run_until`]. The only deferred mutation
/// in the simulation is writing a payment's `completed` timestamp, so
/// the event payload is just the payment handle.
#[derive(Debug, Default)]
pub struct EventClock {
    now: SimTime,
    seq: u64,
    queue: BinaryHeap<Reverse<Scheduled>>,
}

impl EventClock {
    /// A clock at time zero with no pending events.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time in milliseconds.
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Number of events not yet fired.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Schedule `payment` to complete `delay_ms` from now.
    ///
    /// Returns the absolute fire time.
    pub fn schedule(&mut self, delay_ms: u64, payment: PaymentId) -> SimTime {
        let fire_at = self.now + delay_ms;
        let seq = self.seq;
        self.seq += 1;
        self.queue.push(Reverse(Scheduled {
            fire_at,
            seq,
            payment,
        }));
        tracing::debug!(payment_id = %payment, fire_at, "completion scheduled");
        fire_at
    }

    /// Advance the clock to `until`, firing every event due on the way.
    ///
    /// Each fired event writes the payment's `completed` timestamp in
    /// `book`. The clock never moves backward; an `until` in the past
    /// fires nothing.
    pub fn run_until(&mut self, until: SimTime, book: &mut PaymentBook) {
        while let Some(Reverse(next)) = self.queue.peek().copied() {
            if next.fire_at > until {
                break;
            }
            self.queue.pop();
            self.now = next.fire_at;
            book.complete(next.payment, next.fire_at);
            tracing::debug!(payment_id = %next.payment, at = next.fire_at, "payment completed");
        }
        if until > self.now {
            self.now = until;
        }
    }

    /// Drain every pending event in order, advancing time to the last.
    pub fn run_to_completion(&mut self, book: &mut PaymentBook) {
        let horizon = self
            .queue
            .iter()
            .map(|Reverse(s)| s.fire_at)
            .max();
        if let Some(horizon) = horizon {
            self.run_until(horizon, book);
        }
    }
}

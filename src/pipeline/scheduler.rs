use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

/// Handle of one scheduled run completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunTicket(pub u64);

/// Deferred-callback capability used by the run action.
///
/// Determinism rule: tickets come out in due-time order; tickets due at the same time come
/// out in the order they were scheduled.
pub trait Scheduler {
    /// Queue `ticket` to become due once `delay` has elapsed.
    fn schedule_after(&mut self, delay: Duration, ticket: RunTicket);
    /// Wait until the earliest queued ticket is due and return it, or `None` if the queue
    /// is empty.
    fn wait_next(&mut self) -> Option<RunTicket>;
    /// Number of queued tickets.
    fn pending(&self) -> usize;
}

/// Scheduler on a virtual clock. Time only moves through [`VirtualClock::advance`] and
/// [`Scheduler::wait_next`], so delays cost nothing in tests.
#[derive(Debug, Default)]
pub struct VirtualClock {
    now: Duration,
    seq: u64,
    queue: BinaryHeap<Reverse<(Duration, u64, RunTicket)>>,
}

impl VirtualClock {
    /// Clock at time zero with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move time forward by `by` and return every ticket that became due, in order.
    pub fn advance(&mut self, by: Duration) -> Vec<RunTicket> {
        self.now = self.now.saturating_add(by);
        let mut due = Vec::new();
        while let Some(Reverse((at, _, ticket))) = self.queue.peek().copied() {
            if at > self.now {
                break;
            }
            self.queue.pop();
            due.push(ticket);
        }
        due
    }
}

impl Scheduler for VirtualClock {
    fn schedule_after(&mut self, delay: Duration, ticket: RunTicket) {
        let at = self.now.saturating_add(delay);
        self.queue.push(Reverse((at, self.seq, ticket)));
        self.seq = self.seq.saturating_add(1);
    }

    fn wait_next(&mut self) -> Option<RunTicket> {
        let Reverse((at, _, ticket)) = self.queue.pop()?;
        self.now = self.now.max(at);
        Some(ticket)
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}

/// Scheduler on the real monotonic clock; `wait_next` sleeps the calling thread.
#[derive(Debug, Default)]
pub struct WallClock {
    seq: u64,
    queue: BinaryHeap<Reverse<(Instant, u64, RunTicket)>>,
}

impl WallClock {
    /// Empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for WallClock {
    fn schedule_after(&mut self, delay: Duration, ticket: RunTicket) {
        self.queue
            .push(Reverse((Instant::now() + delay, self.seq, ticket)));
        self.seq = self.seq.saturating_add(1);
    }

    fn wait_next(&mut self) -> Option<RunTicket> {
        let Reverse((at, _, ticket)) = self.queue.pop()?;
        let now = Instant::now();
        if at > now {
            std::thread::sleep(at - now);
        }
        Some(ticket)
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/scheduler.rs"]
mod tests;

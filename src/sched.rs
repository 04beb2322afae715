use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TimerId(u64);

#[derive(Clone, Debug)]
struct Task {
    id: TimerId,
    fish: usize,
    period: Duration,
    due: Instant,
}

/// Recurring tick deadlines, one per fish. The frame loop drains whatever is
/// due; removal goes through the handle stored on the fish record.
pub(crate) struct TimerWheel {
    tasks: Vec<Task>,
    next_id: u64,
}

impl TimerWheel {
    pub(crate) fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 0,
        }
    }

    /// Arm a fixed-period timer for fish `fish`, first due one period from
    /// `now`.
    pub(crate) fn register(&mut self, fish: usize, period: Duration, now: Instant) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            fish,
            period,
            due: now + period,
        });
        id
    }

    pub(crate) fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Fish indices whose deadline has passed, in registration order. Each
    /// fired task re-arms one period ahead; a deadline missed by more than a
    /// period coalesces to a single firing instead of bursting to catch up.
    pub(crate) fn pop_due(&mut self, now: Instant) -> Vec<usize> {
        let mut due = Vec::new();
        for t in &mut self.tasks {
            if t.due <= now {
                due.push(t.fish);
                t.due += t.period;
                if t.due <= now {
                    t.due = now + t.period;
                }
            }
        }
        due
    }

    pub(crate) fn len(&self) -> usize {
        self.tasks.len()
    }
}

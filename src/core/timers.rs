use std::time::Duration;

const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct Interval {
    handle: TimerHandle,
    period: Duration,
    next_due: Duration,
}

/// Repeating timers on a page clock that only moves when told to.
#[derive(Debug, Clone, Default)]
pub struct Timers {
    now: Duration,
    next_id: u64,
    intervals: Vec<Interval>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn set_interval(&mut self, period: Duration) -> TimerHandle {
        let period = period.max(MIN_PERIOD);
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.intervals.push(Interval {
            handle,
            period,
            next_due: self.now + period,
        });
        handle
    }

    /// Returns `false` when the handle was already cleared.
    pub fn clear_interval(&mut self, handle: TimerHandle) -> bool {
        let before = self.intervals.len();
        self.intervals.retain(|i| i.handle != handle);
        self.intervals.len() != before
    }

    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.intervals.iter().any(|i| i.handle == handle)
    }

    /// Pops the earliest tick due at or before `until`, moving the clock to its
    /// due time. Ties fire in creation order. Call repeatedly, then
    /// [`advance_to`](Self::advance_to), so callbacks may clear timers between
    /// ticks.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerHandle> {
        let interval = self
            .intervals
            .iter_mut()
            .filter(|i| i.next_due <= until)
            .min_by_key(|i| (i.next_due, i.handle.0))?;
        let due = interval.next_due;
        interval.next_due = due + interval.period;
        let handle = interval.handle;
        self.now = self.now.max(due);
        Some(handle)
    }

    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

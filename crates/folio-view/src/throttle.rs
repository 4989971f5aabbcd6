//! Trailing-edge coalescing of bursty events (scroll, resize).
//!
//! The coalescer never owns a timer. `push` tells the caller when to arm one,
//! and the caller hands the ticket back to `fire` when it elapses.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoalesceMode {
    /// One timer per burst; at most one delivery per interval.
    Throttle,
    /// Every sample restarts the quiet period.
    Debounce,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerRequest {
    pub ticket: u64,
    pub delay_ms: u32,
}

#[derive(Debug)]
pub struct Coalescer<T> {
    mode: CoalesceMode,
    interval_ms: u32,
    pending: Option<T>,
    armed: Option<u64>,
    generation: u64,
}

impl<T> Coalescer<T> {
    pub fn new(mode: CoalesceMode, interval_ms: u32) -> Self {
        Self {
            mode,
            interval_ms,
            pending: None,
            armed: None,
            generation: 0,
        }
    }

    pub fn throttle(interval_ms: u32) -> Self {
        Self::new(CoalesceMode::Throttle, interval_ms)
    }

    pub fn debounce(interval_ms: u32) -> Self {
        Self::new(CoalesceMode::Debounce, interval_ms)
    }

    /// Record a sample, superseding any undelivered one.
    pub fn push(&mut self, sample: T) -> Option<TimerRequest> {
        self.pending = Some(sample);
        if self.mode == CoalesceMode::Throttle && self.armed.is_some() {
            return None;
        }
        self.generation += 1;
        self.armed = Some(self.generation);
        Some(TimerRequest {
            ticket: self.generation,
            delay_ms: self.interval_ms,
        })
    }

    /// Timer elapsed. Stale tickets (superseded by a later debounce arm)
    /// deliver nothing.
    pub fn fire(&mut self, ticket: u64) -> Option<T> {
        if self.armed != Some(ticket) {
            return None;
        }
        self.armed = None;
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttle_arms_once_per_burst_and_delivers_latest() {
        let mut throttle = Coalescer::throttle(100);
        let request = throttle.push(10.0).expect("first sample arms the timer");
        assert_eq!(request.delay_ms, 100);
        assert!(throttle.push(20.0).is_none());
        assert!(throttle.push(30.0).is_none());

        assert_eq!(throttle.fire(request.ticket), Some(30.0));
        assert_eq!(throttle.fire(request.ticket), None);
        assert!(throttle.push(40.0).is_some());
    }

    #[test]
    fn debounce_only_last_ticket_delivers() {
        let mut debounce = Coalescer::debounce(250);
        let first = debounce.push(800).expect("arms");
        let second = debounce.push(1024).expect("re-arms");
        assert_ne!(first.ticket, second.ticket);

        assert_eq!(debounce.fire(first.ticket), None);
        assert_eq!(debounce.fire(second.ticket), Some(1024));
        assert_eq!(debounce.fire(second.ticket), None);
    }
}

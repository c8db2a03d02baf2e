//! Frame scheduling: a single pending "run on the next display refresh"
//! request that can be cancelled

use std::time::{Duration, Instant};

/// Identifies one frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

#[derive(Debug, Clone, Copy)]
struct PendingFrame {
    handle: FrameHandle,
    not_before: Option<Instant>,
}

/// Holds at most one outstanding frame request. A new request replaces
/// the previous one.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    pending: Option<PendingFrame>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask to run on the next display refresh
    pub fn request_frame(&mut self) -> FrameHandle {
        self.push(None)
    }

    /// Ask to run on the first display refresh at least `delay` after `now`
    pub fn request_frame_after(&mut self, now: Instant, delay: Duration) -> FrameHandle {
        self.push(Some(now + delay))
    }

    fn push(&mut self, not_before: Option<Instant>) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(PendingFrame { handle, not_before });
        handle
    }

    /// Withdraw a request. Returns false if it already ran or was replaced.
    pub fn cancel_frame(&mut self, handle: FrameHandle) -> bool {
        match self.pending {
            Some(p) if p.handle == handle => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending.map(|p| p.handle)
    }

    /// Called by the host on each display refresh. Consumes and returns the
    /// pending request if it is due.
    pub fn take_due(&mut self, now: Instant) -> Option<FrameHandle> {
        let pending = self.pending?;
        if pending.not_before.is_some_and(|t| now < t) {
            return None;
        }
        self.pending = None;
        Some(pending.handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_then_take() {
        let mut sched = FrameScheduler::new();
        assert!(sched.take_due(Instant::now()).is_none());

        let h = sched.request_frame();
        assert_eq!(sched.pending(), Some(h));
        assert_eq!(sched.take_due(Instant::now()), Some(h));
        assert!(sched.pending().is_none());
    }

    #[test]
    fn new_request_replaces_old() {
        let mut sched = FrameScheduler::new();
        let a = sched.request_frame();
        let b = sched.request_frame();
        assert_ne!(a, b);
        assert!(!sched.cancel_frame(a));
        assert_eq!(sched.take_due(Instant::now()), Some(b));
    }

    #[test]
    fn cancel_prevents_run() {
        let mut sched = FrameScheduler::new();
        let h = sched.request_frame();
        assert!(sched.cancel_frame(h));
        assert!(sched.take_due(Instant::now()).is_none());
        assert!(!sched.cancel_frame(h));
    }

    #[test]
    fn deferred_request_waits_for_delay() {
        let mut sched = FrameScheduler::new();
        let t0 = Instant::now();
        let h = sched.request_frame_after(t0, Duration::from_millis(10));

        assert!(sched.take_due(t0).is_none());
        assert!(sched.take_due(t0 + Duration::from_millis(9)).is_none());
        assert_eq!(sched.take_due(t0 + Duration::from_millis(10)), Some(h));
    }
}

use mapcards_core::{ScrollOptions, ScrollStatus, StopReason};

/// Counters for one auto-scroll session. Pure bookkeeping; the driver owns
/// all page access and timing.
#[derive(Debug, Clone)]
pub(crate) struct ScrollSession {
    max_cycles: u32,
    stall_threshold: u32,
    scroll_count: u32,
    last_item_count: usize,
    stall_streak: u32,
}

impl ScrollSession {
    pub(crate) fn new(options: &ScrollOptions, initial_item_count: usize) -> Self {
        Self {
            max_cycles: options.max_cycles,
            stall_threshold: options.stall_threshold,
            scroll_count: 0,
            last_item_count: initial_item_count,
            stall_streak: 0,
        }
    }

    pub(crate) fn scroll_count(&self) -> u32 {
        self.scroll_count
    }

    /// Records one cycle's item count. Only strict growth resets the streak.
    pub(crate) fn record_cycle(&mut self, item_count: usize) {
        if item_count > self.last_item_count {
            self.last_item_count = item_count;
            self.stall_streak = 0;
        } else {
            self.stall_streak += 1;
        }
        self.scroll_count += 1;
    }

    /// First satisfied stop condition, checked in fixed order. `at_end` is
    /// only evaluated when neither counter condition holds.
    pub(crate) fn stop_reason(&self, at_end: impl FnOnce() -> bool) -> Option<StopReason> {
        if self.scroll_count >= self.max_cycles {
            Some(StopReason::CycleLimit)
        } else if self.stall_streak >= self.stall_threshold {
            Some(StopReason::Stalled)
        } else if at_end() {
            Some(StopReason::ReachedEnd)
        } else {
            None
        }
    }

    pub(crate) fn status(&self, item_count: usize) -> ScrollStatus {
        ScrollStatus {
            active: true,
            scroll_count: self.scroll_count,
            item_count,
            stop_reason: None,
        }
    }

    pub(crate) fn final_status(&self, item_count: usize, reason: StopReason) -> ScrollStatus {
        ScrollStatus {
            active: false,
            scroll_count: self.scroll_count,
            item_count,
            stop_reason: Some(reason),
        }
    }
}

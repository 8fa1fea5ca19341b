use crate::config::DT_CTRL_MS;

/// Millisecond clock driven by the scheduler's tick index.
///
/// The first sampled tick is time zero. Every later tick is assumed to be
/// exactly one control period after the previous one.
#[derive(Copy, Clone, Debug, Default)]
pub struct TickClock {
    origin: Option<u64>,
}

impl TickClock {
    pub const fn new() -> Self {
        TickClock { origin: None }
    }

    /// Return elapsed time in milliseconds since the first sampled tick.
    pub fn sample(&mut self, frame: u64) -> u32 {
        let origin = *self.origin.get_or_insert(frame);
        let ticks = frame.saturating_sub(origin);
        let ms = ticks.saturating_mul(u64::from(DT_CTRL_MS));
        if ms > u64::from(u32::MAX) {
            u32::MAX
        } else {
            ms as u32
        }
    }
}

/// A window that stays open for a fixed duration after it is (re)started.
#[derive(Copy, Clone, Debug, Default)]
pub struct CooldownWindow {
    start_time: Option<u32>,
    duration: u32,
}

impl CooldownWindow {
    pub const fn new() -> Self {
        CooldownWindow {
            start_time: None,
            duration: 0,
        }
    }

    pub fn start(&mut self, now_ms: u32, duration_ms: u32) {
        self.start_time = Some(now_ms);
        self.duration = duration_ms;
    }

    pub fn is_open(&self, now_ms: u32) -> bool {
        match self.start_time {
            Some(start) => now_ms.saturating_sub(start) < self.duration,
            None => false,
        }
    }
}

use std::time::{Duration, Instant};

use log::{info, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Paused,
    Running,
}

impl RunState {
    pub fn toggled(self) -> Self {
        match self {
            RunState::Paused => RunState::Running,
            RunState::Running => RunState::Paused,
        }
    }

    pub fn is_running(self) -> bool {
        self == RunState::Running
    }
}

/// Time between ticks at the given rate, in whole milliseconds.
pub fn tick_interval(ticks_per_second: u32) -> Duration {
    Duration::from_millis(1000 / u64::from(ticks_per_second.max(1)))
}

/// Whether a tick should fire after `elapsed` since the previous one.
pub fn tick_due(state: RunState, elapsed: Duration, ticks_per_second: u32) -> bool {
    state.is_running() && elapsed >= tick_interval(ticks_per_second)
}

/// Fixed-rate, best-effort tick clock. Late polls produce late ticks, never
/// a batch of missed ones.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    state: RunState,
    ticks_per_second: u32,
    tick_count: u64,
    last_tick: Instant,
}

impl TickScheduler {
    pub fn new(ticks_per_second: u32, now: Instant) -> Self {
        Self {
            state: RunState::Paused,
            ticks_per_second: ticks_per_second.max(1),
            tick_count: 0,
            last_tick: now,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn ticks_per_second(&self) -> u32 {
        self.ticks_per_second
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn last_tick(&self) -> Instant {
        self.last_tick
    }

    pub fn toggle(&mut self, now: Instant) {
        self.state = self.state.toggled();
        if self.state.is_running() {
            self.last_tick = now;
            info!("simulation running at {} tps", self.ticks_per_second);
        } else {
            info!("simulation paused at tick {}", self.tick_count);
        }
    }

    pub fn increase_rate(&mut self) {
        self.ticks_per_second = self.ticks_per_second.saturating_add(1);
        info!("tick rate raised to {} tps", self.ticks_per_second);
    }

    /// Lower the rate by one; a no-op at 1 tps.
    pub fn decrease_rate(&mut self) {
        if self.ticks_per_second > 1 {
            self.ticks_per_second -= 1;
            info!("tick rate lowered to {} tps", self.ticks_per_second);
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        tick_due(
            self.state,
            now.saturating_duration_since(self.last_tick),
            self.ticks_per_second,
        )
    }

    /// Record a tick if one is due. Returns true when the caller should
    /// advance the grid.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.tick_count += 1;
        self.last_tick = now;
        trace!("tick {}", self.tick_count);
        true
    }
}

use std::time::Instant;

use log::{debug, info};

use crate::config::Config;
use crate::grid::Grid;
use crate::scheduler::TickScheduler;
use crate::telemetry::Status;

/// Double-buffered grids plus the tick clock that drives them.
///
/// `current` is what rendering and the update rule read; `next` is only
/// written during a tick, after which the two are swapped.
#[derive(Debug, Clone)]
pub struct Simulation {
    current: Grid,
    next: Grid,
    scheduler: TickScheduler,
}

impl Simulation {
    pub fn new(divisions: usize, ticks_per_second: u32, now: Instant) -> Self {
        Self {
            current: Grid::new(divisions),
            next: Grid::new(divisions),
            scheduler: TickScheduler::new(ticks_per_second, now),
        }
    }

    pub fn from_config(config: &Config, now: Instant) -> Self {
        info!(
            "starting {0}x{0} simulation at {1} tps",
            config.divisions, config.ticks_per_second
        );
        Self::new(config.divisions, config.ticks_per_second, now)
    }

    pub fn grid(&self) -> &Grid {
        &self.current
    }

    pub fn divisions(&self) -> usize {
        self.current.divisions()
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn status(&self) -> Status {
        Status {
            running: self.scheduler.is_running(),
            ticks_per_second: self.scheduler.ticks_per_second(),
            tick_count: self.scheduler.tick_count(),
        }
    }

    pub fn toggle_running(&mut self, now: Instant) {
        self.scheduler.toggle(now);
    }

    pub fn increase_rate(&mut self) {
        self.scheduler.increase_rate();
    }

    pub fn decrease_rate(&mut self) {
        self.scheduler.decrease_rate();
    }

    /// Advance one generation if the scheduler says a tick is due.
    /// Returns true when the grid changed and a redraw is needed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.scheduler.poll(now) {
            return false;
        }
        self.current.advance_into(&mut self.next);
        std::mem::swap(&mut self.current, &mut self.next);
        true
    }

    /// Flip a cell. Edits are only accepted while paused.
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> bool {
        if self.is_running() {
            return false;
        }
        self.current.toggle(x, y);
        debug!("toggled cell ({x}, {y}) to {:?}", self.current.get(x, y));
        true
    }

    pub fn randomize(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.current.randomize();
        info!("randomized grid, population {}", self.current.population());
        true
    }

    pub fn clear(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.current.clear();
        info!("cleared grid");
        true
    }
}

/// Snapshot of what the status overlay shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub running: bool,
    pub ticks_per_second: u32,
    pub tick_count: u64,
}

impl Status {
    pub fn status_line(&self) -> &'static str {
        if self.running {
            "Simulation Running"
        } else {
            "Simulation Paused"
        }
    }

    pub fn telemetry_line(&self) -> String {
        format!(
            "TPS: {}, Current Tick: {}",
            self.ticks_per_second, self.tick_count
        )
    }
}

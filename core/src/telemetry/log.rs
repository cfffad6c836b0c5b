use log::{info, warn};

/// Prefixes every message with the stage that emitted it.
pub struct LogManager {
    stage: &'static str,
}

impl LogManager {
    pub fn new(stage: &'static str) -> Self {
        Self { stage }
    }

    pub fn record(&self, message: &str) {
        info!("[{}] {}", self.stage, message);
    }

    /// Tolerated conditions that usually mean the inputs deserve a second look.
    pub fn warn(&self, message: &str) {
        warn!("[{}] {}", self.stage, message);
    }
}

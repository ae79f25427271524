use log::{debug, info, warn};

/// Stage-scoped log emitter; every line is prefixed with the stage name.
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

    pub fn detail(&self, message: &str) {
        debug!("[{}] {}", self.stage, message);
    }

    pub fn rejected(&self, failed: usize, total: usize) {
        if failed > 0 {
            warn!("[{}] {} of {} rows failed", self.stage, failed, total);
        }
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new("adcpcore")
    }
}

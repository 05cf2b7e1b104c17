use crate::model::Person;
use log::{debug, info};

/// Thin wrapper that keeps matching log lines in one shape.
pub struct LogManager {
    component: &'static str,
}

impl LogManager {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }

    pub fn record(&self, message: &str) {
        info!("[{}] {}", self.component, message);
    }

    pub fn record_filter(&self, center: &Person, radius_km: f64, kept: usize, total: usize) {
        info!(
            "[{}] center {} ({}) radius {:.1}km -> {}/{} {}",
            self.component,
            center.id,
            center.kind,
            radius_km,
            kept,
            total,
            center.kind.opposite()
        );
    }

    pub fn trace(&self, message: &str) {
        debug!("[{}] {}", self.component, message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new("lmpcore")
    }
}

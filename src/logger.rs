use crate::alert::{Alert, AlertSink};

/// A simple sink that logs every alert at warn level.
#[derive(Debug, Default)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        LogSink
    }
}

impl AlertSink for LogSink {
    fn deliver(&mut self, alert: &Alert) {
        tracing::warn!(
            id = %alert.identifier,
            device = %alert.device,
            subtitle = ?alert.subtitle,
            "{}: {}",
            alert.title,
            alert.body
        );
    }
}

//! Low-battery alerts and the sinks that receive them.
//!
//! An [`Alert`] is the platform-neutral shape of a local notification: title,
//! optional subtitle, body and a fixed identifier. Notification stores that
//! deduplicate by identifier will replace a pending alert rather than stack a new one.
//!
//! Delivery is fire-and-forget. Sinks are asked for authorization once (see
//! [`AlertDispatcher`](crate::dispatcher::AlertDispatcher)); a denial is logged and
//! delivery proceeds anyway.

use crate::config::AlertConfig;
use crate::device::LOW_BATTERY_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub title: String,
    pub subtitle: Option<String>,
    pub body: String,
    pub identifier: String,
    /// Name of the device the alert is about.
    pub device: String,
}

impl Alert {
    pub fn low_battery(device: &str, config: &AlertConfig) -> Self {
        Self {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            body: format!("{device}'s Battery level is less than {LOW_BATTERY_THRESHOLD}%"),
            identifier: config.identifier.clone(),
            device: device.to_string(),
        }
    }
}

/// Receiver of alerts (OS notification center, log, test recorder, ...).
pub trait AlertSink: Send {
    /// Ask the user for permission to show alerts. Called at most once per sink.
    ///
    /// Returns `false` if permission was denied.
    fn request_authorization(&mut self) -> bool {
        true
    }

    fn deliver(&mut self, alert: &Alert);
}

/// Sink that collects alerts in shared memory.
///
/// Clones share the same buffer, so a host can keep one handle and register the other.
#[derive(Clone, Debug)]
pub struct RecordingSink {
    alerts: Arc<Mutex<Vec<Alert>>>,
    authorize: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            alerts: Arc::default(),
            authorize: true,
        }
    }

    /// A recorder that denies authorization (it still records deliveries).
    pub fn denying() -> Self {
        Self {
            alerts: Arc::default(),
            authorize: false,
        }
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().map(|a| a.clone()).unwrap_or_default()
    }

    pub fn take(&self) -> Vec<Alert> {
        self.alerts
            .lock()
            .map(|mut a| std::mem::take(&mut *a))
            .unwrap_or_default()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertSink for RecordingSink {
    fn request_authorization(&mut self) -> bool {
        self.authorize
    }

    fn deliver(&mut self, alert: &Alert) {
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(alert.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_battery_alert_text() {
        let alert = Alert::low_battery("Magic Keyboard", &AlertConfig::default());
        assert_eq!(alert.title, "Need Charging");
        assert_eq!(alert.subtitle, None);
        assert_eq!(alert.body, "Magic Keyboard's Battery level is less than 20%");
        assert_eq!(alert.identifier, "batterywatch.low-battery");
        assert_eq!(alert.device, "Magic Keyboard");
    }

    #[test]
    fn recording_sink_clones_share_buffer() {
        let sink = RecordingSink::new();
        let mut registered = sink.clone();
        registered.deliver(&Alert::low_battery("Magic Trackpad 2", &AlertConfig::default()));
        assert_eq!(sink.alerts().len(), 1);
        assert_eq!(sink.take().len(), 1);
        assert!(sink.alerts().is_empty());
    }
}

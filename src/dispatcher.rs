//! Fan-out of low-battery alerts to registered sinks.

use crate::alert::{Alert, AlertSink};
use crate::config::AlertConfig;
use crate::snapshot::Snapshot;
use std::collections::HashMap;
use std::time::Instant;

/// Handle returned by [`AlertDispatcher::add_sink`].
pub type SinkId = u64;

/// Sink plus control flags.
struct SinkEntry {
    sink: Box<dyn AlertSink>,
    enabled: bool,
    authorization_requested: bool,
}

/// Builds one alert per device needing charge per poll and delivers it to every
/// enabled sink.
///
/// Devices without a reading (0%, e.g. disconnected) are not alerted on; see
/// [`DeviceState::needs_charging`](crate::device::DeviceState::needs_charging).
///
/// Without a cool-down, an alert fires on every cycle while the condition persists.
/// With [`AlertConfig::cooldown`] set, a device alerted within the window is skipped.
pub struct AlertDispatcher {
    config: AlertConfig,
    next_id: SinkId,
    sinks: HashMap<SinkId, SinkEntry>,
    last_alerted: HashMap<String, Instant>,
}

impl AlertDispatcher {
    pub fn new(config: AlertConfig) -> Self {
        Self {
            config,
            next_id: 0,
            sinks: HashMap::new(),
            last_alerted: HashMap::new(),
        }
    }

    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    /// Registers a sink and returns its id.
    pub fn add_sink(&mut self, sink: impl AlertSink + 'static) -> SinkId {
        let id = self.next_id;
        self.sinks.insert(
            id,
            SinkEntry {
                sink: Box::new(sink),
                enabled: true,
                authorization_requested: false,
            },
        );
        self.next_id += 1;
        id
    }

    /// Enables a previously registered sink.
    pub fn enable(&mut self, id: SinkId) {
        if let Some(entry) = self.sinks.get_mut(&id) {
            entry.enabled = true;
        }
    }

    /// Disables (mutes) a sink without removing it.
    pub fn disable(&mut self, id: SinkId) {
        if let Some(entry) = self.sinks.get_mut(&id) {
            entry.enabled = false;
        }
    }

    /// Unregisters a sink entirely.
    pub fn remove_sink(&mut self, id: SinkId) {
        self.sinks.remove(&id);
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Alerts for every device in `snapshot` that needs charging, delivered now.
    pub fn dispatch(&mut self, snapshot: &Snapshot) -> Vec<Alert> {
        self.dispatch_at(snapshot, Instant::now())
    }

    /// Same as [`dispatch`](Self::dispatch) with an explicit clock reading.
    pub fn dispatch_at(&mut self, snapshot: &Snapshot, now: Instant) -> Vec<Alert> {
        let mut alerts = Vec::new();

        for state in snapshot.needing_charge() {
            if self.cooling_down(&state.name, now) {
                tracing::debug!(device = %state.name, "low-battery alert suppressed by cool-down");
                continue;
            }
            self.last_alerted.insert(state.name.clone(), now);
            alerts.push(Alert::low_battery(&state.name, &self.config));
        }

        // Recovered devices start a fresh cool-down window next time.
        self.last_alerted
            .retain(|name, _| snapshot.get(name).is_some_and(|s| s.needs_charging()));

        for alert in &alerts {
            self.emit(alert);
        }
        alerts
    }

    fn cooling_down(&self, device: &str, now: Instant) -> bool {
        let Some(cooldown) = self.config.cooldown() else {
            return false;
        };
        self.last_alerted
            .get(device)
            .is_some_and(|at| now.saturating_duration_since(*at) < cooldown)
    }

    /// Emits one alert to all enabled sinks.
    fn emit(&mut self, alert: &Alert) {
        for (id, entry) in self.sinks.iter_mut() {
            if !entry.enabled {
                continue;
            }
            if !entry.authorization_requested {
                entry.authorization_requested = true;
                if !entry.sink.request_authorization() {
                    tracing::warn!(sink = id, "alert authorization denied");
                }
            }
            entry.sink.deliver(alert);
        }
    }
}

impl Default for AlertDispatcher {
    fn default() -> Self {
        Self::new(AlertConfig::default())
    }
}

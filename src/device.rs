//! Per-peripheral battery state.
//!
//! [`DeviceState`] is the last-known status of one recognized peripheral. The set of
//! recognized peripherals is fixed ([`KNOWN_DEVICES`]); each one carries a static
//! display symbol that polling never changes.
//!
//! # Defaults
//! - `serial_number` is empty until the device is discovered.
//! - `transport` is [`NOT_CONNECTED`] until the device is discovered.
//! - `battery_percent` is `0` until the device is discovered.

use serde::{Deserialize, Serialize};

/// Transport sentinel for a device that was not found in the last poll.
pub const NOT_CONNECTED: &str = "Not Connected";

/// Charge at or below this percentage is considered insufficient.
pub const LOW_BATTERY_THRESHOLD: u8 = 20;

/// Charge strictly above this percentage renders as [`Indicator::Good`].
pub const GOOD_BATTERY_THRESHOLD: u8 = 50;

/// Recognized product names and their display symbols.
pub const KNOWN_DEVICES: [(&str, &str); 2] = [
    ("Magic Keyboard", "keyboard"),
    ("Magic Trackpad 2", "rectangle.inset.fill"),
];

/// Returns `true` if `name` is one of [`KNOWN_DEVICES`].
pub fn is_known_device(name: &str) -> bool {
    KNOWN_DEVICES.iter().any(|(known, _)| *known == name)
}

/// Last-known state of one recognized peripheral.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceState {
    pub name: String,
    pub serial_number: String,
    pub transport: String,
    /// Charge in `0..=100`.
    pub battery_percent: u8,
    /// Static icon identifier chosen at seeding time.
    pub symbol: String,
}

/// Coarse battery classification for presentation layers.
///
/// Widgets render `Good` green, `Low` red, and `Empty` greyed out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Good,
    Low,
    Empty,
}

impl DeviceState {
    /// A disconnected device with default fields.
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            serial_number: String::new(),
            transport: NOT_CONNECTED.to_string(),
            battery_percent: 0,
            symbol: symbol.into(),
        }
    }

    /// `true` when the charge is strictly above [`LOW_BATTERY_THRESHOLD`].
    pub fn is_sufficient(&self) -> bool {
        self.battery_percent > LOW_BATTERY_THRESHOLD
    }

    /// `true` when a real reading (`1..=20`) is below the sufficiency threshold.
    ///
    /// A charge of 0 means no reading was obtained (disconnected, or a backend without
    /// battery data) and never asks for charging.
    pub fn needs_charging(&self) -> bool {
        self.battery_percent > 0 && !self.is_sufficient()
    }

    pub fn is_connected(&self) -> bool {
        self.transport != NOT_CONNECTED
    }

    pub fn indicator(&self) -> Indicator {
        match self.battery_percent {
            0 => Indicator::Empty,
            p if p > GOOD_BATTERY_THRESHOLD => Indicator::Good,
            _ => Indicator::Low,
        }
    }
}

impl std::fmt::Display for DeviceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_connected() {
            write!(
                f,
                "{} [{}] {}% via {}",
                self.name, self.serial_number, self.battery_percent, self.transport
            )
        } else {
            write!(f, "{} ({})", self.name, self.transport)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_disconnected_defaults() {
        let state = DeviceState::new("Magic Keyboard", "keyboard");
        assert_eq!(state.serial_number, "");
        assert_eq!(state.transport, NOT_CONNECTED);
        assert_eq!(state.battery_percent, 0);
        assert_eq!(state.symbol, "keyboard");
        assert!(!state.is_connected());
    }

    #[test]
    fn sufficiency_is_strictly_above_twenty() {
        let mut state = DeviceState::new("Magic Keyboard", "keyboard");
        state.battery_percent = 21;
        assert!(state.is_sufficient());
        state.battery_percent = 20;
        assert!(!state.is_sufficient());
        state.battery_percent = 0;
        assert!(!state.is_sufficient());
    }

    #[test]
    fn zero_reading_never_needs_charging() {
        let mut state = DeviceState::new("Magic Keyboard", "keyboard");
        assert!(!state.needs_charging());
        state.battery_percent = 1;
        assert!(state.needs_charging());
        state.battery_percent = 20;
        assert!(state.needs_charging());
        state.battery_percent = 21;
        assert!(!state.needs_charging());
    }

    #[test]
    fn indicator_bands() {
        let mut state = DeviceState::new("Magic Trackpad 2", "rectangle.inset.fill");
        assert_eq!(state.indicator(), Indicator::Empty);
        state.battery_percent = 1;
        assert_eq!(state.indicator(), Indicator::Low);
        state.battery_percent = 50;
        assert_eq!(state.indicator(), Indicator::Low);
        state.battery_percent = 51;
        assert_eq!(state.indicator(), Indicator::Good);
    }

    #[test]
    fn known_devices_lookup() {
        assert!(is_known_device("Magic Keyboard"));
        assert!(is_known_device("Magic Trackpad 2"));
        assert!(!is_known_device("Magic Mouse"));
    }

    #[test]
    fn display_formats_connected_and_disconnected() {
        let mut state = DeviceState::new("Magic Keyboard", "keyboard");
        assert_eq!(state.to_string(), "Magic Keyboard (Not Connected)");
        state.serial_number = "ABC123".into();
        state.transport = "Bluetooth".into();
        state.battery_percent = 15;
        assert_eq!(state.to_string(), "Magic Keyboard [ABC123] 15% via Bluetooth");
    }
}

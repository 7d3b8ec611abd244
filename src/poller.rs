//! Registry poller.
//!
//! [`DeviceRegistryPoller`] turns one enumeration of the hardware registry into a
//! [`Snapshot`]. Every poll starts from the seeded snapshot and overwrites fields of
//! entries whose hardware is present, so a device that disappeared between polls
//! reverts to its disconnected defaults.
//!
//! Polling never fails from the caller's point of view: an enumeration error yields
//! the seeded snapshot, and entries with missing properties are skipped.

use crate::device::is_known_device;
use crate::property::PropertyKey;
use crate::registry::{Registry, RegistryEntry, HID_EVENT_SERVICE_CLASS};
use crate::snapshot::Snapshot;

/// Substring every recognized product name contains.
const PRODUCT_MARKER: &str = "Magic";

pub struct DeviceRegistryPoller<R> {
    registry: R,
}

impl<R: Registry> DeviceRegistryPoller<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    /// Enumerate the registry once and return the resulting snapshot.
    pub fn poll(&self) -> Snapshot {
        let mut snapshot = Snapshot::seeded();

        let entries = match self.registry.matching_services(HID_EVENT_SERVICE_CLASS) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "registry enumeration failed; reporting no devices");
                return snapshot;
            }
        };

        let mut matched = 0usize;
        for entry in entries {
            if apply_entry(&mut snapshot, &*entry) {
                matched += 1;
            }
        }

        tracing::debug!(matched, "poll complete");
        snapshot
    }
}

/// Copy one entry's properties into its snapshot slot.
///
/// Properties are read in order (serial, transport, battery) and the first absent one
/// stops processing for this entry; values read before it stay written. Returns
/// `true` if the entry matched a known device.
fn apply_entry(snapshot: &mut Snapshot, entry: &dyn RegistryEntry) -> bool {
    let Some(product) = entry.text(PropertyKey::Product) else {
        tracing::trace!("entry has no Product property");
        return false;
    };
    if !product.contains(PRODUCT_MARKER) {
        return false;
    }
    if !is_known_device(&product) {
        tracing::debug!(%product, "ignoring unrecognized peripheral");
        return false;
    }
    let Some(state) = snapshot.get_mut(&product) else {
        return false;
    };

    let Some(serial) = entry.text(PropertyKey::SerialNumber) else {
        tracing::trace!(%product, "missing SerialNumber");
        return true;
    };
    state.serial_number = serial;

    let Some(transport) = entry.text(PropertyKey::Transport) else {
        tracing::trace!(%product, "missing Transport");
        return true;
    };
    state.transport = transport;

    let Some(battery) = entry.integer(PropertyKey::BatteryPercent) else {
        tracing::trace!(%product, "missing BatteryPercent");
        return true;
    };
    if !(0..=100).contains(&battery) {
        tracing::warn!(%product, battery, "battery percentage out of range; clamping");
    }
    state.battery_percent = battery.clamp(0, 100) as u8;

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::memory::{MemoryEntry, MemoryRegistry};
    use crate::device::NOT_CONNECTED;

    fn keyboard() -> MemoryEntry {
        MemoryEntry::new()
            .product("Magic Keyboard")
            .serial_number("ABC123")
            .transport("Bluetooth")
            .battery_percent(64)
    }

    #[test]
    fn present_device_fills_all_fields() {
        let poller = DeviceRegistryPoller::new(MemoryRegistry::new().with_entry(keyboard()));
        let snap = poller.poll();
        let kb = snap.get("Magic Keyboard").unwrap();
        assert_eq!(kb.serial_number, "ABC123");
        assert_eq!(kb.transport, "Bluetooth");
        assert_eq!(kb.battery_percent, 64);
        assert_eq!(kb.symbol, "keyboard");
    }

    #[test]
    fn missing_serial_leaves_everything_default() {
        let entry = MemoryEntry::new()
            .product("Magic Keyboard")
            .transport("Bluetooth")
            .battery_percent(64);
        let poller = DeviceRegistryPoller::new(MemoryRegistry::new().with_entry(entry));
        assert_eq!(poller.poll(), Snapshot::seeded());
    }

    #[test]
    fn missing_battery_keeps_serial_and_transport() {
        let entry = MemoryEntry::new()
            .product("Magic Trackpad 2")
            .serial_number("TP-1")
            .transport("USB");
        let poller = DeviceRegistryPoller::new(MemoryRegistry::new().with_entry(entry));
        let tp = poller.poll().get("Magic Trackpad 2").cloned().unwrap();
        assert_eq!(tp.serial_number, "TP-1");
        assert_eq!(tp.transport, "USB");
        assert_eq!(tp.battery_percent, 0);
    }

    #[test]
    fn unknown_magic_product_is_ignored() {
        let entry = MemoryEntry::new()
            .product("Magic Mouse")
            .serial_number("MM-1")
            .transport("Bluetooth")
            .battery_percent(5);
        let poller = DeviceRegistryPoller::new(MemoryRegistry::new().with_entry(entry));
        let snap = poller.poll();
        assert_eq!(snap, Snapshot::seeded());
        assert!(snap.get("Magic Mouse").is_none());
    }

    #[test]
    fn out_of_range_battery_is_clamped() {
        let high = keyboard().battery_percent(140);
        let low = MemoryEntry::new()
            .product("Magic Trackpad 2")
            .serial_number("TP-1")
            .transport("USB")
            .battery_percent(-3);
        let poller =
            DeviceRegistryPoller::new(MemoryRegistry::new().with_entry(high).with_entry(low));
        let snap = poller.poll();
        assert_eq!(snap.get("Magic Keyboard").unwrap().battery_percent, 100);
        assert_eq!(snap.get("Magic Trackpad 2").unwrap().battery_percent, 0);
    }

    #[test]
    fn device_that_disappears_reverts_to_defaults() {
        let mut poller = DeviceRegistryPoller::new(MemoryRegistry::new().with_entry(keyboard()));
        assert_eq!(poller.poll().get("Magic Keyboard").unwrap().battery_percent, 64);

        poller.registry_mut().clear();
        let kb = poller.poll().get("Magic Keyboard").cloned().unwrap();
        assert_eq!(kb.transport, NOT_CONNECTED);
        assert_eq!(kb.battery_percent, 0);
        assert_eq!(kb.serial_number, "");
    }

    #[test]
    fn poller_accepts_boxed_registry() {
        let boxed: Box<dyn Registry> = Box::new(MemoryRegistry::new().with_entry(keyboard()));
        let poller = DeviceRegistryPoller::new(boxed);
        assert_eq!(poller.poll().get("Magic Keyboard").unwrap().battery_percent, 64);
    }
}

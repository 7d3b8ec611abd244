use batterywatch::backends::memory::{MemoryEntry, MemoryRegistry};
use batterywatch::{
    AlertDispatcher, DeviceRegistryPoller, PropertyKey, RecordingSink, Snapshot, NOT_CONNECTED,
};

fn magic_keyboard_low() -> MemoryEntry {
    MemoryEntry::new()
        .product("Magic Keyboard")
        .serial_number("ABC123")
        .transport("Bluetooth")
        .battery_percent(15)
}

fn other_hid() -> MemoryEntry {
    MemoryEntry::new()
        .product("Other HID")
        .serial_number("XYZ")
        .transport("USB")
        .battery_percent(99)
}

fn trackpad_at(percent: i64) -> MemoryEntry {
    MemoryEntry::new()
        .product("Magic Trackpad 2")
        .serial_number("TP-42")
        .transport("Bluetooth")
        .battery_percent(percent)
}

#[test]
fn enumeration_failure_returns_seeded_snapshot() {
    let mut registry = MemoryRegistry::new().with_entry(magic_keyboard_low());
    registry.set_failing(true);
    let poller = DeviceRegistryPoller::new(registry);

    let snap = poller.poll();
    assert_eq!(snap, Snapshot::seeded());
    for (_, state) in snap.iter() {
        assert_eq!(state.transport, NOT_CONNECTED);
        assert_eq!(state.serial_number, "");
        assert_eq!(state.battery_percent, 0);
    }
}

#[test]
fn non_magic_products_leave_snapshot_unaffected() {
    let poller = DeviceRegistryPoller::new(
        MemoryRegistry::new()
            .with_entry(other_hid())
            .with_entry(MemoryEntry::new().product("Keyboard K380").battery_percent(50)),
    );
    assert_eq!(poller.poll(), Snapshot::seeded());
}

#[test]
fn entries_without_product_are_skipped() {
    let poller = DeviceRegistryPoller::new(
        MemoryRegistry::new().with_entry(magic_keyboard_low().without(PropertyKey::Product)),
    );
    assert_eq!(poller.poll(), Snapshot::seeded());
}

#[test]
fn sufficiency_boundary_is_strictly_above_twenty() {
    let poller = DeviceRegistryPoller::new(MemoryRegistry::new().with_entry(trackpad_at(21)));
    assert!(poller.poll().get("Magic Trackpad 2").unwrap().is_sufficient());

    let poller = DeviceRegistryPoller::new(MemoryRegistry::new().with_entry(trackpad_at(20)));
    assert!(!poller.poll().get("Magic Trackpad 2").unwrap().is_sufficient());
}

#[test]
fn polling_unchanged_registry_is_idempotent() {
    let poller = DeviceRegistryPoller::new(
        MemoryRegistry::new()
            .with_entry(magic_keyboard_low())
            .with_entry(trackpad_at(77))
            .with_entry(other_hid()),
    );
    let first = poller.poll();
    let second = poller.poll();
    assert_eq!(first, second);
}

#[test]
fn missing_transport_short_circuits_battery_read() {
    let entry = magic_keyboard_low().without(PropertyKey::Transport);
    let poller = DeviceRegistryPoller::new(MemoryRegistry::new().with_entry(entry));

    let kb = poller.poll().get("Magic Keyboard").cloned().unwrap();
    assert_eq!(kb.serial_number, "ABC123");
    assert_eq!(kb.transport, NOT_CONNECTED);
    assert_eq!(kb.battery_percent, 0);
}

#[test]
fn keyboard_low_end_to_end() {
    let poller = DeviceRegistryPoller::new(
        MemoryRegistry::new()
            .with_entry(magic_keyboard_low())
            .with_entry(other_hid()),
    );
    let snap = poller.poll();
    assert_eq!(snap.len(), 2);

    let kb = snap.get("Magic Keyboard").unwrap();
    assert_eq!(kb.serial_number, "ABC123");
    assert_eq!(kb.transport, "Bluetooth");
    assert_eq!(kb.battery_percent, 15);
    assert!(!kb.is_sufficient());

    let tp = snap.get("Magic Trackpad 2").unwrap();
    assert_eq!(tp, Snapshot::seeded().get("Magic Trackpad 2").unwrap());
    assert!(!tp.is_sufficient());

    // The trackpad has no reading, so only the keyboard is alerted on.
    let recorder = RecordingSink::new();
    let mut dispatcher = AlertDispatcher::default();
    dispatcher.add_sink(recorder.clone());
    let dispatched = dispatcher.dispatch(&snap);

    let alerts = recorder.alerts();
    assert_eq!(alerts, dispatched);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].device, "Magic Keyboard");
    assert!(alerts[0].body.contains("Magic Keyboard"));
}

#[test]
fn every_handle_is_released() {
    let mut poller = DeviceRegistryPoller::new(
        MemoryRegistry::new()
            .with_entry(magic_keyboard_low())
            .with_entry(other_hid())
            .with_entry(MemoryEntry::new())
            .with_entry(trackpad_at(3).without(PropertyKey::SerialNumber)),
    );
    poller.poll();
    poller.poll();

    let reg = poller.registry();
    // One iterator plus four entries per poll.
    assert_eq!(reg.handles_acquired(), 10);
    assert_eq!(reg.handles_released(), reg.handles_acquired());

    poller.registry_mut().set_failing(true);
    poller.poll();
    assert_eq!(poller.registry().handles_acquired(), 10);
    assert_eq!(poller.registry().handles_released(), 10);
}

#[test]
fn snapshot_serializes_for_presentation() {
    let poller = DeviceRegistryPoller::new(MemoryRegistry::new().with_entry(trackpad_at(64)));
    let json = poller.poll().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["Magic Trackpad 2"]["battery_percent"], 64);
    assert_eq!(value["Magic Trackpad 2"]["symbol"], "rectangle.inset.fill");
    assert_eq!(value["Magic Keyboard"]["transport"], "Not Connected");
}

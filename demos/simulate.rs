use batterywatch::backends::memory::{MemoryEntry, MemoryRegistry};
use batterywatch::logging::init_logging;
use batterywatch::{AlertDispatcher, DeviceRegistryPoller, LogSink};

fn main() -> batterywatch::Result<()> {
    init_logging("debug")?;

    let registry = MemoryRegistry::new()
        .with_entry(
            MemoryEntry::new()
                .product("Magic Keyboard")
                .serial_number("ABC123")
                .transport("Bluetooth")
                .battery_percent(15),
        )
        .with_entry(MemoryEntry::new().product("Other HID").transport("USB"));

    let poller = DeviceRegistryPoller::new(registry);
    let snapshot = poller.poll();
    println!("{}", snapshot.to_json()?);

    let mut alerts = AlertDispatcher::default();
    alerts.add_sink(LogSink::new());
    let sent = alerts.dispatch(&snapshot);
    println!("{} alert(s)", sent.len());
    Ok(())
}

use batterywatch::logging::init_logging;
use batterywatch::{default_registry, AlertDispatcher, Config, DeviceRegistryPoller, LogSink};
use std::time::Duration;

/// Fixed refresh period, matching the widget timeline.
const POLL_EVERY: Duration = Duration::from_secs(60);

fn main() -> batterywatch::Result<()> {
    let config = match Config::default_path() {
        Some(path) => Config::load_or_default(&path)?,
        None => Config::default(),
    };
    init_logging(&config.logging.filter)?;

    let poller = DeviceRegistryPoller::new(default_registry());
    let mut alerts = AlertDispatcher::new(config.alerts.clone());
    alerts.add_sink(LogSink::new());

    loop {
        let snapshot = poller.poll();
        for (_, state) in snapshot.iter() {
            println!("{state} {:?}", state.indicator());
        }
        alerts.dispatch(&snapshot);
        std::thread::sleep(POLL_EVERY);
    }
}

//! batterywatch — battery levels of paired Magic Keyboard / Magic Trackpad peripherals.
//!
//! Polls the OS hardware registry for HID event services, keeps one
//! [`DeviceState`] per recognized peripheral, and raises low-battery alerts.
//!
//! ```no_run
//! use batterywatch::{default_registry, AlertDispatcher, DeviceRegistryPoller, LogSink};
//!
//! let poller = DeviceRegistryPoller::new(default_registry());
//! let mut alerts = AlertDispatcher::default();
//! alerts.add_sink(LogSink::new());
//!
//! let snapshot = poller.poll();
//! for (name, state) in snapshot.iter() {
//!     println!("{name}: {}% ({:?})", state.battery_percent, state.indicator());
//! }
//! alerts.dispatch(&snapshot);
//! ```

pub mod alert;
pub mod backends;
pub mod config;
pub mod device;
pub mod dispatcher;
pub mod error;
pub mod filtered_sink;
pub mod logger;
pub mod logging;
pub mod poller;
pub mod property;
pub mod registry;
pub mod snapshot;

pub use alert::{Alert, AlertSink, RecordingSink};
pub use backends::default_registry;
pub use config::{AlertConfig, Config, LoggingConfig};
pub use device::{DeviceState, Indicator, KNOWN_DEVICES, LOW_BATTERY_THRESHOLD, NOT_CONNECTED};
pub use dispatcher::{AlertDispatcher, SinkId};
pub use error::{Error, Result};
pub use filtered_sink::FilteredSink;
pub use logger::LogSink;
pub use poller::DeviceRegistryPoller;
pub use property::{PropertyKey, PropertyValue};
pub use registry::{Registry, RegistryEntry, HID_EVENT_SERVICE_CLASS};
pub use snapshot::Snapshot;

//! Registry backends for `batterywatch`.
//!
//! Implementations of [`Registry`](crate::registry::Registry) for platform-specific
//! hardware registries.
//!
//! # Backends
//! - **`iokit`** (macOS): the native IOKit registry; the only backend that reports
//!   `BatteryPercent`.
//! - **`hid`** (feature `hid`, default): portable `hidapi` device list. Reports
//!   product, serial and transport but never a battery level.
//! - **`memory`**: simulated registry for tests and demos.

use crate::registry::Registry;

#[cfg(target_os = "macos")]
#[cfg_attr(docsrs, doc(cfg(target_os = "macos")))]
pub mod iokit;

#[cfg(feature = "hid")]
#[cfg_attr(docsrs, doc(cfg(feature = "hid")))]
pub mod hid;

pub mod memory;

/// Best available registry for the current platform.
///
/// IOKit on macOS, otherwise `hidapi` when the `hid` feature is enabled, otherwise an
/// empty in-memory registry (every poll reports all devices disconnected).
pub fn default_registry() -> Box<dyn Registry> {
    #[cfg(target_os = "macos")]
    {
        tracing::debug!("using IOKit registry backend");
        Box::new(iokit::IoKitRegistry::new())
    }

    #[cfg(all(not(target_os = "macos"), feature = "hid"))]
    {
        tracing::debug!("using hidapi registry backend");
        Box::new(hid::HidRegistry::new())
    }

    #[cfg(all(not(target_os = "macos"), not(feature = "hid")))]
    {
        tracing::debug!("no hardware registry backend available; using empty registry");
        Box::new(memory::MemoryRegistry::new())
    }
}

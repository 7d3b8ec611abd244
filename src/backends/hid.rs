//! Portable registry backend over `hidapi`.
//!
//! Hosts without IOKit still have a HID device list. [`HidRegistry`] presents each
//! `hidapi` device-list entry as a registry entry:
//! - `Product` ← `product_string()`
//! - `SerialNumber` ← `serial_number()` (empty strings count as absent)
//! - `Transport` ← `bus_type()` (`"Bluetooth"`, `"USB"`, `"I2C"`, `"SPI"`)
//!
//! HID descriptors carry no battery level, so `BatteryPercent` is never present and
//! matched devices show up connected with a 0% charge.
//!
//! The service class is ignored: the HID device list is the only class this
//! backend knows about.

use crate::property::{PropertyKey, PropertyValue};
use crate::registry::{boxed_entries, Entries, Registry, RegistryEntry};
use crate::{Error, Result};
use hidapi::{BusType, DeviceInfo, HidApi};

#[derive(Debug, Default)]
pub struct HidRegistry;

impl HidRegistry {
    pub fn new() -> Self {
        HidRegistry
    }
}

impl Registry for HidRegistry {
    fn matching_services(&self, _service_class: &str) -> Result<Entries<'_>> {
        let api = HidApi::new().map_err(|e| Error::Enumeration(e.to_string()))?;
        // The device list borrows `api`; copy out what we need so `api` can drop here.
        let entries: Vec<HidEntry> = api.device_list().map(HidEntry::from_info).collect();
        tracing::trace!(count = entries.len(), "hidapi device list");
        Ok(boxed_entries(entries.into_iter()))
    }
}

#[derive(Clone, Debug)]
struct HidEntry {
    product: Option<String>,
    serial_number: Option<String>,
    transport: Option<&'static str>,
}

impl HidEntry {
    fn from_info(info: &DeviceInfo) -> Self {
        Self {
            product: non_empty(info.product_string()),
            serial_number: non_empty(info.serial_number()),
            transport: transport_name(info.bus_type()),
        }
    }
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

fn transport_name(bus: BusType) -> Option<&'static str> {
    match bus {
        BusType::Bluetooth => Some("Bluetooth"),
        BusType::Usb => Some("USB"),
        BusType::I2c => Some("I2C"),
        BusType::Spi => Some("SPI"),
        _ => None,
    }
}

impl RegistryEntry for HidEntry {
    fn property(&self, key: PropertyKey) -> Option<PropertyValue> {
        match key {
            PropertyKey::Product => self.product.clone().map(PropertyValue::Text),
            PropertyKey::SerialNumber => self.serial_number.clone().map(PropertyValue::Text),
            PropertyKey::Transport => self.transport.map(PropertyValue::from),
            PropertyKey::BatteryPercent => None,
        }
    }
}

//! Hardware registry abstraction.
//!
//! A [`Registry`] enumerates entries matching a service class. Enumeration is lazy,
//! finite and not restartable: every call asks the OS again. Each yielded
//! [`RegistryEntry`] is an opaque handle that owns its native resources and
//! releases them on `Drop`, as does the iterator itself.
//!
//! Backends live in [`crate::backends`].

use crate::property::{PropertyKey, PropertyValue};
use crate::Result;

/// Service class of the HID event services that carry peripheral battery data.
pub const HID_EVENT_SERVICE_CLASS: &str = "AppleDeviceManagementHIDEventService";

/// Boxed lazy sequence of entry handles borrowed from a registry.
pub type Entries<'a> = Box<dyn Iterator<Item = Box<dyn RegistryEntry + 'a>> + 'a>;

/// Box a concrete entry iterator into [`Entries`].
pub(crate) fn boxed_entries<'a, I, E>(iter: I) -> Entries<'a>
where
    I: Iterator<Item = E> + 'a,
    E: RegistryEntry + 'a,
{
    Box::new(iter.map(|e| Box::new(e) as Box<dyn RegistryEntry + 'a>))
}

/// One registry entry (an opaque handle with named properties).
pub trait RegistryEntry {
    /// Look up a property by name. `None` if the entry does not carry it.
    fn property(&self, key: PropertyKey) -> Option<PropertyValue>;

    /// Text property, or `None` if absent or not text.
    fn text(&self, key: PropertyKey) -> Option<String> {
        match self.property(key)? {
            PropertyValue::Text(s) => Some(s),
            other => {
                tracing::debug!(%key, value = %other, "ignoring non-text property");
                None
            }
        }
    }

    /// Integer property, or `None` if absent or not an integer.
    fn integer(&self, key: PropertyKey) -> Option<i64> {
        match self.property(key)? {
            PropertyValue::Integer(n) => Some(n),
            other => {
                tracing::debug!(%key, value = %other, "ignoring non-integer property");
                None
            }
        }
    }
}

/// A queryable hardware-properties registry.
pub trait Registry {
    /// Enumerate entries whose service class equals `service_class`.
    ///
    /// Returns `Err` when the registry cannot be enumerated at all (e.g. the
    /// host does not support it).
    fn matching_services(&self, service_class: &str) -> Result<Entries<'_>>;
}

impl<R: Registry + ?Sized> Registry for Box<R> {
    fn matching_services(&self, service_class: &str) -> Result<Entries<'_>> {
        (**self).matching_services(service_class)
    }
}

impl<R: Registry + ?Sized> Registry for &R {
    fn matching_services(&self, service_class: &str) -> Result<Entries<'_>> {
        (**self).matching_services(service_class)
    }
}

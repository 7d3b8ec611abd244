#![cfg(target_os = "macos")]

//! macOS IOKit registry backend.
//!
//! [`IoKitRegistry`] asks IOKit for services matching a class name
//! (`IOServiceMatching` + `IOServiceGetMatchingServices`) and walks the resulting
//! `io_iterator_t` lazily with `IOIteratorNext`. Properties are read per entry with
//! `IORegistryEntryCreateCFProperty` and converted from CoreFoundation values into
//! [`PropertyValue`]s: `CFString` becomes text, `CFNumber` becomes an integer, and
//! anything else is treated as absent.
//!
//! Every `io_object_t` (the iterator and each service) is owned by an [`IoObject`]
//! and released with `IOObjectRelease` on drop, so handles are freed on every exit
//! path, including a consumer that stops iterating early.

use crate::property::{PropertyKey, PropertyValue};
use crate::registry::{boxed_entries, Entries, Registry, RegistryEntry};
use crate::{Error, Result};
use core_foundation::base::{CFType, TCFType};
use core_foundation::number::CFNumber;
use core_foundation::string::CFString;
use core_foundation_sys::base::kCFAllocatorDefault;
use io_kit_sys::types::{io_iterator_t, io_object_t};
use io_kit_sys::{
    IOIteratorNext, IOObjectRelease, IORegistryEntryCreateCFProperty,
    IOServiceGetMatchingServices, IOServiceMatching,
};
use std::ffi::CString;

/// `kIOMainPortDefault`, which IOKit defines as `MACH_PORT_NULL`.
const MAIN_PORT_DEFAULT: u32 = 0;

const KERN_SUCCESS: i32 = 0;

/// Owned IOKit object reference.
struct IoObject(io_object_t);

impl IoObject {
    fn new(raw: io_object_t) -> Option<Self> {
        (raw != 0).then_some(IoObject(raw))
    }
}

impl Drop for IoObject {
    fn drop(&mut self) {
        unsafe {
            IOObjectRelease(self.0);
        }
    }
}

/// The system IOKit registry.
#[derive(Debug, Default)]
pub struct IoKitRegistry;

impl IoKitRegistry {
    pub fn new() -> Self {
        IoKitRegistry
    }
}

impl Registry for IoKitRegistry {
    fn matching_services(&self, service_class: &str) -> Result<Entries<'_>> {
        let class = CString::new(service_class)
            .map_err(|e| Error::Enumeration(format!("invalid service class: {e}")))?;

        let matching = unsafe { IOServiceMatching(class.as_ptr()) };
        if matching.is_null() {
            return Err(Error::Enumeration(format!(
                "IOServiceMatching({service_class}) returned null"
            )));
        }

        let mut raw_iter: io_iterator_t = 0;
        // Consumes the reference to `matching`, success or not.
        let kr = unsafe {
            IOServiceGetMatchingServices(MAIN_PORT_DEFAULT, matching as _, &mut raw_iter)
        };
        if kr != KERN_SUCCESS {
            return Err(Error::Enumeration(format!(
                "IOServiceGetMatchingServices({service_class}) failed: {kr:#x}"
            )));
        }

        let iterator = IoObject::new(raw_iter).ok_or_else(|| {
            Error::Enumeration("IOServiceGetMatchingServices returned a null iterator".into())
        })?;

        Ok(boxed_entries(ServiceIter { iterator }))
    }
}

struct ServiceIter {
    iterator: IoObject,
}

impl Iterator for ServiceIter {
    type Item = ServiceEntry;

    fn next(&mut self) -> Option<ServiceEntry> {
        let raw = unsafe { IOIteratorNext(self.iterator.0) };
        IoObject::new(raw).map(|object| ServiceEntry { object })
    }
}

struct ServiceEntry {
    object: IoObject,
}

impl ServiceEntry {
    fn cf_property(&self, key: &str) -> Option<CFType> {
        let key = CFString::new(key);
        let value = unsafe {
            IORegistryEntryCreateCFProperty(
                self.object.0,
                key.as_concrete_TypeRef(),
                kCFAllocatorDefault,
                0,
            )
        };
        if value.is_null() {
            None
        } else {
            // "Create" rule: we own the returned reference.
            Some(unsafe { CFType::wrap_under_create_rule(value) })
        }
    }
}

impl RegistryEntry for ServiceEntry {
    fn property(&self, key: PropertyKey) -> Option<PropertyValue> {
        let value = self.cf_property(key.as_str())?;
        if let Some(s) = value.downcast::<CFString>() {
            return Some(PropertyValue::Text(s.to_string()));
        }
        if let Some(n) = value.downcast::<CFNumber>() {
            return n.to_i64().map(PropertyValue::Integer);
        }
        tracing::debug!(%key, type_id = value.type_of(), "unsupported CF property type");
        None
    }
}

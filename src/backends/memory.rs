//! In-memory registry for tests, demos and hosts without a hardware registry.
//!
//! [`MemoryRegistry`] holds a list of [`MemoryEntry`] property bags. It ignores the
//! service class (everything it holds is considered a match), can be told to fail
//! enumeration, and counts handles so callers can check that everything acquired
//! during a poll was released.

use crate::property::{PropertyKey, PropertyValue};
use crate::registry::{boxed_entries, Entries, Registry, RegistryEntry};
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A simulated registry entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryEntry {
    properties: HashMap<PropertyKey, PropertyValue>,
}

impl MemoryEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(mut self, key: PropertyKey, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key, value.into());
        self
    }

    pub fn product(self, product: &str) -> Self {
        self.property(PropertyKey::Product, product)
    }

    pub fn serial_number(self, serial: &str) -> Self {
        self.property(PropertyKey::SerialNumber, serial)
    }

    pub fn transport(self, transport: &str) -> Self {
        self.property(PropertyKey::Transport, transport)
    }

    pub fn battery_percent(self, percent: i64) -> Self {
        self.property(PropertyKey::BatteryPercent, percent)
    }

    /// Remove a property, e.g. to simulate an entry that lacks it.
    pub fn without(mut self, key: PropertyKey) -> Self {
        self.properties.remove(&key);
        self
    }
}

#[derive(Debug, Default)]
pub struct MemoryRegistry {
    entries: Vec<MemoryEntry>,
    failing: bool,
    acquired: AtomicUsize,
    released: AtomicUsize,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, entry: MemoryEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn push(&mut self, entry: MemoryEntry) {
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[MemoryEntry] {
        &self.entries
    }

    /// When `true`, [`Registry::matching_services`] returns [`Error::Enumeration`].
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Handles (iterators and entries) handed out so far.
    pub fn handles_acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    /// Handles dropped so far.
    pub fn handles_released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

impl Registry for MemoryRegistry {
    fn matching_services(&self, _service_class: &str) -> Result<Entries<'_>> {
        if self.failing {
            return Err(Error::Enumeration("simulated enumeration failure".into()));
        }
        self.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(boxed_entries(MemoryIter {
            inner: self.entries.iter(),
            registry: self,
        }))
    }
}

struct MemoryIter<'a> {
    inner: std::slice::Iter<'a, MemoryEntry>,
    registry: &'a MemoryRegistry,
}

impl<'a> Iterator for MemoryIter<'a> {
    type Item = MemoryHandle<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.inner.next()?;
        let registry = self.registry;
        registry.acquired.fetch_add(1, Ordering::SeqCst);
        Some(MemoryHandle {
            entry,
            released: &registry.released,
        })
    }
}

impl Drop for MemoryIter<'_> {
    fn drop(&mut self) {
        self.registry.released.fetch_add(1, Ordering::SeqCst);
    }
}

struct MemoryHandle<'a> {
    entry: &'a MemoryEntry,
    released: &'a AtomicUsize,
}

impl RegistryEntry for MemoryHandle<'_> {
    fn property(&self, key: PropertyKey) -> Option<PropertyValue> {
        self.entry.properties.get(&key).cloned()
    }
}

impl Drop for MemoryHandle<'_> {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

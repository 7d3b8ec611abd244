//! Result of one registry poll.
//!
//! [`Snapshot`] is an **owned**, read-only view of every recognized device's state
//! at the time of a poll. It's produced by
//! [`DeviceRegistryPoller::poll`](crate::poller::DeviceRegistryPoller::poll) and is
//! cheap to clone for fan-out to presentation and alerting consumers.
//!
//! # Semantics
//! - Keys are product names from [`KNOWN_DEVICES`]; there is always exactly one
//!   entry per known name.
//! - Iteration order is sorted by name, so consumers see a stable order.
//! - A snapshot does **not** poll. To refresh, poll again.
//! - Deserialization checks the same shape: unknown or missing devices, a `name` or
//!   `symbol` that disagrees with its key, and charges above 100% are rejected.
//!
//! # Example
//! ```
//! use batterywatch::Snapshot;
//!
//! let snap = Snapshot::seeded();
//! for (name, state) in snap.iter() {
//!     println!("{name}: {}% sufficient={}", state.battery_percent, state.is_sufficient());
//! }
//! ```

use crate::device::{DeviceState, KNOWN_DEVICES};
use crate::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Owned snapshot of device states (`product name → DeviceState`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, DeviceState>",
    into = "BTreeMap<String, DeviceState>"
)]
pub struct Snapshot(BTreeMap<String, DeviceState>);

impl Snapshot {
    /// One default (disconnected) entry per known device.
    pub fn seeded() -> Self {
        Snapshot(
            KNOWN_DEVICES
                .iter()
                .map(|(name, symbol)| (name.to_string(), DeviceState::new(*name, *symbol)))
                .collect(),
        )
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&DeviceState> {
        self.0.get(name)
    }

    /// Mutable access to an existing entry. Keys are never added through this.
    #[inline]
    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut DeviceState> {
        self.0.get_mut(name)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&String, &DeviceState)> {
        self.0.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Devices whose charge is not sufficient, in name order.
    pub fn insufficient(&self) -> impl Iterator<Item = &DeviceState> {
        self.0.values().filter(|s| !s.is_sufficient())
    }

    /// Devices with a real reading at or below the threshold, in name order.
    pub fn needing_charge(&self) -> impl Iterator<Item = &DeviceState> {
        self.0.values().filter(|s| s.needs_charging())
    }

    /// Serialize to pretty JSON for presentation layers.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Consume the snapshot and return the inner map.
    #[inline]
    pub fn into_inner(self) -> BTreeMap<String, DeviceState> {
        self.0
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::seeded()
    }
}

impl TryFrom<BTreeMap<String, DeviceState>> for Snapshot {
    type Error = Error;

    fn try_from(map: BTreeMap<String, DeviceState>) -> Result<Self, Self::Error> {
        let unknown = map
            .keys()
            .find(|k| !KNOWN_DEVICES.iter().any(|(n, _)| *n == k.as_str()));
        if let Some(name) = unknown {
            return Err(Error::InvalidSnapshot(format!("unknown device {name:?}")));
        }
        for (name, symbol) in KNOWN_DEVICES {
            let Some(state) = map.get(name) else {
                return Err(Error::InvalidSnapshot(format!("missing device {name:?}")));
            };
            if state.name != name {
                return Err(Error::InvalidSnapshot(format!(
                    "entry {name:?} is named {:?}",
                    state.name
                )));
            }
            if state.symbol != symbol {
                return Err(Error::InvalidSnapshot(format!(
                    "entry {name:?} has symbol {:?}",
                    state.symbol
                )));
            }
            if state.battery_percent > 100 {
                return Err(Error::InvalidSnapshot(format!(
                    "entry {name:?} reports {}%",
                    state.battery_percent
                )));
            }
        }
        Ok(Snapshot(map))
    }
}

impl From<Snapshot> for BTreeMap<String, DeviceState> {
    fn from(snapshot: Snapshot) -> Self {
        snapshot.0
    }
}

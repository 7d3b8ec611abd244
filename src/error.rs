//! Crate error type.
//!
//! Most of the crate degrades silently (see [`DeviceRegistryPoller`](crate::poller::DeviceRegistryPoller)),
//! so these errors mostly surface from registry backends and configuration loading.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The hardware registry could not be enumerated (unsupported host, driver failure, ...).
    #[error("registry enumeration failed: {0}")]
    Enumeration(String),

    #[error("configuration error: {0}")]
    Config(String),

    /// A deserialized snapshot does not describe exactly the known devices.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

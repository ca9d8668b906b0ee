//! Keymap sources: where physical layouts and keymaps come from.
//!
//! The device speaks its own RPC protocol through an external client; this
//! crate never sees the wire format.  It only consumes already-decoded data
//! through the [`KeymapSource`] trait.
//!
//! # Testability
//!
//! Application code depends on the trait, so unit tests substitute the
//! mockall-generated `MockKeymapSource` and the CLI uses [`snapshot::SnapshotSource`].

use std::path::PathBuf;

use async_trait::async_trait;
use keyview_core::{Keymap, PhysicalLayouts};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::connection::LockState;

pub mod snapshot;

pub use snapshot::SnapshotSource;

/// Identity the device reports about itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
}

/// Error type for keymap source reads.
#[derive(Debug, Error)]
pub enum SourceError {
    /// A file system I/O error occurred.
    #[error("I/O error reading device snapshot at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot content could not be parsed.
    #[error("failed to parse device snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    /// The device refuses keymap reads until it is unlocked.
    #[error("device is locked")]
    Locked,
}

/// Trait abstracting a connected device's keymap service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeymapSource: Send + Sync {
    /// Human-readable name of the transport, e.g. a serial port.
    fn label(&self) -> String;

    /// Current lock state of the device.
    async fn lock_state(&self) -> Result<LockState, SourceError>;

    /// Device name and serial number.
    async fn device_info(&self) -> Result<DeviceInfo, SourceError>;

    /// All physical layouts plus the active index.  Requires an unlocked device.
    async fn physical_layouts(&self) -> Result<PhysicalLayouts, SourceError>;

    /// The keymap's layers and bindings.  Requires an unlocked device.
    async fn keymap(&self) -> Result<Keymap, SourceError>;
}

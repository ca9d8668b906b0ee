//! File-backed [`KeymapSource`] reading a JSON device snapshot.
//!
//! A snapshot is what the RPC client would return for each request, saved
//! into one document:
//!
//! ```json
//! {
//!   "device": { "name": "Corne", "serialNumber": "C0FFEE" },
//!   "lockState": "unlocked",
//!   "physicalLayouts": { "activeLayoutIndex": 0, "layouts": [ ... ] },
//!   "keymap": { "layers": [ ... ] }
//! }
//! ```
//!
//! The file is read once on open; the source then answers from memory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use keyview_core::{Keymap, PhysicalLayouts};
use serde::Deserialize;
use tracing::debug;

use super::{DeviceInfo, KeymapSource, SourceError};
use crate::application::connection::LockState;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeviceSnapshot {
    #[serde(default)]
    device: DeviceInfo,
    #[serde(default)]
    lock_state: LockState,
    #[serde(default)]
    physical_layouts: PhysicalLayouts,
    #[serde(default)]
    keymap: Keymap,
}

/// A device snapshot loaded from disk.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    label: String,
    snapshot: DeviceSnapshot,
}

impl SnapshotSource {
    /// Reads and parses the snapshot at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Io`] if the file cannot be read and
    /// [`SourceError::Parse`] if it is not a valid snapshot.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SourceError::Io {
                path: PathBuf::from(path),
                source,
            })?;
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_json(label, &content)
    }

    /// Parses a snapshot from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Parse`] if `json` is not a valid snapshot.
    pub fn from_json(label: impl Into<String>, json: &str) -> Result<Self, SourceError> {
        let snapshot: DeviceSnapshot = serde_json::from_str(json)?;
        let label = label.into();
        debug!(
            source = %label,
            layouts = snapshot.physical_layouts.layouts.len(),
            layers = snapshot.keymap.layers.len(),
            "device snapshot loaded"
        );
        Ok(Self { label, snapshot })
    }

    fn require_unlocked(&self) -> Result<(), SourceError> {
        match self.snapshot.lock_state {
            LockState::Unlocked => Ok(()),
            LockState::Locked => Err(SourceError::Locked),
        }
    }
}

#[async_trait]
impl KeymapSource for SnapshotSource {
    fn label(&self) -> String {
        self.label.clone()
    }

    async fn lock_state(&self) -> Result<LockState, SourceError> {
        Ok(self.snapshot.lock_state)
    }

    async fn device_info(&self) -> Result<DeviceInfo, SourceError> {
        Ok(self.snapshot.device.clone())
    }

    async fn physical_layouts(&self) -> Result<PhysicalLayouts, SourceError> {
        self.require_unlocked()?;
        Ok(self.snapshot.physical_layouts.clone())
    }

    async fn keymap(&self) -> Result<Keymap, SourceError> {
        self.require_unlocked()?;
        Ok(self.snapshot.keymap.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNLOCKED: &str = r#"{
        "device": {"name": "Corne", "serialNumber": "C0FFEE"},
        "lockState": "unlocked",
        "physicalLayouts": {"activeLayoutIndex": 0, "layouts": [{"name": "Default", "keys": [{"x": 0, "y": 0}]}]},
        "keymap": {"layers": [{"id": 0, "name": "Base", "bindings": [{"behaviorId": 1, "param1": 458756}]}]}
    }"#;

    #[tokio::test]
    async fn test_unlocked_snapshot_serves_layouts_and_keymap() {
        let source = SnapshotSource::from_json("test.json", UNLOCKED).unwrap();

        let layouts = source.physical_layouts().await.unwrap();
        let keymap = source.keymap().await.unwrap();

        assert_eq!(layouts.layouts.len(), 1);
        assert_eq!(keymap.key_label(0, 0).as_deref(), Some("A"));
        assert_eq!(source.label(), "test.json");
    }

    #[tokio::test]
    async fn test_device_info_is_parsed() {
        let source = SnapshotSource::from_json("t", UNLOCKED).unwrap();
        let info = source.device_info().await.unwrap();
        assert_eq!(info.name.as_deref(), Some("Corne"));
        assert_eq!(info.serial_number.as_deref(), Some("C0FFEE"));
    }

    #[tokio::test]
    async fn test_locked_snapshot_refuses_keymap_reads() {
        let source = SnapshotSource::from_json("t", r#"{"lockState": "locked"}"#).unwrap();

        assert_eq!(source.lock_state().await.unwrap(), LockState::Locked);
        assert!(matches!(source.physical_layouts().await, Err(SourceError::Locked)));
        assert!(matches!(source.keymap().await, Err(SourceError::Locked)));
    }

    #[tokio::test]
    async fn test_missing_lock_state_defaults_to_locked() {
        let source = SnapshotSource::from_json("t", "{}").unwrap();
        assert_eq!(source.lock_state().await.unwrap(), LockState::Locked);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            SnapshotSource::from_json("t", "{not json"),
            Err(SourceError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_open_missing_file_is_io_error() {
        let result = SnapshotSource::open("/nonexistent/keyview/snapshot.json").await;
        assert!(matches!(result, Err(SourceError::Io { .. })));
    }
}

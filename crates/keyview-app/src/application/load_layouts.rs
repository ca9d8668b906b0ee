//! LoadLayoutsUseCase: reads layouts and keymaps from a device into a session.
//!
//! [`DeviceSession`] ties the connection wizard to the layout session.
//! Device data is read only while the device is connected *and* unlocked.
//! Any other state clears it, so a locked keyboard never keeps showing a
//! keymap the user can no longer read.
//!
//! A read that was in flight when the connection or lock state changed
//! finishes with a stale [`RequestTicket`](super::connection::RequestTicket)
//! and its result is discarded.

use keyview_core::{Keymap, Viewport};
use tracing::{info, warn};

use super::connection::{ConnectWizard, LayoutRequests, LockState};
use super::session::LayoutSession;
use crate::infrastructure::source::{KeymapSource, SourceError};

/// What a load attempt did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Fresh layouts and keymap were applied.
    Loaded,
    /// The device cannot be read right now; device data was cleared.
    Cleared,
    /// The connection changed mid-read; the result was dropped.
    Stale,
}

/// Everything the app knows about the connected device.
#[derive(Debug, Clone)]
pub struct DeviceSession {
    wizard: ConnectWizard,
    layout: LayoutSession,
    keymap: Option<Keymap>,
    requests: LayoutRequests,
}

impl DeviceSession {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            wizard: ConnectWizard::new(),
            layout: LayoutSession::new(viewport),
            keymap: None,
            requests: LayoutRequests::new(),
        }
    }

    /// Opens `source` as the device transport, reads its lock state and
    /// identity, then loads device data if it is unlocked.
    ///
    /// # Errors
    ///
    /// Propagates any [`SourceError`] from the source.
    pub async fn connect<S>(&mut self, source: &S) -> Result<LoadOutcome, SourceError>
    where
        S: KeymapSource + ?Sized,
    {
        self.requests.invalidate();
        self.wizard.transport_connected(Some(source.label()));

        let lock_state = source.lock_state().await?;
        self.wizard.lock_state_changed(lock_state);

        let info = source.device_info().await?;
        self.wizard.device_identified(info.name, info.serial_number);

        self.load_layouts(source).await
    }

    /// Loads physical layouts and the keymap when the device may be read.
    ///
    /// # Errors
    ///
    /// Propagates any [`SourceError`] from the source.  Device data already
    /// in the session is left untouched on error.
    pub async fn load_layouts<S>(&mut self, source: &S) -> Result<LoadOutcome, SourceError>
    where
        S: KeymapSource + ?Sized,
    {
        if !self.wizard.can_read_device() {
            self.clear_device_data();
            return Ok(LoadOutcome::Cleared);
        }

        let ticket = self.requests.begin();
        let layouts = source.physical_layouts().await?;
        let keymap = source.keymap().await?;

        if !self.requests.is_current(ticket) {
            warn!("connection changed during layout read, discarding result");
            return Ok(LoadOutcome::Stale);
        }

        info!(
            layouts = layouts.layouts.len(),
            layers = keymap.layers.len(),
            "device data loaded"
        );
        self.layout.set_layouts(layouts);
        self.keymap = Some(keymap);
        Ok(LoadOutcome::Loaded)
    }

    /// Applies a lock state change pushed by the device.
    pub fn set_lock_state(&mut self, state: LockState) {
        self.requests.invalidate();
        self.wizard.lock_state_changed(state);
        if state == LockState::Locked {
            self.clear_device_data();
        }
    }

    /// Tears down the connection and clears device data.
    pub fn disconnect(&mut self) {
        self.requests.invalidate();
        self.wizard.disconnected();
        self.clear_device_data();
    }

    /// Shared handle for invalidating in-flight reads from another task.
    pub fn requests(&self) -> LayoutRequests {
        self.requests.clone()
    }

    pub fn wizard(&self) -> &ConnectWizard {
        &self.wizard
    }

    pub fn layout(&self) -> &LayoutSession {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut LayoutSession {
        &mut self.layout
    }

    pub fn keymap(&self) -> Option<&Keymap> {
        self.keymap.as_ref()
    }

    fn clear_device_data(&mut self) {
        self.layout.clear_layouts();
        self.keymap = None;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

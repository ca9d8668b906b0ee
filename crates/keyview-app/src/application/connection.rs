//! Connection wizard, device metadata, and stale-request protection.
//!
//! # Wizard lifecycle
//!
//! ```text
//! Connect ──(transport opened)──► Unlock ──(device unlocked)──► Finish
//!    ▲                                                             │
//!    └────────────────────────(disconnected)───────────────────────┘
//! ```
//!
//! A device starts locked.  Layouts and keymaps may only be read once the
//! user unlocks it on the keyboard itself, so the wizard waits in `Unlock`
//! until the source reports [`LockState::Unlocked`].

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Whether the device currently allows reading its keymap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockState {
    #[default]
    Locked,
    Unlocked,
}

/// Metadata about the connected device, shown in the header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceMeta {
    pub port_name: Option<String>,
    pub device_name: Option<String>,
    pub serial_number: Option<String>,
}

impl DeviceMeta {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// One step of the connection wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConnectStep {
    Connect = 1,
    Unlock = 2,
    Finish = 3,
}

impl ConnectStep {
    pub const ALL: [ConnectStep; 3] = [ConnectStep::Connect, ConnectStep::Unlock, ConnectStep::Finish];

    /// 1-based position shown in the step indicator.
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            ConnectStep::Connect => "Connect",
            ConnectStep::Unlock => "Unlock",
            ConnectStep::Finish => "Finish",
        }
    }
}

/// Connection state container: wizard step, lock state, and device metadata.
#[derive(Debug, Clone)]
pub struct ConnectWizard {
    step: ConnectStep,
    connected: bool,
    lock_state: LockState,
    meta: DeviceMeta,
}

impl Default for ConnectWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectWizard {
    pub fn new() -> Self {
        Self {
            step: ConnectStep::Connect,
            connected: false,
            lock_state: LockState::Locked,
            meta: DeviceMeta::default(),
        }
    }

    /// Records a newly opened transport and moves on to unlocking.
    pub fn transport_connected(&mut self, port_name: Option<String>) {
        info!(port = port_name.as_deref().unwrap_or("<unnamed>"), "transport connected");
        self.connected = true;
        self.meta.port_name = port_name;
        self.advance_to(ConnectStep::Unlock);
        // Some devices are already unlocked when the transport opens.
        if self.lock_state == LockState::Unlocked {
            self.advance_to(ConnectStep::Finish);
        }
    }

    /// Records the device's lock state as reported by the source.
    pub fn lock_state_changed(&mut self, state: LockState) {
        if self.lock_state != state {
            info!(?state, "device lock state changed");
        }
        self.lock_state = state;
        if self.connected && state == LockState::Unlocked {
            self.advance_to(ConnectStep::Finish);
        }
    }

    /// Records device identity once it has been read.
    pub fn device_identified(&mut self, name: Option<String>, serial_number: Option<String>) {
        self.meta.device_name = name;
        self.meta.serial_number = serial_number;
    }

    /// Tears the connection down and restarts the wizard.
    pub fn disconnected(&mut self) {
        info!("transport disconnected");
        self.connected = false;
        self.lock_state = LockState::Locked;
        self.meta.reset();
        self.step = ConnectStep::Connect;
    }

    pub fn step(&self) -> ConnectStep {
        self.step
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn lock_state(&self) -> LockState {
        self.lock_state
    }

    /// `true` when device data may be read.
    pub fn can_read_device(&self) -> bool {
        self.connected && self.lock_state == LockState::Unlocked
    }

    pub fn meta(&self) -> &DeviceMeta {
        &self.meta
    }

    /// Steps never move backwards except through [`ConnectWizard::disconnected`].
    fn advance_to(&mut self, step: ConnectStep) {
        if step > self.step {
            debug!(from = ?self.step, to = ?step, "wizard step advanced");
            self.step = step;
        }
    }
}

/// Generation stamps for in-flight device reads.
///
/// Every connection or lock change calls [`LayoutRequests::invalidate`].  A
/// read started before that change finishes with a stale ticket and its
/// result must be dropped.  Cloning shares the counter.
#[derive(Debug, Clone, Default)]
pub struct LayoutRequests {
    generation: Arc<AtomicU64>,
}

/// Stamp taken when a read starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

impl LayoutRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new read.
    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.generation.load(Ordering::Acquire))
    }

    /// Marks every outstanding ticket stale.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// `true` if nothing has been invalidated since `ticket` was issued.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.generation.load(Ordering::Acquire) == ticket.0
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

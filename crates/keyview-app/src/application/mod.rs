//! Application layer for Keyview.
//!
//! Use cases here own all session state.  Each state container is a plain
//! struct handed to whoever needs it, so tests can build as many independent
//! sessions as they like.
//!
//! # Sub-modules
//!
//! - **`session`**      – The layout being viewed: derived bounds and
//!   view transform, and the selected key.  Recomputes on every layout or
//!   viewport change.
//!
//! - **`connection`**   – Connect/unlock wizard, device metadata, and the
//!   request stamps that discard stale layout fetches.
//!
//! - **`load_layouts`** – Fetches layouts and keymaps from a
//!   [`KeymapSource`](crate::infrastructure::source::KeymapSource) when the
//!   device is connected and unlocked.
//!
//! - **`inspect_key`**  – Details shown for the selected key.

pub mod connection;
pub mod inspect_key;
pub mod load_layouts;
pub mod session;

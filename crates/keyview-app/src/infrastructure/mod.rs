//! Infrastructure layer: everything that touches files or the environment.
//!
//! - **`source`**  – Where physical layouts and keymaps come from.
//! - **`storage`** – TOML configuration and persisted UI state.

pub mod source;
pub mod storage;

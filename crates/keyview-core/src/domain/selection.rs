//! Selected-key state.
//!
//! Only hit-test results and explicit selection requests change it.  The
//! owner clears it whenever the layout changes, since an index from the old
//! layout may not exist in the new one.

use super::layout::{Layout, LayoutError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected_key_index: Option<usize>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected key index.
    pub fn selected(&self) -> Option<usize> {
        self.selected_key_index
    }

    /// Selects `index` after checking it exists in `layout`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::KeyIndexOutOfRange`] and leaves the selection
    /// untouched if the layout has no such key.
    pub fn select(&mut self, layout: &Layout, index: usize) -> Result<(), LayoutError> {
        layout.key(index)?;
        self.selected_key_index = Some(index);
        Ok(())
    }

    /// Records the outcome of a click: a hit selects, a miss clears.
    pub fn apply_hit(&mut self, hit: Option<usize>) {
        self.selected_key_index = hit;
    }

    pub fn clear(&mut self) {
        self.selected_key_index = None;
    }
}

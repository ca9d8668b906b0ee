//! LayoutSession: the physical layout being viewed and everything derived from it.
//!
//! The session owns three kinds of state:
//!
//! - the device's [`PhysicalLayouts`] snapshot and which one is shown,
//! - the derived [`Bounds`] and [`ViewTransform`] for the current viewport,
//! - the [`SelectionState`].
//!
//! Derived state is never stale: every method that changes an input
//! recomputes what depends on it before returning.
//!
//! ```text
//! set_layouts / select_layout ──► bounds ──► transform   (selection cleared)
//! resize                     ──────────────► transform   (selection kept)
//! click                      ──► hit_test ──► selection
//! ```

use keyview_core::{
    hit_test, Bounds, KeyShape, Layout, LayoutError, PhysicalLayouts, Point, SelectionState,
    ViewTransform, Viewport,
};
use thiserror::Error;
use tracing::{debug, info};

/// Error type for session operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// No physical layout has been loaded yet.
    #[error("no physical layout loaded")]
    NoLayout,

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// View state for one device's physical layouts.
#[derive(Debug, Clone)]
pub struct LayoutSession {
    layouts: Option<PhysicalLayouts>,
    selected_layout_index: usize,
    viewport: Viewport,
    bounds: Bounds,
    transform: ViewTransform,
    selection: SelectionState,
}

impl LayoutSession {
    /// Creates an empty session drawing into `viewport`.
    pub fn new(viewport: Viewport) -> Self {
        let bounds = Bounds::FALLBACK;
        Self {
            layouts: None,
            selected_layout_index: 0,
            viewport,
            bounds,
            transform: ViewTransform::fit_viewport(&bounds, &viewport),
            selection: SelectionState::new(),
        }
    }

    /// Replaces the layout snapshot and shows the device's active layout.
    pub fn set_layouts(&mut self, layouts: PhysicalLayouts) {
        let index = if layouts.active_layout_index < layouts.layouts.len() {
            layouts.active_layout_index
        } else {
            0
        };
        info!(
            count = layouts.layouts.len(),
            active = index,
            "physical layouts loaded"
        );
        self.layouts = Some(layouts);
        self.selected_layout_index = index;
        self.on_layout_changed();
    }

    /// Drops the layout snapshot, e.g. after a disconnect or lock.
    pub fn clear_layouts(&mut self) {
        if self.layouts.take().is_some() {
            info!("physical layouts cleared");
        }
        self.selected_layout_index = 0;
        self.on_layout_changed();
    }

    /// Shows a different layout from the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoLayout`] if no snapshot is loaded, or
    /// [`LayoutError::LayoutIndexOutOfRange`] if `index` does not exist.
    pub fn select_layout(&mut self, index: usize) -> Result<(), SessionError> {
        let layouts = self.layouts.as_ref().ok_or(SessionError::NoLayout)?;
        layouts.get(index)?;
        self.selected_layout_index = index;
        self.on_layout_changed();
        Ok(())
    }

    /// Updates the viewport size and refits the layout.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport.width = width;
        self.viewport.height = height;
        self.refit();
    }

    /// Handles a pointer press at viewport pixel `(x, y)`.
    ///
    /// Selects the topmost key under the pointer, or clears the selection if
    /// the pointer misses every key.  Returns the new selection.
    pub fn click(&mut self, x: f64, y: f64) -> Option<usize> {
        let hit = self
            .active_layout()
            .and_then(|layout| hit_test(Point::new(x, y), layout.keys(), &self.transform));
        self.selection.apply_hit(hit);
        debug!(x, y, ?hit, "click");
        hit
    }

    /// Explicitly selects a key, or clears the selection with `None`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoLayout`] when selecting with no layout shown, or
    /// [`LayoutError::KeyIndexOutOfRange`] for an index the layout lacks.
    pub fn select_key(&mut self, index: Option<usize>) -> Result<(), SessionError> {
        match index {
            None => {
                self.selection.clear();
                Ok(())
            }
            Some(index) => {
                let layout = self
                    .layouts
                    .as_ref()
                    .and_then(|l| l.layouts.get(self.selected_layout_index))
                    .ok_or(SessionError::NoLayout)?;
                self.selection.select(layout, index)?;
                Ok(())
            }
        }
    }

    /// The layout currently shown, if any.
    pub fn active_layout(&self) -> Option<&Layout> {
        self.layouts
            .as_ref()
            .and_then(|l| l.layouts.get(self.selected_layout_index))
    }

    /// All layouts in the current snapshot.
    pub fn layouts(&self) -> Option<&PhysicalLayouts> {
        self.layouts.as_ref()
    }

    pub fn selected_layout_index(&self) -> usize {
        self.selected_layout_index
    }

    pub fn selected_key(&self) -> Option<usize> {
        self.selection.selected()
    }

    /// Shape of the selected key in the shown layout.
    pub fn selected_key_shape(&self) -> Option<&KeyShape> {
        let index = self.selection.selected()?;
        self.active_layout()?.keys().get(index)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn on_layout_changed(&mut self) {
        self.selection.clear();
        self.bounds = self
            .active_layout()
            .map_or(Bounds::FALLBACK, Layout::bounds);
        self.refit();
    }

    fn refit(&mut self) {
        self.transform = ViewTransform::fit_viewport(&self.bounds, &self.viewport);
        debug!(
            width = self.viewport.width,
            height = self.viewport.height,
            scale = self.transform.scale,
            "view transform recomputed"
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn unit_layout(name: &str) -> Layout {
        Layout::new(name, vec![KeyShape::new(0, 0.0, 0.0, 1.0, 1.0)])
    }

    fn row_layout(name: &str, n: usize) -> Layout {
        Layout::new(
            name,
            (0..n).map(|i| KeyShape::new(i, i as f64, 0.0, 1.0, 1.0)).collect(),
        )
    }

    fn session_with(layouts: Vec<Layout>, active: usize) -> LayoutSession {
        let mut session = LayoutSession::new(Viewport::new(200.0, 200.0));
        session.set_layouts(PhysicalLayouts {
            layouts,
            active_layout_index: active,
        });
        session
    }

    // ── set_layouts / clear_layouts ───────────────────────────────────────────

    #[test]
    fn test_new_session_has_no_layout_and_fallback_bounds() {
        let session = LayoutSession::new(Viewport::new(200.0, 200.0));
        assert!(session.active_layout().is_none());
        assert_eq!(*session.bounds(), Bounds::FALLBACK);
        assert!(session.transform().scale.is_finite());
    }

    #[test]
    fn test_set_layouts_shows_device_active_layout() {
        let session = session_with(vec![unit_layout("a"), row_layout("b", 3)], 1);
        assert_eq!(session.active_layout().map(Layout::name), Some("b"));
        assert!((session.bounds().max_x - 3.0).abs() < EPS);
    }

    #[test]
    fn test_set_layouts_with_invalid_active_index_shows_first() {
        let session = session_with(vec![unit_layout("a")], 7);
        assert_eq!(session.selected_layout_index(), 0);
    }

    #[test]
    fn test_set_layouts_computes_unit_key_transform() {
        let session = session_with(vec![unit_layout("a")], 0);
        let t = session.transform();
        assert!((t.scale - 176.0).abs() < EPS);
        assert!((t.offset_x - 12.0).abs() < EPS);
    }

    #[test]
    fn test_set_layouts_clears_selection() {
        let mut session = session_with(vec![row_layout("a", 4)], 0);
        session.select_key(Some(3)).unwrap();

        session.set_layouts(PhysicalLayouts {
            layouts: vec![unit_layout("b")],
            active_layout_index: 0,
        });

        assert_eq!(session.selected_key(), None);
    }

    #[test]
    fn test_clear_layouts_resets_bounds_and_selection() {
        let mut session = session_with(vec![row_layout("a", 4)], 0);
        session.select_key(Some(1)).unwrap();

        session.clear_layouts();

        assert!(session.layouts().is_none());
        assert_eq!(session.selected_key(), None);
        assert_eq!(*session.bounds(), Bounds::FALLBACK);
    }

    // ── select_layout ─────────────────────────────────────────────────────────

    #[test]
    fn test_select_layout_switches_and_clears_selection() {
        let mut session = session_with(vec![unit_layout("a"), row_layout("b", 2)], 0);
        session.select_key(Some(0)).unwrap();

        session.select_layout(1).unwrap();

        assert_eq!(session.active_layout().map(Layout::name), Some("b"));
        assert_eq!(session.selected_key(), None);
    }

    #[test]
    fn test_select_layout_rejects_out_of_range_index() {
        let mut session = session_with(vec![unit_layout("a")], 0);
        assert_eq!(
            session.select_layout(3),
            Err(SessionError::Layout(LayoutError::LayoutIndexOutOfRange { index: 3, count: 1 }))
        );
        assert_eq!(session.selected_layout_index(), 0);
    }

    #[test]
    fn test_select_layout_without_snapshot_fails() {
        let mut session = LayoutSession::new(Viewport::new(100.0, 100.0));
        assert_eq!(session.select_layout(0), Err(SessionError::NoLayout));
    }

    // ── resize ────────────────────────────────────────────────────────────────

    #[test]
    fn test_resize_refits_and_keeps_selection() {
        let mut session = session_with(vec![unit_layout("a")], 0);
        session.select_key(Some(0)).unwrap();

        session.resize(400.0, 100.0);

        assert!((session.transform().scale - 76.0).abs() < EPS);
        assert_eq!(session.selected_key(), Some(0));
    }

    // ── click / select_key ────────────────────────────────────────────────────

    #[test]
    fn test_click_on_key_selects_it() {
        let mut session = session_with(vec![unit_layout("a")], 0);
        assert_eq!(session.click(100.0, 100.0), Some(0));
        assert_eq!(session.selected_key(), Some(0));
        assert!(session.selected_key_shape().is_some());
    }

    #[test]
    fn test_click_outside_clears_selection() {
        let mut session = session_with(vec![unit_layout("a")], 0);
        session.click(100.0, 100.0);

        assert_eq!(session.click(1.0, 1.0), None);
        assert_eq!(session.selected_key(), None);
    }

    #[test]
    fn test_click_without_layout_returns_none() {
        let mut session = LayoutSession::new(Viewport::new(200.0, 200.0));
        assert_eq!(session.click(100.0, 100.0), None);
    }

    #[test]
    fn test_select_key_validates_index() {
        let mut session = session_with(vec![row_layout("a", 2)], 0);
        assert_eq!(
            session.select_key(Some(2)),
            Err(SessionError::Layout(LayoutError::KeyIndexOutOfRange { index: 2, len: 2 }))
        );
    }

    #[test]
    fn test_select_key_none_clears() {
        let mut session = session_with(vec![row_layout("a", 2)], 0);
        session.select_key(Some(1)).unwrap();
        session.select_key(None).unwrap();
        assert_eq!(session.selected_key(), None);
    }
}

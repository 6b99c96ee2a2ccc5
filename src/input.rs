//! Browser input: pixel to cell conversion, click targets and hover tracking.
//!
//! Pointer events arrive in DOM pixels. They are converted to terminal cells,
//! hit-tested against the widgets registered during the last draw, and turned
//! into [`WidgetEvent`]s for the menu.

use ratzilla::ratatui::layout::Rect;

use crate::host::{WidgetEvent, WidgetHandle};

/// A region on screen that belongs to a listening widget.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    /// The rectangular region (in terminal cell coordinates) for hit testing.
    pub rect: Rect,
    pub widget: WidgetHandle,
}

/// Shared state between the render loop and the pointer handler.
#[derive(Default)]
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
    hovered: Option<WidgetHandle>,
}

impl ClickState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, widget: WidgetHandle) {
        self.targets.push(ClickTarget { rect, widget });
    }

    /// Hit-test a terminal cell coordinate against all registered targets.
    /// Later targets are painted on top, so the last registered match wins.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<WidgetHandle> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            if col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height {
                Some(t.widget)
            } else {
                None
            }
        })
    }

    /// Track the pointer moving over `cell`. Returns the leave event for the
    /// previously hovered widget and the enter event for the new one.
    pub fn pointer_moved(&mut self, cell: Option<(u16, u16)>) -> Vec<WidgetEvent> {
        let under = cell.and_then(|(col, row)| self.hit_test(col, row));
        if under == self.hovered {
            return Vec::new();
        }
        let mut events = Vec::with_capacity(2);
        if let Some(previous) = self.hovered {
            events.push(WidgetEvent::MouseLeave(previous));
        }
        if let Some(next) = under {
            events.push(WidgetEvent::MouseEnter(next));
        }
        self.hovered = under;
        events
    }

    /// The primary action of whatever widget is under `cell`.
    pub fn pointer_pressed(&self, col: u16, row: u16) -> Option<WidgetEvent> {
        self.hit_test(col, row)
            .map(|widget| WidgetEvent::Action { widget, index: 0 })
    }

    /// Forget the hovered widget, e.g. when it is no longer on screen.
    pub fn reset_hover(&mut self) {
        self.hovered = None;
    }

    pub fn hovered(&self) -> Option<WidgetHandle> {
        self.hovered
    }
}

/// Convert a pixel Y coordinate to a terminal row index.
///
/// `click_y` is relative to the grid container's top edge.
/// `grid_height` is the total pixel height of the grid container.
/// `terminal_rows` is the number of rows in the terminal.
///
/// Returns `None` if the click is outside the grid or inputs are invalid.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    if grid_height <= 0.0 || terminal_rows == 0 || click_y < 0.0 {
        return None;
    }

    let cell_height = grid_height / terminal_rows as f64;
    let row = (click_y / cell_height) as u16;

    if row >= terminal_rows {
        return None;
    }

    Some(row)
}

/// Convert a pixel X coordinate to a terminal column index.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    if grid_width <= 0.0 || terminal_cols == 0 || click_x < 0.0 {
        return None;
    }
    let cell_width = grid_width / terminal_cols as f64;
    let col = (click_x / cell_width) as u16;
    if col >= terminal_cols { None } else { Some(col) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ICON: WidgetHandle = WidgetHandle(4);
    const MAP: WidgetHandle = WidgetHandle(2);

    // ── hit_test tests ──────────────────────────────────────────────

    #[test]
    fn hit_test_miss_returns_none() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 10, 80, 1), ICON);

        assert_eq!(cs.hit_test(5, 9), None);
        assert_eq!(cs.hit_test(5, 11), None);
    }

    #[test]
    fn hit_test_multi_row_rect() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 5, 40, 3), ICON);

        assert_eq!(cs.hit_test(10, 4), None);
        assert_eq!(cs.hit_test(10, 5), Some(ICON));
        assert_eq!(cs.hit_test(10, 7), Some(ICON));
        assert_eq!(cs.hit_test(10, 8), None);
    }

    #[test]
    fn hit_test_overlap_last_wins() {
        let mut cs = ClickState::new();
        // map first, icon painted over it
        cs.add_click_target(Rect::new(0, 0, 80, 20), MAP);
        cs.add_click_target(Rect::new(5, 5, 8, 3), ICON);

        assert_eq!(cs.hit_test(7, 6), Some(ICON));
        assert_eq!(cs.hit_test(0, 6), Some(MAP));
        assert_eq!(cs.hit_test(20, 19), Some(MAP));
    }

    #[test]
    fn click_state_clear() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 1, 80, 1), ICON);
        cs.clear_targets();
        assert!(cs.targets.is_empty());
        assert_eq!(cs.hit_test(0, 1), None);
    }

    // ── hover tracking ─────────────────────────────────────────────

    #[test]
    fn hover_emits_enter_then_leave() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(5, 5, 8, 3), ICON);

        assert_eq!(cs.pointer_moved(Some((6, 6))), vec![WidgetEvent::MouseEnter(ICON)]);
        // moving within the same widget is silent
        assert!(cs.pointer_moved(Some((7, 6))).is_empty());
        assert_eq!(cs.pointer_moved(Some((0, 0))), vec![WidgetEvent::MouseLeave(ICON)]);
        assert_eq!(cs.hovered(), None);
    }

    #[test]
    fn hover_between_adjacent_widgets() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 0, 10, 1), MAP);
        cs.add_click_target(Rect::new(10, 0, 10, 1), ICON);

        cs.pointer_moved(Some((2, 0)));
        assert_eq!(
            cs.pointer_moved(Some((12, 0))),
            vec![WidgetEvent::MouseLeave(MAP), WidgetEvent::MouseEnter(ICON)]
        );
        assert_eq!(cs.pointer_moved(None), vec![WidgetEvent::MouseLeave(ICON)]);
    }

    #[test]
    fn press_targets_first_action_slot() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(5, 5, 8, 3), ICON);
        assert_eq!(
            cs.pointer_pressed(6, 6),
            Some(WidgetEvent::Action { widget: ICON, index: 0 })
        );
        assert_eq!(cs.pointer_pressed(0, 0), None);
    }

    // ── pixel coordinate conversion tests ──────────────────────────

    #[test]
    fn pixel_to_row_basic() {
        assert_eq!(pixel_y_to_row(0.0, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(14.0, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(15.0, 450.0, 30), Some(1));
        assert_eq!(pixel_y_to_row(449.0, 450.0, 30), Some(29));
    }

    #[test]
    fn pixel_to_row_out_of_bounds() {
        assert_eq!(pixel_y_to_row(450.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(-1.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 0.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 450.0, 0), None);
    }

    #[test]
    fn pixel_x_to_col_basic() {
        assert_eq!(pixel_x_to_col(0.0, 800.0, 80), Some(0));
        assert_eq!(pixel_x_to_col(10.0, 800.0, 80), Some(1));
        assert_eq!(pixel_x_to_col(799.0, 800.0, 80), Some(79));
        assert_eq!(pixel_x_to_col(800.0, 800.0, 80), None);
    }

    #[test]
    fn full_click_pipeline() {
        let mut cs = ClickState::new();
        cs.terminal_cols = 80;
        cs.terminal_rows = 30;
        cs.add_click_target(Rect::new(10, 11, 8, 3), ICON);

        let (grid_width, grid_height) = (800.0, 450.0);
        let col = pixel_x_to_col(125.0, grid_width, cs.terminal_cols).unwrap();
        let row = pixel_y_to_row(11.0 * 15.0 + 7.0, grid_height, cs.terminal_rows).unwrap();
        assert_eq!((col, row), (12, 11));
        assert_eq!(
            cs.pointer_pressed(col, row),
            Some(WidgetEvent::Action { widget: ICON, index: 0 })
        );
    }
}

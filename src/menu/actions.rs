//! Semantic actions bound to menu buttons.

use super::scanner::Teleport;

pub const ACTION_TEXT_TELEPORT: &str = "Teleport";
pub const ACTION_TEXT_SELECT: &str = "Select";
pub const ACTION_TEXT_BACK: &str = "Back";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuAction {
    /// Pointer entered region `i`'s index icon.
    HoverRegion(usize),
    /// Pointer left region `i`'s index icon.
    LeaveRegion(usize),
    /// Open region `i`'s map page.
    SelectRegion(usize),
    /// Return to the index page.
    Back,
    /// Fire a discovered teleport.
    Teleport(Teleport),
}

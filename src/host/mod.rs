//! Host UI port: the capability surface the menu engine drives.
//!
//! The engine never owns real widgets. It looks them up, creates them and
//! mutates them through [`HostUi`], which keeps it testable against the
//! in-memory [`sim::SimHost`].

pub mod sim;

use serde::{Deserialize, Serialize};

/// Packed host address of a built-in widget (`group << 16 | child`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetAddress(pub u32);

impl WidgetAddress {
    pub const fn new(group: u16, child: u16) -> Self {
        Self(((group as u32) << 16) | child as u32)
    }

    /// The packed value as the host scripts expect it.
    pub fn packed(self) -> i32 {
        self.0 as i32
    }
}

impl std::fmt::Display for WidgetAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.0 >> 16, self.0 & 0xffff)
    }
}

/// Handle to a live widget, whether looked up by address or created at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetHandle(pub usize);

/// Sprite identifier in the host sprite registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpriteId(pub i32);

/// Identifier of a host client script.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScriptId(pub i32);

/// Identifier of a host sound effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SoundEffect(pub i32);

/// How a widget dimension is interpreted by the host layout pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeMode {
    /// Dimension is in layout units.
    Absolute,
    /// Dimension is subtracted from the parent's size.
    Relative,
}

/// Work deferred to the host's next UI tick.
pub type Task = Box<dyn FnOnce(&mut dyn HostUi)>;

/// Pointer and menu events the host reports for widgets that listen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetEvent {
    MouseEnter(WidgetHandle),
    MouseLeave(WidgetHandle),
    /// A menu action was chosen on the widget; `index` is the action slot.
    Action { widget: WidgetHandle, index: usize },
}

impl WidgetEvent {
    pub fn widget(&self) -> WidgetHandle {
        match *self {
            WidgetEvent::MouseEnter(widget)
            | WidgetEvent::MouseLeave(widget)
            | WidgetEvent::Action { widget, .. } => widget,
        }
    }
}

/// Widget primitives, scheduling and side effects provided by the host.
///
/// Every call happens on the host's single UI thread.
pub trait HostUi {
    /// Look up a built-in widget. `None` when the host has not loaded it.
    fn widget(&self, address: WidgetAddress) -> Option<WidgetHandle>;

    /// Dynamic children of `parent`, in render order.
    fn children(&self, parent: WidgetHandle) -> Vec<WidgetHandle>;

    /// Text content of a widget, if it has any.
    fn text(&self, widget: WidgetHandle) -> Option<&str>;

    /// Position of a widget within its parent's child list.
    fn child_index(&self, widget: WidgetHandle) -> Option<usize>;

    /// Create a graphic widget as the last child of `parent`.
    fn create_graphic(&mut self, parent: WidgetHandle) -> WidgetHandle;

    fn set_position(&mut self, widget: WidgetHandle, x: i32, y: i32);
    fn set_size(&mut self, widget: WidgetHandle, width: i32, height: i32, mode: SizeMode);
    fn set_sprite(&mut self, widget: WidgetHandle, sprite: SpriteId);
    /// `opacity` in `0.0..=1.0`; 1.0 is fully opaque.
    fn set_opacity(&mut self, widget: WidgetHandle, opacity: f32);
    fn set_hidden(&mut self, widget: WidgetHandle, hidden: bool);
    fn set_name(&mut self, widget: WidgetHandle, name: &str);
    /// Register the label of menu action slot `index`.
    fn set_action(&mut self, widget: WidgetHandle, index: usize, label: &str);
    /// Whether the widget reports hover, leave and action events.
    fn set_has_listener(&mut self, widget: WidgetHandle, listening: bool);
    /// Request a layout/redraw pass for the widget.
    fn revalidate(&mut self, widget: WidgetHandle);

    /// Run `task` on the next UI tick rather than inline.
    fn invoke_later(&mut self, task: Task);
    fn run_script(&mut self, script: ScriptId, args: &[i32]);
    fn play_sound(&mut self, sound: SoundEffect);

    fn add_sprite_overrides(&mut self, overrides: &[(SpriteId, String)]);
    fn remove_sprite_overrides(&mut self, sprites: &[SpriteId]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_packs_group_and_child() {
        let addr = WidgetAddress::new(17, 0x0c);
        assert_eq!(addr, WidgetAddress(0x11000C));
        assert_eq!(addr.packed(), 0x11000C);
        assert_eq!(addr.to_string(), "17:12");
    }
}

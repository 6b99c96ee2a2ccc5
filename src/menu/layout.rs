//! Fixed addresses, geometry and ids of the portal nexus interface.

use crate::error::MenuError;
use crate::host::{HostUi, ScriptId, SizeMode, SoundEffect, SpriteId, WidgetAddress, WidgetHandle};

/// Interface group of the portal nexus.
pub const GROUP_NEXUS_PORTAL: u16 = 17;

pub const PORTAL_PANEL: WidgetAddress = WidgetAddress::new(GROUP_NEXUS_PORTAL, 0x02);
pub const PORTAL_MODEL: WidgetAddress = WidgetAddress::new(GROUP_NEXUS_PORTAL, 0x03);
pub const SCRY_TEXT: WidgetAddress = WidgetAddress::new(GROUP_NEXUS_PORTAL, 0x04);
pub const SCRY_SELECT: WidgetAddress = WidgetAddress::new(GROUP_NEXUS_PORTAL, 0x05);
pub const KEY_EVENTS_ALTERNATE: WidgetAddress = WidgetAddress::new(GROUP_NEXUS_PORTAL, 0x07);
pub const KEY_EVENTS_PRIMARY: WidgetAddress = WidgetAddress::new(GROUP_NEXUS_PORTAL, 0x08);
pub const SCROLLBOX_BORDER: WidgetAddress = WidgetAddress::new(GROUP_NEXUS_PORTAL, 0x09);
pub const TELEPORT_LIST: WidgetAddress = WidgetAddress::new(GROUP_NEXUS_PORTAL, 0x0B);
pub const LABELS_PRIMARY: WidgetAddress = WidgetAddress::new(GROUP_NEXUS_PORTAL, 0x0C);
pub const SCROLLBAR: WidgetAddress = WidgetAddress::new(GROUP_NEXUS_PORTAL, 0x0E);
pub const LABELS_ALTERNATE: WidgetAddress = WidgetAddress::new(GROUP_NEXUS_PORTAL, 0x10);

/// Built-in widgets the map menu replaces; hidden while it is shown.
pub const REPLACED_WIDGETS: [WidgetAddress; 6] = [
    PORTAL_MODEL,
    SCRY_TEXT,
    SCRY_SELECT,
    SCROLLBOX_BORDER,
    TELEPORT_LIST,
    SCROLLBAR,
];

pub const TELEPORT_ICON_SIZE: i32 = 24;
pub const MAP_SPRITE_X: i32 = 32;
pub const MAP_SPRITE_Y: i32 = 18;
pub const INDEX_MAP_WIDTH: i32 = 400;
pub const INDEX_MAP_HEIGHT: i32 = 214;
pub const REGION_MAP_WIDTH: i32 = 478;
pub const REGION_MAP_HEIGHT: i32 = 272;
pub const REGION_ICON_WIDTH: i32 = 50;
pub const REGION_ICON_HEIGHT: i32 = 41;
pub const BACK_BUTTON_X: i32 = 6;
pub const BACK_BUTTON_Y: i32 = 6;
pub const BACK_BUTTON_WIDTH: i32 = 30;
pub const BACK_BUTTON_HEIGHT: i32 = 23;
/// Offset of the expanded root panel below the interface title bar.
pub const ROOT_Y: i32 = 35;

/// Overlay lift applied while a region icon is hovered.
pub const HOVER_LIFT: i32 = 2;
pub const HOVER_OPACITY: f32 = 0.75;

/// Client script that fires a key-event row's keypress handler.
pub const SCRIPT_TRIGGER_KEY: ScriptId = ScriptId(1437);
pub const SPRITE_INDEX_MAP: SpriteId = SpriteId(2721);
pub const SPRITE_BACK_ARROW: SpriteId = SpriteId(1118);
pub const SOUND_BOOP: SoundEffect = SoundEffect(2266);

/// Look up a built-in widget, treating its absence as a host precondition failure.
pub fn require(host: &dyn HostUi, address: WidgetAddress) -> Result<WidgetHandle, MenuError> {
    host.widget(address).ok_or(MenuError::MissingWidget(address))
}

/// Resolve every replaced widget up front so a missing one aborts before
/// anything is hidden.
pub fn replaced_widgets(host: &dyn HostUi) -> Result<Vec<WidgetHandle>, MenuError> {
    REPLACED_WIDGETS
        .iter()
        .map(|&address| require(host, address))
        .collect()
}

pub fn set_replaced_visibility(host: &mut dyn HostUi, widgets: &[WidgetHandle], visible: bool) {
    for &widget in widgets {
        host.set_hidden(widget, !visible);
    }
}

/// Grow the root layer over the whole content area of the interface.
pub fn expand_root(host: &mut dyn HostUi, root: WidgetHandle) {
    host.set_position(root, 0, ROOT_Y);
    host.set_size(root, REGION_MAP_WIDTH, REGION_MAP_HEIGHT, SizeMode::Absolute);
}

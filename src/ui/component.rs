//! Graphic and button wrappers over host widgets.
//!
//! Each wrapper caches what it last pushed to the host and only calls the
//! host again when a value actually changes.

use crate::host::{HostUi, SizeMode, SpriteId, WidgetHandle};
use crate::menu::actions::MenuAction;

/// Opacity a fade-style button drops to while hovered.
pub const FADE_HOVER_OPACITY: f32 = 0.5;

/// A sprite-showing widget.
#[derive(Clone, Debug, PartialEq)]
pub struct Graphic {
    widget: WidgetHandle,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    sprite: Option<SpriteId>,
    opacity: f32,
    visible: bool,
}

impl Graphic {
    /// Create a graphic widget under `parent`.
    pub fn create(host: &mut dyn HostUi, parent: WidgetHandle) -> Self {
        Self {
            widget: host.create_graphic(parent),
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            sprite: None,
            opacity: 1.0,
            visible: true,
        }
    }

    pub fn widget(&self) -> WidgetHandle {
        self.widget
    }

    #[cfg(test)]
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    #[cfg(test)]
    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    #[cfg(test)]
    pub fn sprite(&self) -> Option<SpriteId> {
        self.sprite
    }

    #[cfg(test)]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    #[cfg(test)]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_position(&mut self, host: &mut dyn HostUi, x: i32, y: i32) {
        if (self.x, self.y) == (x, y) {
            return;
        }
        self.x = x;
        self.y = y;
        host.set_position(self.widget, x, y);
    }

    pub fn set_y(&mut self, host: &mut dyn HostUi, y: i32) {
        self.set_position(host, self.x, y);
    }

    pub fn set_size(&mut self, host: &mut dyn HostUi, width: i32, height: i32) {
        if (self.width, self.height) == (width, height) {
            return;
        }
        self.width = width;
        self.height = height;
        host.set_size(self.widget, width, height, SizeMode::Absolute);
    }

    pub fn set_sprite(&mut self, host: &mut dyn HostUi, sprite: SpriteId) {
        if self.sprite == Some(sprite) {
            return;
        }
        self.sprite = Some(sprite);
        host.set_sprite(self.widget, sprite);
    }

    pub fn set_opacity(&mut self, host: &mut dyn HostUi, opacity: f32) {
        if self.opacity == opacity {
            return;
        }
        self.opacity = opacity;
        host.set_opacity(self.widget, opacity);
    }

    pub fn set_visibility(&mut self, host: &mut dyn HostUi, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        host.set_hidden(self.widget, !visible);
    }

    pub fn revalidate(&self, host: &mut dyn HostUi) {
        host.revalidate(self.widget);
    }
}

/// How a button reacts to the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverStyle {
    /// Swap to the hover sprite.
    SpriteSwap,
    /// Keep the sprite and dip the opacity.
    Fade,
}

/// A graphic that reports hover, leave and menu actions.
#[derive(Clone, Debug, PartialEq)]
pub struct Button {
    graphic: Graphic,
    style: HoverStyle,
    sprite_standard: Option<SpriteId>,
    sprite_hover: Option<SpriteId>,
    name: String,
    actions: Vec<(String, MenuAction)>,
    on_hover: Option<MenuAction>,
    on_leave: Option<MenuAction>,
}

impl Button {
    pub fn create(host: &mut dyn HostUi, parent: WidgetHandle, style: HoverStyle) -> Self {
        Self {
            graphic: Graphic::create(host, parent),
            style,
            sprite_standard: None,
            sprite_hover: None,
            name: String::new(),
            actions: Vec::new(),
            on_hover: None,
            on_leave: None,
        }
    }

    #[cfg(test)]
    pub fn graphic(&self) -> &Graphic {
        &self.graphic
    }

    pub fn graphic_mut(&mut self) -> &mut Graphic {
        &mut self.graphic
    }

    pub fn widget(&self) -> WidgetHandle {
        self.graphic.widget()
    }

    #[cfg(test)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[cfg(test)]
    pub fn sprites(&self) -> (Option<SpriteId>, Option<SpriteId>) {
        (self.sprite_standard, self.sprite_hover)
    }

    /// Whether any click action is attached.
    #[cfg(test)]
    pub fn is_interactive(&self) -> bool {
        !self.actions.is_empty()
    }

    pub fn set_position(&mut self, host: &mut dyn HostUi, x: i32, y: i32) {
        self.graphic.set_position(host, x, y);
    }

    pub fn set_size(&mut self, host: &mut dyn HostUi, width: i32, height: i32) {
        self.graphic.set_size(host, width, height);
    }

    pub fn set_visibility(&mut self, host: &mut dyn HostUi, visible: bool) {
        self.graphic.set_visibility(host, visible);
    }

    /// Use one sprite for both the standard and hover state.
    pub fn set_sprite(&mut self, host: &mut dyn HostUi, sprite: SpriteId) {
        self.set_sprites(host, sprite, sprite);
    }

    pub fn set_sprites(&mut self, host: &mut dyn HostUi, standard: SpriteId, hover: SpriteId) {
        self.sprite_standard = Some(standard);
        self.sprite_hover = Some(hover);
        self.graphic.set_sprite(host, standard);
    }

    pub fn set_name(&mut self, host: &mut dyn HostUi, name: &str) {
        if self.name == name {
            return;
        }
        self.name = name.to_string();
        host.set_name(self.widget(), name);
    }

    /// Attach a labelled menu action in the next free slot.
    pub fn add_action(&mut self, host: &mut dyn HostUi, label: &str, action: MenuAction) {
        host.set_action(self.widget(), self.actions.len(), label);
        host.set_has_listener(self.widget(), true);
        self.actions.push((label.to_string(), action));
    }

    pub fn set_on_hover(&mut self, host: &mut dyn HostUi, action: MenuAction) {
        host.set_has_listener(self.widget(), true);
        self.on_hover = Some(action);
    }

    pub fn set_on_leave(&mut self, host: &mut dyn HostUi, action: MenuAction) {
        host.set_has_listener(self.widget(), true);
        self.on_leave = Some(action);
    }

    /// Apply hover feedback and return the hover action, if any.
    pub fn mouse_enter(&mut self, host: &mut dyn HostUi) -> Option<MenuAction> {
        match self.style {
            HoverStyle::SpriteSwap => {
                if let Some(sprite) = self.sprite_hover {
                    self.graphic.set_sprite(host, sprite);
                }
            }
            HoverStyle::Fade => self.graphic.set_opacity(host, FADE_HOVER_OPACITY),
        }
        self.on_hover.clone()
    }

    /// Undo hover feedback and return the leave action, if any.
    pub fn mouse_leave(&mut self, host: &mut dyn HostUi) -> Option<MenuAction> {
        match self.style {
            HoverStyle::SpriteSwap => {
                if let Some(sprite) = self.sprite_standard {
                    self.graphic.set_sprite(host, sprite);
                }
            }
            HoverStyle::Fade => self.graphic.set_opacity(host, 1.0),
        }
        self.on_leave.clone()
    }

    /// The action registered in slot `index`.
    pub fn action(&self, index: usize) -> Option<MenuAction> {
        self.actions.get(index).map(|(_, action)| action.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::sim::SimHost;
    use crate::menu::layout::PORTAL_PANEL;

    fn host_and_root() -> (SimHost, WidgetHandle) {
        let host = SimHost::nexus_portal(&[], &[]);
        let root = host.widget(PORTAL_PANEL).unwrap();
        (host, root)
    }

    #[test]
    fn graphic_pushes_state_to_host() {
        let (mut host, root) = host_and_root();
        let mut g = Graphic::create(&mut host, root);
        g.set_position(&mut host, 32, 18);
        g.set_size(&mut host, 400, 214);
        g.set_sprite(&mut host, SpriteId(2721));
        g.set_opacity(&mut host, 0.75);

        let w = host.get(g.widget()).unwrap();
        assert_eq!((w.x, w.y, w.width, w.height), (32, 18, 400, 214));
        assert_eq!(w.sprite, Some(SpriteId(2721)));
        assert_eq!(w.opacity, 0.75);
        assert_eq!(g.position(), (32, 18));
    }

    #[test]
    fn unchanged_values_are_not_pushed_again() {
        let (mut host, root) = host_and_root();
        let mut g = Graphic::create(&mut host, root);
        g.set_sprite(&mut host, SpriteId(1));
        g.set_opacity(&mut host, 0.5);

        // the host changes behind the wrapper's back
        host.set_sprite(g.widget(), SpriteId(7));
        host.set_opacity(g.widget(), 1.0);

        g.set_sprite(&mut host, SpriteId(1));
        g.set_opacity(&mut host, 0.5);
        let w = host.get(g.widget()).unwrap();
        assert_eq!(w.sprite, Some(SpriteId(7)));
        assert_eq!(w.opacity, 1.0);

        g.set_sprite(&mut host, SpriteId(2));
        assert_eq!(host.get(g.widget()).unwrap().sprite, Some(SpriteId(2)));
        assert_eq!(g.sprite(), Some(SpriteId(2)));
    }

    #[test]
    fn sprite_swap_button_swaps_on_hover() {
        let (mut host, root) = host_and_root();
        let mut b = Button::create(&mut host, root, HoverStyle::SpriteSwap);
        b.set_sprites(&mut host, SpriteId(1), SpriteId(2));
        b.set_on_hover(&mut host, MenuAction::HoverRegion(4));

        assert_eq!(b.mouse_enter(&mut host), Some(MenuAction::HoverRegion(4)));
        assert_eq!(host.get(b.widget()).unwrap().sprite, Some(SpriteId(2)));
        assert_eq!(b.mouse_leave(&mut host), None);
        assert_eq!(host.get(b.widget()).unwrap().sprite, Some(SpriteId(1)));
    }

    #[test]
    fn fade_button_dips_opacity() {
        let (mut host, root) = host_and_root();
        let mut b = Button::create(&mut host, root, HoverStyle::Fade);
        b.set_sprite(&mut host, SpriteId(9));
        b.mouse_enter(&mut host);
        assert_eq!(host.get(b.widget()).unwrap().opacity, FADE_HOVER_OPACITY);
        assert_eq!(host.get(b.widget()).unwrap().sprite, Some(SpriteId(9)));
        b.mouse_leave(&mut host);
        assert_eq!(host.get(b.widget()).unwrap().opacity, 1.0);
    }

    #[test]
    fn actions_register_in_slot_order() {
        let (mut host, root) = host_and_root();
        let mut b = Button::create(&mut host, root, HoverStyle::SpriteSwap);
        assert!(!b.is_interactive());
        b.add_action(&mut host, "Select", MenuAction::SelectRegion(0));
        b.add_action(&mut host, "Back", MenuAction::Back);

        let w = host.get(b.widget()).unwrap();
        assert!(w.listening);
        assert_eq!(w.action_labels(), vec!["Select", "Back"]);
        assert_eq!(b.action(1), Some(MenuAction::Back));
        assert_eq!(b.action(2), None);
    }

    #[test]
    fn plain_button_does_not_listen() {
        let (mut host, root) = host_and_root();
        let mut b = Button::create(&mut host, root, HoverStyle::SpriteSwap);
        b.set_sprite(&mut host, SpriteId(5));
        let w = host.get(b.widget()).unwrap();
        assert!(!w.listening);
        assert!(w.actions.is_empty());
    }
}

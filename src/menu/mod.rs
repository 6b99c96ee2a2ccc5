//! The map menu engine: availability scan, page composition, navigation and
//! teleport dispatch.

pub mod actions;
pub mod composer;
pub mod layout;
pub mod navigation;
pub mod scanner;
pub mod teleport;

use crate::config::MenuConfig;
use crate::definition::DefinitionStore;
use crate::error::MenuError;
use crate::host::{HostUi, WidgetEvent};

use actions::MenuAction;
use navigation::NavigationController;

/// One map menu, rebuilt from scratch each time the portal opens.
pub struct NexusMenu {
    config: MenuConfig,
    nav: Option<NavigationController>,
}

impl NexusMenu {
    pub fn new(config: MenuConfig) -> Self {
        Self { config, nav: None }
    }

    pub fn navigation(&self) -> Option<&NavigationController> {
        self.nav.as_ref()
    }

    /// Replace the portal's list with the map menu.
    ///
    /// Any previous menu is dropped first. Every host widget the menu depends
    /// on is resolved before anything is hidden or created, so a missing one
    /// leaves the portal untouched and no menu open.
    pub fn on_menu_opened(
        &mut self,
        store: &DefinitionStore,
        host: &mut dyn HostUi,
    ) -> Result<(), MenuError> {
        self.close();

        let root = layout::require(host, layout::PORTAL_PANEL)?;
        let replaced = layout::replaced_widgets(host)?;
        let available = scanner::scan_available_teleports(host)?;

        layout::set_replaced_visibility(host, &replaced, false);
        layout::expand_root(host, root);

        let menu = composer::compose(host, root, store, &available, &self.config);
        self.nav = Some(NavigationController::new(menu, host));
        Ok(())
    }

    /// Route a host widget event to the button that owns the widget.
    pub fn handle_event(&mut self, event: WidgetEvent, host: &mut dyn HostUi) {
        let Some(nav) = self.nav.as_mut() else {
            return;
        };
        let components = &mut nav.menu_mut().components;
        let Some(id) = components.find_by_widget(event.widget()) else {
            return;
        };
        let Some(button) = components.button_mut(id) else {
            return;
        };

        let action = match event {
            WidgetEvent::MouseEnter(_) => button.mouse_enter(host),
            WidgetEvent::MouseLeave(_) => button.mouse_leave(host),
            WidgetEvent::Action { index, .. } => button.action(index),
        };

        if let Some(action) = action {
            self.dispatch(action, host);
        }
    }

    /// Carry out a button's action.
    pub fn dispatch(&mut self, action: MenuAction, host: &mut dyn HostUi) {
        let Some(nav) = self.nav.as_mut() else {
            return;
        };
        match action {
            MenuAction::HoverRegion(region) => nav.on_icon_hover(host, region),
            MenuAction::LeaveRegion(region) => nav.on_icon_leave(host, region),
            MenuAction::SelectRegion(region) => nav.select_region(host, region),
            MenuAction::Back => nav.back(host),
            MenuAction::Teleport(teleport) => teleport::trigger_teleport(host, &teleport),
        }
    }

    /// Drop the composed menu, e.g. when the portal interface closes.
    pub fn close(&mut self) {
        self.nav = None;
    }
}

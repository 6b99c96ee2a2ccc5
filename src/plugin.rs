//! Plugin lifecycle: definition loading, sprite overrides and host events.

use crate::config::MenuConfig;
use crate::definition::DefinitionStore;
use crate::error::MenuError;
use crate::host::{HostUi, WidgetEvent};
use crate::menu::layout::GROUP_NEXUS_PORTAL;
use crate::menu::navigation::NavState;
use crate::menu::NexusMenu;

/// Title of the index page.
pub const INDEX_TITLE: &str = "Nexus map";

pub struct NexusPlugin {
    store: Option<DefinitionStore>,
    menu: NexusMenu,
}

impl NexusPlugin {
    pub fn new(config: MenuConfig) -> Self {
        Self {
            store: None,
            menu: NexusMenu::new(config),
        }
    }

    pub fn is_started(&self) -> bool {
        self.store.is_some()
    }

    #[cfg(test)]
    pub fn menu(&self) -> &NexusMenu {
        &self.menu
    }

    /// Name of the page the open menu shows: the index or a region's name.
    pub fn page_title(&self) -> Option<&str> {
        let nav = self.menu.navigation()?;
        match nav.state() {
            NavState::Index => Some(INDEX_TITLE),
            NavState::Region(id) => {
                let store = self.store.as_ref()?;
                store.region(id).map(|region| region.name.as_str())
            }
        }
    }

    /// Load definitions and install their sprite overrides.
    pub fn start_up(
        &mut self,
        store: Result<DefinitionStore, MenuError>,
        host: &mut dyn HostUi,
    ) -> Result<(), MenuError> {
        let store = store.inspect_err(|e| log::error!("start-up failed: {e}"))?;
        host.add_sprite_overrides(&store.sprite_overrides());
        self.store = Some(store);
        log::info!("nexus map menu started");
        Ok(())
    }

    /// Remove sprite overrides and forget the definitions.
    pub fn shut_down(&mut self, host: &mut dyn HostUi) {
        if let Some(store) = self.store.take() {
            host.remove_sprite_overrides(&store.sprite_ids());
        }
        self.menu.close();
        log::info!("nexus map menu stopped");
    }

    /// Host reported an interface group as loaded.
    pub fn on_widget_loaded(&mut self, group: u16, host: &mut dyn HostUi) -> Result<(), MenuError> {
        if group != GROUP_NEXUS_PORTAL {
            return Ok(());
        }
        let store = self.store.as_ref().ok_or(MenuError::NotStarted)?;
        self.menu.on_menu_opened(store, host)
    }

    /// Host reported the portal interface as closed.
    pub fn on_widget_closed(&mut self, group: u16) {
        if group == GROUP_NEXUS_PORTAL {
            self.menu.close();
        }
    }

    pub fn on_widget_event(&mut self, event: WidgetEvent, host: &mut dyn HostUi) {
        self.menu.handle_event(event, host);
    }
}

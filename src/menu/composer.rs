//! Builds the index page and one map page per region.

use crate::config::MenuConfig;
use crate::definition::{DefinitionStore, RegionDefinition, TeleportDefinition};
use crate::host::{HostUi, SpriteId, WidgetHandle};
use crate::ui::{Button, ComponentId, Components, Graphic, HoverStyle, Page};

use super::actions::{MenuAction, ACTION_TEXT_BACK, ACTION_TEXT_SELECT, ACTION_TEXT_TELEPORT};
use super::layout::*;
use super::scanner::{AvailableTeleports, Teleport};

/// Every page and component of one opened menu.
#[derive(Clone, Debug)]
pub struct ComposedMenu {
    pub components: Components,
    pub index_page: Page,
    pub region_pages: Vec<Page>,
    /// Region overlays on the index map, one per region.
    pub index_overlays: Vec<ComponentId>,
    /// Map background shared by every region page.
    pub map_graphic: ComponentId,
    pub map_sprites: Vec<SpriteId>,
}

impl ComposedMenu {
    pub fn region_count(&self) -> usize {
        self.region_pages.len()
    }
}

/// Region pages list the map, then the back arrow, then teleports in
/// definition order. The index lists each overlay followed by its icon.
#[cfg(test)]
impl ComposedMenu {
    pub fn back_button(&self) -> ComponentId {
        self.region_pages[0].members()[1]
    }

    pub fn teleport_button(&self, region: usize, k: usize) -> ComponentId {
        self.region_pages[region].members()[2 + k]
    }

    pub fn index_icon(&self, region: usize) -> Option<ComponentId> {
        let members = self.index_page.members();
        let overlay = members.iter().position(|&id| id == self.index_overlays[region])?;
        let next = *members.get(overlay + 1)?;
        self.components.button(next).map(|_| next)
    }
}

/// Name shown on an available teleport's icon.
pub fn format_teleport_name(
    definition: &TeleportDefinition,
    teleport: &Teleport,
    display_shortcuts: bool,
) -> String {
    let name = definition.display_name();
    if display_shortcuts {
        format!("[{}] {}", teleport.shortcut_key, name)
    } else {
        name
    }
}

/// Create every widget of the menu under `root`. Nothing is shown yet beyond
/// host defaults; navigation decides the visible page.
pub fn compose(
    host: &mut dyn HostUi,
    root: WidgetHandle,
    store: &DefinitionStore,
    available: &AvailableTeleports,
    config: &MenuConfig,
) -> ComposedMenu {
    let regions = store.regions();
    let mut components = Components::default();
    let mut index_page = Page::new();
    let mut region_pages: Vec<Page> = regions.iter().map(|_| Page::new()).collect();

    let index_overlays = create_index_menu(host, root, regions, &mut components, &mut index_page);

    let map_graphic = create_map_graphic(host, root, &mut components);
    let back_button = create_back_button(host, root, &mut components);
    for page in &mut region_pages {
        page.add(map_graphic);
        page.add(back_button);
    }

    for (region, page) in regions.iter().zip(region_pages.iter_mut()) {
        create_teleport_buttons(host, root, region, available, config, &mut components, page);
    }

    log::info!(
        "composed menu: {} regions, {} components, {} of {} teleports available",
        regions.len(),
        components.len(),
        available.len(),
        regions.iter().map(|r| r.teleports.len()).sum::<usize>()
    );

    ComposedMenu {
        components,
        index_page,
        region_pages,
        index_overlays,
        map_graphic,
        map_sprites: regions.iter().map(|r| r.map_sprite).collect(),
    }
}

fn create_index_menu(
    host: &mut dyn HostUi,
    root: WidgetHandle,
    regions: &[RegionDefinition],
    components: &mut Components,
    page: &mut Page,
) -> Vec<ComponentId> {
    let mut backing = Graphic::create(host, root);
    backing.set_position(host, MAP_SPRITE_X, MAP_SPRITE_Y);
    backing.set_size(host, INDEX_MAP_WIDTH, INDEX_MAP_HEIGHT);
    backing.set_sprite(host, SPRITE_INDEX_MAP);
    page.add(components.add_graphic(backing));

    let mut overlays = Vec::with_capacity(regions.len());

    for region in regions {
        let mut overlay = Graphic::create(host, root);
        overlay.set_position(host, MAP_SPRITE_X, MAP_SPRITE_Y);
        overlay.set_size(host, INDEX_MAP_WIDTH, INDEX_MAP_HEIGHT);
        overlay.set_sprite(host, region.index_sprite);
        let overlay = components.add_graphic(overlay);
        page.add(overlay);
        overlays.push(overlay);

        // Regions without teleports, or without an icon, cannot be opened.
        let Some(icon_def) = region.selectable_icon() else {
            continue;
        };

        let mut icon = Button::create(host, root, HoverStyle::SpriteSwap);
        icon.set_name(host, &region.name);
        icon.set_position(host, icon_def.x, icon_def.y);
        icon.set_size(host, REGION_ICON_WIDTH, REGION_ICON_HEIGHT);
        icon.set_sprites(host, icon_def.sprite_standard, icon_def.sprite_hover);
        icon.set_on_hover(host, MenuAction::HoverRegion(region.id));
        icon.set_on_leave(host, MenuAction::LeaveRegion(region.id));
        icon.add_action(host, ACTION_TEXT_SELECT, MenuAction::SelectRegion(region.id));
        page.add(components.add_button(icon));
    }

    overlays
}

fn create_map_graphic(
    host: &mut dyn HostUi,
    root: WidgetHandle,
    components: &mut Components,
) -> ComponentId {
    let mut map = Graphic::create(host, root);
    map.set_position(host, 0, 0);
    map.set_size(host, REGION_MAP_WIDTH, REGION_MAP_HEIGHT);
    components.add_graphic(map)
}

fn create_back_button(
    host: &mut dyn HostUi,
    root: WidgetHandle,
    components: &mut Components,
) -> ComponentId {
    let mut back = Button::create(host, root, HoverStyle::Fade);
    back.set_sprite(host, SPRITE_BACK_ARROW);
    back.set_position(host, BACK_BUTTON_X, BACK_BUTTON_Y);
    back.set_size(host, BACK_BUTTON_WIDTH, BACK_BUTTON_HEIGHT);
    back.add_action(host, ACTION_TEXT_BACK, MenuAction::Back);
    components.add_button(back)
}

fn create_teleport_buttons(
    host: &mut dyn HostUi,
    root: WidgetHandle,
    region: &RegionDefinition,
    available: &AvailableTeleports,
    config: &MenuConfig,
    components: &mut Components,
    page: &mut Page,
) {
    // Every defined teleport gets an icon, available or not.
    for definition in &region.teleports {
        let mut button = Button::create(host, root, HoverStyle::SpriteSwap);
        button.set_size(host, TELEPORT_ICON_SIZE, TELEPORT_ICON_SIZE);
        button.set_position(host, definition.x, definition.y);
        button.set_visibility(host, false);

        match available.get(&definition.name) {
            Some(teleport) => {
                button.set_sprite(host, definition.sprite_enabled);
                let name = format_teleport_name(definition, teleport, config.display_shortcuts);
                button.set_name(host, &name);
                button.add_action(
                    host,
                    ACTION_TEXT_TELEPORT,
                    MenuAction::Teleport(teleport.clone()),
                );
            }
            None => button.set_sprite(host, definition.sprite_disabled),
        }

        page.add(components.add_button(button));
    }
}

//! Page switching and index hover feedback.

use crate::host::HostUi;

use super::composer::ComposedMenu;
use super::layout::{HOVER_LIFT, HOVER_OPACITY, MAP_SPRITE_Y, SOUND_BOOP};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavState {
    Index,
    Region(usize),
}

/// Owns the composed menu and decides which of its pages is visible.
#[derive(Clone, Debug)]
pub struct NavigationController {
    menu: ComposedMenu,
}

impl NavigationController {
    /// Take over a freshly composed menu and show its index page.
    pub fn new(menu: ComposedMenu, host: &mut dyn HostUi) -> Self {
        let mut nav = Self { menu };
        nav.display_index_page(host);
        nav
    }

    /// Which page is showing, read from the pages themselves.
    pub fn state(&self) -> NavState {
        self.menu
            .region_pages
            .iter()
            .position(|page| page.is_visible())
            .map_or(NavState::Index, NavState::Region)
    }

    #[cfg(test)]
    pub fn menu(&self) -> &ComposedMenu {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut ComposedMenu {
        &mut self.menu
    }

    fn hide_region_pages(&mut self, host: &mut dyn HostUi) {
        let menu = &mut self.menu;
        for page in &mut menu.region_pages {
            page.set_visibility(&mut menu.components, host, false);
        }
    }

    /// Show the index and hide every region page.
    pub fn display_index_page(&mut self, host: &mut dyn HostUi) {
        self.hide_region_pages(host);
        let menu = &mut self.menu;
        menu.index_page
            .set_visibility(&mut menu.components, host, true);
        log::debug!("menu-nav: index");
    }

    /// Show region `region`'s map page and point the shared map at its sprite.
    pub fn display_map_page(&mut self, host: &mut dyn HostUi, region: usize) {
        if region >= self.menu.region_count() {
            log::warn!("menu-nav: ignoring unknown region {region}");
            return;
        }

        {
            let menu = &mut self.menu;
            menu.index_page
                .set_visibility(&mut menu.components, host, false);
        }
        self.hide_region_pages(host);

        let menu = &mut self.menu;
        menu.region_pages[region].set_visibility(&mut menu.components, host, true);
        let sprite = menu.map_sprites[region];
        if let Some(map) = menu.components.graphic_mut(menu.map_graphic) {
            map.set_sprite(host, sprite);
        }
        log::debug!("menu-nav: region {region}");
    }

    /// Index icon clicked.
    pub fn select_region(&mut self, host: &mut dyn HostUi, region: usize) {
        self.display_map_page(host, region);
        host.play_sound(SOUND_BOOP);
    }

    /// Back arrow clicked.
    pub fn back(&mut self, host: &mut dyn HostUi) {
        self.display_index_page(host);
        host.play_sound(SOUND_BOOP);
    }

    /// Lift and fade region `region`'s overlay on the index map.
    pub fn on_icon_hover(&mut self, host: &mut dyn HostUi, region: usize) {
        self.set_overlay(host, region, MAP_SPRITE_Y - HOVER_LIFT, HOVER_OPACITY);
    }

    /// Restore region `region`'s overlay.
    pub fn on_icon_leave(&mut self, host: &mut dyn HostUi, region: usize) {
        self.set_overlay(host, region, MAP_SPRITE_Y, 1.0);
    }

    fn set_overlay(&mut self, host: &mut dyn HostUi, region: usize, y: i32, opacity: f32) {
        let Some(&id) = self.menu.index_overlays.get(region) else {
            return;
        };
        if let Some(overlay) = self.menu.components.graphic_mut(id) {
            overlay.set_y(host, y);
            overlay.set_opacity(host, opacity);
            overlay.revalidate(host);
        }
    }

    /// Number of pages currently visible; always 1 once constructed.
    #[cfg(test)]
    pub fn visible_page_count(&self) -> usize {
        usize::from(self.menu.index_page.is_visible())
            + self
                .menu
                .region_pages
                .iter()
                .filter(|p| p.is_visible())
                .count()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::config::MenuConfig;
    use crate::definition::DefinitionStore;
    use crate::host::sim::SimHost;
    use crate::menu::composer::compose;
    use crate::menu::layout::PORTAL_PANEL;
    use crate::menu::scanner::AvailableTeleports;
    use proptest::prelude::*;

    #[derive(Clone, Debug)]
    enum Step {
        Index,
        Map(usize),
        Select(usize),
        Back,
        Hover(usize),
        Leave(usize),
    }

    fn step_strategy() -> impl Strategy<Value = Step> {
        prop_oneof![
            Just(Step::Index),
            (0usize..12).prop_map(Step::Map),
            (0usize..12).prop_map(Step::Select),
            Just(Step::Back),
            (0usize..12).prop_map(Step::Hover),
            (0usize..12).prop_map(Step::Leave),
        ]
    }

    proptest! {
        #[test]
        fn exactly_one_page_visible_after_any_steps(
            steps in proptest::collection::vec(step_strategy(), 0..40)
        ) {
            let store = DefinitionStore::bundled().unwrap();
            let mut host = SimHost::nexus_portal(&[], &[]);
            let root = host.widget(PORTAL_PANEL).unwrap();
            let menu = compose(&mut host, root, &store, &AvailableTeleports::default(), &MenuConfig::default());
            let mut nav = NavigationController::new(menu, &mut host);

            for step in steps {
                match step {
                    Step::Index => nav.display_index_page(&mut host),
                    Step::Map(i) => nav.display_map_page(&mut host, i),
                    Step::Select(i) => nav.select_region(&mut host, i),
                    Step::Back => nav.back(&mut host),
                    Step::Hover(i) => nav.on_icon_hover(&mut host, i),
                    Step::Leave(i) => nav.on_icon_leave(&mut host, i),
                }
                prop_assert_eq!(nav.visible_page_count(), 1);
                match nav.state() {
                    NavState::Index => prop_assert!(nav.menu().index_page.is_visible()),
                    NavState::Region(i) => prop_assert!(nav.menu().region_pages[i].is_visible()),
                }
            }
        }
    }
}

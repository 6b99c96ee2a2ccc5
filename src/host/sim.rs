//! In-memory host widget tree.
//!
//! `SimHost` implements [`HostUi`] over a flat widget arena. It records every
//! script call, sound and redraw so tests can assert on them, and the browser
//! front-end renders it directly.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use super::{
    HostUi, ScriptId, SizeMode, SoundEffect, SpriteId, Task, WidgetAddress, WidgetHandle,
};
use crate::menu::layout;

/// Size of the game viewport that top-level layers are laid out in.
pub const VIEWPORT: (i32, i32) = (765, 503);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetKind {
    Layer,
    Text,
    Graphic,
}

#[derive(Clone, Debug)]
pub struct SimWidget {
    pub kind: WidgetKind,
    pub parent: Option<WidgetHandle>,
    /// Position within the parent's child list.
    pub index: usize,
    pub text: Option<String>,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub size_mode: SizeMode,
    pub sprite: Option<SpriteId>,
    pub opacity: f32,
    pub hidden: bool,
    pub name: String,
    pub actions: Vec<Option<String>>,
    pub listening: bool,
    pub revalidations: u32,
    children: Vec<WidgetHandle>,
}

impl SimWidget {
    fn new(kind: WidgetKind, parent: Option<WidgetHandle>, index: usize) -> Self {
        Self {
            kind,
            parent,
            index,
            text: None,
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            size_mode: SizeMode::Absolute,
            sprite: None,
            opacity: 1.0,
            hidden: false,
            name: String::new(),
            actions: Vec::new(),
            listening: false,
            revalidations: 0,
            children: Vec::new(),
        }
    }

    /// Registered action labels, skipping empty slots.
    pub fn action_labels(&self) -> Vec<&str> {
        self.actions.iter().flatten().map(String::as_str).collect()
    }
}

/// A recorded `run_script` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptCall {
    pub script: ScriptId,
    pub args: Vec<i32>,
}

/// Label rows to seed the portal's two teleport lists with.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PortalLabels {
    #[serde(default)]
    pub primary: Vec<String>,
    #[serde(default)]
    pub alternate: Vec<String>,
}

#[derive(Default)]
pub struct SimHost {
    widgets: Vec<SimWidget>,
    addresses: HashMap<WidgetAddress, WidgetHandle>,
    pending: Vec<Task>,
    sprite_overrides: BTreeMap<SpriteId, String>,
    pub scripts: Vec<ScriptCall>,
    pub sounds: Vec<SoundEffect>,
}

impl SimHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host with the portal nexus interface loaded and its label lists
    /// filled with `primary` and `alternate` rows.
    pub fn nexus_portal(primary: &[&str], alternate: &[&str]) -> Self {
        let mut host = Self::new();
        // the native panel fills the viewport until the menu fixes its size
        let panel = host.add_layer(layout::PORTAL_PANEL, None);
        host.set_size(panel, 0, 0, SizeMode::Relative);

        for address in [
            layout::PORTAL_MODEL,
            layout::SCRY_TEXT,
            layout::SCRY_SELECT,
            layout::KEY_EVENTS_ALTERNATE,
            layout::KEY_EVENTS_PRIMARY,
            layout::SCROLLBOX_BORDER,
            layout::SCROLLBAR,
        ] {
            host.add_layer(address, None);
        }

        let list = host.add_layer(layout::TELEPORT_LIST, None);
        let primary_labels = host.add_layer(layout::LABELS_PRIMARY, Some(list));
        let alternate_labels = host.add_layer(layout::LABELS_ALTERNATE, Some(list));
        for text in primary {
            host.add_text(primary_labels, text);
        }
        for text in alternate {
            host.add_text(alternate_labels, text);
        }
        host
    }

    pub fn from_portal_labels(labels: &PortalLabels) -> Self {
        let primary: Vec<&str> = labels.primary.iter().map(String::as_str).collect();
        let alternate: Vec<&str> = labels.alternate.iter().map(String::as_str).collect();
        Self::nexus_portal(&primary, &alternate)
    }

    /// Add a built-in layer reachable by `address`.
    pub fn add_layer(&mut self, address: WidgetAddress, parent: Option<WidgetHandle>) -> WidgetHandle {
        let handle = self.push(WidgetKind::Layer, parent);
        self.addresses.insert(address, handle);
        handle
    }

    /// Append a text row under `parent`.
    pub fn add_text(&mut self, parent: WidgetHandle, text: &str) -> WidgetHandle {
        let handle = self.push(WidgetKind::Text, Some(parent));
        self.widgets[handle.0].text = Some(text.to_string());
        handle
    }

    /// Remove a built-in widget from the address table, as if the host never loaded it.
    #[cfg(test)]
    pub fn unload(&mut self, address: WidgetAddress) {
        self.addresses.remove(&address);
    }

    fn push(&mut self, kind: WidgetKind, parent: Option<WidgetHandle>) -> WidgetHandle {
        let handle = WidgetHandle(self.widgets.len());
        let index = match parent {
            Some(p) => {
                let siblings = &mut self.widgets[p.0].children;
                siblings.push(handle);
                siblings.len() - 1
            }
            None => 0,
        };
        self.widgets.push(SimWidget::new(kind, parent, index));
        handle
    }

    pub fn get(&self, widget: WidgetHandle) -> Option<&SimWidget> {
        self.widgets.get(widget.0)
    }

    /// Every widget in creation order, which is also paint order.
    pub fn iter(&self) -> impl Iterator<Item = (WidgetHandle, &SimWidget)> {
        self.widgets
            .iter()
            .enumerate()
            .map(|(i, w)| (WidgetHandle(i), w))
    }

    #[cfg(test)]
    pub fn created_count(&self) -> usize {
        self.widgets
            .iter()
            .filter(|w| w.kind == WidgetKind::Graphic)
            .count()
    }

    /// Hidden itself or under a hidden ancestor.
    pub fn is_hidden(&self, widget: WidgetHandle) -> bool {
        let mut current = Some(widget);
        while let Some(handle) = current {
            let Some(w) = self.widgets.get(handle.0) else {
                return true;
            };
            if w.hidden {
                return true;
            }
            current = w.parent;
        }
        false
    }

    /// Position relative to the top-level layer the widget lives under.
    pub fn absolute_position(&self, widget: WidgetHandle) -> (i32, i32) {
        let mut x = 0;
        let mut y = 0;
        let mut current = Some(widget);
        while let Some(handle) = current {
            let Some(w) = self.widgets.get(handle.0) else {
                break;
            };
            x += w.x;
            y += w.y;
            current = w.parent;
        }
        (x, y)
    }

    /// Width and height after resolving relative sizing against the parent,
    /// or against the viewport for top-level widgets.
    pub fn effective_size(&self, widget: WidgetHandle) -> (i32, i32) {
        let Some(w) = self.widgets.get(widget.0) else {
            return (0, 0);
        };
        match w.size_mode {
            SizeMode::Absolute => (w.width, w.height),
            SizeMode::Relative => {
                let (parent_width, parent_height) = match w.parent {
                    Some(parent) => self.effective_size(parent),
                    None => VIEWPORT,
                };
                ((parent_width - w.width).max(0), (parent_height - w.height).max(0))
            }
        }
    }

    pub fn sprite_file(&self, sprite: SpriteId) -> Option<&str> {
        self.sprite_overrides.get(&sprite).map(String::as_str)
    }

    #[cfg(test)]
    pub fn sprite_override_count(&self) -> usize {
        self.sprite_overrides.len()
    }

    #[cfg(test)]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Run the tasks queued before this tick. Tasks queued while running
    /// wait for the following tick.
    pub fn run_pending(&mut self) -> usize {
        let tasks = std::mem::take(&mut self.pending);
        let count = tasks.len();
        for task in tasks {
            task(self);
        }
        count
    }

    fn widget_mut(&mut self, widget: WidgetHandle) -> Option<&mut SimWidget> {
        self.widgets.get_mut(widget.0)
    }
}

impl HostUi for SimHost {
    fn widget(&self, address: WidgetAddress) -> Option<WidgetHandle> {
        self.addresses.get(&address).copied()
    }

    fn children(&self, parent: WidgetHandle) -> Vec<WidgetHandle> {
        self.widgets
            .get(parent.0)
            .map(|w| w.children.clone())
            .unwrap_or_default()
    }

    fn text(&self, widget: WidgetHandle) -> Option<&str> {
        self.widgets.get(widget.0)?.text.as_deref()
    }

    fn child_index(&self, widget: WidgetHandle) -> Option<usize> {
        let w = self.widgets.get(widget.0)?;
        w.parent.map(|_| w.index)
    }

    fn create_graphic(&mut self, parent: WidgetHandle) -> WidgetHandle {
        self.push(WidgetKind::Graphic, Some(parent))
    }

    fn set_position(&mut self, widget: WidgetHandle, x: i32, y: i32) {
        if let Some(w) = self.widget_mut(widget) {
            w.x = x;
            w.y = y;
        }
    }

    fn set_size(&mut self, widget: WidgetHandle, width: i32, height: i32, mode: SizeMode) {
        if let Some(w) = self.widget_mut(widget) {
            w.width = width;
            w.height = height;
            w.size_mode = mode;
        }
    }

    fn set_sprite(&mut self, widget: WidgetHandle, sprite: SpriteId) {
        if let Some(w) = self.widget_mut(widget) {
            w.sprite = Some(sprite);
        }
    }

    fn set_opacity(&mut self, widget: WidgetHandle, opacity: f32) {
        if let Some(w) = self.widget_mut(widget) {
            w.opacity = opacity.clamp(0.0, 1.0);
        }
    }

    fn set_hidden(&mut self, widget: WidgetHandle, hidden: bool) {
        if let Some(w) = self.widget_mut(widget) {
            w.hidden = hidden;
        }
    }

    fn set_name(&mut self, widget: WidgetHandle, name: &str) {
        if let Some(w) = self.widget_mut(widget) {
            w.name = name.to_string();
        }
    }

    fn set_action(&mut self, widget: WidgetHandle, index: usize, label: &str) {
        if let Some(w) = self.widget_mut(widget) {
            if w.actions.len() <= index {
                w.actions.resize(index + 1, None);
            }
            w.actions[index] = Some(label.to_string());
        }
    }

    fn set_has_listener(&mut self, widget: WidgetHandle, listening: bool) {
        if let Some(w) = self.widget_mut(widget) {
            w.listening = listening;
        }
    }

    fn revalidate(&mut self, widget: WidgetHandle) {
        if let Some(w) = self.widget_mut(widget) {
            w.revalidations += 1;
            log::trace!("revalidate widget {} (pass {})", widget.0, w.revalidations);
        }
    }

    fn invoke_later(&mut self, task: Task) {
        self.pending.push(task);
    }

    fn run_script(&mut self, script: ScriptId, args: &[i32]) {
        log::info!("run script {} with {:?}", script.0, args);
        self.scripts.push(ScriptCall {
            script,
            args: args.to_vec(),
        });
    }

    fn play_sound(&mut self, sound: SoundEffect) {
        self.sounds.push(sound);
    }

    fn add_sprite_overrides(&mut self, overrides: &[(SpriteId, String)]) {
        for (sprite, file) in overrides {
            self.sprite_overrides.insert(*sprite, file.clone());
        }
    }

    fn remove_sprite_overrides(&mut self, sprites: &[SpriteId]) {
        for sprite in sprites {
            self.sprite_overrides.remove(sprite);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portal_fixture_exposes_label_rows_in_order() {
        let host = SimHost::nexus_portal(&["a", "b"], &["c"]);
        let primary = host.widget(layout::LABELS_PRIMARY).unwrap();
        let rows = host.children(primary);
        assert_eq!(rows.len(), 2);
        assert_eq!(host.text(rows[1]), Some("b"));
        assert_eq!(host.child_index(rows[1]), Some(1));
    }

    #[test]
    fn created_graphics_append_to_parent() {
        let mut host = SimHost::nexus_portal(&[], &[]);
        let panel = host.widget(layout::PORTAL_PANEL).unwrap();
        let a = host.create_graphic(panel);
        let b = host.create_graphic(panel);
        assert_eq!(host.children(panel), vec![a, b]);
        assert_eq!(host.created_count(), 2);
    }

    #[test]
    fn hidden_ancestor_hides_descendants() {
        let mut host = SimHost::nexus_portal(&["row"], &[]);
        let list = host.widget(layout::TELEPORT_LIST).unwrap();
        let labels = host.widget(layout::LABELS_PRIMARY).unwrap();
        let row = host.children(labels)[0];
        assert!(!host.is_hidden(row));
        host.set_hidden(list, true);
        assert!(host.is_hidden(row));
    }

    #[test]
    fn relative_size_resolves_against_parent_then_viewport() {
        let mut host = SimHost::nexus_portal(&[], &[]);
        let panel = host.widget(layout::PORTAL_PANEL).unwrap();
        assert_eq!(host.effective_size(panel), VIEWPORT);

        let inset = host.create_graphic(panel);
        host.set_size(inset, 10, 20, SizeMode::Relative);
        assert_eq!(host.effective_size(inset), (VIEWPORT.0 - 10, VIEWPORT.1 - 20));

        host.set_size(panel, 100, 50, SizeMode::Absolute);
        assert_eq!(host.effective_size(panel), (100, 50));
        assert_eq!(host.effective_size(inset), (90, 30));

        host.set_size(inset, 200, 200, SizeMode::Relative);
        assert_eq!(host.effective_size(inset), (0, 0));
    }

    #[test]
    fn deferred_tasks_run_on_next_tick_only() {
        let mut host = SimHost::new();
        host.invoke_later(Box::new(|h: &mut dyn HostUi| {
            h.run_script(ScriptId(1), &[2]);
            // queued during the tick: runs on the following one
            h.invoke_later(Box::new(|h: &mut dyn HostUi| h.run_script(ScriptId(3), &[])));
        }));
        assert!(host.scripts.is_empty());

        assert_eq!(host.run_pending(), 1);
        assert_eq!(host.scripts.len(), 1);
        assert_eq!(host.pending_len(), 1);

        host.run_pending();
        assert_eq!(host.scripts[1].script, ScriptId(3));
    }

    #[test]
    fn actions_fill_sparse_slots() {
        let mut host = SimHost::nexus_portal(&[], &[]);
        let panel = host.widget(layout::PORTAL_PANEL).unwrap();
        let w = host.create_graphic(panel);
        host.set_action(w, 2, "Teleport");
        assert_eq!(host.get(w).unwrap().actions.len(), 3);
        assert_eq!(host.get(w).unwrap().action_labels(), vec!["Teleport"]);
    }

    #[test]
    fn sprite_overrides_install_and_remove() {
        let mut host = SimHost::new();
        host.add_sprite_overrides(&[(SpriteId(-1), "a.png".into()), (SpriteId(-2), "b.png".into())]);
        assert_eq!(host.sprite_file(SpriteId(-2)), Some("b.png"));
        host.remove_sprite_overrides(&[SpriteId(-1), SpriteId(-2)]);
        assert_eq!(host.sprite_override_count(), 0);
    }
}

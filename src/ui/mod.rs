//! UI components composed from host widgets.
//!
//! Components live in a [`Components`] arena and are referenced by
//! [`ComponentId`], so one component can sit on several [`Page`]s.

pub mod component;
pub mod page;

use std::collections::HashMap;

use crate::host::{HostUi, WidgetHandle};

pub use component::{Button, Graphic, HoverStyle};
pub use page::Page;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ComponentId(usize);

#[derive(Clone, Debug, PartialEq)]
pub enum Component {
    Graphic(Graphic),
    Button(Button),
}

impl Component {
    pub fn widget(&self) -> WidgetHandle {
        match self {
            Component::Graphic(g) => g.widget(),
            Component::Button(b) => b.widget(),
        }
    }

    #[cfg(test)]
    pub fn graphic(&self) -> &Graphic {
        match self {
            Component::Graphic(g) => g,
            Component::Button(b) => b.graphic(),
        }
    }

    fn graphic_mut(&mut self) -> &mut Graphic {
        match self {
            Component::Graphic(g) => g,
            Component::Button(b) => b.graphic_mut(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Components {
    items: Vec<Component>,
    by_widget: HashMap<WidgetHandle, ComponentId>,
}

impl Components {
    fn push(&mut self, component: Component) -> ComponentId {
        let id = ComponentId(self.items.len());
        self.by_widget.insert(component.widget(), id);
        self.items.push(component);
        id
    }

    pub fn add_graphic(&mut self, graphic: Graphic) -> ComponentId {
        self.push(Component::Graphic(graphic))
    }

    pub fn add_button(&mut self, button: Button) -> ComponentId {
        self.push(Component::Button(button))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[cfg(test)]
    pub fn get(&self, id: ComponentId) -> Option<&Component> {
        self.items.get(id.0)
    }

    #[cfg(test)]
    pub fn widget(&self, id: ComponentId) -> Option<WidgetHandle> {
        self.get(id).map(Component::widget)
    }

    /// The graphic of a component, including a button's underlying graphic.
    #[cfg(test)]
    pub fn graphic(&self, id: ComponentId) -> Option<&Graphic> {
        self.get(id).map(Component::graphic)
    }

    pub fn graphic_mut(&mut self, id: ComponentId) -> Option<&mut Graphic> {
        self.items.get_mut(id.0).map(Component::graphic_mut)
    }

    #[cfg(test)]
    pub fn button(&self, id: ComponentId) -> Option<&Button> {
        match self.get(id)? {
            Component::Button(b) => Some(b),
            Component::Graphic(_) => None,
        }
    }

    pub fn button_mut(&mut self, id: ComponentId) -> Option<&mut Button> {
        match self.items.get_mut(id.0)? {
            Component::Button(b) => Some(b),
            Component::Graphic(_) => None,
        }
    }

    /// The component wrapping a host widget.
    pub fn find_by_widget(&self, widget: WidgetHandle) -> Option<ComponentId> {
        self.by_widget.get(&widget).copied()
    }

    pub fn set_visibility(&mut self, id: ComponentId, host: &mut dyn HostUi, visible: bool) {
        if let Some(graphic) = self.graphic_mut(id) {
            graphic.set_visibility(host, visible);
        }
    }
}

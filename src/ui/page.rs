//! Pages: groups of components shown and hidden together.

use crate::host::HostUi;

use super::{ComponentId, Components};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    members: Vec<ComponentId>,
    visible: bool,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component. A component may belong to several pages.
    pub fn add(&mut self, id: ComponentId) {
        self.members.push(id);
    }

    #[cfg(test)]
    pub fn members(&self) -> &[ComponentId] {
        &self.members
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide every member.
    pub fn set_visibility(
        &mut self,
        components: &mut Components,
        host: &mut dyn HostUi,
        visible: bool,
    ) {
        self.visible = visible;
        for &id in &self.members {
            components.set_visibility(id, host, visible);
        }
    }
}

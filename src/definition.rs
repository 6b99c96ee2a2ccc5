//! Static region, teleport and sprite definitions, loaded once at start-up.

use serde::Deserialize;

use crate::error::MenuError;
use crate::host::SpriteId;

/// Bundled region definition list.
pub const REGION_DEFINITIONS: &str = include_str!("../assets/regions.json");
/// Bundled sprite override list.
pub const SPRITE_DEFINITIONS: &str = include_str!("../assets/sprites.json");

const REGION_RESOURCE: &str = "regions.json";
const SPRITE_RESOURCE: &str = "sprites.json";

/// Region icon shown on the index map.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconDefinition {
    pub x: i32,
    pub y: i32,
    pub sprite_standard: SpriteId,
    pub sprite_hover: SpriteId,
}

/// A destination as declared, independent of what the player has unlocked.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeleportDefinition {
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    pub x: i32,
    pub y: i32,
    pub sprite_enabled: SpriteId,
    pub sprite_disabled: SpriteId,
}

impl TeleportDefinition {
    /// Base name plus ` (alias)` when one is declared.
    pub fn display_name(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} ({})", self.name, alias),
            None => self.name.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionDefinition {
    /// Position in the definition list; any value in the file is ignored.
    #[serde(default)]
    pub id: usize,
    pub name: String,
    #[serde(rename = "indexSpriteId")]
    pub index_sprite: SpriteId,
    #[serde(rename = "mapSpriteId")]
    pub map_sprite: SpriteId,
    #[serde(default)]
    pub icon: Option<IconDefinition>,
    #[serde(default)]
    pub teleports: Vec<TeleportDefinition>,
}

impl RegionDefinition {
    pub fn has_teleports(&self) -> bool {
        !self.teleports.is_empty()
    }

    /// The icon to show on the index, if the region can be selected there.
    pub fn selectable_icon(&self) -> Option<&IconDefinition> {
        if self.has_teleports() {
            self.icon.as_ref()
        } else {
            None
        }
    }
}

/// A custom image installed over a sprite id in the host registry.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpriteDefinition {
    pub sprite_id: SpriteId,
    pub file_name: String,
}

/// Immutable snapshot of every definition resource.
#[derive(Clone, Debug, Default)]
pub struct DefinitionStore {
    regions: Vec<RegionDefinition>,
    sprites: Vec<SpriteDefinition>,
}

impl DefinitionStore {
    /// Parse both resources. Region ids are re-derived from list order.
    pub fn from_json(regions: &str, sprites: &str) -> Result<Self, MenuError> {
        let mut regions: Vec<RegionDefinition> =
            serde_json::from_str(regions).map_err(|source| MenuError::Definition {
                resource: REGION_RESOURCE,
                source,
            })?;
        let sprites: Vec<SpriteDefinition> =
            serde_json::from_str(sprites).map_err(|source| MenuError::Definition {
                resource: SPRITE_RESOURCE,
                source,
            })?;

        for (i, region) in regions.iter_mut().enumerate() {
            region.id = i;
        }

        log::info!(
            "loaded {} regions ({} teleports) and {} sprite overrides",
            regions.len(),
            regions.iter().map(|r| r.teleports.len()).sum::<usize>(),
            sprites.len()
        );
        Ok(Self { regions, sprites })
    }

    /// The definitions shipped with the crate.
    pub fn bundled() -> Result<Self, MenuError> {
        Self::from_json(REGION_DEFINITIONS, SPRITE_DEFINITIONS)
    }

    pub fn regions(&self) -> &[RegionDefinition] {
        &self.regions
    }

    pub fn region(&self, id: usize) -> Option<&RegionDefinition> {
        self.regions.get(id)
    }

    #[cfg(test)]
    pub fn sprites(&self) -> &[SpriteDefinition] {
        &self.sprites
    }

    pub fn sprite_overrides(&self) -> Vec<(SpriteId, String)> {
        self.sprites
            .iter()
            .map(|s| (s.sprite_id, s.file_name.clone()))
            .collect()
    }

    pub fn sprite_ids(&self) -> Vec<SpriteId> {
        self.sprites.iter().map(|s| s.sprite_id).collect()
    }
}

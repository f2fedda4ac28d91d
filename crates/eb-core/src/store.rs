//! Content store: eager loading and cross-reference validation.
//!
//! `ContentStore::open` is the two-phase construction point for content: it
//! reads every category up front and fails fast on anything malformed, so
//! the engine never discovers a broken data file in the middle of a command.
//! A missing category file is not an error at this layer — the category
//! degrades to an empty map with a logged warning. Whether empty content is
//! acceptable (a session cannot start without its starting location) is the
//! session's decision.

use std::collections::HashMap;
use std::path::Path;

use log::warn;
use serde::de::DeserializeOwned;

use crate::content::{
    ItemRecord, LocationRecord, NpcRecord, QuestRecord, RecipeRecord, TemplateSet, VariableValue,
    INVENTORY_LOCATION,
};
use crate::error::{CoreError, CoreResult};

/// All loaded game content, validated and ready for a session.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    /// Locations by id.
    pub locations: HashMap<String, LocationRecord>,
    /// Items by id.
    pub items: HashMap<String, ItemRecord>,
    /// Characters by id.
    pub npcs: HashMap<String, NpcRecord>,
    /// Quest definitions by id.
    pub quests: HashMap<String, QuestRecord>,
    /// Crafting recipes by id.
    pub recipes: HashMap<String, RecipeRecord>,
    /// Description template pools.
    pub templates: TemplateSet,
    /// Template variable pool.
    pub variables: HashMap<String, VariableValue>,
}

impl ContentStore {
    /// Load and validate every content category from `dir`.
    pub fn open(dir: &Path) -> CoreResult<Self> {
        let store = Self {
            locations: load_category(dir, "locations")?,
            items: load_category(dir, "items")?,
            npcs: load_category(dir, "npcs")?,
            quests: load_category(dir, "quests")?,
            recipes: load_category(dir, "recipes")?,
            templates: load_category(dir, "templates")?,
            variables: load_category(dir, "variables")?,
        };
        store.validate()?;
        Ok(store)
    }

    /// Item ids currently placed at `location`, in stable (sorted) order.
    pub fn items_at<'a>(&'a self, location: &str) -> Vec<&'a str> {
        let mut ids: Vec<&str> = self
            .items
            .iter()
            .filter(|(_, item)| item.location == location)
            .map(|(id, _)| id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }

    /// NPC ids placed at `location`, in stable (sorted) order.
    pub fn npcs_at<'a>(&'a self, location: &str) -> Vec<&'a str> {
        let mut ids: Vec<&str> = self
            .npcs
            .iter()
            .filter(|(_, npc)| npc.location == location)
            .map(|(id, _)| id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// Check every cross-reference between categories.
    ///
    /// Quest rewards and recipe results may name items that exist only once
    /// granted, so those ids are deliberately not checked here.
    fn validate(&self) -> CoreResult<()> {
        for (id, location) in &self.locations {
            for (direction, target) in &location.exits {
                if !self.locations.contains_key(target) {
                    return Err(CoreError::UnknownExitTarget {
                        from: id.clone(),
                        direction: direction.clone(),
                        target: target.clone(),
                    });
                }
            }
        }

        for (id, item) in &self.items {
            if item.location != INVENTORY_LOCATION && !self.locations.contains_key(&item.location)
            {
                return Err(CoreError::UnknownItemLocation {
                    item: id.clone(),
                    location: item.location.clone(),
                });
            }
        }

        for (id, npc) in &self.npcs {
            if !self.locations.contains_key(&npc.location) {
                return Err(CoreError::UnknownNpcLocation {
                    npc: id.clone(),
                    location: npc.location.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Read `<dir>/<name>.json` and extract the record map under the `name` key.
///
/// A missing file or missing category key degrades to the category default.
fn load_category<T>(dir: &Path, name: &str) -> CoreResult<T>
where
    T: DeserializeOwned + Default,
{
    let path = dir.join(format!("{name}.json"));
    if !path.exists() {
        warn!("content file {} not found, treating {name} as empty", path.display());
        return Ok(T::default());
    }

    let text = std::fs::read_to_string(&path).map_err(|source| CoreError::Io {
        path: path.clone(),
        source,
    })?;
    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(|source| CoreError::Malformed {
            path: path.clone(),
            source,
        })?;

    match value.get(name) {
        Some(section) => {
            serde_json::from_value(section.clone()).map_err(|source| CoreError::Malformed {
                path: path.clone(),
                source,
            })
        }
        None => {
            warn!("content file {} has no \"{name}\" key, treating {name} as empty", path.display());
            Ok(T::default())
        }
    }
}

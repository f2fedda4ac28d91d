//! Session-owned world bookkeeping.
//!
//! `WorldState` tracks everything the dispatcher mutates: where the player
//! is, what they carry, what they have seen and collected, and where every
//! item currently sits. The inventory invariant holds at all times: an item
//! id is in the inventory list exactly when its tracked location is
//! [`INVENTORY_LOCATION`].

use std::collections::{HashMap, HashSet};

use eb_core::{ContentStore, INVENTORY_LOCATION};

/// The mutable session state.
#[derive(Debug, Clone)]
pub struct WorldState {
    /// Current location id.
    pub location: String,
    /// Item ids held by the player, in pickup order, no duplicates.
    pub inventory: Vec<String>,
    /// Every location id the player has entered.
    pub visited: HashSet<String>,
    /// Every item id the player has ever picked up.
    pub collected: HashSet<String>,
    /// Experience accumulated from quest rewards.
    pub experience: u32,
    /// Current time of day, fed to description templates.
    pub time_of_day: String,
    /// Ambient activity level, fed to description templates.
    pub activity_level: String,
    item_locations: HashMap<String, String>,
}

impl WorldState {
    /// Fresh state at `start`, with item placements seeded from content.
    pub fn new(start: &str, content: &ContentStore) -> Self {
        let item_locations: HashMap<String, String> = content
            .items
            .iter()
            .map(|(id, item)| (id.clone(), item.location.clone()))
            .collect();

        let mut inventory: Vec<String> = item_locations
            .iter()
            .filter(|(_, location)| *location == INVENTORY_LOCATION)
            .map(|(id, _)| id.clone())
            .collect();
        inventory.sort_unstable();

        Self {
            location: start.to_string(),
            inventory,
            visited: HashSet::from([start.to_string()]),
            collected: HashSet::new(),
            experience: 0,
            time_of_day: "morning".to_string(),
            activity_level: "moderate".to_string(),
            item_locations,
        }
    }

    /// Where an item currently sits, if it is tracked at all.
    pub fn item_location(&self, id: &str) -> Option<&str> {
        self.item_locations.get(id).map(String::as_str)
    }

    /// Item ids currently at `location`, in stable (sorted) order.
    pub fn items_at<'a>(&'a self, location: &str) -> Vec<&'a str> {
        let mut ids: Vec<&str> = self
            .item_locations
            .iter()
            .filter(|(_, at)| *at == location)
            .map(|(id, _)| id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Whether the player carries `id`.
    pub fn has_item(&self, id: &str) -> bool {
        self.inventory.iter().any(|i| i == id)
    }

    /// Enter a location, marking it visited.
    pub fn move_to(&mut self, id: &str) {
        self.location = id.to_string();
        self.visited.insert(id.to_string());
    }

    /// Pick up an item. Succeeds only if the item sits at the player's
    /// current location; on failure nothing changes.
    pub fn take(&mut self, id: &str) -> bool {
        if self.item_location(id) != Some(self.location.as_str()) {
            return false;
        }
        self.item_locations
            .insert(id.to_string(), INVENTORY_LOCATION.to_string());
        self.inventory.push(id.to_string());
        self.collected.insert(id.to_string());
        true
    }

    /// Put down a carried item at the current location. On failure nothing
    /// changes.
    pub fn drop_item(&mut self, id: &str) -> bool {
        let Some(pos) = self.inventory.iter().position(|i| i == id) else {
            return false;
        };
        self.inventory.remove(pos);
        self.item_locations
            .insert(id.to_string(), self.location.clone());
        true
    }

    /// Place a granted item (quest reward, craft result) into the inventory.
    pub fn grant(&mut self, id: &str) {
        if !self.has_item(id) {
            self.inventory.push(id.to_string());
        }
        self.item_locations
            .insert(id.to_string(), INVENTORY_LOCATION.to_string());
    }

    /// Stop tracking a consumed item (crafting ingredient).
    pub fn forget(&mut self, id: &str) {
        self.item_locations.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eb_core::{ItemRecord, LocationRecord};

    fn content() -> ContentStore {
        let mut store = ContentStore::default();
        store.locations.insert(
            "start".to_string(),
            LocationRecord {
                description: "A clearing.".to_string(),
                exits: HashMap::from([("north".to_string(), "market".to_string())]),
            },
        );
        store.locations.insert(
            "market".to_string(),
            LocationRecord {
                description: "A market.".to_string(),
                exits: HashMap::new(),
            },
        );
        store.items.insert(
            "crystal".to_string(),
            ItemRecord {
                description: "A glowing crystal.".to_string(),
                examine_text: None,
                location: "market".to_string(),
            },
        );
        store
    }

    #[test]
    fn take_requires_presence() {
        let mut world = WorldState::new("start", &content());
        assert!(!world.take("crystal"));
        assert!(world.inventory.is_empty());
        assert_eq!(world.item_location("crystal"), Some("market"));
    }

    #[test]
    fn take_then_drop_round_trips() {
        let mut world = WorldState::new("start", &content());
        world.move_to("market");

        assert!(world.take("crystal"));
        assert_eq!(world.item_location("crystal"), Some(INVENTORY_LOCATION));
        assert!(world.has_item("crystal"));
        assert!(world.collected.contains("crystal"));

        assert!(world.drop_item("crystal"));
        assert_eq!(world.item_location("crystal"), Some("market"));
        assert!(!world.has_item("crystal"));
        assert!(world.inventory.is_empty());
    }

    #[test]
    fn drop_requires_possession() {
        let mut world = WorldState::new("start", &content());
        assert!(!world.drop_item("crystal"));
        assert_eq!(world.item_location("crystal"), Some("market"));
    }

    #[test]
    fn visited_tracks_movement() {
        let mut world = WorldState::new("start", &content());
        assert!(world.visited.contains("start"));
        world.move_to("market");
        assert!(world.visited.contains("market"));
        assert_eq!(world.location, "market");
    }

    #[test]
    fn grant_does_not_duplicate() {
        let mut world = WorldState::new("start", &content());
        world.grant("charm");
        world.grant("charm");
        assert_eq!(world.inventory.iter().filter(|i| *i == "charm").count(), 1);
        assert_eq!(world.item_location("charm"), Some(INVENTORY_LOCATION));
    }

    #[test]
    fn forget_untracks_consumed_items() {
        let mut world = WorldState::new("start", &content());
        world.grant("ember");
        // Crafting removes the id from the inventory list, then forgets it.
        world.inventory.retain(|i| i != "ember");
        world.forget("ember");
        assert_eq!(world.item_location("ember"), None);
        assert!(!world.has_item("ember"));
    }

    #[test]
    fn seeded_inventory_from_content() {
        let mut store = content();
        store.items.insert(
            "map".to_string(),
            ItemRecord {
                description: "A map.".to_string(),
                examine_text: None,
                location: INVENTORY_LOCATION.to_string(),
            },
        );
        let world = WorldState::new("start", &store);
        assert!(world.has_item("map"));
        assert!(!world.has_item("crystal"));
    }
}

//! Typed content records for every content category.
//!
//! Content files are free-form JSON on disk; everything the engine reads
//! from them is modeled here as an explicit record with explicit defaults
//! for optional fields, so that a typo in a content file surfaces at load
//! time instead of deep inside command handling.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Sentinel pseudo-location marking an item as carried by the player.
pub const INVENTORY_LOCATION: &str = "inventory";

/// A place the player can occupy, from `locations.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Base description shown when the player looks around.
    pub description: String,
    /// Map of direction word to destination location id.
    #[serde(default)]
    pub exits: HashMap<String, String>,
}

/// A takeable or examinable object, from `items.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Short description, also used in inventory listings.
    pub description: String,
    /// Longer text shown on `examine`; falls back to `description`.
    #[serde(default)]
    pub examine_text: Option<String>,
    /// Location id where the item starts, or [`INVENTORY_LOCATION`].
    pub location: String,
}

/// A non-player character definition, from `npcs.json`.
///
/// The dialogue template bundle is two string-keyed line pools: `greetings`
/// is keyed by mood bucket (`happy`, `neutral`, `tired`) and `responses` by
/// either a topic name (`magic`, `items`, `trade`, `quest`, `combat`) or a
/// response type (`greeting`, `informative`, `positive`, `negative`,
/// `neutral`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpcRecord {
    /// Location id where this character can be found.
    pub location: String,
    /// Text shown when the player examines the character.
    #[serde(default)]
    pub description: Option<String>,
    /// Greeting lines keyed by mood bucket.
    #[serde(default)]
    pub greetings: HashMap<String, Vec<String>>,
    /// Response lines keyed by topic or response type.
    #[serde(default)]
    pub responses: HashMap<String, Vec<String>>,
}

/// The closed set of world events that advance quest objectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestEventKind {
    /// The player entered a location.
    VisitLocation,
    /// The player picked up an item.
    CollectItem,
    /// The player started a conversation with a character.
    TalkToNpc,
    /// The player crafted an item.
    CraftItem,
}

/// A single objective within a quest definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveRecord {
    /// Event kind that satisfies this objective.
    #[serde(rename = "type")]
    pub kind: QuestEventKind,
    /// Event target that satisfies this objective (a location, item, npc or
    /// recipe id, depending on `kind`).
    pub target: String,
    /// Player-facing objective text.
    pub description: String,
}

/// The reward bundle granted when a quest completes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RewardRecord {
    /// Item ids placed into the player's inventory.
    #[serde(default)]
    pub items: Vec<String>,
    /// Experience points granted.
    #[serde(default)]
    pub experience: u32,
}

/// A quest definition, from `quests.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestRecord {
    /// Player-facing quest title.
    pub title: String,
    /// Player-facing quest description.
    pub description: String,
    /// Ordered objectives, all of which must be satisfied.
    pub objectives: Vec<ObjectiveRecord>,
    /// Reward bundle granted on completion.
    #[serde(default)]
    pub rewards: RewardRecord,
    /// Quest ids that must be completed before this quest is available.
    #[serde(default)]
    pub prerequisites: Vec<String>,
    /// Quest id suggested as a follow-up once this one completes.
    #[serde(default)]
    pub next_quest: Option<String>,
}

/// A crafting recipe, from `recipes.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeRecord {
    /// Player-facing recipe name.
    pub name: String,
    /// Ingredient item ids consumed by the craft. A repeated id means the
    /// recipe needs that many copies.
    pub ingredients: Vec<String>,
    /// Item id produced on success.
    pub result: String,
    /// Player-facing recipe description.
    pub description: String,
    /// Location id the player must be at, if the recipe is site-bound.
    #[serde(default)]
    pub required_location: Option<String>,
}

/// Description template pools, from `templates.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateSet {
    /// Candidate description templates per location id.
    #[serde(default)]
    pub description_templates: HashMap<String, Vec<String>>,
    /// Candidate examine templates per item id.
    #[serde(default)]
    pub item_templates: HashMap<String, Vec<String>>,
}

/// A template variable, from `variables.json`.
///
/// List-valued variables are sampled each time a template is rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    /// A fixed string value.
    Single(String),
    /// A pool of candidate values; one is chosen per render.
    Choices(Vec<String>),
}

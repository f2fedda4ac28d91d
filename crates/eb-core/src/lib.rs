//! Typed content model and data store for the Everbrook text-adventure engine.
//!
//! Game content lives in a directory of JSON files, one per category
//! (locations, items, npcs, quests, recipes, templates, variables). This
//! crate loads those files into explicit typed records, validates the
//! cross-references between them, and provides the small shared services
//! the engine builds on: `{placeholder}` template rendering and a bounded
//! memoization cache.

/// Bounded memoization cache with FIFO eviction.
pub mod cache;
/// Typed content records for every content category.
pub mod content;
/// Error types for content loading and validation.
pub mod error;
/// Content store: eager loading and cross-reference validation.
pub mod store;
/// Minimal `{placeholder}` template rendering.
pub mod template;

pub use cache::{BoundedCache, CacheKey, DEFAULT_CACHE_CAPACITY};
pub use content::{
    ItemRecord, LocationRecord, NpcRecord, ObjectiveRecord, QuestEventKind, QuestRecord,
    RecipeRecord, RewardRecord, TemplateSet, VariableValue, INVENTORY_LOCATION,
};
pub use error::{CoreError, CoreResult};
pub use store::ContentStore;
pub use template::render;

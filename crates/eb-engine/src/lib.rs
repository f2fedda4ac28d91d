//! Command interpretation and world-state pipeline for Everbrook.
//!
//! The pipeline runs in three stages: the [`analyzer`] turns raw text into a
//! structured [`Analysis`], the [`session`] dispatcher maps that analysis
//! (intent first, literal verbs second) onto world-state transitions, and
//! the [`npc`] dialogue state machine reacts to analyses during
//! conversations. Everything that rolls dice draws from one seeded RNG owned
//! by the session, so a whole playthrough is deterministic under a fixed
//! seed.

/// Command analysis: intent, action, objects, entities, sentiment, topic.
pub mod analyzer;
/// Crafting recipes and ingredient consumption.
pub mod crafting;
/// Error types for the game engine.
pub mod error;
/// Generated description text for locations and items.
pub mod narrator;
/// NPC dialogue state: mood, memory, response choice.
pub mod npc;
/// Quest tracking and completion.
pub mod quest;
/// Resolution of player-typed names against content ids.
pub mod resolver;
/// Game session: command dispatch and world-state transitions.
pub mod session;
/// Player skills and skill checks.
pub mod skills;
/// Session-owned world bookkeeping.
pub mod world;

pub use analyzer::{Analysis, Analyzer, Intent, Topic};
pub use crafting::{CraftError, CraftingBook};
pub use error::{EngineError, EngineResult};
pub use narrator::Narrator;
pub use npc::{Mood, Npc, MEMORY_CAPACITY};
pub use quest::{CompletedQuest, Quest, QuestLog, StartQuestError};
pub use session::{GameSession, Response, SessionConfig, StateView};
pub use skills::{SkillSet, SKILL_CATALOG};
pub use world::WorldState;

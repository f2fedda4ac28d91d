//! Game session: command dispatch and world-state transitions.
//!
//! `GameSession` is the single writer over all mutable state. Commands come
//! in through [`GameSession::submit`], which is total: every input produces
//! a response, input mistakes are plain messages, and internal faults are
//! caught at the dispatch boundary so the session survives them.
//!
//! The nested conversation loop and the quit confirmation are modeled as
//! session modes rather than blocking loops, so the boundary stays strictly
//! request/response and works unchanged for both the CLI and any caller
//! that submits one command at a time.

use std::collections::HashMap;

use log::error;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use eb_core::{render, ContentStore, QuestEventKind};

use crate::analyzer::{Analyzer, Intent};
use crate::crafting::CraftingBook;
use crate::error::{EngineError, EngineResult};
use crate::narrator::Narrator;
use crate::npc::Npc;
use crate::quest::QuestLog;
use crate::resolver::resolve;
use crate::skills::{SkillSet, TRAINING_EXPERIENCE};
use crate::world::WorldState;

/// Reply given when no dispatch rule matches.
const DONT_UNDERSTAND: &str =
    "I don't understand that command. Type 'help' for a list of commands.";

/// Reply given when command handling hits an internal fault.
const INTERNAL_FAULT: &str = "Something went wrong handling that command. Try something else.";

/// Configuration for opening a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Location id the player starts at.
    pub start_location: String,
    /// Seed for every random draw the session makes.
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            start_location: "start".to_string(),
            seed: 42,
        }
    }
}

/// Result of submitting one command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Player-facing message.
    pub message: String,
    /// Current location id after the command.
    pub location: String,
    /// Inventory item ids after the command.
    pub inventory: Vec<String>,
    /// Whether the session has ended.
    pub game_over: bool,
}

/// Read-only view of the session for callers that re-render without
/// mutating world state.
#[derive(Debug, Clone, Serialize)]
pub struct StateView {
    /// Current location id.
    pub location: String,
    /// Inventory item ids.
    pub inventory: Vec<String>,
    /// Rendered result of a `look`.
    pub message: String,
}

/// What the session is currently waiting for.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    /// Normal command dispatch.
    Roaming,
    /// In conversation with the named NPC.
    Talking(String),
    /// Waiting for quit confirmation.
    ConfirmQuit,
}

/// One running game.
#[derive(Debug)]
pub struct GameSession {
    content: ContentStore,
    analyzer: Analyzer,
    narrator: Narrator,
    world: WorldState,
    npcs: HashMap<String, Npc>,
    quests: QuestLog,
    skills: SkillSet,
    crafting: CraftingBook,
    rng: StdRng,
    mode: Mode,
    game_over: bool,
}

impl GameSession {
    /// Open a session over loaded content.
    ///
    /// Fails fast if the starting location is missing: empty or misdirected
    /// core content is a boot-time misconfiguration, not something to
    /// discover on the first `look`.
    pub fn open(content: ContentStore, config: SessionConfig) -> EngineResult<Self> {
        if !content.locations.contains_key(&config.start_location) {
            return Err(EngineError::MissingStartLocation(config.start_location));
        }

        let world = WorldState::new(&config.start_location, &content);
        let narrator = Narrator::new(content.templates.clone(), content.variables.clone());
        let quests = QuestLog::new(content.quests.clone());
        let crafting = CraftingBook::new(content.recipes.clone());

        let mut session = Self {
            content,
            analyzer: Analyzer::new(),
            narrator,
            world,
            npcs: HashMap::new(),
            quests,
            skills: SkillSet::new(),
            crafting,
            rng: StdRng::seed_from_u64(config.seed),
            mode: Mode::Roaming,
            game_over: false,
        };
        let start = session.world.location.clone();
        session.spawn_npcs_at(&start);
        Ok(session)
    }

    /// Process one command and return the response plus a state snapshot.
    pub fn submit(&mut self, input: &str) -> Response {
        let message = if self.game_over {
            "The adventure has ended. Start a new session to play again.".to_string()
        } else {
            match self.mode.clone() {
                Mode::ConfirmQuit => self.confirm_quit(input),
                Mode::Talking(npc_id) => self.converse(&npc_id, input),
                Mode::Roaming => match self.dispatch(input) {
                    Ok(message) => message,
                    Err(err) => {
                        error!("command dispatch failed: {err}");
                        INTERNAL_FAULT.to_string()
                    }
                },
            }
        };
        self.response(message)
    }

    /// Whether the session has ended.
    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// The mutable world bookkeeping.
    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// The quest book.
    pub fn quests(&self) -> &QuestLog {
        &self.quests
    }

    /// Mutable access to the quest book (programmatic quest starts).
    pub fn quests_mut(&mut self) -> &mut QuestLog {
        &mut self.quests
    }

    /// The skill set.
    pub fn skills(&self) -> &SkillSet {
        &self.skills
    }

    /// Live dialogue state for an NPC, if its location has loaded.
    pub fn npc(&self, id: &str) -> Option<&Npc> {
        self.npcs.get(id)
    }

    /// Whether the session is currently in a conversation.
    pub fn in_conversation(&self) -> bool {
        matches!(self.mode, Mode::Talking(_))
    }

    /// Handle an interrupt: ends only the innermost waiting state.
    ///
    /// Returns a message when a conversation or quit prompt was abandoned;
    /// the outer session is untouched either way.
    pub fn interrupt(&mut self) -> Option<String> {
        match std::mem::replace(&mut self.mode, Mode::Roaming) {
            Mode::Talking(_) => Some("The conversation ends abruptly.".to_string()),
            Mode::ConfirmQuit => Some("Quit cancelled.".to_string()),
            Mode::Roaming => None,
        }
    }

    /// Re-render the current view without mutating world state.
    pub fn state_view(&mut self) -> StateView {
        let message = self
            .look()
            .unwrap_or_else(|_| "You look around...".to_string());
        StateView {
            location: self.world.location.clone(),
            inventory: self.world.inventory.clone(),
            message,
        }
    }

    /// Explicit teardown: clears caches and conversation memory. Invoked by
    /// the owner at end of session (and on confirmed quit).
    pub fn close(&mut self) {
        self.analyzer.clear_cache();
        self.narrator.clear_cache();
        for npc in self.npcs.values_mut() {
            npc.clear_memory();
        }
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    /// Route one roaming-mode command: intent first, then literal matching.
    fn dispatch(&mut self, input: &str) -> EngineResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let analysis = self.analyzer.analyze(trimmed);
        let mut words = trimmed.split_whitespace();
        let action = words.next().unwrap_or_default().to_lowercase();
        let args = words.collect::<Vec<_>>().join(" ");

        if analysis.intent == Intent::Movement && !args.is_empty() {
            let direction = args.split_whitespace().next().unwrap_or_default().to_string();
            return self.go(&direction);
        }
        if analysis.intent == Intent::Interaction && !args.is_empty() {
            if action == "examine" {
                return Ok(self.examine(&args));
            }
            if action == "talk" {
                return Ok(self.talk(&args));
            }
        }

        Ok(match action.as_str() {
            "quit" | "exit" => {
                self.mode = Mode::ConfirmQuit;
                "Are you sure you want to quit? (y/n)".to_string()
            }
            "look" => self.look()?,
            "inventory" => self.show_inventory(),
            "help" => help_text(),
            "take" if !args.is_empty() => self.take(&args),
            "take" => "Take what?".to_string(),
            "drop" if !args.is_empty() => self.drop(&args),
            "drop" => "Drop what?".to_string(),
            "go" if !args.is_empty() => {
                let direction =
                    args.split_whitespace().next().unwrap_or_default().to_string();
                self.go(&direction)?
            }
            "go" => "Go where?".to_string(),
            "examine" if !args.is_empty() => self.examine(&args),
            "examine" => "Examine what?".to_string(),
            "talk" if !args.is_empty() => self.talk(&args),
            "talk" => "Talk to whom?".to_string(),
            "quests" => self.show_quests(),
            "quest" if !args.is_empty() => self.show_quest(&args),
            "accept" if !args.is_empty() => self.accept_quest(&args),
            "skills" => self.show_skills(),
            "skill" if !args.is_empty() => self.show_skill(&args),
            "train" if !args.is_empty() => self.train(&args),
            "recipes" => self.show_recipes(),
            "craft" if !args.is_empty() => self.craft(&args),
            _ => DONT_UNDERSTAND.to_string(),
        })
    }

    fn confirm_quit(&mut self, input: &str) -> String {
        match input.trim().to_lowercase().as_str() {
            "y" | "yes" => {
                self.game_over = true;
                self.close();
                "Thanks for playing. Farewell!".to_string()
            }
            _ => {
                self.mode = Mode::Roaming;
                "Quit cancelled.".to_string()
            }
        }
    }

    fn converse(&mut self, npc_id: &str, input: &str) -> String {
        if is_farewell(input) {
            self.mode = Mode::Roaming;
            return format!("{} bids you farewell.", display_name(npc_id));
        }

        let analysis = self.analyzer.analyze(input);
        let rng = &mut self.rng;
        match self.npcs.get_mut(npc_id) {
            Some(npc) => {
                let line = npc.respond(input, &analysis, rng);
                format!("{}: {line}", display_name(npc_id))
            }
            None => {
                self.mode = Mode::Roaming;
                "They seem to have wandered off.".to_string()
            }
        }
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    fn go(&mut self, direction: &str) -> EngineResult<String> {
        let dir = direction.to_lowercase();
        let destination = self
            .content
            .locations
            .get(&self.world.location)
            .and_then(|location| location.exits.get(&dir))
            .cloned();

        let Some(destination) = destination else {
            return Ok("You can't go that way.".to_string());
        };

        self.world.move_to(&destination);
        self.spawn_npcs_at(&destination);
        let notices = self.quest_event(QuestEventKind::VisitLocation, &destination);

        let mut message = self.look()?;
        if !notices.is_empty() {
            message.push_str("\n\n");
            message.push_str(&notices);
        }
        Ok(message)
    }

    fn look(&mut self) -> EngineResult<String> {
        let Some(location) = self.content.locations.get(&self.world.location) else {
            return Err(EngineError::UnknownLocation(self.world.location.clone()));
        };

        let context = self.view_context();
        let mut out = self.narrator.describe_location(
            &self.world.location,
            &location.description,
            &context,
            &mut self.rng,
        );

        let items = self.world.items_at(&self.world.location);
        if !items.is_empty() {
            let names: Vec<String> = items.iter().map(|id| display(id)).collect();
            out.push_str("\n\nYou see: ");
            out.push_str(&names.join(", "));
        }

        let npcs = self.content.npcs_at(&self.world.location);
        if !npcs.is_empty() {
            let names: Vec<String> = npcs.iter().map(|id| display_name(id)).collect();
            out.push_str("\nCharacters here: ");
            out.push_str(&names.join(", "));
        }

        let mut exits: Vec<&str> = location.exits.keys().map(String::as_str).collect();
        if !exits.is_empty() {
            exits.sort_unstable();
            out.push_str("\nExits: ");
            out.push_str(&exits.join(", "));
        }

        Ok(out)
    }

    fn take(&mut self, name: &str) -> String {
        let here = self.world.items_at(&self.world.location);
        let Some(id) = resolve(name, &here).map(str::to_string) else {
            return format!("There is no {name} here.");
        };

        if !self.world.take(&id) {
            return format!("There is no {name} here.");
        }
        let notices = self.quest_event(QuestEventKind::CollectItem, &id);

        let mut message = format!("You take the {}.", display(&id));
        if !notices.is_empty() {
            message.push_str("\n\n");
            message.push_str(&notices);
        }
        message
    }

    fn drop(&mut self, name: &str) -> String {
        let carried: Vec<&str> = self.world.inventory.iter().map(String::as_str).collect();
        let Some(id) = resolve(name, &carried).map(str::to_string) else {
            return format!("You don't have a {name}.");
        };

        if !self.world.drop_item(&id) {
            return format!("You don't have a {name}.");
        }
        format!("You drop the {}.", display(&id))
    }

    fn examine(&mut self, target: &str) -> String {
        // Resolution order: carried items, items here, characters here.
        let carried: Vec<&str> = self.world.inventory.iter().map(String::as_str).collect();
        if let Some(id) = resolve(target, &carried).map(str::to_string) {
            return self.examine_item(&id);
        }

        let here = self.world.items_at(&self.world.location);
        if let Some(id) = resolve(target, &here).map(str::to_string) {
            return self.examine_item(&id);
        }

        let npcs = self.content.npcs_at(&self.world.location);
        if let Some(id) = resolve(target, &npcs).map(str::to_string) {
            let description = self
                .content
                .npcs
                .get(&id)
                .and_then(|npc| npc.description.clone())
                .unwrap_or_else(|| {
                    format!("{} seems busy with their own affairs.", display_name(&id))
                });
            return description;
        }

        format!("You don't see any {target} here.")
    }

    fn examine_item(&mut self, id: &str) -> String {
        let base = match self.content.items.get(id) {
            Some(item) => item
                .examine_text
                .clone()
                .unwrap_or_else(|| item.description.clone()),
            None => format!("Nothing special about the {}.", display(id)),
        };

        let mut context = self.view_context();
        context.push(("skill_level", self.skills.level("lore").to_string()));
        self.narrator
            .describe_item(id, &base, &context, &mut self.rng)
    }

    fn talk(&mut self, name: &str) -> String {
        // Location gating comes first: no conversation state, no analysis,
        // unless the character is actually here.
        let here = self.content.npcs_at(&self.world.location);
        let Some(id) = resolve(name, &here).map(str::to_string) else {
            return format!("There's no one called {name} here.");
        };

        let notices = self.quest_event(QuestEventKind::TalkToNpc, &id);

        let context = self.view_context();
        let vars: HashMap<String, String> = context
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect();

        let rng = &mut self.rng;
        let Some(npc) = self.npcs.get(&id) else {
            return "They seem to have wandered off.".to_string();
        };
        let greeting = render(&npc.greeting(rng), &vars);

        self.mode = Mode::Talking(id.clone());
        let mut message = format!(
            "{}: {greeting}\n(Say 'bye' to end the conversation.)",
            display_name(&id)
        );
        if !notices.is_empty() {
            message.push_str("\n\n");
            message.push_str(&notices);
        }
        message
    }

    fn show_inventory(&self) -> String {
        if self.world.inventory.is_empty() {
            return "You are not carrying anything.".to_string();
        }
        let mut out = "You are carrying:".to_string();
        for id in &self.world.inventory {
            match self.content.items.get(id) {
                Some(item) => out.push_str(&format!("\n- {}: {}", display(id), item.description)),
                None => out.push_str(&format!("\n- {}", display(id))),
            }
        }
        out
    }

    fn show_quests(&self) -> String {
        let active = self.quests.active();
        let mut out = String::new();

        if active.is_empty() {
            out.push_str("You have no active quests.");
        } else {
            out.push_str("Active quests:");
            for quest in active {
                out.push_str(&format!(
                    "\n- {} ({}/{} objectives) [{}]",
                    quest.title,
                    quest.completed_objectives(),
                    quest.objectives.len(),
                    quest.id
                ));
            }
        }

        let available = self.quests.available();
        if !available.is_empty() {
            out.push_str("\nAvailable quests: ");
            out.push_str(&available.join(", "));
            out.push_str("\n(Use 'accept <quest>' to take one on.)");
        }
        out
    }

    fn show_quest(&self, name: &str) -> String {
        let active_ids: Vec<&str> = self
            .quests
            .active()
            .iter()
            .map(|quest| quest.id.as_str())
            .collect();
        if let Some(id) = resolve(name, &active_ids).map(str::to_string) {
            if let Some(quest) = self.quests.get(&id) {
                let mut out = format!("{}\n{}", quest.title, quest.description);
                for objective in &quest.objectives {
                    let mark = if objective.completed { "x" } else { " " };
                    out.push_str(&format!("\n[{mark}] {}", objective.description));
                }
                return out;
            }
        }

        if self.quests.is_completed(name) {
            return "You have already completed that quest.".to_string();
        }
        if let Some(record) = self.quests.definition(name) {
            return format!("{}\n{}\n(Not yet accepted.)", record.title, record.description);
        }
        format!("No quest called {name}.")
    }

    fn accept_quest(&mut self, name: &str) -> String {
        let available = self.quests.available();
        let id = resolve(name, &available)
            .map(str::to_string)
            .unwrap_or_else(|| name.to_string());

        match self.quests.start(&id) {
            Ok(quest) => format!("Quest accepted: {}\n{}", quest.title, quest.description),
            Err(err) => err.to_string(),
        }
    }

    fn show_skills(&self) -> String {
        let mut out = "Your skills:".to_string();
        for (name, description, progress) in self.skills.all() {
            out.push_str(&format!(
                "\n- {} (Level {})\n  {}\n  Experience: {}/{}",
                display_name(name),
                progress.level,
                description,
                progress.experience,
                progress.next_level
            ));
        }
        out
    }

    fn show_skill(&self, name: &str) -> String {
        let key = name.trim().to_lowercase();
        match (SkillSet::description(&key), self.skills.progress(&key)) {
            (Some(description), Some(progress)) => format!(
                "{} - Level {}\n{}\nExperience: {}/{}",
                display_name(&key),
                progress.level,
                description,
                progress.experience,
                progress.next_level
            ),
            _ => format!("No skill called {name}."),
        }
    }

    fn train(&mut self, name: &str) -> String {
        let key = name.trim().to_lowercase();
        match self.skills.train(&key) {
            Some(result) if result.leveled => format!(
                "Level up! Your {} is now level {}.",
                display(&key),
                result.level
            ),
            Some(_) => format!(
                "You practice {} and gain {TRAINING_EXPERIENCE} experience.",
                display(&key)
            ),
            None => format!("No skill called {name}."),
        }
    }

    fn show_recipes(&self) -> String {
        let available = self
            .crafting
            .available(&self.world.inventory, &self.world.location);
        if available.is_empty() {
            return "You can't craft anything right now.".to_string();
        }
        let mut out = "You could craft:".to_string();
        for (id, recipe) in available {
            out.push_str(&format!(
                "\n- {} [{}]: makes {}",
                recipe.name,
                id,
                display(&recipe.result)
            ));
        }
        out
    }

    fn craft(&mut self, name: &str) -> String {
        let known = self.crafting.ids();
        let Some(id) = resolve(name, &known).map(str::to_string) else {
            return "You don't know that recipe.".to_string();
        };

        let ingredients = match self.crafting.get(&id) {
            Some(recipe) => recipe.ingredients.clone(),
            None => return "You don't know that recipe.".to_string(),
        };

        let outcome = self
            .crafting
            .craft(&id, &mut self.world.inventory, &self.world.location)
            .map(str::to_string);

        match outcome {
            Ok(result) => {
                for ingredient in &ingredients {
                    self.world.forget(ingredient);
                }
                self.world.grant(&result);
                let notices = self.quest_event(QuestEventKind::CraftItem, &id);

                let mut message = format!("You craft the {}!", display(&result));
                if !notices.is_empty() {
                    message.push_str("\n\n");
                    message.push_str(&notices);
                }
                message
            }
            Err(err) => err.to_string(),
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Instantiate dialogue state for every NPC placed at `location` that
    /// has not been met yet.
    fn spawn_npcs_at(&mut self, location: &str) {
        let ids: Vec<String> = self
            .content
            .npcs_at(location)
            .into_iter()
            .map(str::to_string)
            .collect();
        for id in ids {
            if self.npcs.contains_key(&id) {
                continue;
            }
            if let Some(record) = self.content.npcs.get(&id) {
                let npc = Npc::new(id.clone(), record.clone());
                self.npcs.insert(id, npc);
            }
        }
    }

    /// Fire a quest event, apply rewards for anything it completed, and
    /// return the player-facing notices.
    fn quest_event(&mut self, kind: QuestEventKind, target: &str) -> String {
        let completed = self.quests.record_event(kind, target);
        let mut lines: Vec<String> = Vec::new();

        for quest in completed {
            self.world.experience += quest.rewards.experience;
            for item in &quest.rewards.items {
                self.world.grant(item);
            }

            lines.push(format!("Quest complete: {}!", quest.title));
            if !quest.rewards.items.is_empty() {
                let names: Vec<String> =
                    quest.rewards.items.iter().map(|id| display(id)).collect();
                lines.push(format!("You receive: {}.", names.join(", ")));
            }
            if quest.rewards.experience > 0 {
                lines.push(format!("You gain {} experience.", quest.rewards.experience));
            }
            if let Some(next) = quest
                .next_quest
                .as_deref()
                .filter(|next| self.quests.definition(next).is_some())
            {
                lines.push(format!("New quest available: {next}."));
            }
        }
        lines.join("\n")
    }

    /// Context pairs fed to description templates.
    fn view_context(&self) -> Vec<(&'static str, String)> {
        vec![
            ("time_of_day", self.world.time_of_day.clone()),
            ("activity_level", self.world.activity_level.clone()),
        ]
    }

    fn response(&self, message: String) -> Response {
        Response {
            message,
            location: self.world.location.clone(),
            inventory: self.world.inventory.clone(),
            game_over: self.game_over,
        }
    }
}

/// Whether an utterance ends a conversation.
fn is_farewell(input: &str) -> bool {
    matches!(
        input.trim().to_lowercase().as_str(),
        "bye" | "goodbye" | "farewell"
    )
}

/// Human-readable form of a content id: underscores to spaces.
fn display(id: &str) -> String {
    id.replace('_', " ")
}

/// Title-cased form of a content id, for character and skill names.
fn display_name(id: &str) -> String {
    id.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn help_text() -> String {
    "Available commands:\n\
     - look: look around the current location\n\
     - go <direction>: move north, south, east, west, up or down\n\
     - take <item> / drop <item>: pick things up or put them down\n\
     - examine <target>: inspect an item or character\n\
     - talk <character>: start a conversation (say 'bye' to end it)\n\
     - inventory: check what you are carrying\n\
     - quests / quest <id> / accept <id>: manage your quests\n\
     - skills / skill <name> / train <name>: manage your skills\n\
     - recipes / craft <recipe>: craft items from ingredients\n\
     - help: show this list\n\
     - quit: leave the game"
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn farewell_words() {
        assert!(is_farewell("bye"));
        assert!(is_farewell("  GOODBYE "));
        assert!(is_farewell("Farewell"));
        assert!(!is_farewell("later"));
    }

    #[test]
    fn display_forms() {
        assert_eq!(display("magic_crystal"), "magic crystal");
        assert_eq!(display_name("elder_rowan"), "Elder Rowan");
        assert_eq!(display_name("merchant"), "Merchant");
    }
}

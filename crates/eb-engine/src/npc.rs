//! NPC dialogue state: mood, bounded conversation memory, response choice.

use std::collections::{HashMap, VecDeque};

use rand::rngs::StdRng;
use rand::Rng;

use eb_core::NpcRecord;

use crate::analyzer::{Analysis, Intent};

/// Number of `{input, analysis}` pairs an NPC remembers.
pub const MEMORY_CAPACITY: usize = 5;

/// Sentiment magnitude separating positive/negative replies from neutral.
const SENTIMENT_THRESHOLD: f32 = 0.3;

/// Line used when every response pool is empty.
const GENERIC_RESPONSE: &str = "I'm not sure how to respond to that.";

/// Greetings used when the mood bucket has no lines of its own.
const GENERIC_GREETINGS: &[&str] = &["Hello, traveler.", "Well met.", "Greetings to you."];

/// An NPC's emotional state. Every component stays in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mood {
    /// How pleased the character is.
    pub happiness: f32,
    /// How much the character trusts the player.
    pub trust: f32,
    /// How much energy the character has left for conversation.
    pub energy: f32,
}

impl Default for Mood {
    fn default() -> Self {
        Self {
            happiness: 0.5,
            trust: 0.5,
            energy: 1.0,
        }
    }
}

impl Mood {
    /// Apply one utterance's sentiment. Each interaction costs energy.
    fn absorb(&mut self, sentiment: f32) {
        self.happiness = (self.happiness + sentiment * 0.1).clamp(0.0, 1.0);
        self.trust = (self.trust + sentiment * 0.05).clamp(0.0, 1.0);
        self.energy = (self.energy - 0.1).clamp(0.0, 1.0);
    }

    /// Greeting bucket for the current happiness.
    fn bucket(&self) -> &'static str {
        if self.happiness > 0.7 {
            "happy"
        } else if self.happiness < 0.3 {
            "tired"
        } else {
            "neutral"
        }
    }
}

/// One remembered exchange.
#[derive(Debug, Clone)]
pub struct MemoryEntry {
    /// What the player said.
    pub input: String,
    /// The analysis it produced.
    pub analysis: Analysis,
}

/// Reply classification derived from an utterance's analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResponseType {
    Greeting,
    Informative,
    Positive,
    Negative,
    Neutral,
}

impl ResponseType {
    fn key(self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Informative => "informative",
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

fn classify(analysis: &Analysis) -> ResponseType {
    match analysis.intent {
        Intent::Greeting => ResponseType::Greeting,
        Intent::Question => ResponseType::Informative,
        _ => {
            if analysis.sentiment > SENTIMENT_THRESHOLD {
                ResponseType::Positive
            } else if analysis.sentiment < -SENTIMENT_THRESHOLD {
                ResponseType::Negative
            } else {
                ResponseType::Neutral
            }
        }
    }
}

/// Live dialogue state for one character.
///
/// Created when the character's location first loads; mood and memory last
/// for the lifetime of the session, nothing is persisted.
#[derive(Debug)]
pub struct Npc {
    id: String,
    record: NpcRecord,
    mood: Mood,
    memory: VecDeque<MemoryEntry>,
    topic_counts: HashMap<String, u32>,
}

impl Npc {
    /// Create dialogue state from a content record.
    pub fn new(id: impl Into<String>, record: NpcRecord) -> Self {
        Self {
            id: id.into(),
            record,
            mood: Mood::default(),
            memory: VecDeque::with_capacity(MEMORY_CAPACITY),
            topic_counts: HashMap::new(),
        }
    }

    /// The character's content id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The character's content record.
    pub fn record(&self) -> &NpcRecord {
        &self.record
    }

    /// Current mood snapshot.
    pub fn mood(&self) -> Mood {
        self.mood
    }

    /// The bounded conversation memory, oldest first.
    pub fn memory(&self) -> &VecDeque<MemoryEntry> {
        &self.memory
    }

    /// How often a topic has come up in conversation.
    pub fn topic_count(&self, topic: &str) -> u32 {
        self.topic_counts.get(topic).copied().unwrap_or(0)
    }

    /// React to one player utterance: update mood and memory, then pick a
    /// reply line uniformly at random from the matching pools.
    pub fn respond(&mut self, input: &str, analysis: &Analysis, rng: &mut StdRng) -> String {
        self.mood.absorb(analysis.sentiment);

        self.memory.push_back(MemoryEntry {
            input: input.to_string(),
            analysis: analysis.clone(),
        });
        if self.memory.len() > MEMORY_CAPACITY {
            self.memory.pop_front();
        }

        *self
            .topic_counts
            .entry(analysis.topic.as_str().to_string())
            .or_insert(0) += 1;

        let response_type = classify(analysis);
        let mut pool: Vec<&String> = Vec::new();
        if let Some(lines) = self.record.responses.get(analysis.topic.as_str()) {
            pool.extend(lines);
        }
        if let Some(lines) = self.record.responses.get(response_type.key()) {
            pool.extend(lines);
        }
        if pool.is_empty() {
            if let Some(lines) = self.record.responses.get("neutral") {
                pool.extend(lines);
            }
        }
        if pool.is_empty() {
            return GENERIC_RESPONSE.to_string();
        }
        pool[rng.random_range(0..pool.len())].clone()
    }

    /// Pick a greeting line from the current mood bucket.
    pub fn greeting(&self, rng: &mut StdRng) -> String {
        match self.record.greetings.get(self.mood.bucket()) {
            Some(lines) if !lines.is_empty() => lines[rng.random_range(0..lines.len())].clone(),
            _ => GENERIC_GREETINGS[rng.random_range(0..GENERIC_GREETINGS.len())].to_string(),
        }
    }

    /// Forget the conversation so far.
    pub fn clear_memory(&mut self) {
        self.memory.clear();
    }
}

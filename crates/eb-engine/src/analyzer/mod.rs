//! Command analysis: intent, action, objects, entities, sentiment, topic.
//!
//! The analyzer is the first stage of the command pipeline. It is total:
//! every input string produces a best-effort [`Analysis`], whether or not
//! the linguistic backend is present. Results are memoized in a bounded
//! cache keyed by the trimmed, lowercased input text.

mod lexicon;

pub use lexicon::Lexicon;

use eb_core::{BoundedCache, CacheKey, DEFAULT_CACHE_CAPACITY};

/// Coarse classification of a command's purpose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// The player wants to go somewhere.
    Movement,
    /// The player wants to manipulate or inspect something.
    Interaction,
    /// The utterance opens with a greeting word.
    Greeting,
    /// The utterance is phrased as a question.
    Question,
    /// A recognized verb outside the movement/interaction sets; carries the
    /// verb's lemma.
    Other(String),
    /// No recognized verb was found.
    Unknown,
}

/// Coarse subject-matter bucket used to select NPC dialogue content.
///
/// The enumeration order is the matching order: the first category whose
/// keyword appears in the input wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    /// Spells, enchantments, potions.
    Magic,
    /// Objects and inventory.
    Items,
    /// Buying, selling, haggling.
    Trade,
    /// Quests and errands.
    Quest,
    /// Fighting and weaponry.
    Combat,
    /// Anything else.
    General,
}

impl Topic {
    /// The string key used in NPC response tables and topic counters.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Magic => "magic",
            Self::Items => "items",
            Self::Trade => "trade",
            Self::Quest => "quest",
            Self::Combat => "combat",
            Self::General => "general",
        }
    }
}

/// Structured output of the analyzer for a single command.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Coarse classification of the command's purpose.
    pub intent: Intent,
    /// Canonical form of the command's main verb (or the first token when no
    /// verb was recognized).
    pub action: String,
    /// Object tokens after the verb, stopwords removed, in order.
    pub objects: Vec<String>,
    /// Capitalized name spans, in order of appearance.
    pub entities: Vec<String>,
    /// Lexical polarity of the whole input, in [-1, 1].
    pub sentiment: f32,
    /// First matching topic category.
    pub topic: Topic,
}

/// The cached command analyzer.
///
/// Built with [`Analyzer::new`] the analyzer carries the rule-based
/// [`Lexicon`] backend; built with [`Analyzer::without_backend`] it degrades
/// to a literal token split, which is the behavior callers get when the
/// richer backend is unavailable.
#[derive(Debug)]
pub struct Analyzer {
    backend: Option<Lexicon>,
    cache: BoundedCache<Analysis>,
    backend_calls: usize,
}

impl Analyzer {
    /// Analyzer with the rule-based backend and default cache capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Analyzer with the rule-based backend and a custom cache capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            backend: Some(Lexicon::new()),
            cache: BoundedCache::new(capacity),
            backend_calls: 0,
        }
    }

    /// Analyzer without a linguistic backend; uses the literal fallback.
    pub fn without_backend() -> Self {
        Self {
            backend: None,
            cache: BoundedCache::new(DEFAULT_CACHE_CAPACITY),
            backend_calls: 0,
        }
    }

    /// Analyze a command, returning the cached result when available.
    pub fn analyze(&mut self, text: &str) -> Analysis {
        let key = CacheKey::of(text);
        if let Some(hit) = self.cache.get(&key) {
            return hit.clone();
        }

        let analysis = match &self.backend {
            Some(lexicon) => {
                self.backend_calls += 1;
                lexicon.analyze(text)
            }
            None => fallback_analysis(text),
        };
        self.cache.insert(key, analysis.clone());
        analysis
    }

    /// How many times the backend has actually run (cache misses only).
    pub fn backend_invocations(&self) -> usize {
        self.backend_calls
    }

    /// Drop every memoized analysis.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Literal analysis used when no linguistic backend is available: the first
/// whitespace token is the action, the rest are objects, everything else is
/// neutral.
fn fallback_analysis(text: &str) -> Analysis {
    let mut tokens = text.split_whitespace();
    let action = tokens.next().unwrap_or_default().to_lowercase();
    let objects = tokens.map(str::to_lowercase).collect();

    Analysis {
        intent: Intent::Unknown,
        action,
        objects,
        entities: Vec::new(),
        sentiment: 0.0,
        topic: Topic::General,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_intent() {
        let mut analyzer = Analyzer::new();
        assert_eq!(analyzer.analyze("go north").intent, Intent::Movement);
        assert_eq!(analyzer.analyze("walk east").intent, Intent::Movement);
    }

    #[test]
    fn interaction_intent() {
        let mut analyzer = Analyzer::new();
        assert_eq!(analyzer.analyze("take potion").intent, Intent::Interaction);
        assert_eq!(analyzer.analyze("examine the crystal").intent, Intent::Interaction);
    }

    #[test]
    fn unknown_intent_without_verb() {
        let mut analyzer = Analyzer::new();
        assert_eq!(analyzer.analyze("xyzzy").intent, Intent::Unknown);
    }

    #[test]
    fn unmapped_verb_carries_lemma() {
        let mut analyzer = Analyzer::new();
        assert_eq!(
            analyzer.analyze("buy a lantern").intent,
            Intent::Other("buy".to_string())
        );
    }

    #[test]
    fn action_is_canonicalized() {
        let mut analyzer = Analyzer::new();
        assert_eq!(analyzer.analyze("look around").action, "examine");
        assert_eq!(analyzer.analyze("go north").action, "move");
        assert_eq!(analyzer.analyze("take the potion").action, "acquire");
        assert_eq!(analyzer.analyze("drop it").action, "discard");
        assert_eq!(analyzer.analyze("talk to the merchant").action, "interact");
        assert_eq!(analyzer.analyze("help").action, "assist");
    }

    #[test]
    fn objects_skip_stopwords() {
        let mut analyzer = Analyzer::new();
        let analysis = analyzer.analyze("take the glowing crystal");
        assert_eq!(analysis.objects, vec!["glowing", "crystal"]);
    }

    #[test]
    fn entities_are_capitalized_spans() {
        let mut analyzer = Analyzer::new();
        let analysis = analyzer.analyze("ask Elder Rowan about the Hollow");
        assert_eq!(analysis.entities, vec!["Elder Rowan", "Hollow"]);
    }

    #[test]
    fn sentiment_polarity() {
        let mut analyzer = Analyzer::new();
        assert!(analyzer.analyze("this is wonderful").sentiment > 0.3);
        assert!(analyzer.analyze("this is terrible").sentiment < -0.3);
        assert_eq!(analyzer.analyze("open the door").sentiment, 0.0);
    }

    #[test]
    fn negation_flips_sentiment() {
        let mut analyzer = Analyzer::new();
        assert!(analyzer.analyze("not good at all").sentiment < 0.0);
    }

    #[test]
    fn topic_first_match_wins() {
        let mut analyzer = Analyzer::new();
        // "magic" and "price" both match; magic comes first in the order.
        assert_eq!(analyzer.analyze("what price for the magic ring").topic, Topic::Magic);
        assert_eq!(analyzer.analyze("any quests for me").topic, Topic::Quest);
        assert_eq!(analyzer.analyze("nice weather today").topic, Topic::General);
    }

    #[test]
    fn greeting_and_question_intents() {
        let mut analyzer = Analyzer::new();
        assert_eq!(analyzer.analyze("hello there").intent, Intent::Greeting);
        assert_eq!(analyzer.analyze("where is the market").intent, Intent::Question);
        assert_eq!(analyzer.analyze("is it safe?").intent, Intent::Question);
    }

    #[test]
    fn second_analysis_is_memoized() {
        let mut analyzer = Analyzer::new();
        let first = analyzer.analyze("go north");
        let second = analyzer.analyze("go north");
        assert_eq!(first, second);
        assert_eq!(analyzer.backend_invocations(), 1);
    }

    #[test]
    fn cache_key_normalizes_case_and_whitespace() {
        let mut analyzer = Analyzer::new();
        analyzer.analyze("go north");
        analyzer.analyze("  GO NORTH ");
        assert_eq!(analyzer.backend_invocations(), 1);
    }

    #[test]
    fn fallback_without_backend() {
        let mut analyzer = Analyzer::without_backend();
        let analysis = analyzer.analyze("take shiny crystal");
        assert_eq!(analysis.intent, Intent::Unknown);
        assert_eq!(analysis.action, "take");
        assert_eq!(analysis.objects, vec!["shiny", "crystal"]);
        assert_eq!(analysis.sentiment, 0.0);
        assert!(analysis.entities.is_empty());
        assert_eq!(analysis.topic, Topic::General);
    }

    #[test]
    fn empty_input_is_harmless() {
        let mut analyzer = Analyzer::new();
        let analysis = analyzer.analyze("");
        assert_eq!(analysis.intent, Intent::Unknown);
        assert!(analysis.action.is_empty());
    }
}

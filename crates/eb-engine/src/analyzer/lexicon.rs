//! Rule-based linguistic backend.
//!
//! A deliberately small, closed rule set: verb classes for intent, a
//! validating lemmatizer (suffix stripping checked against the known-word
//! set), a valence lexicon for sentiment, and keyword sets for topics. The
//! point is graceful, predictable behavior over real language coverage.

use super::{Analysis, Intent, Topic};

/// Verbs that classify as [`Intent::Movement`].
const MOVEMENT_VERBS: &[&str] = &["go", "move", "walk", "run", "climb", "head", "travel"];

/// Verbs that classify as [`Intent::Interaction`].
const INTERACTION_VERBS: &[&str] = &[
    "take", "drop", "examine", "look", "inspect", "talk", "get", "grab", "use", "open", "read",
];

/// Verbs recognized by the lexicon but outside both intent classes.
const OTHER_VERBS: &[&str] = &[
    "help", "give", "buy", "sell", "craft", "train", "ask", "show", "tell", "find", "say",
];

/// Words that open a greeting.
const GREETING_WORDS: &[&str] = &["hello", "hi", "hey", "greetings"];

/// Interrogative lead-ins.
const QUESTION_WORDS: &[&str] = &["who", "what", "where", "when", "why", "how"];

/// Words skipped when collecting object tokens.
const STOPWORDS: &[&str] = &[
    "the", "a", "an", "to", "at", "in", "on", "with", "up", "about", "of", "for", "my", "your",
    "that", "this", "some", "me", "it", "please",
];

/// Words that flip the valence of the following sentiment word.
const NEGATORS: &[&str] = &["not", "no", "never"];

/// Irregular verb forms the suffix rules cannot reach.
const IRREGULAR_LEMMAS: &[(&str, &str)] = &[
    ("went", "go"),
    ("gone", "go"),
    ("took", "take"),
    ("taken", "take"),
    ("got", "get"),
    ("gave", "give"),
    ("ran", "run"),
    ("bought", "buy"),
    ("sold", "sell"),
    ("said", "say"),
    ("told", "tell"),
    ("found", "find"),
];

/// Valence lexicon for the sentiment score.
const SENTIMENT_LEXICON: &[(&str, f32)] = &[
    ("wonderful", 1.0),
    ("excellent", 1.0),
    ("amazing", 0.9),
    ("beautiful", 0.85),
    ("great", 0.8),
    ("love", 0.8),
    ("lovely", 0.8),
    ("happy", 0.8),
    ("good", 0.7),
    ("kind", 0.6),
    ("nice", 0.6),
    ("thank", 0.5),
    ("thanks", 0.5),
    ("friend", 0.4),
    ("interesting", 0.4),
    ("fine", 0.3),
    ("expensive", -0.4),
    ("boring", -0.5),
    ("angry", -0.6),
    ("ugly", -0.7),
    ("bad", -0.7),
    ("hate", -0.8),
    ("stupid", -0.8),
    ("worthless", -0.8),
    ("horrible", -1.0),
    ("awful", -1.0),
    ("terrible", -1.0),
];

/// Topic keyword sets, in matching order.
const TOPIC_KEYWORDS: &[(Topic, &[&str])] = &[
    (Topic::Magic, &["magic", "spell", "wizard", "enchant", "potion"]),
    (Topic::Items, &["item", "inventory", "artifact", "object", "treasure"]),
    (Topic::Trade, &["buy", "sell", "trade", "price", "gold", "coin"]),
    (Topic::Quest, &["quest", "mission", "task", "journey"]),
    (Topic::Combat, &["fight", "battle", "attack", "defend", "sword"]),
];

/// The rule-based linguistic backend.
#[derive(Debug, Default)]
pub struct Lexicon;

impl Lexicon {
    /// Create the backend.
    pub fn new() -> Self {
        Self
    }

    /// Produce a full [`Analysis`] for one input string.
    pub fn analyze(&self, text: &str) -> Analysis {
        let raw_tokens: Vec<&str> = text.split_whitespace().collect();
        let tokens: Vec<String> = raw_tokens
            .iter()
            .map(|t| normalize(t))
            .filter(|t| !t.is_empty())
            .collect();
        let lemmas: Vec<String> = tokens.iter().map(|t| lemma(t)).collect();

        let verb_pos = lemmas.iter().position(|l| is_verb(l));
        let intent = classify_intent(text, &tokens, &lemmas, verb_pos);

        let action = match verb_pos {
            Some(pos) => canonical_action(&lemmas[pos]).to_string(),
            None => tokens.first().cloned().unwrap_or_default(),
        };

        let object_start = verb_pos.map_or(1, |pos| pos + 1);
        let objects: Vec<String> = tokens
            .iter()
            .skip(object_start)
            .filter(|t| !STOPWORDS.contains(&t.as_str()))
            .cloned()
            .collect();

        Analysis {
            intent,
            action,
            objects,
            entities: entity_spans(&raw_tokens),
            sentiment: sentiment(&tokens, &lemmas),
            topic: topic_of(text),
        }
    }
}

fn classify_intent(
    text: &str,
    tokens: &[String],
    lemmas: &[String],
    verb_pos: Option<usize>,
) -> Intent {
    if let Some(first) = tokens.first() {
        if GREETING_WORDS.contains(&first.as_str()) {
            return Intent::Greeting;
        }
        if QUESTION_WORDS.contains(&first.as_str()) || text.trim_end().ends_with('?') {
            return Intent::Question;
        }
    }

    match verb_pos {
        Some(pos) => {
            let verb = lemmas[pos].as_str();
            if MOVEMENT_VERBS.contains(&verb) {
                Intent::Movement
            } else if INTERACTION_VERBS.contains(&verb) {
                Intent::Interaction
            } else {
                Intent::Other(verb.to_string())
            }
        }
        None => Intent::Unknown,
    }
}

/// Canonical action form of a verb lemma.
fn canonical_action(verb: &str) -> &str {
    match verb {
        "look" => "examine",
        "go" => "move",
        "take" => "acquire",
        "drop" => "discard",
        "talk" => "interact",
        "help" => "assist",
        other => other,
    }
}

/// Strip surrounding punctuation and lowercase.
fn normalize(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
        .to_lowercase()
}

fn is_verb(word: &str) -> bool {
    MOVEMENT_VERBS.contains(&word)
        || INTERACTION_VERBS.contains(&word)
        || OTHER_VERBS.contains(&word)
}

fn valence(word: &str) -> Option<f32> {
    SENTIMENT_LEXICON
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, v)| *v)
}

fn is_known(word: &str) -> bool {
    is_verb(word) || valence(word).is_some()
}

/// Reduce a token to a lemma the lexicon knows, or return it unchanged.
///
/// Suffix stripping is validated against the known-word set, so "examines"
/// becomes "examine" but "goes" never becomes "goe".
fn lemma(word: &str) -> String {
    if is_known(word) {
        return word.to_string();
    }
    if let Some((_, base)) = IRREGULAR_LEMMAS.iter().find(|(form, _)| *form == word) {
        return (*base).to_string();
    }
    suffix_candidates(word)
        .into_iter()
        .find(|c| is_known(c))
        .unwrap_or_else(|| word.to_string())
}

fn suffix_candidates(word: &str) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(stem) = word.strip_suffix("ies") {
        out.push(format!("{stem}y"));
    }
    if let Some(stem) = word.strip_suffix('s') {
        out.push(stem.to_string());
    }
    if let Some(stem) = word.strip_suffix("es") {
        out.push(stem.to_string());
    }
    for suffix in ["ed", "ing"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            out.push(stem.to_string());
            out.push(format!("{stem}e"));
            let chars: Vec<char> = stem.chars().collect();
            if chars.len() >= 2 && chars[chars.len() - 1] == chars[chars.len() - 2] {
                out.push(chars[..chars.len() - 1].iter().collect());
            }
        }
    }
    out
}

/// Mean valence of matched words, with single-word negation flip, clamped.
fn sentiment(tokens: &[String], lemmas: &[String]) -> f32 {
    let mut total = 0.0f32;
    let mut matched = 0u32;

    for (pos, word) in lemmas.iter().enumerate() {
        let Some(mut value) = valence(word) else {
            continue;
        };
        if pos > 0 && NEGATORS.contains(&tokens[pos - 1].as_str()) {
            value = -value;
        }
        total += value;
        matched += 1;
    }

    if matched == 0 {
        0.0
    } else {
        (total / matched as f32).clamp(-1.0, 1.0)
    }
}

/// First topic whose keyword occurs in the lowercased input.
fn topic_of(text: &str) -> Topic {
    let haystack = text.to_lowercase();
    for (topic, keywords) in TOPIC_KEYWORDS {
        if keywords.iter().any(|k| haystack.contains(k)) {
            return *topic;
        }
    }
    Topic::General
}

/// Spans of consecutive capitalized words, excluding the first token.
fn entity_spans(raw_tokens: &[&str]) -> Vec<String> {
    let mut spans = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for (pos, token) in raw_tokens.iter().enumerate() {
        let trimmed = token.trim_matches(|c: char| !c.is_alphanumeric());
        let capitalized =
            pos > 0 && trimmed.chars().next().is_some_and(|c| c.is_uppercase());
        if capitalized {
            current.push(trimmed);
        } else if !current.is_empty() {
            spans.push(current.join(" "));
            current.clear();
        }
    }
    if !current.is_empty() {
        spans.push(current.join(" "));
    }
    spans
}

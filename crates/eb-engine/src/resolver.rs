//! Resolution of player-typed names against candidate content ids.
//!
//! Content ids are snake_case; players type free text. Exact matches win
//! (after lowercasing and space-to-underscore folding), then the best fuzzy
//! match above a similarity threshold.

use strsim::jaro_winkler;

/// Minimum Jaro-Winkler similarity for a fuzzy match.
const FUZZY_THRESHOLD: f64 = 0.8;

/// Resolve `input` against candidate ids.
pub fn resolve<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let needle = input.trim().to_lowercase().replace(' ', "_");

    for candidate in candidates {
        if candidate.to_lowercase() == needle {
            return Some(candidate);
        }
    }

    let mut best: Option<(&str, f64)> = None;
    for candidate in candidates {
        let score = jaro_winkler(&needle, &candidate.to_lowercase());
        if score >= FUZZY_THRESHOLD && best.is_none_or(|(_, b)| score > b) {
            best = Some((candidate, score));
        }
    }
    best.map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match() {
        assert_eq!(resolve("crystal", &["crystal", "map"]), Some("crystal"));
    }

    #[test]
    fn case_and_space_folding() {
        assert_eq!(
            resolve("Magic Crystal", &["magic_crystal"]),
            Some("magic_crystal")
        );
    }

    #[test]
    fn fuzzy_match_typo() {
        assert_eq!(resolve("crystl", &["crystal", "map"]), Some("crystal"));
    }

    #[test]
    fn no_match_below_threshold() {
        assert_eq!(resolve("dragon", &["crystal", "map"]), None);
    }

    #[test]
    fn empty_candidates() {
        assert_eq!(resolve("crystal", &[]), None);
    }
}

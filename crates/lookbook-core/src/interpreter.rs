//! The query interpreter: converts a raw free-text search string into
//! structured facet matches against the session's vocabularies, without
//! discarding unmatched text.
//!
//! The whole pass is a pure function of its inputs. No I/O, no hidden
//! state, no randomness; identical inputs produce identical outputs.

use std::collections::HashSet;

use serde::Serialize;

use crate::facet::{Facet, Vocabularies};
use crate::filter_state::{FacetSelections, FilterState};
use crate::rules::PHRASE_RULES;
use crate::text::{Token, normalize_token, padded_phrase_text, tokenize};

/// Matched vocabulary values per facet plus leftover tokens in input order,
/// original casing preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub matched: FacetSelections,
    pub leftover: Vec<String>,
}

/// The interpreter's merge output: the next filter state and whether it
/// differs from the previous one. Callers skip refetching when `changed`
/// is false.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub state: FilterState,
    pub matches: MatchResult,
    pub changed: bool,
}

/// Match `raw_text` against the vocabularies: phrase-rule pass first, then
/// the per-token symmetric-prefix pass over unconsumed tokens.
#[must_use]
pub fn interpret(raw_text: &str, vocab: &Vocabularies) -> MatchResult {
    let tokens = tokenize(raw_text);
    let padded = padded_phrase_text(&tokens);

    let mut matched = FacetSelections::default();
    let mut consumed = HashSet::new();
    for rule in PHRASE_RULES {
        if !rule.matches(&padded) {
            continue;
        }
        for &(facet, value) in rule.additions {
            if let Some(canonical) = vocab.canonical(facet, value) {
                let canonical = canonical.to_string();
                matched.push_unique(facet, &canonical);
            }
        }
        for word in rule.consumed {
            consumed.insert(*word);
        }
    }

    let mut leftover = Vec::new();
    for token in &tokens {
        if consumed.contains(token.normalized.as_str()) {
            continue;
        }
        match match_token(token, vocab) {
            Some((facet, value)) => {
                matched.push_unique(facet, &value);
            }
            None => leftover.push(token.raw.clone()),
        }
    }

    MatchResult { matched, leftover }
}

/// Interpret `raw_text` and merge the result into `current`: matched values
/// are unioned into the facet selections, the leftover tokens replace the
/// residual search text.
#[must_use]
pub fn apply_search(current: &FilterState, raw_text: &str, vocab: &Vocabularies) -> SearchOutcome {
    let matches = interpret(raw_text, vocab);

    let mut state = current.clone();
    for &facet in &Facet::MATCH_ORDER {
        for value in matches.matched.get(facet) {
            state.selected.push_unique(facet, value);
        }
    }
    state.search = matches.leftover.join(" ");

    let changed = !state.equivalent(current);
    SearchOutcome {
        state,
        matches,
        changed,
    }
}

/// Shortest token eligible for prefix matching. Below this, only exact
/// matches count.
const MIN_PREFIX_LEN: usize = 3;

/// Walk the facets in priority order; within a facet try exact normalized
/// equality first, then the symmetric prefix match. First hit wins.
fn match_token(token: &Token, vocab: &Vocabularies) -> Option<(Facet, String)> {
    let needle = token.normalized.as_str();
    if needle.is_empty() {
        return None;
    }
    for &facet in &Facet::MATCH_ORDER {
        for value in vocab.matchable_values(facet) {
            if normalize_token(value) == needle {
                return Some((facet, value.to_string()));
            }
        }
        if needle.len() < MIN_PREFIX_LEN {
            continue;
        }
        for value in vocab.matchable_values(facet) {
            let normalized_value = normalize_token(value);
            if normalized_value.starts_with(needle) || needle.starts_with(&normalized_value) {
                return Some((facet, value.to_string()));
            }
        }
    }
    None
}

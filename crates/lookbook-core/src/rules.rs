use crate::facet::Facet;

/// A multi-word search pattern that maps to facet values as a unit.
///
/// Rules are evaluated in table order against the padded lowercase token
/// string; each rule is independent and several may fire on the same input.
/// `additions` only take effect when the value exists in the facet's
/// vocabulary. `consumed` lists normalized words the per-token pass must
/// skip once the rule has fired.
pub(crate) struct PhraseRule {
    pub(crate) phrases: &'static [&'static str],
    pub(crate) additions: &'static [(Facet, &'static str)],
    pub(crate) consumed: &'static [&'static str],
}

impl PhraseRule {
    pub(crate) fn matches(&self, padded_text: &str) -> bool {
        self.phrases
            .iter()
            .any(|phrase| padded_text.contains(&format!(" {phrase} ")))
    }
}

/// Extend by appending records; the matcher never needs to change.
pub(crate) const PHRASE_RULES: &[PhraseRule] = &[
    PhraseRule {
        phrases: &["pixie cut"],
        additions: &[(Facet::Length, "Short"), (Facet::StyleType, "Feminine")],
        consumed: &["pixie", "cut"],
    },
    PhraseRule {
        phrases: &["buzz cut"],
        additions: &[(Facet::Length, "Short")],
        consumed: &["buzz", "cut"],
    },
    PhraseRule {
        phrases: &["bob", "bob cut"],
        additions: &[(Facet::Length, "Short"), (Facet::StyleType, "Feminine")],
        consumed: &["bob", "cut"],
    },
    PhraseRule {
        phrases: &["shoulder length"],
        additions: &[(Facet::Length, "Medium")],
        consumed: &["shoulder", "length"],
    },
    PhraseRule {
        phrases: &["long hair"],
        additions: &[(Facet::Length, "Long")],
        consumed: &["long", "hair"],
    },
    PhraseRule {
        phrases: &["side profile", "side view"],
        additions: &[(Facet::Pose, "Side")],
        consumed: &["side", "profile", "view"],
    },
    PhraseRule {
        phrases: &["straight-on", "straight on", "front facing"],
        additions: &[(Facet::Pose, "Facing")],
        consumed: &["straight", "on", "straighton", "front", "facing"],
    },
    PhraseRule {
        phrases: &["angled view", "three quarter", "3/4"],
        additions: &[(Facet::Pose, "Angled")],
        consumed: &["angled", "view", "three", "quarter", "34"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrase_match_requires_whole_words() {
        let rule = &PHRASE_RULES[0];
        assert!(rule.matches(" pixie cut curly "));
        assert!(!rule.matches(" pixie cutter "));
        assert!(!rule.matches(" spixie cut "));
    }

    #[test]
    fn hyphenated_and_slash_phrases_survive_in_raw_text() {
        let straight_on = &PHRASE_RULES[6];
        assert!(straight_on.matches(" straight-on "));
        assert!(straight_on.matches(" straight on "));
        let angled = &PHRASE_RULES[7];
        assert!(angled.matches(" 3/4 "));
    }
}

/// A whitespace-delimited search token. `raw` keeps the user's original
/// spelling for residual text; `normalized` is what matching runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub(crate) raw: String,
    pub(crate) normalized: String,
}

/// Lowercase and strip every character that is not an ASCII letter or digit.
///
/// Known collision risk: deleting punctuation can coalesce distinct words
/// ("co-op" and "coop" normalize identically). The facet vocabularies are
/// small enough that no collision exists in practice.
#[must_use]
pub(crate) fn normalize_token(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[must_use]
pub(crate) fn tokenize(raw_text: &str) -> Vec<Token> {
    raw_text
        .split_whitespace()
        .map(|word| Token {
            raw: word.to_string(),
            normalized: normalize_token(word),
        })
        .collect()
}

/// All raw tokens lowercased and joined by single spaces, padded on both
/// sides so phrase rules can rely on whole-word ` phrase ` containment.
#[must_use]
pub(crate) fn padded_phrase_text(tokens: &[Token]) -> String {
    let mut out = String::from(" ");
    for token in tokens {
        out.push_str(&token.raw.to_lowercase());
        out.push(' ');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation_and_lowercases() {
        assert_eq!(normalize_token("Pixie-Cut's"), "pixiecuts");
        assert_eq!(normalize_token("3/4"), "34");
        assert_eq!(normalize_token("!!!"), "");
    }

    #[test]
    fn tokenize_drops_empty_words_and_keeps_raw_casing() {
        let tokens = tokenize("  Side   PROFILE \t updo ");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].raw, "Side");
        assert_eq!(tokens[0].normalized, "side");
        assert_eq!(tokens[2].raw, "updo");
    }

    #[test]
    fn padded_phrase_text_keeps_word_boundaries() {
        let tokens = tokenize("Straight-on view");
        assert_eq!(padded_phrase_text(&tokens), " straight-on view ");
        assert_eq!(padded_phrase_text(&[]), " ");
    }
}

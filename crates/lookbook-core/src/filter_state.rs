use serde::{Deserialize, Serialize};

use crate::error::{LookbookError, Result};
use crate::facet::{Facet, Vocabularies};
use crate::pose_labels;

/// Per-facet value lists. Doubles as the matched-value half of a
/// `MatchResult` and the selection half of `FilterState`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSelections {
    pub lengths: Vec<String>,
    pub textures: Vec<String>,
    pub face_shapes: Vec<String>,
    pub style_types: Vec<String>,
    pub poses: Vec<String>,
    pub ethnicities: Vec<String>,
}

impl FacetSelections {
    #[must_use]
    pub fn get(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Length => &self.lengths,
            Facet::Texture => &self.textures,
            Facet::FaceShape => &self.face_shapes,
            Facet::StyleType => &self.style_types,
            Facet::Pose => &self.poses,
            Facet::Ethnicity => &self.ethnicities,
        }
    }

    pub(crate) fn get_mut(&mut self, facet: Facet) -> &mut Vec<String> {
        match facet {
            Facet::Length => &mut self.lengths,
            Facet::Texture => &mut self.textures,
            Facet::FaceShape => &mut self.face_shapes,
            Facet::StyleType => &mut self.style_types,
            Facet::Pose => &mut self.poses,
            Facet::Ethnicity => &mut self.ethnicities,
        }
    }

    /// Append `value` unless already present. Returns whether it was added.
    pub(crate) fn push_unique(&mut self, facet: Facet, value: &str) -> bool {
        let values = self.get_mut(facet);
        if values.iter().any(|v| v == value) {
            return false;
        }
        values.push(value.to_string());
        true
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        Facet::MATCH_ORDER
            .iter()
            .all(|&facet| self.get(facet).is_empty())
    }

    /// Order-insensitive equality per facet.
    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        Facet::MATCH_ORDER.iter().all(|&facet| {
            let mut a = self.get(facet).to_vec();
            let mut b = other.get(facet).to_vec();
            a.sort();
            b.sort();
            a == b
        })
    }
}

/// The user's current facet selections plus the residual free-text search.
///
/// Selections are inclusive-OR within a facet and AND'd across facets by the
/// downstream catalog query. Updates replace the whole state atomically;
/// there is no shared in-place mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub selected: FacetSelections,
    pub search: String,
}

impl FilterState {
    /// Add `value` to the facet if absent, remove it if present. Only
    /// vocabulary members are ever admitted.
    pub fn toggle(&self, facet: Facet, value: &str, vocab: &Vocabularies) -> Result<Self> {
        let mut next = self.clone();
        let values = next.selected.get_mut(facet);
        if let Some(position) = values.iter().position(|v| v == value) {
            values.remove(position);
            return Ok(next);
        }
        if !vocab.contains(facet, value) {
            return Err(LookbookError::UnknownValue(format!("{facet}={value}")));
        }
        values.push(value.to_string());
        Ok(next)
    }

    /// Reset every selection and the residual search in one transition.
    #[must_use]
    pub fn clear_all(&self) -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.selected.is_empty() && self.search.is_empty()
    }

    /// Element-wise equality: order-insensitive per facet, exact on the
    /// residual search text.
    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        self.search == other.search && self.selected.equivalent(&other.selected)
    }

    /// Encode the state as backend query pairs: one comma-joined parameter
    /// per non-empty facet (pose labels translated back to backend form)
    /// plus the residual search. This is also the URL mirror shape.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for &facet in &Facet::MATCH_ORDER {
            let values = self.selected.get(facet);
            if values.is_empty() {
                continue;
            }
            let encoded = values
                .iter()
                .map(|value| {
                    if facet == Facet::Pose {
                        pose_labels::to_backend(value)
                    } else {
                        value.as_str()
                    }
                })
                .collect::<Vec<_>>()
                .join(",");
            pairs.push((facet.as_str().to_string(), encoded));
        }
        if !self.search.is_empty() {
            pairs.push(("search".to_string(), self.search.clone()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabularies {
        Vocabularies {
            lengths: vec!["Short".into(), "Medium".into(), "Long".into()],
            textures: vec!["Straight".into(), "Wavy".into(), "Curly".into()],
            face_shapes: vec!["Oval".into(), "Round".into()],
            style_types: vec!["Feminine".into(), "Masculine".into(), "Unisex".into()],
            poses: vec!["Facing".into(), "Side".into(), "Angled".into()],
            ethnicities: vec!["Asian".into()],
        }
    }

    #[test]
    fn toggle_twice_restores_original_state() {
        let v = vocab();
        let state = FilterState::default();
        let once = state.toggle(Facet::Length, "Short", &v).expect("toggle on");
        assert_eq!(once.selected.lengths, vec!["Short".to_string()]);
        let twice = once.toggle(Facet::Length, "Short", &v).expect("toggle off");
        assert_eq!(twice, state);
    }

    #[test]
    fn toggle_rejects_values_outside_the_vocabulary() {
        let v = vocab();
        let err = FilterState::default()
            .toggle(Facet::Length, "Bald", &v)
            .expect_err("must reject unknown value");
        assert_eq!(err.code(), "UNKNOWN_VALUE");
    }

    #[test]
    fn toggle_off_works_even_after_vocabulary_refresh_dropped_the_value() {
        let v = vocab();
        let state = FilterState::default()
            .toggle(Facet::Texture, "Wavy", &v)
            .expect("toggle on");
        let narrower = Vocabularies {
            textures: vec!["Straight".into()],
            ..vocab()
        };
        let cleared = state
            .toggle(Facet::Texture, "Wavy", &narrower)
            .expect("removal needs no membership");
        assert!(cleared.selected.textures.is_empty());
    }

    #[test]
    fn clear_all_is_idempotent() {
        let v = vocab();
        let state = FilterState::default()
            .toggle(Facet::Pose, "Side", &v)
            .expect("toggle");
        let cleared = state.clear_all();
        assert!(cleared.is_clear());
        assert_eq!(cleared.clear_all(), cleared);
    }

    #[test]
    fn equivalence_ignores_selection_order_but_not_search_text() {
        let a = FilterState {
            selected: FacetSelections {
                lengths: vec!["Short".into(), "Long".into()],
                ..FacetSelections::default()
            },
            search: "updo".into(),
        };
        let b = FilterState {
            selected: FacetSelections {
                lengths: vec!["Long".into(), "Short".into()],
                ..FacetSelections::default()
            },
            search: "updo".into(),
        };
        assert!(a.equivalent(&b));
        let c = FilterState {
            search: "Updo".into(),
            ..b
        };
        assert!(!a.equivalent(&c));
    }

    #[test]
    fn query_pairs_join_values_and_translate_pose_labels() {
        let v = vocab();
        let state = FilterState::default()
            .toggle(Facet::Length, "Short", &v)
            .and_then(|s| s.toggle(Facet::Length, "Medium", &v))
            .and_then(|s| s.toggle(Facet::Pose, "Facing", &v))
            .expect("toggles");
        let state = FilterState {
            search: "leftover text".into(),
            ..state
        };
        assert_eq!(
            state.to_query_pairs(),
            vec![
                ("length".to_string(), "Short,Medium".to_string()),
                ("pose".to_string(), "Straight-on".to_string()),
                ("search".to_string(), "leftover text".to_string()),
            ]
        );
    }
}

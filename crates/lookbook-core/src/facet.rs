use serde::{Deserialize, Serialize};

use crate::error::{LookbookError, Result};
use crate::pose_labels;
use crate::text::normalize_token;

/// One filterable attribute of a catalog item.
///
/// `MATCH_ORDER` is the priority order the per-token matcher walks: the
/// first facet producing a hit consumes the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Length,
    Texture,
    FaceShape,
    StyleType,
    Pose,
    Ethnicity,
}

impl Facet {
    pub const MATCH_ORDER: [Self; 6] = [
        Self::Length,
        Self::Texture,
        Self::FaceShape,
        Self::StyleType,
        Self::Pose,
        Self::Ethnicity,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Texture => "texture",
            Self::FaceShape => "face_shape",
            Self::StyleType => "style_type",
            Self::Pose => "pose",
            Self::Ethnicity => "ethnicity",
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "length" => Ok(Self::Length),
            "texture" => Ok(Self::Texture),
            "face_shape" => Ok(Self::FaceShape),
            "style_type" => Ok(Self::StyleType),
            "pose" => Ok(Self::Pose),
            "ethnicity" => Ok(Self::Ethnicity),
            other => Err(LookbookError::InvalidFacet(other.to_string())),
        }
    }
}

impl std::fmt::Display for Facet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Texture rows may carry this placeholder meaning "unspecified"; it is a
/// sentinel, not a selectable value, and is excluded from matching.
const TEXTURE_ANY_SENTINEL: &str = "any";

/// The closed sets of valid values per facet, in catalog insertion order.
///
/// Field names double as the `/api/filters` wire shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabularies {
    pub lengths: Vec<String>,
    pub textures: Vec<String>,
    pub face_shapes: Vec<String>,
    pub style_types: Vec<String>,
    pub poses: Vec<String>,
    pub ethnicities: Vec<String>,
}

impl Vocabularies {
    #[must_use]
    pub fn values(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Length => &self.lengths,
            Facet::Texture => &self.textures,
            Facet::FaceShape => &self.face_shapes,
            Facet::StyleType => &self.style_types,
            Facet::Pose => &self.poses,
            Facet::Ethnicity => &self.ethnicities,
        }
    }

    /// Values eligible for matching: everything except the texture `Any`
    /// sentinel.
    pub fn matchable_values(&self, facet: Facet) -> impl Iterator<Item = &str> {
        self.values(facet).iter().map(String::as_str).filter(
            move |value| facet != Facet::Texture || normalize_token(value) != TEXTURE_ANY_SENTINEL,
        )
    }

    /// Canonical vocabulary spelling for `candidate`, compared in normalized
    /// form. Returns `None` when the facet has no such value.
    #[must_use]
    pub fn canonical(&self, facet: Facet, candidate: &str) -> Option<&str> {
        let needle = normalize_token(candidate);
        if needle.is_empty() {
            return None;
        }
        self.matchable_values(facet)
            .find(|value| normalize_token(value) == needle)
    }

    /// Exact membership check, used to enforce the containment invariant on
    /// direct selections.
    #[must_use]
    pub fn contains(&self, facet: Facet, value: &str) -> bool {
        self.values(facet).iter().any(|v| v == value)
    }

    /// Translate pose labels from backend to display form. Applied once when
    /// a session snapshots its vocabularies.
    #[must_use]
    pub fn into_display(mut self) -> Self {
        for pose in &mut self.poses {
            *pose = pose_labels::to_display(pose).to_string();
        }
        self
    }
}

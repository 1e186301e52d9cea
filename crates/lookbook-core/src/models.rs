use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One catalog row, as stored and as served by the list/get endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hairstyle {
    pub id: String,
    pub name: String,
    pub category: String,
    pub length: String,
    pub texture: String,
    pub face_shapes: Vec<String>,
    pub style_type: String,
    pub pose: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ethnicity: Option<String>,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload; the store assigns id and timestamps.
#[derive(Debug, Clone, Deserialize)]
pub struct NewHairstyle {
    pub name: String,
    pub category: String,
    pub length: String,
    pub texture: String,
    #[serde(default)]
    pub face_shapes: Vec<String>,
    #[serde(default = "default_style_type")]
    pub style_type: String,
    #[serde(default = "default_pose")]
    pub pose: String,
    #[serde(default)]
    pub ethnicity: Option<String>,
    pub image_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_style_type() -> String {
    "Unisex".to_string()
}

fn default_pose() -> String {
    "Straight-on".to_string()
}

/// Decoded facet filters for a catalog listing. Values are backend labels;
/// selections within a facet are OR'd, facets are AND'd, and `search` runs
/// as a substring match over name/description/tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub lengths: Vec<String>,
    pub textures: Vec<String>,
    pub face_shapes: Vec<String>,
    pub style_types: Vec<String>,
    pub poses: Vec<String>,
    pub ethnicities: Vec<String>,
    pub search: Option<String>,
}

impl CatalogQuery {
    /// Build from comma-separated query parameters, the way the list
    /// endpoint and the URL mirror encode facet selections.
    #[must_use]
    pub fn from_query_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut query = Self::default();
        for (key, raw) in pairs {
            match key {
                "length" => query.lengths = split_csv(raw),
                "texture" => query.textures = split_csv(raw),
                "face_shape" => query.face_shapes = split_csv(raw),
                "style_type" => query.style_types = split_csv(raw),
                "pose" => query.poses = split_csv(raw),
                "ethnicity" => query.ethnicities = split_csv(raw),
                "search" => {
                    let trimmed = raw.trim();
                    if !trimmed.is_empty() {
                        query.search = Some(trimmed.to_string());
                    }
                }
                _ => {}
            }
        }
        query
    }

    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.lengths.is_empty()
            && self.textures.is_empty()
            && self.face_shapes.is_empty()
            && self.style_types.is_empty()
            && self.poses.is_empty()
            && self.ethnicities.is_empty()
            && self.search.is_none()
    }
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToString::to_string)
        .collect()
}

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use uuid::Uuid;

use crate::error::{LookbookError, Result};
use crate::facet::Vocabularies;
use crate::models::{CatalogQuery, Hairstyle, NewHairstyle};

/// SQLite-backed catalog: hairstyle rows, per-facet distinct values, and
/// per-user favorites.
#[derive(Clone)]
pub struct CatalogStore {
    conn: Arc<Mutex<Connection>>,
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore").finish_non_exhaustive()
    }
}

impl CatalogStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.migrate()?;
        Ok(store)
    }

    pub fn migrate(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute_batch(
                r#"
                PRAGMA journal_mode = WAL;
                PRAGMA foreign_keys = ON;

                CREATE TABLE IF NOT EXISTS hairstyles (
                    id TEXT PRIMARY KEY,
                    name TEXT NOT NULL,
                    category TEXT NOT NULL,
                    length TEXT NOT NULL,
                    texture TEXT NOT NULL,
                    face_shapes TEXT NOT NULL,
                    style_type TEXT NOT NULL DEFAULT 'Unisex',
                    pose TEXT NOT NULL DEFAULT 'Straight-on',
                    ethnicity TEXT,
                    image_url TEXT NOT NULL,
                    description TEXT,
                    tags TEXT NOT NULL DEFAULT '[]',
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_hairstyles_length ON hairstyles(length);
                CREATE INDEX IF NOT EXISTS idx_hairstyles_texture ON hairstyles(texture);
                CREATE INDEX IF NOT EXISTS idx_hairstyles_style_type ON hairstyles(style_type);
                CREATE INDEX IF NOT EXISTS idx_hairstyles_pose ON hairstyles(pose);
                CREATE INDEX IF NOT EXISTS idx_hairstyles_ethnicity ON hairstyles(ethnicity);

                CREATE TABLE IF NOT EXISTS users (
                    id TEXT PRIMARY KEY,
                    created_at TEXT NOT NULL,
                    last_active TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS user_favorites (
                    user_id TEXT NOT NULL,
                    hairstyle_id TEXT NOT NULL,
                    created_at TEXT NOT NULL,
                    PRIMARY KEY (user_id, hairstyle_id),
                    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
                    FOREIGN KEY (hairstyle_id) REFERENCES hairstyles(id) ON DELETE CASCADE
                );

                CREATE INDEX IF NOT EXISTS idx_user_favorites_user
                ON user_favorites(user_id);
                CREATE INDEX IF NOT EXISTS idx_user_favorites_hairstyle
                ON user_favorites(hairstyle_id);
                "#,
            )?;
            Ok(())
        })
    }

    pub fn insert(&self, new: &NewHairstyle) -> Result<Hairstyle> {
        let now = Utc::now();
        let row = Hairstyle {
            id: Uuid::new_v4().to_string(),
            name: new.name.clone(),
            category: new.category.clone(),
            length: new.length.clone(),
            texture: new.texture.clone(),
            face_shapes: new.face_shapes.clone(),
            style_type: new.style_type.clone(),
            pose: new.pose.clone(),
            ethnicity: new.ethnicity.clone(),
            image_url: new.image_url.clone(),
            description: new.description.clone(),
            tags: new.tags.clone(),
            created_at: now,
            updated_at: now,
        };
        let face_shapes = serde_json::to_string(&row.face_shapes)?;
        let tags = serde_json::to_string(&row.tags)?;
        self.with_conn(|conn| {
            conn.execute(
                r"
                INSERT INTO hairstyles(
                    id, name, category, length, texture, face_shapes, style_type,
                    pose, ethnicity, image_url, description, tags, created_at, updated_at
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
                ",
                params![
                    row.id,
                    row.name,
                    row.category,
                    row.length,
                    row.texture,
                    face_shapes,
                    row.style_type,
                    row.pose,
                    row.ethnicity,
                    row.image_url,
                    row.description,
                    tags,
                    row.created_at.to_rfc3339(),
                    row.updated_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })?;
        Ok(row)
    }

    pub fn count(&self) -> Result<usize> {
        self.with_conn(|conn| {
            let count =
                conn.query_row("SELECT COUNT(*) FROM hairstyles", [], |row| {
                    row.get::<_, i64>(0)
                })?;
            Ok(usize::try_from(count).unwrap_or(0))
        })
    }

    /// Insert the bundled sample styles when the table is empty. Returns the
    /// number of rows inserted.
    pub fn seed_sample_data(&self) -> Result<usize> {
        if self.count()? > 0 {
            return Ok(0);
        }
        let samples = sample_styles();
        for style in &samples {
            self.insert(style)?;
        }
        Ok(samples.len())
    }

    pub fn get(&self, id: &str) -> Result<Option<Hairstyle>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    &format!("SELECT {HAIRSTYLE_COLUMNS} FROM hairstyles WHERE id = ?1"),
                    params![id],
                    decode_hairstyle_row,
                )
                .optional()?;
            Ok(row)
        })
    }

    /// Filtered listing: `IN (...)` per multi-value facet, a JSON-substring
    /// match for face shapes, and a substring search over
    /// name/description/tags. Newest rows first.
    pub fn list(&self, query: &CatalogQuery) -> Result<Vec<Hairstyle>> {
        let mut sql = format!("SELECT {HAIRSTYLE_COLUMNS} FROM hairstyles WHERE 1=1");
        let mut args: Vec<Value> = Vec::new();

        push_in_clause(&mut sql, &mut args, "length", &query.lengths);
        push_in_clause(&mut sql, &mut args, "texture", &query.textures);
        push_in_clause(&mut sql, &mut args, "style_type", &query.style_types);
        push_in_clause(&mut sql, &mut args, "pose", &query.poses);
        push_in_clause(&mut sql, &mut args, "ethnicity", &query.ethnicities);

        if !query.face_shapes.is_empty() {
            let ors = query
                .face_shapes
                .iter()
                .map(|_| "face_shapes LIKE ?")
                .collect::<Vec<_>>()
                .join(" OR ");
            sql.push_str(&format!(" AND ({ors})"));
            for shape in &query.face_shapes {
                args.push(Value::Text(format!("%\"{shape}\"%")));
            }
        }

        if let Some(search) = query.search.as_deref() {
            sql.push_str(" AND (name LIKE ? OR description LIKE ? OR tags LIKE ?)");
            let needle = format!("%{search}%");
            args.push(Value::Text(needle.clone()));
            args.push(Value::Text(needle.clone()));
            args.push(Value::Text(needle));
        }

        sql.push_str(" ORDER BY created_at DESC");

        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(args), decode_hairstyle_row)?;
            let mut out = Vec::new();
            for row in rows {
                out.push(row?);
            }
            Ok(out)
        })
    }

    /// Distinct values per facet, in the catalog's listing order.
    pub fn vocabularies(&self) -> Result<Vocabularies> {
        self.with_conn(|conn| {
            let lengths = distinct_column(conn, "length")?;
            let textures = distinct_column(conn, "texture")?;
            let style_types = distinct_column(conn, "style_type")?;
            let poses = distinct_column(conn, "pose")?;

            let ethnicities = {
                let mut stmt = conn.prepare(
                    "SELECT DISTINCT ethnicity FROM hairstyles
                     WHERE ethnicity IS NOT NULL ORDER BY ethnicity",
                )?;
                let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
                let mut out = Vec::new();
                for row in rows {
                    out.push(row?);
                }
                out
            };

            // Face shapes live inside JSON arrays; collect and sort the union.
            let face_shapes = {
                let mut stmt = conn.prepare("SELECT face_shapes FROM hairstyles")?;
                let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
                let mut set = BTreeSet::new();
                for row in rows {
                    let shapes: Vec<String> = serde_json::from_str(&row?)
                        .map_err(|err| LookbookError::Internal(format!(
                            "corrupt face_shapes column: {err}"
                        )))?;
                    set.extend(shapes);
                }
                set.into_iter().collect()
            };

            Ok(Vocabularies {
                lengths,
                textures,
                face_shapes,
                style_types,
                poses,
                ethnicities,
            })
        })
    }

    /// Record the user if unseen and refresh their last-active timestamp.
    pub fn touch_user(&self, user_id: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        self.with_conn(|conn| {
            conn.execute(
                r"
                INSERT INTO users(id, created_at, last_active)
                VALUES (?1, ?2, ?2)
                ON CONFLICT(id) DO UPDATE SET last_active = excluded.last_active
                ",
                params![user_id, now],
            )?;
            Ok(())
        })
    }

    /// Add a favorite. Returns false when it was already present.
    pub fn add_favorite(&self, user_id: &str, hairstyle_id: &str) -> Result<bool> {
        if self.get(hairstyle_id)?.is_none() {
            return Err(LookbookError::NotFound(hairstyle_id.to_string()));
        }
        self.touch_user(user_id)?;
        let now = Utc::now().to_rfc3339();
        self.with_conn(|conn| {
            let inserted = conn.execute(
                r"
                INSERT OR IGNORE INTO user_favorites(user_id, hairstyle_id, created_at)
                VALUES (?1, ?2, ?3)
                ",
                params![user_id, hairstyle_id, now],
            )?;
            Ok(inserted > 0)
        })
    }

    /// Remove a favorite. Returns false when it was not present.
    pub fn remove_favorite(&self, user_id: &str, hairstyle_id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let removed = conn.execute(
                "DELETE FROM user_favorites WHERE user_id = ?1 AND hairstyle_id = ?2",
                params![user_id, hairstyle_id],
            )?;
            Ok(removed > 0)
        })
    }

    pub fn is_favorite(&self, user_id: &str, hairstyle_id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let hit = conn
                .query_row(
                    "SELECT 1 FROM user_favorites WHERE user_id = ?1 AND hairstyle_id = ?2",
                    params![user_id, hairstyle_id],
                    |_| Ok(()),
                )
                .optional()?;
            Ok(hit.is_some())
        })
    }

    /// The user's favorited rows, most recently favorited first.
    pub fn list_favorites(&self, user_id: &str) -> Result<Vec<Hairstyle>> {
        self.with_conn(|conn| {
            let sql = format!(
                r"
                SELECT {PREFIXED_HAIRSTYLE_COLUMNS}
                FROM hairstyles h
                JOIN user_favorites uf ON h.id = uf.hairstyle_id
                WHERE uf.user_id = ?1
                ORDER BY uf.created_at DESC
                "
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![user_id], decode_hairstyle_row)?;
            let mut out = Vec::new();
            for row in rows {
                out.push(row?);
            }
            Ok(out)
        })
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| LookbookError::Internal("sqlite mutex poisoned".to_string()))?;
        f(&conn)
    }
}

const HAIRSTYLE_COLUMNS: &str = "id, name, category, length, texture, face_shapes, style_type, \
     pose, ethnicity, image_url, description, tags, created_at, updated_at";

const PREFIXED_HAIRSTYLE_COLUMNS: &str =
    "h.id, h.name, h.category, h.length, h.texture, h.face_shapes, h.style_type, \
     h.pose, h.ethnicity, h.image_url, h.description, h.tags, h.created_at, h.updated_at";

fn push_in_clause(sql: &mut String, args: &mut Vec<Value>, column: &str, values: &[String]) {
    if values.is_empty() {
        return;
    }
    let placeholders = values.iter().map(|_| "?").collect::<Vec<_>>().join(",");
    sql.push_str(&format!(" AND {column} IN ({placeholders})"));
    for value in values {
        args.push(Value::Text(value.clone()));
    }
}

fn distinct_column(conn: &Connection, column: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT DISTINCT {column} FROM hairstyles ORDER BY {column}"
    ))?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

fn decode_hairstyle_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Hairstyle> {
    Ok(Hairstyle {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        length: row.get(3)?,
        texture: row.get(4)?,
        face_shapes: parse_json_array(5, &row.get::<_, String>(5)?)?,
        style_type: row.get(6)?,
        pose: row.get(7)?,
        ethnicity: row.get(8)?,
        image_url: row.get(9)?,
        description: row.get(10)?,
        tags: parse_json_array(11, &row.get::<_, String>(11)?)?,
        created_at: parse_rfc3339(12, &row.get::<_, String>(12)?)?,
        updated_at: parse_rfc3339(13, &row.get::<_, String>(13)?)?,
    })
}

fn parse_json_array(index: usize, raw: &str) -> rusqlite::Result<Vec<String>> {
    serde_json::from_str(raw)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(err)))
}

fn parse_rfc3339(index: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(err)))
}

macro_rules! style {
    ($name:literal, $cat:literal, $len:literal, $tex:literal, [$($shape:literal),*],
     $style:literal, $pose:literal, $eth:literal, $url:literal, $desc:literal,
     [$($tag:literal),*]) => {
        NewHairstyle {
            name: $name.to_string(),
            category: $cat.to_string(),
            length: $len.to_string(),
            texture: $tex.to_string(),
            face_shapes: vec![$($shape.to_string()),*],
            style_type: $style.to_string(),
            pose: $pose.to_string(),
            ethnicity: Some($eth.to_string()),
            image_url: $url.to_string(),
            description: Some($desc.to_string()),
            tags: vec![$($tag.to_string()),*],
        }
    };
}

fn sample_styles() -> Vec<NewHairstyle> {
    vec![
        style!("Classic Bob", "Short", "Short", "Straight", ["Oval", "Square"],
            "Feminine", "Straight-on", "Caucasian",
            "https://images.unsplash.com/photo-1494790108755-2616c96d5e55?w=400&h=500&fit=crop",
            "A timeless short cut that hits just below the chin",
            ["classic", "professional", "low-maintenance"]),
        style!("Beach Waves", "Medium", "Medium", "Wavy", ["Oval", "Heart", "Round"],
            "Feminine", "Angled", "Caucasian",
            "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=400&h=500&fit=crop",
            "Effortless wavy style perfect for a casual look",
            ["casual", "beachy", "textured"]),
        style!("Long Layers", "Long", "Long", "Straight", ["Oval", "Long"],
            "Feminine", "Side", "Asian",
            "https://images.unsplash.com/photo-1544005313-94ddf0286df2?w=400&h=500&fit=crop",
            "Flowing layers that add movement and dimension",
            ["layered", "voluminous", "elegant"]),
        style!("Pixie Cut", "Short", "Short", "Straight", ["Oval", "Heart"],
            "Unisex", "Straight-on", "Caucasian",
            "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=400&h=500&fit=crop",
            "Bold and edgy short cut that's easy to maintain",
            ["edgy", "bold", "low-maintenance"]),
        style!("Curly Shag", "Medium", "Medium", "Curly", ["Oval", "Round"],
            "Feminine", "Angled", "Afro",
            "https://images.unsplash.com/photo-1616683693504-3ea7e9ad6fec?w=400&h=500&fit=crop",
            "Textured layers that enhance natural curls",
            ["curly", "textured", "bohemian"]),
        style!("Blunt Lob", "Medium", "Medium", "Straight", ["Oval", "Square"],
            "Feminine", "Straight-on", "Caucasian",
            "https://images.unsplash.com/photo-1529626455594-4ff0802cfb7e?w=400&h=500&fit=crop",
            "A sleek long bob with clean, straight lines",
            ["sleek", "modern", "sophisticated"]),
        style!("Braided Crown", "Long", "Long", "Any", ["Oval", "Heart", "Round"],
            "Feminine", "Angled", "Afro",
            "https://images.unsplash.com/photo-1508214751196-bcfd4ca60f91?w=400&h=500&fit=crop",
            "Elegant braided style perfect for special occasions",
            ["braided", "elegant", "formal"]),
        style!("Asymmetrical Bob", "Short", "Short", "Straight", ["Oval", "Square"],
            "Feminine", "Side", "Asian",
            "https://images.unsplash.com/photo-1531123897727-8f129e1688ce?w=400&h=500&fit=crop",
            "Modern bob with one side longer than the other",
            ["asymmetrical", "modern", "trendy"]),
        style!("Sleek Straight", "Long", "Long", "Straight", ["Oval", "Heart"],
            "Feminine", "Straight-on", "Asian",
            "https://images.unsplash.com/photo-1524504388940-b1c1722653e1?w=400&h=500&fit=crop",
            "Ultra-smooth straight hair with a glossy finish",
            ["sleek", "glossy", "elegant"]),
        style!("Textured Crop", "Short", "Short", "Textured", ["Round", "Square"],
            "Masculine", "Angled", "Caucasian",
            "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=400&h=500&fit=crop",
            "Modern textured crop with defined layers",
            ["textured", "modern", "edgy"]),
        style!("Voluminous Curls", "Medium", "Medium", "Curly", ["Oval", "Long"],
            "Masculine", "Straight-on", "Afro",
            "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=400&h=500&fit=crop",
            "Full, bouncy curls with natural volume",
            ["voluminous", "curly", "natural"]),
        style!("Side Swept Bangs", "Medium", "Medium", "Straight", ["Heart", "Long"],
            "Feminine", "Side", "Caucasian",
            "https://images.unsplash.com/photo-1534528741775-53994a69daeb?w=400&h=500&fit=crop",
            "Elegant side-swept bangs with shoulder-length hair",
            ["bangs", "elegant", "sophisticated"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_store() -> (tempfile::TempDir, CatalogStore) {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = CatalogStore::open(temp.path().join("lookbook.db")).expect("open");
        let inserted = store.seed_sample_data().expect("seed");
        assert_eq!(inserted, 12);
        (temp, store)
    }

    #[test]
    fn seeding_is_a_noop_once_populated() {
        let (_temp, store) = seeded_store();
        assert_eq!(store.seed_sample_data().expect("reseed"), 0);
        assert_eq!(store.count().expect("count"), 12);
    }

    #[test]
    fn unfiltered_list_returns_every_row() {
        let (_temp, store) = seeded_store();
        let rows = store.list(&CatalogQuery::default()).expect("list");
        assert_eq!(rows.len(), 12);
    }

    #[test]
    fn facet_filters_are_or_within_and_across() {
        let (_temp, store) = seeded_store();
        let query = CatalogQuery {
            lengths: vec!["Short".into(), "Medium".into()],
            textures: vec!["Straight".into()],
            ..CatalogQuery::default()
        };
        let rows = store.list(&query).expect("list");
        assert!(!rows.is_empty());
        for row in &rows {
            assert!(row.length == "Short" || row.length == "Medium");
            assert_eq!(row.texture, "Straight");
        }
    }

    #[test]
    fn face_shape_filter_matches_inside_json_arrays() {
        let (_temp, store) = seeded_store();
        let query = CatalogQuery {
            face_shapes: vec!["Heart".into()],
            ..CatalogQuery::default()
        };
        let rows = store.list(&query).expect("list");
        assert!(!rows.is_empty());
        for row in &rows {
            assert!(row.face_shapes.iter().any(|s| s == "Heart"));
        }
    }

    #[test]
    fn residual_search_scans_name_description_and_tags() {
        let (_temp, store) = seeded_store();
        let query = CatalogQuery {
            search: Some("bohemian".into()),
            ..CatalogQuery::default()
        };
        let rows = store.list(&query).expect("list");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Curly Shag");
    }

    #[test]
    fn get_returns_none_for_unknown_id() {
        let (_temp, store) = seeded_store();
        assert!(store.get("no-such-id").expect("get").is_none());
    }

    #[test]
    fn vocabularies_list_distinct_values_per_facet() {
        let (_temp, store) = seeded_store();
        let vocab = store.vocabularies().expect("vocab");
        assert_eq!(vocab.lengths, vec!["Long", "Medium", "Short"]);
        assert!(vocab.textures.contains(&"Any".to_string()));
        assert!(vocab.poses.contains(&"Straight-on".to_string()));
        assert_eq!(
            vocab.face_shapes,
            vec!["Heart", "Long", "Oval", "Round", "Square"]
        );
        assert_eq!(vocab.ethnicities, vec!["Afro", "Asian", "Caucasian"]);
    }

    #[test]
    fn favorites_round_trip() {
        let (_temp, store) = seeded_store();
        let id = store.list(&CatalogQuery::default()).expect("list")[0]
            .id
            .clone();

        assert!(store.add_favorite("user-1", &id).expect("add"));
        assert!(!store.add_favorite("user-1", &id).expect("re-add is no-op"));
        assert!(store.is_favorite("user-1", &id).expect("check"));

        let favorites = store.list_favorites("user-1").expect("favorites");
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, id);

        assert!(store.remove_favorite("user-1", &id).expect("remove"));
        assert!(!store.remove_favorite("user-1", &id).expect("re-remove"));
        assert!(!store.is_favorite("user-1", &id).expect("gone"));
    }

    #[test]
    fn favoriting_an_unknown_hairstyle_is_rejected() {
        let (_temp, store) = seeded_store();
        let err = store
            .add_favorite("user-1", "no-such-id")
            .expect_err("must reject");
        assert_eq!(err.code(), "NOT_FOUND");
    }
}

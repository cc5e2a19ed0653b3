//! Map features (OSM nodes) and their JSON file format
//!
//! A feature file looks like:
//!
//! ```json
//! {
//!     "version": 1,
//!     "metadata": { "name": "Old town", "source": "overpass export" },
//!     "nodes": [
//!         { "id": 101, "position": [10.0, 20.0], "tags": { "shop": "bakery" } }
//!     ]
//! }
//! ```

use std::fs;
use std::path::Path;

use ahash::AHashMap;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::{ActorError, Result};
use crate::core::types::{Coord, Point};

pub const FEATURE_FILE_VERSION: u32 = 1;

/// A tagged point feature on the map
#[derive(Debug, Clone)]
pub struct OsmNode {
    pub id: i64,
    pub coordinate: Coord,
    pub tags: AHashMap<String, String>,
}

impl OsmNode {
    pub fn new(id: i64, x: f64, y: f64) -> Self {
        Self {
            id,
            coordinate: Coord { x, y },
            tags: AHashMap::new(),
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn has_tag(&self, key: &str) -> bool {
        self.tags.contains_key(key)
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn point(&self) -> Point {
        Point::from(self.coordinate)
    }
}

/// Root structure for feature JSON files
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeatureFile {
    pub version: u32,
    #[serde(default)]
    pub metadata: Option<FeatureMetadata>,
    pub nodes: Vec<FeatureJson>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeatureMetadata {
    #[serde(default)]
    pub name: Option<String>,
    /// Tool or export that produced the file
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeatureJson {
    pub id: i64,
    /// Map position [x, y]
    pub position: [f64; 2],
    #[serde(default)]
    pub tags: AHashMap<String, String>,
}

impl FeatureFile {
    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: FeatureFile = serde_json::from_str(content)?;
        if file.version != FEATURE_FILE_VERSION {
            return Err(ActorError::InvalidConfig(format!(
                "unsupported feature file version {} (expected {})",
                file.version, FEATURE_FILE_VERSION
            )));
        }
        Ok(file)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn into_nodes(self) -> Vec<OsmNode> {
        self.nodes
            .into_iter()
            .map(|node| OsmNode {
                id: node.id,
                coordinate: Coord {
                    x: node.position[0],
                    y: node.position[1],
                },
                tags: node.tags,
            })
            .collect()
    }
}

/// Scatter `count` nodes over a square of side `extent`, each tagged with one
/// of `keys` chosen uniformly. `extent` must be positive and finite.
pub fn generate_synthetic_nodes<R: Rng + ?Sized>(
    count: usize,
    extent: f64,
    keys: &[String],
    rng: &mut R,
) -> Result<Vec<OsmNode>> {
    if !extent.is_finite() || extent <= 0.0 {
        return Err(ActorError::InvalidConfig(format!(
            "synthetic map extent must be a positive finite number, got {}",
            extent
        )));
    }
    if keys.is_empty() {
        return Ok(Vec::new());
    }

    Ok((0..count)
        .map(|i| {
            let x = rng.gen_range(0.0..extent);
            let y = rng.gen_range(0.0..extent);
            let key = &keys[rng.gen_range(0..keys.len())];
            OsmNode::new(i as i64, x, y).with_tag(key.clone(), "yes")
        })
        .collect())
}

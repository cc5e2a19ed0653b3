//! Population configuration
//!
//! Everything the initializer used to hard-code lives here: how many actors
//! to create, which tag keys partition the map features, where homes and jobs
//! are drawn from, the canonical split shift and how needs are seeded.

use std::fs;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::{ActorError, Result};
use crate::core::time::TimeInterval;
use crate::entity::needs::NeedsState;

/// Inclusive range for randomized scalar draws
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Finite bounds, ordered, and a width that does not overflow
    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min <= self.max
            && (self.max - self.min).is_finite()
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.min >= self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Per-attribute ranges for randomized needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeedsRanges {
    pub health: ValueRange,
    pub satiety: ValueRange,
    pub mood: ValueRange,
    pub stamina: ValueRange,
    pub money: ValueRange,
    pub speed: ValueRange,
}

impl Default for NeedsRanges {
    fn default() -> Self {
        Self {
            health: ValueRange::new(50.0, 100.0),
            satiety: ValueRange::new(50.0, 100.0),
            mood: ValueRange::new(50.0, 100.0),
            stamina: ValueRange::new(50.0, 100.0),
            money: ValueRange::new(1000.0, 10000.0),
            speed: ValueRange::new(2.0, 4.0),
        }
    }
}

impl NeedsRanges {
    fn named(&self) -> [(&'static str, &ValueRange); 6] {
        [
            ("health", &self.health),
            ("satiety", &self.satiety),
            ("mood", &self.mood),
            ("stamina", &self.stamina),
            ("money", &self.money),
            ("speed", &self.speed),
        ]
    }
}

/// How each actor's `NeedsState` is seeded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum NeedsPolicy {
    /// Every attribute drawn uniformly from its range
    Randomized(NeedsRanges),
    /// Every actor receives a copy of the same prototype
    Fixed(NeedsState),
}

impl Default for NeedsPolicy {
    fn default() -> Self {
        NeedsPolicy::Randomized(NeedsRanges::default())
    }
}

impl NeedsPolicy {
    pub fn canonical() -> Self {
        NeedsPolicy::Fixed(NeedsState::canonical())
    }
}

/// Where job locations are drawn from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobPool {
    /// Union of every configured category
    AllCategories,
    /// A single named category
    Category(String),
}

impl Default for JobPool {
    fn default() -> Self {
        JobPool::AllCategories
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Number of actors created by the initializer
    pub actor_count: usize,

    /// Tag keys used to partition map features, in favorite-place order
    pub categories: Vec<String>,

    /// Category homes are drawn from
    pub home_category: String,

    pub job_pool: JobPool,

    /// Radius (map units) of the disc around home that actors spawn in
    pub spawn_radius: f64,

    /// Tag value recorded on every favorite place
    pub favorite_tag_value: String,

    /// Split shift appended to every job, in order
    pub shifts: Vec<TimeInterval>,

    pub needs: NeedsPolicy,

    /// Seed for reproducible populations; `None` uses OS entropy
    pub seed: Option<u64>,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            actor_count: 10,
            categories: vec!["building".into(), "shop".into(), "amenity".into()],
            home_category: "building".into(),
            job_pool: JobPool::AllCategories,
            spawn_radius: 1000.0,
            favorite_tag_value: "value".into(),
            shifts: default_shifts(),
            needs: NeedsPolicy::default(),
            seed: None,
        }
    }
}

const MORNING_SHIFT: TimeInterval = TimeInterval::literal(10, 30, 13, 0);
const AFTERNOON_SHIFT: TimeInterval = TimeInterval::literal(15, 30, 18, 0);

/// The canonical 10:30-13:00 / 15:30-18:00 split shift
pub fn default_shifts() -> Vec<TimeInterval> {
    vec![MORNING_SHIFT, AFTERNOON_SHIFT]
}

impl PopulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: PopulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(ActorError::InvalidConfig(
                "at least one feature category is required".into(),
            ));
        }

        if !self.categories.contains(&self.home_category) {
            return Err(ActorError::InvalidConfig(format!(
                "home_category '{}' is not one of the configured categories",
                self.home_category
            )));
        }

        if let JobPool::Category(name) = &self.job_pool {
            if !self.categories.contains(name) {
                return Err(ActorError::InvalidConfig(format!(
                    "job pool category '{}' is not one of the configured categories",
                    name
                )));
            }
        }

        if !self.spawn_radius.is_finite() || self.spawn_radius < 0.0 {
            return Err(ActorError::InvalidConfig(format!(
                "spawn_radius must be a non-negative number, got {}",
                self.spawn_radius
            )));
        }

        if let NeedsPolicy::Randomized(ranges) = &self.needs {
            for (name, range) in ranges.named() {
                if !range.is_valid() {
                    return Err(ActorError::InvalidConfig(format!(
                        "needs range '{}' has min {} > max {}",
                        name, range.min, range.max
                    )));
                }
            }
        }

        for (i, a) in self.shifts.iter().enumerate() {
            for b in &self.shifts[i + 1..] {
                if a.overlaps(b) {
                    return Err(ActorError::OverlappingShift {
                        existing: *a,
                        new: *b,
                    });
                }
            }
        }

        Ok(())
    }
}

//! Procedural population from categorized map features
//!
//! Split in two steps so tests can pin either side:
//! - [`PopulationSampler`] makes every random choice and returns an [`ActorDraft`]
//! - [`assemble_actor`] turns a draft into an [`Actor`] deterministically

use std::f64::consts::TAU;

use ahash::AHashSet;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::config::{JobPool, NeedsPolicy, PopulationConfig};
use crate::core::error::{ActorError, Result};
use crate::core::types::{ActorId, Coord, Point};
use crate::entity::actor::Actor;
use crate::entity::job::JobState;
use crate::entity::needs::NeedsState;
use crate::entity::place::PlaceState;
use crate::world::features::OsmNode;
use crate::world::objects::ActorRegistry;

/// Feature coordinates sharing a tag key
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCategory {
    pub key: String,
    pub points: Vec<Point>,
}

/// Named categories in a fixed order (the favorite-place order)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCategories {
    categories: Vec<FeatureCategory>,
}

impl FeatureCategories {
    /// Group nodes by tag presence; a node carrying several keys joins each
    pub fn partition(nodes: &[OsmNode], keys: &[String]) -> Self {
        let unmatched = nodes
            .iter()
            .filter(|node| !keys.iter().any(|key| node.has_tag(key)))
            .count();
        if unmatched > 0 {
            tracing::warn!(
                "{} of {} features carry none of the tags {:?} and will not be sampled",
                unmatched,
                nodes.len(),
                keys
            );
        }

        let categories = keys
            .iter()
            .map(|key| FeatureCategory {
                key: key.clone(),
                points: nodes
                    .iter()
                    .filter(|node| node.has_tag(key))
                    .map(OsmNode::point)
                    .collect(),
            })
            .collect();

        Self { categories }
    }

    /// Build directly from fixtures
    pub fn from_points<K: Into<String>>(categories: impl IntoIterator<Item = (K, Vec<Point>)>) -> Self {
        Self {
            categories: categories
                .into_iter()
                .map(|(key, points)| FeatureCategory {
                    key: key.into(),
                    points,
                })
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&[Point]> {
        self.categories
            .iter()
            .find(|category| category.key == key)
            .map(|category| category.points.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureCategory> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Reject the first category with nothing to sample
    pub fn require_non_empty(&self) -> Result<()> {
        match self.categories.iter().find(|c| c.points.is_empty()) {
            Some(empty) => Err(ActorError::EmptyCategory(empty.key.clone())),
            None => Ok(()),
        }
    }

    /// Candidate job locations for the configured pool
    ///
    /// The union over all categories lists each distinct location once, so a
    /// feature tagged with several keys is not drawn more often than others.
    pub fn job_pool(&self, pool: &JobPool) -> Result<Vec<Point>> {
        let points: Vec<Point> = match pool {
            JobPool::AllCategories => {
                let mut seen = AHashSet::new();
                self.categories
                    .iter()
                    .flat_map(|category| category.points.iter().copied())
                    .filter(|point| seen.insert((point.x().to_bits(), point.y().to_bits())))
                    .collect()
            }
            JobPool::Category(key) => self
                .get(key)
                .ok_or_else(|| ActorError::UnknownCategory(key.clone()))?
                .to_vec(),
        };

        if points.is_empty() {
            let name = match pool {
                JobPool::AllCategories => "<all>".to_string(),
                JobPool::Category(key) => key.clone(),
            };
            return Err(ActorError::EmptyCategory(name));
        }
        Ok(points)
    }
}

/// Every random choice needed to build one actor
#[derive(Debug, Clone, PartialEq)]
pub struct ActorDraft {
    pub home: Point,
    pub job: Point,
    /// Spawn displacement from home
    pub spawn_offset: Coord,
    pub needs: NeedsState,
    /// One (category key, location) per category, in category order
    pub favorites: Vec<(String, Point)>,
}

/// Draws actor drafts from validated, non-empty categories
pub struct PopulationSampler<'a, R: Rng + ?Sized> {
    categories: &'a FeatureCategories,
    config: &'a PopulationConfig,
    homes: &'a [Point],
    jobs: Vec<Point>,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> PopulationSampler<'a, R> {
    pub fn new(
        categories: &'a FeatureCategories,
        config: &'a PopulationConfig,
        rng: &'a mut R,
    ) -> Result<Self> {
        config.validate()?;
        categories.require_non_empty()?;

        let homes = categories
            .get(&config.home_category)
            .ok_or_else(|| ActorError::UnknownCategory(config.home_category.clone()))?;
        let jobs = categories.job_pool(&config.job_pool)?;

        Ok(Self {
            categories,
            config,
            homes,
            jobs,
            rng,
        })
    }

    pub fn draw(&mut self) -> Result<ActorDraft> {
        let home = pick(self.homes, &self.config.home_category, self.rng)?;
        let job = pick(&self.jobs, "job pool", self.rng)?;
        let spawn_offset = disc_offset(self.config.spawn_radius, self.rng);

        let needs = match &self.config.needs {
            NeedsPolicy::Randomized(ranges) => NeedsState::sample(ranges, self.rng),
            NeedsPolicy::Fixed(prototype) => *prototype,
        };

        let categories = self.categories;
        let mut favorites = Vec::with_capacity(categories.len());
        for category in categories.iter() {
            let point = pick(&category.points, &category.key, self.rng)?;
            favorites.push((category.key.clone(), point));
        }

        Ok(ActorDraft {
            home,
            job,
            spawn_offset,
            needs,
            favorites,
        })
    }
}

fn pick<R: Rng + ?Sized>(points: &[Point], category: &str, rng: &mut R) -> Result<Point> {
    points
        .choose(rng)
        .copied()
        .ok_or_else(|| ActorError::EmptyCategory(category.to_string()))
}

/// Uniform point inside a disc of `radius`; zero radius means no offset
fn disc_offset<R: Rng + ?Sized>(radius: f64, rng: &mut R) -> Coord {
    if radius <= 0.0 {
        return Coord { x: 0.0, y: 0.0 };
    }
    let angle = rng.gen_range(0.0..TAU);
    let distance = radius * rng.gen::<f64>().sqrt();
    Coord {
        x: distance * angle.cos(),
        y: distance * angle.sin(),
    }
}

/// Build an actor from a draft; no randomness involved
pub fn assemble_actor(draft: &ActorDraft, config: &PopulationConfig) -> Result<Actor> {
    let position = Point::from(draft.home.0 + draft.spawn_offset);
    let mut actor = Actor::at(position);

    let job = JobState::with_shifts(draft.job, &config.shifts)?;

    let mut places = PlaceState::new(draft.home);
    for (key, point) in &draft.favorites {
        places.add_tagged(point.0, key.clone(), config.favorite_tag_value.clone());
    }

    actor.add_state(&draft.needs);
    actor.add_state(&job);
    actor.add_state(&places);
    Ok(actor)
}

/// Create `config.actor_count` actors and register them
pub fn populate<W, R>(
    registry: &mut W,
    categories: &FeatureCategories,
    config: &PopulationConfig,
    rng: &mut R,
) -> Result<Vec<ActorId>>
where
    W: ActorRegistry + ?Sized,
    R: Rng + ?Sized,
{
    let mut sampler = PopulationSampler::new(categories, config, rng)?;
    let mut ids = Vec::with_capacity(config.actor_count);

    for i in 0..config.actor_count {
        let draft = sampler.draw()?;
        let actor = assemble_actor(&draft, config)?;

        tracing::info!(
            "Actor {}: home at ({:.1}, {:.1}), spawned at ({:.1}, {:.1}), job at ({:.1}, {:.1})",
            i + 1,
            draft.home.x(),
            draft.home.y(),
            actor.position.x(),
            actor.position.y(),
            draft.job.x(),
            draft.job.y()
        );
        for (key, point) in &draft.favorites {
            tracing::info!("  favorite {} at ({:.1}, {:.1})", key, point.x(), point.y());
        }

        ids.push(registry.add_actor(actor));
    }

    Ok(ids)
}

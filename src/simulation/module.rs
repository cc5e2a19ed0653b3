//! Module lifecycle: one-time initialization and per-tick updates

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::PopulationConfig;
use crate::core::error::Result;
use crate::core::types::ActorId;
use crate::simulation::population::{populate, FeatureCategories};
use crate::world::objects::{ActorRegistry, FeatureQuery, MapObjects};

/// A unit of simulation logic driven by the host
pub trait SimModule {
    fn name(&self) -> &str;

    /// Called once before the first tick
    fn initialize(&mut self, objects: &mut MapObjects) -> Result<()>;

    /// Called once per tick with the time elapsed since the previous tick
    fn update(&mut self, objects: &mut MapObjects, elapsed_ms: u64) -> Result<()>;
}

/// Populates the map with actors on initialization
pub struct ActorInitializer {
    config: PopulationConfig,
    seed: u64,
    rng: ChaCha8Rng,
    spawned: Vec<ActorId>,
}

impl ActorInitializer {
    pub fn new(config: PopulationConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        Ok(Self {
            config,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            spawned: Vec::new(),
        })
    }

    pub fn config(&self) -> &PopulationConfig {
        &self.config
    }

    /// Seed actually in use (drawn from entropy when the config had none)
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Handles of the actors this module registered
    pub fn spawned(&self) -> &[ActorId] {
        &self.spawned
    }
}

impl SimModule for ActorInitializer {
    fn name(&self) -> &str {
        "actor_initializer"
    }

    fn initialize(&mut self, objects: &mut MapObjects) -> Result<()> {
        let categories = FeatureCategories::partition(objects.nodes(), &self.config.categories);
        for category in categories.iter() {
            tracing::debug!("Category '{}': {} features", category.key, category.points.len());
        }

        tracing::info!(
            "Creating {} actors (seed {})",
            self.config.actor_count,
            self.seed
        );
        let ids = populate(objects, &categories, &self.config, &mut self.rng)?;
        self.spawned.extend(ids);
        Ok(())
    }

    fn update(&mut self, objects: &mut MapObjects, elapsed_ms: u64) -> Result<()> {
        tracing::info!(
            "{}: update after {} ms, {} actors live",
            self.name(),
            elapsed_ms,
            objects.actor_count()
        );
        Ok(())
    }
}

/// Owns the map and drives registered modules
pub struct ModuleHost {
    objects: MapObjects,
    modules: Vec<Box<dyn SimModule>>,
    /// Modules before this index have finished initializing
    next_to_init: usize,
    ticks: u64,
    elapsed_ms: u64,
}

impl ModuleHost {
    pub fn new(objects: MapObjects) -> Self {
        Self {
            objects,
            modules: Vec::new(),
            next_to_init: 0,
            ticks: 0,
            elapsed_ms: 0,
        }
    }

    pub fn add_module(&mut self, module: Box<dyn SimModule>) {
        self.modules.push(module);
    }

    /// Initialize every module in registration order
    ///
    /// Modules that already initialized are never run again, including when
    /// a later module failed and initialization is attempted a second time.
    pub fn initialize(&mut self) -> Result<()> {
        while let Some(module) = self.modules.get_mut(self.next_to_init) {
            tracing::debug!("Initializing module {}", module.name());
            module.initialize(&mut self.objects)?;
            self.next_to_init += 1;
        }
        Ok(())
    }

    /// Run one update on every module, initializing first if needed
    pub fn tick(&mut self, elapsed_ms: u64) -> Result<()> {
        self.initialize()?;
        for module in &mut self.modules {
            module.update(&mut self.objects, elapsed_ms)?;
        }
        self.ticks += 1;
        self.elapsed_ms += elapsed_ms;
        Ok(())
    }

    pub fn objects(&self) -> &MapObjects {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut MapObjects {
        &mut self.objects
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }
}

pub mod module;
pub mod population;

pub use module::{ActorInitializer, ModuleHost, SimModule};
pub use population::{assemble_actor, populate, ActorDraft, FeatureCategories, PopulationSampler};

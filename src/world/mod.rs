//! Map features and the object registry actors live in

pub mod features;
pub mod objects;

pub use features::{FeatureFile, OsmNode};
pub use objects::{ActorRegistry, FeatureQuery, MapObjects};

pub mod config;
pub mod error;
pub mod time;
pub mod types;

pub use config::{JobPool, NeedsPolicy, PopulationConfig, ValueRange};
pub use error::{ActorError, Result};
pub use time::{TimeInterval, TimeOfDay};
pub use types::{ActorId, Coord, Point};

pub mod actor;
pub mod job;
pub mod needs;
pub mod place;
pub mod state;

pub use actor::Actor;
pub use job::JobState;
pub use needs::NeedsState;
pub use place::{Place, PlaceState};
pub use state::{StateComponent, StateStore};

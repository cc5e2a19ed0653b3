//! Actors: a position on the map plus a bag of typed state

use crate::core::error::Result;
use crate::core::types::Point;
use crate::entity::state::{StateComponent, StateStore};

/// A simulated agent
///
/// Cloning an actor deep-copies every state component.
#[derive(Debug, Clone)]
pub struct Actor {
    pub position: Point,
    states: StateStore,
}

impl Actor {
    pub fn new(x: f64, y: f64) -> Self {
        Self::at(Point::new(x, y))
    }

    pub fn at(position: Point) -> Self {
        Self {
            position,
            states: StateStore::new(),
        }
    }

    /// Attach a copy of `state`, replacing any state of the same kind
    pub fn add_state<S: StateComponent>(&mut self, state: &S) {
        self.states.add(state);
    }

    pub fn get_state<S: StateComponent>(&self) -> Result<&S> {
        self.states.get::<S>()
    }

    pub fn get_state_mut<S: StateComponent>(&mut self) -> Result<&mut S> {
        self.states.get_mut::<S>()
    }

    pub fn try_get_state<S: StateComponent>(&self) -> Option<&S> {
        self.states.try_get::<S>()
    }

    pub fn has_state<S: StateComponent>(&self) -> bool {
        self.states.contains::<S>()
    }

    pub fn states(&self) -> &StateStore {
        &self.states
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ActorError;
    use crate::entity::job::JobState;
    use crate::entity::needs::NeedsState;
    use crate::entity::place::PlaceState;

    #[test]
    fn test_new_actor_has_no_state() {
        let actor = Actor::new(3.0, 4.0);
        assert_eq!(actor.position, Point::new(3.0, 4.0));
        assert!(actor.states().is_empty());
        assert!(matches!(
            actor.get_state::<NeedsState>(),
            Err(ActorError::StateNotFound { kind: "needs" })
        ));
    }

    #[test]
    fn test_one_prototype_seeds_many_actors() {
        let prototype = NeedsState::canonical();
        let mut alice = Actor::new(0.0, 0.0);
        let mut bob = Actor::new(1.0, 1.0);
        alice.add_state(&prototype);
        bob.add_state(&prototype);

        alice.get_state_mut::<NeedsState>().unwrap().satiety -= 30.0;

        assert_eq!(alice.get_state::<NeedsState>().unwrap().satiety, 70.0);
        assert_eq!(bob.get_state::<NeedsState>().unwrap().satiety, 100.0);
        assert_eq!(prototype.satiety, 100.0);
    }

    #[test]
    fn test_all_three_kinds_coexist() {
        let mut actor = Actor::new(0.0, 0.0);
        actor.add_state(&NeedsState::canonical());
        actor.add_state(&JobState::new(Point::new(1.0, 1.0)));
        actor.add_state(&PlaceState::new(Point::new(0.0, 0.0)));

        assert!(actor.has_state::<NeedsState>());
        assert!(actor.has_state::<JobState>());
        assert!(actor.has_state::<PlaceState>());
        assert_eq!(actor.states().kinds(), vec!["job", "needs", "place"]);
    }

    #[test]
    fn test_position_is_mutable() {
        let mut actor = Actor::new(0.0, 0.0);
        actor.position = Point::new(-50.0, 1e6);
        assert_eq!(actor.position.x(), -50.0);
        assert_eq!(actor.position.y(), 1e6);
    }

    #[test]
    fn test_cloned_actor_is_isolated() {
        let mut actor = Actor::new(0.0, 0.0);
        actor.add_state(&PlaceState::new(Point::new(0.0, 0.0)));

        let mut twin = actor.clone();
        twin.get_state_mut::<PlaceState>()
            .unwrap()
            .add_tagged(Point::new(2.0, 2.0).into(), "shop", "value");

        assert!(actor.get_state::<PlaceState>().unwrap().favorite_places().is_empty());
        assert_eq!(twin.get_state::<PlaceState>().unwrap().favorite_places().len(), 1);
    }
}

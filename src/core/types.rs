//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Map-space point (x, y in map units)
pub type Point = geo_types::Point<f64>;

/// Raw map-space coordinate
pub type Coord = geo_types::Coord<f64>;

/// Opaque handle assigned to an actor when it is registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub Uuid);

impl ActorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_ids_are_unique() {
        let a = ActorId::new();
        let b = ActorId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_actor_id_hash() {
        use std::collections::HashMap;
        let id = ActorId::new();
        let mut map: HashMap<ActorId, &str> = HashMap::new();
        map.insert(id, "resident");
        assert_eq!(map.get(&id), Some(&"resident"));
    }
}

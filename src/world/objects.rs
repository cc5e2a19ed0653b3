//! Map object registry: features to sample from and the live actors

use ahash::AHashMap;
use geo::EuclideanDistance;

use crate::core::types::{ActorId, Point};
use crate::entity::actor::Actor;
use crate::world::features::OsmNode;

/// Read access to map features
pub trait FeatureQuery {
    fn nodes(&self) -> &[OsmNode];

    fn nodes_tagged(&self, key: &str) -> Vec<&OsmNode> {
        self.nodes().iter().filter(|node| node.has_tag(key)).collect()
    }
}

/// Registration of live actors
pub trait ActorRegistry {
    /// Take ownership of `actor` and assign it a handle
    fn add_actor(&mut self, actor: Actor) -> ActorId;
    fn actor(&self, id: ActorId) -> Option<&Actor>;
    fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor>;
    fn actor_count(&self) -> usize;
}

/// Storage for all map objects (feature nodes and actors)
#[derive(Debug, Default)]
pub struct MapObjects {
    nodes: Vec<OsmNode>,
    actors: AHashMap<ActorId, Actor>,
    /// Registration order
    actor_order: Vec<ActorId>,
}

impl MapObjects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nodes(nodes: Vec<OsmNode>) -> Self {
        Self {
            nodes,
            ..Self::default()
        }
    }

    pub fn add_node(&mut self, node: OsmNode) {
        self.nodes.push(node);
    }

    pub fn extend_nodes(&mut self, nodes: impl IntoIterator<Item = OsmNode>) {
        self.nodes.extend(nodes);
    }

    /// Get all nodes within radius of a point
    pub fn nodes_within(&self, center: Point, radius: f64) -> Vec<&OsmNode> {
        self.nodes
            .iter()
            .filter(|node| node.point().euclidean_distance(&center) <= radius)
            .collect()
    }

    /// Iterate actors in registration order
    pub fn actors(&self) -> impl Iterator<Item = (ActorId, &Actor)> {
        self.actor_order
            .iter()
            .filter_map(|id| self.actors.get(id).map(|actor| (*id, actor)))
    }
}

impl FeatureQuery for MapObjects {
    fn nodes(&self) -> &[OsmNode] {
        &self.nodes
    }
}

impl ActorRegistry for MapObjects {
    fn add_actor(&mut self, actor: Actor) -> ActorId {
        let id = ActorId::new();
        self.actors.insert(id, actor);
        self.actor_order.push(id);
        id
    }

    fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    fn actor_count(&self) -> usize {
        self.actors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::needs::NeedsState;

    #[test]
    fn test_nodes_tagged() {
        let objects = MapObjects::with_nodes(vec![
            OsmNode::new(1, 0.0, 0.0).with_tag("building", "yes"),
            OsmNode::new(2, 5.0, 5.0).with_tag("shop", "bakery"),
            OsmNode::new(3, 9.0, 9.0).with_tag("building", "house"),
        ]);

        let buildings: Vec<_> = objects.nodes_tagged("building").iter().map(|n| n.id).collect();
        assert_eq!(buildings, vec![1, 3]);
        assert!(objects.nodes_tagged("amenity").is_empty());
    }

    #[test]
    fn test_nodes_within_radius() {
        let mut objects = MapObjects::new();
        objects.add_node(OsmNode::new(1, 10.0, 10.0));
        objects.add_node(OsmNode::new(2, 50.0, 50.0));

        let nearby = objects.nodes_within(Point::new(12.0, 12.0), 10.0);
        assert_eq!(nearby.len(), 1);
        assert_eq!(nearby[0].id, 1);
    }

    #[test]
    fn test_register_and_lookup_actor() {
        let mut objects = MapObjects::new();
        let mut actor = Actor::new(1.0, 2.0);
        actor.add_state(&NeedsState::canonical());

        let id = objects.add_actor(actor);

        assert_eq!(objects.actor_count(), 1);
        let stored = objects.actor(id).unwrap();
        assert_eq!(stored.position, Point::new(1.0, 2.0));
        assert!(stored.has_state::<NeedsState>());
    }

    #[test]
    fn test_actor_mut_updates_registry() {
        let mut objects = MapObjects::new();
        let id = objects.add_actor(Actor::new(0.0, 0.0));

        objects.actor_mut(id).unwrap().position = Point::new(7.0, 7.0);
        assert_eq!(objects.actor(id).unwrap().position, Point::new(7.0, 7.0));
        assert!(objects.actor(ActorId::new()).is_none());
    }

    #[test]
    fn test_actors_iterate_in_registration_order() {
        let mut objects = MapObjects::new();
        let ids: Vec<_> = (0..5)
            .map(|i| objects.add_actor(Actor::new(i as f64, 0.0)))
            .collect();

        let seen: Vec<_> = objects.actors().map(|(id, _)| id).collect();
        assert_eq!(seen, ids);
    }
}

//! Home and favorite places

use geo::EuclideanDistance;

use crate::core::types::{Coord, Point};
use crate::entity::state::StateComponent;

/// A remembered location tagged with why it matters (e.g. `shop`)
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    position: Point,
    tag_key: String,
    tag_value: String,
}

impl Place {
    pub fn new(coord: Coord, tag_key: impl Into<String>, tag_value: impl Into<String>) -> Self {
        Self {
            position: Point::from(coord),
            tag_key: tag_key.into(),
            tag_value: tag_value.into(),
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn tag_key(&self) -> &str {
        &self.tag_key
    }

    pub fn tag_value(&self) -> &str {
        &self.tag_value
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceState {
    pub home: Point,
    favorite_places: Vec<Place>,
}

impl PlaceState {
    pub fn new(home: Point) -> Self {
        Self {
            home,
            favorite_places: Vec::new(),
        }
    }

    pub fn add_place(&mut self, place: Place) {
        self.favorite_places.push(place);
    }

    pub fn add_tagged(&mut self, coord: Coord, tag_key: impl Into<String>, tag_value: impl Into<String>) {
        self.add_place(Place::new(coord, tag_key, tag_value));
    }

    pub fn favorite_places(&self) -> &[Place] {
        &self.favorite_places
    }

    pub fn places_tagged<'a>(&'a self, tag_key: &'a str) -> impl Iterator<Item = &'a Place> + 'a {
        self.favorite_places
            .iter()
            .filter(move |place| place.tag_key == tag_key)
    }

    pub fn nearest_favorite(&self, from: Point) -> Option<&Place> {
        self.favorite_places.iter().min_by(|a, b| {
            a.position
                .euclidean_distance(&from)
                .total_cmp(&b.position.euclidean_distance(&from))
        })
    }
}

impl StateComponent for PlaceState {
    const KIND: &'static str = "place";
}

//! OSM Actors - autonomous agents with typed state on an OpenStreetMap-derived map

pub mod core;
pub mod entity;
pub mod simulation;
pub mod world;

//! Physical and economic needs of an actor

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::NeedsRanges;
use crate::entity::state::StateComponent;

/// Six independent scalars; bounds are whatever the initializer chose
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeedsState {
    pub health: f64,
    pub satiety: f64,
    pub mood: f64,
    pub stamina: f64,
    pub money: f64,
    /// Movement speed in map units per tick
    pub speed: f64,
}

impl NeedsState {
    pub fn new(health: f64, satiety: f64, mood: f64, stamina: f64, money: f64, speed: f64) -> Self {
        Self {
            health,
            satiety,
            mood,
            stamina,
            money,
            speed,
        }
    }

    /// Fully healthy, fed, rested actor with a starting purse
    pub fn canonical() -> Self {
        Self::new(100.0, 100.0, 100.0, 100.0, 10000.0, 2.0)
    }

    /// Draw every attribute uniformly from its range
    pub fn sample<R: Rng + ?Sized>(ranges: &NeedsRanges, rng: &mut R) -> Self {
        Self {
            health: ranges.health.sample(rng),
            satiety: ranges.satiety.sample(rng),
            mood: ranges.mood.sample(rng),
            stamina: ranges.stamina.sample(rng),
            money: ranges.money.sample(rng),
            speed: ranges.speed.sample(rng),
        }
    }
}

impl Default for NeedsState {
    fn default() -> Self {
        Self::canonical()
    }
}

impl StateComponent for NeedsState {
    const KIND: &'static str = "needs";
}

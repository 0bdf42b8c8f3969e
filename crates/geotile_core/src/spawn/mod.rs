//! Spawn pipeline around the geo core: eco-locations, rarity weighting,
//! environmental boost and per-user cooldowns.

mod cooldown;
mod environment;
mod pipeline;
mod rarity;

pub use cooldown::{CooldownTracker, DEFAULT_COOLDOWN};
pub use environment::{EcoLocation, EcoLocationType, EnvironmentSnapshot, GreenPlanTarget};
pub use pipeline::{SpawnConfig, SpawnPipeline};
pub use rarity::{experience_for, RarityTable, BOOST_SHIFT};

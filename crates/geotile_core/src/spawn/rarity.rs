//! Weighted rarity table and experience rewards.

use crate::types::Rarity;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Share of the Common weight moved to higher tiers when boosted.
pub const BOOST_SHIFT: f64 = 0.1;

/// Relative weights of each rarity tier, indexed by [`Rarity::index`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RarityTable {
    weights: [f64; 5],
}

impl Default for RarityTable {
    fn default() -> Self {
        Self {
            weights: [50.0, 25.0, 15.0, 8.0, 2.0],
        }
    }
}

impl RarityTable {
    /// Creates a table from explicit weights in [`Rarity::ALL`] order.
    pub fn from_weights(weights: [f64; 5]) -> Self {
        Self { weights }
    }

    /// Raw weights in [`Rarity::ALL`] order.
    pub fn weights(&self) -> [f64; 5] {
        self.weights
    }

    /// Weight of a single tier.
    pub fn weight(&self, rarity: Rarity) -> f64 {
        self.weights[rarity.index()]
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Probability of rolling `rarity`.
    pub fn probability(&self, rarity: Rarity) -> f64 {
        let total = self.total();
        if total <= 0.0 {
            return 0.0;
        }
        self.weight(rarity) / total
    }

    /// Moves [`BOOST_SHIFT`] of the Common weight into the higher tiers,
    /// split in proportion to their current weights. The total is unchanged.
    pub fn boosted(&self) -> Self {
        let mut weights = self.weights;
        let shift = weights[0] * BOOST_SHIFT;
        let higher: f64 = weights[1..].iter().sum();
        if higher <= 0.0 {
            return *self;
        }

        weights[0] -= shift;
        for w in &mut weights[1..] {
            *w += (*w / higher) * shift;
        }
        Self { weights }
    }

    /// Draws a tier. Falls back to Common if the weights are degenerate.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> Rarity {
        let total = self.total();
        if total.is_nan() || total <= 0.0 {
            return Rarity::Common;
        }

        let mut roll = rng.gen_range(0.0..total);
        for rarity in Rarity::ALL {
            let weight = self.weight(rarity);
            if roll < weight {
                return rarity;
            }
            roll -= weight;
        }
        Rarity::Common
    }
}

/// Experience awarded for collecting a creature.
///
/// Completing a challenge multiplies the base by 1.5 and a first visit to a
/// location by 1.2; the result is floored.
pub fn experience_for(rarity: Rarity, challenge_completed: bool, first_time_location: bool) -> u32 {
    let mut exp: f64 = match rarity {
        Rarity::Common => 50.0,
        Rarity::Uncommon => 100.0,
        Rarity::Rare => 200.0,
        Rarity::Epic => 400.0,
        Rarity::Legendary => 800.0,
    };
    if challenge_completed {
        exp *= 1.5;
    }
    if first_time_location {
        exp *= 1.2;
    }
    exp.floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_probabilities() {
        let table = RarityTable::default();
        assert_eq!(table.total(), 100.0);
        assert!((table.probability(Rarity::Common) - 0.5).abs() < 1e-12);
        assert!((table.probability(Rarity::Legendary) - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_boost_shifts_common_weight_up() {
        let base = RarityTable::default();
        let boosted = base.boosted();

        assert!((boosted.total() - base.total()).abs() < 1e-9);
        assert!((boosted.weight(Rarity::Common) - 45.0).abs() < 1e-9);
        // 5 points spread over 50 points of higher tiers: +10% each.
        assert!((boosted.weight(Rarity::Uncommon) - 27.5).abs() < 1e-9);
        assert!((boosted.weight(Rarity::Legendary) - 2.2).abs() < 1e-9);
    }

    #[test]
    fn test_boosted_rolls_favor_higher_tiers() {
        let base = RarityTable::default();
        let boosted = base.boosted();
        let mut rng = StdRng::seed_from_u64(7);

        let samples = 20_000;
        let mut base_common = 0;
        let mut boost_common = 0;
        for _ in 0..samples {
            if base.roll(&mut rng) == Rarity::Common {
                base_common += 1;
            }
            if boosted.roll(&mut rng) == Rarity::Common {
                boost_common += 1;
            }
        }
        assert!(boost_common < base_common, "{boost_common} >= {base_common}");
    }

    #[test]
    fn test_degenerate_table_rolls_common() {
        let mut rng = StdRng::seed_from_u64(1);
        let empty = RarityTable::from_weights([0.0; 5]);
        assert_eq!(empty.roll(&mut rng), Rarity::Common);
        assert_eq!(empty.probability(Rarity::Rare), 0.0);

        let nan = RarityTable::from_weights([f64::NAN, 1.0, 1.0, 1.0, 1.0]);
        assert_eq!(nan.roll(&mut rng), Rarity::Common);
    }

    #[test]
    fn test_single_tier_table() {
        let mut rng = StdRng::seed_from_u64(3);
        let only_epic = RarityTable::from_weights([0.0, 0.0, 0.0, 1.0, 0.0]);
        for _ in 0..100 {
            assert_eq!(only_epic.roll(&mut rng), Rarity::Epic);
        }
    }

    #[test]
    fn test_experience_table() {
        assert_eq!(experience_for(Rarity::Common, false, false), 50);
        assert_eq!(experience_for(Rarity::Legendary, false, false), 800);
        assert_eq!(experience_for(Rarity::Rare, true, false), 300);
        assert_eq!(experience_for(Rarity::Uncommon, true, true), 180);
        assert_eq!(experience_for(Rarity::Common, false, true), 60);
    }
}

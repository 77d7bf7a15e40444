//! Item rarity database
//!
//! An item's rarity scales its effect and tints its sprite. `chance` is the
//! per-roll probability used both when dropping loot and when scaling
//! effects, so rarer items are proportionally stronger.

use nova_engine::prelude::Color;

/// One rarity tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rarity {
    /// Roll probability; also the inverse of the power multiplier.
    pub chance: f32,

    /// Sprite tint for pickups of this rarity.
    pub color: Color,
}

/// Baseline tier; every item starts here.
pub const COMMON: Rarity = Rarity { chance: 1.0, color: Color::WHITE };
/// One-in-two tier.
pub const UNCOMMON: Rarity = Rarity { chance: 1.0 / 2.0, color: Color::GREEN };
/// One-in-four tier.
pub const RARE: Rarity = Rarity { chance: 1.0 / 4.0, color: Color::BLUE };
/// One-in-eight tier.
pub const EPIC: Rarity = Rarity { chance: 1.0 / 8.0, color: Color::PURPLE };
/// One-in-sixteen tier.
pub const LEGENDARY: Rarity = Rarity { chance: 1.0 / 16.0, color: Color::ORANGE };
/// One-in-thirty-two tier.
pub const ARTIFACT: Rarity = Rarity { chance: 1.0 / 32.0, color: Color::RED };

/// Every tier, rarest first.
///
/// Rarity rolls walk this order so rare tiers get their roll before the
/// guaranteed common tier ends the walk.
pub fn by_ascending_chance() -> [Rarity; 6] {
    [ARTIFACT, LEGENDARY, EPIC, RARE, UNCOMMON, COMMON]
}

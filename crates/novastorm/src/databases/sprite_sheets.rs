//! Sprite sheet database
//!
//! Paths are relative to the `SpriteSheets` asset root; frames are laid out
//! in a single horizontal strip.

/// One sprite sheet asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSheetEntry {
    /// Asset path under `SpriteSheets/`.
    pub path: &'static str,

    /// Number of animation frames in the strip.
    pub frames: u8,
}

const fn entry(path: &'static str, frames: u8) -> SpriteSheetEntry {
    SpriteSheetEntry { path, frames }
}

/// Ammo pickup.
pub const ITEM_AMMO: SpriteSheetEntry = entry("Items/Ammo", 1);
/// Energy pickup.
pub const ITEM_ENERGY: SpriteSheetEntry = entry("Items/Energy", 1);
/// Experience pickup.
pub const ITEM_EXPERIENCE: SpriteSheetEntry = entry("Items/Experience", 1);
/// Backwards gun pickup.
pub const ITEM_GUN_BACK: SpriteSheetEntry = entry("Items/GunBack", 1);
/// Side gun pickup.
pub const ITEM_GUN_SIDE: SpriteSheetEntry = entry("Items/GunSide", 1);
/// Health pickup.
pub const ITEM_HEALTH: SpriteSheetEntry = entry("Items/Health", 1);
/// Extra life pickup.
pub const ITEM_LIFE: SpriteSheetEntry = entry("Items/Life", 4);
/// Shield pickup.
pub const ITEM_SHIELD: SpriteSheetEntry = entry("Items/Shield", 4);

/// Explosion effect.
pub const EFFECT_EXPLOSION: SpriteSheetEntry = entry("Effects/Explosion", 6);
/// Shield overlay effect.
pub const EFFECT_SHIELD: SpriteSheetEntry = entry("Effects/Shield", 4);

/// Enemy ship.
pub const SHIP_ENEMY: SpriteSheetEntry = entry("Ships/Enemy", 4);
/// Player ship.
pub const SHIP_PLAYER: SpriteSheetEntry = entry("Ships/Player", 4);

/// Bullet projectile.
pub const PROJECTILE_BULLET: SpriteSheetEntry = entry("Projectiles/Bullet", 1);

/// Asteroid.
pub const OBJECT_ASTEROID: SpriteSheetEntry = entry("Objects/Asteroid", 1);

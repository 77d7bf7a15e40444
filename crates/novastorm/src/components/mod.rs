//! Gameplay components
//!
//! Each component owns its own state behind `Cell`/`RefCell` and reaches
//! its entity through a weak back-reference, so blueprints can wire
//! components to the entity being built without ownership cycles.

pub mod armament;
pub mod collision;
pub mod contact_damage;
pub mod death_effect;
pub mod despawn;
pub mod enemy_ai;
pub mod health;
pub mod inventory;
pub mod item;
pub mod movable;
pub mod player;
pub mod projectile;
pub mod spawn_on_death;
pub mod sprite_sheet;

pub use armament::Armament;
pub use collision::Collision;
pub use contact_damage::ContactDamage;
pub use death_effect::DeathEffect;
pub use despawn::{DespawnAfter, DespawnWhenOffscreen};
pub use enemy_ai::EnemyAi;
pub use health::Health;
pub use inventory::Inventory;
pub use item::{Item, ItemEffect, StackingKind};
pub use movable::Movable;
pub use player::{apply_input, Player};
pub use projectile::Projectile;
pub use spawn_on_death::SpawnOnDeath;
pub use sprite_sheet::SpriteSheet;

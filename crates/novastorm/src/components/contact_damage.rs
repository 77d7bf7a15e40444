//! Damage on collision

use nova_engine::prelude::*;

use crate::components::Health;

/// Applies damage to entities this one collides with.
///
/// With a fixed damage value the other entity simply takes it. With damage
/// 0 the component performs a mutual ram: both entities lose the smaller of
/// the two current health values, so the weaker one dies and the stronger
/// one survives with the difference.
pub struct ContactDamage {
    entity: EntityRef,
    damage: u32,
}

impl ContactDamage {
    /// Contact damage; 0 selects mutual ram damage.
    pub fn new(entity: &Entity, damage: u32) -> Self {
        Self {
            entity: entity.downgrade(),
            damage,
        }
    }
}

impl CollisionReactive for ContactDamage {
    fn on_collision(&self, other: &Entity) {
        if self.damage == 0 {
            let entity = self.entity.get();
            let (Some(own), Some(theirs)) = (
                entity.get_one_or_default::<Health>(),
                other.get_one_or_default::<Health>(),
            ) else {
                return;
            };

            if own.invincible() || theirs.invincible() {
                return;
            }

            let damage = own.current().min(theirs.current());
            own.apply_damage(damage);
            theirs.apply_damage(damage);
        } else if let Some(health) = other.get_one_or_default::<Health>() {
            health.apply_damage(self.damage);
        }
    }
}

impl_component!(ContactDamage: CollisionReactive);

//! Projectile behavior

use nova_engine::prelude::*;

/// Disposes the entity on any collision, optionally playing an impact
/// sound. Damage is carried separately by
/// [`ContactDamage`](crate::components::ContactDamage).
pub struct Projectile {
    entity: EntityRef,
    impact_sound: Option<&'static str>,
}

impl Projectile {
    /// Projectile with an optional impact sound.
    pub fn new(entity: &Entity, impact_sound: Option<&'static str>) -> Self {
        Self {
            entity: entity.downgrade(),
            impact_sound,
        }
    }
}

impl CollisionReactive for Projectile {
    fn on_collision(&self, _other: &Entity) {
        let entity = self.entity.get();

        if let Some(sound) = self.impact_sound {
            entity.world().play(sound);
        }

        entity.dispose();
    }
}

impl_component!(Projectile: CollisionReactive);

//! Death presentation

use nova_engine::prelude::*;

use crate::components::SpriteSheet;
use crate::databases::sprite_sheets::SpriteSheetEntry;

/// Plays an animation and/or a sound where the entity died.
pub struct DeathEffect {
    entity: EntityRef,
    sprite: Option<SpriteSheetEntry>,
    sound: Option<&'static str>,
}

impl DeathEffect {
    /// Death effect with an optional animation and sound.
    pub fn new(
        entity: &Entity,
        sprite: Option<SpriteSheetEntry>,
        sound: Option<&'static str>,
    ) -> Self {
        Self {
            entity: entity.downgrade(),
            sprite,
            sound,
        }
    }
}

impl DeathReactive for DeathEffect {
    fn on_death(&self) {
        let entity = self.entity.get();
        let world = entity.world();

        if let Some(entry) = self.sprite {
            world.spawn_effect(
                &EntityBlueprint::new(move |effect| {
                    vec![SpriteSheet::new(effect, entry).into_component()]
                }),
                entity.position(),
            );
        }

        if let Some(sound) = self.sound {
            world.play(sound);
        }
    }
}

impl_component!(DeathEffect: DeathReactive);

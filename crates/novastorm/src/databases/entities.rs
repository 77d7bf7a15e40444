//! Entity blueprint database
//!
//! Every spawnable thing in the game, authored as blueprints. Collision
//! group tags: `Player`, `Enemy`, `Object`, `Item`, `Projectile`.

use nova_engine::prelude::*;

use crate::components::{
    Armament, Collision, ContactDamage, DeathEffect, DespawnAfter, DespawnWhenOffscreen, EnemyAi,
    Health, Inventory, Item, ItemEffect, Movable, Player, SpawnOnDeath, SpriteSheet, StackingKind,
};
use crate::databases::sprite_sheets::{self, SpriteSheetEntry};
use crate::weapon::{Weapon, WeaponMount};

/// How long an uncollected pickup lingers.
const PICKUP_LIFETIME: f32 = 60.0;

/// Two players cannot drift further apart than this (screen height minus a
/// ship-sized margin).
const MAX_PLAYER_SEPARATION: f32 = 296.0;

fn pickup(
    sprite: SpriteSheetEntry,
    pickup_sound: &'static str,
    effect: ItemEffect,
) -> EntityBlueprint {
    EntityBlueprint::new(move |entity| {
        vec![
            SpriteSheet::new(entity, sprite).into_component(),
            Collision::new(entity, 12.0).with_group("Item").into_component(),
            Item::new(entity, pickup_sound, effect).into_component(),
            DespawnAfter::new(entity, PICKUP_LIFETIME).into_component(),
        ]
    })
}

/// Ammo pickup.
pub fn item_ammo() -> EntityBlueprint {
    pickup(
        sprite_sheets::ITEM_AMMO,
        "Item",
        ItemEffect::Ammo { base_amount: 10 },
    )
}

/// Energy pickup.
pub fn item_energy() -> EntityBlueprint {
    pickup(
        sprite_sheets::ITEM_ENERGY,
        "Item",
        ItemEffect::Energy { base_amount: 10 },
    )
}

/// Experience pickup.
pub fn item_experience() -> EntityBlueprint {
    pickup(
        sprite_sheets::ITEM_EXPERIENCE,
        "ItemSmall",
        ItemEffect::Experience { base_amount: 10 },
    )
}

/// Health pickup.
pub fn item_health() -> EntityBlueprint {
    pickup(
        sprite_sheets::ITEM_HEALTH,
        "Item",
        ItemEffect::Health { base_amount: 10 },
    )
}

/// Extra life pickup.
pub fn item_life() -> EntityBlueprint {
    pickup(sprite_sheets::ITEM_LIFE, "ItemLarge", ItemEffect::Life)
}

/// Timed shield pickup.
pub fn item_shield() -> EntityBlueprint {
    pickup(
        sprite_sheets::ITEM_SHIELD,
        "ItemLarge",
        ItemEffect::Stacking {
            kind: StackingKind::Shield,
            base_duration: 30.0,
        },
    )
}

/// Timed backwards gun pickup.
pub fn item_gun_back() -> EntityBlueprint {
    pickup(
        sprite_sheets::ITEM_GUN_BACK,
        "ItemLarge",
        ItemEffect::Stacking {
            kind: StackingKind::GunBack,
            base_duration: 30.0,
        },
    )
}

/// Timed side gun pickup.
pub fn item_gun_side() -> EntityBlueprint {
    pickup(
        sprite_sheets::ITEM_GUN_SIDE,
        "ItemLarge",
        ItemEffect::Stacking {
            kind: StackingKind::GunSide,
            base_duration: 30.0,
        },
    )
}

fn drop_table() -> Vec<(EntityBlueprint, f32)> {
    vec![
        (item_ammo(), 0.1),
        (item_health(), 0.1),
        (item_gun_back(), 0.01),
        (item_gun_side(), 0.01),
        (item_life(), 0.01),
        (item_shield(), 0.01),
    ]
}

/// Player ship.
pub fn ship_player() -> EntityBlueprint {
    EntityBlueprint::new(|entity| {
        vec![
            SpriteSheet::new(entity, sprite_sheets::SHIP_PLAYER).into_component(),
            Player::new(entity).with_ammo_regen(0.5).into_component(),
            Health::new(entity, 100).into_component(),
            DeathEffect::new(
                entity,
                Some(sprite_sheets::EFFECT_EXPLOSION),
                Some("Explosion"),
            )
            .into_component(),
            Movable::new(entity, 350.0)
                .with_acceleration(4.0)
                .with_player_tether(MAX_PLAYER_SEPARATION)
                .into_component(),
            Collision::new(entity, 16.0)
                .with_group("Player")
                .with_targets(&["Item", "Object", "Enemy"])
                .into_component(),
            ContactDamage::new(entity, 0).into_component(),
            Inventory::new(entity).into_component(),
            Armament::new(
                entity,
                vec![Weapon::new(vec![
                    WeaponMount::fixed(Vec2::new(-10.0, -8.0), Vec2::new(0.0, -1.0)),
                    WeaponMount::fixed(Vec2::new(10.0, -8.0), Vec2::new(0.0, -1.0)),
                ])
                .with_fire_delay(0.25)
                .with_ammo_cost(1)
                .with_damage(10)
                .with_projectile_speed(512.0)
                .with_collision("Projectile", &["Object", "Enemy"])],
            )
            .into_component(),
        ]
    })
}

/// Enemy ship.
pub fn ship_enemy() -> EntityBlueprint {
    EntityBlueprint::new(|entity| {
        vec![
            SpriteSheet::new(entity, sprite_sheets::SHIP_ENEMY).into_component(),
            Health::new(entity, 100).into_component(),
            DeathEffect::new(
                entity,
                Some(sprite_sheets::EFFECT_EXPLOSION),
                Some("Explosion"),
            )
            .into_component(),
            Movable::new(entity, 200.0).with_acceleration(1.0).into_component(),
            Collision::new(entity, 16.0)
                .with_group("Enemy")
                .with_targets(&["Player"])
                .into_component(),
            ContactDamage::new(entity, 0).into_component(),
            Armament::new(
                entity,
                vec![Weapon::new(vec![WeaponMount::fixed(
                    Vec2::new(0.0, -8.0),
                    Vec2::new(0.0, -1.0),
                )])
                .with_fire_delay(1.0)
                .with_damage(10)
                .with_projectile_speed(256.0)
                .with_collision("Projectile", &["Player"])],
            )
            .into_component(),
            EnemyAi::new(entity, 128.0).into_component(),
            DespawnWhenOffscreen::new(entity).into_component(),
            SpawnOnDeath::new(entity, drop_table()).into_component(),
        ]
    })
}

/// Drifting asteroid.
pub fn asteroid() -> EntityBlueprint {
    EntityBlueprint::new(|entity| {
        vec![
            SpriteSheet::new(entity, sprite_sheets::OBJECT_ASTEROID).into_component(),
            Collision::new(entity, 28.0).with_group("Object").into_component(),
            Health::new(entity, 100).into_component(),
            DeathEffect::new(
                entity,
                Some(sprite_sheets::EFFECT_EXPLOSION),
                Some("Explosion"),
            )
            .into_component(),
            DespawnWhenOffscreen::new(entity).into_component(),
            Movable::new(entity, 0.0).into_component(),
            SpawnOnDeath::new(entity, drop_table()).into_component(),
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::test_world;

    #[test]
    fn player_blueprint_assembles_the_full_kit() {
        let (world, _audio, _dir) = test_world();
        let player = world.spawn(&ship_player());

        assert!(player.get_one_or_default::<Player>().is_some());
        assert!(player.get_one_or_default::<Inventory>().is_some());
        assert_eq!(player.get_one::<Health>().current(), 100);

        let armament = player.get_one::<Armament>();
        assert_eq!(armament.weapons().len(), 1);
        assert_eq!(armament.weapons()[0].mounts().len(), 2);
    }

    #[test]
    fn enemy_and_asteroid_carry_drop_tables() {
        let (world, _audio, _dir) = test_world();
        let enemy = world.spawn(&ship_enemy());
        let rock = world.spawn(&asteroid());

        assert!(enemy.get_one_or_default::<SpawnOnDeath>().is_some());
        assert!(rock.get_one_or_default::<SpawnOnDeath>().is_some());
        assert!(rock.get_one_or_default::<Armament>().is_none());
    }

    #[test]
    fn pickups_despawn_eventually_and_collide_as_items() {
        let (world, _audio, _dir) = test_world();
        let pickup = world.spawn(&item_shield());

        let collider = pickup.get_one::<Collision>();
        assert_eq!(collider.group, Some("Item"));
        assert!(collider.check_collisions_with.is_empty());
        assert!(pickup.get_one_or_default::<DespawnAfter>().is_some());
    }
}

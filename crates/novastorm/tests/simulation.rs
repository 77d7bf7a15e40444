//! End-to-end gameplay scenarios driven through full world updates.

use std::rc::Rc;

use nova_engine::prelude::*;

use novastorm::components::{
    apply_input, Collision, ContactDamage, Health, Inventory, Item, Player, SpawnOnDeath,
};
use novastorm::databases::entities;

struct IdleMode;

impl GameMode for IdleMode {
    fn update(&mut self, _frame: FrameTime, _world: &World) {}
}

fn silent_world() -> (World, Rc<NullAudio>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let audio = Rc::new(NullAudio::new());
    let settings = Settings::open(dir.path().join("settings.bin"));
    let config = EngineConfig {
        music: None,
        ..EngineConfig::default()
    };
    let world = World::new(&config, audio.clone(), settings, Box::new(IdleMode));
    (world, audio, dir)
}

fn frame(delta_seconds: f32) -> FrameTime {
    FrameTime::from_delta(delta_seconds)
}

#[test]
fn flying_over_an_ammo_crate_refills_the_magazine() {
    let (world, audio, _dir) = silent_world();

    let ship = world.spawn(&entities::ship_player());
    ship.get_one::<Player>().set_ammo(0);

    let crate_entity = world.spawn(&entities::item_ammo());
    crate_entity.set_position(ship.position());

    world.update(frame(0.016));

    assert!(crate_entity.disposed());
    assert_eq!(world.entities().len(), 1);
    assert_eq!(audio.play_count("Item"), 1);
    // A common-rarity drop carries its base amount unscaled.
    assert_eq!(ship.get_one::<Player>().ammo(), 10);
    assert!(ship.get_one::<Inventory>().items().is_empty());
}

#[test]
fn shield_pickup_makes_the_ship_invincible_until_it_expires() {
    let (world, audio, _dir) = silent_world();

    let ship = world.spawn(&entities::ship_player());
    let pickup = world.spawn(&entities::item_shield());
    pickup.set_position(ship.position());

    world.update(frame(0.016));

    let health = ship.get_one::<Health>();
    assert!(health.invincible());
    assert_eq!(audio.play_count("ShieldOn"), 1);

    health.apply_damage(9999);
    assert_eq!(health.current(), 100);

    // Outlast the shield; a common drop runs its full base duration.
    for _ in 0..40 {
        world.update(frame(1.0));
    }

    assert!(!health.invincible());
    assert_eq!(audio.play_count("ShieldOff"), 1);
}

#[test]
fn ramming_through_the_collision_pass_trades_hull() {
    let (world, _audio, _dir) = silent_world();

    let scout = world.spawn(&EntityBlueprint::new(|entity| {
        let health = Health::new(entity, 100);
        health.apply_damage(70);
        vec![
            health.into_component(),
            Collision::new(entity, 16.0)
                .with_group("Player")
                .with_targets(&["Enemy"])
                .into_component(),
            ContactDamage::new(entity, 0).into_component(),
        ]
    }));

    let raider = world.spawn(&EntityBlueprint::new(|entity| {
        let health = Health::new(entity, 100);
        health.apply_damage(50);
        vec![
            health.into_component(),
            Collision::new(entity, 16.0).with_group("Enemy").into_component(),
            ContactDamage::new(entity, 0).into_component(),
        ]
    }));
    raider.set_position(scout.position() + Vec2::new(8.0, 0.0));

    world.update(frame(0.016));

    assert!(scout.disposed());
    assert!(!raider.disposed());
    assert_eq!(raider.get_one::<Health>().current(), 20);
}

#[test]
fn destroyed_raider_drops_loot_where_it_died() {
    let (world, _audio, _dir) = silent_world();

    let raider = world.spawn(&EntityBlueprint::new(|entity| {
        vec![
            Health::new(entity, 10).into_component(),
            SpawnOnDeath::new(entity, vec![(entities::item_ammo(), 1.0)])
                .with_seed(7)
                .into_component(),
        ]
    }));
    raider.set_position(Vec2::new(50.0, 60.0));

    raider.get_one::<Health>().apply_damage(10);

    let drops: Vec<_> = world
        .entities()
        .into_iter()
        .filter(|entity| entity.get_one_or_default::<Item>().is_some())
        .collect();
    assert_eq!(drops.len(), 1);
    assert_eq!(drops[0].position(), Vec2::new(50.0, 60.0));
}

#[test]
fn sustained_fire_breaks_an_asteroid() {
    let (world, audio, _dir) = silent_world();

    let ship = world.spawn(&entities::ship_player());
    let rock = world.spawn(&entities::asteroid());
    rock.set_position(Vec2::new(0.0, -100.0));

    for _ in 0..60 {
        apply_input(
            &ship,
            PlayerInput {
                move_dir: Vec2::new(0.0, 0.0),
                look_dir: Vec2::new(0.0, -1.0),
                firing: true,
            },
        );
        world.update(frame(0.1));

        if rock.disposed() {
            break;
        }
    }

    assert!(rock.disposed());
    assert!(!ship.disposed());
    assert!(audio.play_count("Bullet") >= 5);
    assert!(audio.play_count("Hit") >= 1);
    assert_eq!(audio.play_count("Explosion"), 1);
    assert!(world.active_effect_count() >= 1);
}

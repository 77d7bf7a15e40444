//! Enemy steering

use nova_engine::prelude::*;

use crate::components::{Armament, Movable, Player};

/// Flies toward the nearest player, holds position at a preferred range,
/// and fires while on screen.
pub struct EnemyAi {
    entity: EntityRef,
    near_distance: f32,
}

impl EnemyAi {
    /// AI that closes to `near_distance` of the nearest player.
    pub fn new(entity: &Entity, near_distance: f32) -> Self {
        Self {
            entity: entity.downgrade(),
            near_distance,
        }
    }
}

impl Updatable for EnemyAi {
    fn update(&self, _frame: FrameTime) {
        let entity = self.entity.get();
        let world = entity.world();

        let nearest_player = world
            .entities()
            .into_iter()
            .filter(|other| other.get_one_or_default::<Player>().is_some())
            .min_by(|a, b| {
                (a.position() - entity.position())
                    .norm()
                    .total_cmp(&(b.position() - entity.position()).norm())
            });

        let movable = entity.get_one_or_default::<Movable>();
        let armament = entity.get_one_or_default::<Armament>();

        match nearest_player {
            None => {
                if let Some(movable) = movable {
                    movable.set_move(Vec2::zeros());
                    movable.set_look(Vec2::zeros());
                }

                if let Some(armament) = armament {
                    armament.set_firing(false);
                }
            }
            Some(player) => {
                let to_player = player.position() - entity.position();
                let distance = to_player.norm();
                let direction = normalize_or_zero(to_player);

                if let Some(movable) = movable {
                    movable.set_move(if distance > self.near_distance {
                        direction
                    } else {
                        Vec2::zeros()
                    });
                    movable.set_look(direction);
                }

                if let Some(armament) = armament {
                    armament.set_firing(world.camera().viewport().contains(entity.position()));
                }
            }
        }
    }
}

impl_component!(EnemyAi: Updatable);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    use crate::test_util::{frame, test_world};

    fn enemy(world: &World) -> Entity {
        world.spawn(&EntityBlueprint::new(|entity| {
            vec![
                Movable::new(entity, 200.0).into_component(),
                Armament::new(entity, Vec::new()).into_component(),
                EnemyAi::new(entity, 128.0).into_component(),
            ]
        }))
    }

    fn player_at(world: &World, position: Vec2) -> Entity {
        let player = world.spawn(&EntityBlueprint::new(|entity| {
            vec![Player::new(entity).into_component()]
        }));
        player.set_position(position);
        player
    }

    #[test]
    fn chases_the_nearest_player_until_in_range() {
        let (world, _audio, _dir) = test_world();
        let hunter = enemy(&world);
        hunter.set_position(Vec2::new(500.0, 0.0));
        player_at(&world, Vec2::zeros());

        world.update(frame(0.016));

        let movable = hunter.get_one::<Movable>();
        assert_relative_eq!(movable.move_dir().x, -1.0, epsilon = 1e-4);

        hunter.set_position(Vec2::new(100.0, 0.0));
        world.update(frame(0.016));
        assert_eq!(hunter.get_one::<Movable>().move_dir(), Vec2::zeros());
        assert_relative_eq!(hunter.get_one::<Movable>().look_dir().x, -1.0, epsilon = 1e-4);
    }

    #[test]
    fn fires_only_while_on_screen() {
        let (world, _audio, _dir) = test_world();
        let hunter = enemy(&world);
        player_at(&world, Vec2::zeros());

        // Default viewport is 640x360 around the origin.
        hunter.set_position(Vec2::new(1000.0, 0.0));
        world.update(frame(0.016));
        assert!(!hunter.get_one::<Armament>().firing());

        hunter.set_position(Vec2::new(200.0, 0.0));
        world.update(frame(0.016));
        assert!(hunter.get_one::<Armament>().firing());
    }

    #[test]
    fn idles_without_players() {
        let (world, _audio, _dir) = test_world();
        let hunter = enemy(&world);
        hunter.get_one::<Movable>().set_move(Vec2::new(1.0, 0.0));
        hunter.get_one::<Armament>().set_firing(true);

        world.update(frame(0.016));

        assert_eq!(hunter.get_one::<Movable>().move_dir(), Vec2::zeros());
        assert!(!hunter.get_one::<Armament>().firing());
    }
}

//! Movement with acceleration-limited steering

use std::cell::Cell;

use nova_engine::prelude::*;

use crate::components::Player;

/// Moves the entity toward a desired direction and turns it toward a look
/// direction.
///
/// `velocity` is a unit-scale steering vector; the world-space displacement
/// is `velocity * speed * dt`. With the optional player tether the entity
/// cannot end a frame further than the tether distance from the furthest
/// other player.
pub struct Movable {
    entity: EntityRef,
    velocity: Cell<Vec2>,
    speed: Cell<f32>,
    acceleration: Cell<f32>,
    move_dir: Cell<Vec2>,
    look_dir: Cell<Vec2>,
    player_tether: Cell<Option<f32>>,
}

impl Movable {
    /// Movable with the given top speed and effectively instant steering.
    pub fn new(entity: &Entity, speed: f32) -> Self {
        Self {
            entity: entity.downgrade(),
            velocity: Cell::new(Vec2::zeros()),
            speed: Cell::new(speed),
            acceleration: Cell::new(1.0e9),
            move_dir: Cell::new(Vec2::zeros()),
            look_dir: Cell::new(Vec2::zeros()),
            player_tether: Cell::new(None),
        }
    }

    /// Set the steering acceleration, in velocity units per second.
    pub fn with_acceleration(self, acceleration: f32) -> Self {
        self.acceleration.set(acceleration);
        self
    }

    /// Set the initial move direction.
    pub fn with_move(self, move_dir: Vec2) -> Self {
        self.move_dir.set(move_dir);
        self
    }

    /// Set the initial look direction.
    pub fn with_look(self, look_dir: Vec2) -> Self {
        self.look_dir.set(look_dir);
        self
    }

    /// Keep the entity within `max_distance` of the furthest other player.
    pub fn with_player_tether(self, max_distance: f32) -> Self {
        self.player_tether.set(Some(max_distance));
        self
    }

    /// Desired movement direction.
    pub fn move_dir(&self) -> Vec2 {
        self.move_dir.get()
    }

    /// Steer toward a direction; length above 1 is normalized.
    pub fn set_move(&self, move_dir: Vec2) {
        self.move_dir.set(move_dir);
    }

    /// Desired look direction.
    pub fn look_dir(&self) -> Vec2 {
        self.look_dir.get()
    }

    /// Turn toward a direction; zero keeps the current facing.
    pub fn set_look(&self, look_dir: Vec2) {
        self.look_dir.set(look_dir);
    }

    /// Current steering velocity.
    pub fn velocity(&self) -> Vec2 {
        self.velocity.get()
    }

    /// Top speed in units per second.
    pub fn speed(&self) -> f32 {
        self.speed.get()
    }

    /// Change the top speed.
    pub fn set_speed(&self, speed: f32) {
        self.speed.set(speed);
    }

    fn update_velocity(&self, frame: FrameTime) {
        let mut move_dir = self.move_dir.get();
        if move_dir.norm() > 1.0 {
            move_dir = normalize_or_zero(move_dir);
        }

        let limit = self.acceleration.get() * frame.delta_seconds;
        let delta = move_dir - self.velocity.get();
        let step = Vec2::new(delta.x.clamp(-limit, limit), delta.y.clamp(-limit, limit));
        self.velocity.set(self.velocity.get() + step);
    }

    fn apply_tether(&self, entity: &Entity, frame: FrameTime, max_distance: f32) {
        let speed = self.speed.get();
        if frame.delta_seconds <= 0.0 || speed <= 0.0 {
            return;
        }

        let target = entity.position() + self.velocity.get() * speed * frame.delta_seconds;

        let furthest = entity
            .world()
            .entities()
            .into_iter()
            .filter(|other| other != entity)
            .filter(|other| other.get_one_or_default::<Player>().is_some())
            .max_by(|a, b| {
                (a.position() - target)
                    .norm()
                    .total_cmp(&(b.position() - target).norm())
            });

        let Some(furthest) = furthest else {
            return;
        };

        let distance = (furthest.position() - target).norm();
        if distance <= max_distance {
            return;
        }

        let clamped = furthest.position()
            + normalize_or_zero(target - furthest.position()) * max_distance;
        self.velocity
            .set((clamped - entity.position()) / speed / frame.delta_seconds);
    }
}

impl Updatable for Movable {
    fn update(&self, frame: FrameTime) {
        let entity = self.entity.get();

        self.update_velocity(frame);
        if let Some(max_distance) = self.player_tether.get() {
            self.apply_tether(&entity, frame, max_distance);
        }

        let look = self.look_dir.get();
        if look.norm() > 0.0 {
            entity.set_direction(normalize_or_zero(look));
        }

        entity.set_position(
            entity.position() + self.velocity.get() * self.speed.get() * frame.delta_seconds,
        );
    }
}

impl_component!(Movable: Updatable);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    use crate::test_util::{frame, test_world};

    fn movable_entity(world: &World, speed: f32, acceleration: f32) -> Entity {
        world.spawn(&EntityBlueprint::new(move |entity| {
            vec![Movable::new(entity, speed)
                .with_acceleration(acceleration)
                .into_component()]
        }))
    }

    #[test]
    fn instant_acceleration_moves_at_full_speed() {
        let (world, _audio, _dir) = test_world();
        let entity = movable_entity(&world, 100.0, 1.0e9);
        entity.get_one::<Movable>().set_move(Vec2::new(1.0, 0.0));

        entity.update(frame(0.5));

        assert_relative_eq!(entity.position().x, 50.0, epsilon = 1e-3);
        assert_relative_eq!(entity.position().y, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn acceleration_limits_the_steering_step() {
        let (world, _audio, _dir) = test_world();
        let entity = movable_entity(&world, 100.0, 1.0);
        entity.get_one::<Movable>().set_move(Vec2::new(1.0, 0.0));

        // One second at acceleration 1 reaches half the target velocity.
        entity.update(frame(0.5));
        assert_relative_eq!(entity.get_one::<Movable>().velocity().x, 0.5, epsilon = 1e-4);
    }

    #[test]
    fn oversized_move_input_is_normalized() {
        let (world, _audio, _dir) = test_world();
        let entity = movable_entity(&world, 100.0, 1.0e9);
        entity.get_one::<Movable>().set_move(Vec2::new(3.0, 4.0));

        entity.update(frame(1.0));

        assert_relative_eq!(entity.position().norm(), 100.0, epsilon = 1e-2);
    }

    #[test]
    fn zero_look_keeps_the_current_facing() {
        let (world, _audio, _dir) = test_world();
        let entity = movable_entity(&world, 100.0, 1.0e9);
        entity.set_direction(Vec2::new(1.0, 0.0));

        entity.update(frame(0.1));
        assert_eq!(entity.direction(), Vec2::new(1.0, 0.0));

        entity.get_one::<Movable>().set_look(Vec2::new(0.0, 2.0));
        entity.update(frame(0.1));
        assert_relative_eq!(entity.direction().y, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn tether_clamps_distance_to_the_other_player() {
        let (world, _audio, _dir) = test_world();

        let anchor = world.spawn(&EntityBlueprint::new(|entity| {
            vec![Player::new(entity).into_component()]
        }));
        anchor.set_position(Vec2::zeros());

        let runner = world.spawn(&EntityBlueprint::new(|entity| {
            vec![
                Player::new(entity).into_component(),
                Movable::new(entity, 100.0)
                    .with_player_tether(50.0)
                    .into_component(),
            ]
        }));
        runner.set_position(Vec2::new(49.0, 0.0));
        runner.get_one::<Movable>().set_move(Vec2::new(1.0, 0.0));

        for _ in 0..20 {
            world.update(frame(0.1));
        }

        assert!((runner.position() - anchor.position()).norm() <= 50.0 + 1e-3);
    }
}

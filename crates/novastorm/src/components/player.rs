//! Player stats and input application

use std::cell::Cell;

use nova_engine::prelude::*;

use crate::components::{Armament, Movable};

/// Per-player stats: energy, ammo with timed regeneration, experience.
pub struct Player {
    entity: EntityRef,
    max_energy: Cell<u32>,
    energy: Cell<u32>,
    max_ammo: Cell<u32>,
    ammo: Cell<u32>,
    regenerate_ammo_rate: Cell<f32>,
    ammo_counter: Cell<f32>,
    max_experience: Cell<u32>,
    experience: Cell<u32>,
}

impl Player {
    /// Player with full ammo and no regeneration.
    pub fn new(entity: &Entity) -> Self {
        Self {
            entity: entity.downgrade(),
            max_energy: Cell::new(100),
            energy: Cell::new(0),
            max_ammo: Cell::new(100),
            ammo: Cell::new(100),
            regenerate_ammo_rate: Cell::new(0.0),
            ammo_counter: Cell::new(0.0),
            max_experience: Cell::new(100),
            experience: Cell::new(0),
        }
    }

    /// Regenerate one ammo every `rate` seconds; 0 disables regeneration.
    pub fn with_ammo_regen(self, rate: f32) -> Self {
        self.regenerate_ammo_rate.set(rate);
        self
    }

    /// Current energy.
    pub fn energy(&self) -> u32 {
        self.energy.get()
    }

    /// Gain energy, clamped to the maximum.
    pub fn gain_energy(&self, amount: u32) {
        self.energy
            .set(self.energy.get().saturating_add(amount).min(self.max_energy.get()));
    }

    /// Current ammo.
    pub fn ammo(&self) -> u32 {
        self.ammo.get()
    }

    /// Set the current ammo directly, clamped to the maximum.
    pub fn set_ammo(&self, ammo: u32) {
        self.ammo.set(ammo.min(self.max_ammo.get()));
    }

    /// Gain ammo, clamped to the maximum.
    pub fn gain_ammo(&self, amount: u32) {
        self.ammo
            .set(self.ammo.get().saturating_add(amount).min(self.max_ammo.get()));
    }

    /// Spend ammo for a shot; returns false (spending nothing) when there
    /// is not enough.
    pub fn spend_ammo(&self, cost: u32) -> bool {
        if self.ammo.get() < cost {
            return false;
        }

        self.ammo.set(self.ammo.get() - cost);
        true
    }

    /// Current experience.
    pub fn experience(&self) -> u32 {
        self.experience.get()
    }

    /// Gain experience, clamped to the maximum.
    pub fn gain_experience(&self, amount: u32) {
        self.experience.set(
            self.experience
                .get()
                .saturating_add(amount)
                .min(self.max_experience.get()),
        );
    }
}

impl Updatable for Player {
    fn update(&self, frame: FrameTime) {
        let rate = self.regenerate_ammo_rate.get();
        if rate <= 0.0 {
            return;
        }

        self.ammo_counter
            .set(self.ammo_counter.get() + frame.delta_seconds);

        if self.ammo_counter.get() < rate {
            return;
        }

        self.ammo_counter.set(self.ammo_counter.get() - rate);
        self.gain_ammo(1);
    }
}

impl_component!(Player: Updatable);

/// Feed one frame of host input into an entity's movement and armament.
pub fn apply_input(entity: &Entity, input: PlayerInput) {
    if let Some(movable) = entity.get_one_or_default::<Movable>() {
        movable.set_move(input.move_dir);
        movable.set_look(input.look_dir);
    }

    if let Some(armament) = entity.get_one_or_default::<Armament>() {
        armament.set_firing(input.firing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{frame, test_world};

    #[test]
    fn ammo_regenerates_on_the_configured_interval() {
        let (world, _audio, _dir) = test_world();
        let entity = world.spawn(&EntityBlueprint::new(|entity| {
            let player = Player::new(entity).with_ammo_regen(0.5);
            player.set_ammo(0);
            vec![player.into_component()]
        }));

        let player = entity.get_one::<Player>();

        // Four 0.2s frames cross the 0.5s threshold once.
        for _ in 0..4 {
            entity.update(frame(0.2));
        }
        assert_eq!(player.ammo(), 1);

        entity.update(frame(0.2));
        assert_eq!(player.ammo(), 2);
    }

    #[test]
    fn stats_clamp_at_their_maximums() {
        let (world, _audio, _dir) = test_world();
        let entity = world.spawn(&EntityBlueprint::new(|entity| {
            vec![Player::new(entity).into_component()]
        }));

        let player = entity.get_one::<Player>();
        player.gain_ammo(1000);
        player.gain_energy(1000);
        player.gain_experience(1000);

        assert_eq!(player.ammo(), 100);
        assert_eq!(player.energy(), 100);
        assert_eq!(player.experience(), 100);
    }

    #[test]
    fn spend_ammo_refuses_partial_spends() {
        let (world, _audio, _dir) = test_world();
        let entity = world.spawn(&EntityBlueprint::new(|entity| {
            let player = Player::new(entity);
            player.set_ammo(2);
            vec![player.into_component()]
        }));

        let player = entity.get_one::<Player>();
        assert!(player.spend_ammo(2));
        assert!(!player.spend_ammo(1));
        assert_eq!(player.ammo(), 0);
    }

    #[test]
    fn apply_input_reaches_movement_and_armament() {
        let (world, _audio, _dir) = test_world();
        let entity = world.spawn(&EntityBlueprint::new(|entity| {
            vec![
                Movable::new(entity, 100.0).into_component(),
                Armament::new(entity, Vec::new()).into_component(),
            ]
        }));

        apply_input(
            &entity,
            PlayerInput {
                move_dir: Vec2::new(1.0, 0.0),
                look_dir: Vec2::new(0.0, 1.0),
                firing: true,
            },
        );

        assert_eq!(entity.get_one::<Movable>().move_dir(), Vec2::new(1.0, 0.0));
        assert!(entity.get_one::<Armament>().firing());
    }
}

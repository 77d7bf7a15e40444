//! Endless wave survival

use nova_engine::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::components::{Movable, Player};
use crate::databases::entities;

/// Survival mode: every interval, a wave of either asteroids or enemy
/// ships spawns on a ring outside the viewport. The first wave spawns
/// immediately; nothing spawns while no player is alive.
pub struct EndlessWave {
    rng: SmallRng,
    initialized: bool,
    since_last_wave: f32,
    wave_interval: f32,
    lives: u32,
}

impl EndlessWave {
    /// Mode spawning a wave every `wave_interval` seconds.
    pub fn new(wave_interval: f32) -> Self {
        Self {
            rng: SmallRng::from_entropy(),
            initialized: false,
            since_last_wave: 0.0,
            wave_interval,
            lives: 3,
        }
    }

    /// Use a deterministic spawn sequence.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Start with the given number of lives.
    pub fn with_lives(mut self, lives: u32) -> Self {
        self.lives = lives;
        self
    }

    /// Entry point on a ring outside the viewport, and an inward direction
    /// jittered by up to a quarter turn.
    fn object_path(&mut self, world: &World) -> (Vec2, Vec2) {
        let viewport = world.camera().viewport();
        let distance = viewport.width.max(viewport.height) * 0.75;

        let offset = rotate(
            Vec2::new(0.0, distance),
            self.rng.gen::<f32>() * std::f32::consts::TAU,
        );
        let direction = rotate(
            normalize_or_zero(-offset),
            (self.rng.gen::<f32>() - 0.5) * std::f32::consts::FRAC_PI_2,
        );

        (viewport.center() + offset, direction)
    }

    fn spawn_asteroids(&mut self, world: &World) {
        for _ in 0..3 {
            let (position, direction) = self.object_path(world);

            let entity = world.spawn(&entities::asteroid());
            entity.set_position(position);

            if let Some(movable) = entity.get_one_or_default::<Movable>() {
                movable.set_move(direction);
                movable.set_speed(self.rng.gen_range(2..5) as f32 * 50.0);
            }
        }
    }

    fn spawn_enemies(&mut self, world: &World) {
        for _ in 0..3 {
            let (position, _) = self.object_path(world);

            let entity = world.spawn(&entities::ship_enemy());
            entity.set_position(position);
        }
    }
}

impl GameMode for EndlessWave {
    fn update(&mut self, frame: FrameTime, world: &World) {
        if self.initialized {
            self.since_last_wave += frame.delta_seconds;

            if self.since_last_wave < self.wave_interval {
                return;
            }

            self.since_last_wave -= self.wave_interval;
        } else {
            self.initialized = true;
        }

        let any_player_alive = world
            .entities()
            .iter()
            .any(|entity| entity.get_one_or_default::<Player>().is_some());
        if !any_player_alive {
            return;
        }

        if self.rng.gen::<f32>() < 0.5 {
            self.spawn_asteroids(world);
        } else {
            self.spawn_enemies(world);
        }

        log::debug!("wave spawned, {} entities alive", world.entities().len());
    }

    fn lives(&self) -> u32 {
        self.lives
    }

    fn set_lives(&mut self, lives: u32) {
        self.lives = lives;
    }
}

//! Despawn policies

use std::cell::Cell;

use nova_engine::prelude::*;

/// Disposes the entity after a fixed lifetime (uncollected pickups).
pub struct DespawnAfter {
    entity: EntityRef,
    lifetime: f32,
    elapsed: Cell<f32>,
}

impl DespawnAfter {
    /// Dispose after `lifetime` seconds.
    pub fn new(entity: &Entity, lifetime: f32) -> Self {
        Self {
            entity: entity.downgrade(),
            lifetime,
            elapsed: Cell::new(0.0),
        }
    }
}

impl Updatable for DespawnAfter {
    fn update(&self, frame: FrameTime) {
        self.elapsed.set(self.elapsed.get() + frame.delta_seconds);

        if self.elapsed.get() >= self.lifetime {
            self.entity.get().dispose();
        }
    }
}

impl_component!(DespawnAfter: Updatable);

/// Disposes the entity once it strays far from the camera.
///
/// The limit is the larger viewport dimension measured from the viewport
/// center, leaving a generous margin beyond the visible edge so entities
/// drifting back in are not culled prematurely.
pub struct DespawnWhenOffscreen {
    entity: EntityRef,
}

impl DespawnWhenOffscreen {
    /// Offscreen despawner.
    pub fn new(entity: &Entity) -> Self {
        Self {
            entity: entity.downgrade(),
        }
    }
}

impl Updatable for DespawnWhenOffscreen {
    fn update(&self, _frame: FrameTime) {
        let entity = self.entity.get();
        let world = entity.world();
        let viewport = world.camera().viewport();

        let limit = viewport.width.max(viewport.height);
        if (entity.position() - viewport.center()).norm() > limit {
            entity.dispose();
        }
    }
}

impl_component!(DespawnWhenOffscreen: Updatable);

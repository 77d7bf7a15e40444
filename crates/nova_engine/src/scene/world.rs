//! World simulation
//!
//! The world owns the live entity set and drives the per-frame passes:
//! update, disposal cleanup, game-mode spawning, and drawing. Mutation
//! during iteration follows a strict snapshot-then-apply discipline:
//! the update pass walks a point-in-time snapshot, spawns append to the
//! live list immediately (visible to collision queries this frame but not
//! to the running snapshot), and disposals only set a flag swept at the
//! end of the pass.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use crate::audio::{AudioBackend, AudioInstance};
use crate::config::EngineConfig;
use crate::foundation::math::Vec2;
use crate::foundation::time::FrameTime;
use crate::render::Renderer;
use crate::scene::{Background, Camera, Entity, EntityBlueprint, GameMode};
use crate::settings::Settings;

pub(crate) struct WorldInner {
    entities: RefCell<Vec<Entity>>,
    effects: RefCell<Vec<Entity>>,
    sounds: RefCell<Vec<Box<dyn AudioInstance>>>,
    music: Option<Box<dyn AudioInstance>>,
    camera: RefCell<Camera>,
    background: Background,
    game_mode: RefCell<Box<dyn GameMode>>,
    paused: Cell<bool>,
    audio: Rc<dyn AudioBackend>,
    settings: Settings,
}

/// Handle to the world entities live in.
///
/// Clones share the same underlying world.
#[derive(Clone)]
pub struct World {
    inner: Rc<WorldInner>,
}

impl World {
    /// Create a world with its ambient subsystems.
    ///
    /// Starts the looping music (when configured) and subscribes to
    /// settings changes so running sound volumes follow the sliders.
    pub fn new(
        config: &EngineConfig,
        audio: Rc<dyn AudioBackend>,
        settings: Settings,
        game_mode: Box<dyn GameMode>,
    ) -> Self {
        let music = config.music.as_ref().and_then(|id| match audio.play_looping(id) {
            Ok(instance) => {
                instance.set_volume(settings.scaled_music_volume());
                Some(instance)
            }
            Err(err) => {
                log::warn!("music unavailable: {err}");
                None
            }
        });

        let world = Self {
            inner: Rc::new(WorldInner {
                entities: RefCell::new(Vec::new()),
                effects: RefCell::new(Vec::new()),
                sounds: RefCell::new(Vec::new()),
                music,
                camera: RefCell::new(Camera::new(
                    config.target_width as f32,
                    config.target_height as f32,
                )),
                background: Background::new(config.background_texture.clone()),
                game_mode: RefCell::new(game_mode),
                paused: Cell::new(false),
                audio,
                settings: settings.clone(),
            }),
        };

        let observed = Rc::downgrade(&world.inner);
        settings.subscribe(move || {
            if let Some(inner) = observed.upgrade() {
                if let Some(music) = &inner.music {
                    music.set_volume(inner.settings.scaled_music_volume());
                }
                for sound in inner.sounds.borrow().iter() {
                    sound.set_volume(inner.settings.scaled_sound_volume());
                }
            }
        });

        world
    }

    pub(crate) fn from_inner(inner: Rc<WorldInner>) -> Self {
        Self { inner }
    }

    /// Spawn an entity from a blueprint.
    ///
    /// The entity joins the live list immediately, so collision queries and
    /// spawn logic running later this frame already see it; the update pass
    /// in flight does not, since it iterates a snapshot.
    pub fn spawn(&self, blueprint: &EntityBlueprint) -> Entity {
        let entity = Entity::new(Rc::downgrade(&self.inner));
        self.inner.entities.borrow_mut().push(entity.clone());

        for component in blueprint.components_for(&entity) {
            entity.add(component);
        }

        entity
    }

    /// Spawn a short-lived visual effect at a position.
    ///
    /// Effect entities are not part of the gameplay set: they only draw, on
    /// top of every gameplay entity, and remove themselves once all their
    /// drawables report finished.
    pub fn spawn_effect(&self, blueprint: &EntityBlueprint, position: Vec2) -> Entity {
        let entity = Entity::new(Rc::downgrade(&self.inner));
        self.inner.effects.borrow_mut().push(entity.clone());

        for component in blueprint.components_for(&entity) {
            entity.add(component);
        }
        entity.set_position(position);

        entity
    }

    /// Play a sound at the current effect volume, tracking the instance
    /// for volume updates, pause, and pruning.
    pub fn play(&self, id: &str) {
        match self.inner.audio.play(id) {
            Ok(instance) => {
                instance.set_volume(self.inner.settings.scaled_sound_volume());
                self.inner.sounds.borrow_mut().push(instance);
            }
            Err(err) => log::warn!("{err}"),
        }
    }

    /// Advance the simulation by one frame. No-op while paused.
    pub fn update(&self, frame: FrameTime) {
        if self.paused() {
            return;
        }

        self.inner.sounds.borrow_mut().retain(|s| !s.is_stopped());

        let snapshot = self.entities();
        for entity in &snapshot {
            entity.update(frame);
        }

        self.inner.entities.borrow_mut().retain(|e| !e.disposed());

        // Last, so spawn decisions see the post-cleanup entity set.
        self.inner.game_mode.borrow_mut().update(frame, self);
    }

    /// Draw the world: background, then gameplay entities in spawn order
    /// (later spawns on top), then transient effects.
    pub fn draw(&self, frame: FrameTime, renderer: &mut dyn Renderer) {
        {
            let camera = self.inner.camera.borrow();
            self.inner.background.draw(renderer, &camera);
        }

        for entity in self.entities() {
            entity.prepare_draw(frame, renderer);
            entity.draw(renderer);
        }

        let snapshot = self.inner.effects.borrow().clone();
        let mut finished = Vec::new();
        for effect in snapshot {
            effect.prepare_draw(frame, renderer);

            let done = effect
                .components()
                .iter()
                .all(|c| c.as_drawable().map_or(true, |d| d.finished()));
            if done {
                finished.push(effect);
            } else {
                effect.draw(renderer);
            }
        }

        if !finished.is_empty() {
            self.inner
                .effects
                .borrow_mut()
                .retain(|e| !finished.contains(e));
        }
    }

    /// Snapshot of the live entities, in spawn order.
    pub fn entities(&self) -> Vec<Entity> {
        self.inner.entities.borrow().clone()
    }

    /// Whether the simulation is paused.
    pub fn paused(&self) -> bool {
        self.inner.paused.get()
    }

    /// Pause or resume the simulation, pausing tracked sound effects with
    /// it. Music keeps playing.
    pub fn set_paused(&self, paused: bool) {
        self.inner.paused.set(paused);

        for sound in self.inner.sounds.borrow().iter() {
            if paused {
                sound.pause();
            } else {
                sound.resume();
            }
        }
    }

    /// The camera the world is viewed through.
    pub fn camera(&self) -> Ref<'_, Camera> {
        self.inner.camera.borrow()
    }

    /// Recompute the camera for this frame's screen size and focus point.
    pub fn update_camera(&self, screen_size: Vec2, center: Vec2) {
        self.inner.camera.borrow_mut().update(screen_size, center);
    }

    /// Shared settings handle.
    pub fn settings(&self) -> Settings {
        self.inner.settings.clone()
    }

    /// Remaining lives, as tracked by the game mode.
    pub fn lives(&self) -> u32 {
        self.inner.game_mode.borrow().lives()
    }

    /// Grant an extra life.
    pub fn add_life(&self) {
        let mut mode = self.inner.game_mode.borrow_mut();
        let lives = mode.lives();
        mode.set_lives(lives + 1);
    }

    /// Number of tracked sound-effect instances (diagnostics).
    pub fn active_sound_count(&self) -> usize {
        self.inner.sounds.borrow().len()
    }

    /// Number of live transient effects (diagnostics).
    pub fn active_effect_count(&self) -> usize {
        self.inner.effects.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;
    use crate::impl_component;
    use crate::render::NullRenderer;
    use crate::scene::{Drawable, EntityRef, IntoComponent, Updatable};

    struct IdleMode;

    impl GameMode for IdleMode {
        fn update(&mut self, _frame: FrameTime, _world: &World) {}
    }

    struct CountingMode {
        seen: Rc<Cell<usize>>,
        lives: u32,
    }

    impl GameMode for CountingMode {
        fn update(&mut self, _frame: FrameTime, world: &World) {
            self.seen.set(world.entities().len());
        }

        fn lives(&self) -> u32 {
            self.lives
        }

        fn set_lives(&mut self, lives: u32) {
            self.lives = lives;
        }
    }

    struct DisposeSelf {
        entity: EntityRef,
    }

    impl Updatable for DisposeSelf {
        fn update(&self, _frame: FrameTime) {
            self.entity.get().dispose();
        }
    }

    impl_component!(DisposeSelf: Updatable);

    struct Witness {
        entity: EntityRef,
        seen: Cell<usize>,
        ticks: Cell<u32>,
    }

    impl Updatable for Witness {
        fn update(&self, _frame: FrameTime) {
            self.ticks.set(self.ticks.get() + 1);
            self.seen.set(self.entity.get().world().entities().len());
        }
    }

    impl_component!(Witness: Updatable);

    struct SpawnOnce {
        entity: EntityRef,
        spawned: Cell<bool>,
    }

    impl Updatable for SpawnOnce {
        fn update(&self, _frame: FrameTime) {
            if !self.spawned.get() {
                self.spawned.set(true);
                let world = self.entity.get().world();
                world.spawn(&witness_blueprint());
            }
        }
    }

    impl_component!(SpawnOnce: Updatable);

    struct OneFrameSprite {
        entity: EntityRef,
        prepared: Cell<bool>,
    }

    impl Drawable for OneFrameSprite {
        fn prepare_draw(&self, _frame: FrameTime, _renderer: &mut dyn Renderer) {
            self.prepared.set(true);
        }

        fn draw(&self, _renderer: &mut dyn Renderer) {}

        fn finished(&self) -> bool {
            self.prepared.get()
        }
    }

    impl_component!(OneFrameSprite: Drawable);

    fn witness_blueprint() -> EntityBlueprint {
        EntityBlueprint::new(|entity| {
            vec![Witness {
                entity: entity.downgrade(),
                seen: Cell::new(0),
                ticks: Cell::new(0),
            }
            .into_component()]
        })
    }

    fn test_world(mode: Box<dyn GameMode>) -> (World, Rc<NullAudio>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let audio = Rc::new(NullAudio::new());
        let settings = Settings::open(dir.path().join("settings.bin"));
        let world = World::new(&EngineConfig::default(), audio.clone(), settings, mode);
        (world, audio, dir)
    }

    fn frame() -> FrameTime {
        FrameTime::from_delta(1.0 / 60.0)
    }

    #[test]
    fn disposed_entity_stays_visible_until_pass_end() {
        let (world, _audio, _dir) = test_world(Box::new(IdleMode));

        world.spawn(&EntityBlueprint::new(|entity| {
            vec![DisposeSelf {
                entity: entity.downgrade(),
            }
            .into_component()]
        }));
        let witness = world.spawn(&witness_blueprint());

        world.update(frame());

        // The witness updates after the disposer and still saw both.
        let observed = witness.get_one::<Witness>();
        assert_eq!(observed.seen.get(), 2);
        assert_eq!(world.entities().len(), 1);
    }

    #[test]
    fn entities_spawned_during_update_join_the_next_pass() {
        let (world, _audio, _dir) = test_world(Box::new(IdleMode));

        world.spawn(&EntityBlueprint::new(|entity| {
            vec![SpawnOnce {
                entity: entity.downgrade(),
                spawned: Cell::new(false),
            }
            .into_component()]
        }));

        world.update(frame());
        assert_eq!(world.entities().len(), 2);
        let spawned = world.entities().remove(1);
        assert_eq!(spawned.get_one::<Witness>().ticks.get(), 0);

        world.update(frame());
        assert_eq!(spawned.get_one::<Witness>().ticks.get(), 1);
    }

    #[test]
    fn game_mode_runs_after_disposal_cleanup() {
        let seen = Rc::new(Cell::new(usize::MAX));
        let (world, _audio, _dir) = test_world(Box::new(CountingMode {
            seen: seen.clone(),
            lives: 0,
        }));

        world.spawn(&EntityBlueprint::new(|entity| {
            vec![DisposeSelf {
                entity: entity.downgrade(),
            }
            .into_component()]
        }));

        world.update(frame());
        assert_eq!(seen.get(), 0);
    }

    #[test]
    fn paused_world_does_not_update() {
        let (world, _audio, _dir) = test_world(Box::new(IdleMode));
        let witness = world.spawn(&witness_blueprint());

        world.set_paused(true);
        world.update(frame());
        assert_eq!(witness.get_one::<Witness>().ticks.get(), 0);

        world.set_paused(false);
        world.update(frame());
        assert_eq!(witness.get_one::<Witness>().ticks.get(), 1);
    }

    #[test]
    fn stopped_sounds_are_pruned() {
        let (world, audio, _dir) = test_world(Box::new(IdleMode));

        audio.set_auto_stop(true);
        world.play("Bullet");
        world.play("Hit");
        assert_eq!(world.active_sound_count(), 2);

        world.update(frame());
        assert_eq!(world.active_sound_count(), 0);
        assert_eq!(audio.play_count("Bullet"), 1);
    }

    #[test]
    fn finished_effects_self_remove_after_drawing() {
        let (world, _audio, _dir) = test_world(Box::new(IdleMode));
        let mut renderer = NullRenderer::new();

        world.spawn_effect(
            &EntityBlueprint::new(|entity| {
                vec![OneFrameSprite {
                    entity: entity.downgrade(),
                    prepared: Cell::new(false),
                }
                .into_component()]
            }),
            Vec2::new(10.0, 10.0),
        );
        assert_eq!(world.active_effect_count(), 1);

        world.draw(frame(), &mut renderer);
        assert_eq!(world.active_effect_count(), 0);
    }

    #[test]
    fn lives_are_proxied_to_the_game_mode() {
        let (world, _audio, _dir) = test_world(Box::new(CountingMode {
            seen: Rc::new(Cell::new(0)),
            lives: 2,
        }));

        assert_eq!(world.lives(), 2);
        world.add_life();
        assert_eq!(world.lives(), 3);
    }
}

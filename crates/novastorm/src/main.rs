//! Novastorm headless runner
//!
//! Drives the endless wave mode with a scripted player for a fixed
//! stretch of simulated time. Rendering goes to the null renderer; audio
//! uses rodio when the `rodio-audio` feature is enabled and an output
//! device exists, and stays silent otherwise.

use std::rc::Rc;

use nova_engine::prelude::*;

use novastorm::components::{apply_input, Player};
use novastorm::databases::entities;
use novastorm::modes::EndlessWave;

const SIMULATED_SECONDS: f32 = 60.0;
const STEP_SECONDS: f32 = 1.0 / 60.0;

fn open_audio() -> Rc<dyn AudioBackend> {
    #[cfg(feature = "rodio-audio")]
    match nova_engine::audio::rodio_backend::RodioAudio::new("assets/audio") {
        Ok(audio) => return Rc::new(audio),
        Err(err) => log::warn!("falling back to silent audio: {err}"),
    }

    Rc::new(NullAudio::new())
}

fn settings_path() -> std::path::PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("novastorm/settings.bin"))
        .unwrap_or_else(|| "settings.bin".into())
}

fn main() {
    env_logger::init();

    let config = EngineConfig::load_or_default("novastorm.toml");
    let settings = Settings::open(settings_path());
    let world = World::new(
        &config,
        open_audio(),
        settings,
        Box::new(EndlessWave::new(5.0)),
    );

    let ship = world.spawn(&entities::ship_player());
    log::info!("player ship spawned");

    let screen_size = Vec2::new(config.target_width as f32, config.target_height as f32);
    let mut renderer = NullRenderer::new();
    let steps = (SIMULATED_SECONDS / STEP_SECONDS) as u32;

    for step in 0..steps {
        let total_seconds = step as f32 * STEP_SECONDS;
        let frame = FrameTime {
            delta_seconds: STEP_SECONDS,
            total_seconds,
        };

        // Scripted input: circle slowly while holding the trigger.
        let angle = total_seconds * 0.5;
        apply_input(
            &ship,
            PlayerInput {
                move_dir: Vec2::new(angle.cos(), angle.sin()),
                look_dir: Vec2::new(angle.cos(), angle.sin()),
                firing: true,
            },
        );

        world.update(frame);
        world.update_camera(screen_size, ship.position());
        world.draw(frame, &mut renderer);

        if ship.disposed() {
            log::info!("player ship destroyed at t={total_seconds:.1}s");
            break;
        }

        if step % (10 * 60) == 0 {
            let ammo = ship.get_one::<Player>().ammo();
            log::info!(
                "t={total_seconds:>5.1}s entities={} lives={} ammo={ammo}",
                world.entities().len(),
                world.lives(),
            );
        }
    }

    log::info!(
        "simulation finished: {} entities, {} sprites drawn",
        world.entities().len(),
        renderer.draw_count()
    );
}

//! # Nova Engine
//!
//! A small single-threaded 2D game engine built around a capability-based
//! entity/component runtime.
//!
//! ## Features
//!
//! - **Capability Components**: Behavior via [`scene::Updatable`],
//!   [`scene::Drawable`], [`scene::CollisionReactive`], and
//!   [`scene::DeathReactive`] capability queries
//! - **Snapshot Simulation**: Deterministic update, cleanup, and spawn
//!   ordering under mid-frame mutation
//! - **Pluggable Backends**: Rendering and audio behind narrow traits, with
//!   null backends for tests and headless runs
//! - **Persisted Settings**: Observable volume settings shared between the
//!   world and the host
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::rc::Rc;
//! use nova_engine::prelude::*;
//!
//! struct MyMode;
//!
//! impl GameMode for MyMode {
//!     fn update(&mut self, _frame: FrameTime, _world: &World) {}
//! }
//!
//! let config = EngineConfig::default();
//! let settings = Settings::open("settings.bin");
//! let world = World::new(&config, Rc::new(NullAudio::new()), settings, Box::new(MyMode));
//!
//! let mut clock = FrameClock::new();
//! loop {
//!     let frame = clock.tick();
//!     world.update(frame);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod audio;
pub mod config;
pub mod foundation;
pub mod input;
pub mod render;
pub mod scene;
pub mod settings;

/// Commonly used engine types.
pub mod prelude {
    pub use crate::audio::{AudioBackend, AudioInstance, NullAudio};
    pub use crate::config::{Config, EngineConfig};
    pub use crate::foundation::math::{facing_angle, normalize_or_zero, rotate, Mat3, Vec2};
    pub use crate::foundation::time::{FrameClock, FrameTime};
    pub use crate::input::PlayerInput;
    pub use crate::render::{Color, NullRenderer, Rect, Renderer, TextureHandle};
    pub use crate::scene::{
        CollisionReactive, Component, DeathReactive, Drawable, Entity, EntityBlueprint, EntityRef,
        GameMode, IntoComponent, Updatable, World,
    };
    pub use crate::settings::Settings;
    pub use crate::impl_component;
}

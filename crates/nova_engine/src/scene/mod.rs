//! Scene graph: entities, components, and the world simulation loop
//!
//! The runtime is a capability-based entity/component model rather than a
//! data-oriented ECS: an [`Entity`] owns an ordered set of heterogeneous
//! components, and behavior is queried per capability ([`Updatable`],
//! [`Drawable`], [`CollisionReactive`], [`DeathReactive`]). Everything is
//! single-threaded; shared handles use `Rc` and component state uses
//! `Cell`/`RefCell` interior mutability.

pub mod background;
pub mod blueprint;
pub mod camera;
pub mod component;
pub mod entity;
pub mod mode;
pub mod world;

pub use background::Background;
pub use blueprint::EntityBlueprint;
pub use camera::Camera;
pub use component::{
    CollisionReactive, Component, DeathReactive, Drawable, IntoComponent, Updatable,
};
pub use entity::{Entity, EntityRef};
pub use mode::GameMode;
pub use world::World;

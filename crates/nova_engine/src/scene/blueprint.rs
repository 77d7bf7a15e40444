//! Declarative entity blueprints
//!
//! A blueprint is a reusable recipe for an entity's initial component set.
//! The builder closure receives the freshly allocated, still componentless
//! entity so components can close over a back-reference to the entity being
//! built (self-targeting defaults, weapon owners, and so on).

use std::rc::Rc;

use crate::scene::{Component, Entity};

type BuildFn = dyn Fn(&Entity) -> Vec<Rc<dyn Component>>;

/// Recipe for spawning an entity.
#[derive(Clone, Default)]
pub struct EntityBlueprint {
    build: Option<Rc<BuildFn>>,
}

impl EntityBlueprint {
    /// Blueprint building the given component set.
    pub fn new(build: impl Fn(&Entity) -> Vec<Rc<dyn Component>> + 'static) -> Self {
        Self {
            build: Some(Rc::new(build)),
        }
    }

    /// Blueprint producing an empty shell (used for transient effects).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Run the builder against a freshly allocated entity.
    pub(crate) fn components_for(&self, entity: &Entity) -> Vec<Rc<dyn Component>> {
        match &self.build {
            Some(build) => build(entity),
            None => Vec::new(),
        }
    }
}

//! Component trait and capability interfaces
//!
//! A component is the unit of behavior attached to an entity. Concrete
//! components implement any subset of the four capability traits; the
//! [`Component`] trait exposes them through `as_*` accessors so the entity
//! can filter its component set by capability without knowing concrete
//! types. The [`impl_component!`](crate::impl_component) macro wires the
//! boilerplate.

use std::any::Any;
use std::rc::Rc;

use crate::foundation::time::FrameTime;
use crate::render::Renderer;
use crate::scene::Entity;

/// Capability for components that run logic once per simulation frame.
pub trait Updatable {
    /// Advance the component by one frame.
    fn update(&self, frame: FrameTime);
}

/// Capability for components that render.
///
/// Drawing is two-phase: [`prepare_draw`](Drawable::prepare_draw) advances
/// animation state and performs lazy resource loads, then
/// [`draw`](Drawable::draw) issues the actual sprite.
pub trait Drawable {
    /// Advance animation and load resources before drawing.
    fn prepare_draw(&self, frame: FrameTime, renderer: &mut dyn Renderer);

    /// Draw the component.
    fn draw(&self, renderer: &mut dyn Renderer);

    /// Whether a one-shot animation has played through. Transient effect
    /// entities are removed once every drawable reports `true`.
    fn finished(&self) -> bool {
        false
    }
}

/// Capability for components notified when their entity collides.
pub trait CollisionReactive {
    /// Called once per overlapping entity per geometric check.
    fn on_collision(&self, other: &Entity);
}

/// Capability for components notified when their entity dies.
///
/// Fired before the entity is disposed, so reactions still observe the
/// dying entity's full state.
pub trait DeathReactive {
    /// Called when the owning entity's health reaches zero.
    fn on_death(&self);
}

/// Base trait for all components.
///
/// Every component carries a non-owning back-reference to the entity that
/// holds it, set at construction and immutable thereafter. The `as_*`
/// methods return `None` by default; implement them (or use
/// [`impl_component!`](crate::impl_component)) to advertise capabilities.
pub trait Component: Any {
    /// The entity this component is attached to.
    ///
    /// # Panics
    /// Panics if the owning entity no longer exists; components must not be
    /// used past their entity's lifetime.
    fn entity(&self) -> Entity;

    /// Upcast for typed queries.
    fn as_any(&self) -> &dyn Any;

    /// Upcast a shared handle for typed queries.
    fn into_any(self: Rc<Self>) -> Rc<dyn Any>;

    /// The [`Updatable`] capability, if implemented.
    fn as_updatable(&self) -> Option<&dyn Updatable> {
        None
    }

    /// The [`Drawable`] capability, if implemented.
    fn as_drawable(&self) -> Option<&dyn Drawable> {
        None
    }

    /// The [`CollisionReactive`] capability, if implemented.
    fn as_collision_reactive(&self) -> Option<&dyn CollisionReactive> {
        None
    }

    /// The [`DeathReactive`] capability, if implemented.
    fn as_death_reactive(&self) -> Option<&dyn DeathReactive> {
        None
    }
}

/// Convenience coercion used by entity blueprints.
pub trait IntoComponent {
    /// Wrap the component into the shared handle the entity stores.
    fn into_component(self) -> Rc<dyn Component>;
}

impl<T: Component> IntoComponent for T {
    fn into_component(self) -> Rc<dyn Component> {
        Rc::new(self)
    }
}

/// Implements [`Component`] for a struct with an `entity: EntityRef` field.
///
/// Capabilities are listed after a colon and must already be implemented on
/// the type:
///
/// ```ignore
/// impl_component!(HealthComponent);
/// impl_component!(MovableComponent: Updatable);
/// impl_component!(InventoryComponent: Updatable, CollisionReactive);
/// ```
#[macro_export]
macro_rules! impl_component {
    ($ty:ty $(: $($cap:ident),+ $(,)?)?) => {
        impl $crate::scene::Component for $ty {
            fn entity(&self) -> $crate::scene::Entity {
                self.entity.get()
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn into_any(self: ::std::rc::Rc<Self>) -> ::std::rc::Rc<dyn ::std::any::Any> {
                self
            }

            $($($crate::impl_component!(@cap $cap);)+)?
        }
    };
    (@cap Updatable) => {
        fn as_updatable(&self) -> Option<&dyn $crate::scene::Updatable> {
            Some(self)
        }
    };
    (@cap Drawable) => {
        fn as_drawable(&self) -> Option<&dyn $crate::scene::Drawable> {
            Some(self)
        }
    };
    (@cap CollisionReactive) => {
        fn as_collision_reactive(&self) -> Option<&dyn $crate::scene::CollisionReactive> {
            Some(self)
        }
    };
    (@cap DeathReactive) => {
        fn as_death_reactive(&self) -> Option<&dyn $crate::scene::DeathReactive> {
            Some(self)
        }
    };
}

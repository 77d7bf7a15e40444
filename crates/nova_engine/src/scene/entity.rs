//! Entity implementation
//!
//! An [`Entity`] is a cheap-to-clone, reference-stable handle to a
//! capability container living in a [`World`](crate::scene::World). The
//! entity exclusively owns its components; components hold a weak
//! [`EntityRef`] back to their owner, so no ownership cycles exist.

use std::any::type_name;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::foundation::math::Vec2;
use crate::foundation::time::FrameTime;
use crate::render::Renderer;
use crate::scene::world::WorldInner;
use crate::scene::{Component, World};

pub(crate) struct EntityInner {
    world: Weak<WorldInner>,
    position: Cell<Vec2>,
    direction: Cell<Vec2>,
    disposed: Cell<bool>,
    components: RefCell<Vec<Rc<dyn Component>>>,
}

/// Handle to an entity in the world.
///
/// Clones share the same underlying entity; equality is handle identity.
#[derive(Clone)]
pub struct Entity {
    inner: Rc<EntityInner>,
}

impl Entity {
    pub(crate) fn new(world: Weak<WorldInner>) -> Self {
        Self {
            inner: Rc::new(EntityInner {
                world,
                position: Cell::new(Vec2::zeros()),
                direction: Cell::new(Vec2::new(0.0, -1.0)),
                disposed: Cell::new(false),
                components: RefCell::new(Vec::new()),
            }),
        }
    }

    /// The world the entity lives in.
    ///
    /// # Panics
    /// Panics if the world no longer exists; entities must not be used past
    /// their world's lifetime.
    pub fn world(&self) -> World {
        match self.inner.world.upgrade() {
            Some(world) => World::from_inner(world),
            None => panic!("entity outlived its world"),
        }
    }

    /// Create a weak back-reference for a component.
    pub fn downgrade(&self) -> EntityRef {
        EntityRef(Rc::downgrade(&self.inner))
    }

    /// Position of the entity in world space.
    pub fn position(&self) -> Vec2 {
        self.inner.position.get()
    }

    /// Move the entity.
    pub fn set_position(&self, position: Vec2) {
        self.inner.position.set(position);
    }

    /// Facing direction of the entity (unit vector, defaults to up).
    pub fn direction(&self) -> Vec2 {
        self.inner.direction.get()
    }

    /// Turn the entity.
    pub fn set_direction(&self, direction: Vec2) {
        self.inner.direction.set(direction);
    }

    /// Whether the entity has been disposed. Disposed entities stay in the
    /// world's live list until the end of the current update pass.
    pub fn disposed(&self) -> bool {
        self.inner.disposed.get()
    }

    /// Mark the entity for removal at the end of the current update pass.
    pub fn dispose(&self) {
        self.inner.disposed.set(true);
    }

    /// Attach a component.
    ///
    /// A no-op when the component's back-reference does not point at this
    /// entity or the component is already attached.
    pub fn add(&self, component: Rc<dyn Component>) {
        if component.entity() != *self {
            return;
        }

        let mut components = self.inner.components.borrow_mut();
        if components.iter().any(|c| same_component(c, component.as_ref())) {
            return;
        }

        components.push(component);
    }

    /// Get exactly one component of the given type.
    ///
    /// # Panics
    /// Panics when zero or more than one component matches; callers must
    /// know statically that the type is singular on this entity.
    pub fn get_one<T: Component>(&self) -> Rc<T> {
        match self.get_one_or_default::<T>() {
            Some(component) => component,
            None => panic!("no component of type {} on entity", type_name::<T>()),
        }
    }

    /// Get one component of the given type, or `None` when absent.
    ///
    /// # Panics
    /// Panics when more than one component matches.
    pub fn get_one_or_default<T: Component>(&self) -> Option<Rc<T>> {
        let mut matches = self.get_all::<T>();
        match matches.len() {
            0 => None,
            1 => Some(matches.remove(0)),
            _ => panic!("multiple components of type {} on entity", type_name::<T>()),
        }
    }

    /// Get all components of the given type, in attach order.
    ///
    /// Returns a snapshot: the result stays valid while the component set
    /// mutates underneath it.
    pub fn get_all<T: Component>(&self) -> Vec<Rc<T>> {
        self.inner
            .components
            .borrow()
            .iter()
            .filter_map(|component| Rc::clone(component).into_any().downcast::<T>().ok())
            .collect()
    }

    /// Snapshot of every attached component, in attach order.
    ///
    /// Capability filtering happens at the call site through the
    /// [`Component::as_updatable`]-style accessors.
    pub fn components(&self) -> Vec<Rc<dyn Component>> {
        self.inner.components.borrow().clone()
    }

    /// Detach a component by identity.
    pub fn remove(&self, component: &dyn Component) {
        self.inner
            .components
            .borrow_mut()
            .retain(|c| !same_component(c, component));
    }

    /// Detach every component of the given type.
    pub fn remove_all<T: Component>(&self) {
        self.inner
            .components
            .borrow_mut()
            .retain(|c| !c.as_any().is::<T>());
    }

    /// Update every [`Updatable`](crate::scene::Updatable) component, in
    /// attach order. Iterates a snapshot, so callbacks may freely add or
    /// remove components.
    pub fn update(&self, frame: FrameTime) {
        for component in self.components() {
            if let Some(updatable) = component.as_updatable() {
                updatable.update(frame);
            }
        }
    }

    /// First draw phase: advance animation and load resources.
    pub fn prepare_draw(&self, frame: FrameTime, renderer: &mut dyn Renderer) {
        for component in self.components() {
            if let Some(drawable) = component.as_drawable() {
                drawable.prepare_draw(frame, renderer);
            }
        }
    }

    /// Second draw phase: issue sprites, in attach order.
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        for component in self.components() {
            if let Some(drawable) = component.as_drawable() {
                drawable.draw(renderer);
            }
        }
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Entity {}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("position", &self.position())
            .field("disposed", &self.disposed())
            .field("components", &self.inner.components.borrow().len())
            .finish()
    }
}

/// Weak back-reference from a component to its owning entity.
pub struct EntityRef(Weak<EntityInner>);

impl EntityRef {
    /// Upgrade to the owning entity.
    ///
    /// # Panics
    /// Panics when the entity no longer exists; a component must never be
    /// used past its entity's lifetime.
    pub fn get(&self) -> Entity {
        match self.0.upgrade() {
            Some(inner) => Entity { inner },
            None => panic!("component back-reference to a dropped entity"),
        }
    }
}

/// Pointer-identity comparison ignoring vtable metadata.
fn same_component(a: &Rc<dyn Component>, b: &dyn Component) -> bool {
    std::ptr::eq(
        Rc::as_ptr(a).cast::<()>(),
        (b as *const dyn Component).cast::<()>(),
    )
}

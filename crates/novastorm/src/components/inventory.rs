//! Item pickup and effect application

use std::cell::RefCell;
use std::rc::Rc;

use nova_engine::prelude::*;

use crate::components::Item;

/// Picks up item entities on contact and applies the collected items every
/// frame until each reports itself finished.
pub struct Inventory {
    entity: EntityRef,
    items: RefCell<Vec<Rc<Item>>>,
}

impl Inventory {
    /// Empty inventory.
    pub fn new(entity: &Entity) -> Self {
        Self {
            entity: entity.downgrade(),
            items: RefCell::new(Vec::new()),
        }
    }

    /// Snapshot of the held items, in pickup order.
    pub fn items(&self) -> Vec<Rc<Item>> {
        self.items.borrow().clone()
    }
}

impl Updatable for Inventory {
    fn update(&self, frame: FrameTime) {
        let entity = self.entity.get();
        let snapshot = self.items();
        let mut finished: Vec<Rc<Item>> = Vec::new();

        for item in &snapshot {
            if item.apply_effect(&entity, frame) {
                finished.push(Rc::clone(item));
            }
        }

        if !finished.is_empty() {
            self.items
                .borrow_mut()
                .retain(|item| !finished.iter().any(|f| Rc::ptr_eq(f, item)));
        }
    }
}

impl CollisionReactive for Inventory {
    fn on_collision(&self, other: &Entity) {
        let Some(item) = other.get_one_or_default::<Item>() else {
            return;
        };

        let entity = self.entity.get();
        entity.world().play(item.pickup_sound());
        self.items.borrow_mut().push(item);
        other.dispose();
    }
}

impl_component!(Inventory: Updatable, CollisionReactive);

//! Weapon carrier

use std::cell::{Cell, Ref, RefCell};

use nova_engine::prelude::*;

use crate::weapon::Weapon;

/// Lets an entity carry and fire weapons.
///
/// All weapons fire together while the trigger is held; each fire sound is
/// played once per frame no matter how many weapons produced it.
pub struct Armament {
    entity: EntityRef,
    weapons: RefCell<Vec<Weapon>>,
    firing: Cell<bool>,
}

impl Armament {
    /// Armament carrying the given weapons.
    pub fn new(entity: &Entity, weapons: Vec<Weapon>) -> Self {
        Self {
            entity: entity.downgrade(),
            weapons: RefCell::new(weapons),
            firing: Cell::new(false),
        }
    }

    /// Borrow the carried weapons.
    pub fn weapons(&self) -> Ref<'_, Vec<Weapon>> {
        self.weapons.borrow()
    }

    /// Whether the trigger is held.
    pub fn firing(&self) -> bool {
        self.firing.get()
    }

    /// Hold or release the trigger.
    pub fn set_firing(&self, firing: bool) {
        self.firing.set(firing);
    }
}

impl Updatable for Armament {
    fn update(&self, frame: FrameTime) {
        for weapon in self.weapons.borrow().iter() {
            weapon.tick(frame);
        }

        if !self.firing.get() {
            return;
        }

        let entity = self.entity.get();
        let mut sounds: Vec<&'static str> = Vec::new();

        for weapon in self.weapons.borrow().iter() {
            if let Some(sound) = weapon.attack(&entity) {
                if !sounds.contains(&sound) {
                    sounds.push(sound);
                }
            }
        }

        let world = entity.world();
        for sound in sounds {
            world.play(sound);
        }
    }
}

impl_component!(Armament: Updatable);

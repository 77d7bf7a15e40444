//! Items and their effects
//!
//! An item entity carries an [`Item`] component describing one effect.
//! After pickup the component lives on in the collector's
//! [`Inventory`](crate::components::Inventory), which applies it every
//! frame until the effect reports itself finished. Instant effects finish
//! on the first application; stacking effects activate once per kind and
//! later pickups of the same kind pour their duration into the active
//! instance instead.

use std::cell::{Cell, RefCell};
use std::f32::consts::{FRAC_PI_2, PI};
use std::rc::Rc;

use nova_engine::prelude::*;

use crate::components::{Armament, Health, Inventory, Player, SpriteSheet};
use crate::databases::rarities::Rarity;
use crate::databases::{rarities, sprite_sheets};
use crate::weapon::{MountTag, WeaponMount};

/// Kinds of timed stacking effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackingKind {
    /// Invincibility with a shield overlay sprite.
    Shield,

    /// Mirrors every fixed weapon mount backwards.
    GunBack,

    /// Mirrors every fixed weapon mount to both sides.
    GunSide,
}

/// What an item does when applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemEffect {
    /// Restore health, scaled up by rarity.
    Health {
        /// Amount restored at common rarity.
        base_amount: u32,
    },

    /// Restore ammo, scaled up by rarity.
    Ammo {
        /// Amount restored at common rarity.
        base_amount: u32,
    },

    /// Restore energy, scaled up by rarity.
    Energy {
        /// Amount restored at common rarity.
        base_amount: u32,
    },

    /// Grant experience, scaled up by rarity.
    Experience {
        /// Amount granted at common rarity.
        base_amount: u32,
    },

    /// Grant an extra life.
    Life,

    /// Timed stacking effect.
    Stacking {
        /// Which stacking effect.
        kind: StackingKind,

        /// Duration in seconds at common rarity.
        base_duration: f32,
    },
}

enum StackState {
    Pending,
    Active {
        remaining: Cell<f32>,
        shield_sprite: Option<Rc<SpriteSheet>>,
    },
}

/// Item component attached to pickup entities.
pub struct Item {
    entity: EntityRef,
    rarity: Cell<Rarity>,
    pickup_sound: &'static str,
    effect: ItemEffect,
    stack_state: RefCell<StackState>,
}

impl Item {
    /// Item with the given effect at common rarity.
    pub fn new(entity: &Entity, pickup_sound: &'static str, effect: ItemEffect) -> Self {
        Self {
            entity: entity.downgrade(),
            rarity: Cell::new(rarities::COMMON),
            pickup_sound,
            effect,
            stack_state: RefCell::new(StackState::Pending),
        }
    }

    /// Current rarity.
    pub fn rarity(&self) -> Rarity {
        self.rarity.get()
    }

    /// Re-roll the rarity, tinting the pickup entity's sprites to match.
    /// Only meaningful before pickup.
    pub fn set_rarity(&self, rarity: Rarity) {
        self.rarity.set(rarity);

        for sprite in self.entity.get().get_all::<SpriteSheet>() {
            sprite.set_tint(Some(rarity.color));
        }
    }

    /// Sound played when the item is collected.
    pub fn pickup_sound(&self) -> &'static str {
        self.pickup_sound
    }

    /// The stacking kind, for stacking items.
    pub fn stacking_kind(&self) -> Option<StackingKind> {
        match self.effect {
            ItemEffect::Stacking { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Remaining active duration, for stacking items that have activated.
    pub fn remaining_duration(&self) -> Option<f32> {
        match &*self.stack_state.borrow() {
            StackState::Active { remaining, .. } => Some(remaining.get()),
            StackState::Pending => None,
        }
    }

    /// Pour extra duration into an already-active stacking item.
    pub fn add_duration(&self, seconds: f32) {
        if let StackState::Active { remaining, .. } = &*self.stack_state.borrow() {
            remaining.set(remaining.get() + seconds);
        }
    }

    /// Rarity-scaled amount for instant effects: `base / chance`.
    fn scaled_amount(&self, base: u32) -> u32 {
        (base as f32 / self.rarity.get().chance) as u32
    }

    /// Rarity-scaled duration for stacking effects:
    /// `base * sqrt(1 / chance)`.
    fn scaled_duration(&self, base: f32) -> f32 {
        base * (1.0 / self.rarity.get().chance).sqrt()
    }

    /// Apply the effect to its holder for one frame.
    ///
    /// Returns true when the effect is spent and the item should leave the
    /// inventory.
    pub fn apply_effect(&self, holder: &Entity, frame: FrameTime) -> bool {
        match self.effect {
            ItemEffect::Health { base_amount } => {
                if let Some(health) = holder.get_one_or_default::<Health>() {
                    health.heal(self.scaled_amount(base_amount));
                }
                true
            }
            ItemEffect::Ammo { base_amount } => {
                if let Some(player) = holder.get_one_or_default::<Player>() {
                    player.gain_ammo(self.scaled_amount(base_amount));
                }
                true
            }
            ItemEffect::Energy { base_amount } => {
                if let Some(player) = holder.get_one_or_default::<Player>() {
                    player.gain_energy(self.scaled_amount(base_amount));
                }
                true
            }
            ItemEffect::Experience { base_amount } => {
                if let Some(player) = holder.get_one_or_default::<Player>() {
                    player.gain_experience(self.scaled_amount(base_amount));
                }
                true
            }
            ItemEffect::Life => {
                holder.world().add_life();
                true
            }
            ItemEffect::Stacking {
                kind,
                base_duration,
            } => self.apply_stacking(holder, frame, kind, base_duration),
        }
    }

    fn apply_stacking(
        &self,
        holder: &Entity,
        frame: FrameTime,
        kind: StackingKind,
        base_duration: f32,
    ) -> bool {
        if matches!(*self.stack_state.borrow(), StackState::Active { .. }) {
            return self.tick_active(holder, frame, kind);
        }

        let inventory = holder.get_one::<Inventory>();
        let Some(instance) = inventory
            .items()
            .into_iter()
            .find(|item| item.stacking_kind() == Some(kind))
        else {
            panic!("stacking item applied outside its holder's inventory");
        };

        if !std::ptr::eq(Rc::as_ptr(&instance), self) {
            // An earlier pickup of this kind is already running; pour our
            // duration into it and finish immediately.
            instance.add_duration(self.scaled_duration(base_duration));
            return true;
        }

        self.activate(holder, kind, base_duration);
        false
    }

    fn activate(&self, holder: &Entity, kind: StackingKind, base_duration: f32) {
        let mut shield_sprite = None;

        match kind {
            StackingKind::Shield => {
                let sprite = Rc::new(SpriteSheet::new(holder, sprite_sheets::EFFECT_SHIELD));
                holder.add(sprite.clone());
                holder.world().play("ShieldOn");

                if let Some(health) = holder.get_one_or_default::<Health>() {
                    health.set_invincible(true);
                }

                shield_sprite = Some(sprite);
            }
            StackingKind::GunBack => Self::install_mounts(holder, kind, &[PI]),
            StackingKind::GunSide => Self::install_mounts(holder, kind, &[FRAC_PI_2, -FRAC_PI_2]),
        }

        *self.stack_state.borrow_mut() = StackState::Active {
            remaining: Cell::new(self.scaled_duration(base_duration)),
            shield_sprite,
        };
    }

    fn install_mounts(holder: &Entity, kind: StackingKind, angles: &[f32]) {
        let Some(armament) = holder.get_one_or_default::<Armament>() else {
            return;
        };

        for weapon in armament.weapons().iter() {
            let fixed: Vec<WeaponMount> = weapon
                .mounts()
                .into_iter()
                .filter(|mount| mount.tag == MountTag::Fixed)
                .collect();

            for mount in fixed {
                for &angle in angles {
                    weapon.add_mount(WeaponMount::temporary(
                        rotate(mount.offset, angle),
                        rotate(mount.direction, angle),
                        kind,
                    ));
                }
            }
        }
    }

    fn tick_active(&self, holder: &Entity, frame: FrameTime, kind: StackingKind) -> bool {
        let state = self.stack_state.borrow();
        let StackState::Active {
            remaining,
            shield_sprite,
        } = &*state
        else {
            return true;
        };

        remaining.set(remaining.get() - frame.delta_seconds);
        if remaining.get() > 0.0 {
            return false;
        }

        match kind {
            StackingKind::Shield => {
                holder.world().play("ShieldOff");

                if let Some(sprite) = shield_sprite {
                    holder.remove(sprite.as_ref());
                }

                if let Some(health) = holder.get_one_or_default::<Health>() {
                    health.set_invincible(false);
                }
            }
            StackingKind::GunBack | StackingKind::GunSide => {
                if let Some(armament) = holder.get_one_or_default::<Armament>() {
                    for weapon in armament.weapons().iter() {
                        weapon.remove_temporary_mounts(kind);
                    }
                }
            }
        }

        true
    }
}

impl_component!(Item);

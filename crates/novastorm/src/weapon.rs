//! Weapons and projectile spawning
//!
//! A weapon is a set of mounts fired together. Mount offsets and fire
//! directions are authored in the owner's local space with the ship facing
//! up; both are rotated by the owner's current facing when fired.

use std::cell::{Cell, RefCell};

use nova_engine::prelude::*;

use crate::components::{
    Collision, ContactDamage, DespawnWhenOffscreen, Movable, Player, Projectile, SpriteSheet,
    StackingKind,
};
use crate::databases::sprite_sheets;

/// Who installed a weapon mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountTag {
    /// Part of the weapon's permanent loadout.
    Fixed,

    /// Installed by a timed stacking item, removed when the item expires.
    Temporary(StackingKind),
}

/// One barrel position on a weapon, relative to the owner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponMount {
    /// Offset from the owner's position, in local space.
    pub offset: Vec2,

    /// Fire direction, in local space.
    pub direction: Vec2,

    /// Provenance of the mount.
    pub tag: MountTag,
}

impl WeaponMount {
    /// Permanent mount.
    pub fn fixed(offset: Vec2, direction: Vec2) -> Self {
        Self {
            offset,
            direction,
            tag: MountTag::Fixed,
        }
    }

    /// Mount installed by a stacking item.
    pub fn temporary(offset: Vec2, direction: Vec2, kind: StackingKind) -> Self {
        Self {
            offset,
            direction,
            tag: MountTag::Temporary(kind),
        }
    }
}

/// A weapon carried by an [`Armament`](crate::components::Armament).
pub struct Weapon {
    mounts: RefCell<Vec<WeaponMount>>,
    cooldown: Cell<f32>,

    /// Seconds between shots.
    pub fire_delay: f32,

    /// Ammo drawn from the owner's [`Player`] per shot; 0 fires for free.
    pub ammo_cost: u32,

    /// Damage carried by spawned projectiles.
    pub damage: u32,

    /// Speed of spawned projectiles, in units per second.
    pub projectile_speed: f32,

    /// Collision group of spawned projectiles.
    pub collision_group: Option<&'static str>,

    /// Groups the spawned projectiles collide with.
    pub check_collisions_with: &'static [&'static str],
}

impl Weapon {
    /// Weapon with the given mounts and placeholder combat stats.
    pub fn new(mounts: Vec<WeaponMount>) -> Self {
        Self {
            mounts: RefCell::new(mounts),
            cooldown: Cell::new(0.0),
            fire_delay: 0.25,
            ammo_cost: 0,
            damage: 10,
            projectile_speed: 512.0,
            collision_group: None,
            check_collisions_with: &[],
        }
    }

    /// Set the fire delay.
    pub fn with_fire_delay(mut self, fire_delay: f32) -> Self {
        self.fire_delay = fire_delay;
        self
    }

    /// Set the per-shot ammo cost.
    pub fn with_ammo_cost(mut self, ammo_cost: u32) -> Self {
        self.ammo_cost = ammo_cost;
        self
    }

    /// Set the projectile damage.
    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = damage;
        self
    }

    /// Set the projectile speed.
    pub fn with_projectile_speed(mut self, speed: f32) -> Self {
        self.projectile_speed = speed;
        self
    }

    /// Set the projectile collision group and targets.
    pub fn with_collision(
        mut self,
        group: &'static str,
        check_collisions_with: &'static [&'static str],
    ) -> Self {
        self.collision_group = Some(group);
        self.check_collisions_with = check_collisions_with;
        self
    }

    /// Snapshot of the current mounts.
    pub fn mounts(&self) -> Vec<WeaponMount> {
        self.mounts.borrow().clone()
    }

    /// Install a mount.
    pub fn add_mount(&self, mount: WeaponMount) {
        self.mounts.borrow_mut().push(mount);
    }

    /// Remove every mount installed by the given stacking item kind.
    pub fn remove_temporary_mounts(&self, kind: StackingKind) {
        self.mounts
            .borrow_mut()
            .retain(|mount| mount.tag != MountTag::Temporary(kind));
    }

    /// Advance the cooldown.
    pub fn tick(&self, frame: FrameTime) {
        self.cooldown
            .set((self.cooldown.get() - frame.delta_seconds).max(0.0));
    }

    /// Fire the weapon from its owner.
    ///
    /// Returns the sound to play on success. A shot attempted while the
    /// owner lacks ammo still resets the cooldown.
    pub fn attack(&self, owner: &Entity) -> Option<&'static str> {
        if self.cooldown.get() > 0.0 {
            return None;
        }

        self.cooldown.set(self.fire_delay);

        if self.ammo_cost > 0 {
            if let Some(player) = owner.get_one_or_default::<Player>() {
                if !player.spend_ammo(self.ammo_cost) {
                    return None;
                }
            }
        }

        let world = owner.world();
        let rotation = facing_angle(owner.direction());

        for mount in self.mounts() {
            let fire_direction = rotate(mount.direction, rotation);
            let projectile = world.spawn(&self.projectile_blueprint(fire_direction));
            projectile.set_position(owner.position() + rotate(mount.offset, rotation));
        }

        Some("Bullet")
    }

    fn projectile_blueprint(&self, fire_direction: Vec2) -> EntityBlueprint {
        let damage = self.damage;
        let speed = self.projectile_speed;
        let group = self.collision_group;
        let check_collisions_with = self.check_collisions_with;

        EntityBlueprint::new(move |entity| {
            let mut components = vec![
                SpriteSheet::new(entity, sprite_sheets::PROJECTILE_BULLET).into_component(),
                Movable::new(entity, speed)
                    .with_move(fire_direction)
                    .with_look(fire_direction)
                    .into_component(),
                Projectile::new(entity, Some("Hit")).into_component(),
                ContactDamage::new(entity, damage).into_component(),
                DespawnWhenOffscreen::new(entity).into_component(),
            ];

            let mut collision = Collision::new(entity, 1.0);
            collision.group = group;
            collision.check_collisions_with = check_collisions_with;
            components.push(collision.into_component());

            components
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    use crate::test_util::{frame, test_world};

    fn bare_entity(world: &World) -> Entity {
        world.spawn(&EntityBlueprint::empty())
    }

    #[test]
    fn cooldown_gates_successive_shots() {
        let (world, _audio, _dir) = test_world();
        let owner = bare_entity(&world);

        let weapon = Weapon::new(vec![WeaponMount::fixed(
            Vec2::zeros(),
            Vec2::new(0.0, -1.0),
        )])
        .with_fire_delay(0.25);

        assert_eq!(weapon.attack(&owner), Some("Bullet"));
        assert_eq!(weapon.attack(&owner), None);

        weapon.tick(frame(0.1));
        weapon.tick(frame(0.1));
        assert_eq!(weapon.attack(&owner), None);

        weapon.tick(frame(0.1));
        assert_eq!(weapon.attack(&owner), Some("Bullet"));
    }

    #[test]
    fn mounts_rotate_with_the_owner_facing() {
        let (world, _audio, _dir) = test_world();
        let owner = bare_entity(&world);
        owner.set_position(Vec2::new(100.0, 100.0));
        owner.set_direction(Vec2::new(1.0, 0.0));

        let weapon = Weapon::new(vec![WeaponMount::fixed(
            Vec2::new(0.0, -8.0),
            Vec2::new(0.0, -1.0),
        )]);
        weapon.attack(&owner);

        // Owner faces +X, so the up-authored mount fires +X from 8 ahead.
        let projectile = world.entities().remove(1);
        assert_relative_eq!(projectile.position().x, 108.0, epsilon = 1e-4);
        assert_relative_eq!(projectile.position().y, 100.0, epsilon = 1e-4);

        let movable = projectile.get_one::<Movable>();
        assert_relative_eq!(movable.move_dir().x, 1.0, epsilon = 1e-4);
        assert_relative_eq!(movable.move_dir().y, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn failed_ammo_check_still_resets_the_cooldown() {
        let (world, _audio, _dir) = test_world();
        let owner = world.spawn(&EntityBlueprint::new(|entity| {
            let player = Player::new(entity);
            player.set_ammo(0);
            vec![player.into_component()]
        }));

        let weapon = Weapon::new(vec![WeaponMount::fixed(
            Vec2::zeros(),
            Vec2::new(0.0, -1.0),
        )])
        .with_fire_delay(0.25)
        .with_ammo_cost(1);

        assert_eq!(weapon.attack(&owner), None);
        assert_eq!(world.entities().len(), 1);

        // Ammo arrives, but the dry-fire cooldown still applies.
        owner.get_one::<Player>().set_ammo(10);
        assert_eq!(weapon.attack(&owner), None);

        weapon.tick(frame(0.3));
        assert_eq!(weapon.attack(&owner), Some("Bullet"));
        assert_eq!(owner.get_one::<Player>().ammo(), 9);
    }

    #[test]
    fn temporary_mounts_are_removed_by_kind() {
        let weapon = Weapon::new(vec![WeaponMount::fixed(
            Vec2::new(0.0, -8.0),
            Vec2::new(0.0, -1.0),
        )]);
        weapon.add_mount(WeaponMount::temporary(
            Vec2::new(0.0, 8.0),
            Vec2::new(0.0, 1.0),
            StackingKind::GunBack,
        ));
        weapon.add_mount(WeaponMount::temporary(
            Vec2::new(8.0, 0.0),
            Vec2::new(1.0, 0.0),
            StackingKind::GunSide,
        ));

        weapon.remove_temporary_mounts(StackingKind::GunBack);

        let mounts = weapon.mounts();
        assert_eq!(mounts.len(), 2);
        assert!(mounts
            .iter()
            .all(|mount| mount.tag != MountTag::Temporary(StackingKind::GunBack)));
    }
}

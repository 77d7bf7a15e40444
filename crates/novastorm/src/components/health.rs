//! Health and death

use std::cell::Cell;

use nova_engine::prelude::*;

/// Makes an entity damageable and killable.
pub struct Health {
    entity: EntityRef,
    max: Cell<u32>,
    current: Cell<u32>,
    invincible: Cell<bool>,
}

impl Health {
    /// Health component starting at full.
    pub fn new(entity: &Entity, max: u32) -> Self {
        Self {
            entity: entity.downgrade(),
            max: Cell::new(max),
            current: Cell::new(max),
            invincible: Cell::new(false),
        }
    }

    /// Current health.
    pub fn current(&self) -> u32 {
        self.current.get()
    }

    /// Maximum health.
    pub fn max(&self) -> u32 {
        self.max.get()
    }

    /// Whether damage is currently ignored.
    pub fn invincible(&self) -> bool {
        self.invincible.get()
    }

    /// Toggle invincibility (shield items).
    pub fn set_invincible(&self, invincible: bool) {
        self.invincible.set(invincible);
    }

    /// Restore health, clamped to the maximum.
    pub fn heal(&self, amount: u32) {
        self.current
            .set((self.current.get().saturating_add(amount)).min(self.max.get()));
    }

    /// Apply damage. At zero health every death-reactive component fires in
    /// attach order and the entity is disposed.
    pub fn apply_damage(&self, damage: u32) {
        if self.invincible.get() {
            return;
        }

        let remaining = self.current.get().saturating_sub(damage);
        self.current.set(remaining);

        if remaining > 0 {
            return;
        }

        let entity = self.entity.get();
        for component in entity.components() {
            if let Some(death) = component.as_death_reactive() {
                death.on_death();
            }
        }

        entity.dispose();
    }
}

impl_component!(Health);

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell as StdCell;
    use std::rc::Rc;

    use crate::test_util::test_world;

    struct DeathProbe {
        entity: EntityRef,
        deaths: Rc<StdCell<u32>>,
    }

    impl DeathReactive for DeathProbe {
        fn on_death(&self) {
            self.deaths.set(self.deaths.get() + 1);
            // The entity is still alive while death reactions run.
            assert!(!self.entity.get().disposed());
        }
    }

    impl_component!(DeathProbe: DeathReactive);

    #[test]
    fn damage_is_saturating() {
        let (world, _audio, _dir) = test_world();
        let entity = world.spawn(&EntityBlueprint::new(|entity| {
            vec![Health::new(entity, 100).into_component()]
        }));

        let health = entity.get_one::<Health>();
        health.apply_damage(30);
        assert_eq!(health.current(), 70);

        health.apply_damage(500);
        assert_eq!(health.current(), 0);
        assert!(entity.disposed());
    }

    #[test]
    fn death_reactions_run_before_disposal() {
        let (world, _audio, _dir) = test_world();
        let deaths = Rc::new(StdCell::new(0));
        let observed = Rc::clone(&deaths);

        let entity = world.spawn(&EntityBlueprint::new(move |entity| {
            vec![
                Health::new(entity, 10).into_component(),
                DeathProbe {
                    entity: entity.downgrade(),
                    deaths: Rc::clone(&observed),
                }
                .into_component(),
            ]
        }));

        entity.get_one::<Health>().apply_damage(10);
        assert_eq!(deaths.get(), 1);
        assert!(entity.disposed());
    }

    #[test]
    fn invincibility_ignores_damage() {
        let (world, _audio, _dir) = test_world();
        let entity = world.spawn(&EntityBlueprint::new(|entity| {
            vec![Health::new(entity, 50).into_component()]
        }));

        let health = entity.get_one::<Health>();
        health.set_invincible(true);
        health.apply_damage(100);
        assert_eq!(health.current(), 50);
        assert!(!entity.disposed());
    }

    #[test]
    fn heal_clamps_to_max() {
        let (world, _audio, _dir) = test_world();
        let entity = world.spawn(&EntityBlueprint::new(|entity| {
            vec![Health::new(entity, 100).into_component()]
        }));

        let health = entity.get_one::<Health>();
        health.apply_damage(40);
        health.heal(1000);
        assert_eq!(health.current(), 100);
    }
}

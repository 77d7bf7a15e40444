//! Loot drops

use std::cell::RefCell;

use nova_engine::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::components::Item;
use crate::databases::rarities;

/// Rolls a drop table when the entity dies.
///
/// Entries are tried in ascending chance order so rare drops get rolled
/// before common ones can short-circuit the table; at most one entry
/// spawns. A spawned item additionally rolls its rarity the same way,
/// rarest first.
pub struct SpawnOnDeath {
    entity: EntityRef,
    table: Vec<(EntityBlueprint, f32)>,
    rng: RefCell<SmallRng>,
}

impl SpawnOnDeath {
    /// Drop table of blueprints with their spawn chance.
    pub fn new(entity: &Entity, table: Vec<(EntityBlueprint, f32)>) -> Self {
        Self {
            entity: entity.downgrade(),
            table,
            rng: RefCell::new(SmallRng::from_entropy()),
        }
    }

    /// Use a deterministic roll sequence.
    pub fn with_seed(self, seed: u64) -> Self {
        *self.rng.borrow_mut() = SmallRng::seed_from_u64(seed);
        self
    }
}

impl DeathReactive for SpawnOnDeath {
    fn on_death(&self) {
        let entity = self.entity.get();
        let world = entity.world();
        let mut rng = self.rng.borrow_mut();

        let mut table: Vec<&(EntityBlueprint, f32)> = self.table.iter().collect();
        table.sort_by(|a, b| a.1.total_cmp(&b.1));

        for (blueprint, chance) in table {
            if rng.gen::<f32>() > *chance {
                continue;
            }

            let spawned = world.spawn(blueprint);
            spawned.set_position(entity.position());

            let Some(item) = spawned.get_one_or_default::<Item>() else {
                return;
            };

            for rarity in rarities::by_ascending_chance() {
                if rng.gen::<f32>() > rarity.chance {
                    continue;
                }

                item.set_rarity(rarity);
                return;
            }

            return;
        }
    }
}

impl_component!(SpawnOnDeath: DeathReactive);

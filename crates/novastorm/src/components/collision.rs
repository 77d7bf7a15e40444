//! Circle collision with string-tag groups

use nova_engine::prelude::*;

/// Circle collider with a group tag and a list of groups to test against.
///
/// Only colliders with a non-empty target list actively scan; reactions are
/// fired symmetrically on both entities for every overlapping pair found,
/// and a pair is reported once per scanning collider, so two mutual
/// scanners each fire the pair once.
pub struct Collision {
    entity: EntityRef,

    /// Radius of the collision circle.
    pub radius: f32,

    /// Group this collider belongs to.
    pub group: Option<&'static str>,

    /// Groups this collider scans for.
    pub check_collisions_with: &'static [&'static str],
}

impl Collision {
    /// Passive collider (belongs to no group, scans nothing).
    pub fn new(entity: &Entity, radius: f32) -> Self {
        Self {
            entity: entity.downgrade(),
            radius,
            group: None,
            check_collisions_with: &[],
        }
    }

    /// Set the collider's own group.
    pub fn with_group(mut self, group: &'static str) -> Self {
        self.group = Some(group);
        self
    }

    /// Set the groups this collider scans for.
    pub fn with_targets(mut self, check_collisions_with: &'static [&'static str]) -> Self {
        self.check_collisions_with = check_collisions_with;
        self
    }

    /// Entities with a collider in one of `groups` whose circle strictly
    /// overlaps the given query circle. Entities in `filter` are skipped.
    pub fn find(
        world: &World,
        groups: &[&str],
        position: Vec2,
        radius: f32,
        filter: &[Entity],
    ) -> Vec<Entity> {
        let mut result = Vec::new();

        for entity in world.entities() {
            if filter.contains(&entity) {
                continue;
            }

            let hit = entity.get_all::<Collision>().iter().any(|collider| {
                collider.group.is_some_and(|group| groups.contains(&group))
                    && (entity.position() - position).norm() < radius + collider.radius
            });

            if hit {
                result.push(entity);
            }
        }

        result
    }
}

impl Updatable for Collision {
    fn update(&self, _frame: FrameTime) {
        if self.check_collisions_with.is_empty() {
            return;
        }

        let entity = self.entity.get();
        let world = entity.world();

        for other in Self::find(
            &world,
            self.check_collisions_with,
            entity.position(),
            self.radius,
            &[entity.clone()],
        ) {
            for component in other.components() {
                if let Some(reaction) = component.as_collision_reactive() {
                    reaction.on_collision(&entity);
                }
            }

            for component in entity.components() {
                if let Some(reaction) = component.as_collision_reactive() {
                    reaction.on_collision(&other);
                }
            }
        }
    }
}

impl_component!(Collision: Updatable);

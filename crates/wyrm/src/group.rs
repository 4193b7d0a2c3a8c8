//! Group index — named sets of entities.
//!
//! A [`GroupIndex`] maps a string tag to the set of entities carrying it:
//! put the hero in `"hero"`, every baddie in `"monsters"`, and a targeting
//! system can fetch either set without inventing marker components. The index
//! only stores entity handles — it knows nothing about components and takes
//! no part in the registry's invariants, so a despawned entity must be
//! removed from its groups by whoever despawns it (which
//! [`Context::despawn`](crate::context::Context::despawn) does).

use std::collections::{HashMap, HashSet};

use crate::ecs::Entity;

/// Secondary index: group name → set of member entities.
pub struct GroupIndex {
    groups: HashMap<String, HashSet<Entity>>,
}

impl GroupIndex {
    pub fn new() -> Self {
        Self {
            groups: HashMap::new(),
        }
    }

    /// Add an entity to a group. An entity can be in many groups, and adding
    /// it to the same group twice is a no-op.
    pub fn add(&mut self, entity: Entity, group: &str) {
        self.groups
            .entry(group.to_string())
            .or_default()
            .insert(entity);
    }

    /// Remove an entity from a group. Returns `true` if it was a member;
    /// unknown groups and non-members are a quiet no-op.
    pub fn remove(&mut self, entity: Entity, group: &str) -> bool {
        let Some(members) = self.groups.get_mut(group) else {
            return false;
        };
        let removed = members.remove(&entity);
        if members.is_empty() {
            self.groups.remove(group);
        }
        removed
    }

    /// Remove an entity from every group it is in.
    pub fn remove_from_all(&mut self, entity: Entity) {
        self.groups.retain(|_, members| {
            members.remove(&entity);
            !members.is_empty()
        });
    }

    /// All members of a group, in no particular order. Empty for unknown
    /// groups.
    pub fn members(&self, group: &str) -> Vec<Entity> {
        self.groups
            .get(group)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Entities that are members of *every* named group, intersected in the
    /// order given. Empty if any group is unknown, or if no groups are named.
    pub fn members_of_all(&self, groups: &[&str]) -> Vec<Entity> {
        let Some((first, rest)) = groups.split_first() else {
            return Vec::new();
        };
        let Some(seed) = self.groups.get(*first) else {
            return Vec::new();
        };
        seed.iter()
            .filter(|&entity| {
                rest.iter()
                    .all(|group| self.groups.get(*group).is_some_and(|m| m.contains(entity)))
            })
            .copied()
            .collect()
    }

    /// All groups the entity is a member of, in no particular order.
    pub fn groups_of(&self, entity: Entity) -> Vec<String> {
        self.groups
            .iter()
            .filter(|(_, members)| members.contains(&entity))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Is the entity a member of the group?
    pub fn contains(&self, entity: Entity, group: &str) -> bool {
        self.groups
            .get(group)
            .is_some_and(|members| members.contains(&entity))
    }

    /// Does the group exist with at least one member?
    pub fn is_populated(&self, group: &str) -> bool {
        self.groups.get(group).is_some_and(|m| !m.is_empty())
    }
}

impl Default for GroupIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::Registry;

    fn three_entities() -> (Registry, Entity, Entity, Entity) {
        let mut reg = Registry::new();
        let a = reg.create_entity();
        let b = reg.create_entity();
        let c = reg.create_entity();
        (reg, a, b, c)
    }

    #[test]
    fn add_and_query() {
        let (_reg, a, b, c) = three_entities();
        let mut groups = GroupIndex::new();
        groups.add(a, "monsters");
        groups.add(b, "monsters");
        groups.add(c, "hero");

        let mut monsters = groups.members("monsters");
        monsters.sort_by_key(|e| e.id());
        assert_eq!(monsters, vec![a, b]);
        assert!(groups.contains(c, "hero"));
        assert!(!groups.contains(c, "monsters"));
    }

    #[test]
    fn double_add_is_a_noop() {
        let (_reg, a, ..) = three_entities();
        let mut groups = GroupIndex::new();
        groups.add(a, "hero");
        groups.add(a, "hero");
        assert_eq!(groups.members("hero").len(), 1);
    }

    #[test]
    fn unknown_group_is_empty() {
        let groups = GroupIndex::new();
        assert!(groups.members("nothing").is_empty());
        assert!(!groups.is_populated("nothing"));
    }

    #[test]
    fn intersection_across_groups() {
        let (_reg, a, b, c) = three_entities();
        let mut groups = GroupIndex::new();
        groups.add(a, "monsters");
        groups.add(b, "monsters");
        groups.add(b, "flying");
        groups.add(c, "flying");

        assert_eq!(groups.members_of_all(&["monsters", "flying"]), vec![b]);
        assert!(groups.members_of_all(&["monsters", "hero"]).is_empty());
        assert!(groups.members_of_all(&[]).is_empty());
    }

    #[test]
    fn remove_and_prune() {
        let (_reg, a, ..) = three_entities();
        let mut groups = GroupIndex::new();
        groups.add(a, "hero");
        assert!(groups.remove(a, "hero"));
        assert!(!groups.remove(a, "hero"));
        assert!(!groups.is_populated("hero"));
    }

    #[test]
    fn remove_from_all_groups() {
        let (_reg, a, b, ..) = three_entities();
        let mut groups = GroupIndex::new();
        groups.add(a, "monsters");
        groups.add(a, "flying");
        groups.add(b, "monsters");

        groups.remove_from_all(a);
        assert!(groups.groups_of(a).is_empty());
        assert_eq!(groups.members("monsters"), vec![b]);
        assert!(!groups.is_populated("flying"));
    }

    #[test]
    fn groups_of_entity() {
        let (_reg, a, ..) = three_entities();
        let mut groups = GroupIndex::new();
        groups.add(a, "monsters");
        groups.add(a, "flying");

        let mut names = groups.groups_of(a);
        names.sort();
        assert_eq!(names, vec!["flying", "monsters"]);
    }
}

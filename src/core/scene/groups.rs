//=========================================================================
// Groups
//=========================================================================
//
// A scene's map of named groups plus its draw-order counter.
//
// Rules:
//   - the `default` group always exists with `DEFAULT_ORDER`
//   - a group created on demand takes the next free order
//   - `apply_ordering` pushes unlisted groups to `MAX_ORDER`
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::group::{Group, GroupKey};
use super::object::{GameObject, ObjectId};
use crate::core::graphics::{Graphics, DEFAULT_ORDER};

//=== Constants ===========================================================

/// Order given to groups missing from an explicit ordering.
pub const MAX_ORDER: i32 = 99;

//=== Groups ==============================================================

#[derive(Debug)]
pub struct Groups {
    groups: HashMap<GroupKey, Group>,
    next_order: i32,
}

impl Groups {
    pub fn new() -> Self {
        let mut groups = HashMap::new();
        groups.insert(GroupKey::default_group(), Group::new(DEFAULT_ORDER));
        Self {
            groups,
            next_order: DEFAULT_ORDER + 1,
        }
    }

    //--- Objects ----------------------------------------------------------

    /// Adds `object` to `group` (default group when `None`), creating the
    /// group if needed.
    pub fn push<T: GameObject>(&mut self, object: T, group: Option<GroupKey>) -> ObjectId {
        self.push_boxed(Box::new(object), group)
    }

    pub fn push_boxed(&mut self, object: Box<dyn GameObject>, group: Option<GroupKey>) -> ObjectId {
        let key = group.unwrap_or_default();
        let id = self.entry(key.clone()).push_boxed(object);
        trace!(target: "little::scene", "Object {} added to group {}", id, key);
        id
    }

    /// Removes the object with `id` from whichever group holds it.
    pub fn delete(&mut self, id: ObjectId) -> Option<Box<dyn GameObject>> {
        self.groups.values_mut().find_map(|group| group.delete(id))
    }

    pub fn delete_at(&mut self, index: usize, group: &GroupKey) -> Option<Box<dyn GameObject>> {
        self.groups.get_mut(group)?.delete_at(index)
    }

    /// Object at `index` in the default group.
    pub fn at(&self, index: usize) -> Option<&dyn GameObject> {
        self.groups.get(&GroupKey::default_group())?.at(index)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.groups.values().any(|group| group.contains(id))
    }

    /// Key of the group holding `id`.
    pub fn group_of(&self, id: ObjectId) -> Option<&GroupKey> {
        self.groups
            .iter()
            .find(|(_, group)| group.contains(id))
            .map(|(key, _)| key)
    }

    pub fn find<T: GameObject>(&self, id: ObjectId) -> Option<&T> {
        self.groups
            .values()
            .find_map(|group| group.get(id))
            .and_then(|object| object.as_any().downcast_ref::<T>())
    }

    pub fn find_mut<T: GameObject>(&mut self, id: ObjectId) -> Option<&mut T> {
        let group = self.groups.values_mut().find(|group| group.contains(id))?;
        group.get_mut(id)?.as_any_mut().downcast_mut::<T>()
    }

    pub fn object_count(&self) -> usize {
        self.groups.values().map(Group::len).sum()
    }

    //--- Groups -----------------------------------------------------------

    /// Creates `key` with an explicit order, or reorders it if present.
    pub fn insert_group(&mut self, key: GroupKey, order: i32) {
        debug!(target: "little::scene", "Group {} set to order {}", key, order);
        self.groups
            .entry(key)
            .and_modify(|group| group.set_order(order))
            .or_insert_with(|| Group::new(order));
    }

    pub fn group(&self, key: &GroupKey) -> Option<&Group> {
        self.groups.get(key)
    }

    pub fn group_mut(&mut self, key: &GroupKey) -> Option<&mut Group> {
        self.groups.get_mut(key)
    }

    /// Keys sorted by name.
    pub fn keys(&self) -> Vec<&GroupKey> {
        let mut keys: Vec<_> = self.groups.keys().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns false if `key` does not exist.
    pub fn set_order(&mut self, key: &GroupKey, order: i32) -> bool {
        match self.groups.get_mut(key) {
            Some(group) => {
                group.set_order(order);
                true
            }
            None => false,
        }
    }

    /// Reorders every group from `ordering`; groups it does not list get
    /// `MAX_ORDER`.
    pub fn apply_ordering(&mut self, ordering: &HashMap<GroupKey, i32>) {
        for (key, group) in self.groups.iter_mut() {
            group.set_order(ordering.get(key).copied().unwrap_or(MAX_ORDER));
        }
    }

    /// Groups ascending by order; ties broken by key.
    pub fn in_draw_order(&self) -> Vec<(&GroupKey, &Group)> {
        let mut ordered: Vec<_> = self.groups.iter().collect();
        ordered.sort_by(|(ka, a), (kb, b)| a.order().cmp(&b.order()).then_with(|| ka.cmp(kb)));
        ordered
    }

    /// Drops groups flagged removed, and removed objects from the groups
    /// that stay. The default group stays and is only emptied. Returns how
    /// many groups went.
    pub fn prune_removed(&mut self) -> usize {
        let before = self.groups.len();
        self.groups.retain(|key, group| !group.is_removed() || key.is_default());
        for group in self.groups.values_mut() {
            group.prune();
        }

        if let Some(default) = self.groups.get_mut(&GroupKey::default_group()) {
            if default.is_removed() {
                *default = Group::new(default.order());
            }
        }

        let pruned = before - self.groups.len();
        if pruned > 0 {
            debug!(target: "little::scene", "Dropped {} removed groups", pruned);
        }
        pruned
    }

    //--- Scene Plumbing ---------------------------------------------------

    /// Draws live groups ascending by order.
    pub fn draw(&self, graphics: &mut Graphics) {
        for (_, group) in self.in_draw_order() {
            if !group.is_removed() {
                group.draw(graphics);
            }
        }
    }

    pub fn on_close(&mut self) {
        for group in self.groups.values_mut() {
            group.on_close();
        }
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&GroupKey, &mut Group)> {
        self.groups.iter_mut()
    }

    fn entry(&mut self, key: GroupKey) -> &mut Group {
        let next_order = &mut self.next_order;
        self.groups.entry(key).or_insert_with(|| {
            let group = Group::new(*next_order);
            *next_order += 1;
            group
        })
    }
}

impl Default for Groups {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

//=========================================================================
// Group
//=========================================================================
//
// Ordered, named collection of game objects sharing one draw order.
//
// A group is the unit of parallelism: during a scene update every group
// runs on its own worker thread, and objects inside a group update
// sequentially in insertion order.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use log::trace;

//=== Internal Dependencies ===============================================

use super::object::{GameObject, ObjectId, UpdateContext};
use super::request_queue::RequestQueue;
use crate::core::graphics::Graphics;

//=== GroupKey ============================================================

/// Name of a group within a scene.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey(String);

impl GroupKey {
    pub const DEFAULT: &'static str = "default";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The group every scene starts with.
    pub fn default_group() -> Self {
        Self::new(Self::DEFAULT)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.0 == Self::DEFAULT
    }
}

impl Default for GroupKey {
    fn default() -> Self {
        Self::default_group()
    }
}

impl From<&str> for GroupKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for GroupKey {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//=== Entry ===============================================================

struct Entry {
    id: ObjectId,
    object: Box<dyn GameObject>,
}

//=== Group ===============================================================

pub struct Group {
    order: i32,
    removed: bool,
    entries: Vec<Entry>,
}

impl Group {
    pub fn new(order: i32) -> Self {
        Self {
            order,
            removed: false,
            entries: Vec::new(),
        }
    }

    //--- Membership -------------------------------------------------------

    pub fn push<T: GameObject>(&mut self, object: T) -> ObjectId {
        self.push_boxed(Box::new(object))
    }

    pub fn push_boxed(&mut self, object: Box<dyn GameObject>) -> ObjectId {
        let id = ObjectId::next();
        self.entries.push(Entry { id, object });
        id
    }

    pub fn get(&self, id: ObjectId) -> Option<&dyn GameObject> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.object.as_ref())
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut dyn GameObject> {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => Some(entry.object.as_mut()),
            None => None,
        }
    }

    /// Removes and returns the object with `id`.
    pub fn delete(&mut self, id: ObjectId) -> Option<Box<dyn GameObject>> {
        let index = self.index_of(id)?;
        Some(self.entries.remove(index).object)
    }

    pub fn delete_at(&mut self, index: usize) -> Option<Box<dyn GameObject>> {
        if index < self.entries.len() {
            Some(self.entries.remove(index).object)
        } else {
            None
        }
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn id_at(&self, index: usize) -> Option<ObjectId> {
        self.entries.get(index).map(|e| e.id)
    }

    pub fn at(&self, index: usize) -> Option<&dyn GameObject> {
        self.entries.get(index).map(|e| e.object.as_ref())
    }

    /// First object in insertion order.
    pub fn first(&self) -> Option<&dyn GameObject> {
        self.at(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &dyn GameObject)> {
        self.entries.iter().map(|e| (e.id, e.object.as_ref()))
    }

    //--- Lifecycle --------------------------------------------------------

    /// Updates every live object in order, then drops the ones flagged
    /// removed. Returns how many objects were updated.
    pub fn update(&mut self, tick: f64, key: &GroupKey, requests: &RequestQueue) -> usize {
        let mut updated = 0;
        for entry in self.entries.iter_mut() {
            if entry.object.is_removed() {
                continue;
            }
            let ctx = UpdateContext::new(tick, entry.id, key, requests);
            entry.object.update(&ctx);
            updated += 1;
        }
        self.prune();
        updated
    }

    /// Drops objects flagged removed; returns how many went.
    pub fn prune(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !e.object.is_removed());
        let pruned = before - self.entries.len();
        if pruned > 0 {
            trace!(target: "little::scene", "Pruned {} removed objects", pruned);
        }
        pruned
    }

    /// Draws live objects in insertion order; removed ones are skipped
    /// until the next prune drops them.
    pub fn draw(&self, graphics: &mut Graphics) {
        graphics.start_group(self.order);
        for entry in self.entries.iter().filter(|e| !e.object.is_removed()) {
            entry.object.draw(graphics);
        }
        graphics.end_group(self.order);
    }

    pub fn on_close(&mut self) {
        for entry in self.entries.iter_mut() {
            entry.object.on_close();
        }
    }

    //--- Order & Removal --------------------------------------------------

    pub fn order(&self) -> i32 {
        self.order
    }

    pub fn set_order(&mut self, order: i32) {
        self.order = order;
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Flags the whole group; the scene drops it after the next update.
    pub fn remove(&mut self) {
        self.removed = true;
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("order", &self.order)
            .field("removed", &self.removed)
            .field("objects", &self.entries.len())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graphics::{DrawOptions, DEFAULT_ORDER};
    use crate::core::math::Point;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Ticker {
        ticks: u32,
        remove_after: Option<u32>,
        closed: Arc<AtomicUsize>,
    }

    impl Ticker {
        fn new() -> Self {
            Self {
                ticks: 0,
                remove_after: None,
                closed: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl GameObject for Ticker {
        fn update(&mut self, _ctx: &UpdateContext<'_>) {
            self.ticks += 1;
        }

        fn draw(&self, graphics: &mut Graphics) {
            graphics.pixel(&Point::xy(f64::from(self.ticks), 0.0), &DrawOptions::default());
        }

        fn on_close(&mut self) {
            self.closed.fetch_add(1, Ordering::SeqCst);
        }

        fn is_removed(&self) -> bool {
            self.remove_after.is_some_and(|n| self.ticks >= n)
        }
    }

    fn ticks_of(group: &Group, id: ObjectId) -> Option<u32> {
        group
            .get(id)
            .and_then(|o| o.as_any().downcast_ref::<Ticker>())
            .map(|t| t.ticks)
    }

    #[test]
    fn key_basics() {
        let key = GroupKey::default_group();
        assert!(key.is_default());
        assert_eq!(key, GroupKey::default());
        assert_eq!(GroupKey::from("walls").to_string(), "walls");
        assert_eq!(GroupKey::from(String::from("a")).as_str(), "a");
    }

    #[test]
    fn membership() {
        let mut group = Group::new(3);
        let a = group.push(Ticker::new());
        let b = group.push(Ticker::new());

        assert_eq!(group.len(), 2);
        assert!(group.contains(b));
        assert_eq!(group.index_of(b), Some(1));
        assert_eq!(group.id_at(0), Some(a));
        assert!(group.first().is_some());

        assert!(group.delete(a).is_some());
        assert!(group.delete(a).is_none());
        assert_eq!(group.index_of(b), Some(0));
        assert!(group.delete_at(5).is_none());
        assert!(group.delete_at(0).is_some());
        assert!(group.is_empty());
    }

    #[test]
    fn update_runs_every_object_once() {
        let mut group = Group::new(0);
        let a = group.push(Ticker::new());
        let b = group.push(Ticker::new());
        let requests = RequestQueue::new(4);
        let key = GroupKey::default_group();

        assert_eq!(group.update(1.0, &key, &requests), 2);
        assert_eq!(group.update(1.0, &key, &requests), 2);
        assert_eq!(ticks_of(&group, a), Some(2));
        assert_eq!(ticks_of(&group, b), Some(2));
    }

    #[test]
    fn removed_objects_are_pruned_after_update() {
        let mut group = Group::new(0);
        let mut doomed = Ticker::new();
        doomed.remove_after = Some(1);
        let doomed = group.push(doomed);
        let survivor = group.push(Ticker::new());
        let requests = RequestQueue::new(4);

        group.update(1.0, &GroupKey::default_group(), &requests);
        assert!(!group.contains(doomed));
        assert!(group.contains(survivor));
    }

    #[test]
    fn get_mut_allows_downcast() {
        let mut group = Group::new(0);
        let id = group.push(Ticker::new());
        if let Some(ticker) = group
            .get_mut(id)
            .and_then(|o| o.as_any_mut().downcast_mut::<Ticker>())
        {
            ticker.ticks = 41;
        }
        assert_eq!(ticks_of(&group, id), Some(41));
    }

    #[test]
    fn draw_uses_group_order() {
        let mut group = Group::new(7);
        group.push(Ticker::new());
        let mut graphics = Graphics::new();

        group.draw(&mut graphics);
        let frame = graphics.finish();
        assert_eq!(frame.len(), 1);
        assert_eq!(frame.commands()[0].order(), 7);
        assert_eq!(graphics.current_order(), DEFAULT_ORDER);
    }

    #[test]
    fn draw_skips_removed_objects() {
        let mut group = Group::new(0);
        let mut doomed = Ticker::new();
        doomed.remove_after = Some(0);
        group.push(doomed);
        let mut graphics = Graphics::new();

        group.draw(&mut graphics);
        assert!(graphics.finish().is_empty());

        group.push(Ticker::new());
        group.draw(&mut graphics);
        assert_eq!(graphics.finish().len(), 1);
    }

    #[test]
    fn close_reaches_every_object() {
        let mut group = Group::new(0);
        let closed = Arc::new(AtomicUsize::new(0));
        for _ in 0..3 {
            let mut t = Ticker::new();
            t.closed = Arc::clone(&closed);
            group.push(t);
        }
        group.on_close();
        assert_eq!(closed.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn removal_flag_and_order() {
        let mut group = Group::new(1);
        assert!(!group.is_removed());
        group.remove();
        assert!(group.is_removed());
        group.set_order(9);
        assert_eq!(group.order(), 9);
        assert!(format!("{:?}", group).contains("order: 9"));
    }
}

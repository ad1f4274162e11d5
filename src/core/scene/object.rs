//=========================================================================
// Game Objects
//=========================================================================
//
// The unit a scene updates and draws.
//
// Objects run inside their group's worker thread during a scene update,
// so they only see their own state plus an `UpdateContext`. Anything
// that touches other objects or groups goes through `request`, which
// defers it until every group has finished.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

//=== Internal Dependencies ===============================================

use super::group::GroupKey;
use super::request_queue::{RequestError, RequestQueue, RequestStatus};
use super::groups::Groups;
use crate::core::graphics::Graphics;

//=== ObjectId ============================================================

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-wide unique object identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Mints a fresh id. Scene scripts use this to get a request sender.
    pub fn next() -> Self {
        Self(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//=== AsAny ===============================================================

/// Downcasting support for trait objects.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=== GameObject ==========================================================

/// Anything that lives in a scene group.
///
/// Only `update` is required:
///
/// ```
/// use little_engine::prelude::*;
///
/// struct Spinner { angle: f64 }
///
/// impl GameObject for Spinner {
///     fn update(&mut self, ctx: &UpdateContext<'_>) {
///         self.angle = (self.angle + ctx.tick) % 360.0;
///     }
/// }
/// ```
pub trait GameObject: AsAny + Send {
    /// Called once per tick from the group's worker thread.
    fn update(&mut self, ctx: &UpdateContext<'_>);

    fn draw(&self, _graphics: &mut Graphics) {}

    /// Called when the owning scene closes.
    fn on_close(&mut self) {}

    /// Removed objects are skipped and pruned after the group update.
    fn is_removed(&self) -> bool {
        false
    }
}

//=== UpdateContext =======================================================

/// What an object sees while updating.
pub struct UpdateContext<'a> {
    /// Elapsed time scaled by the configured tick divisor.
    pub tick: f64,
    pub id: ObjectId,
    pub group: &'a GroupKey,
    requests: &'a RequestQueue,
}

impl<'a> UpdateContext<'a> {
    pub(crate) fn new(tick: f64, id: ObjectId, group: &'a GroupKey, requests: &'a RequestQueue) -> Self {
        Self {
            tick,
            id,
            group,
            requests,
        }
    }

    /// Defers `request` until all groups finished updating.
    ///
    /// Replaces any request this object already has pending.
    pub fn request<F>(&self, request: F) -> Result<(), RequestError>
    where
        F: FnMut(&mut Groups) -> RequestStatus + Send + 'static,
    {
        self.requests.queue(self.id, request)
    }
}

impl fmt::Debug for UpdateContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateContext")
            .field("tick", &self.tick)
            .field("id", &self.id)
            .field("group", &self.group)
            .finish_non_exhaustive()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter(u32);

    impl GameObject for Counter {
        fn update(&mut self, _ctx: &UpdateContext<'_>) {
            self.0 += 1;
        }
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let a = ObjectId::next();
        let b = ObjectId::next();
        assert_ne!(a, b);
        assert!(b > a);
        assert_eq!(format!("{}", a), format!("#{}", a.raw()));
    }

    #[test]
    fn downcast_through_trait_object() {
        let mut boxed: Box<dyn GameObject> = Box::new(Counter(3));
        let obj: &dyn GameObject = boxed.as_ref();
        assert_eq!(obj.as_any().downcast_ref::<Counter>().map(|c| c.0), Some(3));

        if let Some(counter) = boxed.as_mut().as_any_mut().downcast_mut::<Counter>() {
            counter.0 = 10;
        }
        assert_eq!(boxed.as_ref().as_any().downcast_ref::<Counter>().map(|c| c.0), Some(10));
    }

    #[test]
    fn request_goes_through_queue() {
        let queue = RequestQueue::new(4);
        let key = GroupKey::default_group();
        let mut counter = Counter(0);
        let ctx = UpdateContext::new(1.5, ObjectId::next(), &key, &queue);

        counter.update(&ctx);
        ctx.request(|_groups| RequestStatus::Done).unwrap();
        assert_eq!(counter.0, 1);
        assert_eq!(queue.len(), 1);
        assert!(format!("{:?}", ctx).contains("tick: 1.5"));
    }
}

//=========================================================================
// Request Queue
//=========================================================================
//
// Deferred mutations collected while groups update in parallel.
//
// Architecture:
//   group threads ── queue(sender, request) ──> Mutex<VecDeque>
//                                                     │
//   scene (after join) ── process(&mut Groups) <──────┘
//
// Rules:
//   - at most one pending request per sender; a newer one replaces the
//     older one in place and keeps its FIFO slot
//   - bounded; a new sender past capacity is rejected
//   - drained in FIFO order; `Retry` keeps a request for the next tick
//   - a panicking request is dropped and reported; the rest of the batch
//     waits for the next drain
//   - a poisoned lock is recovered so queued work survives a panicking
//     group
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{error, trace, warn};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::groups::Groups;
use super::object::ObjectId;
use super::{panic_message, SceneError};

//=== Types ===============================================================

/// Result of running a deferred request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Done,
    /// Run again on the next drain.
    Retry,
}

pub type Request = Box<dyn FnMut(&mut Groups) -> RequestStatus + Send>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("request queue full ({capacity} pending requests)")]
    QueueFull { capacity: usize },
}

/// Default number of distinct senders that may have a pending request.
pub const DEFAULT_REQUEST_CAPACITY: usize = 1024;

//=== RequestQueue ========================================================

pub struct RequestQueue {
    pending: Mutex<VecDeque<(ObjectId, Request)>>,
    capacity: usize,
}

impl RequestQueue {
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Request queue capacity must be positive");
        Self {
            pending: Mutex::new(VecDeque::new()),
            capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<(ObjectId, Request)>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    //--- Producer Side ----------------------------------------------------

    /// Queues `request` on behalf of `sender`.
    pub fn queue<F>(&self, sender: ObjectId, request: F) -> Result<(), RequestError>
    where
        F: FnMut(&mut Groups) -> RequestStatus + Send + 'static,
    {
        self.queue_boxed(sender, Box::new(request))
    }

    pub fn queue_boxed(&self, sender: ObjectId, request: Request) -> Result<(), RequestError> {
        let mut pending = self.lock();

        if let Some(slot) = pending.iter_mut().find(|(id, _)| *id == sender) {
            trace!(target: "little::scene", "Request from {} replaced", sender);
            slot.1 = request;
            return Ok(());
        }

        if pending.len() >= self.capacity {
            warn!(
                target: "little::scene",
                "Request from {} rejected: queue full ({})", sender, self.capacity
            );
            return Err(RequestError::QueueFull {
                capacity: self.capacity,
            });
        }

        pending.push_back((sender, request));
        Ok(())
    }

    //--- Consumer Side ----------------------------------------------------

    /// Runs every pending request against `groups`; returns how many
    /// completed.
    ///
    /// The lock is released while requests run. A panicking request is
    /// dropped and ends the drain: the requests after it, and any kept for
    /// retry, stay queued for the next call.
    ///
    /// # Errors
    ///
    /// [`SceneError::RequestPanicked`] naming the sender of the request
    /// that panicked.
    pub fn process(&self, groups: &mut Groups) -> Result<usize, SceneError> {
        let mut batch = std::mem::take(&mut *self.lock());
        if batch.is_empty() {
            return Ok(0);
        }

        let mut done = 0;
        let mut keep = VecDeque::new();
        let mut failure = None;
        while let Some((sender, mut request)) = batch.pop_front() {
            match panic::catch_unwind(AssertUnwindSafe(|| request(groups))) {
                Ok(RequestStatus::Done) => done += 1,
                Ok(RequestStatus::Retry) => keep.push_back((sender, request)),
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    error!(
                        target: "little::scene",
                        "Request from {} panicked: {}", sender, message
                    );
                    failure = Some(SceneError::RequestPanicked { sender, message });
                    break;
                }
            }
        }

        keep.append(&mut batch);
        if !keep.is_empty() {
            trace!(target: "little::scene", "{} requests carried over", keep.len());
            self.requeue_front(keep);
        }

        match failure {
            Some(err) => Err(err),
            None => Ok(done),
        }
    }

    /// Puts carried-over requests ahead of anything queued meanwhile. A
    /// sender that queued again in the meantime keeps only its newer
    /// request, in the older slot.
    fn requeue_front(&self, mut carried: VecDeque<(ObjectId, Request)>) {
        let mut pending = self.lock();
        for (sender, request) in std::mem::take(&mut *pending) {
            match carried.iter_mut().find(|(id, _)| *id == sender) {
                Some(slot) => slot.1 = request,
                None => carried.push_back((sender, request)),
            }
        }
        *pending = carried;
    }

    //--- Utilities --------------------------------------------------------

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether `sender` has a request pending.
    pub fn contains(&self, sender: ObjectId) -> bool {
        self.lock().iter().any(|(id, _)| *id == sender)
    }
}

impl Default for RequestQueue {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_CAPACITY)
    }
}

impl fmt::Debug for RequestQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestQueue")
            .field("pending", &self.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::{GameObject, GroupKey, UpdateContext};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};

    struct Marker;

    impl GameObject for Marker {
        fn update(&mut self, _ctx: &UpdateContext<'_>) {}
    }

    fn log_into(log: &Arc<Mutex<Vec<&'static str>>>, name: &'static str) -> Request {
        let log = Arc::clone(log);
        Box::new(move |_groups: &mut Groups| {
            log.lock().unwrap().push(name);
            RequestStatus::Done
        })
    }

    #[test]
    fn drains_in_fifo_order() {
        let queue = RequestQueue::new(8);
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut groups = Groups::new();

        for name in ["a", "b", "c"] {
            queue.queue_boxed(ObjectId::next(), log_into(&log, name)).unwrap();
        }

        assert_eq!(queue.process(&mut groups), Ok(3));
        assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn newer_request_replaces_older_in_place() {
        let queue = RequestQueue::new(8);
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut groups = Groups::new();
        let (first, second) = (ObjectId::next(), ObjectId::next());

        queue.queue_boxed(first, log_into(&log, "first-old")).unwrap();
        queue.queue_boxed(second, log_into(&log, "second")).unwrap();
        queue.queue_boxed(first, log_into(&log, "first-new")).unwrap();
        assert_eq!(queue.len(), 2);

        queue.process(&mut groups).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["first-new", "second"]);
    }

    #[test]
    fn full_queue_rejects_new_senders_only() {
        let queue = RequestQueue::new(2);
        let (a, b) = (ObjectId::next(), ObjectId::next());
        queue.queue(a, |_| RequestStatus::Done).unwrap();
        queue.queue(b, |_| RequestStatus::Done).unwrap();

        assert_eq!(
            queue.queue(ObjectId::next(), |_| RequestStatus::Done),
            Err(RequestError::QueueFull { capacity: 2 })
        );
        // replacing an existing sender still works at capacity
        assert!(queue.queue(a, |_| RequestStatus::Done).is_ok());
    }

    #[test]
    fn retry_keeps_request_for_next_drain() {
        let queue = RequestQueue::new(4);
        let mut groups = Groups::new();
        let attempts = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&attempts);
        queue
            .queue(ObjectId::next(), move |_| {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    RequestStatus::Retry
                } else {
                    RequestStatus::Done
                }
            })
            .unwrap();

        assert_eq!(queue.process(&mut groups), Ok(0));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.process(&mut groups), Ok(1));
        assert!(queue.is_empty());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn requests_mutate_groups() {
        let queue = RequestQueue::default();
        let mut groups = Groups::new();
        let enemies = GroupKey::new("enemies");

        let key = enemies.clone();
        queue
            .queue(ObjectId::next(), move |groups| {
                groups.push(Marker, Some(key.clone()));
                RequestStatus::Done
            })
            .unwrap();

        queue.process(&mut groups).unwrap();
        assert_eq!(groups.group(&enemies).map(|g| g.len()), Some(1));
    }

    #[test]
    fn survives_poisoned_lock() {
        let queue = Arc::new(RequestQueue::new(4));
        queue.queue(ObjectId::next(), |_| RequestStatus::Done).unwrap();

        let poisoner = Arc::clone(&queue);
        let result = std::thread::spawn(move || {
            let _guard = poisoner.pending.lock().unwrap();
            panic!("poison the queue");
        })
        .join();
        assert!(result.is_err());
        assert!(queue.pending.is_poisoned());

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.process(&mut Groups::new()), Ok(1));
    }

    #[test]
    fn panicking_request_is_reported_and_the_rest_kept() {
        let queue = RequestQueue::new(8);
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut groups = Groups::new();
        let (a, b, c) = (ObjectId::next(), ObjectId::next(), ObjectId::next());

        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        queue
            .queue(a, move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                RequestStatus::Retry
            })
            .unwrap();
        queue.queue(b, |_| panic!("bad request")).unwrap();
        queue.queue_boxed(c, log_into(&log, "c")).unwrap();

        assert_eq!(
            queue.process(&mut groups),
            Err(SceneError::RequestPanicked { sender: b, message: "bad request".into() })
        );
        assert!(queue.contains(a));
        assert!(!queue.contains(b));
        assert!(queue.contains(c));

        // next drain picks up where the panic left off, retry first
        assert_eq!(queue.process(&mut groups), Ok(1));
        assert_eq!(*log.lock().unwrap(), vec!["c"]);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn carried_over_request_yields_to_a_newer_one() {
        let queue = Arc::new(RequestQueue::new(8));
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut groups = Groups::new();
        let (first, second) = (ObjectId::next(), ObjectId::next());

        // the first request queues a replacement for its own sender while
        // the batch runs
        let inner = Arc::clone(&queue);
        let replacement = log_into(&log, "first-new");
        let mut replacement = Some(replacement);
        queue
            .queue(first, move |_| {
                if let Some(request) = replacement.take() {
                    inner.queue_boxed(first, request).unwrap();
                }
                RequestStatus::Retry
            })
            .unwrap();
        queue.queue_boxed(second, log_into(&log, "second")).unwrap();

        assert_eq!(queue.process(&mut groups), Ok(1));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.process(&mut groups), Ok(1));
        assert_eq!(*log.lock().unwrap(), vec!["second", "first-new"]);
    }

    #[test]
    fn concurrent_senders_past_capacity_are_rejected() {
        const CAPACITY: usize = 4;
        const LATE: usize = 8;

        let queue = Arc::new(RequestQueue::new(CAPACITY));
        let early: Vec<ObjectId> = (0..CAPACITY).map(|_| ObjectId::next()).collect();
        for id in &early {
            queue.queue(*id, |_| RequestStatus::Done).unwrap();
        }

        let barrier = Arc::new(Barrier::new(LATE));
        let handles: Vec<_> = (0..LATE)
            .map(|_| {
                let queue = Arc::clone(&queue);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    queue.queue(ObjectId::next(), |_| RequestStatus::Done)
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(
                handle.join().unwrap(),
                Err(RequestError::QueueFull { capacity: CAPACITY })
            );
        }
        assert_eq!(queue.len(), CAPACITY);
        assert!(early.iter().all(|id| queue.contains(*id)));
        assert_eq!(queue.process(&mut Groups::new()), Ok(CAPACITY));
    }

    #[test]
    #[should_panic(expected = "Request queue capacity must be positive")]
    fn zero_capacity_panics() {
        RequestQueue::new(0);
    }

    #[test]
    fn contains_and_clear() {
        let queue = RequestQueue::new(4);
        let id = ObjectId::next();
        queue.queue(id, |_| RequestStatus::Done).unwrap();
        assert!(queue.contains(id));
        queue.clear();
        assert!(!queue.contains(id));
        assert_eq!(queue.capacity(), 4);
    }
}

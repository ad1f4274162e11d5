//=========================================================================
// Scene
//=========================================================================
//
// One game state: groups of objects, the scene's input bindings, its
// request queue and the user script driving it.
//
// Update (fork-join):
//   ┌ group A ─ thread ─ objects in order ┐
//   ├ group B ─ thread ─ objects in order ┼─ join ─ requests.process()
//   └ group C ─ thread ─ objects in order ┘          ─ prune_removed()
//
// Objects only touch their own state while the threads run; anything
// cross-group goes through the request queue and is applied after the
// join on the calling thread.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::fmt;
use std::thread;

use log::{debug, error, trace};

//=== Internal Dependencies ===============================================

use super::group::GroupKey;
use super::groups::Groups;
use super::request_queue::RequestQueue;
use super::{GameControl, SceneContext, SceneError, SceneKey, SceneScript};
use crate::core::camera::Camera;
use crate::core::graphics::Graphics;
use crate::core::input::{Action, ActionHandler, InputArgs, InputMap};

//=== Scene ===============================================================

pub struct Scene<S: SceneKey, A: Action> {
    key: S,
    groups: Groups,
    input_map: InputMap<A>,
    requests: RequestQueue,
    script: Box<dyn SceneScript<S, A>>,
}

impl<S: SceneKey, A: Action> Scene<S, A> {
    /// # Panics
    ///
    /// Panics if `request_capacity == 0`.
    pub fn new(key: S, script: Box<dyn SceneScript<S, A>>, request_capacity: usize) -> Self {
        Self {
            key,
            groups: Groups::new(),
            input_map: InputMap::new(),
            requests: RequestQueue::new(request_capacity),
            script,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn key(&self) -> S {
        self.key
    }

    pub fn groups(&self) -> &Groups {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut Groups {
        &mut self.groups
    }

    pub fn input_map(&self) -> &InputMap<A> {
        &self.input_map
    }

    pub fn input_map_mut(&mut self) -> &mut InputMap<A> {
        &mut self.input_map
    }

    pub fn requests(&self) -> &RequestQueue {
        &self.requests
    }

    //--- Lifecycle --------------------------------------------------------

    pub fn enter(&mut self, camera: &mut Camera, control: &mut GameControl<S>) {
        debug!(target: "little::scene", "Entering scene {:?}", self.key);
        let mut ctx = SceneContext {
            key: self.key,
            groups: &mut self.groups,
            input_map: &mut self.input_map,
            camera,
            control,
        };
        self.script.on_enter(&mut ctx);
    }

    /// Updates every group on its own thread, then applies the queued
    /// requests and drops removed groups.
    ///
    /// Returns the number of objects updated. If a group panicked the
    /// remaining groups still finish and the requests are still applied;
    /// the first panic is then returned as `SceneError::GroupPanicked`.
    /// A panicking request is returned as `SceneError::RequestPanicked`
    /// unless a group panic was already reported.
    pub fn update(&mut self, tick: f64) -> Result<usize, SceneError> {
        let groups = &mut self.groups;
        let requests = &self.requests;

        let outcomes: Vec<(GroupKey, thread::Result<usize>)> = thread::scope(|scope| {
            let handles: Vec<_> = groups
                .iter_mut()
                .filter(|(_, group)| !group.is_removed())
                .map(|(key, group)| {
                    let handle = scope.spawn(move || group.update(tick, key, requests));
                    (key.clone(), handle)
                })
                .collect();

            handles
                .into_iter()
                .map(|(key, handle)| (key, handle.join()))
                .collect()
        });

        let mut updated = 0;
        let mut failure = None;
        for (group, outcome) in outcomes {
            match outcome {
                Ok(count) => updated += count,
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    error!(
                        target: "little::scene",
                        "Group {} panicked in scene {:?}: {}", group, self.key, message
                    );
                    if failure.is_none() {
                        failure = Some(SceneError::GroupPanicked { group, message });
                    }
                }
            }
        }

        let processed = self.process_requests();
        self.groups.prune_removed();

        match (failure, processed) {
            (Some(err), _) | (None, Err(err)) => Err(err),
            (None, Ok(_)) => Ok(updated),
        }
    }

    /// Applies every queued request; returns how many completed.
    ///
    /// # Errors
    ///
    /// [`SceneError::RequestPanicked`] if a request panicked. Requests
    /// queued behind it are kept for the next call.
    pub fn process_requests(&mut self) -> Result<usize, SceneError> {
        let done = self.requests.process(&mut self.groups)?;
        if done > 0 {
            trace!(target: "little::scene", "Processed {} requests", done);
        }
        Ok(done)
    }

    pub fn draw(&self, graphics: &mut Graphics) {
        self.groups.draw(graphics);
    }

    /// Forwards a resolved action to the script.
    pub fn dispatch(
        &mut self,
        action: A,
        args: &InputArgs,
        camera: &mut Camera,
        control: &mut GameControl<S>,
    ) {
        let mut ctx = SceneContext {
            key: self.key,
            groups: &mut self.groups,
            input_map: &mut self.input_map,
            camera,
            control,
        };
        self.script.on_action(action, args, &mut ctx);
    }

    /// Runs the script's `on_exit`, then closes every object. Pending
    /// requests are discarded.
    pub fn close(&mut self, camera: &mut Camera, control: &mut GameControl<S>) {
        debug!(target: "little::scene", "Closing scene {:?}", self.key);
        let mut ctx = SceneContext {
            key: self.key,
            groups: &mut self.groups,
            input_map: &mut self.input_map,
            camera,
            control,
        };
        self.script.on_exit(&mut ctx);
        self.groups.on_close();
        self.requests.clear();
    }

    /// Borrows the scene as the receiver of input dispatch.
    pub fn handler<'a>(
        &'a mut self,
        camera: &'a mut Camera,
        control: &'a mut GameControl<S>,
    ) -> SceneDispatch<'a, S, A> {
        SceneDispatch {
            scene: self,
            camera,
            control,
        }
    }
}

impl<S: SceneKey, A: Action> fmt::Debug for Scene<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("key", &self.key)
            .field("groups", &self.groups.len())
            .field("objects", &self.groups.object_count())
            .field("requests", &self.requests)
            .finish_non_exhaustive()
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::from("unknown panic")
    }
}

//=== SceneDispatch =======================================================

/// A scene plus what its script needs while handling input.
pub struct SceneDispatch<'a, S: SceneKey, A: Action> {
    scene: &'a mut Scene<S, A>,
    camera: &'a mut Camera,
    control: &'a mut GameControl<S>,
}

impl<S: SceneKey, A: Action> ActionHandler<A> for SceneDispatch<'_, S, A> {
    fn input_map(&self) -> &InputMap<A> {
        &self.scene.input_map
    }

    fn handle(&mut self, action: A, args: &InputArgs) {
        self.scene.dispatch(action, args, self.camera, self.control);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

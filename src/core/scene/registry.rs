//=========================================================================
// Scene Registry
//=========================================================================
//
// Scene factories by key. A scene is built fresh every time the game
// switches to it, so leaving and re-entering starts from scratch.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::scene::Scene;
use super::{SceneKey, SceneScript};
use crate::core::game::EngineError;
use crate::core::input::Action;

//=== Types ===============================================================

pub type SceneFactory<S, A> = Box<dyn Fn() -> Box<dyn SceneScript<S, A>> + Send>;

//=== SceneRegistry =======================================================

pub struct SceneRegistry<S: SceneKey, A: Action> {
    factories: HashMap<S, SceneFactory<S, A>>,
}

impl<S: SceneKey, A: Action> SceneRegistry<S, A> {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers the script factory for `key`, replacing any earlier one.
    pub fn register<F>(&mut self, key: S, factory: F)
    where
        F: Fn() -> Box<dyn SceneScript<S, A>> + Send + 'static,
    {
        if self.factories.insert(key, Box::new(factory)).is_some() {
            warn!(
                target: "little::scene",
                "Scene {:?} was already registered and has been replaced", key
            );
        } else {
            debug!(target: "little::scene", "Registered scene {:?}", key);
        }
    }

    /// Builds a fresh scene for `key`.
    pub fn create(&self, key: S, request_capacity: usize) -> Result<Scene<S, A>, EngineError> {
        let factory = self
            .factories
            .get(&key)
            .ok_or_else(|| EngineError::UnknownScene(format!("{:?}", key)))?;
        Ok(Scene::new(key, factory(), request_capacity))
    }

    pub fn contains(&self, key: S) -> bool {
        self.factories.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl<S: SceneKey, A: Action> Default for SceneRegistry<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SceneKey, A: Action> fmt::Debug for SceneRegistry<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.factories.keys()).finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::SceneContext;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Level {
        Title,
        Play,
    }

    impl SceneKey for Level {}

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Act {
        Start,
    }

    impl Action for Act {}

    struct Title;

    impl SceneScript<Level, Act> for Title {
        fn on_enter(&mut self, ctx: &mut SceneContext<'_, Level, Act>) {
            ctx.input_map.bind(crate::core::input::KeyCode::Enter, Act::Start);
        }
    }

    #[test]
    fn create_builds_fresh_scenes() {
        let mut registry = SceneRegistry::<Level, Act>::new();
        registry.register(Level::Title, || Box::new(Title));
        assert!(registry.contains(Level::Title));
        assert_eq!(registry.len(), 1);

        let first = registry.create(Level::Title, 8);
        let second = registry.create(Level::Title, 8);
        assert_eq!(first.map(|s| s.key()).ok(), Some(Level::Title));
        assert_eq!(second.map(|s| s.requests().capacity()).ok(), Some(8));
    }

    #[test]
    fn unknown_scene_is_an_error() {
        let registry = SceneRegistry::<Level, Act>::default();
        assert!(registry.is_empty());
        let err = registry.create(Level::Play, 8).unwrap_err();
        assert!(matches!(err, EngineError::UnknownScene(ref name) if name == "Play"));
    }

    #[test]
    fn register_replaces() {
        let mut registry = SceneRegistry::<Level, Act>::new();
        registry.register(Level::Title, || Box::new(Title));
        registry.register(Level::Title, || Box::new(Title));
        assert_eq!(registry.len(), 1);
        assert_eq!(format!("{:?}", registry), "{Title}");
    }
}

//=========================================================================
// Input Map
//=========================================================================
//
// Per-scene bindings from input codes to game actions.
//
// Architecture:
//   (InputCode, Trigger) → HashMap → Action
//
// Lookup falls back from a concrete key to its key set, so a scene can
// bind `KeySet::Alpha` once instead of every letter.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::warn;

//=== Internal Dependencies ===============================================

use super::action::{Action, InputCode, Trigger};

//=== InputMap ============================================================

#[derive(Debug, Clone)]
pub struct InputMap<A: Action> {
    bindings: HashMap<(InputCode, Trigger), A>,
}

impl<A: Action> InputMap<A> {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a press of `code`.
    pub fn bind(&mut self, code: impl Into<InputCode>, action: A) {
        self.bind_trigger(code.into(), Trigger::Press, action);
    }

    pub fn bind_release(&mut self, code: impl Into<InputCode>, action: A) {
        self.bind_trigger(code.into(), Trigger::Release, action);
    }

    /// Binds `code` to fire every tick while it is held.
    pub fn bind_hold(&mut self, code: impl Into<InputCode>, action: A) {
        self.bind_trigger(code.into(), Trigger::Hold, action);
    }

    pub fn bind_trigger(&mut self, code: InputCode, trigger: Trigger, action: A) {
        if let Some(previous) = self.bindings.insert((code, trigger), action) {
            if previous != action {
                warn!(
                    target: "little::input",
                    "Rebinding {:?} ({:?}): {:?} → {:?}", code, trigger, previous, action
                );
            }
        }
    }

    /// Removes every trigger bound to `code`.
    pub fn unbind(&mut self, code: impl Into<InputCode>) {
        let code = code.into();
        self.bindings.retain(|(bound, _), _| *bound != code);
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    //--- Lookup -----------------------------------------------------------

    /// Action for `code`, falling back to its key set.
    pub fn resolve(&self, code: InputCode, trigger: Trigger) -> Option<A> {
        self.bindings.get(&(code, trigger)).copied().or_else(|| {
            code.key_set()
                .and_then(|set| self.bindings.get(&(set, trigger)).copied())
        })
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<A: Action> Default for InputMap<A> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

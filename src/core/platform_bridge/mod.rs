//=========================================================================
// Platform Bridge
//=========================================================================
//
// Contract between the platform layer (winit) and the core logic thread.
//
// Components:
// - `interface`: event and error types crossing the channel
// - `event_collector`: core-side draining of the channel once per tick
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Public API ==========================================================

pub use interface::PlatformError;

//=== Internal API ========================================================

pub(crate) use event_collector::EventCollector;
pub(crate) use interface::PlatformEvent;

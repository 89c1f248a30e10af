//=========================================================================
// Runtime Bridge
//=========================================================================
//
// Bridges other threads (input, physics, tools) with the logic thread.
//
// Components:
// - `interface`: the events that cross the thread boundary
// - `command_collector`: logic-side draining and batching of those events
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod command_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use command_collector::{CommandCollector, TickControl};
pub use interface::LevelEvent;

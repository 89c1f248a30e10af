//=========================================================================
// Point Rush — Library Root
//
// Controller for a timed scoring challenge inside a single game level.
//
// Responsibilities:
// - Start the clock once the player character moves far enough
// - Credit points as scorable objects are collected
// - End the session on timeout or when every point has been collected
// - Report status as two lines of text
//
// Typical usage:
// ```no_run
// use point_rush::prelude::*;
//
// let level = Level::load(SessionConfig::default(), World::new(), TextDisplay::new());
// let handle = RuntimeBuilder::new().build().spawn(level);
// let level = handle.shutdown();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the session state machine, the world model it reads and
// the level wiring. Callers with their own frame loop use it directly.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `runtime` is the optional fixed-rate driver; only its types are public.
//
mod runtime;

//--- Public Exports ------------------------------------------------------

pub use runtime::{LevelHandle, Runtime, RuntimeBuilder};

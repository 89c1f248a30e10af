//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use point_rush::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime
pub use crate::runtime::{LevelHandle, Runtime, RuntimeBuilder};

// Level wiring
pub use crate::core::level::{Level, LevelError};
pub use crate::core::LevelEvent;

// Session
pub use crate::core::session::{
    ChannelDisplay, ConfigError, DisplaySink, DisplayUpdate, Session, SessionConfig,
    SessionOutcome, SessionState, TextDisplay,
};

// World
pub use crate::core::world::{
    CharacterId, CharacterSource, GamePoint, PointId, Scorable, ScorableRegistry, ScoreEvent,
    ScoreListener, World, WorldCommand,
};

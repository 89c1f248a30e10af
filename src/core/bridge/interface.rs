//=========================================================================
// Runtime Bridge Interface
//=========================================================================
//
// Events sent to the logic thread through the runtime's channel.
//
//=========================================================================

use crate::core::world::WorldCommand;

/// Events sent from other threads to the logic thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LevelEvent {
    /// A world mutation, applied before the next tick.
    World(WorldCommand),

    /// Stop ticking and hand the level back.
    Shutdown,
}

impl From<WorldCommand> for LevelEvent {
    fn from(command: WorldCommand) -> Self {
        Self::World(command)
    }
}

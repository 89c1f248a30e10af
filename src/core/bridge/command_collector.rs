//=========================================================================
// Command Collector
//=========================================================================
//
// Level event collector with bounded polling and shutdown detection.
//
// Architecture:
//   Receiver<LevelEvent> → collect_frame() → commands → TickControl
//
// Bounded polling keeps one flood of commands from starving the tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::LevelEvent;
use crate::core::world::WorldCommand;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== CommandCollector ====================================================

/// Collects pending level events into a per-frame command batch.
pub(crate) struct CommandCollector {
    receiver: Receiver<LevelEvent>,
    commands: Vec<WorldCommand>,
}

impl CommandCollector {
    pub(crate) fn new(receiver: Receiver<LevelEvent>) -> Self {
        Self {
            receiver,
            commands: Vec::with_capacity(16),
        }
    }

    /// Collects pending events (bounded to prevent starvation).
    ///
    /// Commands received before a shutdown in the same frame are kept so
    /// the caller can still apply them.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        const MAX_EVENTS_PER_FRAME: usize = 100;

        self.commands.clear();
        let mut drained = 0;

        while drained < MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(LevelEvent::World(command)) => {
                    self.commands.push(command);
                    drained += 1;
                }
                Ok(LevelEvent::Shutdown) => return TickControl::Exit,
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_EVENTS_PER_FRAME {
            warn!("Command queue backlog: drained {} commands this frame", drained);
        }

        TickControl::Continue
    }

    /// Commands collected this frame, in arrival order.
    pub(crate) fn commands(&self) -> &[WorldCommand] {
        &self.commands
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

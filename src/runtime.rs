//=========================================================================
// Runtime
//
// Fixed-rate driver for a loaded level.
//
// Architecture:
// ```text
//     RuntimeBuilder  ──build()──>  Runtime  ──spawn(level)──>  LevelHandle
//         │                                                        │
//         ├─ with_tps()                        send(WorldCommand) ─┤
//         └─ with_channel_capacity()                  shutdown() ──┘ → Level
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::level::Level;
use crate::core::session::DisplaySink;
use crate::core::{LevelEvent, LevelOrchestrator};

//=== RuntimeBuilder ======================================================

/// Builder for configuring and constructing a [`Runtime`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (ticks per second)
/// - **Channel capacity**: 128 events
///
/// # Examples
///
/// ```no_run
/// use glam::Vec3;
/// use point_rush::prelude::*;
///
/// let mut world = World::new();
/// let player = world.spawn_character(Vec3::ZERO);
/// world.spawn_point(10);
///
/// let level = Level::load(SessionConfig::default(), world, TextDisplay::new());
/// let handle = RuntimeBuilder::new().with_tps(120.0).build().spawn(level);
///
/// handle.send(WorldCommand::MoveCharacter { id: player, to: Vec3::X });
/// let _level = handle.shutdown().expect("logic thread panicked");
/// ```
pub struct RuntimeBuilder {
    tps: f64,
    channel_capacity: usize,
}

impl RuntimeBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
        }
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// The session itself does not depend on the rate; higher values only
    /// make the displayed time and end detection more precise.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the capacity of the command channel into the logic thread.
    ///
    /// Senders block while the channel is full.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Builds the runtime.
    pub fn build(self) -> Runtime {
        info!("Building runtime (TPS: {}, channel: {})", self.tps, self.channel_capacity);

        Runtime {
            tps: self.tps,
            channel_capacity: self.channel_capacity,
        }
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Runtime =============================================================

/// Runs a [`Level`] on its own logic thread.
///
/// ```text
/// Caller thread                   Logic thread (@ TPS)
///   LevelHandle ──LevelEvent──►    CommandCollector
///                                    └─► Level::apply / Level::tick
/// ```
pub struct Runtime {
    tps: f64,
    channel_capacity: usize,
}

impl Runtime {
    /// Moves the level onto a new logic thread and starts ticking it.
    pub fn spawn<D>(self, level: Level<D>) -> LevelHandle<D>
    where
        D: DisplaySink + Send + 'static,
    {
        info!("Starting runtime (TPS: {})", self.tps);

        let (sender, receiver): (Sender<LevelEvent>, Receiver<LevelEvent>) =
            bounded(self.channel_capacity);

        let thread = LevelOrchestrator::new(level, receiver).spawn_core_thread(self.tps);
        info!("Logic thread spawned");

        LevelHandle { sender, thread }
    }
}

//=== LevelHandle =========================================================

/// Caller-side handle to a level running on a logic thread.
pub struct LevelHandle<D: DisplaySink> {
    sender: Sender<LevelEvent>,
    thread: thread::JoinHandle<Level<D>>,
}

impl<D: DisplaySink> LevelHandle<D> {
    /// Queues an event for the next frame. Returns false if the logic
    /// thread has already stopped.
    pub fn send(&self, event: impl Into<LevelEvent>) -> bool {
        if self.sender.send(event.into()).is_err() {
            warn!("Logic thread is gone, event dropped");
            return false;
        }
        true
    }

    /// A sender other threads can use to feed the level.
    pub fn sender(&self) -> Sender<LevelEvent> {
        self.sender.clone()
    }

    /// Stops the logic thread and returns the level.
    ///
    /// Commands queued before the call are applied first. Returns `Err`
    /// with the panic payload if the logic thread panicked.
    pub fn shutdown(self) -> thread::Result<Level<D>> {
        // A send error means the thread already exited; join reports why.
        let _ = self.sender.send(LevelEvent::Shutdown);

        let result = self.thread.join();
        match &result {
            Ok(_) => info!("Logic thread terminated cleanly"),
            Err(e) => error!("Logic thread panicked: {:?}", e),
        }
        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crossbeam_channel::unbounded;
    use glam::Vec3;

    use crate::core::session::{
        ChannelDisplay, DisplayUpdate, SessionConfig, SessionOutcome, SessionState, TextDisplay,
    };
    use crate::core::world::{CharacterSource, World, WorldCommand};

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn wait_for(
        updates: &Receiver<DisplayUpdate>,
        accept: impl Fn(&DisplayUpdate) -> bool,
    ) -> Option<DisplayUpdate> {
        while let Ok(update) = updates.recv_timeout(Duration::from_secs(5)) {
            if accept(&update) {
                return Some(update);
            }
        }
        None
    }

    //=====================================================================
    // RuntimeBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = RuntimeBuilder::new();
        assert_eq!(builder.tps, 60.0);
        assert_eq!(builder.channel_capacity, 128);
    }

    #[test]
    fn builder_with_tps() {
        let builder = RuntimeBuilder::new().with_tps(120.0);
        assert_eq!(builder.tps, 120.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_zero() {
        RuntimeBuilder::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_negative() {
        RuntimeBuilder::new().with_tps(-60.0);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        RuntimeBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let runtime = RuntimeBuilder::new()
            .with_tps(120.0)
            .with_channel_capacity(256)
            .build();

        assert_eq!(runtime.tps, 120.0);
        assert_eq!(runtime.channel_capacity, 256);
    }

    //=====================================================================
    // Runtime Tests
    //=====================================================================

    #[test]
    fn runtime_plays_level_to_max_score() {
        init_logging();

        let mut world = World::new();
        let player = world.spawn_character(Vec3::ZERO);
        let point = world.spawn_point(5);

        let (tx, updates) = unbounded();
        let config = SessionConfig::new().with_start_threshold(2.0);
        let level = Level::load(config, world, ChannelDisplay::new(tx));

        let handle = RuntimeBuilder::new().with_tps(200.0).build().spawn(level);

        assert!(handle.send(WorldCommand::MoveCharacter {
            id: player,
            to: Vec3::new(3.0, 0.0, 0.0),
        }));

        // The points line first appears on the first running tick.
        let running = wait_for(&updates, |u| matches!(u, DisplayUpdate::Points(_)));
        assert_eq!(running, Some(DisplayUpdate::Points("Points: 0/5".to_owned())));

        assert!(handle.send(WorldCommand::Contact(point)));

        let ended = wait_for(&updates, |u| {
            matches!(u, DisplayUpdate::Time(text) if text.ends_with("Max Score Reached"))
        });
        assert!(ended.is_some());

        let level = handle.shutdown().expect("logic thread panicked");
        let session = level.session().expect("active level");
        assert_eq!(session.state(), SessionState::Ended);
        assert_eq!(session.outcome(), Some(SessionOutcome::MaxScoreReached));
        assert_eq!(session.current_points(), 5);
        assert!(level.world().scorables().is_empty());
    }

    #[test]
    fn shutdown_applies_queued_commands() {
        init_logging();

        let mut world = World::new();
        let player = world.spawn_character(Vec3::ZERO);

        let level = Level::load(SessionConfig::default(), world, TextDisplay::new());
        let handle = RuntimeBuilder::new().build().spawn(level);

        handle.send(WorldCommand::MoveCharacter { id: player, to: Vec3::new(0.0, 4.0, 0.0) });
        let level = handle.shutdown().expect("logic thread panicked");

        let position = level.world().character(player).map(|c| c.position());
        assert_eq!(position, Some(Vec3::new(0.0, 4.0, 0.0)));
    }

    #[test]
    fn faulted_level_runs_inert() {
        init_logging();

        let level = Level::load(SessionConfig::default(), World::new(), TextDisplay::new());
        let handle = RuntimeBuilder::new().with_tps(500.0).build().spawn(level);

        thread::sleep(Duration::from_millis(20));
        let level = handle.shutdown().expect("logic thread panicked");

        assert!(level.fault().is_some());
        assert_eq!(level.display().time_text(), "");
    }

    #[test]
    fn send_after_thread_exit_reports_failure() {
        let level = Level::load(SessionConfig::default(), World::new(), TextDisplay::new());
        let handle = RuntimeBuilder::new().build().spawn(level);

        let sender = handle.sender();
        sender.send(LevelEvent::Shutdown).expect("channel open");

        // Wait until the logic thread has dropped its receiver.
        while !handle.thread.is_finished() {
            thread::sleep(Duration::from_millis(1));
        }

        assert!(!handle.send(LevelEvent::Shutdown));
        assert!(handle.shutdown().is_ok());
    }
}

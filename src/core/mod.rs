//=========================================================================
// Core Systems
//
// Session logic, the world it reads from, and the fixed-rate loop that
// drives both on a dedicated logic thread.
//
// Responsibilities:
// - Track the timed scoring challenge (`session`)
// - Hold characters and scorable objects (`world`)
// - Wire them together at level load (`level`)
// - Receive world commands over a crossbeam channel (`bridge`)
// - Tick the level at a fixed rate with a monotonic clock
//
// Notes:
// Nothing in `session` assumes a tick rate; the orchestrator below is one
// possible scheduler. Callers with their own frame loop can drive
// `Level::tick` or `Session::tick` directly.
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================
use crossbeam_channel::Receiver;
use log::info;

//=== Module Declarations =================================================
pub(crate) mod bridge;
pub mod level;
pub mod session;
pub mod world;

//=== Public API ==========================================================
pub use bridge::LevelEvent;

//=== Internal Modules ====================================================
use bridge::{CommandCollector, TickControl};
use level::Level;
use session::DisplaySink;

//=== LevelOrchestrator ===================================================
//
// Owns a loaded level and the command collector feeding it, and runs them
// on a logic thread until shutdown.
//
pub(crate) struct LevelOrchestrator<D: DisplaySink> {
    level: Level<D>,
    collector: CommandCollector,
}

impl<D: DisplaySink + Send + 'static> LevelOrchestrator<D> {
    //--- Construction -----------------------------------------------------
    pub fn new(level: Level<D>, receiver: Receiver<LevelEvent>) -> Self {
        Self {
            level,
            collector: CommandCollector::new(receiver),
        }
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Spawns the logic thread ticking the level at `tps` ticks per second.
    //
    // Each tick:
    //  1. Collects pending world commands
    //  2. Applies them to the level
    //  3. Ticks the level with seconds elapsed since the thread started
    //  4. Sleeps the remainder of the frame
    //
    // The thread returns the level when it exits.
    //
    pub fn spawn_core_thread(self, tps: f64) -> thread::JoinHandle<Level<D>> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let mut level = self.level;
            let mut collector = self.collector;
            let clock = Instant::now();

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather commands ------------------------------
                let control = collector.collect_frame();

                //--- Step 2: Apply them -----------------------------------
                for &command in collector.commands() {
                    level.apply(command);
                }

                if control == TickControl::Exit {
                    info!("Logic thread exiting.");
                    break;
                }

                //--- Step 3: Tick -----------------------------------------
                level.tick(clock.elapsed().as_secs_f64());

                //--- Step 4: Maintain pacing ------------------------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }

            level
        })
    }
}

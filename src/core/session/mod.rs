//=========================================================================
// Session
//=========================================================================
//
// State machine of one timed scoring challenge.
//
// Architecture:
//   NotStarted ──moved > threshold──> Running ──timeout | max score──> Ended
//
// Per tick:
//   1. collect_scores()  drain ScoreEvents delivered since the last tick
//   2. advance the state machine with `now` and the character position
//   3. write status text to the DisplaySink
//
// Timeout is evaluated before max score. The session never regresses and
// is not reused after it ends.
//
//=========================================================================

//=== Module Declarations =================================================

mod config;
mod display;

//=== Public API ==========================================================

pub use config::{ConfigError, SessionConfig};
pub use display::{
    format_points, format_time_remaining, ChannelDisplay, DisplaySink, DisplayUpdate, TextDisplay,
};

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver};
use glam::Vec3;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::world::{Scorable, ScorableRegistry, ScoreEvent, ScoreListener};

//=== SessionState ========================================================

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the character to move past the start threshold.
    NotStarted,

    /// Clock running, points being collected.
    Running,

    /// Finished; ticks are no-ops.
    Ended,
}

//=== SessionOutcome ======================================================

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    TimedOut,
    MaxScoreReached,
}

impl SessionOutcome {
    /// Status suffix appended to the time line.
    pub fn message(self) -> &'static str {
        match self {
            Self::TimedOut => "Time out",
            Self::MaxScoreReached => "Max Score Reached",
        }
    }
}

//=== Session =============================================================

/// Timed scoring challenge driven by [`Session::tick`].
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use point_rush::core::session::{Session, SessionConfig, SessionState, TextDisplay};
/// use point_rush::core::world::{GamePoint, ScorableRegistry};
///
/// let mut registry = ScorableRegistry::new();
/// registry.spawn(GamePoint::new(5));
///
/// let config = SessionConfig::new().with_start_threshold(1.0);
/// let mut session = Session::new(config, Vec3::ZERO, TextDisplay::new());
///
/// session.tick(0.5, Vec3::new(2.0, 0.0, 0.0), &mut registry);
/// assert_eq!(session.state(), SessionState::Running);
/// assert_eq!(session.max_points(), 5);
/// ```
pub struct Session<D: DisplaySink> {
    config: SessionConfig,
    state: SessionState,
    outcome: Option<SessionOutcome>,
    initial_position: Vec3,
    started_at: Option<f64>,
    remaining_secs: f64,
    current_points: u32,
    max_points: u32,
    listener: ScoreListener,
    scores: Receiver<ScoreEvent>,
    display: D,
}

impl<D: DisplaySink> Session<D> {
    //--- Construction -----------------------------------------------------

    /// Creates a session anchored at the character's spawn position.
    ///
    /// Shows "Move to start" and clears the points line.
    pub fn new(config: SessionConfig, initial_position: Vec3, mut display: D) -> Self {
        let (sender, scores) = unbounded();

        display.set_time_text("Move to start");
        display.set_points_text("");

        Self {
            config,
            state: SessionState::NotStarted,
            outcome: None,
            initial_position,
            started_at: None,
            remaining_secs: f64::from(config.time_limit_secs),
            current_points: 0,
            max_points: 0,
            listener: ScoreListener::new(sender),
            scores,
            display,
        }
    }

    //--- Update Loop ------------------------------------------------------

    /// Advances the session by one simulation step.
    ///
    /// `now` is in seconds and must not decrease between calls. Scoring
    /// events delivered since the previous call are applied first.
    pub fn tick<T: Scorable>(&mut self, now: f64, position: Vec3, registry: &mut ScorableRegistry<T>) {
        self.collect_scores(registry);

        match self.state {
            SessionState::NotStarted => {
                if self.initial_position.distance(position) > self.config.start_threshold {
                    self.begin(now, registry);
                }
            }
            SessionState::Running => self.advance(now, registry),
            SessionState::Ended => {}
        }
    }

    //--- Scoring ----------------------------------------------------------

    /// Applies every pending scoring event. Returns the points gained.
    pub fn collect_scores<T: Scorable>(&mut self, registry: &mut ScorableRegistry<T>) -> u32 {
        let pending: Vec<ScoreEvent> = self.scores.try_iter().collect();
        pending
            .into_iter()
            .map(|event| self.on_point_scored(event, registry))
            .sum()
    }

    /// Scoring callback: credits the points and removes the object.
    ///
    /// Ignored unless the session is running. Returns the points credited.
    pub fn on_point_scored<T: Scorable>(
        &mut self,
        event: ScoreEvent,
        registry: &mut ScorableRegistry<T>,
    ) -> u32 {
        if self.state != SessionState::Running {
            debug!("Ignoring {:?} while {:?}", event, self.state);
            return 0;
        }

        self.current_points = self.current_points.saturating_add(event.points);
        registry.despawn(event.point);

        debug!(
            "Scored {} from {:?} ({}/{})",
            event.points, event.point, self.current_points, self.max_points
        );
        event.points
    }

    //--- Transitions ------------------------------------------------------

    fn begin<T: Scorable>(&mut self, now: f64, registry: &mut ScorableRegistry<T>) {
        self.state = SessionState::Running;
        self.started_at = Some(now);
        self.remaining_secs = f64::from(self.config.time_limit_secs);

        for id in registry.ids() {
            if let Some(object) = registry.get_mut(id) {
                object.subscribe(self.listener.clone());
                self.max_points = self.max_points.saturating_add(object.point_value());
            }
        }

        info!(
            "Session started at {:.3}s ({} scorables, {} points available)",
            now,
            registry.len(),
            self.max_points
        );
    }

    fn advance<T: Scorable>(&mut self, now: f64, registry: &mut ScorableRegistry<T>) {
        let Some(started_at) = self.started_at else {
            return;
        };

        self.remaining_secs = f64::from(self.config.time_limit_secs) - (now - started_at);

        let mut time_text = format_time_remaining(self.remaining_secs);
        self.display
            .set_points_text(&format_points(self.current_points, self.max_points));

        let outcome = if self.remaining_secs <= 0.0 {
            Some(SessionOutcome::TimedOut)
        } else if self.current_points == self.max_points {
            Some(SessionOutcome::MaxScoreReached)
        } else {
            None
        };

        if let Some(outcome) = outcome {
            time_text.push('\n');
            time_text.push_str(outcome.message());
            self.finish(outcome, registry);
        }

        self.display.set_time_text(&time_text);
    }

    fn finish<T: Scorable>(&mut self, outcome: SessionOutcome, registry: &mut ScorableRegistry<T>) {
        self.state = SessionState::Ended;
        self.outcome = Some(outcome);

        let listener_id = self.listener.id();
        for id in registry.ids() {
            if let Some(object) = registry.get_mut(id) {
                object.unsubscribe(listener_id);
            }
        }

        info!(
            "Session ended: {} ({}/{} points)",
            outcome.message(),
            self.current_points,
            self.max_points
        );
    }

    //--- Queries ----------------------------------------------------------

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Why the session ended, once it has.
    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.outcome
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn initial_position(&self) -> Vec3 {
        self.initial_position
    }

    /// Time the session started, once running.
    pub fn started_at(&self) -> Option<f64> {
        self.started_at
    }

    /// Seconds left as of the last tick. `None` before the session starts.
    pub fn remaining_secs(&self) -> Option<f64> {
        self.started_at.map(|_| self.remaining_secs)
    }

    pub fn current_points(&self) -> u32 {
        self.current_points
    }

    /// Points available, fixed when the session starts.
    pub fn max_points(&self) -> u32 {
        self.max_points
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Consumes the session and returns its display.
    pub fn into_display(self) -> D {
        self.display
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

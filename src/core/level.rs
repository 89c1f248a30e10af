//=========================================================================
// Level
//=========================================================================
//
// Level-load wiring between the world and the session.
//
// On load the level looks up the single character source, anchors the
// session at its position and from then on feeds it the character's
// position every tick. A world without exactly one character is a
// configuration fault: it is logged and the level stays inert.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::session::{DisplaySink, Session, SessionConfig};
use crate::core::world::{CharacterId, CharacterSource, World, WorldCommand};

//=== LevelError ==========================================================

/// Problems detected while loading a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelError {
    /// The world must contain exactly one character source.
    CharacterSourceCount { found: usize },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CharacterSourceCount { found } => {
                write!(f, "Expecting exactly one character source, found {}", found)
            }
        }
    }
}

impl std::error::Error for LevelError {}

//=== Controller ==========================================================

enum Controller<D: DisplaySink> {
    Active {
        character: CharacterId,
        session: Session<D>,
    },
    Faulted {
        error: LevelError,
        display: D,
    },
}

//=== Level ===============================================================

/// A loaded level: the world plus the session that scores it.
pub struct Level<D: DisplaySink> {
    world: World,
    controller: Controller<D>,
}

impl<D: DisplaySink> Level<D> {
    //--- Construction -----------------------------------------------------

    /// Loads a level.
    ///
    /// Never fails outright: a world with zero or several characters is
    /// reported through [`Level::fault`] and the level ignores ticks.
    pub fn load(config: SessionConfig, world: World, display: D) -> Self {
        let found = world.characters().len();

        let controller = match world.character_ids().next() {
            Some(character) if found == 1 => {
                let position = world
                    .character(character)
                    .map(|c| c.position())
                    .unwrap_or_default();

                info!(
                    "Level loaded: {} scorables, start threshold {}, time limit {}s",
                    world.scorables().len(),
                    config.start_threshold,
                    config.time_limit_secs
                );

                Controller::Active {
                    character,
                    session: Session::new(config, position, display),
                }
            }
            _ => {
                let error = LevelError::CharacterSourceCount { found };
                error!("{}", error);
                Controller::Faulted { error, display }
            }
        };

        Self { world, controller }
    }

    //--- Update Loop ------------------------------------------------------

    /// Advances the session with the character's current position.
    pub fn tick(&mut self, now: f64) {
        let Controller::Active { character, session } = &mut self.controller else {
            return;
        };

        let Some(position) = self.world.character(*character).map(|c| c.position()) else {
            return;
        };

        session.tick(now, position, self.world.scorables_mut());
    }

    /// Applies a world command.
    ///
    /// Contacts are delivered to the session right away, so the points
    /// are already credited when this returns.
    pub fn apply(&mut self, command: WorldCommand) -> bool {
        let changed = self.world.apply(command);

        if let (WorldCommand::Contact(_), Controller::Active { session, .. }) =
            (command, &mut self.controller)
        {
            session.collect_scores(self.world.scorables_mut());
        }

        changed
    }

    //--- Queries ----------------------------------------------------------

    /// The configuration fault detected at load time, if any.
    pub fn fault(&self) -> Option<LevelError> {
        match &self.controller {
            Controller::Active { .. } => None,
            Controller::Faulted { error, .. } => Some(*error),
        }
    }

    /// The session, unless the level is faulted.
    pub fn session(&self) -> Option<&Session<D>> {
        match &self.controller {
            Controller::Active { session, .. } => Some(session),
            Controller::Faulted { .. } => None,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn display(&self) -> &D {
        match &self.controller {
            Controller::Active { session, .. } => session.display(),
            Controller::Faulted { display, .. } => display,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::{SessionOutcome, SessionState, TextDisplay};
    use glam::Vec3;

    fn config() -> SessionConfig {
        SessionConfig::new()
            .with_start_threshold(2.0)
            .with_time_limit_secs(120)
    }

    #[test]
    fn load_anchors_session_at_character() {
        let mut world = World::new();
        world.spawn_character(Vec3::new(10.0, 0.0, 0.0));
        world.spawn_point(5);

        let level = Level::load(config(), world, TextDisplay::new());

        assert!(level.fault().is_none());
        let session = level.session().expect("active level");
        assert_eq!(session.initial_position(), Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(level.display().time_text(), "Move to start");
    }

    #[test]
    fn no_character_is_a_fault() {
        let mut world = World::new();
        world.spawn_point(5);

        let mut level = Level::load(config(), world, TextDisplay::new());
        level.tick(0.0);
        level.tick(500.0);

        assert_eq!(level.fault(), Some(LevelError::CharacterSourceCount { found: 0 }));
        assert!(level.session().is_none());
        assert_eq!(level.display().time_text(), "");
    }

    #[test]
    fn several_characters_is_a_fault() {
        let mut world = World::new();
        let first = world.spawn_character(Vec3::ZERO);
        world.spawn_character(Vec3::ONE);

        let mut level = Level::load(config(), world, TextDisplay::new());
        level.apply(WorldCommand::MoveCharacter { id: first, to: Vec3::new(9.0, 0.0, 0.0) });
        level.tick(1.0);

        assert_eq!(level.fault(), Some(LevelError::CharacterSourceCount { found: 2 }));
        assert!(level.session().is_none());
    }

    #[test]
    fn fault_message() {
        let error = LevelError::CharacterSourceCount { found: 3 };
        assert_eq!(error.to_string(), "Expecting exactly one character source, found 3");
    }

    #[test]
    fn tick_reads_character_position() {
        let mut world = World::new();
        let id = world.spawn_character(Vec3::ZERO);
        world.spawn_point(5);

        let mut level = Level::load(config(), world, TextDisplay::new());
        level.tick(0.0);
        assert_eq!(level.session().map(|s| s.state()), Some(SessionState::NotStarted));

        level.apply(WorldCommand::TranslateCharacter { id, by: Vec3::new(0.0, 0.0, 3.0) });
        level.tick(1.0);
        assert_eq!(level.session().map(|s| s.state()), Some(SessionState::Running));
    }

    #[test]
    fn contact_is_credited_synchronously() {
        let mut world = World::new();
        let id = world.spawn_character(Vec3::ZERO);
        let five = world.spawn_point(5);
        let ten = world.spawn_point(10);

        let mut level = Level::load(config(), world, TextDisplay::new());
        level.apply(WorldCommand::MoveCharacter { id, to: Vec3::new(3.0, 0.0, 0.0) });
        level.tick(1.0);

        assert!(level.apply(WorldCommand::Contact(five)));
        assert_eq!(level.session().map(|s| s.current_points()), Some(5));
        assert!(level.world().scorables().get(five).is_none());

        assert!(level.apply(WorldCommand::Contact(ten)));
        level.tick(2.0);

        let session = level.session().expect("active level");
        assert_eq!(session.current_points(), 15);
        assert_eq!(session.outcome(), Some(SessionOutcome::MaxScoreReached));
        assert!(level.display().time_text().ends_with("Max Score Reached"));
        assert!(level.world().scorables().is_empty());
    }

    #[test]
    fn contact_before_start_is_not_scored() {
        let mut world = World::new();
        world.spawn_character(Vec3::ZERO);
        let point = world.spawn_point(5);

        let mut level = Level::load(config(), world, TextDisplay::new());
        assert!(!level.apply(WorldCommand::Contact(point)));

        assert_eq!(level.session().map(|s| s.current_points()), Some(0));
        assert_eq!(level.world().scorables().len(), 1);
    }
}

//=========================================================================
// World
//=========================================================================
//
// Headless model of the level contents the session reads from.
//
// Architecture:
//   World
//     ├─ characters: Vec<Character>      (position sources)
//     └─ scorables:  ScorableRegistry    (collectables)
//
// The world is populated by the level author and mutated through
// WorldCommands. It performs no collision detection: contacts are
// reported to it explicitly.
//
//=========================================================================

//=== Module Declarations =================================================

mod character;
mod registry;
mod scorable;

//=== Public API ==========================================================

pub use character::{Character, CharacterId, CharacterSource};
pub use registry::ScorableRegistry;
pub use scorable::{GamePoint, ListenerId, PointId, Scorable, ScoreEvent, ScoreListener};

//=== External Dependencies ===============================================

use glam::Vec3;
use log::warn;

//=== WorldCommand ========================================================

/// Mutations other systems request from the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldCommand {
    /// Places a character at an absolute position.
    MoveCharacter { id: CharacterId, to: Vec3 },

    /// Moves a character by an offset.
    TranslateCharacter { id: CharacterId, by: Vec3 },

    /// The character touched a scorable object.
    Contact(PointId),
}

//=== World ===============================================================

/// Level contents: character sources and scorable objects.
pub struct World {
    characters: Vec<Character>,
    scorables: ScorableRegistry,
}

impl World {
    /// Creates an empty world.
    pub fn new() -> Self {
        Self {
            characters: Vec::new(),
            scorables: ScorableRegistry::new(),
        }
    }

    //--- Population -------------------------------------------------------

    pub fn spawn_character(&mut self, position: Vec3) -> CharacterId {
        self.characters.push(Character::new(position));
        CharacterId(self.characters.len() - 1)
    }

    /// Convenience for `scorables_mut().spawn(GamePoint::new(points))`.
    pub fn spawn_point(&mut self, points: u32) -> PointId {
        self.scorables.spawn(GamePoint::new(points))
    }

    //--- Access -----------------------------------------------------------

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(id.0)
    }

    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(id.0)
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// Ids of every character, in spawn order.
    pub fn character_ids(&self) -> impl Iterator<Item = CharacterId> {
        (0..self.characters.len()).map(CharacterId)
    }

    pub fn scorables(&self) -> &ScorableRegistry {
        &self.scorables
    }

    pub fn scorables_mut(&mut self) -> &mut ScorableRegistry {
        &mut self.scorables
    }

    //--- Commands ---------------------------------------------------------

    /// Applies a command. Returns true if it changed anything.
    pub fn apply(&mut self, command: WorldCommand) -> bool {
        match command {
            WorldCommand::MoveCharacter { id, to } => match self.character_mut(id) {
                Some(character) => {
                    character.move_to(to);
                    true
                }
                None => {
                    warn!("Move requested for unknown {:?}", id);
                    false
                }
            },
            WorldCommand::TranslateCharacter { id, by } => match self.character_mut(id) {
                Some(character) => {
                    character.translate(by);
                    true
                }
                None => {
                    warn!("Translate requested for unknown {:?}", id);
                    false
                }
            },
            WorldCommand::Contact(point) => self.scorables.contact(point),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_character_returns_sequential_ids() {
        let mut world = World::new();
        let a = world.spawn_character(Vec3::ZERO);
        let b = world.spawn_character(Vec3::ONE);

        assert_ne!(a, b);
        assert_eq!(world.characters().len(), 2);
        assert_eq!(world.character_ids().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn move_and_translate_commands() {
        let mut world = World::new();
        let id = world.spawn_character(Vec3::ZERO);

        assert!(world.apply(WorldCommand::MoveCharacter { id, to: Vec3::X }));
        assert!(world.apply(WorldCommand::TranslateCharacter { id, by: Vec3::Y }));

        let position = world.character(id).map(|c| c.position());
        assert_eq!(position, Some(Vec3::new(1.0, 1.0, 0.0)));
    }

    #[test]
    fn commands_for_unknown_character_are_rejected() {
        let mut world = World::new();
        let ghost = CharacterId(7);

        assert!(!world.apply(WorldCommand::MoveCharacter { id: ghost, to: Vec3::X }));
        assert!(!world.apply(WorldCommand::TranslateCharacter { id: ghost, by: Vec3::X }));
    }

    #[test]
    fn contact_without_subscribers_does_not_score() {
        let mut world = World::new();
        let point = world.spawn_point(5);

        assert!(!world.apply(WorldCommand::Contact(point)));
        assert_eq!(world.scorables().len(), 1);
    }
}

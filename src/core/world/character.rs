//=========================================================================
// Character
//=========================================================================
//
// Position source for the player character.
//
// Movement itself (input, physics) happens outside this crate; the world
// only records where the character currently is.
//
//=========================================================================

use glam::Vec3;

/// Identifier of a character inside a [`super::World`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharacterId(pub(crate) usize);

/// Anything that can report the character's current position.
pub trait CharacterSource {
    fn position(&self) -> Vec3;
}

/// Player character tracked by the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Character {
    position: Vec3,
}

impl Character {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }

    /// Teleports the character.
    pub fn move_to(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Moves the character by an offset.
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }
}

impl CharacterSource for Character {
    fn position(&self) -> Vec3 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_and_translate() {
        let mut character = Character::new(Vec3::ZERO);
        character.translate(Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(character.position(), Vec3::new(1.0, 2.0, 0.0));

        character.move_to(Vec3::new(-3.0, 0.0, 4.0));
        assert_eq!(character.position(), Vec3::new(-3.0, 0.0, 4.0));
    }
}

//! Board symbols: animals printed on tiles, caves and chits, and player colours.

use serde::{Deserialize, Serialize};

/// Symbol printed on a tile, cave or chit card.
///
/// Tiles and caves only ever carry the four creatures. `Pirate` is the wild
/// chit symbol that moves a token regardless of the tile it stands on, and
/// `Reverse` marks the reversal chits that send a token back to a cave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Animal {
    Lizard,
    Spider,
    Bat,
    Dragon,
    Pirate,
    Reverse,
}

impl Animal {
    /// Animals that may appear on a board position.
    pub const CREATURES: [Animal; 4] =
        [Animal::Lizard, Animal::Spider, Animal::Bat, Animal::Dragon];

    /// Whether this symbol may be printed on a tile or cave.
    #[must_use]
    pub const fn is_creature(self) -> bool {
        matches!(self, Animal::Lizard | Animal::Spider | Animal::Bat | Animal::Dragon)
    }

    /// Upper-case name used in configuration and save files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Animal::Lizard => "LIZARD",
            Animal::Spider => "SPIDER",
            Animal::Bat => "BAT",
            Animal::Dragon => "DRAGON",
            Animal::Pirate => "PIRATE",
            Animal::Reverse => "REVERSE",
        }
    }
}

impl std::fmt::Display for Animal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Player colour. Each colour owns exactly one cave and one token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Colour {
    Red,
    Blue,
    Purple,
    Green,
}

impl Colour {
    /// Upper-case name used in configuration and save files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Colour::Red => "RED",
            Colour::Blue => "BLUE",
            Colour::Purple => "PURPLE",
            Colour::Green => "GREEN",
        }
    }
}

impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creatures() {
        for animal in Animal::CREATURES {
            assert!(animal.is_creature());
        }
        assert!(!Animal::Pirate.is_creature());
        assert!(!Animal::Reverse.is_creature());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Animal::Dragon).unwrap();
        assert_eq!(json, "\"DRAGON\"");

        let colour: Colour = serde_json::from_str("\"PURPLE\"").unwrap();
        assert_eq!(colour, Colour::Purple);

        assert!(serde_json::from_str::<Animal>("\"UNICORN\"").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Animal::Bat), "BAT");
        assert_eq!(format!("{}", Colour::Green), "GREEN");
    }
}

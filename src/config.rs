use crate::board::Board;
use crate::error::{Error, Result};
use crate::types::Color;

/// Everything a game needs at construction: the layout and who moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub layout: Board,
    pub starting_turn: Color,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            layout: Board::new(),
            starting_turn: Color::White,
        }
    }
}

impl GameConfig {
    pub fn new(layout: Board, starting_turn: Color) -> Self {
        Self {
            layout,
            starting_turn,
        }
    }

    /// Reads the placement and, when present, the side-to-move field of a FEN
    /// string. Castling, en passant and clock fields are ignored.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let layout = Board::from_fen(fen)?;
        let starting_turn = match fen.split_whitespace().nth(1) {
            None => Color::White,
            Some(field) => {
                let mut chars = field.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Color::from_char(c)?,
                    _ => return Err(Error::InvalidColor(field.to_string())),
                }
            }
        };
        Ok(Self {
            layout,
            starting_turn,
        })
    }

    pub fn with_starting_turn(mut self, starting_turn: Color) -> Self {
        self.starting_turn = starting_turn;
        self
    }
}

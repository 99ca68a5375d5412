use serde::Serialize;

use crate::error::{Error, Result};

pub const BOARD_SIZE: usize = 8;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn from_char(c: char) -> Result<Color> {
        match c {
            'w' => Ok(Color::White),
            'b' => Ok(Color::Black),
            other => Err(Error::InvalidColor(other.to_string())),
        }
    }

    pub fn from_case(c: char) -> Color {
        if c.is_uppercase() {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Sign used by the integer piece encoding: +1 for white, -1 for black.
    pub fn from_sign(code: i8) -> Option<Color> {
        match code.signum() {
            1 => Some(Color::White),
            -1 => Some(Color::Black),
            _ => None,
        }
    }

    pub fn sign(&self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    pub fn other_color(&self) -> Color {
        if *self == Color::White {
            Color::Black
        } else {
            Color::White
        }
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceType {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceType {
    pub fn from_char(c: char) -> Result<PieceType> {
        match c.to_ascii_lowercase() {
            'p' => Ok(PieceType::Pawn),
            'r' => Ok(PieceType::Rook),
            'n' => Ok(PieceType::Knight),
            'b' => Ok(PieceType::Bishop),
            'q' => Ok(PieceType::Queen),
            'k' => Ok(PieceType::King),
            _ => Err(Error::InvalidPieceChar(c)),
        }
    }

    /// Magnitude of the integer encoding, 1 through 6.
    pub fn from_magnitude(magnitude: u8) -> Option<PieceType> {
        match magnitude {
            1 => Some(PieceType::Pawn),
            2 => Some(PieceType::Rook),
            3 => Some(PieceType::Knight),
            4 => Some(PieceType::Bishop),
            5 => Some(PieceType::Queen),
            6 => Some(PieceType::King),
            _ => None,
        }
    }

    pub fn magnitude(&self) -> i8 {
        match self {
            Self::Pawn => 1,
            Self::Rook => 2,
            Self::Knight => 3,
            Self::Bishop => 4,
            Self::Queen => 5,
            Self::King => 6,
        }
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::Pawn => "pawn",
            Self::Rook => "rook",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }
}

/// A board coordinate. Row 0 is the top of the board (black's back rank in the
/// standard layout), column 0 is the a-file.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn try_new(row: i32, col: i32) -> Result<Position> {
        if in_range(row) && in_range(col) {
            Ok(Position {
                row: row as u8,
                col: col as u8,
            })
        } else {
            Err(Error::OutOfBounds { row, col })
        }
    }

    /// The square `(d_row, d_col)` away, or `None` when that falls off the board.
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Position> {
        Position::try_new(
            self.row as i32 + d_row as i32,
            self.col as i32 + d_col as i32,
        )
        .ok()
    }

    pub fn from_algebraic(s: &str) -> Result<Position> {
        let mut char_iter = s.chars();
        let (Some(file_char), Some(rank_char), None) =
            (char_iter.next(), char_iter.next(), char_iter.next())
        else {
            return Err(Error::InvalidSquare(s.to_string()));
        };
        if !('a'..='h').contains(&file_char) || !('1'..='8').contains(&rank_char) {
            return Err(Error::InvalidSquare(s.to_string()));
        }

        let col = file_char as u8 - b'a';
        let rank = rank_char as u8 - b'0';

        Ok(Position {
            row: BOARD_SIZE as u8 - rank,
            col,
        })
    }

    pub fn to_algebraic(&self) -> String {
        format!(
            "{}{}",
            (self.col + b'a') as char,
            BOARD_SIZE as u8 - self.row
        )
    }
}

fn in_range(value: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&value)
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub struct Piece {
    pub color: Color,
    pub piece_type: PieceType,
}

impl Piece {
    pub fn new(color: Color, piece_type: PieceType) -> Piece {
        Piece { color, piece_type }
    }

    /// FEN-style letter: uppercase for white, lowercase for black.
    pub fn from_char(c: char) -> Result<Piece> {
        Ok(Piece {
            color: Color::from_case(c),
            piece_type: PieceType::from_char(c)?,
        })
    }

    /// Decodes `sign × magnitude`; `0` is an empty cell.
    pub fn from_code(code: i8) -> Result<Option<Piece>> {
        let Some(color) = Color::from_sign(code) else {
            return Ok(None);
        };
        let piece_type = PieceType::from_magnitude(code.unsigned_abs())
            .ok_or(Error::InvalidPieceCode(code))?;
        Ok(Some(Piece { color, piece_type }))
    }

    pub fn to_code(&self) -> i8 {
        self.color.sign() * self.piece_type.magnitude()
    }

    pub fn to_symbol(&self) -> &'static str {
        let is_white = self.color == Color::White;
        match self.piece_type {
            PieceType::Pawn => {
                if is_white {
                    "♙"
                } else {
                    "♟"
                }
            }
            PieceType::Rook => {
                if is_white {
                    "♖"
                } else {
                    "♜"
                }
            }
            PieceType::Knight => {
                if is_white {
                    "♘"
                } else {
                    "♞"
                }
            }
            PieceType::Bishop => {
                if is_white {
                    "♗"
                } else {
                    "♝"
                }
            }
            PieceType::Queen => {
                if is_white {
                    "♕"
                } else {
                    "♛"
                }
            }
            PieceType::King => {
                if is_white {
                    "♔"
                } else {
                    "♚"
                }
            }
        }
    }

    pub fn to_human(&self) -> String {
        format!("{} {}", self.color.to_human(), self.piece_type.to_human())
    }
}

/// Encodes the cell the way the integer grid does.
pub fn cell_code(cell: Option<Piece>) -> i8 {
    cell.map_or(0, |p| p.to_code())
}

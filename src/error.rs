//! Error types for board construction and click handling.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("coordinates ({row}, {col}) are outside the board")]
    OutOfBounds { row: i32, col: i32 },

    #[error("invalid piece code {0}, expected a value in -6..=6")]
    InvalidPieceCode(i8),

    #[error("unrecognized piece type `{0}`")]
    InvalidPieceChar(char),

    #[error("color must be either `w` or `b`, got `{0}`")]
    InvalidColor(String),

    #[error("invalid FEN placement: {0}")]
    InvalidFen(String),

    #[error("invalid square `{0}`")]
    InvalidSquare(String),
}

pub type Result<T> = std::result::Result<T, Error>;

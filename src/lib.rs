pub mod error;
pub mod types;
pub mod overlay;
pub mod board;
pub mod movegen;
pub mod config;
pub mod game;

pub use board::Board;
pub use config::GameConfig;
pub use error::{Error, Result};
pub use game::{Game, Snapshot, Transition};
pub use overlay::{Marker, Overlay};
pub use types::{Color, Piece, PieceType, Position, BOARD_SIZE};

use itertools::Itertools;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};
use crate::overlay::{Marker, Overlay};
use crate::types::{cell_code, Color, Piece, Position, BOARD_SIZE};

pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";

const STARTING_LAYOUT: [[i8; BOARD_SIZE]; BOARD_SIZE] = [
    [-2, -3, -4, -5, -6, -4, -3, -2],
    [-1, -1, -1, -1, -1, -1, -1, -1],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [1, 1, 1, 1, 1, 1, 1, 1],
    [2, 3, 4, 5, 6, 4, 3, 2],
];

/// The 8x8 grid, row-major, row 0 at the top.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Board {
    squares: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Board {
    /// Standard starting layout: black on rows 0-1, white on rows 6-7.
    pub fn new() -> Board {
        let mut board = Board::empty();
        for (row, codes) in STARTING_LAYOUT.iter().enumerate() {
            for (col, &code) in codes.iter().enumerate() {
                // the layout literal only holds codes in -6..=6
                board.squares[row][col] = Piece::from_code(code).ok().flatten();
            }
        }
        board
    }

    pub fn empty() -> Board {
        Board {
            squares: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub fn from_codes(codes: [[i8; BOARD_SIZE]; BOARD_SIZE]) -> Result<Board> {
        let mut board = Board::empty();
        for (row, codes) in codes.iter().enumerate() {
            for (col, &code) in codes.iter().enumerate() {
                board.squares[row][col] = Piece::from_code(code)?;
            }
        }
        Ok(board)
    }

    pub fn to_codes(&self) -> [[i8; BOARD_SIZE]; BOARD_SIZE] {
        self.squares.map(|row| row.map(cell_code))
    }

    /// Reads the placement field of a FEN string. Any further fields are ignored.
    pub fn from_fen(fen: &str) -> Result<Board> {
        let placement = fen
            .split_whitespace()
            .next()
            .ok_or_else(|| Error::InvalidFen("empty string".to_string()))?;

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != BOARD_SIZE {
            return Err(Error::InvalidFen(format!(
                "expected {BOARD_SIZE} ranks, found {}",
                ranks.len()
            )));
        }

        let mut board = Board::empty();
        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0usize;
            for piece_char in rank.chars() {
                if let Some(skip) = piece_char.to_digit(10) {
                    col += skip as usize;
                } else {
                    if col >= BOARD_SIZE {
                        return Err(Error::InvalidFen(format!("rank `{rank}` is too long")));
                    }
                    board.squares[row][col] = Some(Piece::from_char(piece_char)?);
                    col += 1;
                }
            }
            if col != BOARD_SIZE {
                return Err(Error::InvalidFen(format!(
                    "rank `{rank}` covers {col} files"
                )));
            }
        }
        Ok(board)
    }

    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.squares[pos.row as usize][pos.col as usize]
    }

    pub fn set_piece(&mut self, pos: Position, piece: Option<Piece>) {
        self.squares[pos.row as usize][pos.col as usize] = piece;
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.piece_at(pos).is_none()
    }

    pub fn owner_of(&self, pos: Position) -> Option<Color> {
        self.piece_at(pos).map(|p| p.color)
    }

    /// Relocates whatever is on `from` to `to` and empties `from`.
    /// Returns the piece that was standing on `to`, if any.
    pub fn move_piece(&mut self, from: Position, to: Position) -> Option<Piece> {
        let captured = self.piece_at(to);
        self.set_piece(to, self.piece_at(from));
        self.set_piece(from, None);
        captured
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.squares.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| {
                cell.map(|piece| {
                    (
                        Position {
                            row: row as u8,
                            col: col as u8,
                        },
                        piece,
                    )
                })
            })
        })
    }

    /// Renders the board with the overlay on top: `*` for a reachable empty
    /// square, brackets around a capturable piece.
    pub fn draw_board(&self, overlay: &Overlay) -> String {
        let rows = (0..BOARD_SIZE).map(|row| {
            let cells = (0..BOARD_SIZE)
                .map(|col| {
                    let pos = Position {
                        row: row as u8,
                        col: col as u8,
                    };
                    let symbol = self.piece_at(pos).map_or(".", |p| p.to_symbol());
                    match overlay.marker_at(pos) {
                        Marker::None => format!(" {symbol} "),
                        Marker::Empty => " * ".to_string(),
                        Marker::Capture => format!("[{symbol}]"),
                    }
                })
                .join("");
            format!("{} {}", BOARD_SIZE - row, cells)
        });
        let files = (0..BOARD_SIZE)
            .map(|col| format!(" {} ", (b'a' + col as u8) as char))
            .join("");
        format!("{}\n  {}\n", rows.format("\n"), files)
    }

    pub fn draw_to_terminal(&self, overlay: &Overlay) {
        println!("{}", self.draw_board(overlay));
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_codes().serialize(serializer)
    }
}

//! Reachable destinations for a single selected piece.
//!
//! Each piece type maps onto a [`Movement`] rule. Sliding pieces cast rays until
//! they leave the board or hit a piece, knights jump to a precomputed set of
//! in-bound targets, pawns step forward and capture diagonally. Kings have no
//! destination rule.

use once_cell::sync::Lazy;
use tracing::debug;

use crate::board::Board;
use crate::overlay::{Marker, Overlay};
use crate::types::{Color, Piece, PieceType, Position, BOARD_SIZE};

/// `(d_row, d_col)` step.
pub type Offset = (i8, i8);

pub const ROOK_STEPS: [Offset; 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

pub const BISHOP_STEPS: [Offset; 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub const QUEEN_STEPS: [Offset; 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub const KNIGHT_STEPS: [Offset; 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (-1, 2),
    (1, 2),
    (-1, -2),
    (1, -2),
];

/// In-bound knight targets for every square, indexed by `row * 8 + col`.
pub static KNIGHT_TARGETS: Lazy<Vec<Vec<Position>>> = Lazy::new(|| {
    (0..BOARD_SIZE * BOARD_SIZE)
        .map(|sq| {
            let from = Position {
                row: (sq / BOARD_SIZE) as u8,
                col: (sq % BOARD_SIZE) as u8,
            };
            KNIGHT_STEPS
                .iter()
                .filter_map(|&(d_row, d_col)| from.offset(d_row, d_col))
                .collect()
        })
        .collect()
});

fn knight_targets(from: Position) -> &'static [Position] {
    &KNIGHT_TARGETS[from.row as usize * BOARD_SIZE + from.col as usize]
}

/// How a piece type reaches its destinations.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Movement {
    Pawn { direction: i8, start_row: u8 },
    Slide(&'static [Offset]),
    Jump,
    /// No destination rule exists; selection highlights nothing.
    Unimplemented,
}

impl Movement {
    pub fn for_piece(piece: &Piece) -> Movement {
        match piece.piece_type {
            PieceType::Pawn => match piece.color {
                Color::White => Movement::Pawn {
                    direction: -1,
                    start_row: BOARD_SIZE as u8 - 2,
                },
                Color::Black => Movement::Pawn {
                    direction: 1,
                    start_row: 1,
                },
            },
            PieceType::Rook => Movement::Slide(&ROOK_STEPS),
            PieceType::Bishop => Movement::Slide(&BISHOP_STEPS),
            PieceType::Queen => Movement::Slide(&QUEEN_STEPS),
            PieceType::Knight => Movement::Jump,
            PieceType::King => Movement::Unimplemented,
        }
    }
}

pub struct MoveGenerator<'a> {
    board: &'a Board,
    overlay: Overlay,
}

impl<'a> MoveGenerator<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            overlay: Overlay::new(),
        }
    }

    /// Overlay of every square the piece on `from` may move to. An empty square
    /// yields an empty overlay.
    pub fn collect(mut self, from: Position) -> Overlay {
        let Some(piece) = self.board.piece_at(from) else {
            return self.overlay;
        };

        match Movement::for_piece(&piece) {
            Movement::Slide(steps) => {
                for &step in steps {
                    self.cast_ray(from, piece.color, step);
                }
            }
            Movement::Jump => {
                for &target in knight_targets(from) {
                    self.mark_unless_own(target, piece.color);
                }
            }
            Movement::Pawn {
                direction,
                start_row,
            } => {
                self.pawn_steps(from, direction, start_row);
                self.pawn_captures(from, piece.color, direction);
            }
            Movement::Unimplemented => {
                debug!(
                    piece = %piece.to_human(),
                    square = %from.to_algebraic(),
                    "no destination rule"
                );
            }
        }
        self.overlay
    }

    /// Marked destinations in row-major order.
    pub fn destinations(self, from: Position) -> Vec<(Position, Marker)> {
        self.collect(from).markers().collect()
    }

    fn marker_for(&self, target: Position) -> Marker {
        if self.board.is_empty(target) {
            Marker::Empty
        } else {
            Marker::Capture
        }
    }

    fn mark_unless_own(&mut self, target: Position, color: Color) {
        if self.board.owner_of(target) != Some(color) {
            let marker = self.marker_for(target);
            self.overlay.mark(target, marker);
        }
    }

    fn cast_ray(&mut self, from: Position, color: Color, (d_row, d_col): Offset) {
        let mut current = from;
        while let Some(next) = current.offset(d_row, d_col) {
            match self.board.owner_of(next) {
                Some(owner) if owner == color => return,
                Some(_) => {
                    self.overlay.mark(next, Marker::Capture);
                    return;
                }
                None => self.overlay.mark(next, Marker::Empty),
            }
            current = next;
        }
    }

    fn pawn_steps(&mut self, from: Position, direction: i8, start_row: u8) {
        let Some(one_step) = from.offset(direction, 0) else {
            return;
        };
        if !self.board.is_empty(one_step) {
            return;
        }
        self.overlay.mark(one_step, Marker::Empty);

        if from.row != start_row {
            return;
        }
        if let Some(two_step) = from.offset(2 * direction, 0) {
            if self.board.is_empty(two_step) {
                self.overlay.mark(two_step, Marker::Empty);
            }
        }
    }

    fn pawn_captures(&mut self, from: Position, color: Color, direction: i8) {
        for d_col in [-1, 1] {
            let Some(target) = from.offset(direction, d_col) else {
                continue;
            };
            if self.board.owner_of(target) == Some(color.other_color()) {
                self.overlay.mark(target, Marker::Capture);
            }
        }
    }
}

//! Click-driven selection and turn state machine.
//!
//! A [`Game`] is either idle or has one selected piece whose destinations are
//! shown in the overlay. Every click goes through [`Game::event`], which moves,
//! deselects or (re)selects and hands back a fresh [`Snapshot`].

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::Result;
use crate::movegen::MoveGenerator;
use crate::overlay::Overlay;
use crate::types::{Color, Piece, Position, BOARD_SIZE};

/// Owned copy of the game state handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub board: Board,
    pub overlay: Overlay,
    pub turn: Color,
    pub selection: Option<Position>,
}

impl Snapshot {
    /// The raw integer matrices: piece codes and overlay markers.
    pub fn to_codes(&self) -> ([[i8; BOARD_SIZE]; BOARD_SIZE], [[u8; BOARD_SIZE]; BOARD_SIZE]) {
        (self.board.to_codes(), self.overlay.to_codes())
    }
}

/// What a single click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved {
        from: Position,
        to: Position,
        captured: Option<Piece>,
    },
    Deselected,
    Selected {
        at: Position,
        destinations: usize,
    },
}

pub struct Game {
    board: Board,
    overlay: Overlay,
    selection: Option<Position>,
    turn: Color,
}

impl Default for Game {
    fn default() -> Self {
        Game::new(GameConfig::default())
    }
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self {
            board: config.layout,
            overlay: Overlay::new(),
            selection: None,
            turn: config.starting_turn,
        }
    }

    /// Current snapshot, without touching any state.
    pub fn start(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            overlay: self.overlay,
            turn: self.turn,
            selection: self.selection,
        }
    }

    /// Handles a click on `pos` and returns the resulting snapshot.
    /// Coordinates outside the board are rejected and leave the game untouched.
    pub fn event(&mut self, pos: Position) -> Result<Snapshot> {
        self.apply(pos)?;
        Ok(self.start())
    }

    pub fn event_at(&mut self, row: i32, col: i32) -> Result<Snapshot> {
        self.event(Position::try_new(row, col)?)
    }

    pub fn apply(&mut self, pos: Position) -> Result<Transition> {
        let pos = Position::try_new(pos.row.into(), pos.col.into())?;

        let transition = match self.selection {
            // a marker only exists while something is selected
            Some(from) if self.overlay.is_marked(pos) => {
                let captured = self.board.move_piece(from, pos);
                self.deactivate();
                self.turn = self.turn.other_color();
                info!(
                    from = %from.to_algebraic(),
                    to = %pos.to_algebraic(),
                    captured = ?captured.map(|p| p.to_human()),
                    next = self.turn.to_human(),
                    "move executed"
                );
                Transition::Moved {
                    from,
                    to: pos,
                    captured,
                }
            }
            selection
                if self.board.owner_of(pos) != Some(self.turn) || selection == Some(pos) =>
            {
                self.deactivate();
                trace!(square = %pos.to_algebraic(), "deselected");
                Transition::Deselected
            }
            _ => {
                self.deactivate();
                let destinations = self.activate(pos);
                Transition::Selected {
                    at: pos,
                    destinations,
                }
            }
        };
        Ok(transition)
    }

    fn activate(&mut self, pos: Position) -> usize {
        self.selection = Some(pos);
        self.overlay = MoveGenerator::new(&self.board).collect(pos);
        let destinations = self.overlay.markers().count();
        debug!(
            square = %pos.to_algebraic(),
            piece = ?self.board.piece_at(pos).map(|p| p.to_human()),
            destinations,
            "selected"
        );
        destinations
    }

    fn deactivate(&mut self) {
        self.selection = None;
        self.overlay.clear();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn selection(&self) -> Option<Position> {
        self.selection
    }

    pub fn turn(&self) -> Color {
        self.turn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::overlay::Marker;
    use crate::types::PieceType;

    fn pos(row: u8, col: u8) -> Position {
        Position { row, col }
    }

    fn game_from_fen(fen: &str) -> Game {
        Game::new(GameConfig::from_fen(fen).unwrap())
    }

    #[test]
    fn test_start_is_idle() {
        let game = Game::default();
        let snapshot = game.start();
        assert_eq!(snapshot.board, Board::new());
        assert!(snapshot.overlay.is_clear());
        assert_eq!(snapshot.turn, Color::White);
        assert_eq!(snapshot.selection, None);
        assert_eq!(game.start(), snapshot);
    }

    #[test]
    fn test_pawn_double_step_and_move() {
        let mut game = Game::default();

        let snapshot = game.event(pos(6, 0)).unwrap();
        assert_eq!(snapshot.selection, Some(pos(6, 0)));
        assert_eq!(
            snapshot.overlay.markers().collect::<Vec<_>>(),
            vec![(pos(4, 0), Marker::Empty), (pos(5, 0), Marker::Empty)]
        );

        let snapshot = game.event(pos(4, 0)).unwrap();
        assert_eq!(
            snapshot.board.piece_at(pos(4, 0)),
            Some(Piece::new(Color::White, PieceType::Pawn))
        );
        assert!(snapshot.board.is_empty(pos(6, 0)));
        assert!(snapshot.overlay.is_clear());
        assert_eq!(snapshot.selection, None);
        assert_eq!(snapshot.turn, Color::Black);
    }

    #[test]
    fn test_capture_discards_piece() {
        let mut game = game_from_fen("8/8/8/3R2p1/8/8/8/8 w");
        game.event(pos(3, 3)).unwrap();
        assert_eq!(game.overlay().marker_at(pos(3, 6)), Marker::Capture);

        let transition = game.apply(pos(3, 6)).unwrap();
        assert_eq!(
            transition,
            Transition::Moved {
                from: pos(3, 3),
                to: pos(3, 6),
                captured: Some(Piece::new(Color::Black, PieceType::Pawn)),
            }
        );
        assert_eq!(game.board().pieces().count(), 1);
        assert_eq!(game.turn(), Color::Black);
    }

    #[test]
    fn test_out_of_turn_click_is_ignored() {
        let mut game = Game::default();
        let transition = game.apply(pos(1, 0)).unwrap();
        assert_eq!(transition, Transition::Deselected);
        assert_eq!(game.turn(), Color::White);
        assert!(game.overlay().is_clear());
    }

    #[test]
    fn test_reclick_selected_piece_deselects() {
        let mut game = Game::default();
        game.event(pos(6, 4)).unwrap();
        let snapshot = game.event(pos(6, 4)).unwrap();
        assert_eq!(snapshot.selection, None);
        assert!(snapshot.overlay.is_clear());
        assert_eq!(snapshot.turn, Color::White);
    }

    #[test]
    fn test_click_unmarked_empty_square_deselects() {
        let mut game = Game::default();
        game.event(pos(6, 4)).unwrap();
        let snapshot = game.event(pos(3, 0)).unwrap();
        assert_eq!(snapshot.selection, None);
        assert!(snapshot.overlay.is_clear());
        assert_eq!(snapshot.board, Board::new());
    }

    #[test]
    fn test_selecting_other_own_piece_switches() {
        let mut game = Game::default();
        game.event(pos(6, 0)).unwrap();
        let transition = game.apply(pos(7, 1)).unwrap();
        assert_eq!(
            transition,
            Transition::Selected {
                at: pos(7, 1),
                destinations: 2,
            }
        );
        assert_eq!(game.selection(), Some(pos(7, 1)));
        assert_eq!(
            game.overlay().markers().collect::<Vec<_>>(),
            vec![(pos(5, 0), Marker::Empty), (pos(5, 2), Marker::Empty)]
        );
    }

    #[test]
    fn test_king_selection_has_no_markers() {
        let mut game = Game::default();
        let transition = game.apply(pos(7, 4)).unwrap();
        assert_eq!(
            transition,
            Transition::Selected {
                at: pos(7, 4),
                destinations: 0,
            }
        );
        assert!(game.overlay().is_clear());
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut game = Game::default();
        game.event(pos(6, 0)).unwrap();
        let before = game.start();

        assert_eq!(
            game.event_at(8, 0),
            Err(Error::OutOfBounds { row: 8, col: 0 })
        );
        assert_eq!(
            game.event(pos(0, 12)),
            Err(Error::OutOfBounds { row: 0, col: 12 })
        );
        assert_eq!(game.start(), before);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut game = Game::default();
        let mut snapshot = game.start();
        snapshot.board.set_piece(pos(4, 4), None);
        snapshot.board.move_piece(pos(6, 0), pos(3, 0));
        assert_eq!(game.start().board, Board::new());
        game.event(pos(6, 0)).unwrap();
        assert_eq!(game.overlay().markers().count(), 2);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let game = Game::default();
        let value = serde_json::to_value(game.start()).unwrap();
        assert_eq!(value["board"][0][4], -6);
        assert_eq!(value["board"][6][0], 1);
        assert_eq!(value["overlay"][5][0], 0);
        assert_eq!(value["turn"], "white");
        assert!(value["selection"].is_null());
    }
}

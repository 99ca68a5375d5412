//! End-to-end click sequences through the public API.
//!
//! Run with: cargo test --test game_tests

use chess_highlight::{Board, Color, Game, GameConfig, Marker, Piece, PieceType, Position};
use pretty_assertions::assert_eq;

fn pos(row: u8, col: u8) -> Position {
    Position { row, col }
}

fn marked(game: &Game) -> Vec<(Position, Marker)> {
    game.overlay().markers().collect()
}

#[test]
fn test_opening_exchange() {
    let mut game = Game::default();

    // e2-e4
    game.event(pos(6, 4)).unwrap();
    game.event(pos(4, 4)).unwrap();
    // d7-d5
    game.event(pos(1, 3)).unwrap();
    let snapshot = game.event(pos(3, 3)).unwrap();
    assert_eq!(snapshot.turn, Color::White);

    // e4 pawn sees the d5 pawn diagonally and its own step forward
    game.event(pos(4, 4)).unwrap();
    assert_eq!(
        marked(&game),
        vec![(pos(3, 3), Marker::Capture), (pos(3, 4), Marker::Empty)]
    );

    let snapshot = game.event(pos(3, 3)).unwrap();
    assert_eq!(
        snapshot.board.piece_at(pos(3, 3)),
        Some(Piece::new(Color::White, PieceType::Pawn))
    );
    assert!(snapshot.board.is_empty(pos(4, 4)));
    assert_eq!(snapshot.board.pieces().count(), 31);
    assert_eq!(snapshot.turn, Color::Black);

    // d-file is open down to the white pawn
    game.event(pos(0, 3)).unwrap();
    assert_eq!(
        marked(&game),
        vec![
            (pos(1, 3), Marker::Empty),
            (pos(2, 3), Marker::Empty),
            (pos(3, 3), Marker::Capture),
        ]
    );
}

#[test]
fn test_turn_flips_only_on_moves() {
    let mut game = Game::default();
    let clicks = [
        (pos(6, 0), Color::White), // select
        (pos(6, 0), Color::White), // deselect
        (pos(1, 0), Color::White), // opponent piece
        (pos(4, 4), Color::White), // empty square
        (pos(7, 6), Color::White), // select knight
        (pos(6, 1), Color::White), // switch to pawn
        (pos(5, 1), Color::Black), // move
        (pos(5, 1), Color::Black), // own piece of the side that just moved
    ];
    for (click, expected) in clicks {
        let snapshot = game.event(click).unwrap();
        assert_eq!(snapshot.turn, expected, "after clicking {:?}", click);
    }
}

#[test]
fn test_rook_ray_scenario() {
    let layout = Board::from_fen("8/8/8/3R2q1/8/8/8/8").unwrap();
    let mut game = Game::new(GameConfig::new(layout, Color::White));
    let snapshot = game.event(pos(3, 3)).unwrap();
    let (_, overlay) = snapshot.to_codes();

    assert_eq!(overlay[3], [1, 1, 1, 0, 1, 1, 2, 0]);
}

#[test]
fn test_black_starts_when_configured() {
    let config = GameConfig::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b").unwrap();
    let mut game = Game::new(config);

    // white pieces are not selectable
    game.event(pos(6, 0)).unwrap();
    assert_eq!(game.selection(), None);

    game.event(pos(0, 1)).unwrap();
    assert_eq!(
        marked(&game),
        vec![(pos(2, 0), Marker::Empty), (pos(2, 2), Marker::Empty)]
    );
}

#[test]
fn test_king_never_moves() {
    let mut game = Game::new(GameConfig::from_fen("8/8/8/3k4/8/8/8/4K3 w").unwrap());
    let snapshot = game.event(pos(7, 4)).unwrap();
    assert_eq!(snapshot.selection, Some(pos(7, 4)));
    assert!(snapshot.overlay.is_clear());

    // clicking next to the king is a plain deselection
    let snapshot = game.event(pos(6, 4)).unwrap();
    assert_eq!(snapshot.selection, None);
    assert_eq!(snapshot.turn, Color::White);
}

#[test]
fn test_invalid_coordinates_leave_game_untouched() {
    let mut game = Game::default();
    game.event(pos(7, 1)).unwrap();
    let before = game.start();

    assert!(game.event_at(-1, 0).is_err());
    assert!(game.event_at(3, 8).is_err());
    assert_eq!(game.start(), before);
}

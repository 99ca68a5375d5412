//! Destination markers for the currently selected piece.
//!
//! The overlay is derived data: it is cleared and recomputed every time the
//! selection changes and carries nothing beyond the current selection.

use serde::{Serialize, Serializer};

use crate::types::{Position, BOARD_SIZE};

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Marker {
    #[default]
    None,
    /// Reachable empty square.
    Empty,
    /// Square holding an opponent piece that can be captured.
    Capture,
}

impl Marker {
    pub fn to_code(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::Empty => 1,
            Self::Capture => 2,
        }
    }

    pub fn is_set(&self) -> bool {
        *self != Marker::None
    }
}

impl Serialize for Marker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.to_code())
    }
}

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct Overlay {
    cells: [[Marker; BOARD_SIZE]; BOARD_SIZE],
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.cells = [[Marker::None; BOARD_SIZE]; BOARD_SIZE];
    }

    pub fn mark(&mut self, pos: Position, marker: Marker) {
        self.cells[pos.row as usize][pos.col as usize] = marker;
    }

    pub fn marker_at(&self, pos: Position) -> Marker {
        self.cells[pos.row as usize][pos.col as usize]
    }

    pub fn is_marked(&self, pos: Position) -> bool {
        self.marker_at(pos).is_set()
    }

    pub fn is_clear(&self) -> bool {
        self.markers().next().is_none()
    }

    /// Set markers in row-major order.
    pub fn markers(&self) -> impl Iterator<Item = (Position, Marker)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, marker)| marker.is_set())
                .map(move |(col, marker)| {
                    (
                        Position {
                            row: row as u8,
                            col: col as u8,
                        },
                        *marker,
                    )
                })
        })
    }

    pub fn to_codes(&self) -> [[u8; BOARD_SIZE]; BOARD_SIZE] {
        self.cells.map(|row| row.map(|marker| marker.to_code()))
    }
}

impl Serialize for Overlay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_codes().serialize(serializer)
    }
}

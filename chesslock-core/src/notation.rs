//! Notation encoding for committed moves.
//!
//! ```text
//! Normal move:  <piece letter><file><rank>     e4, Nc3, Qh5
//! Promotion:    <file><rank>=Q                 e8=Q
//! Castling:     O-O (short) / O-O-O (long)
//! ```
//!
//! With symbol mode on, every token gets one decoy symbol appended, taken
//! from [`SYMBOLS`] in order and wrapping after the last.

use serde::{Deserialize, Serialize};

use crate::{CastleSide, Piece, Square};

/// Decoy symbols, in rotation order.
pub const SYMBOLS: [char; 8] = ['!', '@', '#', '$', '%', '&', '*', '?'];

/// Appended to the destination of a promoting pawn.
pub const PROMOTION_MARKER: &str = "=Q";

/// What a committed move looks like for notation purposes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveKind {
    Castle(CastleSide),
    Promotion { to: Square },
    Normal { piece: Piece, to: Square },
}

/// Turns committed moves into output text and owns the symbol rotation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct NotationEncoder {
    rotation: usize,
    symbol_mode: bool,
}

impl NotationEncoder {
    pub fn new(symbol_mode: bool) -> Self {
        Self {
            rotation: 0,
            symbol_mode,
        }
    }

    #[inline]
    pub fn symbol_mode(&self) -> bool {
        self.symbol_mode
    }

    /// Flip symbol mode, returning the new setting.
    pub fn toggle_symbol_mode(&mut self) -> bool {
        self.symbol_mode = !self.symbol_mode;
        self.symbol_mode
    }

    /// Index of the next symbol to be used.
    #[inline]
    pub fn rotation(&self) -> usize {
        self.rotation
    }

    /// Restart the rotation. Symbol mode is left as is.
    pub fn reset(&mut self) {
        self.rotation = 0;
    }

    /// Encode a move, advancing the rotation if symbol mode is on.
    pub fn encode(&mut self, kind: MoveKind) -> String {
        let mut text = token(kind);
        if self.symbol_mode {
            text.push(SYMBOLS[self.rotation]);
            self.rotation = (self.rotation + 1) % SYMBOLS.len();
        }
        text
    }
}

/// The notation token for a move, without any decoy symbol.
pub fn token(kind: MoveKind) -> String {
    match kind {
        MoveKind::Castle(side) => side.token().to_string(),
        MoveKind::Promotion { to } => format!("{to}{PROMOTION_MARKER}"),
        MoveKind::Normal { piece, to } => format!("{}{to}", piece.notation_letter()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal(piece: Piece, row: u8, col: u8) -> MoveKind {
        MoveKind::Normal {
            piece,
            to: Square::new(row, col),
        }
    }

    fn promotion(row: u8, col: u8) -> MoveKind {
        MoveKind::Promotion {
            to: Square::new(row, col),
        }
    }

    #[test]
    fn test_normal_tokens() {
        let pawn = normal(Piece::Pawn, 4, 4);
        let knight = normal(Piece::Knight, 5, 2);
        let queen = normal(Piece::Queen, 3, 7);
        assert_eq!(token(pawn), "e4");
        assert_eq!(token(knight), "Nc3");
        assert_eq!(token(queen), "Qh5");
    }

    #[test]
    fn test_castle_tokens() {
        assert_eq!(token(MoveKind::Castle(CastleSide::KingSide)), "O-O");
        assert_eq!(token(MoveKind::Castle(CastleSide::QueenSide)), "O-O-O");
    }

    #[test]
    fn test_promotion_token() {
        let kind = promotion(0, 4);
        assert_eq!(token(kind), "e8=Q");
    }

    #[test]
    fn test_no_symbols_by_default() {
        let mut encoder = NotationEncoder::default();
        let kind = normal(Piece::Pawn, 4, 4);
        assert_eq!(encoder.encode(kind), "e4");
        assert_eq!(encoder.rotation(), 0);
    }

    #[test]
    fn test_symbol_rotation_wraps() {
        let mut encoder = NotationEncoder::new(true);
        let kind = normal(Piece::Pawn, 4, 4);
        for symbol in SYMBOLS {
            assert_eq!(encoder.encode(kind), format!("e4{symbol}"));
        }
        assert_eq!(encoder.rotation(), 0);
        assert_eq!(encoder.encode(kind), "e4!");
    }

    #[test]
    fn test_symbol_applies_to_every_kind() {
        let mut encoder = NotationEncoder::new(true);
        assert_eq!(encoder.encode(MoveKind::Castle(CastleSide::KingSide)), "O-O!");
        assert_eq!(encoder.encode(promotion(0, 0)), "a8=Q@");
    }

    #[test]
    fn test_toggle_keeps_rotation() {
        let mut encoder = NotationEncoder::new(true);
        let kind = normal(Piece::Rook, 7, 1);
        assert_eq!(encoder.encode(kind), "Rb1!");
        assert!(!encoder.toggle_symbol_mode());
        assert_eq!(encoder.encode(kind), "Rb1");
        assert!(encoder.toggle_symbol_mode());
        assert_eq!(encoder.encode(kind), "Rb1@");
    }

    #[test]
    fn test_reset_rotation_only() {
        let mut encoder = NotationEncoder::new(true);
        encoder.encode(MoveKind::Castle(CastleSide::QueenSide));
        encoder.reset();
        assert_eq!(encoder.rotation(), 0);
        assert!(encoder.symbol_mode());
    }
}

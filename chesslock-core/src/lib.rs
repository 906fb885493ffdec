//! Chess board password overlay.
//!
//! Moves played on an on-screen board are turned into notation text that is
//! appended to a password field, so an observer sees a chess game instead of
//! password entry.
//!
//! # Board Coordinates
//!
//! ```text
//!          col 0  1  2  3  4  5  6  7
//!               a  b  c  d  e  f  g  h
//!   row 0       .  .  .  .  .  .  .  .   rank 8 (far rank, promotion)
//!   row 1       .  .  .  .  .  .  .  .   rank 7
//!   ...
//!   row 6       P  P  P  P  P  P  P  P   rank 2 (pawn home row)
//!   row 7       R  N  B  K  Q  B  N  R   rank 1 (home rank)
//! ```
//!
//! Only one side is on the board. There is no turn order, check detection or
//! en passant: the board is a password input that looks like a game.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod config;
pub mod error;
pub mod movegen;
pub mod notation;
pub mod session;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{BoardLayout, OverlayConfig};
pub use error::{Error, Result};
pub use movegen::MoveGenerator;
pub use notation::{MoveKind, NotationEncoder};
pub use session::{
    BoardSnapshot, FieldId, Selection, Session, SessionEvent, SessionState, SquareView,
    TargetField, TextField, Validity,
};

/// Number of rows and columns.
pub const BOARD_SIZE: u8 = 8;

/// Row holding the back-rank pieces.
pub const HOME_ROW: u8 = 7;

/// Row the pawns start on.
pub const PAWN_ROW: u8 = 6;

/// Row a pawn promotes on.
pub const PROMOTION_ROW: u8 = 0;

/// A square on the 8x8 board.
///
/// Row 0 is the far rank, row 7 the home rank.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Create a square from row and column (0-7 each).
    ///
    /// Panics on out-of-range coordinates. Use [`Square::try_new`] for
    /// untrusted input.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Square {
        assert!(row < BOARD_SIZE && col < BOARD_SIZE, "square out of range");
        Square { row, col }
    }

    /// Checked constructor for coordinates coming from outside the crate.
    pub fn try_new(row: u8, col: u8) -> Result<Square> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Ok(Square { row, col })
        } else {
            Err(Error::InvalidCoordinate { row, col })
        }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// The square `(dr, dc)` away, or None if that falls off the board.
    #[inline]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col) {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// File letter, `a` for column 0 through `h` for column 7.
    #[inline]
    pub fn file(self) -> char {
        (b'a' + self.col) as char
    }

    /// Rank number, `8 - row`.
    #[inline]
    pub fn rank(self) -> u8 {
        BOARD_SIZE - self.row
    }

    /// Iterate over all 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Square { row, col }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// Piece kind. Identity only; letters and glyphs are lookups on top.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Piece {
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    /// Letter used in move notation (empty for pawns).
    pub fn notation_letter(self) -> &'static str {
        match self {
            Piece::Pawn => "",
            Piece::Knight => "N",
            Piece::Bishop => "B",
            Piece::Rook => "R",
            Piece::Queen => "Q",
            Piece::King => "K",
        }
    }

    /// Single-letter code used in layout strings.
    pub fn code(self) -> char {
        match self {
            Piece::Pawn => 'P',
            Piece::Knight => 'N',
            Piece::Bishop => 'B',
            Piece::Rook => 'R',
            Piece::Queen => 'Q',
            Piece::King => 'K',
        }
    }

    /// Parse a layout code (case-insensitive).
    pub fn from_code(code: char) -> Result<Piece> {
        match code.to_ascii_uppercase() {
            'P' => Ok(Piece::Pawn),
            'N' => Ok(Piece::Knight),
            'B' => Ok(Piece::Bishop),
            'R' => Ok(Piece::Rook),
            'Q' => Ok(Piece::Queen),
            'K' => Ok(Piece::King),
            _ => Err(Error::UnknownPieceKind(code)),
        }
    }

    /// Glyph drawn on the board.
    pub fn glyph(self) -> char {
        match self {
            Piece::Pawn => '♙',
            Piece::Knight => '♘',
            Piece::Bishop => '♗',
            Piece::Rook => '♖',
            Piece::Queen => '♕',
            Piece::King => '♔',
        }
    }
}

/// Castling side. The king side is the one whose corner rook starts nearer
/// the king.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::KingSide, CastleSide::QueenSide];

    /// Notation token for castling on this side.
    pub fn token(self) -> &'static str {
        match self {
            CastleSide::KingSide => "O-O",
            CastleSide::QueenSide => "O-O-O",
        }
    }
}

/// Sticky castling flags. They only go false -> true, and clear on reset.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct CastlingRights {
    pub king_moved: bool,
    pub king_side_rook_moved: bool,
    pub queen_side_rook_moved: bool,
}

impl CastlingRights {
    #[inline]
    pub fn rook_moved(&self, side: CastleSide) -> bool {
        match side {
            CastleSide::KingSide => self.king_side_rook_moved,
            CastleSide::QueenSide => self.queen_side_rook_moved,
        }
    }

    #[inline]
    pub fn mark_rook_moved(&mut self, side: CastleSide) {
        match side {
            CastleSide::KingSide => self.king_side_rook_moved = true,
            CastleSide::QueenSide => self.queen_side_rook_moved = true,
        }
    }

    #[inline]
    pub fn mark_king_moved(&mut self) {
        self.king_moved = true;
    }

    /// Neither the king nor this side's rook has moved.
    #[inline]
    pub fn may_castle(&self, side: CastleSide) -> bool {
        !self.king_moved && !self.rook_moved(side)
    }
}

/// 8x8 grid, at most one piece per square.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Board {
    squares: [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Board {
    /// A board with no pieces.
    pub fn empty() -> Board {
        Board {
            squares: [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize],
        }
    }

    /// Starting position for the given layout: pawns on row 6, the layout's
    /// back rank on row 7.
    pub fn with_layout(layout: &BoardLayout) -> Board {
        let mut board = Board::empty();
        for (col, &piece) in layout.back_rank().iter().enumerate() {
            board.squares[HOME_ROW as usize][col] = Some(piece);
            board.squares[PAWN_ROW as usize][col] = Some(Piece::Pawn);
        }
        board
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.row as usize][sq.col as usize]
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Overwrite a square. Does NOT validate anything.
    #[inline]
    pub fn place(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.row as usize][sq.col as usize] = piece;
    }

    /// Number of occupied squares.
    pub fn piece_count(&self) -> usize {
        Square::all().filter(|&sq| !self.is_empty(sq)).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::with_layout(&BoardLayout::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_try_new() {
        assert_eq!(Square::try_new(7, 7), Ok(Square::new(7, 7)));
        assert_eq!(
            Square::try_new(8, 0),
            Err(Error::InvalidCoordinate { row: 8, col: 0 })
        );
        assert_eq!(
            Square::try_new(0, 9),
            Err(Error::InvalidCoordinate { row: 0, col: 9 })
        );
    }

    #[test]
    #[should_panic(expected = "square out of range")]
    fn test_square_new_out_of_range_panics() {
        let _ = Square::new(8, 8);
    }

    #[test]
    fn test_square_offset() {
        let sq = Square::new(7, 0);
        assert_eq!(sq.offset(-1, 0), Some(Square::new(6, 0)));
        assert_eq!(sq.offset(1, 0), None);
        assert_eq!(sq.offset(0, -1), None);
        assert_eq!(sq.offset(-7, 7), Some(Square::new(0, 7)));
        assert_eq!(sq.offset(-8, 0), None);
    }

    #[test]
    fn test_square_display() {
        assert_eq!(Square::new(4, 4).to_string(), "e4");
        assert_eq!(Square::new(0, 0).to_string(), "a8");
        assert_eq!(Square::new(7, 7).to_string(), "h1");
    }

    #[test]
    fn test_square_all() {
        let all: Vec<Square> = Square::all().collect();
        assert_eq!(all.len(), 64);
        assert_eq!(all[0], Square::new(0, 0));
        assert_eq!(all[9], Square::new(1, 1));
        assert_eq!(all[63], Square::new(7, 7));
    }

    #[test]
    fn test_piece_codes() {
        for piece in Piece::ALL {
            assert_eq!(Piece::from_code(piece.code()), Ok(piece));
        }
        assert_eq!(Piece::from_code('n'), Ok(Piece::Knight));
        assert_eq!(Piece::from_code('X'), Err(Error::UnknownPieceKind('X')));
    }

    #[test]
    fn test_piece_notation_letters() {
        assert_eq!(Piece::Pawn.notation_letter(), "");
        assert_eq!(Piece::Knight.notation_letter(), "N");
        assert_eq!(Piece::King.notation_letter(), "K");
    }

    #[test]
    fn test_initial_board() {
        let board = Board::default();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::King,
            Piece::Queen,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for col in 0..8 {
            assert_eq!(board.piece_at(Square::new(7, col)), Some(back_rank[col as usize]));
            assert_eq!(board.piece_at(Square::new(6, col)), Some(Piece::Pawn));
            for row in 0..6 {
                assert!(board.is_empty(Square::new(row, col)));
            }
        }
        assert_eq!(board.piece_count(), 16);
    }

    #[test]
    fn test_board_place() {
        let mut board = Board::empty();
        let sq = Square::new(3, 3);
        board.place(sq, Some(Piece::Queen));
        assert_eq!(board.piece_at(sq), Some(Piece::Queen));
        board.place(sq, Some(Piece::Knight));
        assert_eq!(board.piece_at(sq), Some(Piece::Knight));
        board.place(sq, None);
        assert!(board.is_empty(sq));
    }

    #[test]
    fn test_castling_rights_sticky() {
        let mut rights = CastlingRights::default();
        assert!(rights.may_castle(CastleSide::KingSide));
        assert!(rights.may_castle(CastleSide::QueenSide));

        rights.mark_rook_moved(CastleSide::KingSide);
        assert!(!rights.may_castle(CastleSide::KingSide));
        assert!(rights.may_castle(CastleSide::QueenSide));

        rights.mark_king_moved();
        assert!(!rights.may_castle(CastleSide::QueenSide));
    }
}

//! Overlay configuration.
//!
//! ```json
//! { "layout": "RNBKQBNR", "symbol_mode": false }
//! ```
//!
//! The layout is the home rank read from column 0 (`a`) to column 7 (`h`).
//! Its King column is the home column used to decide castling sides.

use serde::{Deserialize, Serialize};

use crate::{CastleSide, Error, Piece, Result, Square, BOARD_SIZE, HOME_ROW};

/// Home rank used when no layout is configured.
pub const DEFAULT_BACK_RANK: &str = "RNBKQBNR";

/// Column of the rook standing in each home-rank corner.
const CORNER_COLUMNS: [u8; 2] = [0, BOARD_SIZE - 1];

/// Validated home-rank layout.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BoardLayout {
    back_rank: [Piece; BOARD_SIZE as usize],
    king_col: u8,
}

impl BoardLayout {
    /// Build a layout from its home rank, checking that castling is
    /// well-defined on it.
    pub fn new(back_rank: [Piece; BOARD_SIZE as usize]) -> Result<BoardLayout> {
        let kings: Vec<usize> = (0..back_rank.len())
            .filter(|&col| back_rank[col] == Piece::King)
            .collect();
        let king_col = match kings.as_slice() {
            [col] => *col as u8,
            _ => {
                return Err(Error::InvalidLayout(format!(
                    "expected exactly one king, found {}",
                    kings.len()
                )))
            }
        };
        // Both castling targets (king column +-2) must land strictly between
        // the king and its corner rook.
        if !(3..=BOARD_SIZE - 4).contains(&king_col) {
            return Err(Error::InvalidLayout(format!(
                "king on column {king_col} leaves no room to castle"
            )));
        }
        for col in CORNER_COLUMNS {
            if back_rank[col as usize] != Piece::Rook {
                return Err(Error::InvalidLayout(format!(
                    "expected a rook on column {col}"
                )));
            }
        }
        Ok(BoardLayout { back_rank, king_col })
    }

    /// Parse a layout string such as `"RNBKQBNR"`.
    pub fn parse(s: &str) -> Result<BoardLayout> {
        let pieces = s
            .chars()
            .map(Piece::from_code)
            .collect::<Result<Vec<Piece>>>()?;
        let back_rank: [Piece; BOARD_SIZE as usize] = pieces.try_into().map_err(|v: Vec<Piece>| {
            Error::InvalidLayout(format!("expected 8 pieces, found {}", v.len()))
        })?;
        BoardLayout::new(back_rank)
    }

    #[inline]
    pub fn back_rank(&self) -> &[Piece; BOARD_SIZE as usize] {
        &self.back_rank
    }

    /// The king's home column.
    #[inline]
    pub fn king_column(&self) -> u8 {
        self.king_col
    }

    #[inline]
    pub fn king_home(&self) -> Square {
        Square::new(HOME_ROW, self.king_col)
    }

    /// Corner column of the rook for `side`. The king side is the nearer one.
    pub fn rook_column(&self, side: CastleSide) -> u8 {
        let near = if self.king_col < BOARD_SIZE / 2 { 0 } else { BOARD_SIZE - 1 };
        match side {
            CastleSide::KingSide => near,
            CastleSide::QueenSide => BOARD_SIZE - 1 - near,
        }
    }

    #[inline]
    pub fn rook_home(&self, side: CastleSide) -> Square {
        Square::new(HOME_ROW, self.rook_column(side))
    }

    /// Which castling rook starts on `sq`, if any.
    pub fn rook_side_at(&self, sq: Square) -> Option<CastleSide> {
        CastleSide::ALL
            .into_iter()
            .find(|&side| self.rook_home(side) == sq)
    }

    /// Castling side for a king moving `col_delta` columns along the home
    /// rank (sign only).
    pub fn side_toward(&self, col_delta: i8) -> CastleSide {
        let toward = if col_delta < 0 { 0 } else { BOARD_SIZE - 1 };
        if toward == self.rook_column(CastleSide::KingSide) {
            CastleSide::KingSide
        } else {
            CastleSide::QueenSide
        }
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        BoardLayout {
            back_rank: [
                Piece::Rook,
                Piece::Knight,
                Piece::Bishop,
                Piece::King,
                Piece::Queen,
                Piece::Bishop,
                Piece::Knight,
                Piece::Rook,
            ],
            king_col: 3,
        }
    }
}

impl TryFrom<String> for BoardLayout {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        BoardLayout::parse(&s)
    }
}

impl From<BoardLayout> for String {
    fn from(layout: BoardLayout) -> String {
        layout.back_rank.iter().map(|p| p.code()).collect()
    }
}

/// Session configuration. Every field has a default.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub layout: BoardLayout,
    /// Append a rotating decoy symbol after every notation token
    pub symbol_mode: bool,
}

impl OverlayConfig {
    /// Load configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<OverlayConfig> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }
}

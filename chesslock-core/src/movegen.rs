//! Candidate move generation.
//!
//! Candidates ignore turn order and check. Sliding pieces stop at the first
//! occupied square and include it as a terminal pseudo-capture. Knights and
//! kings include occupied targets as well. The caller decides what an
//! occupied candidate means.

use crate::{Board, BoardLayout, CastlingRights, Piece, Square, PAWN_ROW};

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Generates candidate destinations against a fixed board and castling state.
pub struct MoveGenerator<'a> {
    board: &'a Board,
    rights: &'a CastlingRights,
    layout: &'a BoardLayout,
}

impl<'a> MoveGenerator<'a> {
    pub fn new(board: &'a Board, rights: &'a CastlingRights, layout: &'a BoardLayout) -> Self {
        Self {
            board,
            rights,
            layout,
        }
    }

    /// Candidate destinations for `piece` standing on `origin`.
    ///
    /// Order is not meaningful.
    pub fn candidates(&self, piece: Piece, origin: Square) -> Vec<Square> {
        let mut moves = Vec::with_capacity(28);
        match piece {
            Piece::Pawn => self.pawn_moves(origin, &mut moves),
            Piece::Knight => Self::step_moves(origin, &KNIGHT_OFFSETS, &mut moves),
            Piece::Bishop => self.slide_moves(origin, &BISHOP_DIRECTIONS, &mut moves),
            Piece::Rook => self.slide_moves(origin, &ROOK_DIRECTIONS, &mut moves),
            Piece::Queen => {
                self.slide_moves(origin, &ROOK_DIRECTIONS, &mut moves);
                self.slide_moves(origin, &BISHOP_DIRECTIONS, &mut moves);
            }
            Piece::King => {
                Self::step_moves(origin, &KING_OFFSETS, &mut moves);
                self.castling_moves(origin, &mut moves);
            }
        }
        moves
    }

    /// One step toward row 0, two from the pawn row. Both squares must be
    /// empty; pawns never capture here.
    fn pawn_moves(&self, origin: Square, moves: &mut Vec<Square>) {
        let Some(one) = origin.offset(-1, 0) else {
            return;
        };
        if !self.board.is_empty(one) {
            return;
        }
        moves.push(one);

        if origin.row() == PAWN_ROW {
            if let Some(two) = origin.offset(-2, 0) {
                if self.board.is_empty(two) {
                    moves.push(two);
                }
            }
        }
    }

    fn slide_moves(&self, origin: Square, directions: &[(i8, i8)], moves: &mut Vec<Square>) {
        for &(dr, dc) in directions {
            let mut current = origin;
            while let Some(next) = current.offset(dr, dc) {
                moves.push(next);
                if !self.board.is_empty(next) {
                    break;
                }
                current = next;
            }
        }
    }

    fn step_moves(origin: Square, offsets: &[(i8, i8)], moves: &mut Vec<Square>) {
        moves.extend(
            offsets
                .iter()
                .filter_map(|&(dr, dc)| origin.offset(dr, dc)),
        );
    }

    /// Two columns toward a corner rook, when neither piece has moved, the
    /// rook is still in its corner and every square between them is empty.
    fn castling_moves(&self, origin: Square, moves: &mut Vec<Square>) {
        let home = self.layout.king_home();
        if origin != home {
            return;
        }
        for side in crate::CastleSide::ALL {
            if !self.rights.may_castle(side) {
                continue;
            }
            let rook = self.layout.rook_home(side);
            if self.board.piece_at(rook) != Some(Piece::Rook) {
                continue;
            }
            let (lo, hi) = if rook.col() < home.col() {
                (rook.col() + 1, home.col())
            } else {
                (home.col() + 1, rook.col())
            };
            let path_clear = (lo..hi).all(|col| self.board.is_empty(Square::new(home.row(), col)));
            if !path_clear {
                continue;
            }
            let step: i8 = if rook.col() < home.col() { -2 } else { 2 };
            if let Some(target) = home.offset(0, step) {
                moves.push(target);
            }
        }
    }
}

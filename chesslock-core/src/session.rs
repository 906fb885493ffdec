//! Interaction state machine.
//!
//! A [`Session`] turns square activations into board changes and notation
//! text. It owns the board, castling rights, selection, validity overlay and
//! encoder, plus the field currently receiving text.
//!
//! ```text
//!   Idle --- occupied square ---> PieceSelected
//!    ^                               |  valid square: commit
//!    +-------------------------------+  occupied square: reselect
//! ```
//!
//! Binding a different field marks the game stale. The reset happens the
//! next time the board is shown or used, so focusing the same field again
//! keeps the game going.

use serde::{Deserialize, Serialize};

use crate::notation::MoveKind;
use crate::{
    Board, BoardLayout, CastlingRights, Error, MoveGenerator, NotationEncoder, OverlayConfig,
    Piece, Result, Square, BOARD_SIZE, PROMOTION_ROW,
};

/// Identity of a text field in the host page.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct FieldId(pub u32);

/// Text sink receiving notation output.
pub trait TargetField {
    fn field_id(&self) -> FieldId;
    fn value(&self) -> &str;
    fn append(&mut self, text: &str);
    fn clear(&mut self);
}

/// In-memory field, mirroring a page input.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TextField {
    id: FieldId,
    value: String,
}

impl TextField {
    pub fn new(id: FieldId, value: impl Into<String>) -> Self {
        Self {
            id,
            value: value.into(),
        }
    }
}

impl TargetField for TextField {
    fn field_id(&self) -> FieldId {
        self.id
    }

    fn value(&self) -> &str {
        &self.value
    }

    fn append(&mut self, text: &str) {
        self.value.push_str(text);
    }

    fn clear(&mut self) {
        self.value.clear();
    }
}

/// Per-square marker for the selected piece's candidates.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Validity {
    #[default]
    None,
    /// Empty candidate; activating it commits the move.
    Valid,
    /// Occupied candidate, shown but not playable.
    Invalid,
}

/// The piece chosen for the pending move.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Selection {
    pub square: Square,
    pub piece: Piece,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionState {
    Idle,
    PieceSelected,
}

/// One square as the renderer sees it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct SquareView {
    pub piece: Option<Piece>,
    pub glyph: Option<char>,
    pub validity: Validity,
}

/// Full board for redraw, indexed `[row][col]`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub squares: [[SquareView; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl BoardSnapshot {
    #[inline]
    pub fn at(&self, sq: Square) -> &SquareView {
        &self.squares[sq.row() as usize][sq.col() as usize]
    }
}

/// Output of a session operation, in the order it happened.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Board, rights, selection and encoder rotation were reinitialized.
    Reset,
    /// The bound field's value was cleared.
    FieldCleared,
    /// Text appended to the bound field.
    TextAppended(String),
    BoardChanged(BoardSnapshot),
}

type Overlay = [[Validity; BOARD_SIZE as usize]; BOARD_SIZE as usize];

/// One board game bound to at most one text field.
pub struct Session<F: TargetField = TextField> {
    layout: BoardLayout,
    board: Board,
    rights: CastlingRights,
    selection: Option<Selection>,
    overlay: Overlay,
    encoder: NotationEncoder,
    target: Option<F>,
    /// Field the current game belongs to.
    owner: Option<FieldId>,
}

impl<F: TargetField> Session<F> {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            layout: config.layout,
            board: Board::with_layout(&config.layout),
            rights: CastlingRights::default(),
            selection: None,
            overlay: [[Validity::None; BOARD_SIZE as usize]; BOARD_SIZE as usize],
            encoder: NotationEncoder::new(config.symbol_mode),
            target: None,
            owner: None,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn rights(&self) -> &CastlingRights {
        &self.rights
    }

    #[inline]
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    #[inline]
    pub fn encoder(&self) -> &NotationEncoder {
        &self.encoder
    }

    pub fn state(&self) -> SessionState {
        match self.selection {
            Some(_) => SessionState::PieceSelected,
            None => SessionState::Idle,
        }
    }

    #[inline]
    pub fn validity(&self, sq: Square) -> Validity {
        self.overlay[sq.row() as usize][sq.col() as usize]
    }

    #[inline]
    pub fn target(&self) -> Option<&F> {
        self.target.as_ref()
    }

    /// Candidate destinations against the current board and rights.
    pub fn candidate_moves(&self, piece: Piece, origin: Square) -> Vec<Square> {
        MoveGenerator::new(&self.board, &self.rights, &self.layout).candidates(piece, origin)
    }

    /// Bind a field to receive text, returning the previously bound one.
    ///
    /// A different field than the one the game belongs to makes a reset
    /// pending; it is applied by the next [`show_board`](Self::show_board)
    /// or [`activate`](Self::activate).
    pub fn bind_target(&mut self, field: F) -> Option<F> {
        let previous = self.target.replace(field);
        if self.reset_pending() {
            log::debug!("target field changed, reset pending");
        }
        previous
    }

    pub fn unbind_target(&mut self) -> Option<F> {
        self.target.take()
    }

    /// A bound field differs from the one the game was played into.
    pub fn reset_pending(&self) -> bool {
        match &self.target {
            Some(field) => self.owner != Some(field.field_id()),
            None => false,
        }
    }

    /// Flip symbol mode, returning the new setting.
    pub fn toggle_symbol_mode(&mut self) -> bool {
        let enabled = self.encoder.toggle_symbol_mode();
        log::debug!("symbol mode {}", if enabled { "on" } else { "off" });
        enabled
    }

    /// Current board with the validity overlay.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            squares: std::array::from_fn(|row| {
                std::array::from_fn(|col| {
                    let piece = self.board.piece_at(Square::new(row as u8, col as u8));
                    SquareView {
                        piece,
                        glyph: piece.map(Piece::glyph),
                        validity: self.overlay[row][col],
                    }
                })
            }),
        }
    }

    /// The board is being shown: apply any pending reset and hand back a
    /// fresh snapshot.
    pub fn show_board(&mut self) -> Vec<SessionEvent> {
        let mut events = self.apply_pending_reset();
        events.push(SessionEvent::BoardChanged(self.snapshot()));
        events
    }

    /// Explicit reset from the UI.
    pub fn request_reset(&mut self) -> Vec<SessionEvent> {
        log::debug!("reset requested");
        self.reset()
    }

    /// Handle a click on `sq`.
    ///
    /// Returns [`Error::NoTargetBound`] when the click would commit a move
    /// but no field is bound; nothing changes in that case.
    pub fn activate(&mut self, sq: Square) -> Result<Vec<SessionEvent>> {
        let mut events = self.apply_pending_reset();

        if let Some(selection) = self.selection {
            if self.validity(sq) == Validity::Valid {
                if self.target.is_none() {
                    log::debug!("commit ignored, no target field bound");
                    return Err(Error::NoTargetBound);
                }
                events.extend(self.commit(selection, sq));
                return Ok(events);
            }
        }

        if let Some(piece) = self.board.piece_at(sq) {
            if self.selection.is_some() {
                log::trace!("selection replaced");
            }
            self.select(piece, sq);
            events.push(SessionEvent::BoardChanged(self.snapshot()));
        }
        Ok(events)
    }

    fn select(&mut self, piece: Piece, origin: Square) {
        self.clear_overlay();
        for to in self.candidate_moves(piece, origin) {
            self.overlay[to.row() as usize][to.col() as usize] = if self.board.is_empty(to) {
                Validity::Valid
            } else {
                Validity::Invalid
            };
        }
        self.selection = Some(Selection {
            square: origin,
            piece,
        });
        log::trace!("selected {:?}", piece);
    }

    /// Apply the selected move, emit its notation and go back to idle.
    fn commit(&mut self, selection: Selection, to: Square) -> Vec<SessionEvent> {
        let Selection { square: from, piece } = selection;
        let col_delta = to.col() as i8 - from.col() as i8;

        let kind = if piece == Piece::Pawn && to.row() == PROMOTION_ROW {
            MoveKind::Promotion { to }
        } else if piece == Piece::King && col_delta.abs() == 2 {
            MoveKind::Castle(self.layout.side_toward(col_delta))
        } else {
            MoveKind::Normal { piece, to }
        };

        match (kind, piece) {
            (MoveKind::Castle(side), _) => {
                // Rook lands on the square the king passed over.
                let rook_from = self.layout.rook_home(side);
                let rook_to = Square::new(to.row(), (to.col() as i8 - col_delta.signum()) as u8);
                self.board.place(rook_from, None);
                self.board.place(rook_to, Some(Piece::Rook));
                self.rights.mark_rook_moved(side);
                self.rights.mark_king_moved();
            }
            (_, Piece::King) => self.rights.mark_king_moved(),
            (_, Piece::Rook) => {
                if let Some(side) = self.layout.rook_side_at(from) {
                    self.rights.mark_rook_moved(side);
                }
            }
            _ => {}
        }

        let placed = match kind {
            MoveKind::Promotion { .. } => Piece::Queen,
            _ => piece,
        };
        self.board.place(to, Some(placed));
        self.board.place(from, None);

        let text = self.encoder.encode(kind);
        if let Some(field) = self.target.as_mut() {
            field.append(&text);
        }
        log::trace!("committed {:?}, {} chars appended", piece, text.chars().count());

        self.selection = None;
        self.clear_overlay();
        vec![
            SessionEvent::TextAppended(text),
            SessionEvent::BoardChanged(self.snapshot()),
        ]
    }

    fn apply_pending_reset(&mut self) -> Vec<SessionEvent> {
        if self.reset_pending() {
            log::debug!("applying reset for new target field");
            self.reset()
        } else {
            Vec::new()
        }
    }

    fn reset(&mut self) -> Vec<SessionEvent> {
        self.board = Board::with_layout(&self.layout);
        self.rights = CastlingRights::default();
        self.selection = None;
        self.clear_overlay();
        self.encoder.reset();

        let mut events = vec![SessionEvent::Reset];
        if let Some(field) = self.target.as_mut() {
            field.clear();
            self.owner = Some(field.field_id());
            events.push(SessionEvent::FieldCleared);
        }
        events.push(SessionEvent::BoardChanged(self.snapshot()));
        events
    }

    fn clear_overlay(&mut self) {
        self.overlay = [[Validity::None; BOARD_SIZE as usize]; BOARD_SIZE as usize];
    }
}

impl Default for Session<TextField> {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}

use photosynth_engine::{CellCoord, CellZone, Move, MoveKind, Piece, order_removals_first};
use tracing::{debug, warn};

use crate::label::{Label, LabelSnapshot, PieceClasses, SUN_ABSENT};

/// Turns consecutive gated snapshots into game moves.
///
/// The first snapshot only sets the baseline. Each later one is compared
/// cell by cell against its predecessor:
///
/// | cell  | before   | after    | moves                          |
/// |-------|----------|----------|--------------------------------|
/// | sun   | absent   | present  | sun added                      |
/// | sun   | present  | absent   | sun removed                    |
/// | board | empty    | piece    | added                          |
/// | board | piece    | empty    | removed                        |
/// | board | piece    | other    | removed, then added            |
/// | store | occupied | empty    | bought from store              |
/// | store | empty    | occupied | returned to store              |
///
/// Removals are listed before every other move of the batch. Within the
/// removals and within the rest, sun moves come before board moves.
#[derive(Debug, Clone)]
pub struct MoveExtractor {
    classes: PieceClasses,
    previous: Option<LabelSnapshot>,
}

impl MoveExtractor {
    #[must_use]
    pub fn new(classes: PieceClasses) -> Self {
        Self {
            classes,
            previous: None,
        }
    }

    /// Compares `snapshot` with the previous one and returns the moves in between.
    pub fn extract(&mut self, snapshot: LabelSnapshot) -> Vec<Move> {
        let Some(previous) = self.previous.take() else {
            self.previous = Some(snapshot);
            return Vec::new();
        };
        let moves = self.diff(&previous, &snapshot);
        self.previous = Some(snapshot);
        moves
    }

    fn diff(&self, previous: &LabelSnapshot, current: &LabelSnapshot) -> Vec<Move> {
        let mut moves = Vec::new();
        // sun moves go first so a new round is scored before same-frame plantings
        for (i, (&before, &after)) in previous.sun.iter().zip(&current.sun).enumerate() {
            let kind = match (before == SUN_ABSENT, after == SUN_ABSENT) {
                (true, false) => MoveKind::Added,
                (false, true) => MoveKind::Removed,
                _ => continue,
            };
            moves.push(Move::new(Piece::SUN, kind, CellCoord::sun(i)));
        }
        for (i, (&before, &after)) in previous.board.iter().zip(&current.board).enumerate() {
            if before == after {
                continue;
            }
            let Some(coords) = CellCoord::from_index(i) else {
                continue;
            };
            match coords.zone() {
                Some(CellZone::Regular(_)) => {
                    self.regular_moves(coords, before, after, &mut moves);
                }
                Some(CellZone::Store(_)) => self.store_moves(coords, before, after, &mut moves),
                Some(CellZone::Sun) | None => {}
            }
        }

        order_removals_first(&mut moves);
        for mv in &moves {
            debug!(kind = %mv.kind, piece = %mv.piece.kind(), coords = %mv.coords, "move detected");
        }
        moves
    }

    fn regular_moves(&self, coords: CellCoord, before: Label, after: Label, moves: &mut Vec<Move>) {
        let Some(old) = self.lookup(coords, before) else {
            return;
        };
        let Some(new) = self.lookup(coords, after) else {
            return;
        };
        if old == new {
            return;
        }
        if let Some(piece) = old {
            moves.push(Move::new(piece, MoveKind::Removed, coords));
        }
        if let Some(piece) = new {
            moves.push(Move::new(piece, MoveKind::Added, coords));
        }
    }

    fn store_moves(&self, coords: CellCoord, before: Label, after: Label, moves: &mut Vec<Move>) {
        let empty = self.classes.empty_label();
        let kind = match (before == empty, after == empty) {
            (false, true) => MoveKind::BoughtFromStore,
            (true, false) => MoveKind::ReturnedToStore,
            _ => return,
        };
        if let Some(piece) = coords.store_piece() {
            moves.push(Move::new(piece, kind, coords));
        }
    }

    /// Resolves a board label: `Some(None)` for empty, `None` for a label outside the table.
    fn lookup(&self, coords: CellCoord, label: Label) -> Option<Option<Piece>> {
        if label == self.classes.empty_label() {
            return Some(None);
        }
        let piece = self.classes.piece(label);
        if piece.is_none() {
            warn!(%coords, label, "unknown label, transition skipped");
        }
        piece.map(Some)
    }
}

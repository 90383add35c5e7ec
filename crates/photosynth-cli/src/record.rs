use chrono::{DateTime, Utc};
use photosynth_engine::{CellCoord, Move, MoveKind, Piece, PieceKind, Player};
use serde::{Deserialize, Serialize};

/// One detected move as written to the moves log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// When the move was detected (seconds since the Unix epoch)
    #[serde(with = "chrono::serde::ts_seconds")]
    pub unix_timestamp: DateTime<Utc>,
    pub move_kind: MoveKind,
    pub piece_kind: PieceKind,
    /// Owner of the piece; absent for the sun marker
    pub player: Option<Player>,
    pub level: u8,
    pub angle: u8,
}

impl MoveRecord {
    pub fn new(mv: &Move, unix_timestamp: DateTime<Utc>) -> Self {
        Self {
            unix_timestamp,
            move_kind: mv.kind,
            piece_kind: mv.piece.kind(),
            player: mv.piece.owner(),
            level: mv.coords.level(),
            angle: mv.coords.angle(),
        }
    }

    /// Rebuilds the move this record was written for.
    pub fn to_move(&self) -> Move {
        let piece = match self.player {
            Some(owner) => Piece::new(owner, self.piece_kind),
            None => Piece::SUN,
        };
        Move::new(piece, self.move_kind, CellCoord::new(self.level, self.angle))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;

    use super::*;

    #[test]
    fn test_record_json() {
        let mv = Move::new(
            Piece::new(Player::Winter, PieceKind::Small),
            MoveKind::BoughtFromStore,
            CellCoord::new(5, 6),
        );
        let timestamp = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let record = MoveRecord::new(&mv, timestamp);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"unix_timestamp":1700000000,"move_kind":"bought_from_store","piece_kind":"small","player":"winter","level":5,"angle":6}"#
        );
        let back: MoveRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_move(), mv);
    }

    #[test]
    fn test_sun_record_has_no_player() {
        let mv = Move::new(Piece::SUN, MoveKind::Added, CellCoord::sun(3));
        let record = MoveRecord::new(&mv, Utc::now());
        assert_eq!(record.player, None);
        assert_eq!(record.piece_kind, PieceKind::Sun);
        assert_eq!(record.to_move(), mv);
    }
}

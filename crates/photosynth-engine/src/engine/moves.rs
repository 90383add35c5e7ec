use serde::{Deserialize, Serialize};

use crate::core::{CellCoord, Piece, Player};

/// What happened to a piece on a cell.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    Serialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    #[display("added")]
    Added,
    #[display("removed")]
    Removed,
    #[display("bought_from_store")]
    BoughtFromStore,
    #[display("returned_to_store")]
    ReturnedToStore,
}

/// A single observed change on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Move {
    pub piece: Piece,
    pub kind: MoveKind,
    pub coords: CellCoord,
}

impl Move {
    #[must_use]
    pub const fn new(piece: Piece, kind: MoveKind, coords: CellCoord) -> Self {
        Self {
            piece,
            kind,
            coords,
        }
    }
}

/// Which counter a manual override corrects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum PointsType {
    #[display("sun")]
    Sun,
    #[display("score")]
    Score,
}

/// Manual point correction. Bypasses the game rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Override {
    pub player: Player,
    pub points_type: PointsType,
    pub delta: i32,
}

/// Orders a batch of moves so that every removal comes first.
///
/// The order within each group is preserved. Applying removals before
/// placements lets a swap on one cell (and a tree cut followed by a planting
/// in the same frame) see the board in the state the players left it.
pub fn order_removals_first(moves: &mut [Move]) {
    moves.sort_by_key(|m| !m.kind.is_removed());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PieceKind;

    #[test]
    fn test_order_removals_first_is_stable() {
        let seed = Piece::new(Player::Autumn, PieceKind::Seed);
        let large = Piece::new(Player::Winter, PieceKind::Large);
        let mut moves = [
            Move::new(seed, MoveKind::Added, CellCoord::new(1, 0)),
            Move::new(large, MoveKind::Removed, CellCoord::new(2, 0)),
            Move::new(seed, MoveKind::BoughtFromStore, CellCoord::new(4, 0)),
            Move::new(seed, MoveKind::Removed, CellCoord::new(3, 0)),
            Move::new(Piece::SUN, MoveKind::Added, CellCoord::sun(2)),
        ];
        order_removals_first(&mut moves);

        let order: Vec<_> = moves.iter().map(|m| (m.kind, m.coords)).collect();
        assert_eq!(
            order,
            [
                (MoveKind::Removed, CellCoord::new(2, 0)),
                (MoveKind::Removed, CellCoord::new(3, 0)),
                (MoveKind::Added, CellCoord::new(1, 0)),
                (MoveKind::BoughtFromStore, CellCoord::new(4, 0)),
                (MoveKind::Added, CellCoord::sun(2)),
            ]
        );
    }

    #[test]
    fn test_override_deserialization() {
        let json = r#"{"player":"autumn","points_type":"score","delta":-4}"#;
        let value: Override = serde_json::from_str(json).unwrap();
        assert_eq!(
            value,
            Override {
                player: Player::Autumn,
                points_type: PointsType::Score,
                delta: -4,
            }
        );
    }
}

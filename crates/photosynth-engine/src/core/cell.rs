use serde::{Deserialize, Serialize};

use super::piece::{Piece, PieceKind, Player};

/// Number of positions on each ring, innermost first.
///
/// - rings 0-3: the hexagonal board (1 + 6 + 12 + 18 cells)
/// - ring 4: autumn player's store
/// - ring 5: winter player's store
/// - ring 6: sun corners
pub const RING_SIZES: [usize; 7] = [1, 6, 12, 18, 13, 13, 6];

pub const SUN_LEVEL: u8 = 6;
pub const AUTUMN_STORE_LEVEL: u8 = 4;
pub const WINTER_STORE_LEVEL: u8 = 5;

/// Number of regular board cells (rings 0-3).
pub const REGULAR_CELL_COUNT: usize = 37;
/// Number of cells read by the piece classifier (regular and store cells).
pub const BOARD_CELL_COUNT: usize = 63;
/// Number of sun corners.
pub const SUN_CELL_COUNT: usize = 6;
/// Total number of sensing positions.
pub const CELL_COUNT: usize = BOARD_CELL_COUNT + SUN_CELL_COUNT;

const RING_OFFSETS: [usize; 7] = {
    let mut offsets = [0; 7];
    let mut i = 1;
    while i < RING_SIZES.len() {
        offsets[i] = offsets[i - 1] + RING_SIZES[i - 1];
        i += 1;
    }
    assert!(offsets[4] == REGULAR_CELL_COUNT);
    assert!(offsets[6] == BOARD_CELL_COUNT);
    offsets
};

/// Every cell in canonical order: ring by ring, angles counter-clockwise.
///
/// Classifier outputs and image crops are indexed in this order.
#[expect(clippy::cast_possible_truncation)]
pub const ALL_CELLS: [CellCoord; CELL_COUNT] = {
    let mut cells = [CellCoord::new(0, 0); CELL_COUNT];
    let mut level = 0;
    while level < RING_SIZES.len() {
        let mut angle = 0;
        while angle < RING_SIZES[level] {
            cells[RING_OFFSETS[level] + angle] = CellCoord::new(level as u8, angle as u8);
            angle += 1;
        }
        level += 1;
    }
    cells
};

/// Position of a sensing cell: ring (`level`) and position within the ring (`angle`).
///
/// Construction does not validate the pair; use [`CellCoord::index`] or
/// [`CellCoord::zone`] to find out whether it names one of the 69 cells.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Deserialize,
    Serialize,
    derive_more::Display,
)]
#[display("({level}, {angle})")]
pub struct CellCoord {
    level: u8,
    angle: u8,
}

/// What a cell is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum CellZone {
    Regular(RewardTier),
    Store(Player),
    Sun,
}

/// Reward table a cell falls under when a large tree is harvested there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RewardTier {
    /// Rings 0 and 1.
    #[display("center")]
    Center,
    /// Ring 2.
    #[display("fertile")]
    Fertile,
    /// Ring 3.
    #[display("edge")]
    Edge,
}

impl CellCoord {
    #[must_use]
    pub const fn new(level: u8, angle: u8) -> Self {
        Self { level, angle }
    }

    #[must_use]
    pub const fn level(self) -> u8 {
        self.level
    }

    #[must_use]
    pub const fn angle(self) -> u8 {
        self.angle
    }

    /// Returns the coordinates of the `i`-th sun corner.
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub const fn sun(i: usize) -> Self {
        Self::new(SUN_LEVEL, i as u8)
    }

    /// Returns the canonical index of this cell, or `None` if no such cell exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use photosynth_engine::CellCoord;
    ///
    /// assert_eq!(CellCoord::new(0, 0).index(), Some(0));
    /// assert_eq!(CellCoord::new(2, 0).index(), Some(7));
    /// assert_eq!(CellCoord::new(6, 5).index(), Some(68));
    /// assert_eq!(CellCoord::new(1, 6).index(), None);
    /// ```
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        let level = self.level as usize;
        if level >= RING_SIZES.len() || self.angle as usize >= RING_SIZES[level] {
            return None;
        }
        Some(RING_OFFSETS[level] + self.angle as usize)
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        ALL_CELLS.get(index).copied()
    }

    #[must_use]
    pub const fn zone(self) -> Option<CellZone> {
        if self.index().is_none() {
            return None;
        }
        let zone = match self.level {
            0 | 1 => CellZone::Regular(RewardTier::Center),
            2 => CellZone::Regular(RewardTier::Fertile),
            3 => CellZone::Regular(RewardTier::Edge),
            AUTUMN_STORE_LEVEL => CellZone::Store(Player::Autumn),
            WINTER_STORE_LEVEL => CellZone::Store(Player::Winter),
            _ => CellZone::Sun,
        };
        Some(zone)
    }

    /// Returns the piece a store slot holds when it is full, or `None` for
    /// cells outside the stores.
    #[must_use]
    pub const fn store_piece(self) -> Option<Piece> {
        match self.zone() {
            Some(CellZone::Store(owner)) => {
                Some(Piece::new(owner, PieceKind::from_store_angle(self.angle)))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_all_cells_index_roundtrip() {
        for (i, cell) in ALL_CELLS.iter().enumerate() {
            assert_eq!(cell.index(), Some(i));
            assert_eq!(CellCoord::from_index(i), Some(*cell));
        }
        let unique: HashSet<_> = ALL_CELLS.iter().collect();
        assert_eq!(unique.len(), CELL_COUNT);
        assert_eq!(CellCoord::from_index(CELL_COUNT), None);
    }

    #[test]
    fn test_zone_counts() {
        let regular = ALL_CELLS
            .iter()
            .filter(|c| c.zone().is_some_and(|z| z.is_regular()))
            .count();
        let autumn = ALL_CELLS
            .iter()
            .filter(|c| c.zone() == Some(CellZone::Store(Player::Autumn)))
            .count();
        let winter = ALL_CELLS
            .iter()
            .filter(|c| c.zone() == Some(CellZone::Store(Player::Winter)))
            .count();
        let sun = ALL_CELLS
            .iter()
            .filter(|c| c.zone() == Some(CellZone::Sun))
            .count();
        assert_eq!(
            (regular, autumn, winter, sun),
            (REGULAR_CELL_COUNT, 13, 13, SUN_CELL_COUNT)
        );
        assert!(ALL_CELLS[BOARD_CELL_COUNT..].iter().all(|c| c.level() == SUN_LEVEL));
    }

    #[test]
    fn test_unknown_coords() {
        assert_eq!(CellCoord::new(7, 0).zone(), None);
        assert_eq!(CellCoord::new(3, 18).zone(), None);
        assert_eq!(CellCoord::new(3, 18).store_piece(), None);
    }

    #[test]
    fn test_store_piece() {
        assert_eq!(
            CellCoord::new(4, 2).store_piece(),
            Some(Piece::new(Player::Autumn, PieceKind::Seed))
        );
        assert_eq!(
            CellCoord::new(5, 12).store_piece(),
            Some(Piece::new(Player::Winter, PieceKind::Large))
        );
        assert_eq!(CellCoord::new(2, 3).store_piece(), None);
    }

    #[test]
    fn test_reward_tiers() {
        assert_eq!(
            CellCoord::new(1, 4).zone(),
            Some(CellZone::Regular(RewardTier::Center))
        );
        assert_eq!(
            CellCoord::new(2, 11).zone(),
            Some(CellZone::Regular(RewardTier::Fertile))
        );
        assert_eq!(
            CellCoord::new(3, 17).zone(),
            Some(CellZone::Regular(RewardTier::Edge))
        );
    }
}

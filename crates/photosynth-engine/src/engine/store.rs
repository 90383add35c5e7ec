use serde::{Deserialize, Serialize};

use crate::core::PieceKind;

/// Pieces a player has not yet bought.
///
/// Buying gets more expensive as a stack runs low. Costs are evaluated against
/// the count *before* the purchase:
///
/// | kind   | cost                 |
/// |--------|----------------------|
/// | seed   | 1, or 2 when ≤ 1 left |
/// | small  | 2, or 3 when ≤ 1 left |
/// | medium | 3, or 4 when 0 left  |
/// | large  | 4, or 5 when 0 left  |
///
/// # Example
///
/// ```
/// use photosynth_engine::{PieceKind, StoreInventory};
///
/// let mut store = StoreInventory::new();
/// let costs: Vec<_> = (0..4).map(|_| store.buy(PieceKind::Seed)).collect();
///
/// assert_eq!(costs, [1, 1, 1, 2]);
/// assert_eq!(store.count(PieceKind::Seed), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoreInventory {
    seed: u8,
    small: u8,
    medium: u8,
    large: u8,
}

impl Default for StoreInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreInventory {
    /// Creates a full store: 4 seeds, 4 small, 3 medium and 2 large trees.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            seed: 4,
            small: 4,
            medium: 3,
            large: 2,
        }
    }

    /// Returns the number of pieces of `kind` left in the store. Always 0 for the sun.
    #[must_use]
    pub const fn count(&self, kind: PieceKind) -> u8 {
        match kind {
            PieceKind::Seed => self.seed,
            PieceKind::Small => self.small,
            PieceKind::Medium => self.medium,
            PieceKind::Large => self.large,
            PieceKind::Sun => 0,
        }
    }

    /// Returns the sun-point cost of buying one piece of `kind` now.
    #[must_use]
    pub const fn price(&self, kind: PieceKind) -> u32 {
        match kind {
            PieceKind::Seed => {
                if self.seed <= 1 {
                    2
                } else {
                    1
                }
            }
            PieceKind::Small => {
                if self.small <= 1 {
                    3
                } else {
                    2
                }
            }
            PieceKind::Medium => {
                if self.medium == 0 {
                    4
                } else {
                    3
                }
            }
            PieceKind::Large => {
                if self.large == 0 {
                    5
                } else {
                    4
                }
            }
            PieceKind::Sun => 0,
        }
    }

    /// Takes one piece out of the store and returns what it cost.
    ///
    /// Counts saturate at zero.
    pub fn buy(&mut self, kind: PieceKind) -> u32 {
        let cost = self.price(kind);
        if let Some(count) = self.slot_mut(kind) {
            *count = count.saturating_sub(1);
        }
        cost
    }

    /// Puts one piece back into the store.
    pub fn return_piece(&mut self, kind: PieceKind) {
        if let Some(count) = self.slot_mut(kind) {
            *count = count.saturating_add(1);
        }
    }

    fn slot_mut(&mut self, kind: PieceKind) -> Option<&mut u8> {
        match kind {
            PieceKind::Seed => Some(&mut self.seed),
            PieceKind::Small => Some(&mut self.small),
            PieceKind::Medium => Some(&mut self.medium),
            PieceKind::Large => Some(&mut self.large),
            PieceKind::Sun => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buy_all(kind: PieceKind) -> Vec<u32> {
        let mut store = StoreInventory::new();
        (0..store.count(kind)).map(|_| store.buy(kind)).collect()
    }

    #[test]
    fn test_price_escalation() {
        assert_eq!(buy_all(PieceKind::Seed), [1, 1, 1, 2]);
        assert_eq!(buy_all(PieceKind::Small), [2, 2, 2, 3]);
        assert_eq!(buy_all(PieceKind::Medium), [3, 3, 3]);
        assert_eq!(buy_all(PieceKind::Large), [4, 4]);
    }

    #[test]
    fn test_empty_stack_prices() {
        let mut store = StoreInventory::new();
        for _ in 0..3 {
            store.buy(PieceKind::Medium);
        }
        assert_eq!(store.price(PieceKind::Medium), 4);
        assert_eq!(store.buy(PieceKind::Medium), 4);
        assert_eq!(store.count(PieceKind::Medium), 0);
    }

    #[test]
    fn test_return_restores_price() {
        let mut store = StoreInventory::new();
        for _ in 0..3 {
            store.buy(PieceKind::Seed);
        }
        assert_eq!(store.price(PieceKind::Seed), 2);
        store.return_piece(PieceKind::Seed);
        assert_eq!(store.count(PieceKind::Seed), 2);
        assert_eq!(store.price(PieceKind::Seed), 1);
    }

    #[test]
    fn test_sun_is_not_stocked() {
        let mut store = StoreInventory::new();
        assert_eq!(store.buy(PieceKind::Sun), 0);
        store.return_piece(PieceKind::Sun);
        assert_eq!(store, StoreInventory::new());
    }
}

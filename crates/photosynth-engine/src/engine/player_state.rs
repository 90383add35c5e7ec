use serde::{Deserialize, Serialize};

use super::store::StoreInventory;

/// Points and store of one player.
///
/// Tracks the two counters a player accumulates during a game:
///
/// - **Sun points**: currency collected at the end of each round and spent on
///   planting, growing, buying and harvesting
/// - **Score**: victory points from harvested large trees
///
/// Both counters are unsigned. Debits that would take a counter below zero
/// stop at zero.
///
/// # Example
///
/// ```
/// use photosynth_engine::PlayerState;
///
/// let mut player = PlayerState::new();
/// player.add_sun_points(2);
/// player.debit_sun_points(5);
///
/// assert_eq!(player.sun_points(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlayerState {
    sun_points: u32,
    score: u32,
    store: StoreInventory,
}

impl PlayerState {
    /// Creates a player with no points and a full store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sun_points: 0,
            score: 0,
            store: StoreInventory::new(),
        }
    }

    #[must_use]
    pub const fn sun_points(&self) -> u32 {
        self.sun_points
    }

    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub const fn store(&self) -> &StoreInventory {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut StoreInventory {
        &mut self.store
    }

    pub const fn add_sun_points(&mut self, points: u32) {
        self.sun_points = self.sun_points.saturating_add(points);
    }

    pub const fn debit_sun_points(&mut self, points: u32) {
        self.sun_points = self.sun_points.saturating_sub(points);
    }

    pub const fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Applies a signed correction to the sun points, clamped at zero.
    pub const fn adjust_sun_points(&mut self, delta: i32) {
        self.sun_points = self.sun_points.saturating_add_signed(delta);
    }

    /// Applies a signed correction to the score, clamped at zero.
    pub const fn adjust_score(&mut self, delta: i32) {
        self.score = self.score.saturating_add_signed(delta);
    }

    /// Converts the remaining sun points into score at the end of the game.
    ///
    /// Every full 3 sun points are worth 1 point; leftovers are lost.
    pub const fn convert_sun_points(&mut self) {
        self.score = self.score.saturating_add(self.sun_points / 3);
        self.sun_points = 0;
    }
}

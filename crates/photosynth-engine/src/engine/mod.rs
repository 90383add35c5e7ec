//! Game state and rules.
//!
//! - [`Game`] - authoritative game state; applies moves, overrides and the end of game
//! - [`BoardState`] - occupancy of all 69 cells and per-cell round memory
//! - [`PlayerState`] - sun points, score and [`StoreInventory`] of one player
//! - [`light_income`] - shading-aware end-of-round scoring
//! - [`GameProcessor`] - [`Command`] front end producing a [`GameUpdate`] per command
//!
//! # Rounds
//!
//! A round ends when the sun marker is placed on a corner. The trees then
//! collect light along the seven lines of that corner, the free first round
//! is over, and every cell forgets what was removed from it during the round.

pub use self::{
    board_state::*, game::*, moves::*, player_state::*, processor::*, scoring::*, store::*,
};

mod board_state;
mod game;
mod moves;
mod player_state;
mod processor;
mod scoring;
mod store;

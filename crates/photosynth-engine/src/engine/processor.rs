use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{Player, RewardTier};

use super::{
    board_state::CellOccupancy,
    game::Game,
    moves::{Move, Override},
};

/// Input message of the rule stage.
///
/// Serialized as `{"cmd": "<name>", "data": <payload>}`; commands without a
/// payload omit `data`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "cmd", content = "data", rename_all = "snake_case")]
pub enum Command {
    Move(Move),
    Override(Override),
    EndGame,
    UpdateBusyFlag(bool),
}

/// Scoreboard pushed to display collaborators after every command.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameStateSummary {
    pub winter_sun_points: u32,
    pub winter_score: u32,
    pub autumn_sun_points: u32,
    pub autumn_score: u32,
    pub busy: bool,
    pub next_center_reward: u32,
    pub next_fertile_reward: u32,
    pub next_edge_reward: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameUpdate {
    pub summary: GameStateSummary,
    pub board: Vec<CellOccupancy>,
}

/// Drives a [`Game`] from [`Command`]s.
#[derive(Debug, Clone, Default)]
pub struct GameProcessor {
    game: Game,
    busy: bool,
}

impl GameProcessor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Applies one command and returns the resulting state.
    ///
    /// A move the game rejects is logged and leaves the state unchanged.
    pub fn handle(&mut self, command: Command) -> GameUpdate {
        match command {
            Command::Move(mv) => {
                if let Err(err) = self.game.apply_move(&mv) {
                    warn!(kind = %mv.kind, coords = %mv.coords, "move rejected: {err}");
                }
            }
            Command::Override(correction) => self.game.apply_override(&correction),
            Command::EndGame => self.game.end_game(),
            Command::UpdateBusyFlag(busy) => self.busy = busy,
        }
        self.update()
    }

    #[must_use]
    pub fn summary(&self) -> GameStateSummary {
        let autumn = self.game.player(Player::Autumn);
        let winter = self.game.player(Player::Winter);
        let harvests = self.game.harvests();
        GameStateSummary {
            winter_sun_points: winter.sun_points(),
            winter_score: winter.score(),
            autumn_sun_points: autumn.sun_points(),
            autumn_score: autumn.score(),
            busy: self.busy,
            next_center_reward: harvests.next_reward(RewardTier::Center),
            next_fertile_reward: harvests.next_reward(RewardTier::Fertile),
            next_edge_reward: harvests.next_reward(RewardTier::Edge),
        }
    }

    #[must_use]
    pub fn update(&self) -> GameUpdate {
        GameUpdate {
            summary: self.summary(),
            board: self.game.board().snapshot(),
        }
    }
}

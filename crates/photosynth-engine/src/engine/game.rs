use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    MoveError,
    core::{CellCoord, CellZone, Piece, PieceKind, Player, RewardTier},
};

use super::{
    board_state::{BoardState, CellState},
    moves::{Move, MoveKind, Override, PointsType},
    player_state::PlayerState,
    scoring::{REWARDS_CENTER, REWARDS_EDGE, REWARDS_FERTILE, light_income},
};

/// Sun points it costs to harvest a large tree.
const HARVEST_COST: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    InProgress,
    Ended,
}

/// Number of large trees harvested so far in each reward tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct HarvestCounters {
    center: usize,
    fertile: usize,
    edge: usize,
}

impl HarvestCounters {
    #[must_use]
    pub const fn count(&self, tier: RewardTier) -> usize {
        match tier {
            RewardTier::Center => self.center,
            RewardTier::Fertile => self.fertile,
            RewardTier::Edge => self.edge,
        }
    }

    /// Returns what the next harvest in `tier` is worth; 0 once the table is exhausted.
    #[must_use]
    pub fn next_reward(&self, tier: RewardTier) -> u32 {
        let table: &[u32] = match tier {
            RewardTier::Center => &REWARDS_CENTER,
            RewardTier::Fertile => &REWARDS_FERTILE,
            RewardTier::Edge => &REWARDS_EDGE,
        };
        table.get(self.count(tier)).copied().unwrap_or(0)
    }

    /// Records a harvest in `tier` and returns its reward.
    fn record(&mut self, tier: RewardTier) -> u32 {
        let reward = self.next_reward(tier);
        let counter = match tier {
            RewardTier::Center => &mut self.center,
            RewardTier::Fertile => &mut self.fertile,
            RewardTier::Edge => &mut self.edge,
        };
        *counter += 1;
        reward
    }
}

/// Rule engine: the authoritative state of one game.
///
/// All changes go through [`Game::apply_move`], [`Game::apply_override`] and
/// [`Game::end_game`]. A move that does not fit the current board (removing
/// from an empty cell, buying from an empty store slot, unknown coordinates,
/// ...) is rejected with a [`MoveError`] and leaves the state untouched.
///
/// # Example
///
/// ```
/// use photosynth_engine::{CellCoord, Game, Move, MoveKind, Piece, PieceKind, Player};
///
/// let mut game = Game::new();
/// let tree = Piece::new(Player::Autumn, PieceKind::Large);
///
/// game.apply_move(&Move::new(tree, MoveKind::Added, CellCoord::new(3, 0)))?;
/// game.apply_move(&Move::new(Piece::SUN, MoveKind::Added, CellCoord::sun(0)))?;
///
/// assert_eq!(game.player(Player::Autumn).sun_points(), 3);
/// assert!(!game.is_first_round());
/// # Ok::<(), photosynth_engine::MoveError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    board: BoardState,
    autumn: PlayerState,
    winter: PlayerState,
    first_round: bool,
    harvests: HarvestCounters,
    phase: GamePhase,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: BoardState::new(),
            autumn: PlayerState::new(),
            winter: PlayerState::new(),
            first_round: true,
            harvests: HarvestCounters::default(),
            phase: GamePhase::InProgress,
        }
    }

    #[must_use]
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    #[must_use]
    pub fn player(&self, player: Player) -> &PlayerState {
        match player {
            Player::Autumn => &self.autumn,
            Player::Winter => &self.winter,
        }
    }

    fn player_mut(&mut self, player: Player) -> &mut PlayerState {
        match player {
            Player::Autumn => &mut self.autumn,
            Player::Winter => &mut self.winter,
        }
    }

    #[must_use]
    pub fn is_first_round(&self) -> bool {
        self.first_round
    }

    #[must_use]
    pub fn harvests(&self) -> &HarvestCounters {
        &self.harvests
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn apply_move(&mut self, mv: &Move) -> Result<(), MoveError> {
        if self.phase.is_ended() {
            return Err(MoveError::GameEnded);
        }
        let coords = mv.coords;
        let zone = coords.zone().ok_or(MoveError::UnknownCell { coords })?;
        let is_sun = mv.piece.kind().is_sun();
        match (mv.kind, zone) {
            (MoveKind::Added, CellZone::Sun) if is_sun => self.place_sun(coords)?,
            (MoveKind::Added, CellZone::Regular(_)) if !is_sun => self.plant(coords, mv.piece)?,
            (MoveKind::Removed, CellZone::Sun) => self.remove_sun(coords)?,
            (MoveKind::Removed, CellZone::Regular(tier)) => self.remove_tree(coords, tier)?,
            (MoveKind::BoughtFromStore, CellZone::Store(owner)) => self.buy(coords, owner)?,
            (MoveKind::ReturnedToStore, CellZone::Store(owner)) => {
                self.return_to_store(coords, owner)?;
            }
            (kind, _) => return Err(MoveError::WrongZone { kind, coords }),
        }
        debug!(kind = %mv.kind, piece = %mv.piece.kind(), %coords, "move applied");
        Ok(())
    }

    /// Adds `delta` to a player's counter, bypassing all rules.
    pub fn apply_override(&mut self, correction: &Override) {
        let player = self.player_mut(correction.player);
        match correction.points_type {
            PointsType::Sun => player.adjust_sun_points(correction.delta),
            PointsType::Score => player.adjust_score(correction.delta),
        }
        info!(
            player = %correction.player,
            points_type = %correction.points_type,
            delta = correction.delta,
            "points overridden"
        );
    }

    /// Converts leftover sun points into score and ends the game.
    ///
    /// Calling it again has no effect.
    pub fn end_game(&mut self) {
        if self.phase.is_ended() {
            return;
        }
        self.autumn.convert_sun_points();
        self.winter.convert_sun_points();
        self.phase = GamePhase::Ended;
        info!(
            autumn_score = self.autumn.score(),
            winter_score = self.winter.score(),
            "game ended"
        );
    }

    fn place_sun(&mut self, coords: CellCoord) -> Result<(), MoveError> {
        let cell = self.cell_mut(coords)?;
        if cell.occupant.is_some() {
            return Err(MoveError::CellOccupied { coords });
        }
        cell.occupant = Some(Piece::SUN);

        let income = light_income(&self.board, coords.angle());
        for player in Player::ALL {
            self.player_mut(player).add_sun_points(income.get(player));
        }
        self.first_round = false;
        self.board.start_new_round();
        info!(
            sun = coords.angle(),
            autumn = income.autumn,
            winter = income.winter,
            "round scored"
        );
        Ok(())
    }

    fn remove_sun(&mut self, coords: CellCoord) -> Result<(), MoveError> {
        let cell = self.cell_mut(coords)?;
        cell.occupant
            .take()
            .map(|_| ())
            .ok_or(MoveError::CellEmpty { coords })
    }

    fn plant(&mut self, coords: CellCoord, piece: Piece) -> Result<(), MoveError> {
        let owner = piece.owner().ok_or(MoveError::MissingOwner { coords })?;
        let first_round = self.first_round;
        let cell = self.cell_mut(coords)?;
        if cell.occupant.is_some() {
            return Err(MoveError::CellOccupied { coords });
        }
        cell.occupant = Some(piece);
        let cost = if first_round {
            0
        } else {
            planting_cost(cell.last_removed_this_round)
        };
        self.player_mut(owner).debit_sun_points(cost);
        Ok(())
    }

    fn remove_tree(&mut self, coords: CellCoord, tier: RewardTier) -> Result<(), MoveError> {
        let cell = self.cell_mut(coords)?;
        let piece = cell.occupant.take().ok_or(MoveError::CellEmpty { coords })?;
        cell.last_removed_this_round = Some(piece);

        if piece.kind().is_large() {
            let reward = self.harvests.record(tier);
            if let Some(owner) = piece.owner() {
                let player = self.player_mut(owner);
                player.debit_sun_points(HARVEST_COST);
                player.add_score(reward);
            }
            info!(%coords, %tier, reward, "large tree harvested");
        }
        Ok(())
    }

    fn buy(&mut self, coords: CellCoord, owner: Player) -> Result<(), MoveError> {
        let cell = self.cell_mut(coords)?;
        let piece = cell.occupant.take().ok_or(MoveError::CellEmpty { coords })?;
        let player = self.player_mut(owner);
        let cost = player.store_mut().buy(piece.kind());
        player.debit_sun_points(cost);
        Ok(())
    }

    fn return_to_store(&mut self, coords: CellCoord, owner: Player) -> Result<(), MoveError> {
        let cell = self.cell_mut(coords)?;
        if cell.occupant.is_some() {
            return Err(MoveError::CellOccupied { coords });
        }
        let piece = coords
            .store_piece()
            .ok_or(MoveError::UnknownCell { coords })?;
        cell.occupant = Some(piece);
        self.player_mut(owner).store_mut().return_piece(piece.kind());
        Ok(())
    }

    fn cell_mut(&mut self, coords: CellCoord) -> Result<&mut CellState, MoveError> {
        self.board
            .cell_mut(coords)
            .ok_or(MoveError::UnknownCell { coords })
    }
}

/// Sun points a planting costs after the first round.
///
/// A fresh planting costs 1. Growing a tree where a smaller piece was lifted
/// earlier in the round costs by the size of the lifted piece.
fn planting_cost(last_removed: Option<Piece>) -> u32 {
    match last_removed.map(|piece| piece.kind()) {
        Some(PieceKind::Small) => 2,
        Some(PieceKind::Medium) => 3,
        Some(PieceKind::Seed | PieceKind::Large | PieceKind::Sun) | None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece(owner: Player, kind: PieceKind) -> Piece {
        Piece::new(owner, kind)
    }

    fn added(piece: Piece, level: u8, angle: u8) -> Move {
        Move::new(piece, MoveKind::Added, CellCoord::new(level, angle))
    }

    fn removed(piece: Piece, level: u8, angle: u8) -> Move {
        Move::new(piece, MoveKind::Removed, CellCoord::new(level, angle))
    }

    fn sun(angle: u8) -> Move {
        Move::new(Piece::SUN, MoveKind::Added, CellCoord::new(6, angle))
    }

    fn sun_points(game: &Game, player: Player) -> u32 {
        game.player(player).sun_points()
    }

    /// A game past its first round with both players holding `points` sun points.
    fn game_after_first_round(points: i32) -> Game {
        let mut game = Game::new();
        game.apply_move(&sun(0)).unwrap();
        game.apply_move(&Move::new(Piece::SUN, MoveKind::Removed, CellCoord::sun(0)))
            .unwrap();
        for player in Player::ALL {
            game.apply_override(&Override {
                player,
                points_type: PointsType::Sun,
                delta: points,
            });
        }
        game
    }

    #[test]
    fn test_first_round_planting_is_free() {
        let mut game = Game::new();
        game.apply_move(&added(piece(Player::Autumn, PieceKind::Small), 3, 4))
            .unwrap();
        assert_eq!(sun_points(&game, Player::Autumn), 0);
        assert!(game.is_first_round());
    }

    #[test]
    fn test_sun_ends_first_round_and_scores() {
        let mut game = Game::new();
        game.apply_move(&added(piece(Player::Winter, PieceKind::Medium), 0, 0))
            .unwrap();
        game.apply_move(&sun(0)).unwrap();
        assert!(!game.is_first_round());
        assert_eq!(sun_points(&game, Player::Winter), 2);
        assert_eq!(
            game.board().occupant(CellCoord::sun(0)),
            Some(Piece::SUN)
        );
    }

    #[test]
    fn test_planting_and_upgrade_costs() {
        let mut game = game_after_first_round(20);
        let owner = Player::Autumn;

        game.apply_move(&added(piece(owner, PieceKind::Seed), 2, 3)).unwrap();
        assert_eq!(sun_points(&game, owner), 19);

        // seed -> small costs 1
        game.apply_move(&removed(piece(owner, PieceKind::Seed), 2, 3)).unwrap();
        game.apply_move(&added(piece(owner, PieceKind::Small), 2, 3)).unwrap();
        assert_eq!(sun_points(&game, owner), 18);

        // small -> medium costs 2
        game.apply_move(&removed(piece(owner, PieceKind::Small), 2, 3)).unwrap();
        game.apply_move(&added(piece(owner, PieceKind::Medium), 2, 3)).unwrap();
        assert_eq!(sun_points(&game, owner), 16);

        // medium -> large costs 3
        game.apply_move(&removed(piece(owner, PieceKind::Medium), 2, 3)).unwrap();
        game.apply_move(&added(piece(owner, PieceKind::Large), 2, 3)).unwrap();
        assert_eq!(sun_points(&game, owner), 13);
    }

    #[test]
    fn test_new_round_forgets_removals() {
        let mut game = game_after_first_round(20);
        let owner = Player::Winter;
        game.apply_move(&added(piece(owner, PieceKind::Medium), 1, 1)).unwrap();
        game.apply_move(&removed(piece(owner, PieceKind::Medium), 1, 1)).unwrap();
        game.apply_move(&sun(1)).unwrap();
        let before = sun_points(&game, owner);
        game.apply_move(&added(piece(owner, PieceKind::Seed), 1, 1)).unwrap();
        assert_eq!(sun_points(&game, owner), before - 1);
    }

    #[test]
    fn test_harvest_rewards_and_cost() {
        let mut game = game_after_first_round(10);
        let owner = Player::Autumn;
        let large = piece(owner, PieceKind::Large);

        game.apply_move(&added(large, 0, 0)).unwrap();
        game.apply_move(&removed(large, 0, 0)).unwrap();
        assert_eq!(game.player(owner).score(), 19);
        assert_eq!(sun_points(&game, owner), 10 - 1 - 4);
        assert_eq!(game.harvests().next_reward(RewardTier::Center), 18);

        game.apply_move(&added(large, 3, 2)).unwrap();
        game.apply_move(&removed(large, 3, 2)).unwrap();
        assert_eq!(game.player(owner).score(), 19 + 14);
        assert_eq!(sun_points(&game, owner), 0);
    }

    #[test]
    fn test_reward_table_exhausts() {
        let mut counters = HarvestCounters::default();
        let rewards: Vec<_> = (0..12).map(|_| counters.record(RewardTier::Center)).collect();
        assert_eq!(rewards, [19, 18, 18, 17, 17, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(counters.next_reward(RewardTier::Center), 0);
    }

    #[test]
    fn test_store_purchases() {
        let mut game = game_after_first_round(10);
        let owner = Player::Winter;
        for angle in 0..4 {
            game.apply_move(&Move::new(
                piece(owner, PieceKind::Seed),
                MoveKind::BoughtFromStore,
                CellCoord::new(5, angle),
            ))
            .unwrap();
        }
        assert_eq!(sun_points(&game, owner), 10 - 5);
        assert_eq!(game.player(owner).store().count(PieceKind::Seed), 0);
        assert_eq!(game.board().occupant(CellCoord::new(5, 0)), None);

        game.apply_move(&Move::new(
            piece(owner, PieceKind::Seed),
            MoveKind::ReturnedToStore,
            CellCoord::new(5, 3),
        ))
        .unwrap();
        assert_eq!(game.player(owner).store().count(PieceKind::Seed), 1);
        assert_eq!(sun_points(&game, owner), 5);
        assert_eq!(
            game.board().occupant(CellCoord::new(5, 3)),
            Some(piece(owner, PieceKind::Seed))
        );
    }

    #[test]
    fn test_inconsistent_moves_are_rejected_without_effect() {
        let mut game = game_after_first_round(5);
        let seed = piece(Player::Autumn, PieceKind::Seed);

        assert!(matches!(
            game.apply_move(&removed(seed, 2, 2)),
            Err(MoveError::CellEmpty { .. })
        ));
        assert!(matches!(
            game.apply_move(&added(seed, 9, 0)),
            Err(MoveError::UnknownCell { .. })
        ));
        assert!(matches!(
            game.apply_move(&Move::new(seed, MoveKind::ReturnedToStore, CellCoord::new(4, 0))),
            Err(MoveError::CellOccupied { .. })
        ));
        assert!(matches!(
            game.apply_move(&Move::new(seed, MoveKind::BoughtFromStore, CellCoord::new(2, 0))),
            Err(MoveError::WrongZone { .. })
        ));
        assert!(matches!(
            game.apply_move(&added(Piece::SUN, 2, 0)),
            Err(MoveError::WrongZone { .. })
        ));

        game.apply_move(&Move::new(seed, MoveKind::BoughtFromStore, CellCoord::new(4, 0)))
            .unwrap();
        let points = sun_points(&game, Player::Autumn);
        assert!(matches!(
            game.apply_move(&Move::new(seed, MoveKind::BoughtFromStore, CellCoord::new(4, 0))),
            Err(MoveError::CellEmpty { .. })
        ));
        assert_eq!(sun_points(&game, Player::Autumn), points);
        assert_eq!(game.player(Player::Autumn).store().count(PieceKind::Seed), 3);
    }

    #[test]
    fn test_points_never_go_negative() {
        let mut game = game_after_first_round(0);
        let large = piece(Player::Winter, PieceKind::Large);
        game.apply_move(&added(large, 2, 5)).unwrap();
        game.apply_move(&removed(large, 2, 5)).unwrap();
        assert_eq!(sun_points(&game, Player::Winter), 0);
        assert_eq!(game.player(Player::Winter).score(), 17);
    }

    #[test]
    fn test_end_game() {
        let mut game = Game::new();
        game.apply_override(&Override {
            player: Player::Autumn,
            points_type: PointsType::Sun,
            delta: 10,
        });
        game.end_game();
        assert_eq!(game.player(Player::Autumn).score(), 3);
        assert_eq!(sun_points(&game, Player::Autumn), 0);
        assert!(game.phase().is_ended());

        assert!(matches!(
            game.apply_move(&sun(2)),
            Err(MoveError::GameEnded)
        ));
        game.end_game();
        assert_eq!(game.player(Player::Autumn).score(), 3);
    }
}

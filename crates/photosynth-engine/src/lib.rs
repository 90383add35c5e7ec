//! Board model and rule engine for a Photosynthesis game tracked on a sensing surface.
//!
//! - [`core`] - static cell topology, scoring lines and pieces
//! - [`engine`] - game state, move application, scoring and the command processor
//!
//! # Example
//!
//! ```
//! use photosynth_engine::{CellCoord, Command, GameProcessor, Move, MoveKind, Piece, PieceKind, Player};
//!
//! let mut processor = GameProcessor::new();
//! let tree = Piece::new(Player::Winter, PieceKind::Small);
//!
//! processor.handle(Command::Move(Move::new(tree, MoveKind::Added, CellCoord::new(0, 0))));
//! let update = processor.handle(Command::Move(Move::new(
//!     Piece::SUN,
//!     MoveKind::Added,
//!     CellCoord::sun(4),
//! )));
//!
//! assert_eq!(update.summary.winter_sun_points, 1);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Reason a move could not be applied to the current game state.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    #[display("no cell at {coords}")]
    UnknownCell { coords: CellCoord },
    #[display("cell {coords} is empty")]
    CellEmpty { coords: CellCoord },
    #[display("cell {coords} is already occupied")]
    CellOccupied { coords: CellCoord },
    #[display("{kind} move not allowed on cell {coords}")]
    WrongZone { kind: MoveKind, coords: CellCoord },
    #[display("piece placed on {coords} has no owner")]
    MissingOwner { coords: CellCoord },
    #[display("game has already ended")]
    GameEnded,
}

use serde::{Deserialize, Serialize};

/// One of the two seated players.
///
/// The autumn (yellow) player owns the store on ring 4, the winter (blue)
/// player owns the store on ring 5.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Player {
    #[display("autumn")]
    Autumn,
    #[display("winter")]
    Winter,
}

impl Player {
    pub const ALL: [Self; 2] = [Self::Autumn, Self::Winter];

    /// Parses a player from its lowercase name.
    ///
    /// # Examples
    ///
    /// ```
    /// use photosynth_engine::Player;
    ///
    /// assert_eq!(Player::from_name("winter"), Some(Player::Winter));
    /// assert_eq!(Player::from_name("spring"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "autumn" => Some(Self::Autumn),
            "winter" => Some(Self::Winter),
            _ => None,
        }
    }
}

/// Enum representing the type of piece.
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
#[repr(u8)]
pub enum PieceKind {
    /// Seed. Casts no shadow and collects no light.
    #[display("seed")]
    Seed = 0,
    /// Small tree (height 1).
    #[display("small")]
    Small = 1,
    /// Medium tree (height 2).
    #[display("medium")]
    Medium = 2,
    /// Large tree (height 3).
    #[display("large")]
    Large = 3,
    /// Sun marker placed on one of the six corners.
    #[display("sun")]
    Sun = 4,
}

impl PieceKind {
    /// Piece kinds a player can own, smallest first.
    pub const GROWABLE: [Self; 4] = [Self::Seed, Self::Small, Self::Medium, Self::Large];

    /// Returns the shadow height of the piece; 0 for pieces that take no part
    /// in light collection.
    ///
    /// # Examples
    ///
    /// ```
    /// use photosynth_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::Large.height(), 3);
    /// assert_eq!(PieceKind::Seed.height(), 0);
    /// ```
    #[must_use]
    pub const fn height(self) -> u8 {
        match self {
            Self::Small => 1,
            Self::Medium => 2,
            Self::Large => 3,
            Self::Seed | Self::Sun => 0,
        }
    }

    /// Returns the kind stored in a store slot at the given angle.
    ///
    /// Slots 0-3 hold seeds, 4-7 small trees, 8-10 medium trees and the rest
    /// large trees.
    #[must_use]
    pub const fn from_store_angle(angle: u8) -> Self {
        match angle {
            0..=3 => Self::Seed,
            4..=7 => Self::Small,
            8..=10 => Self::Medium,
            _ => Self::Large,
        }
    }

    /// Parses a piece kind from its lowercase name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "seed" => Some(Self::Seed),
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            "sun" => Some(Self::Sun),
            _ => None,
        }
    }
}

/// A physical piece: what it is and who owns it.
///
/// Sun markers have no owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Piece {
    owner: Option<Player>,
    kind: PieceKind,
}

impl Piece {
    pub const SUN: Self = Self {
        owner: None,
        kind: PieceKind::Sun,
    };

    #[must_use]
    pub const fn new(owner: Player, kind: PieceKind) -> Self {
        Self {
            owner: Some(owner),
            kind,
        }
    }

    #[must_use]
    pub const fn owner(&self) -> Option<Player> {
        self.owner
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }
}

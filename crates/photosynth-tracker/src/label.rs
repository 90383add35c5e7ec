use std::{fmt, str::FromStr};

use photosynth_engine::{BOARD_CELL_COUNT, Piece, PieceKind, Player, SUN_CELL_COUNT};
use serde::{Deserialize, Serialize};

/// Classifier output for one cell.
pub type Label = u8;

/// Sun-cell label meaning no sun marker is present.
pub const SUN_ABSENT: Label = 0;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseClassError {
    #[display("malformed piece class `{class}`, expected `<player> + <kind>`")]
    Malformed { class: String },
    #[display("unknown player `{name}`")]
    UnknownPlayer { name: String },
    #[display("`{name}` is not a plantable piece kind")]
    UnknownKind { name: String },
    #[display("the class table is empty")]
    Empty,
    #[display("{count} classes do not fit in a label")]
    TooMany { count: usize },
}

/// Piece represented by a single classifier class, written `"<player> + <kind>"`.
///
/// # Example
///
/// ```
/// use photosynth_engine::{PieceKind, Player};
/// use photosynth_tracker::PieceClass;
///
/// let class: PieceClass = "winter + medium".parse()?;
/// assert_eq!(class.piece().owner(), Some(Player::Winter));
/// assert_eq!(class.piece().kind(), PieceKind::Medium);
/// assert_eq!(class.to_string(), "winter + medium");
/// # Ok::<(), photosynth_tracker::ParseClassError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceClass(Piece);

impl PieceClass {
    #[must_use]
    pub const fn new(owner: Player, kind: PieceKind) -> Self {
        Self(Piece::new(owner, kind))
    }

    #[must_use]
    pub const fn piece(self) -> Piece {
        self.0
    }
}

impl fmt::Display for PieceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.owner() {
            Some(owner) => write!(f, "{owner} + {}", self.0.kind()),
            None => write!(f, "{}", self.0.kind()),
        }
    }
}

impl FromStr for PieceClass {
    type Err = ParseClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (player, kind) = s.split_once('+').ok_or_else(|| ParseClassError::Malformed {
            class: s.to_owned(),
        })?;
        let (player, kind) = (player.trim(), kind.trim());
        let owner = Player::from_name(player).ok_or_else(|| ParseClassError::UnknownPlayer {
            name: player.to_owned(),
        })?;
        let kind = PieceKind::from_name(kind)
            .filter(|kind| !kind.is_sun())
            .ok_or_else(|| ParseClassError::UnknownKind {
                name: kind.to_owned(),
            })?;
        Ok(Self::new(owner, kind))
    }
}

/// Class table of the piece classifier.
///
/// Label `i` names the `i`-th class; the label right after the last class is
/// the empty cell. Serialized as the list of class names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct PieceClasses {
    classes: Vec<PieceClass>,
}

impl Default for PieceClasses {
    fn default() -> Self {
        let classes = Player::ALL
            .into_iter()
            .flat_map(|owner| {
                PieceKind::GROWABLE
                    .into_iter()
                    .map(move |kind| PieceClass::new(owner, kind))
            })
            .collect();
        Self { classes }
    }
}

impl PieceClasses {
    pub fn new(classes: Vec<PieceClass>) -> Result<Self, ParseClassError> {
        if classes.is_empty() {
            return Err(ParseClassError::Empty);
        }
        if classes.len() > usize::from(Label::MAX) {
            return Err(ParseClassError::TooMany {
                count: classes.len(),
            });
        }
        Ok(Self { classes })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Returns the label the classifier reports for an empty board cell.
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn empty_label(&self) -> Label {
        self.classes.len() as Label
    }

    /// Returns the piece a label stands for; `None` for the empty label and
    /// labels outside the table.
    #[must_use]
    pub fn piece(&self, label: Label) -> Option<Piece> {
        self.classes
            .get(usize::from(label))
            .map(|class| class.piece())
    }
}

impl TryFrom<Vec<String>> for PieceClasses {
    type Error = ParseClassError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        let classes = names
            .iter()
            .map(|name| name.parse())
            .collect::<Result<_, _>>()?;
        Self::new(classes)
    }
}

impl From<PieceClasses> for Vec<String> {
    fn from(classes: PieceClasses) -> Self {
        classes.classes.iter().map(ToString::to_string).collect()
    }
}

/// Per-cell labels for one frame, in canonical cell order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSnapshot {
    pub board: [Label; BOARD_CELL_COUNT],
    pub sun: [Label; SUN_CELL_COUNT],
}

impl LabelSnapshot {
    /// Creates a snapshot with every board cell empty and no sun marker.
    #[must_use]
    pub const fn empty(empty_label: Label) -> Self {
        Self {
            board: [empty_label; BOARD_CELL_COUNT],
            sun: [SUN_ABSENT; SUN_CELL_COUNT],
        }
    }
}

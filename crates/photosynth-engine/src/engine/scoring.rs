use arrayvec::ArrayVec;

use crate::core::{Line, Player, lines_for_sun};

use super::board_state::BoardState;

/// Harvest rewards for large trees cut in the center (rings 0 and 1).
pub const REWARDS_CENTER: [u32; 9] = [19, 18, 18, 17, 17, 0, 0, 0, 0];
/// Harvest rewards for large trees cut on ring 2.
pub const REWARDS_FERTILE: [u32; 10] = [17, 16, 14, 14, 13, 13, 0, 0, 0, 0];
/// Harvest rewards for large trees cut on the outer ring.
pub const REWARDS_EDGE: [u32; 13] = [14, 14, 13, 13, 13, 12, 12, 12, 12, 0, 0, 0, 0];

/// Longest scoring line on the board.
const MAX_LINE_LEN: usize = 7;

/// Sun points collected by each player at the end of a round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LightIncome {
    pub autumn: u32,
    pub winter: u32,
}

impl LightIncome {
    #[must_use]
    pub const fn get(&self, player: Player) -> u32 {
        match player {
            Player::Autumn => self.autumn,
            Player::Winter => self.winter,
        }
    }

    fn add(&mut self, player: Player, points: u32) {
        match player {
            Player::Autumn => self.autumn += points,
            Player::Winter => self.winter += points,
        }
    }
}

/// Shadow cast forward along a line.
#[derive(Debug, Clone, Copy)]
struct Shadow {
    /// Last line position (inclusive) the shadow reaches.
    ends_at: usize,
    height: u8,
}

/// Computes the sun points each player collects with the sun on corner `sun_angle`.
///
/// A tree of height `h` at position `i` of a line collects `h` points unless
/// an earlier tree's shadow reaches `i` and is at least as tall. Every tree
/// casts a shadow over the next `h` positions whether it collected or not.
/// Seeds neither collect nor cast shadows. Each line is evaluated on its own.
///
/// Returns all zeros for an unknown corner.
#[must_use]
pub fn light_income(board: &BoardState, sun_angle: u8) -> LightIncome {
    let mut income = LightIncome::default();
    let Some(lines) = lines_for_sun(sun_angle) else {
        return income;
    };
    for line in lines {
        line_income(board, line, &mut income);
    }
    income
}

fn line_income(board: &BoardState, line: Line, income: &mut LightIncome) {
    let mut shadows = ArrayVec::<Shadow, MAX_LINE_LEN>::new();
    for (i, &coords) in line.iter().enumerate() {
        let Some(piece) = board.occupant(coords) else {
            continue;
        };
        let height = piece.kind().height();
        if height == 0 {
            continue;
        }
        let shaded = shadows
            .iter()
            .any(|shadow| shadow.ends_at >= i && shadow.height >= height);
        match piece.owner() {
            Some(owner) if !shaded => income.add(owner, u32::from(height)),
            _ => {}
        }
        shadows.push(Shadow {
            ends_at: i + usize::from(height),
            height,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CellCoord, Piece, PieceKind, SUN_LINES};

    fn place(board: &mut BoardState, coords: CellCoord, piece: Piece) {
        board.cell_mut(coords).unwrap().occupant = Some(piece);
    }

    // Longest line for the sun on corner 0.
    const LINE: Line = SUN_LINES[0][3];

    #[test]
    fn test_lone_large_tree_collects_three() {
        let mut board = BoardState::empty();
        place(
            &mut board,
            LINE[2],
            Piece::new(Player::Winter, PieceKind::Large),
        );
        let income = light_income(&board, 0);
        assert_eq!(income, LightIncome { autumn: 0, winter: 3 });
    }

    #[test]
    fn test_tall_tree_shades_trees_behind() {
        let mut board = BoardState::empty();
        place(
            &mut board,
            LINE[0],
            Piece::new(Player::Autumn, PieceKind::Small),
        );
        place(
            &mut board,
            LINE[1],
            Piece::new(Player::Autumn, PieceKind::Large),
        );
        place(
            &mut board,
            LINE[2],
            Piece::new(Player::Winter, PieceKind::Large),
        );
        place(
            &mut board,
            LINE[3],
            Piece::new(Player::Winter, PieceKind::Medium),
        );
        let income = light_income(&board, 0);
        // small collects 1, the large behind it is taller and collects 3,
        // everything in the large tree's shadow collects nothing
        assert_eq!(income, LightIncome { autumn: 4, winter: 0 });
    }

    #[test]
    fn test_equal_height_is_shaded() {
        let mut board = BoardState::empty();
        place(
            &mut board,
            LINE[0],
            Piece::new(Player::Autumn, PieceKind::Medium),
        );
        place(
            &mut board,
            LINE[2],
            Piece::new(Player::Winter, PieceKind::Medium),
        );
        place(
            &mut board,
            LINE[3],
            Piece::new(Player::Winter, PieceKind::Medium),
        );
        let income = light_income(&board, 0);
        // position 2 is shaded by position 0; position 3 by position 2
        assert_eq!(income, LightIncome { autumn: 2, winter: 0 });
    }

    #[test]
    fn test_shadow_ends() {
        let mut board = BoardState::empty();
        place(
            &mut board,
            LINE[0],
            Piece::new(Player::Autumn, PieceKind::Small),
        );
        place(
            &mut board,
            LINE[2],
            Piece::new(Player::Winter, PieceKind::Small),
        );
        place(&mut board, LINE[4], Piece::new(Player::Winter, PieceKind::Seed));
        let income = light_income(&board, 0);
        assert_eq!(income, LightIncome { autumn: 1, winter: 1 });
    }

    #[test]
    fn test_shadow_crosses_center_line() {
        let mut board = BoardState::empty();
        place(
            &mut board,
            CellCoord::new(2, 6),
            Piece::new(Player::Autumn, PieceKind::Large),
        );
        place(
            &mut board,
            CellCoord::new(3, 9),
            Piece::new(Player::Winter, PieceKind::Small),
        );
        assert_eq!(light_income(&board, 0), LightIncome { autumn: 3, winter: 0 });
        // from the opposite corner the small tree stands first and both collect
        assert_eq!(light_income(&board, 3), LightIncome { autumn: 3, winter: 1 });
    }

    #[test]
    fn test_tree_scores_once_per_sun_position() {
        let mut board = BoardState::empty();
        place(
            &mut board,
            CellCoord::new(0, 0),
            Piece::new(Player::Autumn, PieceKind::Small),
        );
        for angle in 0..6 {
            assert_eq!(light_income(&board, angle).autumn, 1);
        }
        assert_eq!(light_income(&board, 6), LightIncome::default());
    }
}

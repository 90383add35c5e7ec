use super::cell::CellCoord;

/// Number of scoring lines for each sun position.
pub const LINES_PER_SUN: usize = 7;

/// A scoring line: regular cells ordered from the sun towards the far edge.
pub type Line = &'static [CellCoord];

const fn c(level: u8, angle: u8) -> CellCoord {
    CellCoord::new(level, angle)
}

/// Scoring lines indexed by the angle of the sun corner.
///
/// For every sun position the seven lines partition the 37 regular cells.
/// Shadows are cast along a line from lower to higher indices. The sun on
/// the opposite corner sees the same lines reversed, in reverse order.
pub const SUN_LINES: [[Line; LINES_PER_SUN]; 6] = [
    // Sun at corner 0
    [
        &[c(3, 15), c(3, 14), c(3, 13), c(3, 12)],
        &[c(3, 16), c(2, 10), c(2, 9), c(2, 8), c(3, 11)],
        &[c(3, 17), c(2, 11), c(1, 5), c(1, 4), c(2, 7), c(3, 10)],
        &[c(3, 0), c(2, 0), c(1, 0), c(0, 0), c(1, 3), c(2, 6), c(3, 9)],
        &[c(3, 1), c(2, 1), c(1, 1), c(1, 2), c(2, 5), c(3, 8)],
        &[c(3, 2), c(2, 2), c(2, 3), c(2, 4), c(3, 7)],
        &[c(3, 3), c(3, 4), c(3, 5), c(3, 6)],
    ],
    // Sun at corner 1
    [
        &[c(3, 0), c(3, 17), c(3, 16), c(3, 15)],
        &[c(3, 1), c(2, 0), c(2, 11), c(2, 10), c(3, 14)],
        &[c(3, 2), c(2, 1), c(1, 0), c(1, 5), c(2, 9), c(3, 13)],
        &[c(3, 3), c(2, 2), c(1, 1), c(0, 0), c(1, 4), c(2, 8), c(3, 12)],
        &[c(3, 4), c(2, 3), c(1, 2), c(1, 3), c(2, 7), c(3, 11)],
        &[c(3, 5), c(2, 4), c(2, 5), c(2, 6), c(3, 10)],
        &[c(3, 6), c(3, 7), c(3, 8), c(3, 9)],
    ],
    // Sun at corner 2
    [
        &[c(3, 3), c(3, 2), c(3, 1), c(3, 0)],
        &[c(3, 4), c(2, 2), c(2, 1), c(2, 0), c(3, 17)],
        &[c(3, 5), c(2, 3), c(1, 1), c(1, 0), c(2, 11), c(3, 16)],
        &[c(3, 6), c(2, 4), c(1, 2), c(0, 0), c(1, 5), c(2, 10), c(3, 15)],
        &[c(3, 7), c(2, 5), c(1, 3), c(1, 4), c(2, 9), c(3, 14)],
        &[c(3, 8), c(2, 6), c(2, 7), c(2, 8), c(3, 13)],
        &[c(3, 9), c(3, 10), c(3, 11), c(3, 12)],
    ],
    // Sun at corner 3
    [
        &[c(3, 6), c(3, 5), c(3, 4), c(3, 3)],
        &[c(3, 7), c(2, 4), c(2, 3), c(2, 2), c(3, 2)],
        &[c(3, 8), c(2, 5), c(1, 2), c(1, 1), c(2, 1), c(3, 1)],
        &[c(3, 9), c(2, 6), c(1, 3), c(0, 0), c(1, 0), c(2, 0), c(3, 0)],
        &[c(3, 10), c(2, 7), c(1, 4), c(1, 5), c(2, 11), c(3, 17)],
        &[c(3, 11), c(2, 8), c(2, 9), c(2, 10), c(3, 16)],
        &[c(3, 12), c(3, 13), c(3, 14), c(3, 15)],
    ],
    // Sun at corner 4
    [
        &[c(3, 9), c(3, 8), c(3, 7), c(3, 6)],
        &[c(3, 10), c(2, 6), c(2, 5), c(2, 4), c(3, 5)],
        &[c(3, 11), c(2, 7), c(1, 3), c(1, 2), c(2, 3), c(3, 4)],
        &[c(3, 12), c(2, 8), c(1, 4), c(0, 0), c(1, 1), c(2, 2), c(3, 3)],
        &[c(3, 13), c(2, 9), c(1, 5), c(1, 0), c(2, 1), c(3, 2)],
        &[c(3, 14), c(2, 10), c(2, 11), c(2, 0), c(3, 1)],
        &[c(3, 15), c(3, 16), c(3, 17), c(3, 0)],
    ],
    // Sun at corner 5
    [
        &[c(3, 12), c(3, 11), c(3, 10), c(3, 9)],
        &[c(3, 13), c(2, 8), c(2, 7), c(2, 6), c(3, 8)],
        &[c(3, 14), c(2, 9), c(1, 4), c(1, 3), c(2, 5), c(3, 7)],
        &[c(3, 15), c(2, 10), c(1, 5), c(0, 0), c(1, 2), c(2, 4), c(3, 6)],
        &[c(3, 16), c(2, 11), c(1, 0), c(1, 1), c(2, 3), c(3, 5)],
        &[c(3, 17), c(2, 0), c(2, 1), c(2, 2), c(3, 4)],
        &[c(3, 0), c(3, 1), c(3, 2), c(3, 3)],
    ],
];

/// Returns the scoring lines for the sun standing on corner `angle`.
///
/// # Examples
///
/// ```
/// use photosynth_engine::lines_for_sun;
///
/// assert_eq!(lines_for_sun(3).map(|lines| lines.len()), Some(7));
/// assert!(lines_for_sun(6).is_none());
/// ```
#[must_use]
pub fn lines_for_sun(angle: u8) -> Option<&'static [Line; LINES_PER_SUN]> {
    SUN_LINES.get(usize::from(angle))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::core::cell::{ALL_CELLS, CellZone, REGULAR_CELL_COUNT};

    #[test]
    fn test_lines_partition_regular_cells() {
        let regular: HashSet<_> = ALL_CELLS
            .iter()
            .copied()
            .filter(|c| c.zone().is_some_and(|z| z.is_regular()))
            .collect();
        assert_eq!(regular.len(), REGULAR_CELL_COUNT);

        for (angle, lines) in SUN_LINES.iter().enumerate() {
            let covered: Vec<_> = lines.iter().flat_map(|line| line.iter().copied()).collect();
            let unique: HashSet<_> = covered.iter().copied().collect();
            assert_eq!(covered.len(), REGULAR_CELL_COUNT, "sun {angle}");
            assert_eq!(unique, regular, "sun {angle}");
        }
    }

    #[test]
    fn test_line_lengths() {
        for lines in &SUN_LINES {
            let lengths: Vec<_> = lines.iter().map(|line| line.len()).collect();
            assert_eq!(lengths, [4, 5, 6, 7, 6, 5, 4]);
        }
    }

    #[test]
    fn test_opposite_corner_reverses_lines() {
        for angle in 0..6 {
            let opposite = (angle + 3) % 6;
            for k in 0..LINES_PER_SUN {
                let reversed: Vec<_> = SUN_LINES[angle][k].iter().rev().copied().collect();
                assert_eq!(
                    reversed,
                    SUN_LINES[opposite][LINES_PER_SUN - 1 - k],
                    "sun {angle} line {k}"
                );
            }
        }
    }

    #[test]
    fn test_lines_start_on_edge() {
        for lines in &SUN_LINES {
            for line in lines {
                assert_eq!(
                    line[0].zone(),
                    Some(CellZone::Regular(crate::RewardTier::Edge))
                );
            }
        }
    }
}

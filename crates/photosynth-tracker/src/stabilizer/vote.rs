use arrayvec::ArrayVec;

use crate::{config::MAX_VOTE_WIDTH, label::Label};

/// Majority-vote debounce for one cell.
///
/// While the incoming label matches the stabilized one nothing happens. A
/// different label opens a window; once it holds `width` votes the unique
/// most frequent label becomes the stabilized one, a tie changes nothing, and
/// the window closes.
///
/// # Example
///
/// ```
/// use photosynth_tracker::VoteWindow;
///
/// let mut window = VoteWindow::new(8, 3);
/// assert_eq!(window.push(2), 8);
/// assert_eq!(window.push(2), 8);
/// assert_eq!(window.push(5), 2);
/// ```
#[derive(Debug, Clone)]
pub struct VoteWindow {
    stabilized: Label,
    width: usize,
    votes: ArrayVec<Label, MAX_VOTE_WIDTH>,
}

impl VoteWindow {
    /// Creates an idle window. `width` is clamped to `1..=MAX_VOTE_WIDTH`.
    #[must_use]
    pub fn new(initial: Label, width: usize) -> Self {
        Self {
            stabilized: initial,
            width: width.clamp(1, MAX_VOTE_WIDTH),
            votes: ArrayVec::new(),
        }
    }

    #[must_use]
    pub fn stabilized(&self) -> Label {
        self.stabilized
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.votes.is_empty()
    }

    /// Feeds one label and returns the stabilized label.
    pub fn push(&mut self, label: Label) -> Label {
        if !self.is_active() && label == self.stabilized {
            return self.stabilized;
        }
        self.votes.push(label);
        if self.votes.len() == self.width {
            if let Some(winner) = unique_plurality(&self.votes) {
                self.stabilized = winner;
            }
            self.votes.clear();
        }
        self.stabilized
    }
}

fn unique_plurality(votes: &[Label]) -> Option<Label> {
    let mut best = None;
    let mut best_count = 0;
    let mut tied = false;
    for (i, &label) in votes.iter().enumerate() {
        if votes[..i].contains(&label) {
            continue;
        }
        let count = votes[i..].iter().filter(|&&v| v == label).count();
        if count > best_count {
            best = Some(label);
            best_count = count;
            tied = false;
        } else if count == best_count {
            tied = true;
        }
    }
    if tied { None } else { best }
}

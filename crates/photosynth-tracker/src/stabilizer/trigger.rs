use crate::{frame::Crop, label::Label};

/// Motion gate for one cell.
///
/// The output only follows the stabilized label at the commit point: the
/// frame on which a countdown armed by hand motion reaches 1. Between commit
/// points, including while the countdown is idle at 0, the last committed
/// label is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerGate {
    countdown: u8,
    committed: Label,
}

impl TriggerGate {
    #[must_use]
    pub const fn new(initial: Label) -> Self {
        Self {
            countdown: 0,
            committed: initial,
        }
    }

    #[must_use]
    pub const fn countdown(&self) -> u8 {
        self.countdown
    }

    /// Advances the countdown by one frame and returns the gated label.
    pub fn step(&mut self, stabilized: Label) -> Label {
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown == 1 {
            self.committed = stabilized;
        }
        self.committed
    }

    /// Restarts the countdown, also when it is already running.
    pub fn arm(&mut self, hold_frames: u8) {
        self.countdown = hold_frames;
    }
}

/// Mean absolute pixel change of a delta crop, normalized by `height + width`.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn activity(delta: &Crop) -> f32 {
    let extent = delta.height + delta.width;
    if extent == 0 {
        return 0.0;
    }
    delta.pixels.iter().map(|p| p.abs()).sum::<f32>() / extent as f32
}

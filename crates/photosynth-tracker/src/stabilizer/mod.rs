//! Per-cell filtering of classifier labels.
//!
//! Every frame goes through three stages per cell:
//!
//! 1. [`passes_quality`] - a label whose crop lacks contrast is replaced by
//!    the neutral label (empty for board cells, absent for sun cells)
//! 2. [`VoteWindow`] - majority-vote debounce of board and store cells
//! 3. [`TriggerGate`] - board and store cells only take a new label a few
//!    frames after a hand has moved over them
//!
//! Sun cells skip stages 2 and 3. Motion over them still counts toward the
//! disturbance limit.

use photosynth_engine::BOARD_CELL_COUNT;
use tracing::{debug, warn};

use crate::{
    config::PipelineConfig,
    frame::{Frame, FrameShapeError},
    label::{Label, LabelSnapshot, SUN_ABSENT},
};

pub use self::{quality::*, trigger::*, vote::*};

mod quality;
mod trigger;
mod vote;

/// Debounce and motion gate state of one board or store cell.
#[derive(Debug, Clone)]
struct CellFilter {
    vote: VoteWindow,
    gate: TriggerGate,
}

/// Turns a stream of noisy frames into gated label snapshots.
///
/// The first `vote.warmup_frames` frames only fill the vote windows and
/// produce no snapshot. The frame after that seeds every motion gate with
/// the stabilized label of its cell.
///
/// # Example
///
/// ```
/// use photosynth_tracker::{Crop, Frame, PipelineConfig, SignalStabilizer};
///
/// let mut config = PipelineConfig::default();
/// config.vote.warmup_frames = 1;
/// let empty = config.classes.empty_label();
/// let mut stabilizer = SignalStabilizer::new(&config);
///
/// let frame = Frame {
///     sequence: None,
///     board_labels: vec![2; 63],
///     sun_labels: vec![0; 6],
///     crops: vec![Crop::default(); 69],
///     deltas: vec![Crop::default(); 69],
/// };
/// assert_eq!(stabilizer.process(&frame)?, None);
///
/// // blank crops fail the quality gate, so every cell reads empty
/// let snapshot = stabilizer.process(&frame)?.unwrap();
/// assert!(snapshot.board.iter().all(|&label| label == empty));
/// # Ok::<(), photosynth_tracker::FrameShapeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SignalStabilizer {
    config: PipelineConfig,
    cells: Vec<CellFilter>,
    warmup_left: usize,
    seeded: bool,
    last_sequence: Option<u64>,
}

impl SignalStabilizer {
    #[must_use]
    pub fn new(config: &PipelineConfig) -> Self {
        let empty = config.classes.empty_label();
        let cell = CellFilter {
            vote: VoteWindow::new(empty, config.vote.width),
            gate: TriggerGate::new(empty),
        };
        Self {
            config: config.clone(),
            cells: vec![cell; BOARD_CELL_COUNT],
            warmup_left: config.vote.warmup_frames,
            seeded: false,
            last_sequence: None,
        }
    }

    /// Advances every cell by one frame and returns the gated labels, or
    /// `None` while warming up.
    ///
    /// A malformed frame is rejected before any cell state changes.
    pub fn process(&mut self, frame: &Frame) -> Result<Option<LabelSnapshot>, FrameShapeError> {
        frame.validate()?;
        self.check_sequence(frame.sequence);

        let empty = self.config.classes.empty_label();
        if self.warmup_left > 0 {
            self.warmup_left -= 1;
            for (i, cell) in self.cells.iter_mut().enumerate() {
                cell.vote
                    .push(quality_gated(frame, i, frame.board_labels[i], empty, &self.config));
            }
            return Ok(None);
        }

        let mut snapshot = LabelSnapshot::empty(empty);
        let mut triggered = Vec::new();
        for (i, cell) in self.cells.iter_mut().enumerate() {
            let raw = quality_gated(frame, i, frame.board_labels[i], empty, &self.config);
            let stabilized = cell.vote.push(raw);
            if !self.seeded {
                cell.gate = TriggerGate::new(stabilized);
            }
            snapshot.board[i] = cell.gate.step(stabilized);
            if activity(&frame.deltas[i]) > self.config.trigger.activity_threshold {
                triggered.push(i);
            }
        }
        self.seeded = true;

        for (j, (out, &raw)) in snapshot.sun.iter_mut().zip(&frame.sun_labels).enumerate() {
            *out = quality_gated(frame, BOARD_CELL_COUNT + j, raw, SUN_ABSENT, &self.config);
        }

        // motion over a sun corner counts as a touch but arms nothing
        let sun_touches = frame.deltas[BOARD_CELL_COUNT..]
            .iter()
            .filter(|delta| activity(delta) > self.config.trigger.activity_threshold)
            .count();
        let touches = triggered.len() + sun_touches;
        if touches > self.config.trigger.max_triggered {
            debug!(cells = touches, "disturbance, no cell armed");
        } else {
            for &i in &triggered {
                self.cells[i].gate.arm(self.config.trigger.hold_frames);
            }
        }
        Ok(Some(snapshot))
    }

    fn check_sequence(&mut self, sequence: Option<u64>) {
        let Some(sequence) = sequence else {
            return;
        };
        if let Some(last) = self.last_sequence {
            let expected = last.wrapping_add(1);
            if sequence != expected {
                warn!(expected, received = sequence, "frame sequence gap");
            }
        }
        self.last_sequence = Some(sequence);
    }
}

fn quality_gated(
    frame: &Frame,
    cell: usize,
    label: Label,
    neutral: Label,
    config: &PipelineConfig,
) -> Label {
    if passes_quality(&frame.crops[cell], &config.quality) {
        label
    } else {
        neutral
    }
}

use std::{fmt, path::PathBuf, str::FromStr};

use photosynth_engine::{BOARD_CELL_COUNT, CELL_COUNT, CellCoord, SUN_CELL_COUNT};
use photosynth_tracker::{Crop, Frame, Label};
use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_distr::Normal;
use rand_pcg::Pcg32;
use tracing::info;

use crate::util::{self, Output};

/// Side length of the generated square crops.
const CROP_SIZE: usize = 4;
/// Frames between the starts of two consecutive events.
const EVENT_PERIOD: u64 = 10;
/// Frames of hand motion over the event's cell, counted from the event start.
const HAND_FRAMES: u64 = 3;
/// Frame (relative to the event start) on which the piece actually changes.
const CHANGE_FRAME: u64 = 1;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Number of frames to generate
    #[arg(long, default_value_t = 600)]
    frames: u64,
    /// Seed as 32 hex digits [default: random]
    #[arg(long)]
    seed: Option<SimSeed>,
    /// Probability that a board cell reads a wrong label or a blank crop in a frame
    #[arg(long, default_value_t = 0.02)]
    noise: f64,
    /// Pipeline config (TOML) providing the class table
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output file path [default: stdout]
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Seed of the frame generator, written as 32 hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SimSeed([u8; 16]);

#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("invalid seed `{input}`: expected 32 hex digits")]
pub(crate) struct ParseSeedError {
    input: String,
}

impl fmt::Display for SimSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for SimSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Distribution<SimSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SimSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        SimSeed(seed)
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        frames,
        seed,
        noise,
        config,
        output,
    } = arg;
    anyhow::ensure!(
        (0.0..=1.0).contains(noise),
        "--noise must be between 0 and 1, got {noise}"
    );
    let config = util::load_config(config.as_deref())?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    info!(%seed, frames, "generating frames");

    let mut simulator = Simulator::new(seed, config.classes.empty_label(), *noise)?;
    let mut output = Output::from_output_path(output.as_deref())?;
    for sequence in 0..*frames {
        output.write_json_line(&simulator.next_frame(sequence))?;
    }
    Ok(())
}

/// A change the simulated players make to the physical board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    /// Put a piece on an empty board cell or back into a store slot.
    Place { cell: usize, label: Label },
    /// Take the piece off a board cell or out of a store slot.
    Clear { cell: usize },
    MoveSun { to: usize },
}

impl Event {
    fn cell(self) -> Option<usize> {
        match self {
            Event::Place { cell, .. } | Event::Clear { cell } => Some(cell),
            Event::MoveSun { .. } => None,
        }
    }
}

/// Generates frames of a game in which one piece changes every few frames.
///
/// Nothing happens during the first period so the tracker can warm up.
/// Intensity crops always pass the quality gate unless noise blanks them.
#[derive(Debug)]
struct Simulator {
    rng: Pcg32,
    empty: Label,
    noise: f64,
    board: [Label; BOARD_CELL_COUNT],
    sun: Option<usize>,
    event: Option<Event>,
    intensity: Normal<f32>,
    still: Normal<f32>,
    motion: Normal<f32>,
}

impl Simulator {
    fn new(seed: SimSeed, empty: Label, noise: f64) -> anyhow::Result<Self> {
        let mut board = [empty; BOARD_CELL_COUNT];
        for (i, label) in board.iter_mut().enumerate() {
            if is_store(i) {
                *label = 0;
            }
        }
        Ok(Self {
            rng: Pcg32::from_seed(seed.0),
            empty,
            noise,
            board,
            sun: None,
            event: None,
            intensity: Normal::new(0.0, 20.0)?,
            still: Normal::new(0.0, 0.5)?,
            motion: Normal::new(0.0, 30.0)?,
        })
    }

    fn next_frame(&mut self, sequence: u64) -> Frame {
        let phase = sequence % EVENT_PERIOD;
        if phase == 0 {
            self.event = if sequence == 0 {
                None
            } else {
                Some(self.pick_event())
            };
        }
        if let (CHANGE_FRAME, Some(event)) = (phase, self.event) {
            self.apply(event);
        }
        let hand = if phase < HAND_FRAMES {
            self.event.and_then(Event::cell)
        } else {
            None
        };

        let mut board_labels = self.board.to_vec();
        let mut crops: Vec<_> = (0..CELL_COUNT).map(|_| self.intensity_crop()).collect();
        for (label, crop) in board_labels.iter_mut().zip(&mut crops) {
            if self.rng.random_bool(self.noise) {
                *label = self.rng.random_range(0..=self.empty);
            }
            if self.rng.random_bool(self.noise) {
                *crop = Crop::filled(CROP_SIZE, CROP_SIZE, 0.0);
            }
        }
        let sun_labels = (0..SUN_CELL_COUNT)
            .map(|i| Label::from(self.sun == Some(i)))
            .collect();
        let deltas = (0..CELL_COUNT)
            .map(|i| {
                let dist = if hand == Some(i) {
                    self.motion
                } else {
                    self.still
                };
                self.delta_crop(dist)
            })
            .collect();

        Frame {
            sequence: Some(sequence),
            board_labels,
            sun_labels,
            crops,
            deltas,
        }
    }

    /// A crop with every pixel above the quality threshold, half of them negative.
    fn intensity_crop(&mut self) -> Crop {
        let pixels = (0..CROP_SIZE * CROP_SIZE)
            .map(|i| {
                let magnitude = 10.0 + self.rng.sample(self.intensity).abs();
                if i % 2 == 0 { -magnitude } else { magnitude }
            })
            .collect();
        Crop::new(CROP_SIZE, CROP_SIZE, pixels)
    }

    fn delta_crop(&mut self, dist: Normal<f32>) -> Crop {
        let pixels = (0..CROP_SIZE * CROP_SIZE)
            .map(|_| self.rng.sample(dist))
            .collect();
        Crop::new(CROP_SIZE, CROP_SIZE, pixels)
    }

    fn pick_event(&mut self) -> Event {
        let next_sun = self.sun.map_or(0, |i| (i + 1) % SUN_CELL_COUNT);
        let empty = self.empty;
        let roll: u8 = self.rng.random_range(0..10);
        let (want_store, want_empty) = match roll {
            0..4 => (false, true),
            4..6 => (false, false),
            6 => (true, false),
            7 => (true, true),
            _ => return Event::MoveSun { to: next_sun },
        };
        let candidates: Vec<_> = (0..BOARD_CELL_COUNT)
            .filter(|&i| is_store(i) == want_store && (self.board[i] == empty) == want_empty)
            .collect();
        if candidates.is_empty() {
            return Event::MoveSun { to: next_sun };
        }
        let cell = candidates[self.rng.random_range(0..candidates.len())];
        if !want_empty {
            return Event::Clear { cell };
        }
        // the slot, not the label, decides which piece a store cell holds
        let label = if want_store {
            0
        } else {
            self.rng.random_range(0..empty)
        };
        Event::Place { cell, label }
    }

    fn apply(&mut self, event: Event) {
        match event {
            Event::Place { cell, label } => self.board[cell] = label,
            Event::Clear { cell } => self.board[cell] = self.empty,
            Event::MoveSun { to } => self.sun = Some(to),
        }
    }
}

fn is_store(cell: usize) -> bool {
    CellCoord::from_index(cell)
        .and_then(CellCoord::zone)
        .is_some_and(|zone| zone.is_store())
}

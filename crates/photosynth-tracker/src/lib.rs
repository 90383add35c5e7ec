//! Sensing pipeline in front of the rule engine.
//!
//! - [`SignalStabilizer`] - turns noisy per-frame classifier labels into gated labels
//! - [`MoveExtractor`] - diffs consecutive gated snapshots into [`Move`](photosynth_engine::Move)s
//! - [`PipelineConfig`] - thresholds and the classifier's class table, loadable from TOML

pub use self::{config::*, extractor::*, frame::*, label::*, stabilizer::*};

mod config;
mod extractor;
mod frame;
mod label;
mod stabilizer;

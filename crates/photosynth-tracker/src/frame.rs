use photosynth_engine::{BOARD_CELL_COUNT, CELL_COUNT, SUN_CELL_COUNT};
use serde::{Deserialize, Serialize};

use crate::label::Label;

/// Row-major pixel patch cut out of the sensor image for one cell.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Crop {
    pub height: usize,
    pub width: usize,
    pub pixels: Vec<f32>,
}

impl Crop {
    #[must_use]
    pub fn new(height: usize, width: usize, pixels: Vec<f32>) -> Self {
        Self {
            height,
            width,
            pixels,
        }
    }

    /// Creates a `height` x `width` crop with every pixel set to `value`.
    #[must_use]
    pub fn filled(height: usize, width: usize, value: f32) -> Self {
        Self::new(height, width, vec![value; height * width])
    }
}

/// One sensor frame: classifier labels and crops for every cell.
///
/// Vectors are in canonical cell order. `crops` and `deltas` cover all
/// 69 cells, board cells first and sun cells last.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Frame {
    /// Frame counter of the sensor, if it provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u64>,
    pub board_labels: Vec<Label>,
    pub sun_labels: Vec<Label>,
    /// Raw intensity crops.
    pub crops: Vec<Crop>,
    /// Frame-to-frame difference crops.
    pub deltas: Vec<Crop>,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum FrameShapeError {
    #[display("expected 63 board labels, got {len}")]
    BoardLabels { len: usize },
    #[display("expected 6 sun labels, got {len}")]
    SunLabels { len: usize },
    #[display("expected 69 crops, got {len}")]
    Crops { len: usize },
    #[display("expected 69 delta crops, got {len}")]
    Deltas { len: usize },
    #[display("crop of cell {cell} is {height}x{width} but has {len} pixels")]
    CropSize {
        cell: usize,
        height: usize,
        width: usize,
        len: usize,
    },
}

impl Frame {
    /// Checks that the frame covers every cell exactly once.
    pub fn validate(&self) -> Result<(), FrameShapeError> {
        if self.board_labels.len() != BOARD_CELL_COUNT {
            return Err(FrameShapeError::BoardLabels {
                len: self.board_labels.len(),
            });
        }
        if self.sun_labels.len() != SUN_CELL_COUNT {
            return Err(FrameShapeError::SunLabels {
                len: self.sun_labels.len(),
            });
        }
        if self.crops.len() != CELL_COUNT {
            return Err(FrameShapeError::Crops {
                len: self.crops.len(),
            });
        }
        if self.deltas.len() != CELL_COUNT {
            return Err(FrameShapeError::Deltas {
                len: self.deltas.len(),
            });
        }
        for crops in [&self.crops, &self.deltas] {
            for (cell, crop) in crops.iter().enumerate() {
                if crop.pixels.len() != crop.height * crop.width {
                    return Err(FrameShapeError::CropSize {
                        cell,
                        height: crop.height,
                        width: crop.width,
                        len: crop.pixels.len(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame {
            sequence: None,
            board_labels: vec![8; BOARD_CELL_COUNT],
            sun_labels: vec![0; SUN_CELL_COUNT],
            crops: vec![Crop::filled(2, 2, 0.0); CELL_COUNT],
            deltas: vec![Crop::filled(2, 2, 0.0); CELL_COUNT],
        }
    }

    #[test]
    fn test_validate_shape() {
        assert_eq!(frame().validate(), Ok(()));

        let mut f = frame();
        f.board_labels.pop();
        assert_eq!(
            f.validate(),
            Err(FrameShapeError::BoardLabels { len: 62 })
        );

        let mut f = frame();
        f.sun_labels.push(1);
        assert_eq!(f.validate(), Err(FrameShapeError::SunLabels { len: 7 }));

        let mut f = frame();
        f.deltas.truncate(63);
        assert_eq!(f.validate(), Err(FrameShapeError::Deltas { len: 63 }));

        let mut f = frame();
        f.deltas[5].pixels.push(1.0);
        assert_eq!(
            f.validate(),
            Err(FrameShapeError::CropSize {
                cell: 5,
                height: 2,
                width: 2,
                len: 5,
            })
        );
    }

    #[test]
    fn test_sequence_is_optional() {
        let mut f = frame();
        let json = serde_json::to_string(&f).unwrap();
        assert!(!json.contains("sequence"));
        assert_eq!(serde_json::from_str::<Frame>(&json).unwrap(), f);

        f.sequence = Some(42);
        let json = serde_json::to_string(&f).unwrap();
        assert_eq!(serde_json::from_str::<Frame>(&json).unwrap().sequence, Some(42));
    }
}

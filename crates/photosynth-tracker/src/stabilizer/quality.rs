use crate::{config::QualityConfig, frame::Crop};

/// Returns whether `crop` shows enough contrast for the classifier label to be trusted.
///
/// An empty crop never passes.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn passes_quality(crop: &Crop, config: &QualityConfig) -> bool {
    let mut active = 0_usize;
    let mut negative = 0_usize;
    for &p in &crop.pixels {
        if p.abs() > config.pixel_threshold {
            active += 1;
            if p < 0.0 {
                negative += 1;
            }
        }
    }
    let total = crop.pixels.len() as f32;
    active as f32 > config.min_active_fraction * total
        && negative as f32 > config.min_negative_fraction * active as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crop(pixels: &[f32]) -> Crop {
        Crop::new(1, pixels.len(), pixels.to_vec())
    }

    #[test]
    fn test_quality_thresholds() {
        let config = QualityConfig::default();

        // 2 of 10 pixels active, one of them negative
        assert!(passes_quality(&crop(&[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0, -9.0]), &config));
        // active but none negative
        assert!(!passes_quality(&crop(&[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0, 9.0]), &config));
        // exactly at the pixel threshold is not active
        assert!(!passes_quality(&crop(&[5.0, -5.0, 5.0, -5.0]), &config));
        // too few active pixels: 1 of 20 is 5%
        let mut sparse = vec![0.0; 20];
        sparse[3] = -20.0;
        assert!(!passes_quality(&crop(&sparse), &config));
    }

    #[test]
    fn test_empty_crop_fails() {
        assert!(!passes_quality(&Crop::default(), &QualityConfig::default()));
    }
}

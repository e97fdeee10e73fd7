use ndarray::Array2;

use super::constants::{DEFAULT_MASK_THRESHOLD, MASK_THRESHOLD_RATIO};

/// Compute the outlier threshold for an optional free stream velocity.
///
/// With a free stream velocity the threshold is 125% of it; without one, the
/// generous default is used.
pub fn mask_threshold(velocity_fs: Option<f64>) -> f64 {
    match velocity_fs {
        Some(velocity) => velocity * MASK_THRESHOLD_RATIO,
        None => DEFAULT_MASK_THRESHOLD,
    }
}

/// A value matrix paired with a boolean mask flagging outlier cells.
///
/// A cell is masked when its magnitude exceeds the threshold. Masked cells
/// keep their values; consumers are expected to check the mask before using a
/// value.
#[derive(Debug, Clone)]
pub struct MaskedMatrix {
    values: Array2<f64>,
    mask: Array2<bool>,
}

impl MaskedMatrix {
    /// Mask every cell whose magnitude exceeds the threshold
    pub fn new(values: Array2<f64>, threshold: f64) -> Self {
        let mask = values.mapv(|value| value.abs() > threshold);
        Self { values, mask }
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn mask(&self) -> &Array2<bool> {
        &self.mask
    }

    /// Number of cells flagged as outliers
    pub fn masked_count(&self) -> usize {
        self.mask.iter().filter(|flagged| **flagged).count()
    }

    /// Iterate the values of unmasked cells
    pub fn valid_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values
            .iter()
            .zip(self.mask.iter())
            .filter(|(_, flagged)| !**flagged)
            .map(|(value, _)| *value)
    }
}

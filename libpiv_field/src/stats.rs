use std::path::Path;

use serde::Serialize;

use super::error::StatsError;
use super::field::VecFieldCartesian;
use super::mask::MaskedMatrix;

/// Mask-respecting aggregate of one velocity component.
///
/// Only unmasked cells contribute to the mean, min and max.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentStats {
    pub n_valid: usize,
    pub n_masked: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl ComponentStats {
    fn from_masked(matrix: &MaskedMatrix) -> Self {
        let mut n_valid = 0;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in matrix.valid_values() {
            n_valid += 1;
            sum += value;
            min = min.min(value);
            max = max.max(value);
        }

        if n_valid == 0 {
            return Self {
                n_valid: 0,
                n_masked: matrix.masked_count(),
                mean: 0.0,
                min: 0.0,
                max: 0.0,
            };
        }

        Self {
            n_valid,
            n_masked: matrix.masked_count(),
            mean: sum / n_valid as f64,
            min,
            max,
        }
    }
}

/// Summary of a vector field for one run, written as a YAML sidecar file.
#[derive(Debug, Clone, Serialize)]
pub struct FieldSummary {
    pub filepath: String,
    pub velocity_fs: Option<f64>,
    pub dims: (usize, usize),
    pub u: ComponentStats,
    pub v: ComponentStats,
    pub w: ComponentStats,
}

impl FieldSummary {
    pub fn new(field: &VecFieldCartesian) -> Self {
        Self {
            filepath: field.filepath().to_string_lossy().to_string(),
            velocity_fs: field.velocity_fs(),
            dims: field.dims(),
            u: ComponentStats::from_masked(field.u()),
            v: ComponentStats::from_masked(field.v()),
            w: ComponentStats::from_masked(field.w()),
        }
    }

    /// Serialize the summary to YAML at the given path
    pub fn write(&self, path: &Path) -> Result<(), StatsError> {
        let yaml_str = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml_str)?;
        Ok(())
    }
}

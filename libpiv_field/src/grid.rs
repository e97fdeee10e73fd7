use fxhash::FxHashMap;
use ndarray::Array2;

/// The sorted, deduplicated coordinate values along one spatial axis.
///
/// Carries a value-to-index map keyed on the exact bit pattern of each value,
/// so that placing a sample into its matrix cell is a constant-time lookup.
/// Exact equality is safe here because every queried value is drawn from the
/// same column the set was built from.
#[derive(Debug, Clone, Default)]
pub struct AxisSet {
    values: Vec<f64>,
    indices: FxHashMap<u64, usize>,
}

impl AxisSet {
    /// Build the axis set from a coordinate column
    pub fn from_samples(samples: &[f64]) -> Self {
        let mut values = samples.to_vec();
        values.sort_by(f64::total_cmp);
        values.dedup_by(|a, b| a.to_bits() == b.to_bits());

        let indices = values
            .iter()
            .enumerate()
            .map(|(idx, value)| (value.to_bits(), idx))
            .collect();

        Self { values, indices }
    }

    /// Number of distinct coordinate values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The distinct coordinate values, ascending
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Matrix index of a coordinate value, by exact equality
    pub fn index_of(&self, value: f64) -> Option<usize> {
        self.indices.get(&value.to_bits()).copied()
    }
}

/// Coordinate matrices spanning the full cross-product of the two axis sets.
///
/// `x_mesh[i, j] = x_set[j]` and `y_mesh[i, j] = y_set[i]`, with shape
/// `(|y_set|, |x_set|)`. Every matrix derived from the field shares this shape,
/// even when the file's sampling does not cover the full rectangle.
#[derive(Debug, Clone)]
pub struct MeshGrid {
    pub x_mesh: Array2<f64>,
    pub y_mesh: Array2<f64>,
}

impl MeshGrid {
    /// Broadcast the two axis sets into coordinate matrices
    pub fn new(x_set: &AxisSet, y_set: &AxisSet) -> Self {
        let dims = (y_set.len(), x_set.len());
        let x_mesh = Array2::from_shape_fn(dims, |(_, j)| x_set.values()[j]);
        let y_mesh = Array2::from_shape_fn(dims, |(i, _)| y_set.values()[i]);
        Self { x_mesh, y_mesh }
    }

    /// The canonical (rows, cols) grid shape
    pub fn dims(&self) -> (usize, usize) {
        self.x_mesh.dim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_set_sorts_and_dedups() {
        let samples = [3.0, 1.0, 2.0, 1.0, 3.0, 3.0];
        let axis = AxisSet::from_samples(&samples);
        assert_eq!(axis.values(), &[1.0, 2.0, 3.0]);
        assert_eq!(axis.len(), 3);
    }

    #[test]
    fn test_axis_set_index_lookup() {
        let axis = AxisSet::from_samples(&[-1.5, 0.0, 2.5]);
        assert_eq!(axis.index_of(-1.5), Some(0));
        assert_eq!(axis.index_of(2.5), Some(2));
        assert_eq!(axis.index_of(7.0), None);
    }

    #[test]
    fn test_meshgrid_broadcast() {
        let x_set = AxisSet::from_samples(&[0.0, 1.0, 2.0]);
        let y_set = AxisSet::from_samples(&[10.0, 20.0]);
        let mesh = MeshGrid::new(&x_set, &y_set);

        assert_eq!(mesh.dims(), (2, 3));
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(mesh.x_mesh[[i, j]], x_set.values()[j]);
                assert_eq!(mesh.y_mesh[[i, j]], y_set.values()[i]);
            }
        }
    }
}

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ndarray::Array2;

use super::constants::*;
use super::error::{ComponentError, VecFieldError};
use super::grid::{AxisSet, MeshGrid};
use super::header::parse_header;
use super::mask::{mask_threshold, MaskedMatrix};
use super::table::DataTable;

/// The fixed set of matrices a cartesian vector field exposes by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    XMesh,
    YMesh,
    U,
    V,
    W,
}

impl FromStr for Component {
    type Err = ComponentError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x_mesh" => Ok(Self::XMesh),
            "y_mesh" => Ok(Self::YMesh),
            "U" => Ok(Self::U),
            "V" => Ok(Self::V),
            "W" => Ok(Self::W),
            _ => Err(ComponentError::UnknownComponent(s.to_string())),
        }
    }
}

impl Component {
    /// The velocity components, in file column order
    pub const VELOCITIES: [Component; 3] = [Component::U, Component::V, Component::W];

    /// Name of the v3d column holding this component's samples
    pub fn column_name(&self) -> &'static str {
        match self {
            Component::XMesh => X_COLUMN,
            Component::YMesh => Y_COLUMN,
            Component::U => U_COLUMN,
            Component::V => V_COLUMN,
            Component::W => W_COLUMN,
        }
    }
}

/// A cartesian vector field parsed from a planar PIV .v3d file.
///
/// Construction runs the full pipeline in order: header parse, row load, axis
/// extraction, matrix assembly, outlier masking. A failure at any stage aborts
/// construction, so a caller never holds a partially built field. The file
/// handle is fully consumed and released before `load` returns. Once built the
/// field is read-only.
///
/// Two data-shape behaviors are intentional and preserved from the upstream
/// acquisition tooling rather than treated as errors: grid cells with no
/// corresponding sample stay at 0.0 in every component matrix, and when two
/// rows share a coordinate pair the later row silently overwrites the earlier
/// one.
#[derive(Debug, Clone)]
pub struct VecFieldCartesian {
    filepath: PathBuf,
    velocity_fs: Option<f64>,
    headers: Vec<String>,
    dims: (usize, usize),
    x_set: AxisSet,
    y_set: AxisSet,
    meshgrid: MeshGrid,
    u: MaskedMatrix,
    v: MaskedMatrix,
    w: MaskedMatrix,
}

impl VecFieldCartesian {
    /// Load a vector field from a .v3d file.
    ///
    /// The extension is checked before any I/O. `velocity_fs` is the free
    /// stream velocity used for outlier masking; when None, masking falls back
    /// to the default threshold.
    pub fn load(path: &Path, velocity_fs: Option<f64>) -> Result<Self, VecFieldError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(V3D_EXTENSION) => (),
            _ => return Err(VecFieldError::InvalidExtension(path.to_path_buf())),
        }
        if !path.exists() {
            return Err(VecFieldError::BadFilePath(path.to_path_buf()));
        }

        let start = std::time::Instant::now();
        let file = File::open(path)?;
        let field = Self::from_reader(BufReader::new(file), path.to_path_buf(), velocity_fs)?;
        log::info!(
            "Loaded {} in {:.3} s",
            path.display(),
            start.elapsed().as_secs_f64()
        );
        Ok(field)
    }

    /// Build a vector field from a buffered reader positioned at the header
    /// line. `filepath` is carried for error context and reporting only.
    pub fn from_reader<R: BufRead>(
        mut reader: R,
        filepath: PathBuf,
        velocity_fs: Option<f64>,
    ) -> Result<Self, VecFieldError> {
        let mut header_line = String::new();
        reader.read_line(&mut header_line)?;
        let headers = parse_header(&header_line)?;

        let table = DataTable::read_rows(reader, &headers)?;

        let x_samples = required_column(&table, Component::XMesh.column_name())?;
        let y_samples = required_column(&table, Component::YMesh.column_name())?;
        let x_set = AxisSet::from_samples(x_samples);
        let y_set = AxisSet::from_samples(y_samples);
        let meshgrid = MeshGrid::new(&x_set, &y_set);
        let dims = meshgrid.dims();

        let threshold = mask_threshold(velocity_fs);
        let assemble = |component: Component| -> Result<MaskedMatrix, VecFieldError> {
            let samples = required_column(&table, component.column_name())?;
            let matrix = assemble_matrix(&x_set, &y_set, x_samples, y_samples, samples);
            Ok(MaskedMatrix::new(matrix, threshold))
        };
        let u = assemble(Component::U)?;
        let v = assemble(Component::V)?;
        let w = assemble(Component::W)?;

        Ok(Self {
            filepath,
            velocity_fs,
            headers,
            dims,
            x_set,
            y_set,
            meshgrid,
            u,
            v,
            w,
        })
    }

    /// Get the mesh or velocity matrix for a named component.
    ///
    /// Recognized names are `x_mesh`, `y_mesh`, `U`, `V` and `W`; any other
    /// name is an UnknownComponent error.
    pub fn get(&self, name: &str) -> Result<&Array2<f64>, ComponentError> {
        Ok(self.matrix(Component::from_str(name)?))
    }

    /// The matrix for a component
    pub fn matrix(&self, component: Component) -> &Array2<f64> {
        match component {
            Component::XMesh => &self.meshgrid.x_mesh,
            Component::YMesh => &self.meshgrid.y_mesh,
            Component::U => self.u.values(),
            Component::V => self.v.values(),
            Component::W => self.w.values(),
        }
    }

    /// The outlier mask for a velocity component; mesh components carry no mask
    pub fn masked(&self, component: Component) -> Option<&MaskedMatrix> {
        match component {
            Component::U => Some(&self.u),
            Component::V => Some(&self.v),
            Component::W => Some(&self.w),
            _ => None,
        }
    }

    pub fn u(&self) -> &MaskedMatrix {
        &self.u
    }

    pub fn v(&self) -> &MaskedMatrix {
        &self.v
    }

    pub fn w(&self) -> &MaskedMatrix {
        &self.w
    }

    /// Path of the source .v3d file
    pub fn filepath(&self) -> &Path {
        &self.filepath
    }

    /// Free stream velocity this field was masked against, if one was given
    pub fn velocity_fs(&self) -> Option<f64> {
        self.velocity_fs
    }

    /// Column names parsed from the file header
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// The canonical (rows, cols) shape shared by every matrix of this field
    pub fn dims(&self) -> (usize, usize) {
        self.dims
    }

    pub fn x_set(&self) -> &AxisSet {
        &self.x_set
    }

    pub fn y_set(&self) -> &AxisSet {
        &self.y_set
    }
}

fn required_column<'a>(table: &'a DataTable, name: &str) -> Result<&'a [f64], VecFieldError> {
    table
        .column(name)
        .map_err(|_| VecFieldError::MissingColumn(name.to_string()))
}

/// Place every sample at its grid cell via the axis index maps.
///
/// Cells with no sample stay zero. A duplicate coordinate pair overwrites the
/// earlier sample (last row wins).
fn assemble_matrix(
    x_set: &AxisSet,
    y_set: &AxisSet,
    x_samples: &[f64],
    y_samples: &[f64],
    samples: &[f64],
) -> Array2<f64> {
    let mut matrix = Array2::zeros((y_set.len(), x_set.len()));
    for ((x, y), value) in x_samples.iter().zip(y_samples.iter()).zip(samples.iter()) {
        // Both coordinates were drawn from the columns the sets were built
        // from, so the lookups cannot miss.
        if let (Some(col), Some(row)) = (x_set.index_of(*x), y_set.index_of(*y)) {
            matrix[[row, col]] = *value;
        }
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const FULL_GRID: &str = "\
VARIABLES=\"X mm\", \"Y mm\", \"U m/s\", \"V m/s\", \"W m/s\"
0.0, 0.0, 1.0, 0.5, 0.1
1.0, 0.0, 1.0, 0.5, 0.1
0.0, 1.0, 1.0, 0.5, 0.1
1.0, 1.0, 1.0, 0.5, 0.1
";

    fn field_from(content: &str, velocity_fs: Option<f64>) -> VecFieldCartesian {
        VecFieldCartesian::from_reader(
            Cursor::new(content.to_string()),
            PathBuf::from("test.v3d"),
            velocity_fs,
        )
        .unwrap()
    }

    #[test]
    fn test_component_column_names() {
        assert_eq!(Component::XMesh.column_name(), X_COLUMN);
        assert_eq!(Component::YMesh.column_name(), Y_COLUMN);
        assert_eq!(Component::U.column_name(), U_COLUMN);
        assert_eq!(Component::V.column_name(), V_COLUMN);
        assert_eq!(Component::W.column_name(), W_COLUMN);
    }

    #[test]
    fn test_uniform_full_grid() {
        let field = field_from(FULL_GRID, Some(10.0));
        assert_eq!(field.dims(), (2, 2));

        let u = field.get("U").unwrap();
        assert_eq!(u.dim(), (2, 2));
        assert!(u.iter().all(|value| *value == 1.0));
        // threshold is 12.5, nothing should be masked
        assert_eq!(field.u().masked_count(), 0);
    }

    #[test]
    fn test_grid_shape_law() {
        let field = field_from(FULL_GRID, None);
        let cells = field.x_set().len() * field.y_set().len();
        assert_eq!(cells, 4);
        for name in ["x_mesh", "y_mesh", "U", "V", "W"] {
            let matrix = field.get(name).unwrap();
            assert_eq!(matrix.dim(), field.dims());
        }
    }

    #[test]
    fn test_mesh_values() {
        let field = field_from(FULL_GRID, None);
        let x_mesh = field.get("x_mesh").unwrap();
        let y_mesh = field.get("y_mesh").unwrap();
        assert_eq!(x_mesh[[0, 0]], 0.0);
        assert_eq!(x_mesh[[0, 1]], 1.0);
        assert_eq!(y_mesh[[0, 0]], 0.0);
        assert_eq!(y_mesh[[1, 0]], 1.0);
    }

    #[test]
    fn test_unordered_rows_roundtrip() {
        // same grid as FULL_GRID, shuffled rows, distinct U values
        let content = "\
VARIABLES=\"X mm\", \"Y mm\", \"U m/s\", \"V m/s\", \"W m/s\"
1.0, 1.0, 4.0, 0.0, 0.0
0.0, 0.0, 1.0, 0.0, 0.0
1.0, 0.0, 2.0, 0.0, 0.0
0.0, 1.0, 3.0, 0.0, 0.0
";
        let field = field_from(content, None);
        let u = field.get("U").unwrap();
        assert_eq!(u[[0, 0]], 1.0);
        assert_eq!(u[[0, 1]], 2.0);
        assert_eq!(u[[1, 0]], 3.0);
        assert_eq!(u[[1, 1]], 4.0);
    }

    #[test]
    fn test_missing_combination_stays_zero() {
        // axes span {0,1} x {0,1} but only 3 of 4 combinations are sampled
        let content = "\
VARIABLES=\"X mm\", \"Y mm\", \"U m/s\", \"V m/s\", \"W m/s\"
0.0, 0.0, 1.0, 1.0, 1.0
1.0, 0.0, 1.0, 1.0, 1.0
0.0, 1.0, 1.0, 1.0, 1.0
";
        let field = field_from(content, None);
        assert_eq!(field.dims(), (2, 2));
        for name in ["U", "V", "W"] {
            assert_eq!(field.get(name).unwrap()[[1, 1]], 0.0);
        }
    }

    #[test]
    fn test_duplicate_coordinate_last_write_wins() {
        let content = "\
VARIABLES=\"X mm\", \"Y mm\", \"U m/s\", \"V m/s\", \"W m/s\"
0.0, 0.0, 1.0, 0.0, 0.0
1.0, 0.0, 2.0, 0.0, 0.0
0.0, 0.0, 9.0, 0.0, 0.0
";
        let field = field_from(content, None);
        assert_eq!(field.get("U").unwrap()[[0, 0]], 9.0);
    }

    #[test]
    fn test_outliers_masked_against_free_stream() {
        let content = "\
VARIABLES=\"X mm\", \"Y mm\", \"U m/s\", \"V m/s\", \"W m/s\"
0.0, 0.0, 1.0, 0.0, 0.0
1.0, 0.0, 13.0, 0.0, 0.0
0.0, 1.0, -13.0, 0.0, 0.0
1.0, 1.0, 12.0, 0.0, 0.0
";
        let field = field_from(content, Some(10.0));
        let mask = field.u().mask();
        assert!(!mask[[0, 0]]);
        assert!(mask[[0, 1]]);
        assert!(mask[[1, 0]]);
        assert!(!mask[[1, 1]]);
        // masked values are annotated, not deleted
        assert_eq!(field.get("U").unwrap()[[0, 1]], 13.0);
    }

    #[test]
    fn test_idempotent_construction() {
        let first = field_from(FULL_GRID, Some(10.0));
        let second = field_from(FULL_GRID, Some(10.0));
        for component in Component::VELOCITIES {
            assert_eq!(first.matrix(component), second.matrix(component));
            assert_eq!(
                first.masked(component).unwrap().mask(),
                second.masked(component).unwrap().mask()
            );
        }
        assert_eq!(first.get("x_mesh").unwrap(), second.get("x_mesh").unwrap());
    }

    #[test]
    fn test_unknown_component() {
        let field = field_from(FULL_GRID, None);
        match field.get("T") {
            Err(ComponentError::UnknownComponent(name)) => assert_eq!(name, "T"),
            other => panic!("Expected UnknownComponent, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_header_halts_construction() {
        let content = "no marker here\n0.0, 0.0, 1.0, 0.0, 0.0\n";
        let result = VecFieldCartesian::from_reader(
            Cursor::new(content.to_string()),
            PathBuf::from("test.v3d"),
            None,
        );
        match result {
            Err(VecFieldError::HeaderError(_)) => (),
            other => panic!("Expected HeaderError, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_required_column() {
        let content = "VARIABLES=\"X mm\", \"Y mm\", \"U m/s\"\n0.0, 0.0, 1.0\n";
        let result = VecFieldCartesian::from_reader(
            Cursor::new(content.to_string()),
            PathBuf::from("test.v3d"),
            None,
        );
        match result {
            Err(VecFieldError::MissingColumn(name)) => assert_eq!(name, V_COLUMN),
            other => panic!("Expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_extension_rejected_before_io() {
        match VecFieldCartesian::load(Path::new("does_not_exist.txt"), None) {
            Err(VecFieldError::InvalidExtension(path)) => {
                assert_eq!(path, PathBuf::from("does_not_exist.txt"))
            }
            other => panic!("Expected InvalidExtension, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_rejected() {
        match VecFieldCartesian::load(Path::new("does_not_exist.v3d"), None) {
            Err(VecFieldError::BadFilePath(_)) => (),
            other => panic!("Expected BadFilePath, got {other:?}"),
        }
    }
}

//! Constants describing the v3d file format and the masking defaults

/// File extension required of all input vector field files
pub const V3D_EXTENSION: &str = "v3d";

/// Marker substring which introduces the variable list on the header line
pub const VARIABLES_MARKER: &str = "VARIABLES=";

/// Delimiter between column names in the header variable list
pub const HEADER_DELIMITER: &str = ", ";

/// Name of the x-coordinate column (millimeters)
pub const X_COLUMN: &str = "X mm";
/// Name of the y-coordinate column (millimeters)
pub const Y_COLUMN: &str = "Y mm";
/// Name of the x-direction velocity column (m/s)
pub const U_COLUMN: &str = "U m/s";
/// Name of the y-direction velocity column (m/s)
pub const V_COLUMN: &str = "V m/s";
/// Name of the z-direction velocity column (m/s)
pub const W_COLUMN: &str = "W m/s";

/// Outlier threshold (m/s) applied when no free stream velocity is given
pub const DEFAULT_MASK_THRESHOLD: f64 = 100.0;

/// Multiplier on the free stream velocity to produce the outlier threshold
pub const MASK_THRESHOLD_RATIO: f64 = 1.25;

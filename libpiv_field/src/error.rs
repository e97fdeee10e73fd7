use std::path::PathBuf;
use thiserror::Error;

use super::constants::*;
use super::worker_status::WorkerStatus;

#[derive(Debug, Clone, Error)]
pub enum HeaderError {
    #[error("Header line does not contain the {marker} marker: {0}", marker=VARIABLES_MARKER)]
    MissingMarker(String),
    #[error("Header line contains an empty variable list")]
    EmptyVariables,
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Table failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Row at line {line} has {found} fields; expected {expected} from the header")]
    FieldCountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Row at line {line} has non-numeric field {field:?}")]
    BadNumber { line: usize, field: String },
    #[error("Table does not have a column named {0}")]
    UnknownColumn(String),
}

#[derive(Debug, Clone, Error)]
pub enum ComponentError {
    #[error("Component {0} does not exist")]
    UnknownComponent(String),
}

#[derive(Debug, Error)]
pub enum VecFieldError {
    #[error("Input is not a valid .{ext} file: {0:?}", ext=V3D_EXTENSION)]
    InvalidExtension(PathBuf),
    #[error("Could not open vector field because file {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("Vector field failed to parse header: {0}")]
    HeaderError(#[from] HeaderError),
    #[error("Vector field failed to load data rows: {0}")]
    TableError(#[from] TableError),
    #[error("Vector field is missing required column {0}")]
    MissingColumn(String),
    #[error("Vector field failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Summary writer failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Summary writer failed to convert to yaml: {0}")]
    ParsingError(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration as file {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("Config failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Config failed to parse YAML: {0}")]
    ParsingError(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("Processor failed due to VecField error: {0}")]
    FieldError(#[from] VecFieldError),
    #[error("Processor failed due to Config error: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("Processor failed due to Stats error: {0}")]
    StatsError(#[from] StatsError),
    #[error("Processor failed due to Send error: {0}")]
    SendError(#[from] std::sync::mpsc::SendError<WorkerStatus>),
    #[error("Processor failed due to IO error: {0}")]
    IoError(#[from] std::io::Error),
}

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::constants::V3D_EXTENSION;
use super::error::ConfigError;

/// Structure representing the application configuration. Contains pathing and run information
/// Configs are serializable and deserializable to YAML using serde and serde_yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data_path: PathBuf,
    pub output_path: PathBuf,
    pub experiment: String,
    pub velocity_fs: Option<f64>,
    pub first_run_number: i32,
    pub last_run_number: i32,
    pub n_threads: i32,
}

impl Default for Config {
    /// Generate a new Config object. All fields will be empty/invalid
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("None"),
            output_path: PathBuf::from("None"),
            experiment: String::from(""),
            velocity_fs: None,
            first_run_number: 0,
            last_run_number: 0,
            n_threads: 1,
        }
    }
}

impl Config {
    /// Read the configuration in a YAML file
    /// Returns a Config if successful
    pub fn read_config_file(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            return Err(ConfigError::BadFilePath(config_path.to_path_buf()));
        }

        let yaml_str = std::fs::read_to_string(config_path)?;

        Ok(serde_yaml::from_str::<Self>(&yaml_str)?)
    }

    /// Check if a specific run exists by evaluating the existence of its .v3d file
    pub fn does_run_exist(&self, run_number: i32) -> bool {
        self.get_v3d_file_name(run_number).exists()
    }

    /// Get the path to the .v3d file of a run
    pub fn get_v3d_file_name(&self, run_number: i32) -> PathBuf {
        self.data_path
            .join(format!("{}.{}", self.get_run_str(run_number), V3D_EXTENSION))
    }

    /// Get the path to the output summary file of a run
    pub fn get_summary_file_name(&self, run_number: i32) -> Result<PathBuf, ConfigError> {
        let summary_path = self
            .output_path
            .join(format!("{}.yml", self.get_run_str(run_number)));
        if self.output_path.exists() {
            Ok(summary_path)
        } else {
            Err(ConfigError::BadFilePath(self.output_path.clone()))
        }
    }

    /// Construct the run string using the PIV acquisition naming convention
    fn get_run_str(&self, run_number: i32) -> String {
        format!("{}{:0>5}", self.experiment, run_number)
    }

    pub fn is_n_threads_valid(&self) -> bool {
        self.n_threads >= 1
    }
}

//! # piv_field
//!
//! piv_field is a processor for planar Particle Image Velocimetry (PIV)
//! measurement files, written in Rust. It parses v3d vector field files into
//! coordinate mesh grids and velocity component matrices, masks physically
//! implausible samples against the free stream velocity, and writes a
//! per-run summary for downstream report tooling.
//!
//! ## Installation
//!
//! Currently the only method of install is from source. If you have not used
//! Rust before, you will most likely need to install the Rust tool chain. See
//! the [Rust docs](https://www.rust-lang.org/tools/install) for installation
//! instructions.
//!
//! To build and install the CLI use `cargo install --path ./piv_field_cli`
//! from the top level piv_field repository. The binary will be installed to
//! your cargo install location (typically something like `~/.cargo/bin/`) and
//! can be uninstalled by running `cargo uninstall piv_field_cli`.
//!
//! ## Input Format
//!
//! v3d files are delimited text files produced by planar PIV acquisition
//! systems. The first line is a header containing a `VARIABLES=` marker
//! followed by a quoted, comma-space-separated list of column names:
//!
//! ```text
//! VARIABLES="X mm", "Y mm", "U m/s", "V m/s", "W m/s"
//! ```
//!
//! Every following line is a comma-separated numeric row matching the header's
//! column order and count. Row order is not assumed; samples are placed into
//! their matrix cells by coordinate lookup. The coordinate columns `X mm` and
//! `Y mm` and the three velocity columns `U m/s`, `V m/s` and `W m/s` are
//! required.
//!
//! Two quirks of upstream acquisition data are preserved deliberately: grid
//! cells with no sample are left at 0.0, and when two rows share a coordinate
//! pair the later row wins.
//!
//! ## Configuration
//!
//! The CLI is driven by a YAML configuration file:
//!
//! ```yml
//! data_path: None
//! output_path: None
//! experiment: ''
//! velocity_fs: null
//! first_run_number: 0
//! last_run_number: 0
//! n_threads: 1
//! ```
//!
//! - `data_path`: directory containing the .v3d files
//! - `output_path`: directory to which run summaries are written
//! - `experiment`: file stem prefix shared by the runs
//!   (run 1000 of experiment `Ely_May28th` is `Ely_May28th01000.v3d`)
//! - `velocity_fs`: free stream velocity in m/s; samples whose magnitude
//!   exceeds 125% of this value are masked. If `null`, a generous default
//!   threshold of 100 m/s is used.
//! - `first_run_number`/`last_run_number`: the run range (inclusive)
//! - `n_threads`: the number of parallel worker threads to divide the runs
//!   amongst. Runs are fully independent, so workers share no state. Must be
//!   at least 1.
//!
//! A template can be generated with the CLI `new` subcommand.
//!
//! ## Output
//!
//! One YAML summary file per run, containing the grid dimensions and the
//! mask-respecting mean, min, max and valid/masked cell counts of each
//! velocity component.
pub mod config;
pub mod constants;
pub mod error;
pub mod field;
pub mod grid;
pub mod header;
pub mod mask;
pub mod process;
pub mod stats;
pub mod table;
pub mod worker_status;

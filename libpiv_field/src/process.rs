use std::sync::mpsc::Sender;

use super::config::Config;
use super::error::ProcessorError;
use super::field::VecFieldCartesian;
use super::stats::FieldSummary;
use super::worker_status::{BarColor, WorkerStatus};

/// Process a single PIV run.
///
/// Loads the run's .v3d file into a vector field and writes the mask-respecting
/// summary next to it in the output directory. Progress is reported over the
/// channel for the UI.
pub fn process_run(
    config: &Config,
    run_number: i32,
    tx: &Sender<WorkerStatus>,
    worker_id: &usize,
) -> Result<(), ProcessorError> {
    let v3d_path = config.get_v3d_file_name(run_number);
    let file_size = std::fs::metadata(&v3d_path)?.len();
    log::info!(
        "Processing {} ({})",
        v3d_path.display(),
        human_bytes::human_bytes(file_size as f64)
    );

    tx.send(WorkerStatus::new(
        0.0,
        run_number,
        *worker_id,
        BarColor::CYAN,
    ))?;

    let field = VecFieldCartesian::load(&v3d_path, config.velocity_fs)?;
    let (rows, cols) = field.dims();
    log::info!("Field grid is {rows} rows x {cols} cols");
    tx.send(WorkerStatus::new(
        0.5,
        run_number,
        *worker_id,
        BarColor::CYAN,
    ))?;

    let summary_path = config.get_summary_file_name(run_number)?;
    let summary = FieldSummary::new(&field);
    summary.write(&summary_path)?;
    log::info!("Wrote summary to {}", summary_path.display());

    tx.send(WorkerStatus::new(
        1.0,
        run_number,
        *worker_id,
        BarColor::GREEN,
    ))?;
    Ok(())
}

/// Process a subset of runs
pub fn process_subset(
    config: Config,
    tx: Sender<WorkerStatus>,
    worker_id: usize,
    subset: Vec<i32>,
) -> Result<(), ProcessorError> {
    for run in subset {
        if config.does_run_exist(run) {
            log::info!("Processing run {}...", run);
            process_run(&config, run, &tx, &worker_id)?;
            log::info!("Finished processing run {}.", run);
        } else {
            log::info!("Run {} does not exist, skipping...", run);
        }
    }
    Ok(())
}

/// Divide a run range in to a set of subranges (per thread/worker)
pub fn create_subsets(config: &Config) -> Vec<Vec<i32>> {
    let mut subsets: Vec<Vec<i32>> = vec![Vec::new(); config.n_threads as usize];
    let n_subsets = subsets.len();

    for (idx, run) in (config.first_run_number..(config.last_run_number + 1)).enumerate() {
        subsets[idx % n_subsets].push(run)
    }

    subsets
}

use clap::{Arg, Command};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use indicatif_log_bridge::LogWrapper;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use libpiv_field::config::Config;
use libpiv_field::process::{create_subsets, process_subset};
use libpiv_field::worker_status::WorkerStatus;

fn make_template_config(path: &Path) {
    let config = Config::default();
    let yaml_str = serde_yaml::to_string(&config).unwrap();
    let mut file = File::create(path).expect("Could create template config file!");
    file.write_all(yaml_str.as_bytes())
        .expect("Failed to write yaml data to file!");
}

fn main() {
    // Create a cli
    let matches = Command::new("piv_field_cli")
        .arg_required_else_help(true)
        .subcommand(Command::new("new").about("Make a template configuration yaml file"))
        .arg(
            Arg::new("path")
                .short('p')
                .long("path")
                .help("Path to the file"),
        )
        .get_matches();

    // Initialize feedback
    let logger = simplelog::TermLogger::new(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );

    let pb_manager = MultiProgress::new();

    LogWrapper::new(pb_manager.clone(), logger)
        .try_init()
        .expect("Could not create logging/progress!");

    // Parse the cli
    let config_path = PathBuf::from(matches.get_one::<String>("path").expect("We require args"));

    if let Some(("new", _)) = matches.subcommand() {
        log::info!(
            "Making a template config at {}...",
            config_path.to_string_lossy()
        );

        make_template_config(&config_path);
        log::info!("Done.");
        return;
    }

    // Load our config
    log::info!("Loading config from {}...", config_path.to_string_lossy());
    let config = match Config::read_config_file(&config_path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            return;
        }
    };
    log::info!("Config successfully loaded.");
    log::info!("Data Path: {}", config.data_path.to_string_lossy());
    log::info!("Output Path: {}", config.output_path.to_string_lossy());
    log::info!(
        "First Run: {} Last Run: {}",
        config.first_run_number,
        config.last_run_number
    );
    log::info!("Experiment Name: {}", config.experiment);
    match config.velocity_fs {
        Some(v) => log::info!("Free Stream Velocity: {v} m/s"),
        None => log::info!("Free Stream Velocity: not set, masking at the default threshold"),
    }

    if !config.is_n_threads_valid() {
        log::error!("Number of workers must be at least 1!");
        return;
    }

    // Spawn the workers, one per non-empty run subset
    let (tx, rx) = mpsc::channel::<WorkerStatus>();
    let bar_style = ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos}% {msg}")
        .expect("Could not create progress bar style!");
    let mut workers = Vec::new();
    let mut bars = Vec::new();
    for subset in create_subsets(&config) {
        // Dont make empty workers
        if subset.is_empty() {
            continue;
        }
        let conf = config.clone();
        let worker_tx = tx.clone();
        let worker_id = workers.len();
        bars.push(pb_manager.add(ProgressBar::new(100).with_style(bar_style.clone())));
        workers.push(std::thread::spawn(move || {
            process_subset(conf, worker_tx, worker_id, subset)
        }));
    }
    drop(tx);

    // Receive status until every worker has hung up its sender
    for status in rx {
        let bar = &bars[status.worker_id];
        bar.set_message(status.describe());
        bar.set_position((status.progress * 100.0) as u64);
    }

    for (worker_id, worker) in workers.into_iter().enumerate() {
        match worker.join() {
            Ok(Ok(_)) => log::info!("Worker {worker_id} finished."),
            Ok(Err(e)) => log::error!("Worker {worker_id} failed with error: {e}"),
            Err(_) => log::error!("Failed to join worker {worker_id}!"),
        }
    }

    for bar in bars.iter() {
        bar.finish();
    }

    log::info!("Done.");
}

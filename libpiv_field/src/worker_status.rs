#[derive(Debug, Clone, Default)]
pub enum BarColor {
    #[default]
    CYAN,
    GREEN,
}

#[derive(Debug, Clone, Default)]
pub struct WorkerStatus {
    pub progress: f32,
    pub run_number: i32,
    pub worker_id: usize,
    pub color: BarColor,
}

impl WorkerStatus {
    pub fn new(progress: f32, run_number: i32, worker_id: usize, color: BarColor) -> Self {
        Self {
            progress,
            run_number,
            worker_id,
            color,
        }
    }

    /// One-line label for this worker's progress bar
    pub fn describe(&self) -> String {
        let state = match self.color {
            BarColor::CYAN => "Processing",
            BarColor::GREEN => "Finished",
        };
        format!("Worker {} : {} run {}", self.worker_id, state, self.run_number)
    }
}

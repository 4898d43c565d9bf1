use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid schedule configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;

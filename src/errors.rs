use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("File I/O Error: {0}")]
    Io(String),

    #[error("CSV Error: {0}")]
    Csv(String),

    #[error("Invalid regex '{pattern}': {details}")]
    Regex { pattern: String, details: String },

    #[error("{column} does not exist in CSV header ({origin})")]
    MissingColumn { column: String, origin: String },

    #[error("Parse Error: {0}")]
    Parse(String),

    #[error("Command \"{command}\" failed: {details}")]
    Command { command: String, details: String },
}

// Allow conversion from std::io::Error to AppError::Io
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Csv(err.to_string())
    }
}

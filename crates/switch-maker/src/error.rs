use thiserror::Error;

#[derive(Error, Debug)]
pub enum MakerError {
    #[error("unknown switch type: {0}")]
    UnknownSwitchType(String),

    #[error("unsupported switch combination: {0}")]
    UnsupportedCombination(String),

    #[error("invalid keycap size: {0}")]
    InvalidSize(f64),

    #[error("parse error: {0}")]
    ParseError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

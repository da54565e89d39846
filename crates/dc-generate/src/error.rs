use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("order data parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("at least one warehouse is required to create drones")]
    NoWarehouses,

    #[error("invalid generation bounds: {0}")]
    InvalidBounds(String),
}

pub type GenerationResult<T> = Result<T, GenerationError>;

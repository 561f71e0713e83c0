use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid shape: {0}")]
    InvalidShape(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("input length {actual} does not match number of input nodes {expected}")]
    InputLength { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the pricer and its HTTP surface.
/// The pricing core only ever produces `InvalidArgument`; everything
/// else belongs to startup and serving.
#[derive(Debug, thiserror::Error)]
pub enum PricerError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for PricerError {
    fn from(e: std::io::Error) -> Self {
        PricerError::Io(e.to_string())
    }
}

pub type PricerResult<T> = Result<T, PricerError>;

/// Errors raised by the candlestick core (aggregation, filtering, regression).
///
/// These are library-level failures; the CLI converts them into [`AppError`]
/// with an exit code.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CandleError {
    #[error("no samples to aggregate")]
    EmptyInput,
    #[error("no historical data available for prediction")]
    InsufficientData,
    #[error("regression denominator is zero (all {n} observations share the same year)")]
    DegenerateFit { n: usize },
    #[error("invalid range: {0}")]
    InvalidRange(String),
    #[error("period label '{0}' is not an integer year")]
    InvalidPeriod(String),
}

impl CandleError {
    /// Process exit code used when this error reaches `main`.
    pub fn exit_code(&self) -> u8 {
        match self {
            CandleError::InvalidRange(_) | CandleError::InvalidPeriod(_) => 2,
            CandleError::EmptyInput | CandleError::InsufficientData => 3,
            CandleError::DegenerateFit { .. } => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<CandleError> for AppError {
    fn from(err: CandleError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

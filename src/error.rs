use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable held a value that could not be parsed
    #[error("invalid value {value:?} for {key}")]
    Config { key: &'static str, value: String },

    /// Procedure names end up inside the statement text, so only identifiers pass
    #[error("invalid stored procedure name {0:?}")]
    InvalidProcedure(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

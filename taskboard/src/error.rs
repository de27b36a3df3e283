use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no authenticated principal")]
    Unauthenticated,

    #[error("validation failed for `{field}`: {message}")]
    ValidationFailed {
        field: &'static str,
        message: String,
    },

    /// The row is absent or belongs to another principal. The two cases are
    /// deliberately reported the same way.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("database error: {0}")]
    Database(DbErr),
}

impl Error {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Error::ValidationFailed {
            field,
            message: message.into(),
        }
    }

    /// Stable tag for the error category, suitable for wire formats.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Unauthenticated => "unauthenticated",
            Error::ValidationFailed { .. } => "validation_failed",
            Error::NotFound { .. } => "not_found",
            Error::ConstraintViolation(_) => "constraint_violation",
            Error::Database(_) => "database",
        }
    }
}

impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(msg))
            | Some(SqlErr::UniqueConstraintViolation(msg)) => Error::ConstraintViolation(msg),
            _ => Error::Database(err),
        }
    }
}

use thiserror::Error;

/// Errors produced by value construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid decimal literal: {0}")]
    InvalidDecimal(String),

    #[error("invalid date-time literal: {0}")]
    InvalidDateTime(String),

    #[error("object of class {class} is not an object storage")]
    NotAStorage { class: String },
}

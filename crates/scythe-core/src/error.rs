//! Core model error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Unknown resource kind: {0}")]
    UnknownResourceKind(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;

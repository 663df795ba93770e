//! Error types for fol-unify

use crate::parser::ParseError;
use crate::unification::UnificationError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid input format: {0}")]
    Parse(#[from] ParseError),

    #[error("Unification failed: {0}")]
    Unification(#[from] UnificationError),
}

pub type Result<T> = std::result::Result<T, Error>;

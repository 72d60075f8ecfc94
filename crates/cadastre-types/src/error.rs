use thiserror::Error;

/// Errors produced by type construction and parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("{kind} must not be empty")]
    EmptyId { kind: &'static str },

    #[error("{kind} too long: {actual} characters exceeds maximum of {max}")]
    IdTooLong {
        kind: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("{kind} contains invalid character {ch:?}")]
    InvalidIdCharacter { kind: &'static str, ch: char },

    #[error("unknown property status: {0:?}")]
    UnknownStatus(String),
}

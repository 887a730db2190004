//! Domain error types.
//!
//! These errors represent validation failures in the domain layer: data
//! handed to the core that breaks an upstream contract. They are distinct
//! from resolver and request-level errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// An identifier was empty
    #[error("{0} identifier cannot be empty")]
    EmptyId(&'static str),

    /// A transit option breaks a structural invariant
    #[error("malformed option: {0}")]
    MalformedOption(String),

    /// A stop pair does not describe a forward ride on one trip
    #[error("invalid stop pair: {0}")]
    InvalidStopPair(&'static str),
}

//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the engine's contracts.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Ambiguous snapshot: two siblings in one list share an identity key,
    /// so matching across snapshots would be arbitrary.
    #[error("duplicate identity within one sibling list: {identity}")]
    DuplicateIdentity { identity: String },

    /// The target snapshot diverged from the snapshot the diff was computed
    /// against: an unchanged node has no matching sibling to copy from.
    #[error("target has no sibling matching unchanged node: {identity}")]
    MissingTargetSibling { identity: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

//! Error types for impacters operations.

use thiserror::Error;

use crate::event::EventId;
use crate::member::MemberId;

/// Errors that can occur in impacters operations.
///
/// Every error is scoped to the single operation that raised it; the store is
/// left exactly as it was before the call.
#[derive(Error, Debug)]
pub enum ImpactersError {
    #[error("{0}")]
    Validation(String),

    #[error("Excel export library not found.")]
    ExportUnavailable,

    #[error("Export error: {0}")]
    Export(String),

    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for impacters operations.
pub type ImpactersResult<T> = Result<T, ImpactersError>;

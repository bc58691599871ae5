//! Diagnostic error types for the atomspace.
//!
//! Missing identifiers are not errors in this crate: reads return `Option` or
//! an empty `Vec`, and updates return `bool` (spelled out per operation on
//! [`AtomStore`](crate::store::AtomStore)). The error type below covers the
//! few genuinely failing paths, with miette `#[diagnostic]` derives providing
//! error codes and help text.

use miette::Diagnostic;
use thiserror::Error;

/// Errors from atom store operations.
#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("atom id space exhausted: cannot allocate more than u64::MAX ids")]
    #[diagnostic(
        code(atomspace::store::id_exhausted),
        help(
            "The atom ID space is exhausted. This is extremely unlikely \
             in practice (requires 2^64 allocations). If you see this error, \
             something is very wrong — check for allocation loops."
        )
    )]
    IdSpaceExhausted,

    #[error("outgoing id {id} at position {position} does not resolve to a live atom")]
    #[diagnostic(
        code(atomspace::store::dangling_reference),
        help(
            "`add_link_checked` requires every outgoing id to resolve at \
             creation time. Create the referenced atoms first, or use \
             `add_link` if forward references are intended."
        )
    )]
    DanglingReference { id: u64, position: usize },
}

/// Convenience alias for functions returning store results.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

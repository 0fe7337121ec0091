//! Error types for structure operations.
//!
//! Two failure styles coexist in this crate. Soft failures (wrong-kind
//! arithmetic, missing keys, out-of-range lookups) are not errors at all:
//! they produce [`Value::Absent`](crate::Value::Absent) and flow through
//! expression and selector pipelines untouched. Everything in this module is
//! the other style: contract violations by the embedding application, such as
//! writing to a committed record or indexing a `Data` past its end.
//!
//! Factory functions (e.g. `immutable()`) are the construction API so call
//! sites stay one line and error text stays consistent.

use thiserror::Error;

/// Result of an operation that can violate a structural contract.
pub type StructureResult<T> = Result<T, StructureError>;

/// A structural contract violation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StructureError {
    /// Mutation attempted on a committed record, field, or data buffer.
    #[error("cannot mutate immutable {what}")]
    Immutable { what: &'static str },

    /// Positional access past the end of a record, view, or data buffer.
    #[error("index {index} out of bounds for length {length}")]
    IndexOutOfBounds { index: usize, length: usize },

    /// Sub-range that does not fit inside its backing sequence.
    #[error("range {lower}..{upper} out of bounds for length {length}")]
    RangeOutOfBounds {
        lower: usize,
        upper: usize,
        length: usize,
    },

    /// Native value that matches none of the accepted shapes.
    #[error("unsupported native value of type `{type_name}`")]
    UnsupportedNative { type_name: &'static str },

    /// Malformed base16 or base64 input.
    #[error("invalid {encoding} input: {reason}")]
    InvalidEncoding {
        encoding: &'static str,
        reason: String,
    },

    /// Scope stack grew past the interpreter's configured limit.
    #[error("scope stack overflow: depth limit {limit} reached")]
    ScopeOverflow { limit: usize },

    /// Pop from an empty scope stack.
    #[error("scope stack underflow")]
    ScopeUnderflow,
}

// Mutation errors

#[cold]
pub fn immutable(what: &'static str) -> StructureError {
    StructureError::Immutable { what }
}

// Bounds errors

#[cold]
pub fn index_out_of_bounds(index: usize, length: usize) -> StructureError {
    StructureError::IndexOutOfBounds { index, length }
}

#[cold]
pub fn range_out_of_bounds(lower: usize, upper: usize, length: usize) -> StructureError {
    StructureError::RangeOutOfBounds {
        lower,
        upper,
        length,
    }
}

// Conversion errors

#[cold]
pub fn unsupported_native<T: ?Sized>() -> StructureError {
    StructureError::UnsupportedNative {
        type_name: std::any::type_name::<T>(),
    }
}

#[cold]
pub fn invalid_encoding(encoding: &'static str, reason: impl std::fmt::Display) -> StructureError {
    StructureError::InvalidEncoding {
        encoding,
        reason: reason.to_string(),
    }
}

// Interpreter errors

#[cold]
pub fn scope_overflow(limit: usize) -> StructureError {
    StructureError::ScopeOverflow { limit }
}

#[cold]
pub fn scope_underflow() -> StructureError {
    StructureError::ScopeUnderflow
}

#[cfg(test)]
mod tests;

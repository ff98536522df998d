//! Unified error type.

use thiserror::Error;

/// The error type returned by the crate's fallible operations.
///
/// Application-level errors (401, 404, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// startup failures: a bad registration call, binding to a port, or
/// accepting a connection.
#[derive(Debug, Error)]
pub enum Error {
    /// A required argument was absent or unusable. Carries the parameter name.
    ///
    /// Raised before anything is mutated, so a failed registration never
    /// leaves a half-configured pipeline behind.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

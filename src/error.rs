//! Error types for the matching engine.

use std::io;
use thiserror::Error;

use crate::MAX_DIMENSIONS;

/// Errors produced by the matching engine and its command-line driver.
///
/// Every fallible step returns the first error it encounters; nothing is
/// retried and no partial results are reported. Each kind carries a stable
/// numeric code used as the process exit status.
#[derive(Error, Debug)]
pub enum MatchError {
    /// An error no more specific kind covers.
    #[error("an unhandled error occurred")]
    Unhandled,

    /// A generic failure in a collaborator.
    #[error("a generic error occurred")]
    Generic,

    /// Memory for a matrix, vector, or event list could not be reserved.
    #[error("an error occurred while allocating memory")]
    Allocation,

    /// Creating or writing a file failed.
    #[error("file error: {0}")]
    File(#[from] io::Error),

    /// An argument or dataset failed validation.
    #[error("bad input: {0}")]
    InvalidInput(String),

    /// The dataset declares more dimensions than the engine supports.
    #[error("the problem cannot have more than {} dimensions", MAX_DIMENSIONS)]
    TooManyDimensions,

    /// Spawning, joining, or locking inside the threaded mode failed.
    #[error("thread error: {0}")]
    Threads(String),
}

impl MatchError {
    /// Stable numeric code for this error kind; the CLI exits with it.
    pub fn exit_code(&self) -> i32 {
        match self {
            MatchError::Unhandled => 1,
            MatchError::Generic => 2,
            MatchError::Allocation => 3,
            MatchError::File(_) => 4,
            MatchError::InvalidInput(_) => 5,
            MatchError::TooManyDimensions => 6,
            MatchError::Threads(_) => 7,
        }
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;

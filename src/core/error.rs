//! Error types for the Voxen engine

use thiserror::Error;

/// Main error type for the engine
#[derive(Debug, Error)]
pub enum Error {
    #[error("allocation failed: {0}")]
    Allocation(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

//! Core error and configuration types

pub mod config;
pub mod error;

pub use config::WorldConfig;
pub use error::{Error, Result};

//! Lockdiff Core - Core library for release notes resolution
//!
//! This crate provides the foundational types, error handling and
//! configuration shared by the lockdiff changelog, sources and CLI crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{
    ConfigError, FetchError, LockdiffError, ParseError, Result, VersionError,
};
pub use types::{Ecosystem, SourceKind};

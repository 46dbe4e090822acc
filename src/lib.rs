//! Alive: a concurrent URL liveness checker
//!
//! This crate probes a catalog of registered URLs with lightweight HEAD
//! requests, classifies every response into a status record, and writes the
//! records back to a persistence backend in fixed-size pages.

pub mod catalog;
pub mod config;
pub mod persist;
pub mod pipeline;
pub mod probe;

use thiserror::Error;

/// Main error type for alive operations
#[derive(Debug, Error)]
pub enum AliveError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Load(#[from] catalog::LoadError),

    #[error("Persistence error: {0}")]
    Persist(#[from] persist::PersistError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing catalog endpoint")]
    MissingEndpoint,

    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),
}

/// Result type alias for alive operations
pub type Result<T> = std::result::Result<T, AliveError>;

// Re-export commonly used types
pub use catalog::CatalogClient;
pub use config::RunConfig;
pub use persist::{persist_all, BackendClient, PersistOutcome};
pub use pipeline::RunSummary;
pub use probe::{classify, Aggregator, ProbeOutcome, StatusRecord};

//! cassandra-stress Kubernetes Job generator
//!
//! This library resolves stress-test parameters and renders one Kubernetes
//! Job manifest per (mode, host) pair.

pub mod cli;
pub mod config;
pub mod config_file;
pub mod engine;
pub mod error;
pub mod manifest;
pub mod output;
pub mod types;

// Re-export main types for convenience
pub use config::{resolve, RawParams, ResolvedConfig};
pub use engine::generator::{generate, generate_plan, JobPlan};
pub use error::StressGenError;
pub use manifest::{HostSequence, ManifestDocument};
pub use output::{emit, join_documents};
pub use types::{ConsistencyLevel, StressCommand};

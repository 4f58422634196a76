//! Engine modules — turn a resolved configuration into ordered Job manifests.
//!
//! The engine sits between parameter resolution (what the user asked for)
//! and the output sink (where the YAML goes).

pub mod generator;

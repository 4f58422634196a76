//! Manifest Generator
//!
//! Expands a [`ResolvedConfig`] into one Job per (mode, host) pair.
//!
//! # Ordering
//!
//! Mode-major, host-minor: every job for `mode_list[0]` precedes every job
//! for `mode_list[1]`, and within a mode the hosts keep their input order.
//! Duplicate modes or hosts produce duplicate jobs.
//!
//! # Design
//!
//! - **Pure logic**: no I/O; the output sink handles persistence
//! - **Deterministic**: identical input yields byte-identical documents
//! - **Typed plan first**: [`generate_plan`] returns Job trees, [`generate`]
//!   serializes them at the boundary

use std::fmt;

use crate::config::ResolvedConfig;
use crate::error::Result;
use crate::manifest::job::Job;
use crate::manifest::{self, HostSequence, ManifestDocument};

// ============================================================================
// Plan Types
// ============================================================================

/// One planned Job and the coordinates it was generated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPlan {
    pub mode: String,
    pub host_index: usize,
    pub host: String,
    pub sequence: HostSequence,
    pub job: Job,
}

impl fmt::Display for JobPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (mode={}, host={}, seq={})",
            self.job.metadata.name, self.mode, self.host, self.sequence
        )
    }
}

// ============================================================================
// Generation
// ============================================================================

/// Build the ordered list of Job plans.
pub fn generate_plan(config: &ResolvedConfig) -> Vec<JobPlan> {
    let mut plans = Vec::with_capacity(config.job_count());

    for mode in &config.mode_list {
        for (host_index, host) in config.host_list.iter().enumerate() {
            let plan = JobPlan {
                mode: mode.clone(),
                host_index,
                host: host.clone(),
                sequence: HostSequence::for_host(host_index),
                job: manifest::build_job(config, mode, host_index),
            };
            tracing::debug!(%plan, "planned job");
            plans.push(plan);
        }
    }

    plans
}

/// Render one YAML document per (mode, host) pair, in plan order.
///
/// # Errors
///
/// Only if YAML serialization itself fails; every field of a valid
/// `ResolvedConfig` is representable.
pub fn generate(config: &ResolvedConfig) -> Result<Vec<ManifestDocument>> {
    let documents = generate_plan(config)
        .iter()
        .map(|plan| manifest::render(&plan.job))
        .collect::<Result<Vec<_>>>()?;

    tracing::info!(
        jobs = documents.len(),
        modes = config.mode_list.len(),
        hosts = config.host_list.len(),
        "generated manifests"
    );
    Ok(documents)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolve, RawParams};

    /// Helper: resolve a config for the given hosts and modes
    fn test_config(hosts: &str, mode: &str) -> ResolvedConfig {
        resolve(RawParams {
            hosts: Some(hosts.to_string()),
            mode: Some(mode.to_string()),
            password: Some("pw".to_string()),
            ..Default::default()
        })
        .expect("known-good input")
    }

    #[test]
    fn test_count_is_modes_times_hosts() {
        let config = test_config("a,b,c", "read,write");
        assert_eq!(generate(&config).expect("generate").len(), 6);
    }

    #[test]
    fn test_mode_major_host_minor_order() {
        let config = test_config("h0,h1", "read,write");
        let order: Vec<(String, String)> = generate_plan(&config)
            .into_iter()
            .map(|p| (p.mode, p.host))
            .collect();

        assert_eq!(
            order,
            vec![
                ("read".to_string(), "h0".to_string()),
                ("read".to_string(), "h1".to_string()),
                ("write".to_string(), "h0".to_string()),
                ("write".to_string(), "h1".to_string()),
            ]
        );
    }

    #[test]
    fn test_duplicate_hosts_produce_duplicate_jobs() {
        let config = test_config("a,a", "write");
        let plans = generate_plan(&config);
        assert_eq!(plans.len(), 2);
        assert!(plans.iter().all(|p| p.host == "a"));
        // index suffix keeps the names distinct
        assert_eq!(plans[0].job.metadata.name, "cassandra-stress-write-0");
        assert_eq!(plans[1].job.metadata.name, "cassandra-stress-write-1");
    }

    #[test]
    fn test_sequence_follows_host_index() {
        let config = test_config("a,b", "read,write");
        let plans = generate_plan(&config);
        assert_eq!(plans[2].sequence, HostSequence::for_host(0));
        assert_eq!(plans[3].sequence, HostSequence::for_host(1));
    }

    #[test]
    fn test_generate_is_idempotent() {
        let config = test_config("10.0.0.1,10.0.0.2", "mixed");
        assert_eq!(
            generate(&config).expect("generate"),
            generate(&config).expect("generate")
        );
    }

    #[test]
    fn test_documents_target_hosts_in_order() {
        let config = test_config("10.0.0.1,10.0.0.2", "write");
        let docs = generate(&config).expect("generate");
        assert_eq!(docs.len(), 2);

        let commands: Vec<String> = docs
            .iter()
            .map(|doc| {
                let value: serde_yaml::Value = serde_yaml::from_str(doc).expect("valid yaml");
                value["spec"]["template"]["spec"]["containers"][0]["command"][2]
                    .as_str()
                    .expect("command string")
                    .to_string()
            })
            .collect();
        assert!(commands[0].contains("-node 10.0.0.1 "));
        assert!(commands[1].contains("-node 10.0.0.2 "));
    }
}

//! Job manifest construction.
//!
//! Builds the typed Job tree for one (mode, host) pair and renders it to a
//! YAML document. The skeleton (labels, toleration, affinity, restart policy)
//! is fixed; everything else comes from the resolved configuration.

pub mod command;
pub mod job;

use std::collections::BTreeMap;

use crate::config::ResolvedConfig;
use crate::error::Result;
use crate::types::ConsistencyLevel;
use command::StressInvocation;
use job::*;

pub const APP_LABEL: &str = "cassandra-stress";
pub const CONTAINER_NAME: &str = "cassandra-stress";
pub const IMAGE_REPOSITORY: &str = "scylladb/scylla";
pub const TOLERATION_KEY: &str = "role";
pub const TOPOLOGY_KEY: &str = "kubernetes.io/hostname";
pub const AFFINITY_WEIGHT: i32 = 100;

pub const SEQUENCE_ANNOTATION: &str = "cassandra-stress/sequence";
pub const CONNECTIONS_ANNOTATION: &str = "cassandra-stress/connections-per-host";

/// Width of the legacy per-host population range
pub const SEQUENCE_STRIDE: u64 = 250_000_000;

/// Rendered YAML text of one Job
pub type ManifestDocument = String;

/// Legacy per-host sequence range `[i*stride+1, (i+1)*stride]`.
///
/// Shown as an annotation only; it is not tied to `ops`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostSequence {
    pub start: u64,
    pub end: u64,
}

impl HostSequence {
    pub fn for_host(index: usize) -> Self {
        let index = index as u64;
        Self {
            start: index * SEQUENCE_STRIDE + 1,
            end: (index + 1) * SEQUENCE_STRIDE,
        }
    }
}

impl std::fmt::Display for HostSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Job name for the given mode and host index: `<name>-<mode>-<index>`
pub fn job_name(config: &ResolvedConfig, mode: &str, host_index: usize) -> String {
    format!("{}-{}-{}", config.name, mode, host_index)
}

/// Build the Job tree for one (mode, host) pair.
pub fn build_job(config: &ResolvedConfig, mode: &str, host_index: usize) -> Job {
    let host = &config.host_list[host_index];
    let app_labels = || BTreeMap::from([("app".to_string(), APP_LABEL.to_string())]);

    let invocation = StressInvocation {
        mode,
        consistency: ConsistencyLevel::Quorum,
        username: &config.username,
        password: &config.password,
        threads: config.threads,
        throttle: config.throttle,
        host,
    };

    Job {
        api_version: API_VERSION,
        kind: KIND,
        metadata: ObjectMeta {
            name: job_name(config, mode, host_index),
            namespace: config.namespace.clone(),
            labels: app_labels(),
            annotations: BTreeMap::from([
                (
                    SEQUENCE_ANNOTATION.to_string(),
                    HostSequence::for_host(host_index).to_string(),
                ),
                (
                    CONNECTIONS_ANNOTATION.to_string(),
                    config.connections_per_host.to_string(),
                ),
            ]),
        },
        spec: JobSpec {
            parallelism: config.parallelism,
            template: PodTemplateSpec {
                spec: PodSpec {
                    containers: vec![Container {
                        name: CONTAINER_NAME.to_string(),
                        image: format!("{}:{}", IMAGE_REPOSITORY, config.scylla_version),
                        command: invocation.container_command(),
                        resources: ResourceRequirements {
                            limits: ResourceList::new(config.cpu_limit, config.memory_limit),
                            requests: ResourceList::new(u64::from(config.cpu), config.memory),
                        },
                    }],
                    restart_policy: RestartPolicy::Never,
                    node_selector: BTreeMap::new(),
                    tolerations: vec![Toleration {
                        key: TOLERATION_KEY.to_string(),
                        operator: TolerationOperator::Equal,
                        value: APP_LABEL.to_string(),
                        effect: TaintEffect::NoSchedule,
                    }],
                    affinity: Affinity {
                        pod_affinity: PodAffinity {
                            preferred_during_scheduling_ignored_during_execution: vec![
                                WeightedPodAffinityTerm {
                                    weight: AFFINITY_WEIGHT,
                                    pod_affinity_term: PodAffinityTerm {
                                        topology_key: TOPOLOGY_KEY.to_string(),
                                        label_selector: LabelSelector {
                                            match_labels: app_labels(),
                                        },
                                    },
                                },
                            ],
                        },
                    },
                },
            },
        },
    }
}

/// Serialize a Job to a YAML document without a trailing newline.
pub fn render(job: &Job) -> Result<ManifestDocument> {
    let yaml = serde_yaml::to_string(job)?;
    Ok(yaml.trim_end_matches('\n').to_string())
}

//! Typed subset of the Kubernetes `batch/v1` Job schema.
//!
//! Only the fields the generator fills in are modelled. Field names follow
//! the Kubernetes camelCase wire names via serde.

use serde::Serialize;
use std::collections::BTreeMap;

pub const API_VERSION: &str = "batch/v1";
pub const KIND: &str = "Job";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub api_version: &'static str,
    pub kind: &'static str,
    pub metadata: ObjectMeta,
    pub spec: JobSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectMeta {
    pub name: String,
    pub namespace: String,
    pub labels: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobSpec {
    pub parallelism: u32,
    pub template: PodTemplateSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PodTemplateSpec {
    pub spec: PodSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
    pub containers: Vec<Container>,
    pub restart_policy: RestartPolicy,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub node_selector: BTreeMap<String, String>,
    pub tolerations: Vec<Toleration>,
    pub affinity: Affinity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RestartPolicy {
    Never,
    OnFailure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Container {
    pub name: String,
    pub image: String,
    pub command: Vec<String>,
    pub resources: ResourceRequirements,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceRequirements {
    pub limits: ResourceList,
    pub requests: ResourceList,
}

/// CPU and memory quantities, already formatted (`"2"`, `"2048Mi"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceList {
    pub cpu: String,
    pub memory: String,
}

impl ResourceList {
    /// Whole CPUs and MiB of memory
    pub fn new(cpu: u64, memory_mib: u64) -> Self {
        Self {
            cpu: cpu.to_string(),
            memory: format!("{}Mi", memory_mib),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toleration {
    pub key: String,
    pub operator: TolerationOperator,
    pub value: String,
    pub effect: TaintEffect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TolerationOperator {
    Equal,
    Exists,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TaintEffect {
    NoSchedule,
    PreferNoSchedule,
    NoExecute,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Affinity {
    pub pod_affinity: PodAffinity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodAffinity {
    pub preferred_during_scheduling_ignored_during_execution: Vec<WeightedPodAffinityTerm>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedPodAffinityTerm {
    pub weight: i32,
    pub pod_affinity_term: PodAffinityTerm,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodAffinityTerm {
    pub topology_key: String,
    pub label_selector: LabelSelector,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    pub match_labels: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_list_formatting() {
        let list = ResourceList::new(4, 4096);
        assert_eq!(list.cpu, "4");
        assert_eq!(list.memory, "4096Mi");
    }

    #[test]
    fn test_camel_case_wire_names() {
        let term = WeightedPodAffinityTerm {
            weight: 100,
            pod_affinity_term: PodAffinityTerm {
                topology_key: "kubernetes.io/hostname".to_string(),
                label_selector: LabelSelector {
                    match_labels: BTreeMap::from([("app".to_string(), "x".to_string())]),
                },
            },
        };
        let value = serde_json::to_value(&term).expect("serialize");
        assert_eq!(
            value["podAffinityTerm"]["topologyKey"],
            "kubernetes.io/hostname"
        );
        assert_eq!(value["podAffinityTerm"]["labelSelector"]["matchLabels"]["app"], "x");
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_value(RestartPolicy::Never).unwrap(), "Never");
        assert_eq!(serde_json::to_value(TaintEffect::NoSchedule).unwrap(), "NoSchedule");
        assert_eq!(serde_json::to_value(TolerationOperator::Equal).unwrap(), "Equal");
    }
}

//! cassandra-stress command line builder.
//!
//! The rendered string is consumed by the workload unchanged, so flag names
//! and their order are part of the output contract.

use std::fmt;

use crate::types::ConsistencyLevel;

pub const STRESS_BINARY: &str = "/opt/scylladb/share/cassandra/bin/cassandra-stress";
pub const DURATION: &str = "15m";
pub const COLUMN_SPEC: &str = r#""n=FIXED(1)""#;

/// Arguments for one cassandra-stress invocation against one host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StressInvocation<'a> {
    pub mode: &'a str,
    pub consistency: ConsistencyLevel,
    pub username: &'a str,
    pub password: &'a str,
    pub threads: u64,
    pub throttle: u64,
    pub host: &'a str,
}

impl StressInvocation<'_> {
    /// Wrap the command for the container's `command:` field
    pub fn container_command(&self) -> Vec<String> {
        vec!["/bin/bash".to_string(), "-c".to_string(), self.to_string()]
    }
}

impl fmt::Display for StressInvocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{bin} {mode} cl={cl} duration={duration} -mode native user={user} password={password} cql3 \
             -rate threads={threads} throttle={throttle}/s -node {host} -col {col}",
            bin = STRESS_BINARY,
            mode = self.mode,
            cl = self.consistency,
            duration = DURATION,
            user = self.username,
            password = self.password,
            threads = self.threads,
            throttle = self.throttle,
            host = self.host,
            col = COLUMN_SPEC,
        )
    }
}

//! Parameter resolution
//!
//! Turns a partially filled [`RawParams`] into an immutable
//! [`ResolvedConfig`]. Every default and derived value is computed in one
//! pass from the raw input, so the result does not depend on the order in
//! which fields were supplied.
//!
//! # Resolution Rules
//!
//! | Field                  | When unset |
//! |------------------------|------------|
//! | `memory`               | `cpu * 1024` MiB |
//! | `threads`              | `cpu * 50` |
//! | `connections_per_host` | `cpu` |
//! | `cpu_limit`            | always `cpu * 2` |
//! | `memory_limit`         | always `memory * 2` |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::error::{Result, StressGenError};
use crate::types::StressCommand;

pub const DEFAULT_NAME: &str = "cassandra-stress";
pub const DEFAULT_MODE: &str = "write";
pub const DEFAULT_NAMESPACE: &str = "default";
pub const DEFAULT_SCYLLA_VERSION: &str = "4.2.0";
pub const DEFAULT_PROTOCOL_VERSION: u32 = 4;
pub const DEFAULT_PARALLELISM: u32 = 110;
pub const DEFAULT_USERNAME: &str = "scylla";
pub const DEFAULT_CPU: u32 = 1;
pub const DEFAULT_OPS: u64 = 50_000_000;
pub const DEFAULT_THROTTLE: u64 = 164_000;

/// MiB of memory requested per CPU when `memory` is unset
pub const MEMORY_PER_CPU_MIB: u64 = 1024;
/// Stress threads per CPU when `threads` is unset
pub const THREADS_PER_CPU: u64 = 50;
/// Limits are this multiple of the requests
pub const LIMIT_FACTOR: u64 = 2;

/// User-supplied parameters before defaulting.
///
/// `None` means "not supplied". Built from CLI flags, from a parameter
/// file, or both merged with [`RawParams::overlay`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scylla_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol_version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallelism: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Never written back out by `--save-config`
    #[serde(skip_serializing)]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ops: Option<u64>,
    /// MiB
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub throttle: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connections_per_host: Option<u64>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub print_to_stdout: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl RawParams {
    /// Layer `self` over `base`: any value set in `self` wins.
    pub fn overlay(self, base: RawParams) -> RawParams {
        RawParams {
            name: self.name.or(base.name),
            mode: self.mode.or(base.mode),
            namespace: self.namespace.or(base.namespace),
            scylla_version: self.scylla_version.or(base.scylla_version),
            protocol_version: self.protocol_version.or(base.protocol_version),
            hosts: self.hosts.or(base.hosts),
            parallelism: self.parallelism.or(base.parallelism),
            username: self.username.or(base.username),
            password: self.password.or(base.password),
            cpu: self.cpu.or(base.cpu),
            ops: self.ops.or(base.ops),
            memory: self.memory.or(base.memory),
            threads: self.threads.or(base.threads),
            throttle: self.throttle.or(base.throttle),
            connections_per_host: self.connections_per_host.or(base.connections_per_host),
            print_to_stdout: self.print_to_stdout || base.print_to_stdout,
            output_dir: self.output_dir.or(base.output_dir),
        }
    }
}

/// Fully resolved generation parameters.
///
/// Invariants: every integer is positive, `cpu_limit == 2 * cpu`,
/// `memory_limit == 2 * memory`, and both lists are non-empty with no empty
/// entries.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub name: String,
    pub namespace: String,
    pub mode_list: Vec<String>,
    pub host_list: Vec<String>,
    pub scylla_version: String,
    pub protocol_version: u32,
    pub username: String,
    pub password: String,
    pub parallelism: u32,
    pub cpu: u32,
    pub cpu_limit: u64,
    /// MiB
    pub memory: u64,
    /// MiB
    pub memory_limit: u64,
    pub threads: u64,
    pub throttle: u64,
    pub connections_per_host: u64,
    pub ops: u64,
    pub print_to_stdout: bool,
    /// Directory for `<name>.yaml`; `None` means next to the executable
    pub output_dir: Option<PathBuf>,
}

impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("name", &self.name)
            .field("namespace", &self.namespace)
            .field("mode_list", &self.mode_list)
            .field("host_list", &self.host_list)
            .field("scylla_version", &self.scylla_version)
            .field("protocol_version", &self.protocol_version)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("parallelism", &self.parallelism)
            .field("cpu", &self.cpu)
            .field("cpu_limit", &self.cpu_limit)
            .field("memory", &self.memory)
            .field("memory_limit", &self.memory_limit)
            .field("threads", &self.threads)
            .field("throttle", &self.throttle)
            .field("connections_per_host", &self.connections_per_host)
            .field("ops", &self.ops)
            .field("print_to_stdout", &self.print_to_stdout)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

impl ResolvedConfig {
    /// Number of manifests `generate` will produce.
    pub fn job_count(&self) -> usize {
        self.mode_list.len() * self.host_list.len()
    }
}

/// Resolve raw parameters into a [`ResolvedConfig`].
///
/// # Errors
///
/// - `MissingRequiredField` if `hosts` or `password` is unset
/// - `InvalidValue` if an integer is zero, a name is empty, a list has an
///   empty entry, or a derived value overflows
pub fn resolve(raw: RawParams) -> Result<ResolvedConfig> {
    let hosts = raw
        .hosts
        .ok_or(StressGenError::MissingRequiredField("hosts"))?;
    let password = raw
        .password
        .ok_or(StressGenError::MissingRequiredField("password"))?;

    let name = non_empty("name", raw.name.unwrap_or_else(|| DEFAULT_NAME.to_string()))?;
    let namespace = non_empty(
        "namespace",
        raw.namespace.unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
    )?;
    let mode_list = split_list("mode", raw.mode.as_deref().unwrap_or(DEFAULT_MODE))?;
    let host_list = split_list("hosts", &hosts)?;

    let cpu = positive("cpu", raw.cpu.unwrap_or(DEFAULT_CPU))?;
    let cpu_wide = u64::from(cpu);
    let memory = match raw.memory {
        Some(memory) => positive("memory", memory)?,
        None => cpu_wide * MEMORY_PER_CPU_MIB,
    };
    let threads = match raw.threads {
        Some(threads) => positive("threads", threads)?,
        None => cpu_wide * THREADS_PER_CPU,
    };
    let connections_per_host = match raw.connections_per_host {
        Some(connections) => positive("connections-per-host", connections)?,
        None => cpu_wide,
    };
    let cpu_limit = cpu_wide * LIMIT_FACTOR;
    let memory_limit = memory
        .checked_mul(LIMIT_FACTOR)
        .ok_or_else(|| StressGenError::invalid("memory", "limit overflows (2 * memory)"))?;

    for mode in &mode_list {
        if StressCommand::from_mode(mode).is_none() {
            tracing::warn!(mode = %mode, "unrecognized cassandra-stress mode, passing through");
        }
    }

    let config = ResolvedConfig {
        name,
        namespace,
        mode_list,
        host_list,
        scylla_version: raw
            .scylla_version
            .unwrap_or_else(|| DEFAULT_SCYLLA_VERSION.to_string()),
        protocol_version: positive(
            "protocol-version",
            raw.protocol_version.unwrap_or(DEFAULT_PROTOCOL_VERSION),
        )?,
        username: raw.username.unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
        password,
        parallelism: positive("parallelism", raw.parallelism.unwrap_or(DEFAULT_PARALLELISM))?,
        cpu,
        cpu_limit,
        memory,
        memory_limit,
        threads,
        throttle: positive("throttle", raw.throttle.unwrap_or(DEFAULT_THROTTLE))?,
        connections_per_host,
        ops: positive("ops", raw.ops.unwrap_or(DEFAULT_OPS))?,
        print_to_stdout: raw.print_to_stdout,
        output_dir: raw.output_dir,
    };

    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

/// Split a comma-delimited list without trimming or deduplicating.
fn split_list(field: &'static str, s: &str) -> Result<Vec<String>> {
    let items: Vec<String> = s.split(',').map(str::to_string).collect();
    if let Some(pos) = items.iter().position(|item| item.is_empty()) {
        return Err(StressGenError::invalid(
            field,
            format!("entry {} of '{}' is empty", pos + 1, s),
        ));
    }
    Ok(items)
}

fn non_empty(field: &'static str, value: String) -> Result<String> {
    if value.is_empty() {
        return Err(StressGenError::invalid(field, "must not be empty"));
    }
    Ok(value)
}

fn positive<T>(field: &'static str, value: T) -> Result<T>
where
    T: PartialEq + Default,
{
    if value == T::default() {
        return Err(StressGenError::invalid(field, "must be a positive integer"));
    }
    Ok(value)
}

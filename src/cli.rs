use clap::Parser;
use std::path::PathBuf;

use crate::config::RawParams;

/// Generate cassandra-stress job manifests for Kubernetes.
///
/// One Job is created for every combination of mode and host.
#[derive(Debug, Parser)]
#[command(name = "cassandra-stress-k8s")]
#[command(version)]
pub struct Cli {
    /// Name of the generated yaml file and prefix of the job names [default: cassandra-stress]
    #[arg(long)]
    pub name: Option<String>,

    /// Comma delimited modes to run: read, write, mixed. For read,write
    /// consider halving the parallelism to retain the workload [default: write]
    #[arg(long)]
    pub mode: Option<String>,

    /// Namespace of the cassandra-stress jobs [default: default]
    #[arg(long)]
    pub namespace: Option<String>,

    /// Version of the scylla image that provides cassandra-stress [default: 4.2.0]
    #[arg(long)]
    pub scylla_version: Option<String>,

    /// CQL native protocol version [default: 4]
    #[arg(long)]
    pub protocol_version: Option<u32>,

    /// Comma delimited list of IPs or DNS names to connect to; a job is
    /// created for each host
    #[arg(long, required_unless_present = "config")]
    pub hosts: Option<String>,

    /// Parallelism of each job [default: 110]
    #[arg(long)]
    pub parallelism: Option<u32>,

    /// CQL username for the cluster [default: scylla]
    #[arg(long)]
    pub username: Option<String>,

    /// CQL password for the cluster
    #[arg(long, required_unless_present = "config")]
    pub password: Option<String>,

    /// Number of CPUs requested by each job [default: 1]
    #[arg(long)]
    pub cpu: Option<u32>,

    /// Number of operations for each job [default: 50000000]
    #[arg(long)]
    pub ops: Option<u64>,

    /// Memory requested by each job in MiB [default: 1024 * cpu]
    #[arg(long)]
    pub memory: Option<u64>,

    /// Number of stress threads in each job [default: 50 * cpu]
    #[arg(long)]
    pub threads: Option<u64>,

    /// Throttle in requests per second for each job [default: 164000]
    #[arg(long)]
    pub throttle: Option<u64>,

    /// Number of connections per host [default: cpu]
    #[arg(long)]
    pub connections_per_host: Option<u64>,

    /// Print to stdout instead of writing to a file
    #[arg(long)]
    pub print_to_stdout: bool,

    /// Directory to write <name>.yaml into [default: directory of this executable]
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// JSON parameter file; flags given on the command line take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Save the merged parameters (without the password) to a JSON file
    #[arg(long)]
    pub save_config: Option<PathBuf>,
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }

    /// Parameters given on the command line, without defaults applied
    pub fn params(&self) -> RawParams {
        RawParams {
            name: self.name.clone(),
            mode: self.mode.clone(),
            namespace: self.namespace.clone(),
            scylla_version: self.scylla_version.clone(),
            protocol_version: self.protocol_version,
            hosts: self.hosts.clone(),
            parallelism: self.parallelism,
            username: self.username.clone(),
            password: self.password.clone(),
            cpu: self.cpu,
            ops: self.ops,
            memory: self.memory,
            threads: self.threads,
            throttle: self.throttle,
            connections_per_host: self.connections_per_host,
            print_to_stdout: self.print_to_stdout,
            output_dir: self.output_dir.clone(),
        }
    }
}

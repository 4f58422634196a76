//! Type-safe vocabulary for the stress workload
//!
//! Mode tokens stay strings on the wire (they are passed to cassandra-stress
//! verbatim), but known commands are modelled as an enum so the resolver can
//! flag typos without rejecting tokens newer tool versions may accept.

use strum::{Display, EnumIter, EnumString};

/// cassandra-stress commands that produce load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum StressCommand {
    Write,
    Read,
    Mixed,
    CounterWrite,
    CounterRead,
    User,
}

impl StressCommand {
    /// Look up a mode token, returning `None` for unrecognized commands
    pub fn from_mode(mode: &str) -> Option<Self> {
        mode.parse().ok()
    }
}

/// Consistency level passed as `cl=` on the stress command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[derive(Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsistencyLevel {
    One,
    #[default]
    Quorum,
    LocalQuorum,
    All,
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("quantum must be > 0 (got {0})")]
    InvalidQuantum(u64),
    #[error("mlfq requires at least one queue quantum")]
    EmptyQuantums,
    #[error("quantum for queue {level} must be > 0 (got {value})")]
    InvalidQueueQuantum { level: usize, value: u64 },
    #[error("process ids must not be empty")]
    EmptyProcessId,
    #[error("processes must not contain empty entries")]
    EmptyProcessEntry,
    #[error("duplicate process id '{0}'")]
    DuplicateProcessId(String),
    #[error("invalid process entry '{0}': expected [id:]arrival:burst[:priority]")]
    InvalidProcessEntry(String),
    #[error("invalid arrival time in '{0}'")]
    InvalidArrival(String),
    #[error("invalid burst time in '{0}'")]
    InvalidBurst(String),
    #[error("burst time must be > 0 for process '{0}'")]
    InvalidBurstValue(String),
    #[error("invalid priority in '{0}'")]
    InvalidPriority(String),
    #[error("workload does not fit the simulated clock: last arrival plus total burst exceeds u64")]
    WorkloadOverflow,
    #[error("invalid random workload: {0}")]
    InvalidRandomProfile(String),
    #[error("algorithm must be set with --algo or in the config file")]
    MissingAlgorithm,
    #[error("{0}")]
    ConfigIo(String),
    #[error("{0}")]
    ConfigParse(String),
    #[error("unsupported config format '{0}'")]
    UnsupportedConfigFormat(String),
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("{0}")]
    Cli(String),
}

pub type Result<T> = std::result::Result<T, Error>;

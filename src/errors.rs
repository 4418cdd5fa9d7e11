use thiserror::Error;

/// Errors surfaced during startup. The simulation kernel has no recoverable
/// runtime errors once a generation is running (§7); everything here is an
/// initialisation-time failure.
#[derive(Error, Debug)]
pub enum KernelError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("population size must be non-zero")]
    EmptyPopulation,
}

pub type KernelResult<T> = Result<T, KernelError>;

use core::fmt;
use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Index {index} does not fit in a 32-bit id")]
    IdOverflow { index: usize },
}

/// Error taxonomy surfaced at the boundary to callers.
///
/// Every crate error maps onto exactly one kind so a front end can decide
/// whether to adjust inputs or retry with different solver parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed grid, radius, resistance bounds, intensity or boundary ids.
    Construction,
    /// A free node has no path to a fixed node; the system is singular.
    DegenerateNetwork,
    /// Iterative solve ran out of budget. Retry with other parameters.
    Convergence,
    /// Assembler inputs do not belong together.
    Consistency,
    /// Cooperative cancellation or timeout.
    Cancelled,
    /// Invalid run configuration.
    Config,
    /// File system or serialization failure.
    Io,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Construction => "ConstructionError",
            ErrorKind::DegenerateNetwork => "DegenerateNetworkError",
            ErrorKind::Convergence => "ConvergenceError",
            ErrorKind::Consistency => "ConsistencyError",
            ErrorKind::Cancelled => "Cancelled",
            ErrorKind::Config => "ConfigError",
            ErrorKind::Io => "IoError",
        }
    }

    /// Whether retrying with different solver parameters can help.
    pub fn is_retryable(self) -> bool {
        matches!(self, ErrorKind::Convergence | ErrorKind::Cancelled)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Construction
    }
}

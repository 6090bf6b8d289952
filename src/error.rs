// error.rs - Error taxonomy for the scan core

use std::error::Error;
use std::fmt;

/// Largest lattice side length accepted before the allocation is refused.
pub const MAX_LATTICE_SIZE: usize = 4096;
/// Largest thermalization or measurement sweep count per chain.
pub const MAX_SWEEPS: usize = 10_000_000;
/// Largest bootstrap replica count.
pub const MAX_REPLICAS: usize = 10_000_000;

/// Everything the core can report to its caller.
///
/// `Config` and `Resource` are caller mistakes caught before any simulation
/// or resampling work starts; `Domain` is a genuine numerical degeneracy
/// observed mid-computation. None of them is transient, so no caller should
/// retry with unchanged inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// Invalid parameter value (lattice too small, negative beta, ...).
    Config(String),
    /// Degenerate statistic evaluation (empty series, zero second moment).
    Domain(String),
    /// An implementation limit was exceeded; reported, never truncated.
    Resource(String),
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::Config(msg) => write!(f, "configuration error: {msg}"),
            ScanError::Domain(msg) => write!(f, "domain error: {msg}"),
            ScanError::Resource(msg) => write!(f, "resource limit exceeded: {msg}"),
        }
    }
}

impl Error for ScanError {}

// chain.rs - Drive one Markov chain through thermalization and measurement

use crate::error::{ScanError, MAX_LATTICE_SIZE, MAX_SWEEPS};
use crate::lattice::{Lattice, SpinInit};
use rand::Rng;

/// Immutable, validated parameters of one chain run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParameters {
    pub l: usize,
    pub beta: f64,
    pub therma_sweeps: usize,
    pub measure_sweeps: usize,
    pub init: SpinInit,
}

impl SimulationParameters {
    /// Validate once at construction; the sampler trusts these values.
    pub fn new(
        l: usize,
        beta: f64,
        therma_sweeps: usize,
        measure_sweeps: usize,
        init: SpinInit,
    ) -> Result<Self, ScanError> {
        if l < 2 {
            return Err(ScanError::Config(format!(
                "lattice size must be at least 2, got {l}"
            )));
        }
        if l > MAX_LATTICE_SIZE {
            return Err(ScanError::Resource(format!(
                "lattice size {l} exceeds maximum {MAX_LATTICE_SIZE}"
            )));
        }
        if !beta.is_finite() || beta < 0.0 {
            return Err(ScanError::Config(format!(
                "inverse temperature must be finite and non-negative, got {beta}"
            )));
        }
        if measure_sweeps == 0 {
            return Err(ScanError::Config(
                "measurement sweep count must be at least 1".into(),
            ));
        }
        if therma_sweeps > MAX_SWEEPS || measure_sweeps > MAX_SWEEPS {
            return Err(ScanError::Resource(format!(
                "sweep counts ({therma_sweeps} therma, {measure_sweeps} measure) \
                 exceed maximum {MAX_SWEEPS}"
            )));
        }

        Ok(Self {
            l,
            beta,
            therma_sweeps,
            measure_sweeps,
            init,
        })
    }
}

/// Output of one chain run. The caller owns the series outright.
#[derive(Debug, Clone)]
pub struct ChainRun {
    /// |m| recorded after each measurement sweep; length = `measure_sweeps`.
    pub samples: Vec<f64>,
    /// Mean flip acceptance rate over the measurement phase.
    pub acceptance: f64,
}

/// Run one chain: discard `therma_sweeps` sweeps, then record |m| after each
/// of `measure_sweeps` further sweeps. Successive samples are serially
/// correlated; downstream estimators must not assume independence.
pub fn run_chain(params: &SimulationParameters, rng: &mut impl Rng) -> Result<ChainRun, ScanError> {
    let mut lattice = Lattice::new(params.l, params.init, rng)?;

    for _ in 0..params.therma_sweeps {
        lattice.metropolis_sweep(params.beta, rng);
    }

    let mut samples = Vec::with_capacity(params.measure_sweeps);
    let mut accepted_total = 0usize;
    for _ in 0..params.measure_sweeps {
        accepted_total += lattice.metropolis_sweep(params.beta, rng);
        samples.push(lattice.abs_magnetization());
    }

    let proposals = params.measure_sweeps * lattice.n_sites();
    let acceptance = accepted_total as f64 / proposals as f64;

    Ok(ChainRun {
        samples,
        acceptance,
    })
}

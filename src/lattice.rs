// lattice.rs - 2D Ising lattice with single-spin-flip Metropolis dynamics

use crate::error::{ScanError, MAX_LATTICE_SIZE};
use rand::Rng;

/// Initial spin configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinInit {
    /// All spins +1 (ordered start).
    Cold,
    /// Each spin independently ±1 with equal probability.
    Hot,
}

/// A periodic L×L lattice of ±1 spins, mutated in place by Metropolis sweeps.
///
/// The lattice owns no generator state: every randomized operation takes a
/// caller-supplied RNG so that independent chains never share a stream.
#[derive(Debug, Clone)]
pub struct Lattice {
    l: usize,
    spins: Vec<i8>,
}

impl Lattice {
    /// Allocate an `l × l` lattice in the requested configuration.
    pub fn new(l: usize, init: SpinInit, rng: &mut impl Rng) -> Result<Self, ScanError> {
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

        let spins = match init {
            SpinInit::Cold => vec![1i8; l * l],
            SpinInit::Hot => (0..l * l)
                .map(|_| if rng.gen::<bool>() { 1 } else { -1 })
                .collect(),
        };

        Ok(Self { l, spins })
    }

    /// Side length L.
    #[inline(always)]
    pub fn l(&self) -> usize {
        self.l
    }

    /// Number of sites L².
    #[inline(always)]
    pub fn n_sites(&self) -> usize {
        self.spins.len()
    }

    /// Spin at (row, col), no wrapping.
    #[inline(always)]
    pub fn spin(&self, row: usize, col: usize) -> i8 {
        self.spins[row * self.l + col]
    }

    /// Sum of the four periodic nearest neighbors of (row, col).
    #[inline]
    fn neighbor_sum(&self, row: usize, col: usize) -> i32 {
        let l = self.l;
        let up = if row == 0 { l - 1 } else { row - 1 };
        let down = if row + 1 == l { 0 } else { row + 1 };
        let left = if col == 0 { l - 1 } else { col - 1 };
        let right = if col + 1 == l { 0 } else { col + 1 };

        self.spins[up * l + col] as i32
            + self.spins[down * l + col] as i32
            + self.spins[row * l + left] as i32
            + self.spins[row * l + right] as i32
    }

    /// One Metropolis sweep at inverse temperature `beta`: every site is
    /// visited exactly once in row-major order, a flip is proposed with
    /// ΔE = 2·s·(Σ neighbors) (J = 1), and accepted with probability
    /// min(1, exp(−β·ΔE)). Returns the number of accepted flips.
    pub fn metropolis_sweep(&mut self, beta: f64, rng: &mut impl Rng) -> usize {
        let l = self.l;
        let mut accepted = 0usize;

        for row in 0..l {
            for col in 0..l {
                let s = self.spins[row * l + col] as i32;
                let delta_e = 2.0 * (s * self.neighbor_sum(row, col)) as f64;

                let accept = delta_e <= 0.0 || rng.gen::<f64>() < (-beta * delta_e).exp();
                if accept {
                    self.spins[row * l + col] = -self.spins[row * l + col];
                    accepted += 1;
                }
            }
        }

        accepted
    }

    /// Signed normalized magnetization m = (1/L²)·Σ s_i.
    pub fn magnetization(&self) -> f64 {
        let sum: i64 = self.spins.iter().map(|&s| s as i64).sum();
        sum as f64 / self.n_sites() as f64
    }

    /// |m|, the order parameter recorded by the sampler.
    pub fn abs_magnetization(&self) -> f64 {
        self.magnetization().abs()
    }
}

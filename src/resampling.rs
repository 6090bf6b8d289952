// resampling.rs - Bootstrap and jackknife error estimation for nonlinear statistics

use crate::error::{ScanError, MAX_REPLICAS};
use crate::statistic::Statistic;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::Normal;

/// Resampling procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Bootstrap,
    Jackknife,
}

/// How a bootstrap replica weights the points it draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightMode {
    /// Classic bootstrap: each drawn point counts once.
    Uniform,
    /// Each drawn point carries a Normal(1, 1) weight, clamped at zero,
    /// and the statistic is evaluated on the weighted moments.
    Gaussian,
}

/// Immutable description of one resampling run, validated at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResamplingPlan {
    method: Method,
    /// Bootstrap replica count K.
    replicas: usize,
    /// Points drawn per bootstrap replica N.
    points: usize,
    weight_mode: WeightMode,
    /// Jackknife leave-out block length (1 = classic leave-one-out).
    block_len: usize,
    /// Bias-corrected point estimate instead of the plain replicate mean.
    bias_correction: bool,
}

impl ResamplingPlan {
    /// Bootstrap plan with `replicas` replicas of `points` draws each.
    pub fn bootstrap(
        replicas: usize,
        points: usize,
        weight_mode: WeightMode,
    ) -> Result<Self, ScanError> {
        if replicas < 2 {
            return Err(ScanError::Config(format!(
                "bootstrap needs at least 2 replicas, got {replicas}"
            )));
        }
        if replicas > MAX_REPLICAS {
            return Err(ScanError::Resource(format!(
                "bootstrap replica count {replicas} exceeds maximum {MAX_REPLICAS}"
            )));
        }
        if points < 1 {
            return Err(ScanError::Config(
                "bootstrap needs at least 1 point per replica".into(),
            ));
        }
        Ok(Self {
            method: Method::Bootstrap,
            replicas,
            points,
            weight_mode,
            block_len: 1,
            bias_correction: false,
        })
    }

    /// Block-jackknife plan; `block_len` = 1 is the classic leave-one-out.
    /// Blocks longer than one sample absorb serial correlation in the chain.
    pub fn jackknife(block_len: usize) -> Result<Self, ScanError> {
        if block_len < 1 {
            return Err(ScanError::Config(
                "jackknife block length must be at least 1".into(),
            ));
        }
        Ok(Self {
            method: Method::Jackknife,
            replicas: 0,
            points: 0,
            weight_mode: WeightMode::Uniform,
            block_len,
            bias_correction: false,
        })
    }

    /// Replace the plain replicate-mean point estimate with the standard
    /// bias-corrected one (see `estimate`). Off by default.
    pub fn with_bias_correction(mut self, enabled: bool) -> Self {
        self.bias_correction = enabled;
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }
}

/// Point estimate and standard error; owns nothing of its inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub value: f64,
    pub std_error: f64,
}

/// Estimate `statistic` over `samples` with the procedure in `plan`.
///
/// Bootstrap: K replicas each draw N points with replacement; the point
/// estimate is the mean of the replicate values θ*_k (with bias correction:
/// 2·θ(full) − mean θ*_k), the standard error their sample standard
/// deviation. Jackknife: leave-one-block-out recomputation, point estimate
/// θ̄ = mean of the leave-out values (with bias correction:
/// g·θ(full) − (g−1)·θ̄), SE² = ((g−1)/g)·Σ(θ_(i) − θ̄)². The jackknife
/// path is deterministic and never touches `rng`.
pub fn estimate<S: Statistic>(
    samples: &[f64],
    statistic: &S,
    plan: &ResamplingPlan,
    rng: &mut impl Rng,
) -> Result<Estimate, ScanError> {
    if samples.is_empty() {
        return Err(ScanError::Domain(
            "cannot resample an empty sample series".into(),
        ));
    }

    match plan.method {
        Method::Bootstrap => bootstrap(samples, statistic, plan, rng),
        Method::Jackknife => jackknife(samples, statistic, plan),
    }
}

fn bootstrap<S: Statistic>(
    samples: &[f64],
    statistic: &S,
    plan: &ResamplingPlan,
    rng: &mut impl Rng,
) -> Result<Estimate, ScanError> {
    let index = Uniform::new(0, samples.len());
    // Unit-mean weights for the Gaussian mode; negative draws clamp to zero.
    let weight = Normal::<f64>::new(1.0, 1.0).expect("valid normal parameters");

    let mut replicates = Vec::with_capacity(plan.replicas);
    let mut resample = Vec::with_capacity(plan.points);
    let mut weights = Vec::with_capacity(plan.points);

    for k in 0..plan.replicas {
        resample.clear();
        for _ in 0..plan.points {
            resample.push(samples[index.sample(rng)]);
        }

        let theta = match plan.weight_mode {
            WeightMode::Uniform => statistic.evaluate(&resample),
            WeightMode::Gaussian => {
                weights.clear();
                for _ in 0..plan.points {
                    weights.push(weight.sample(rng).max(0.0));
                }
                statistic.evaluate_weighted(&resample, &weights)
            }
        };
        replicates.push(theta.map_err(|e| in_replica(e, k))?);
    }

    let k = plan.replicas as f64;
    let mean = replicates.iter().sum::<f64>() / k;
    let var = replicates
        .iter()
        .map(|&t| (t - mean).powi(2))
        .sum::<f64>()
        / (k - 1.0);

    let value = if plan.bias_correction {
        2.0 * statistic.evaluate(samples)? - mean
    } else {
        mean
    };

    Ok(Estimate {
        value,
        std_error: var.sqrt(),
    })
}

fn jackknife<S: Statistic>(
    samples: &[f64],
    statistic: &S,
    plan: &ResamplingPlan,
) -> Result<Estimate, ScanError> {
    let n = samples.len();
    let groups = n / plan.block_len;
    if groups < 2 {
        return Err(ScanError::Config(format!(
            "jackknife needs at least 2 leave-out groups; \
             {n} samples with block length {} give {groups}",
            plan.block_len
        )));
    }

    let mut leave_out = Vec::with_capacity(groups);
    let mut subsample = Vec::with_capacity(n);

    for i in 0..groups {
        let start = i * plan.block_len;
        // The trailing remainder folds into the last block.
        let end = if i + 1 == groups {
            n
        } else {
            start + plan.block_len
        };

        subsample.clear();
        subsample.extend_from_slice(&samples[..start]);
        subsample.extend_from_slice(&samples[end..]);

        let theta = statistic
            .evaluate(&subsample)
            .map_err(|e| in_group(e, i))?;
        leave_out.push(theta);
    }

    let g = groups as f64;
    let theta_bar = leave_out.iter().sum::<f64>() / g;
    let var = leave_out
        .iter()
        .map(|&t| (t - theta_bar).powi(2))
        .sum::<f64>()
        * (g - 1.0)
        / g;

    let value = if plan.bias_correction {
        g * statistic.evaluate(samples)? - (g - 1.0) * theta_bar
    } else {
        theta_bar
    };

    Ok(Estimate {
        value,
        std_error: var.sqrt(),
    })
}

fn in_replica(err: ScanError, k: usize) -> ScanError {
    match err {
        ScanError::Domain(msg) => ScanError::Domain(format!("{msg} (bootstrap replica {k})")),
        other => other,
    }
}

fn in_group(err: ScanError, i: usize) -> ScanError {
    match err {
        ScanError::Domain(msg) => ScanError::Domain(format!("{msg} (jackknife group {i})")),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistic::SampleMean;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn bootstrap_plan_rejects_bad_counts() {
        assert!(matches!(
            ResamplingPlan::bootstrap(1, 100, WeightMode::Uniform),
            Err(ScanError::Config(_))
        ));
        assert!(matches!(
            ResamplingPlan::bootstrap(100, 0, WeightMode::Uniform),
            Err(ScanError::Config(_))
        ));
        assert!(matches!(
            ResamplingPlan::bootstrap(MAX_REPLICAS + 1, 100, WeightMode::Uniform),
            Err(ScanError::Resource(_))
        ));
    }

    #[test]
    fn jackknife_needs_two_groups() {
        let plan = ResamplingPlan::jackknife(10).unwrap();
        let samples = vec![1.0; 15]; // 15 / 10 = 1 group
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        assert!(matches!(
            estimate(&samples, &SampleMean, &plan, &mut rng),
            Err(ScanError::Config(_))
        ));
    }

    #[test]
    fn empty_series_rejected_before_any_work() {
        let plan = ResamplingPlan::bootstrap(10, 10, WeightMode::Uniform).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        assert!(matches!(
            estimate(&[], &SampleMean, &plan, &mut rng),
            Err(ScanError::Domain(_))
        ));
    }

    #[test]
    fn jackknife_of_mean_matches_closed_form() {
        // For the sample mean the leave-one-out average equals the full
        // mean and SE² = ((n−1)/n)·Σ(θ_(i) − θ̄)² reduces to s²/n.
        let samples = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let plan = ResamplingPlan::jackknife(1).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let est = estimate(&samples, &SampleMean, &plan, &mut rng).unwrap();

        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let s2 = samples.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);

        assert!((est.value - mean).abs() < 1e-12);
        assert!((est.std_error - (s2 / n).sqrt()).abs() < 1e-12);
    }
}

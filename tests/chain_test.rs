//! Chain sampler: phase separation, series length, determinism, and the
//! beta = 0 closed form of the Binder cumulant.

use binder_scan::chain::{run_chain, SimulationParameters};
use binder_scan::lattice::SpinInit;
use binder_scan::resampling::{estimate, ResamplingPlan, WeightMode};
use binder_scan::statistic::{Binder, Statistic};

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

#[test]
fn test_series_length_matches_measure_sweeps() {
    let params = SimulationParameters::new(8, 0.44, 50, 321, SpinInit::Cold).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let run = run_chain(&params, &mut rng).unwrap();
    assert_eq!(run.samples.len(), 321);
    assert!(run.samples.iter().all(|&m| (0.0..=1.0).contains(&m)));
}

#[test]
fn test_run_is_deterministic_for_fixed_seed() {
    let params = SimulationParameters::new(8, 0.42, 100, 200, SpinInit::Hot).unwrap();

    let mut rng_a = ChaCha20Rng::seed_from_u64(99);
    let mut rng_b = ChaCha20Rng::seed_from_u64(99);
    let run_a = run_chain(&params, &mut rng_a).unwrap();
    let run_b = run_chain(&params, &mut rng_b).unwrap();

    assert_eq!(run_a.samples, run_b.samples);
    assert_eq!(run_a.acceptance, run_b.acceptance);
}

#[test]
fn test_beta_zero_end_to_end_hits_two_thirds() {
    // At beta = 0 every proposal is accepted, so one sweep negates the whole
    // lattice and |m| is invariant sweep to sweep. The series is constant,
    // for which U = 2/3 exactly, and the bootstrap must agree within 2 sigma
    // (its replicate spread collapses for a constant series).
    let params = SimulationParameters::new(4, 0.0, 0, 20_000, SpinInit::Hot).unwrap();

    // A perfectly balanced hot start (|m| = 0) makes the cumulant undefined,
    // so pick the first seed whose start is unbalanced. Still deterministic.
    let (mut rng, run) = (0u64..)
        .find_map(|seed| {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let run = run_chain(&params, &mut rng).unwrap();
            (run.samples[0] > 0.0).then_some((rng, run))
        })
        .unwrap();

    let u = Binder.evaluate(&run.samples).unwrap();
    assert!((u - 2.0 / 3.0).abs() < 1e-12, "U = {u}");

    let plan = ResamplingPlan::bootstrap(200, 1000, WeightMode::Uniform).unwrap();
    let est = estimate(&run.samples, &Binder, &plan, &mut rng).unwrap();
    assert!(
        (est.value - 2.0 / 3.0).abs() <= 2.0 * est.std_error.max(1e-12),
        "estimate {} +- {} misses 2/3",
        est.value,
        est.std_error
    );
}

#[test]
fn test_acceptance_rate_is_one_at_beta_zero() {
    let params = SimulationParameters::new(8, 0.0, 10, 50, SpinInit::Cold).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(2);
    let run = run_chain(&params, &mut rng).unwrap();
    assert_eq!(run.acceptance, 1.0);
}

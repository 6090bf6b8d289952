// src/bin/binder_scan.rs - Binder-cumulant sweep over lattice sizes and temperatures

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use csv::WriterBuilder;
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;

use binder_scan::autocorr::{integrated_autocorr_time, suggested_block_len};
use binder_scan::chain::{run_chain, SimulationParameters};
use binder_scan::error::ScanError;
use binder_scan::fss::crossing_beta;
use binder_scan::lattice::SpinInit;
use binder_scan::resampling::{estimate, Estimate, ResamplingPlan, WeightMode};
use binder_scan::statistic::Binder;

#[derive(Clone, Copy, ValueEnum)]
enum StartArg {
    Cold,
    Hot,
}

#[derive(Clone, Copy, ValueEnum)]
enum MethodArg {
    Bootstrap,
    Jackknife,
}

#[derive(Clone, Copy, ValueEnum)]
enum DistributionArg {
    Uniform,
    Gaussian,
}

#[derive(Parser)]
#[command(about = "Binder cumulants of the 2D Ising model with resampled errors")]
struct Cli {
    /// Lattice sizes to scan
    #[arg(long, short = 'L', default_value = "32,64", value_delimiter = ',')]
    sizes: Vec<usize>,

    /// Center of the inverse-temperature window
    #[arg(long, default_value = "0.44")]
    beta_center: f64,

    /// Full width of the inverse-temperature window
    #[arg(long, short = 'i', default_value = "0.1")]
    beta_interval: f64,

    /// Number of evenly spaced beta values
    #[arg(long, short = 'B', default_value = "4")]
    n_beta: usize,

    /// Thermalization sweeps (discarded)
    #[arg(long, short = 't', default_value = "1000")]
    therma: usize,

    /// Measurement sweeps
    #[arg(long, short = 'n', default_value = "1000")]
    sweeps: usize,

    /// Initial spin configuration
    #[arg(long, short = 's', value_enum, default_value = "cold")]
    start: StartArg,

    /// Resampling method
    #[arg(long, short = 'm', value_enum, default_value = "bootstrap")]
    method: MethodArg,

    /// Bootstrap replica count K
    #[arg(long, short = 'k', default_value = "5000")]
    replicas: usize,

    /// Points drawn per bootstrap replica N
    #[arg(long, short = 'p', default_value = "1000")]
    points: usize,

    /// Bootstrap resampling-weight distribution
    #[arg(long, short = 'd', value_enum, default_value = "gaussian")]
    distribution: DistributionArg,

    /// Jackknife block length; 0 picks it from the autocorrelation time
    #[arg(long, default_value = "0")]
    block_len: usize,

    /// Bias-corrected point estimates
    #[arg(long)]
    bias_correction: bool,

    /// Master seed; every (L, beta) chain derives its own stream from it
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Optional CSV output path
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

struct ResultRow {
    l: usize,
    beta: f64,
    binder: f64,
    std_error: f64,
    acceptance: f64,
    tau_int: f64,
}

fn beta_grid(center: f64, interval: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![center];
    }
    let lo = center - interval / 2.0;
    let step = interval / (n - 1) as f64;
    (0..n).map(|i| lo + step * i as f64).collect()
}

fn run_point(args: &Cli, l: usize, beta: f64, seed: u64) -> Result<ResultRow, ScanError> {
    let init = match args.start {
        StartArg::Cold => SpinInit::Cold,
        StartArg::Hot => SpinInit::Hot,
    };
    let params = SimulationParameters::new(l, beta, args.therma, args.sweeps, init)?;

    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let run = run_chain(&params, &mut rng)?;
    let tau_int = integrated_autocorr_time(&run.samples);

    let plan = match args.method {
        MethodArg::Bootstrap => {
            let mode = match args.distribution {
                DistributionArg::Uniform => WeightMode::Uniform,
                DistributionArg::Gaussian => WeightMode::Gaussian,
            };
            ResamplingPlan::bootstrap(args.replicas, args.points, mode)?
        }
        MethodArg::Jackknife => {
            let block = if args.block_len == 0 {
                suggested_block_len(&run.samples)
            } else {
                args.block_len
            };
            ResamplingPlan::jackknife(block)?
        }
    }
    .with_bias_correction(args.bias_correction);

    let Estimate { value, std_error } = estimate(&run.samples, &Binder, &plan, &mut rng)?;

    Ok(ResultRow {
        l,
        beta,
        binder: value,
        std_error,
        acceptance: run.acceptance,
        tau_int,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    let betas = beta_grid(args.beta_center, args.beta_interval, args.n_beta);
    let points: Vec<(usize, f64)> = args
        .sizes
        .iter()
        .flat_map(|&l| betas.iter().map(move |&b| (l, b)))
        .collect();

    println!(
        "Binder scan: {} sizes x {} betas, {} therma + {} measure sweeps per chain",
        args.sizes.len(),
        betas.len(),
        args.therma,
        args.sweeps
    );

    let bar = ProgressBar::new(points.len() as u64);
    bar.set_style(ProgressStyle::with_template(
        " {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}]",
    )?);

    // Chains for different (L, beta) points are independent; each derives
    // its own seed so parallel order never changes the result.
    let outcomes: Vec<(usize, f64, Result<ResultRow, ScanError>)> = points
        .par_iter()
        .enumerate()
        .map(|(idx, &(l, beta))| {
            let seed = args.seed ^ ((idx as u64) << 32) ^ l as u64;
            let outcome = run_point(&args, l, beta, seed);
            bar.inc(1);
            (l, beta, outcome)
        })
        .collect();

    bar.finish();

    let mut rows = Vec::new();
    for (l, beta, outcome) in outcomes {
        match outcome {
            Ok(row) => rows.push(row),
            // Report the failing point and keep scanning.
            Err(err) => eprintln!("point (L={l}, beta={beta:.4}) failed: {err}"),
        }
    }
    rows.sort_by(|a, b| {
        a.l.cmp(&b.l)
            .then(a.beta.partial_cmp(&b.beta).expect("finite beta"))
    });

    println!(
        "\n{:>5} {:>9} {:>12} {:>12} {:>10} {:>8}",
        "L", "beta", "binder", "std_err", "accept", "tau_int"
    );
    for r in &rows {
        println!(
            "{:>5} {:>9.4} {:>12.6} {:>12.6} {:>10.4} {:>8.2}",
            r.l, r.beta, r.binder, r.std_error, r.acceptance, r.tau_int
        );
    }

    if let Some(path) = &args.output {
        let mut wtr = WriterBuilder::new().from_path(path)?;
        wtr.write_record(["l", "beta", "binder", "std_error", "acceptance", "tau_int"])?;
        for r in &rows {
            wtr.write_record([
                r.l.to_string(),
                r.beta.to_string(),
                r.binder.to_string(),
                r.std_error.to_string(),
                r.acceptance.to_string(),
                r.tau_int.to_string(),
            ])?;
        }
        wtr.flush()?;
        println!("\nResults -> {}", path.display());
    }

    // Pairwise crossings of the Binder curves: the finite-size-scaling
    // estimate of the critical inverse temperature.
    let mut sizes: Vec<usize> = rows.iter().map(|r| r.l).collect();
    sizes.dedup();
    for a in 0..sizes.len() {
        for b in a + 1..sizes.len() {
            let curve = |l: usize| -> Vec<f64> {
                rows.iter().filter(|r| r.l == l).map(|r| r.binder).collect()
            };
            let (ca, cb) = (curve(sizes[a]), curve(sizes[b]));
            if ca.len() != betas.len() || cb.len() != betas.len() {
                continue; // a failed point left this pair incomplete
            }
            match crossing_beta(&betas, &ca, &cb) {
                Some(bc) => println!(
                    "crossing L={} / L={}: beta_c ~ {:.4}",
                    sizes[a], sizes[b], bc
                ),
                None => println!(
                    "crossing L={} / L={}: none in scanned window",
                    sizes[a], sizes[b]
                ),
            }
        }
    }

    Ok(())
}

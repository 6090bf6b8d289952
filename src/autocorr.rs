// autocorr.rs - Integrated autocorrelation time of a measurement series

/// Integrated autocorrelation time with automatic windowing (Sokal 1989).
///
/// Returns 0.5 for series too short or too flat to carry correlation
/// information; an uncorrelated series gives a value near 0.5 and a
/// strongly correlated chain (near the critical point) much more.
pub fn integrated_autocorr_time(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 10 {
        return 0.5;
    }

    let mean = data.iter().sum::<f64>() / n as f64;
    let c0 = data.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / n as f64;
    if c0 == 0.0 {
        return 0.5;
    }

    let mut tau_sum = 0.5; // C(0) contributes 0.5
    for t in 1..n / 4 {
        let mut ct = 0.0;
        for i in 0..n - t {
            ct += (data[i] - mean) * (data[i + t] - mean);
        }
        ct /= (n - t) as f64;
        let rho_t = ct / c0;
        tau_sum += rho_t;

        // Automatic windowing condition
        if t >= (6.0 * tau_sum) as usize {
            break;
        }
        if rho_t.abs() < 0.05 && t > 10 {
            break;
        }
    }

    tau_sum.max(0.5)
}

/// Jackknife block length that absorbs the measured serial correlation:
/// two integrated autocorrelation times, rounded up, at least 1.
pub fn suggested_block_len(data: &[f64]) -> usize {
    (2.0 * integrated_autocorr_time(data)).ceil().max(1.0) as usize
}

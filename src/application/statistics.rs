// Descriptive statistics over resampled values
use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::summary::DescriptiveStats;

/// count, mean, sample std, min, quartiles and max, rounded to 2 decimals.
///
/// Returns `None` for an empty sequence so callers can tell "no data" from a
/// record of zeros. Non-finite inputs are ignored.
pub fn describe(values: &[f64]) -> Option<DescriptiveStats> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let std = (n > 1).then(|| {
        let var = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        var.sqrt()
    });

    Some(DescriptiveStats {
        count: n,
        mean: round2(mean),
        std: std.map(round2),
        min: round2(sorted[0]),
        p25: round2(quantile(&sorted, 0.25)),
        p50: round2(quantile(&sorted, 0.50)),
        p75: round2(quantile(&sorted, 0.75)),
        max: round2(sorted[n - 1]),
    })
}

/// Statistics over every raw value in the dataset.
pub fn describe_dataset(repository: &dyn TelemetryRepository) -> Option<DescriptiveStats> {
    let values: Vec<f64> = repository.measurements().iter().map(|m| m.value).collect();
    describe(&values)
}

/// Linear interpolation between closest ranks; `sorted` must be non-empty.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

//! Summary statistics used for threshold derivation and ECG correlation

use crate::error::{ArtifactError, Result};

/// Median of a non-empty list; even lengths average the two middle values
pub fn median(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(ArtifactError::InsufficientData {
            found: 0,
            required: 1,
        });
    }

    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

/// Sample standard deviation (n - 1 denominator), needs at least two values
pub fn sample_std_dev(data: &[f64]) -> Result<f64> {
    if data.len() < 2 {
        return Err(ArtifactError::InsufficientData {
            found: data.len(),
            required: 2,
        });
    }

    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    let variance = data.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Ok(variance.sqrt())
}

/// Pearson correlation coefficient
///
/// NaN when either series is constant or the lengths differ.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return f64::NAN;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&a, &b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }

    // rounding can push |r| marginally past 1
    (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
}

/// `log10(|x|)` for nonzero values, zero stays zero
pub fn log_magnitude(x: f64) -> f64 {
    if x != 0.0 {
        x.abs().log10()
    } else {
        x
    }
}

use crate::error::{ArtifactError, Result};
use rustfft::{num_complex::Complex, FftPlanner};
use std::cell::RefCell;

// Planner caches twiddles per length; every block of a recording shares one length
thread_local! {
    static FFT_PLANNER: RefCell<FftPlanner<f64>> = RefCell::new(FftPlanner::new());
}

/// Frequency limits for the low-frequency energy ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioBands {
    /// Upper edge (exclusive) of the low-frequency band, Hz
    pub lambda_frequency: f64,
    /// Upper edge (exclusive) of the total band, Hz
    pub nyquist_frequency: f64,
    /// Mains frequency removed from the total band, Hz
    pub electric_frequency: f64,
    /// Half width of the mains notch, Hz
    pub notch_half_width: f64,
}

/// Squared magnitude of the full-length DFT of a real segment
pub fn power_spectrum(segment: &[f64]) -> Vec<f64> {
    if segment.is_empty() {
        return Vec::new();
    }

    let mut buffer: Vec<Complex<f64>> = segment.iter().map(|&x| Complex::new(x, 0.0)).collect();

    FFT_PLANNER.with(|planner| {
        let fft = planner.borrow_mut().plan_fft_forward(buffer.len());
        fft.process(&mut buffer);
    });

    buffer.iter().map(|c| c.norm_sqr()).collect()
}

/// `len` points evenly spaced over `[0, stop]`, last point exactly `stop`
pub fn frequency_axis(len: usize, stop: f64) -> Vec<f64> {
    match len {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let step = stop / (len - 1) as f64;
            let mut axis: Vec<f64> = (0..len).map(|i| i as f64 * step).collect();
            axis[len - 1] = stop;
            axis
        }
    }
}

/// Share of in-band spectral energy below the lambda frequency
///
/// The axis spans 0 to `sampling_rate / 2` over all DFT bins. The
/// denominator is the energy below Nyquist minus the energy strictly inside
/// the mains notch. A zero numerator short-circuits to 0; a nonzero
/// numerator over a zero denominator is reported as `DegenerateRatio`.
pub fn fourier_ratio(segment: &[f64], sampling_rate: u32, bands: &RatioBands) -> Result<f64> {
    let spectrum = power_spectrum(segment);
    let frequencies = frequency_axis(spectrum.len(), sampling_rate as f64 / 2.0);

    let notch_low = bands.electric_frequency - bands.notch_half_width;
    let notch_high = bands.electric_frequency + bands.notch_half_width;

    let mut numerator = 0.0;
    let mut in_band = 0.0;
    let mut notch = 0.0;
    for (&f, &p) in frequencies.iter().zip(&spectrum) {
        if f < bands.lambda_frequency {
            numerator += p;
        }
        if f < bands.nyquist_frequency {
            in_band += p;
        }
        if f > notch_low && f < notch_high {
            notch += p;
        }
    }

    if numerator == 0.0 {
        return Ok(0.0);
    }

    let denominator = in_band - notch;
    if denominator == 0.0 {
        return Err(ArtifactError::DegenerateRatio { numerator });
    }

    Ok(numerator / denominator)
}

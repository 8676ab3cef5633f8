//! Noise standard deviation estimators.
//!
//! Three estimators have been used over time to measure the dispersion of
//! the noise region, and they disagree by a constant factor or a degree of
//! freedom. The caller picks one explicitly through [`NoiseEstimator`]; the
//! presence or absence of a background mask never chooses it.
//!
//! ## Rayleigh correction
//!
//! Background voxels of a magnitude-reconstructed MR image follow a Rayleigh
//! distribution. For a Rayleigh variable with scale σ, the standard deviation
//! is `σ * sqrt((4 - π) / 2)`, so the measured sample standard deviation is
//! multiplied by `sqrt(2 / (4 - π))` to recover σ (Dietrich et al. 2007,
//! eq. A.12).

use std::fmt;
use std::str::FromStr;

use crate::error::{Region, SnrError};
use crate::stats::{dispersion_about, median, std_dev};

/// Rayleigh correction factor `sqrt(2 / (4 - π))`.
///
/// Literal is the shortest representation that round-trips to
/// `(2.0 / (4.0 - std::f64::consts::PI)).sqrt()`.
pub const RAYLEIGH_CORRECTION: f64 = 1.526_399_745_532_848_2;

/// Noise dispersion estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NoiseEstimator {
    /// Population standard deviation (`ddof = 0`) about the mean.
    PlainStd,
    /// Bessel-corrected (`N - 1`) dispersion about the region median.
    /// Used when no clean background region is available and the signal
    /// region doubles as the noise source.
    #[default]
    BesselCorrected,
    /// Bessel-corrected sample standard deviation about the mean, scaled by
    /// [`RAYLEIGH_CORRECTION`]. Intended for air/background masks of
    /// magnitude images.
    RayleighCorrected,
}

impl NoiseEstimator {
    /// All estimators, in declaration order.
    pub const ALL: [NoiseEstimator; 3] = [
        NoiseEstimator::PlainStd,
        NoiseEstimator::BesselCorrected,
        NoiseEstimator::RayleighCorrected,
    ];

    /// Estimator the most recent QC scripts picked implicitly:
    /// Bessel-corrected without a background mask, Rayleigh-corrected with one.
    pub fn historical(has_background: bool) -> Self {
        if has_background {
            NoiseEstimator::RayleighCorrected
        } else {
            NoiseEstimator::BesselCorrected
        }
    }

    /// Minimum number of samples this estimator needs.
    pub fn min_samples(self) -> usize {
        match self {
            NoiseEstimator::PlainStd => 1,
            NoiseEstimator::BesselCorrected | NoiseEstimator::RayleighCorrected => 2,
        }
    }

    /// Short lowercase name, accepted back by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            NoiseEstimator::PlainStd => "plain",
            NoiseEstimator::BesselCorrected => "bessel",
            NoiseEstimator::RayleighCorrected => "rayleigh",
        }
    }
}

impl fmt::Display for NoiseEstimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NoiseEstimator {
    type Err = SnrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        NoiseEstimator::ALL
            .into_iter()
            .find(|e| e.name() == lowered)
            .ok_or_else(|| SnrError::UnknownEstimator(s.to_string()))
    }
}

/// Estimate the noise standard deviation of `samples`.
///
/// `center` is an already-computed median of `samples`. It is only used by
/// [`NoiseEstimator::BesselCorrected`], and lets the single-region path reuse
/// the foreground median instead of recomputing it. Pass `None` to have it
/// computed here.
pub fn estimate_noise_std(
    samples: &[f64],
    estimator: NoiseEstimator,
    center: Option<f64>,
) -> Result<f64, SnrError> {
    let required = estimator.min_samples();
    if samples.is_empty() {
        return Err(SnrError::EmptyRegion {
            region: Region::Background,
        });
    }
    if samples.len() < required {
        return Err(SnrError::InsufficientSamples {
            region: Region::Background,
            required,
            found: samples.len(),
        });
    }

    let insufficient = || SnrError::InsufficientSamples {
        region: Region::Background,
        required,
        found: samples.len(),
    };

    match estimator {
        NoiseEstimator::PlainStd => std_dev(samples, 0).ok_or_else(insufficient),
        NoiseEstimator::BesselCorrected => {
            let center = match center {
                Some(c) => c,
                None => median(samples).ok_or_else(insufficient)?,
            };
            dispersion_about(samples, center, 1).ok_or_else(insufficient)
        }
        NoiseEstimator::RayleighCorrected => std_dev(samples, 1)
            .map(|std| RAYLEIGH_CORRECTION * std)
            .ok_or_else(insufficient),
    }
}

//! Signal-to-noise ratio from a foreground mask and an optional noise mask.
//!
//! ```text
//! SNR = median(image[foreground > 0]) / noise_std(image[noise > 0])
//! ```
//!
//! When no background mask is supplied, the foreground region doubles as the
//! noise source. The noise dispersion estimator is always chosen by the
//! caller (see [`NoiseEstimator`]).

use ndarray::{ArrayView, Dimension};

use crate::error::{Region, SnrError};
use crate::noise_estimation::{estimate_noise_std, NoiseEstimator};
use crate::region::select_region;
use crate::stats::median;
use crate::voxel_trait::{MaskValue, Voxel};

/// Full result of an SNR measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnrEstimate {
    /// Signal-to-noise ratio, `signal / noise_std`.
    pub snr: f64,
    /// Median intensity of the foreground region.
    pub signal: f64,
    /// Estimated noise standard deviation.
    pub noise_std: f64,
    /// Estimator used for `noise_std`.
    pub estimator: NoiseEstimator,
    /// Number of voxels in the foreground region.
    pub foreground_samples: usize,
    /// Number of voxels the noise was estimated from.
    pub noise_samples: usize,
}

/// Estimate the SNR of `image`.
///
/// # Arguments
/// * `image` - Intensity volume
/// * `foreground_mask` - Signal region (`> 0` marks membership)
/// * `background_mask` - Noise-only region; `None` reuses the foreground
/// * `estimator` - Noise dispersion estimator
///
/// # Errors
/// `ShapeMismatch`, `EmptyRegion`, `InsufficientSamples`, `DivisionByZero`
/// and `NonFinite`. No partial result is ever returned.
pub fn estimate_snr<T: Voxel, M: MaskValue, D: Dimension>(
    image: ArrayView<'_, T, D>,
    foreground_mask: ArrayView<'_, M, D>,
    background_mask: Option<ArrayView<'_, M, D>>,
    estimator: NoiseEstimator,
) -> Result<f64, SnrError> {
    estimate_snr_detailed(image, foreground_mask, background_mask, estimator).map(|e| e.snr)
}

/// Same as [`estimate_snr`], returning the intermediate statistics as well.
pub fn estimate_snr_detailed<T: Voxel, M: MaskValue, D: Dimension>(
    image: ArrayView<'_, T, D>,
    foreground_mask: ArrayView<'_, M, D>,
    background_mask: Option<ArrayView<'_, M, D>>,
    estimator: NoiseEstimator,
) -> Result<SnrEstimate, SnrError> {
    let foreground = select_region(&image, &foreground_mask, Region::Foreground)?;
    let signal = median(&foreground).ok_or(SnrError::EmptyRegion {
        region: Region::Foreground,
    })?;

    let (noise_std, noise_samples) = match background_mask {
        Some(mask) => {
            let background = select_region(&image, &mask, Region::Background)?;
            let std = estimate_noise_std(&background, estimator, None)?;
            (std, background.len())
        }
        None => {
            // Same region, same median: reuse it as the dispersion centre.
            let std = estimate_noise_std(&foreground, estimator, Some(signal))?;
            (std, foreground.len())
        }
    };

    log::debug!(
        "snr: estimator={} foreground_samples={} noise_samples={} signal={} noise_std={}",
        estimator,
        foreground.len(),
        noise_samples,
        signal,
        noise_std
    );

    if noise_std == 0.0 {
        return Err(SnrError::DivisionByZero);
    }

    let snr = signal / noise_std;
    if !snr.is_finite() {
        return Err(SnrError::NonFinite(snr));
    }
    if signal <= 0.0 {
        log::warn!("non-positive foreground median {} gives SNR {}", signal, snr);
    }

    Ok(SnrEstimate {
        snr,
        signal,
        noise_std,
        estimator,
        foreground_samples: foreground.len(),
        noise_samples,
    })
}

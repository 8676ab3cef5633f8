//! End-to-end SNR measurement from raw masks or segmentations.
//!
//! Combines:
//! - Configuration validation
//! - Foreground / background mask preparation (label selection, optional erosion)
//! - SNR estimation with the configured noise estimator

use ndarray::ArrayViewD;

use crate::error::SnrError;
use crate::mask::{MaskPreparer, RegionSelection};
use crate::noise_estimation::NoiseEstimator;
use crate::snr::{estimate_snr_detailed, SnrEstimate};
use crate::voxel_trait::{MaskValue, Voxel};

// =============================================================================
// Constants
// =============================================================================

/// Default noise estimator (single-region estimate about the median)
const DEFAULT_ESTIMATOR: NoiseEstimator = NoiseEstimator::BesselCorrected;

/// Default label selecting the foreground from a segmentation
const DEFAULT_FOREGROUND_LABEL: i64 = 1;

/// Default label selecting the background (air) from its mask
const DEFAULT_BACKGROUND_LABEL: i64 = 1;

/// Masks are not eroded unless an eroder is configured and erosion requested
const DEFAULT_ERODE: bool = false;

// =============================================================================
// Types
// =============================================================================

/// Configuration for an SNR measurement.
///
/// Use `Default::default()` for standard settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnrConfig {
    /// Noise dispersion estimator. Default: `BesselCorrected`
    pub estimator: NoiseEstimator,
    /// Foreground selection in the raw signal mask. Default: `Label(1)`
    pub foreground_selection: RegionSelection,
    /// Background selection in the raw noise mask. Default: `Label(1)`
    pub background_selection: RegionSelection,
    /// Erode both masks before measuring. Default: false
    pub erode: bool,
}

impl Default for SnrConfig {
    fn default() -> Self {
        Self {
            estimator: DEFAULT_ESTIMATOR,
            foreground_selection: RegionSelection::Label(DEFAULT_FOREGROUND_LABEL),
            background_selection: RegionSelection::Label(DEFAULT_BACKGROUND_LABEL),
            erode: DEFAULT_ERODE,
        }
    }
}

impl SnrConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `estimator` for the noise standard deviation.
    pub fn with_estimator(mut self, estimator: NoiseEstimator) -> Self {
        self.estimator = estimator;
        self
    }

    /// Select the foreground from its raw mask with `selection`.
    pub fn with_foreground_selection(mut self, selection: RegionSelection) -> Self {
        self.foreground_selection = selection;
        self
    }

    /// Select the background from its raw mask with `selection`.
    pub fn with_background_selection(mut self, selection: RegionSelection) -> Self {
        self.background_selection = selection;
        self
    }

    /// Erode both masks before measuring.
    pub fn with_erode(mut self, erode: bool) -> Self {
        self.erode = erode;
        self
    }

    /// Validate the configuration parameters.
    pub fn validate(&self) -> Result<(), SnrError> {
        self.foreground_selection
            .validate()
            .map_err(|e| prefix_invalid("foreground_selection", e))?;
        self.background_selection
            .validate()
            .map_err(|e| prefix_invalid("background_selection", e))?;
        Ok(())
    }
}

fn prefix_invalid(field: &str, err: SnrError) -> SnrError {
    match err {
        SnrError::InvalidConfig(msg) => SnrError::InvalidConfig(format!("{}: {}", field, msg)),
        other => other,
    }
}

// =============================================================================
// Main Entry Point
// =============================================================================

/// Measure the SNR of `image` from raw (unprepared) masks.
///
/// `raw_foreground` and `raw_background` may be indicator masks, label maps or
/// probability maps; they are turned into boolean regions by `preparer`
/// according to `config`. With no background mask the foreground region is
/// also the noise source.
pub fn measure_snr<T, M, P>(
    image: ArrayViewD<'_, T>,
    raw_foreground: ArrayViewD<'_, M>,
    raw_background: Option<ArrayViewD<'_, M>>,
    config: &SnrConfig,
    preparer: &P,
) -> Result<SnrEstimate, SnrError>
where
    T: Voxel,
    M: MaskValue,
    P: MaskPreparer<M> + ?Sized,
{
    config.validate()?;

    let foreground =
        preparer.prepare_mask(raw_foreground, config.foreground_selection, config.erode)?;
    let background = raw_background
        .map(|raw| preparer.prepare_mask(raw, config.background_selection, config.erode))
        .transpose()?;

    estimate_snr_detailed(
        image,
        foreground.view(),
        background.as_ref().map(|b| b.view()),
        config.estimator,
    )
}

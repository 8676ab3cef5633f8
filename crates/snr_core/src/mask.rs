//! Mask preparation: turn a raw mask or segmentation into a boolean region.
//!
//! Segmentations used for QC come in three flavours: plain indicator masks,
//! integer label maps (tissue classes, air labels) and probabilistic maps.
//! [`LabelMaskPreparer`] handles label selection for all three. Morphological
//! erosion is not implemented here; it is injected through [`MaskEroder`].

use ndarray::{ArrayD, ArrayViewD};

use crate::error::SnrError;
use crate::voxel_trait::MaskValue;

/// Default probability threshold for partial-volume maps.
pub const DEFAULT_PROBABILITY_THRESHOLD: f64 = 0.95;

/// How voxels of a raw mask are selected into a region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegionSelection {
    /// `value > 0`.
    Positive,
    /// `value == label` (integer label maps).
    Label(i64),
    /// `value > threshold` (probability / partial-volume maps).
    Probability(f64),
}

impl Default for RegionSelection {
    fn default() -> Self {
        RegionSelection::Label(1)
    }
}

impl RegionSelection {
    /// Whether a voxel with `value` belongs to the region.
    #[inline]
    pub fn matches<M: MaskValue>(&self, value: M) -> bool {
        match *self {
            RegionSelection::Positive => value.is_member(),
            RegionSelection::Label(label) => value.label_value() == label as f64,
            RegionSelection::Probability(threshold) => value.label_value() > threshold,
        }
    }

    /// Fail with `InvalidConfig` for a threshold that cannot select sensibly.
    pub fn validate(&self) -> Result<(), SnrError> {
        if let RegionSelection::Probability(threshold) = *self {
            if !threshold.is_finite() || threshold < 0.0 {
                return Err(SnrError::InvalidConfig(format!(
                    "probability threshold must be finite and >= 0, got {}",
                    threshold
                )));
            }
        }
        Ok(())
    }
}

/// Morphological erosion of a boolean region.
pub trait MaskEroder {
    /// Return the eroded region; the shape must be preserved.
    fn erode(&self, mask: ArrayViewD<'_, bool>) -> ArrayD<bool>;
}

impl<F> MaskEroder for F
where
    F: Fn(ArrayViewD<'_, bool>) -> ArrayD<bool>,
{
    fn erode(&self, mask: ArrayViewD<'_, bool>) -> ArrayD<bool> {
        self(mask)
    }
}

/// Produces the boolean region consumed by the SNR estimator.
pub trait MaskPreparer<M: MaskValue> {
    /// Select `selection` from `raw`, eroding the result when `erode` is set.
    fn prepare_mask(
        &self,
        raw: ArrayViewD<'_, M>,
        selection: RegionSelection,
        erode: bool,
    ) -> Result<ArrayD<bool>, SnrError>;
}

/// Label-selecting mask preparer with an optional injected eroder.
pub struct LabelMaskPreparer {
    eroder: Option<Box<dyn MaskEroder + Send + Sync>>,
}

impl Default for LabelMaskPreparer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LabelMaskPreparer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelMaskPreparer")
            .field("has_eroder", &self.eroder.is_some())
            .finish()
    }
}

impl LabelMaskPreparer {
    /// Preparer without erosion support.
    pub fn new() -> Self {
        Self { eroder: None }
    }

    /// Preparer that erodes with `eroder` when asked to.
    pub fn with_eroder<E: MaskEroder + Send + Sync + 'static>(eroder: E) -> Self {
        Self {
            eroder: Some(Box::new(eroder)),
        }
    }
}

impl<M: MaskValue> MaskPreparer<M> for LabelMaskPreparer {
    fn prepare_mask(
        &self,
        raw: ArrayViewD<'_, M>,
        selection: RegionSelection,
        erode: bool,
    ) -> Result<ArrayD<bool>, SnrError> {
        selection.validate()?;

        let eroder = match (erode, &self.eroder) {
            (false, _) => None,
            (true, Some(eroder)) => Some(eroder),
            (true, None) => return Err(SnrError::ErosionUnavailable),
        };

        let selected = raw.mapv(|v| selection.matches(v));

        let mask = match eroder {
            Some(eroder) => {
                let eroded = eroder.erode(selected.view());
                if eroded.shape() != selected.shape() {
                    return Err(SnrError::ShapeMismatch {
                        image: selected.shape().to_vec(),
                        mask: eroded.shape().to_vec(),
                    });
                }
                eroded
            }
            None => selected,
        };

        let count = mask.iter().filter(|&&m| m).count();
        if count == 0 {
            log::warn!("mask preparation with {:?} selected no voxels", selection);
        } else {
            log::debug!(
                "mask preparation with {:?} (erode={}) selected {} of {} voxels",
                selection,
                erode,
                count,
                mask.len()
            );
        }

        Ok(mask)
    }
}

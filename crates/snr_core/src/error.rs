use std::fmt;

use thiserror::Error;

/// Which of the two regions an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Signal region selected by the foreground mask.
    Foreground,
    /// Noise region selected by the background mask (or the foreground mask
    /// when no background mask is given).
    Background,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Foreground => write!(f, "foreground"),
            Self::Background => write!(f, "background"),
        }
    }
}

/// Errors produced while estimating the signal-to-noise ratio.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnrError {
    /// Image and mask shapes differ.
    #[error("shape mismatch: image {image:?} vs mask {mask:?}")]
    ShapeMismatch {
        /// Image shape.
        image: Vec<usize>,
        /// Mask shape.
        mask: Vec<usize>,
    },

    /// A mask selects no voxels.
    #[error("{region} mask selects no voxels")]
    EmptyRegion {
        /// Region whose mask was empty.
        region: Region,
    },

    /// Too few samples for the requested dispersion estimate.
    #[error("{region} region has {found} samples, at least {required} required")]
    InsufficientSamples {
        /// Region that was too small.
        region: Region,
        /// Minimum number of samples for the estimator.
        required: usize,
        /// Number of samples actually selected.
        found: usize,
    },

    /// Noise standard deviation evaluated to exactly zero.
    #[error("noise standard deviation is zero")]
    DivisionByZero,

    /// The ratio is not finite (non-finite input intensities).
    #[error("SNR is not finite: {0}")]
    NonFinite(f64),

    /// Estimator name not recognised.
    #[error("unknown noise estimator: {0:?} (expected plain, bessel or rayleigh)")]
    UnknownEstimator(String),

    /// Erosion was requested but no eroder is configured.
    #[error("mask erosion requested but no eroder is configured")]
    ErosionUnavailable,

    /// Configuration validation failure.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

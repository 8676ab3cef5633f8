//! SNR Core Library
//!
//! Pure Rust estimation of the signal-to-noise ratio of an image volume from a
//! foreground mask and an optional noise-only background mask, for image
//! quality control. This crate contains all algorithm logic without Python
//! bindings.

pub mod error;
pub mod mask;
pub mod noise_estimation;
pub mod orchestration;
pub mod region;
pub mod snr;
pub mod stats;
pub mod voxel_trait;

// Re-export commonly used types at the crate root
pub use error::{Region, SnrError};
pub use mask::{LabelMaskPreparer, MaskEroder, MaskPreparer, RegionSelection};
pub use noise_estimation::{estimate_noise_std, NoiseEstimator, RAYLEIGH_CORRECTION};
pub use orchestration::{measure_snr, SnrConfig};
pub use region::membership;
pub use snr::{estimate_snr, estimate_snr_detailed, SnrEstimate};
pub use voxel_trait::{MaskValue, Voxel};

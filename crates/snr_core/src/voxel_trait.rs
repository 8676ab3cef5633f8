//! Element trait abstractions for image intensities and mask values.
//!
//! Image volumes arrive in whatever storage type the scanner or the upstream
//! pipeline produced (16-bit integers for raw MR magnitude, f32 after
//! resampling, ...). Every statistic in this crate is computed in f64, so the
//! only requirement on an intensity type is a lossless-enough promotion.

use num_traits::ToPrimitive;
use std::fmt::Debug;

/// Numeric types accepted as image intensities.
///
/// This trait combines all the bounds needed for SNR estimation:
/// - Promotion to f64 (ToPrimitive)
/// - Cheap copies out of array views (Copy)
/// - Debug printing
pub trait Voxel: ToPrimitive + Copy + Debug + Send + Sync + 'static {
    /// Promote the intensity to f64 for accumulation.
    #[inline]
    fn to_f64_c(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }
}

/// Types accepted as region masks.
///
/// A voxel belongs to the region when its value is greater than zero.
pub trait MaskValue: Copy + Debug + Send + Sync + 'static {
    /// Whether this voxel is part of the region (`value > 0`).
    fn is_member(self) -> bool;

    /// Numeric value used by label and probability selection.
    fn label_value(self) -> f64;
}

macro_rules! impl_numeric_voxel {
    ($($t:ty),* $(,)?) => {
        $(
            impl Voxel for $t {}

            impl MaskValue for $t {
                #[inline]
                fn is_member(self) -> bool {
                    self > (0 as $t)
                }

                #[inline]
                fn label_value(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_numeric_voxel!(f32, f64, u8, i8, u16, i16, u32, i32, u64, i64);

impl MaskValue for bool {
    #[inline]
    fn is_member(self) -> bool {
        self
    }

    #[inline]
    fn label_value(self) -> f64 {
        if self {
            1.0
        } else {
            0.0
        }
    }
}

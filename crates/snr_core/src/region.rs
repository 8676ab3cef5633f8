//! Region selection: `image[mask > 0]`.

use ndarray::{Array, ArrayView, Dimension};

use crate::error::{Region, SnrError};
use crate::voxel_trait::{MaskValue, Voxel};

/// Collect the intensities of `image` where `mask > 0`, promoted to f64.
///
/// Samples are returned in the logical iteration order of the arrays, so two
/// equal masks always yield bit-identical sample vectors.
pub fn select_region<T: Voxel, M: MaskValue, D: Dimension>(
    image: &ArrayView<'_, T, D>,
    mask: &ArrayView<'_, M, D>,
    region: Region,
) -> Result<Vec<f64>, SnrError> {
    check_shape(image, mask)?;

    let samples: Vec<f64> = image
        .iter()
        .zip(mask.iter())
        .filter(|(_, m)| m.is_member())
        .map(|(v, _)| v.to_f64_c())
        .collect();

    if samples.is_empty() {
        return Err(SnrError::EmptyRegion { region });
    }
    Ok(samples)
}

/// Fail with `ShapeMismatch` unless `image` and `mask` have identical shapes.
pub fn check_shape<T, M, D: Dimension>(
    image: &ArrayView<'_, T, D>,
    mask: &ArrayView<'_, M, D>,
) -> Result<(), SnrError> {
    if image.shape() != mask.shape() {
        return Err(SnrError::ShapeMismatch {
            image: image.shape().to_vec(),
            mask: mask.shape().to_vec(),
        });
    }
    Ok(())
}

/// Boolean membership (`mask > 0`) of any mask type.
pub fn membership<M: MaskValue, D: Dimension>(mask: ArrayView<'_, M, D>) -> Array<bool, D> {
    mask.mapv(|m| m.is_member())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr2, Array3, IxDyn};

    #[test]
    fn test_select_region_order_and_values() {
        let image = arr2(&[[1u16, 2, 3], [4, 5, 6]]).into_dyn();
        let mask = arr2(&[[1u8, 0, 1], [0, 2, 0]]).into_dyn();
        let values = select_region(&image.view(), &mask.view(), Region::Foreground).unwrap();
        assert_eq!(values, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_select_region_bool_mask() {
        let image = Array3::<f32>::from_shape_fn((2, 2, 2), |(i, j, k)| (i * 4 + j * 2 + k) as f32)
            .into_dyn();
        let mask = Array3::from_shape_fn((2, 2, 2), |(i, _, _)| i == 1).into_dyn();
        let values = select_region(&image.view(), &mask.view(), Region::Foreground).unwrap();
        assert_eq!(values, vec![4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_membership_same_for_bool_and_integer_masks() {
        let as_u8 = arr2(&[[0u8, 1], [3, 0]]).into_dyn();
        let as_bool = arr2(&[[false, true], [true, false]]).into_dyn();
        assert_eq!(membership(as_u8.view()), as_bool);
        assert_eq!(membership(as_bool.view()), as_bool);

        let image = arr2(&[[1.0f64, 2.0], [3.0, 4.0]]).into_dyn();
        let from_u8 = select_region(&image.view(), &as_u8.view(), Region::Foreground).unwrap();
        let from_bool = select_region(&image.view(), &as_bool.view(), Region::Foreground).unwrap();
        assert_eq!(from_u8, from_bool);
    }

    #[test]
    fn test_negative_labels_are_not_members() {
        let image = arr2(&[[10.0f64, 20.0]]).into_dyn();
        let mask = arr2(&[[-1i32, 1]]).into_dyn();
        let values = select_region(&image.view(), &mask.view(), Region::Background).unwrap();
        assert_eq!(values, vec![20.0]);
    }

    #[test]
    fn test_empty_region() {
        let image = ndarray::ArrayD::<f64>::ones(IxDyn(&[3, 3]));
        let mask = ndarray::ArrayD::<u8>::zeros(IxDyn(&[3, 3]));
        let err = select_region(&image.view(), &mask.view(), Region::Background).unwrap_err();
        assert_eq!(
            err,
            SnrError::EmptyRegion {
                region: Region::Background
            }
        );
    }

    #[test]
    fn test_shape_mismatch() {
        let image = ndarray::ArrayD::<f64>::ones(IxDyn(&[3, 4]));
        let mask = ndarray::ArrayD::<u8>::ones(IxDyn(&[4, 3]));
        let err = select_region(&image.view(), &mask.view(), Region::Foreground).unwrap_err();
        assert_eq!(
            err,
            SnrError::ShapeMismatch {
                image: vec![3, 4],
                mask: vec![4, 3],
            }
        );
    }
}

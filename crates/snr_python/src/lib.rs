//! PyO3 Python bindings for SNR estimation.
//!
//! This crate provides thin Python bindings for the snr_core library.
//! All algorithm logic is in snr_core; this crate only handles
//! Python/NumPy type conversions.

use pyo3::prelude::*;
use pyo3::types::PyDict;
use numpy::ndarray::ArrayD;
use numpy::{PyArrayDyn, PyReadonlyArrayDyn, ToPyArray};

use snr_core::{membership, MaskPreparer, NoiseEstimator, RegionSelection, SnrError, SnrEstimate};

fn to_py_err(err: SnrError) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(err.to_string())
}

/// Mask arrays accepted from NumPy: `bool` or `uint8`.
#[derive(FromPyObject)]
pub enum MaskArray<'py> {
    Bool(PyReadonlyArrayDyn<'py, bool>),
    UInt8(PyReadonlyArrayDyn<'py, u8>),
}

impl MaskArray<'_> {
    fn to_membership(&self) -> ArrayD<bool> {
        match self {
            MaskArray::Bool(mask) => membership(mask.as_array()),
            MaskArray::UInt8(mask) => membership(mask.as_array()),
        }
    }
}

fn run_estimate(
    image: PyReadonlyArrayDyn<f64>,
    foreground_mask: MaskArray,
    background_mask: Option<MaskArray>,
    estimator: &str,
) -> PyResult<SnrEstimate> {
    let estimator: NoiseEstimator = estimator.parse().map_err(to_py_err)?;
    let foreground = foreground_mask.to_membership();
    let background = background_mask.as_ref().map(MaskArray::to_membership);
    snr_core::estimate_snr_detailed(
        image.as_array(),
        foreground.view(),
        background.as_ref().map(|m| m.view()),
        estimator,
    )
    .map_err(to_py_err)
}

/// Signal-to-noise ratio of `image` over `foreground_mask`.
///
/// Masks may be `bool` or `uint8` arrays; nonzero marks membership.
/// `estimator` is one of "plain", "bessel" or "rayleigh".
#[pyfunction]
#[pyo3(signature = (image, foreground_mask, background_mask=None, estimator="bessel"))]
pub fn estimate_snr(
    image: PyReadonlyArrayDyn<f64>,
    foreground_mask: MaskArray,
    background_mask: Option<MaskArray>,
    estimator: &str,
) -> PyResult<f64> {
    run_estimate(image, foreground_mask, background_mask, estimator).map(|e| e.snr)
}

/// Same as `estimate_snr`, returning a dict with the intermediate statistics.
#[pyfunction]
#[pyo3(signature = (image, foreground_mask, background_mask=None, estimator="bessel"))]
pub fn estimate_snr_detailed<'py>(
    py: Python<'py>,
    image: PyReadonlyArrayDyn<f64>,
    foreground_mask: MaskArray,
    background_mask: Option<MaskArray>,
    estimator: &str,
) -> PyResult<&'py PyDict> {
    let estimate = run_estimate(image, foreground_mask, background_mask, estimator)?;
    let dict = PyDict::new(py);
    dict.set_item("snr", estimate.snr)?;
    dict.set_item("signal", estimate.signal)?;
    dict.set_item("noise_std", estimate.noise_std)?;
    dict.set_item("estimator", estimate.estimator.name())?;
    dict.set_item("foreground_samples", estimate.foreground_samples)?;
    dict.set_item("noise_samples", estimate.noise_samples)?;
    Ok(dict)
}

/// Boolean mask of the voxels of `segmentation` equal to `label`.
#[pyfunction]
pub fn select_label<'py>(
    py: Python<'py>,
    segmentation: PyReadonlyArrayDyn<i64>,
    label: i64,
) -> PyResult<&'py PyArrayDyn<bool>> {
    let mask = snr_core::LabelMaskPreparer::new()
        .prepare_mask(segmentation.as_array(), RegionSelection::Label(label), false)
        .map_err(to_py_err)?;
    Ok(mask.to_pyarray(py))
}

/// SNR Rust accelerator module
#[pymodule]
fn snr_rust(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add("RAYLEIGH_CORRECTION", snr_core::RAYLEIGH_CORRECTION)?;
    m.add_function(wrap_pyfunction!(estimate_snr, m)?)?;
    m.add_function(wrap_pyfunction!(estimate_snr_detailed, m)?)?;
    m.add_function(wrap_pyfunction!(select_label, m)?)?;
    Ok(())
}

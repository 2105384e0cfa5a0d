//! Python bindings for the screenloc template matching library.
//!
//! This module exposes the high-level screenloc API to Python via PyO3.

use numpy::{PyReadonlyArray2, PyUntypedArrayMethods};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use screenloc::{
    match_all as rust_match_all, match_best as rust_match_best, set_threads as rust_set_threads,
    ImageView, MatchResult as RustMatchResult, ScreenlocError, Template as RustTemplate,
};

fn to_py_err(err: ScreenlocError) -> PyErr {
    match err {
        ScreenlocError::InvalidThreshold { .. } | ScreenlocError::InvalidMaxCount { .. } => {
            PyValueError::new_err(err.to_string())
        }
        other => PyRuntimeError::new_err(other.to_string()),
    }
}

/// A located template occurrence: top-left position and NCC confidence.
#[pyclass]
#[derive(Clone)]
pub struct MatchResult {
    /// Top-left x coordinate of the matched placement.
    #[pyo3(get)]
    pub x: i32,
    /// Top-left y coordinate of the matched placement.
    #[pyo3(get)]
    pub y: i32,
    /// NCC confidence in `[-1, 1]`.
    #[pyo3(get)]
    pub confidence: f64,
}

#[pymethods]
impl MatchResult {
    fn __repr__(&self) -> String {
        format!(
            "MatchResult(x={}, y={}, confidence={:.4})",
            self.x, self.y, self.confidence
        )
    }
}

impl From<RustMatchResult> for MatchResult {
    fn from(m: RustMatchResult) -> Self {
        Self {
            x: m.x,
            y: m.y,
            confidence: m.confidence,
        }
    }
}

/// A grayscale template image held for repeated matching.
#[pyclass]
pub struct Template {
    inner: RustTemplate,
}

#[pymethods]
impl Template {
    /// Create a template from a 2D uint8 numpy array (height x width).
    #[new]
    fn new(pixels: PyReadonlyArray2<'_, u8>) -> PyResult<Self> {
        let shape = pixels.shape();
        let height = shape[0];
        let width = shape[1];
        let data: Vec<u8> = pixels.as_slice()?.to_vec();
        let inner = RustTemplate::new(data, width, height).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Load a template from an image file on disk.
    #[staticmethod]
    fn from_file(path: &str) -> PyResult<Self> {
        let owned = screenloc::image::io::load_gray_image(path).map_err(to_py_err)?;
        let inner =
            RustTemplate::new(owned.pixels().to_vec(), owned.width(), owned.height())
                .map_err(to_py_err)?;
        Ok(Self { inner })
    }

    #[getter]
    fn width(&self) -> usize {
        self.inner.width()
    }

    #[getter]
    fn height(&self) -> usize {
        self.inner.height()
    }

    fn __repr__(&self) -> String {
        format!("Template({}x{})", self.inner.width(), self.inner.height())
    }
}

/// Locates the single best occurrence of `template` in `image`.
///
/// Args:
///     image: 2D uint8 numpy array (height x width)
///     template: Template instance
///     threshold: minimum confidence in [0, 1] (default 0.8)
///
/// Returns:
///     MatchResult, or None if nothing scores at least threshold.
#[pyfunction]
#[pyo3(signature = (image, template, threshold = 0.8))]
fn match_best(
    image: PyReadonlyArray2<'_, u8>,
    template: &Template,
    threshold: f64,
) -> PyResult<Option<MatchResult>> {
    let shape = image.shape();
    let height = shape[0];
    let width = shape[1];
    let data = image.as_slice()?;
    let view = ImageView::from_slice(data, width, height).map_err(to_py_err)?;
    let result = rust_match_best(view, template.inner.view(), threshold).map_err(to_py_err)?;
    Ok(result.map(MatchResult::from))
}

/// Locates up to `max_count` non-overlapping occurrences of `template` in `image`.
///
/// Args:
///     image: 2D uint8 numpy array (height x width)
///     template: Template instance
///     threshold: minimum confidence in [0, 1] (default 0.8)
///     max_count: maximum matches to return (default 10)
///
/// Returns:
///     List of MatchResult, ordered by descending confidence.
#[pyfunction]
#[pyo3(signature = (image, template, threshold = 0.8, max_count = 10))]
fn match_all(
    image: PyReadonlyArray2<'_, u8>,
    template: &Template,
    threshold: f64,
    max_count: usize,
) -> PyResult<Vec<MatchResult>> {
    let shape = image.shape();
    let height = shape[0];
    let width = shape[1];
    let data = image.as_slice()?;
    let view = ImageView::from_slice(data, width, height).map_err(to_py_err)?;
    let results = rust_match_all(view, template.inner.view(), threshold, max_count)
        .map_err(to_py_err)?;
    Ok(results.into_iter().map(MatchResult::from).collect())
}

/// Sets the process-wide worker thread count (0 auto-detects).
#[pyfunction]
fn set_threads(n: i64) -> PyResult<()> {
    rust_set_threads(n).map_err(to_py_err)
}

/// Python module for screenloc template matching.
#[pymodule]
fn _screenloc(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<MatchResult>()?;
    m.add_class::<Template>()?;
    m.add_function(wrap_pyfunction!(match_best, m)?)?;
    m.add_function(wrap_pyfunction!(match_all, m)?)?;
    m.add_function(wrap_pyfunction!(set_threads, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}

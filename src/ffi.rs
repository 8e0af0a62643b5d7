//! Python FFI bindings via PyO3.
//!
//! Exposes the clustering engine to Python front-ends (the natural habitat
//! of the interactive plotting surface). Coordinates cross the boundary as
//! plain float lists; memberships come back as row lists.
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! from fcm_core import FcmEngine, cluster_color
//!
//! xs = [1.0, 2.0, 2.0]
//! ys = [3.0, 1.0, 3.0]
//! engine = FcmEngine(xs, ys, clusters=2, fuzziness=2.0, epsilon=0.01, seed=42)
//! centers, memberships = engine.run()
//!
//! # one RGBA layer per cluster, alpha = membership
//! for j in range(2):
//!     rgba = cluster_color(j)
//! ```

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engine::{FcmConfig, FcmEngine as RustFcmEngine};
use crate::error::FcmError;
use crate::membership::MembershipMatrix;
use crate::palette;
use crate::point::Point;

// ── Error mapping ─────────────────────────────────────────────────────────────

/// Invalid parameters become `ValueError`; everything that can only happen
/// once a run is underway becomes `RuntimeError`.
fn to_py_err(err: FcmError) -> PyErr {
    let message = err.to_string();
    match err {
        FcmError::InvalidParameter(_) => PyValueError::new_err(message),
        _ => PyRuntimeError::new_err(message),
    }
}

fn membership_rows(matrix: &MembershipMatrix) -> Vec<Vec<f64>> {
    (0..matrix.point_count()).map(|i| matrix.row(i).to_vec()).collect()
}

// ── FcmEngine ─────────────────────────────────────────────────────────────────

/// Fuzzy-C-Means clustering engine over 2D points.
///
/// Example::
///
///     engine = FcmEngine([0.1, 0.2, 0.9], [0.2, 0.1, 0.8], clusters=2, seed=7)
///     centers, memberships = engine.run()
///     print(centers)            # [(x0, y0), (x1, y1)]
///     print(memberships[0])     # [u00, u01], sums to 1
#[pyclass(name = "FcmEngine")]
pub struct PyFcmEngine {
    inner: RustFcmEngine,
}

#[pymethods]
impl PyFcmEngine {
    /// Create an engine over the given coordinates.
    ///
    /// Args:
    ///     xs: x coordinates
    ///     ys: y coordinates (same length as xs)
    ///     clusters: number of clusters C (default 2)
    ///     fuzziness: exponent m > 1 (default 2.0)
    ///     epsilon: convergence threshold > 0 (default 0.01)
    ///     max_iterations: iteration budget (default 500)
    ///     seed: RNG seed for the membership initialization; fresh entropy
    ///         when omitted
    ///     memberships: explicit starting matrix (row lists summing to 1);
    ///         overrides the random initialization when given
    #[new]
    #[pyo3(signature = (
        xs, ys, clusters=2, fuzziness=2.0, epsilon=0.01, max_iterations=500,
        seed=None, memberships=None
    ))]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        xs: Vec<f64>,
        ys: Vec<f64>,
        clusters: usize,
        fuzziness: f64,
        epsilon: f64,
        max_iterations: usize,
        seed: Option<u64>,
        memberships: Option<Vec<Vec<f64>>>,
    ) -> PyResult<Self> {
        if xs.len() != ys.len() {
            return Err(PyValueError::new_err(format!(
                "xs has {} values but ys has {}",
                xs.len(),
                ys.len()
            )));
        }
        let points: Vec<Point> = xs.iter().zip(&ys).map(|(&x, &y)| Point::new(x, y)).collect();
        let config = FcmConfig {
            cluster_count: clusters,
            fuzziness,
            epsilon,
            max_iterations,
        };

        let inner = match memberships {
            Some(rows) => {
                let matrix = MembershipMatrix::from_rows(&rows).map_err(to_py_err)?;
                RustFcmEngine::with_memberships(points, config, matrix).map_err(to_py_err)?
            }
            None => {
                let mut rng = match seed {
                    Some(s) => StdRng::seed_from_u64(s),
                    None => StdRng::from_entropy(),
                };
                RustFcmEngine::random(points, config, &mut rng).map_err(to_py_err)?
            }
        };
        Ok(Self { inner })
    }

    /// Run one iteration pass and return its max membership delta.
    pub fn step(&mut self) -> PyResult<f64> {
        self.inner.step().map_err(to_py_err)
    }

    /// Run to convergence.
    ///
    /// Returns:
    ///     (centers, memberships): center (x, y) tuples ordered by cluster
    ///     index, and one membership row per input point.
    ///
    /// Raises:
    ///     RuntimeError: budget exhausted (no convergence) or a cluster
    ///         collapsed.
    pub fn run(&mut self) -> PyResult<(Vec<(f64, f64)>, Vec<Vec<f64>>)> {
        let result = self.inner.run().map_err(to_py_err)?;
        let centers = result.centers.iter().map(|c| (c.x, c.y)).collect();
        Ok((centers, membership_rows(&result.memberships)))
    }

    /// Current centers as (x, y) tuples (zeros before the first pass).
    pub fn centers(&self) -> Vec<(f64, f64)> {
        self.inner.centers().iter().map(|c| (c.x, c.y)).collect()
    }

    /// Current membership rows, aligned with the input point order.
    pub fn memberships(&self) -> Vec<Vec<f64>> {
        membership_rows(self.inner.memberships())
    }

    /// Iteration passes executed so far.
    #[getter]
    pub fn iterations(&self) -> usize {
        self.inner.iterations()
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!(
            "FcmEngine(points={}, clusters={}, iterations={})",
            self.inner.points().len(),
            self.inner.config().cluster_count,
            self.inner.iterations()
        )
    }
}

// ── Palette helpers ───────────────────────────────────────────────────────────

/// Palette RGBA for a cluster index (wraps past 16).
#[pyfunction]
fn cluster_color(cluster: usize) -> [f32; 4] {
    palette::cluster_color(cluster)
}

/// One RGBA layer per cluster for the given membership rows.
///
/// `layers[j][i]` is point `i` colored for cluster `j` with its membership
/// degree as alpha.
#[pyfunction]
fn membership_layers(memberships: Vec<Vec<f64>>) -> PyResult<Vec<Vec<[f32; 4]>>> {
    let matrix = MembershipMatrix::from_rows(&memberships).map_err(to_py_err)?;
    Ok(palette::membership_layers(&matrix))
}

// ── Module entry point ────────────────────────────────────────────────────────

/// Fuzzy-C-Means clustering engine Python bindings.
#[pymodule]
pub fn fcm_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyFcmEngine>()?;
    m.add_function(wrap_pyfunction!(cluster_color, m)?)?;
    m.add_function(wrap_pyfunction!(membership_layers, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}

/*
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The Fuzzy-C-Means clustering engine.
//!
//! # The iteration
//!
//! Every pass runs three updates in a fixed order; the order matters because
//! each step consumes what the previous one produced:
//!
//! 1. [`FcmEngine::update_centers`]: each center becomes the
//!    membership-weighted centroid of all points, weights raised to the
//!    fuzziness exponent `m`.
//! 2. [`FcmEngine::update_distances`]: Euclidean distance from every point
//!    to every fresh center.
//! 3. [`FcmEngine::update_memberships`]: the closed-form FCM minimizer per
//!    row, returning the largest absolute membership change of the pass.
//!
//! The run stops when that largest change drops below the configured ε, the
//! iteration budget runs out, or the caller's cancellation signal fires.
//!
//! # Zero distances
//!
//! When a point coincides with one or more centers, the general membership
//! formula would divide by zero. The row is instead split evenly over the
//! zero-distance clusters (`1/|Z|` each, 0 elsewhere), which matches the
//! limiting behavior of the formula as distance → 0.
//!
//! # One run, one engine
//!
//! An engine owns its point set and matrices; concurrent runs (for example
//! to compare parameter settings) each need their own instance. A run is
//! synchronous and performs no I/O. When the caller changes points or
//! parameters, the engine is discarded and rebuilt; when only the seed
//! changes, [`FcmEngine::reinitialize`] redraws the memberships in place.

use alloc::vec;
use alloc::vec::Vec;

use rand::Rng;

use crate::error::{FcmError, InvalidParameter};
use crate::membership::MembershipMatrix;
use crate::point::Point;

// ─── FcmConfig ───────────────────────────────────────────────────────────────

/// Parameters for a clustering run.
///
/// Defaults mirror a sensible interactive setup: 2 clusters, fuzziness 2.0,
/// threshold 0.01, budget 500.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FcmConfig {
    /// Number of clusters C. Fixed for the run; must be ≥ 1.
    pub cluster_count: usize,

    /// Fuzziness exponent m, must be > 1. Values near 1 approach hard
    /// k-means assignments; larger values flatten memberships toward
    /// uniform.
    pub fuzziness: f64,

    /// Convergence threshold ε, must be > 0. The run stops once the largest
    /// absolute membership change in a pass is strictly below this value.
    pub epsilon: f64,

    /// Iteration budget, must be ≥ 1. Exhausting it is the distinct
    /// [`FcmError::NotConverged`] outcome rather than an indefinite block.
    pub max_iterations: usize,
}

impl FcmConfig {
    /// Configuration with the given cluster count and default remaining
    /// parameters.
    pub fn new(cluster_count: usize) -> Self {
        Self {
            cluster_count,
            ..Self::default()
        }
    }

    /// Set the fuzziness exponent.
    pub fn with_fuzziness(mut self, fuzziness: f64) -> Self {
        self.fuzziness = fuzziness;
        self
    }

    /// Set the convergence threshold.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Validate the parameter ranges against a point set.
    ///
    /// Checks are independent of any UI layer; a widget that already clamps
    /// its values does not exempt the engine from validating.
    pub fn validate(&self, points: &[Point]) -> Result<(), FcmError> {
        if points.is_empty() {
            return Err(InvalidParameter::EmptyPointSet.into());
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(InvalidParameter::NonFinitePoint.into());
        }
        if self.cluster_count == 0 {
            return Err(InvalidParameter::ClusterCount.into());
        }
        if !self.fuzziness.is_finite() || self.fuzziness <= 1.0 {
            return Err(InvalidParameter::Fuzziness.into());
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(InvalidParameter::Threshold.into());
        }
        if self.max_iterations == 0 {
            return Err(InvalidParameter::IterationBudget.into());
        }
        Ok(())
    }
}

impl Default for FcmConfig {
    fn default() -> Self {
        Self {
            cluster_count: 2,
            fuzziness: 2.0,
            epsilon: 0.01,
            max_iterations: 500,
        }
    }
}

// ─── FcmResult ───────────────────────────────────────────────────────────────

/// Value snapshot of a converged run, decoupled from the engine.
///
/// The presentation layer reads this snapshot; it never shares mutable state
/// with the engine that produced it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FcmResult {
    /// Final cluster centers, ordered by cluster index.
    pub centers: Vec<Point>,
    /// Final membership matrix, rows aligned with the input point order.
    pub memberships: MembershipMatrix,
    /// Iteration passes executed.
    pub iterations: usize,
    /// The stopping statistic of the final pass (strictly below ε).
    pub max_delta: f64,
}

// ─── FcmEngine ───────────────────────────────────────────────────────────────

/// The Fuzzy-C-Means engine: points, parameters and the three matrices.
///
/// Constructed per run via [`FcmEngine::random`] (caller-supplied RNG) or
/// [`FcmEngine::with_memberships`] (explicit starting matrix). Centers and
/// distances are undefined until the first iteration pass; they are
/// recomputed from scratch every pass and never carried across passes.
#[derive(Clone, Debug)]
pub struct FcmEngine {
    points: Vec<Point>,
    config: FcmConfig,
    memberships: MembershipMatrix,
    /// One entry per cluster; all zeros until the first center update.
    centers: Vec<Point>,
    /// Row-major N×C point-to-center distances, stride = cluster count.
    distances: Vec<f64>,
    iterations: usize,
}

impl FcmEngine {
    // ─── Construction ────────────────────────────────────────────────────────

    /// Create an engine with a randomly initialized membership matrix.
    ///
    /// Draws N×C values in [0, 1) from the caller's RNG and normalizes each
    /// row. The RNG is supplied explicitly so runs are reproducible from a
    /// seed. Fails with [`FcmError::InvalidParameter`] on malformed inputs
    /// and [`FcmError::DegenerateInitialization`] if a drawn row sums to
    /// zero (retry with fresh randomness).
    pub fn random<R: Rng + ?Sized>(
        points: Vec<Point>,
        config: FcmConfig,
        rng: &mut R,
    ) -> Result<Self, FcmError> {
        config.validate(&points)?;
        let memberships = MembershipMatrix::random(points.len(), config.cluster_count, rng)?;
        Ok(Self::assemble(points, config, memberships))
    }

    /// Create an engine with an explicitly supplied membership matrix.
    ///
    /// Used for deterministic fixtures and resumed runs. The matrix shape
    /// must be N×C for the given points and config.
    pub fn with_memberships(
        points: Vec<Point>,
        config: FcmConfig,
        memberships: MembershipMatrix,
    ) -> Result<Self, FcmError> {
        config.validate(&points)?;
        if memberships.point_count() != points.len()
            || memberships.cluster_count() != config.cluster_count
        {
            return Err(InvalidParameter::MembershipShape.into());
        }
        Ok(Self::assemble(points, config, memberships))
    }

    fn assemble(points: Vec<Point>, config: FcmConfig, memberships: MembershipMatrix) -> Self {
        let n = points.len();
        let c = config.cluster_count;
        Self {
            points,
            config,
            memberships,
            centers: vec![Point::new(0.0, 0.0); c],
            distances: vec![0.0; n * c],
            iterations: 0,
        }
    }

    /// Redraw the membership matrix from fresh randomness, keeping points
    /// and parameters.
    ///
    /// Resets the iteration counter. This is the caller-side retry path
    /// after [`FcmError::DegenerateInitialization`] and the cheap way to
    /// restart a run from a different seed.
    pub fn reinitialize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), FcmError> {
        self.memberships =
            MembershipMatrix::random(self.points.len(), self.config.cluster_count, rng)?;
        for center in &mut self.centers {
            *center = Point::new(0.0, 0.0);
        }
        self.distances.fill(0.0);
        self.iterations = 0;
        Ok(())
    }

    // ─── Iteration steps ─────────────────────────────────────────────────────

    /// Recompute every cluster center as the membership-weighted centroid of
    /// all points.
    ///
    /// `center_j = Σ_i u[i][j]^m · p_i / Σ_i u[i][j]^m`, per coordinate.
    /// A denominator of exactly zero cannot happen while the rows stay
    /// normalized, but it is guarded as [`FcmError::SingularCluster`] rather
    /// than propagating NaN into the matrices.
    pub fn update_centers(&mut self) -> Result<(), FcmError> {
        let m = self.config.fuzziness;
        for j in 0..self.config.cluster_count {
            let mut denominator = 0.0f64;
            let mut x = 0.0f64;
            let mut y = 0.0f64;
            for (i, p) in self.points.iter().enumerate() {
                let weight = libm::pow(self.memberships.get(i, j), m);
                denominator += weight;
                x += p.x * weight;
                y += p.y * weight;
            }
            if denominator == 0.0 {
                return Err(FcmError::SingularCluster { cluster: j });
            }
            self.centers[j] = Point::new(x / denominator, y / denominator);
        }
        Ok(())
    }

    /// Recompute the distance from every point to every current center.
    ///
    /// Pure function of the points and centers; overwrites the distance
    /// matrix in place.
    pub fn update_distances(&mut self) {
        let c = self.config.cluster_count;
        for (i, p) in self.points.iter().enumerate() {
            for (j, center) in self.centers.iter().enumerate() {
                self.distances[i * c + j] = p.distance(center);
            }
        }
    }

    /// Recompute every membership row from the fresh distances and return
    /// the largest absolute change across the whole matrix.
    ///
    /// Rows with all-non-zero distances use the closed-form minimizer
    /// `u[i][j] = 1 / Σ_k (d[i][j]/d[i][k])^(2/(m-1))`, which sums to 1 by
    /// construction. Rows containing zero distances are split evenly over
    /// the zero-distance clusters. Each row's old values are read before the
    /// row is overwritten.
    pub fn update_memberships(&mut self) -> f64 {
        let c = self.config.cluster_count;
        let exponent = 2.0 / (self.config.fuzziness - 1.0);
        let mut new_row = vec![0.0f64; c];
        let mut max_delta = 0.0f64;

        for i in 0..self.points.len() {
            let row = &self.distances[i * c..(i + 1) * c];
            let zero_count = row.iter().filter(|&&d| d == 0.0).count();

            if zero_count > 0 {
                // Point coincides with one or more centers: even split over
                // the zero-distance set, 0 elsewhere.
                let share = 1.0 / zero_count as f64;
                for (j, &d) in row.iter().enumerate() {
                    new_row[j] = if d == 0.0 { share } else { 0.0 };
                }
            } else {
                for (j, &dj) in row.iter().enumerate() {
                    let mut sum = 0.0f64;
                    for &dk in row {
                        sum += libm::pow(dj / dk, exponent);
                    }
                    new_row[j] = 1.0 / sum;
                }
            }

            for (j, &value) in new_row.iter().enumerate() {
                let delta = libm::fabs(value - self.memberships.get(i, j));
                if delta > max_delta {
                    max_delta = delta;
                }
                self.memberships.set(i, j, value);
            }
        }
        max_delta
    }

    /// Run one full iteration pass (centers → distances → memberships) and
    /// return its `max_delta`.
    pub fn step(&mut self) -> Result<f64, FcmError> {
        self.update_centers()?;
        self.update_distances();
        let max_delta = self.update_memberships();
        self.iterations += 1;
        Ok(max_delta)
    }

    // ─── Run loop ────────────────────────────────────────────────────────────

    /// Iterate until convergence or budget exhaustion.
    ///
    /// Equivalent to [`FcmEngine::run_until`] with a signal that never
    /// fires.
    pub fn run(&mut self) -> Result<FcmResult, FcmError> {
        self.run_until(|| false)
    }

    /// Iterate until convergence, budget exhaustion, or cancellation.
    ///
    /// `cancelled` is polled once per iteration pass, before the pass runs,
    /// so a non-converging configuration can be aborted without killing the
    /// host. The update rules are deterministic: a fixed starting matrix and
    /// point set always produce the same sequence of centers and
    /// memberships.
    pub fn run_until<F: FnMut() -> bool>(
        &mut self,
        mut cancelled: F,
    ) -> Result<FcmResult, FcmError> {
        let mut last_delta = f64::INFINITY;
        for _ in 0..self.config.max_iterations {
            if cancelled() {
                return Err(FcmError::Cancelled { iterations: self.iterations });
            }
            last_delta = self.step()?;
            if last_delta < self.config.epsilon {
                return Ok(FcmResult {
                    centers: self.centers.clone(),
                    memberships: self.memberships.clone(),
                    iterations: self.iterations,
                    max_delta: last_delta,
                });
            }
        }
        Err(FcmError::NotConverged {
            iterations: self.iterations,
            max_delta: last_delta,
        })
    }

    // ─── Read accessors ──────────────────────────────────────────────────────

    /// The input points, in membership-row order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The run parameters.
    pub fn config(&self) -> &FcmConfig {
        &self.config
    }

    /// The current membership matrix.
    pub fn memberships(&self) -> &MembershipMatrix {
        &self.memberships
    }

    /// The current centers, ordered by cluster index.
    ///
    /// All zeros until the first iteration pass.
    pub fn centers(&self) -> &[Point] {
        &self.centers
    }

    /// Distance from point `i` to the current center of cluster `j`.
    ///
    /// Zero until the first iteration pass.
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distances[i * self.config.cluster_count + j]
    }

    /// Iteration passes executed so far.
    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

/*
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The row-stochastic membership matrix.
//!
//! # The fuzzy-partition constraint
//!
//! Row `i`, column `j` is the degree in [0, 1] to which point `i` belongs to
//! cluster `j`. Every row sums to 1 (within floating tolerance): a point's
//! belonging is distributed over the clusters, never lost and never
//! duplicated. The matrix is created normalized and every update the engine
//! applies preserves the constraint, so it holds at every iteration
//! boundary.
//!
//! Storage is a flat row-major `Vec<f64>` with row stride equal to the
//! cluster count.

use alloc::vec;
use alloc::vec::Vec;

use rand::Rng;

use crate::error::{FcmError, InvalidParameter};

/// Tolerance for the row-sum check on explicitly supplied matrices.
///
/// Rows of a freshly normalized random draw sum to 1 up to rounding; a
/// caller-supplied fixture is held to the same standard.
pub const ROW_SUM_TOLERANCE: f64 = 1e-6;

/// N×C matrix of fuzzy membership degrees, each row summing to 1.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MembershipMatrix {
    /// Row-major entries, length `point_count * cluster_count`.
    data: Vec<f64>,
    /// Row stride.
    cluster_count: usize,
}

impl MembershipMatrix {
    // ─── Constructors ────────────────────────────────────────────────────────

    /// Draw a fresh matrix from `rng` and normalize each row to sum to 1.
    ///
    /// Each entry is drawn uniformly from [0, 1). A row that sums to exactly
    /// zero (possible only with an adversarial generator that returns all
    /// zeros) cannot be normalized and is reported as
    /// [`FcmError::DegenerateInitialization`]; the caller should retry with
    /// fresh randomness rather than have the failure silently coerced.
    pub fn random<R: Rng + ?Sized>(
        point_count: usize,
        cluster_count: usize,
        rng: &mut R,
    ) -> Result<Self, FcmError> {
        let mut data = vec![0.0f64; point_count * cluster_count];
        for v in data.iter_mut() {
            *v = rng.gen::<f64>();
        }

        let mut matrix = Self { data, cluster_count };
        for i in 0..point_count {
            matrix.normalize_row(i)?;
        }
        Ok(matrix)
    }

    /// Build a matrix from explicit rows (deterministic fixtures, resumed
    /// runs).
    ///
    /// Every row must have the same non-zero length, contain only finite
    /// non-negative values, and sum to 1 within [`ROW_SUM_TOLERANCE`].
    /// Violations are [`InvalidParameter::MembershipShape`].
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, FcmError> {
        let cluster_count = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(InvalidParameter::MembershipShape.into()),
        };

        let mut data = Vec::with_capacity(rows.len() * cluster_count);
        for row in rows {
            if row.len() != cluster_count {
                return Err(InvalidParameter::MembershipShape.into());
            }
            let mut sum = 0.0f64;
            for &v in row {
                if !v.is_finite() || v < 0.0 {
                    return Err(InvalidParameter::MembershipShape.into());
                }
                sum += v;
            }
            if libm::fabs(sum - 1.0) > ROW_SUM_TOLERANCE {
                return Err(InvalidParameter::MembershipShape.into());
            }
            data.extend_from_slice(row);
        }
        Ok(Self { data, cluster_count })
    }

    // ─── Accessors ───────────────────────────────────────────────────────────

    /// Number of points (rows).
    pub fn point_count(&self) -> usize {
        if self.cluster_count == 0 {
            0
        } else {
            self.data.len() / self.cluster_count
        }
    }

    /// Number of clusters (columns / row stride).
    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    /// Membership of point `i` in cluster `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.cluster_count + j]
    }

    /// Overwrite the membership of point `i` in cluster `j`.
    ///
    /// Crate-internal: the engine writes whole rows that keep the
    /// row-stochastic constraint; arbitrary external writes could break it.
    pub(crate) fn set(&mut self, i: usize, j: usize, value: f64) {
        self.data[i * self.cluster_count + j] = value;
    }

    /// The membership row for point `i`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cluster_count..(i + 1) * self.cluster_count]
    }

    /// Sum of the membership row for point `i` (1.0 up to rounding while the
    /// fuzzy-partition constraint holds).
    pub fn row_sum(&self, i: usize) -> f64 {
        self.row(i).iter().sum()
    }

    /// The full row-major storage, length `point_count * cluster_count`.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    // ─── Internal helpers ────────────────────────────────────────────────────

    /// Divide row `i` by its sum so it sums to 1.
    fn normalize_row(&mut self, i: usize) -> Result<(), FcmError> {
        let sum = self.row_sum(i);
        if sum == 0.0 {
            return Err(FcmError::DegenerateInitialization { row: i });
        }
        let start = i * self.cluster_count;
        for v in &mut self.data[start..start + self.cluster_count] {
            *v /= sum;
        }
        Ok(())
    }
}

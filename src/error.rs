//! Failure taxonomy for the clustering engine.
//!
//! Every failure is a distinct, inspectable value. Nothing is clamped,
//! defaulted or retried internally: re-seeding after a degenerate
//! initialization, widening the iteration budget after a non-converging run,
//! or fixing a parameter are all caller decisions.

/// A malformed or out-of-range construction argument.
///
/// Detected at engine initialization, before any iteration runs. The engine
/// is not usable until the offending argument is corrected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidParameter {
    /// The point set is empty; at least one point is required.
    #[error("point set is empty")]
    EmptyPointSet,

    /// A point has a NaN or infinite coordinate.
    #[error("point coordinates must be finite")]
    NonFinitePoint,

    /// The cluster count is zero; at least one cluster is required.
    #[error("cluster count must be at least 1")]
    ClusterCount,

    /// The fuzziness exponent is ≤ 1 or non-finite. The membership update
    /// exponent `2/(m-1)` is undefined at `m = 1`.
    #[error("fuzziness exponent must be a finite value greater than 1")]
    Fuzziness,

    /// The convergence threshold is ≤ 0 or non-finite. A zero threshold can
    /// never be undercut and would exhaust the budget on every run.
    #[error("convergence threshold must be a finite positive value")]
    Threshold,

    /// The iteration budget is zero.
    #[error("iteration budget must be at least 1")]
    IterationBudget,

    /// An explicitly supplied membership matrix does not match the expected
    /// N×C shape, or one of its rows is not normalized.
    #[error("membership matrix shape or row normalization mismatch")]
    MembershipShape,
}

/// Errors reported by the clustering engine.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FcmError {
    /// A construction argument failed validation. See [`InvalidParameter`]
    /// for the specific kind.
    #[error("invalid parameter: {0}")]
    InvalidParameter(#[from] InvalidParameter),

    /// The random source produced an all-zero membership row, which cannot
    /// be normalized to sum to 1. Recoverable: retry with fresh randomness.
    #[error("membership row {row} drew an all-zero sample and cannot be normalized")]
    DegenerateInitialization {
        /// Index of the point whose membership row could not be normalized.
        row: usize,
    },

    /// A cluster's center-update denominator collapsed to exactly zero:
    /// every point has zero membership in that cluster. Fatal for the run;
    /// it signals a parameter/data combination that cannot proceed
    /// numerically (for example a cluster count far beyond any structure in
    /// the data).
    #[error("cluster {cluster} collapsed: center weight denominator is zero")]
    SingularCluster {
        /// Index of the collapsed cluster.
        cluster: usize,
    },

    /// The iteration budget ran out before the stopping statistic dropped
    /// below the threshold. The partial state is still readable from the
    /// engine; widen the budget or loosen ε and run again.
    #[error("no convergence within {iterations} iterations (last max delta {max_delta})")]
    NotConverged {
        /// Iterations completed when the budget ran out.
        iterations: usize,
        /// The stopping statistic observed on the final pass.
        max_delta: f64,
    },

    /// The caller's cancellation signal fired between iteration passes.
    #[error("run cancelled after {iterations} iterations")]
    Cancelled {
        /// Iterations completed before cancellation.
        iterations: usize,
    },
}

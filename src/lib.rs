//! # fcm-core
//!
//! Fuzzy-C-Means clustering for 2D point sets.
//!
//! ---
//!
//! ## Soft partitions instead of hard labels
//!
//! K-means forces every point into exactly one cluster. Fuzzy-C-Means (FCM)
//! instead assigns each point a *membership degree* in [0, 1] for every
//! cluster, with the degrees of each point summing to 1. A point halfway
//! between two cluster centers belongs about half to each; a point sitting
//! exactly on a center belongs entirely to it.
//!
//! The engine alternates two closed-form updates until the partition stops
//! moving:
//!
//! **Center update**: every cluster center becomes the membership-weighted
//! centroid of all points, with weights raised to the fuzziness exponent `m`.
//!
//! **Membership update**: every membership becomes the closed-form minimizer
//! `1 / Σ_k (d_ij / d_ik)^(2/(m-1))` of the FCM objective, which keeps each
//! row summing to 1 without an explicit renormalization step.
//!
//! The run converges when the largest single membership change in one pass
//! drops below the threshold ε. An explicit iteration budget bounds every
//! run, so an ill-chosen `m` or ε can never hang the caller.
//!
//! ## The pipeline
//!
//! ```text
//! Points + FcmConfig + Rng → FcmEngine
//!        ↓ per iteration
//! update_centers → update_distances → update_memberships → max_delta
//!        ↓ max_delta < ε (or budget exhausted / cancelled)
//! FcmResult { centers, memberships, iterations }
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`point`] | [`point::Point`] | 2D point with exact Euclidean distance |
//! | [`error`] | [`error::FcmError`] | Inspectable failure taxonomy |
//! | [`membership`] | [`membership::MembershipMatrix`] | Row-stochastic N×C membership matrix |
//! | [`engine`] | [`engine::FcmEngine`], [`engine::FcmConfig`] | The iterative clustering engine |
//! | [`palette`] | [`palette::CLUSTER_COLORS`] | Per-cluster RGBA layers for rendering |
//! | [`table`] | [`table::TableError`] | Two-row coordinate table I/O (requires `std`) |
//!
//! ## Example
//!
//! ```rust
//! use fcm_core::engine::{FcmConfig, FcmEngine};
//! use fcm_core::point::Point;
//! use rand::SeedableRng;
//!
//! let points = vec![
//!     Point::new(0.1, 0.2), Point::new(0.2, 0.1), Point::new(0.15, 0.15),
//!     Point::new(0.9, 0.8), Point::new(0.8, 0.9), Point::new(0.85, 0.85),
//! ];
//! let config = FcmConfig::new(2).with_fuzziness(2.0).with_epsilon(1e-4);
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let mut engine = FcmEngine::random(points, config, &mut rng).unwrap();
//! let result = engine.run().unwrap();
//! assert_eq!(result.centers.len(), 2);
//! ```
//!
//! ## Scope
//!
//! The cluster count is a fixed input for a run; there is no adaptive
//! (Isodata-style) splitting or merging of clusters. The engine performs no
//! I/O and keeps no state across runs; the [`table`] and [`palette`] modules
//! are separate conveniences for front-ends and never touch the engine.
//!
//! ## `no_std`
//!
//! This crate is `#![no_std]` by default (heap required; matrices are
//! `alloc::vec::Vec`). Enable the `std` feature for the [`table`] module.
//! Enable the `serde` feature for serialization derives on the value types.

#![cfg_attr(not(any(feature = "std", feature = "python-ffi")), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]

extern crate alloc;

// Pull in std when the feature is enabled (for the table module, etc.)
#[cfg(any(feature = "std", feature = "python-ffi"))]
extern crate std;

pub mod engine;
pub mod error;
pub mod membership;
pub mod palette;
pub mod point;

#[cfg(feature = "std")]
pub mod table;

#[cfg(feature = "python-ffi")]
pub mod ffi;

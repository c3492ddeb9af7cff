#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// size changing filters module.
pub mod filter;

/// quadrilateral to quadrilateral projective mappings.
pub mod homography;

/// utilities for interpolation.
pub mod interpolation;

/// module containing parallization utilities.
pub mod parallel;

/// image geometric transformations module.
pub mod warp;

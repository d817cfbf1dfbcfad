//! Processing steps of the classification pipeline.
//!
//! This module contains the two per-request processing stages: normalizing
//! an uploaded image into a model-ready tensor, and aggregating a raw
//! per-class probability vector into a classification result.

pub mod aggregate;
pub mod normalize;

pub use aggregate::{PredictionAggregator, overflow_label};
pub use normalize::ImageNormalizer;

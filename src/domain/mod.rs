//! Domain types for classification results.

pub mod result;

pub use result::{ClassProb, ClassificationResult, TopLevelProbs, Verdict};

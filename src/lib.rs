//! # recyclass
//!
//! A Rust library that classifies waste images into subcategories (plastic,
//! metal, cardboard, ...) and derives a coarse recyclability verdict from the
//! per-class probabilities of an ONNX classification model.
//!
//! ## Features
//!
//! - Image normalization from raw upload bytes to a model-ready tensor
//! - Robust interpretation of model output vectors of any length, tolerant
//!   of mismatches between the model's class count and the label taxonomy
//! - Pluggable model backends via the [`ModelBackend`](core::ModelBackend)
//!   trait, with an ONNX Runtime implementation included
//! - Graceful degradation when no model is available
//!
//! ## Components
//!
//! - **Image Normalizer**: decode, RGB-convert, resize, and scale an image
//!   into a batched `(1, H, W, 3)` tensor
//! - **Prediction Aggregator**: reconcile a raw probability vector against
//!   the label taxonomy and compute the recyclability verdict
//! - **Waste Classifier**: the straight-line pipeline tying both together
//!   with an optional injected model handle
//!
//! ## Modules
//!
//! * [`core`] - Errors, configuration, tensor aliases, and the model boundary
//! * [`domain`] - Classification result types
//! * [`pipeline`] - The end-to-end waste classifier
//! * [`processors`] - Image normalization and prediction aggregation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use recyclass::prelude::*;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let model = Arc::new(OrtModel::new("models/waste_classifier.onnx")?);
//! let classifier = WasteClassifier::with_model(ClassifierConfig::default(), model)?;
//!
//! let bytes = std::fs::read("bottle.jpg")?;
//! let result = classifier.classify_bytes(&bytes)?;
//! println!(
//!     "{} ({:.3}), predicted subcategory: {:?}",
//!     result.verdict(),
//!     result.confidence(),
//!     result.predicted_subcategory()
//! );
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod domain;
pub mod pipeline;
pub mod processors;

/// Commonly used types, re-exported for convenience.
pub mod prelude {
    pub use crate::core::{
        ClassifierConfig, ClassifyError, ConfigError, ModelBackend, OrtModel, Taxonomy, Tensor4D,
    };
    pub use crate::domain::{ClassProb, ClassificationResult, TopLevelProbs, Verdict};
    pub use crate::pipeline::WasteClassifier;
    pub use crate::processors::{ImageNormalizer, PredictionAggregator};
}

/// Initializes the tracing subscriber for logging.
///
/// Sets up the tracing subscriber with an environment filter and formatting
/// layer. Typically called once at the start of an application.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}

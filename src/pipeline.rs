//! The end-to-end waste classification pipeline.
//!
//! [`WasteClassifier`] ties the image normalizer, the model backend, and the
//! prediction aggregator into a straight-line synchronous pipeline:
//! normalize, predict, aggregate. There is no internal concurrency and no
//! shared mutable state between requests; the model handle is injected once
//! and only ever invoked, never mutated.

use crate::core::config::ClassifierConfig;
use crate::core::errors::ClassifyError;
use crate::core::inference::ModelBackend;
use crate::core::tensor::Tensor4D;
use crate::domain::result::ClassificationResult;
use crate::processors::aggregate::PredictionAggregator;
use crate::processors::normalize::ImageNormalizer;
use image::DynamicImage;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Classifies waste images into subcategories and a recyclability verdict.
///
/// The model backend is optional: when absent, classification returns the
/// [`ClassificationResult::model_unavailable`] placeholder without invoking
/// the aggregator, so a process whose model failed to load still serves
/// degraded results instead of crashing.
#[derive(Debug)]
pub struct WasteClassifier {
    normalizer: ImageNormalizer,
    aggregator: PredictionAggregator,
    model: Option<Arc<dyn ModelBackend>>,
}

impl WasteClassifier {
    /// Creates a classifier with an optional model backend.
    ///
    /// # Errors
    ///
    /// Returns a `ClassifyError` if the configuration fails validation.
    pub fn new(
        config: ClassifierConfig,
        model: Option<Arc<dyn ModelBackend>>,
    ) -> Result<Self, ClassifyError> {
        config.validate()?;
        let normalizer = ImageNormalizer::from_config(&config);
        let aggregator = PredictionAggregator::new(config.taxonomy);
        Ok(Self {
            normalizer,
            aggregator,
            model,
        })
    }

    /// Creates a classifier with a model backend.
    pub fn with_model(
        config: ClassifierConfig,
        model: Arc<dyn ModelBackend>,
    ) -> Result<Self, ClassifyError> {
        Self::new(config, Some(model))
    }

    /// Creates a classifier without a model backend.
    ///
    /// All classifications return the model-unavailable placeholder.
    pub fn without_model(config: ClassifierConfig) -> Result<Self, ClassifyError> {
        Self::new(config, None)
    }

    /// Returns true if a model backend is configured.
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Returns the normalizer used for model input preparation.
    pub fn normalizer(&self) -> &ImageNormalizer {
        &self.normalizer
    }

    /// Returns the aggregator holding the label taxonomy.
    pub fn aggregator(&self) -> &PredictionAggregator {
        &self.aggregator
    }

    /// Classifies an image supplied as raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::InvalidImage`] if the bytes are not a
    /// decodable image; the caller is expected to substitute
    /// [`ClassificationResult::no_image`] rather than propagate a crash to
    /// the user. Inference failures surface as [`ClassifyError::Inference`].
    pub fn classify_bytes(&self, bytes: &[u8]) -> Result<ClassificationResult, ClassifyError> {
        let tensor = self.normalizer.normalize(bytes)?;
        self.classify_tensor(&tensor)
    }

    /// Classifies an already-decoded image.
    pub fn classify_image(
        &self,
        image: &DynamicImage,
    ) -> Result<ClassificationResult, ClassifyError> {
        let tensor = self.normalizer.normalize_image(image);
        self.classify_tensor(&tensor)
    }

    /// Classifies an image read from a file path.
    pub fn classify_path(&self, path: &Path) -> Result<ClassificationResult, ClassifyError> {
        let bytes = std::fs::read(path)?;
        self.classify_bytes(&bytes)
    }

    fn classify_tensor(&self, tensor: &Tensor4D) -> Result<ClassificationResult, ClassifyError> {
        let Some(model) = &self.model else {
            warn!("no model backend configured, returning placeholder result");
            return Ok(ClassificationResult::model_unavailable());
        };

        let raw = model.predict(tensor)?;

        let taxonomy_len = self.aggregator.taxonomy().len();
        if raw.len() != taxonomy_len {
            warn!(
                raw_len = raw.len(),
                taxonomy_len, "prediction vector length does not match taxonomy size"
            );
        }

        let result = self.aggregator.aggregate(&raw);
        debug!(
            verdict = %result.verdict(),
            confidence = result.confidence(),
            subcategory = result.predicted_subcategory().unwrap_or("none"),
            "classified image"
        );
        Ok(result)
    }
}

//! Display-ready classification results.
//!
//! A [`ClassificationResult`] is constructed fresh per request by the
//! prediction aggregator (or by one of the degraded placeholder
//! constructors), is never mutated after construction, and is handed to a
//! rendering or serialization collaborator.

use serde::Serialize;

/// A single subcategory probability entry.
///
/// Entries preserve taxonomy order, followed by any overflow entries for
/// model classes beyond the taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassProb {
    /// The subcategory name, or an `extra_class_{i}` overflow name.
    pub name: String,
    /// The probability reported by the model (0.0 when the model was silent
    /// on this class).
    pub probability: f32,
}

impl ClassProb {
    /// Creates a new subcategory probability entry.
    pub fn new(name: impl Into<String>, probability: f32) -> Self {
        Self {
            name: name.into(),
            probability,
        }
    }
}

/// The two-way top-level probability pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TopLevelProbs {
    /// Total probability mass of recyclable taxonomy classes.
    #[serde(rename = "Recyclable")]
    pub recyclable: f32,
    /// Residual known-class mass, clamped at zero.
    #[serde(rename = "Non-Recyclable")]
    pub non_recyclable: f32,
}

/// The top-level classification verdict.
///
/// `ModelUnavailable` and `NoImage` are the degraded verdicts the caller
/// substitutes when the model was never loaded or the upload was not a
/// decodable image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    /// Recyclable mass won (ties included).
    #[serde(rename = "Recyclable")]
    Recyclable,
    /// Non-recyclable mass won.
    #[serde(rename = "Non-Recyclable")]
    NonRecyclable,
    /// The model was not loaded; no prediction was attempted.
    #[serde(rename = "Model not loaded")]
    ModelUnavailable,
    /// No decodable image was supplied.
    #[serde(rename = "No image yet")]
    NoImage,
}

impl Verdict {
    /// Returns the human-readable verdict label.
    pub fn label(self) -> &'static str {
        match self {
            Verdict::Recyclable => "Recyclable",
            Verdict::NonRecyclable => "Non-Recyclable",
            Verdict::ModelUnavailable => "Model not loaded",
            Verdict::NoImage => "No image yet",
        }
    }

    /// Returns true only for the `Recyclable` verdict.
    pub fn is_recyclable(self) -> bool {
        matches!(self, Verdict::Recyclable)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A structured, display-ready classification result.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationResult {
    /// Per-subcategory probabilities in taxonomy order, then overflow.
    class_probs: Vec<ClassProb>,
    /// The top-level probability pair.
    top_level: TopLevelProbs,
    /// The top-level verdict.
    verdict: Verdict,
    /// The winning mass, rounded to 3 decimal places.
    confidence: f32,
    /// The taxonomy (or overflow) name of the raw vector's global maximum.
    /// `None` when the raw vector was empty or no prediction was attempted.
    predicted_subcategory: Option<String>,
}

impl ClassificationResult {
    pub(crate) fn new(
        class_probs: Vec<ClassProb>,
        top_level: TopLevelProbs,
        verdict: Verdict,
        confidence: f32,
        predicted_subcategory: Option<String>,
    ) -> Self {
        Self {
            class_probs,
            top_level,
            verdict,
            confidence,
            predicted_subcategory,
        }
    }

    /// The degraded result substituted when the model was never loaded.
    pub fn model_unavailable() -> Self {
        Self::placeholder(Verdict::ModelUnavailable)
    }

    /// The degraded result substituted when the upload was not a decodable
    /// image.
    pub fn no_image() -> Self {
        Self::placeholder(Verdict::NoImage)
    }

    fn placeholder(verdict: Verdict) -> Self {
        Self {
            class_probs: Vec::new(),
            top_level: TopLevelProbs {
                recyclable: 0.0,
                non_recyclable: 0.0,
            },
            verdict,
            confidence: 0.0,
            predicted_subcategory: None,
        }
    }

    /// Returns the per-subcategory probability entries.
    pub fn class_probs(&self) -> &[ClassProb] {
        &self.class_probs
    }

    /// Returns the probability recorded for the given name, if present.
    pub fn probability(&self, name: &str) -> Option<f32> {
        self.class_probs
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.probability)
    }

    /// Returns the top-level probability pair.
    pub fn top_level(&self) -> TopLevelProbs {
        self.top_level
    }

    /// Returns the top-level verdict.
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Returns true only for a `Recyclable` verdict.
    pub fn is_recyclable(&self) -> bool {
        self.verdict.is_recyclable()
    }

    /// Returns the winning mass rounded to 3 decimal places.
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Returns the predicted subcategory name, if any.
    pub fn predicted_subcategory(&self) -> Option<&str> {
        self.predicted_subcategory.as_deref()
    }
}

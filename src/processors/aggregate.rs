//! Prediction aggregation.
//!
//! This module reconciles a raw per-class probability vector against the
//! label taxonomy and assembles a [`ClassificationResult`]. The raw vector's
//! length is whatever the model produced and is not guaranteed to match the
//! taxonomy size; the aggregator absorbs any mismatch instead of erroring:
//!
//! - indices covered by both sides are mapped to their taxonomy labels,
//! - taxonomy labels the model was silent on are zero-filled,
//! - model classes beyond the taxonomy are exposed under synthetic
//!   `extra_class_{i}` names.
//!
//! Aggregation is a total function: any non-negative vector of any length
//! (including empty) yields a result.

use crate::core::config::Taxonomy;
use crate::domain::result::{ClassProb, ClassificationResult, TopLevelProbs, Verdict};

/// Returns the synthetic name for a model class index beyond the taxonomy.
pub fn overflow_label(index: usize) -> String {
    format!("extra_class_{index}")
}

/// Aggregates raw prediction vectors into classification results.
#[derive(Debug, Clone)]
pub struct PredictionAggregator {
    taxonomy: Taxonomy,
}

impl PredictionAggregator {
    /// Creates an aggregator for the given taxonomy.
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self { taxonomy }
    }

    /// Returns the taxonomy this aggregator reconciles against.
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Interprets a raw per-class probability vector.
    ///
    /// The per-subcategory map always carries exactly the taxonomy's names
    /// (zero-filled where the model was silent), followed by overflow
    /// entries for any model classes beyond the taxonomy. The top-level
    /// masses are computed over known classes only, while the predicted
    /// subcategory is the argmax over the full raw vector, so an overflow
    /// class can win the subcategory vote without contributing to the
    /// recyclability masses. Ties between the two masses resolve to
    /// `Recyclable`.
    pub fn aggregate(&self, raw: &[f32]) -> ClassificationResult {
        let n = self.taxonomy.len();
        let m = raw.len();
        let k = n.min(m);

        let mut class_probs = Vec::with_capacity(n.max(m));
        for (i, &value) in raw.iter().take(k).enumerate() {
            class_probs.push(ClassProb::new(self.taxonomy.labels()[i].clone(), value));
        }
        for label in &self.taxonomy.labels()[k..] {
            class_probs.push(ClassProb::new(label.clone(), 0.0));
        }
        for (i, &value) in raw.iter().enumerate().skip(n) {
            class_probs.push(ClassProb::new(overflow_label(i), value));
        }

        let mut known_mass = 0.0f32;
        let mut recyclable_mass = 0.0f32;
        for (i, &value) in raw.iter().take(k).enumerate() {
            known_mass += value;
            if self.taxonomy.is_recyclable(i) {
                recyclable_mass += value;
            }
        }
        // The clamp only guards against floating-point underflow producing
        // a negative residual.
        let non_recyclable_mass = (known_mass - recyclable_mass).max(0.0);

        let (verdict, confidence) = if recyclable_mass >= non_recyclable_mass {
            (Verdict::Recyclable, round3(recyclable_mass))
        } else {
            (Verdict::NonRecyclable, round3(non_recyclable_mass))
        };

        let predicted_subcategory = argmax(raw).map(|index| match self.taxonomy.label(index) {
            Some(name) => name.to_string(),
            None => overflow_label(index),
        });

        ClassificationResult::new(
            class_probs,
            TopLevelProbs {
                recyclable: recyclable_mass,
                non_recyclable: non_recyclable_mass,
            },
            verdict,
            confidence,
            predicted_subcategory,
        )
    }
}

/// Returns the index of the first strict maximum, or `None` when empty.
fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, &value) in values.iter().enumerate() {
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((index, value)),
        }
    }
    best.map(|(index, _)| index)
}

fn round3(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn waste_aggregator() -> PredictionAggregator {
        PredictionAggregator::new(Taxonomy::default())
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_matching_lengths() {
        let aggregator = waste_aggregator();
        let raw = [0.01, 0.02, 0.02, 0.50, 0.0, 0.0, 0.0, 0.0, 0.40, 0.05];

        let result = aggregator.aggregate(&raw);

        // Exactly the taxonomy names, no zero-fill beyond the raw values,
        // no overflow keys.
        assert_eq!(result.class_probs().len(), 10);
        assert!(close(result.probability("cardboard").unwrap(), 0.50));
        assert!(close(result.probability("plastic").unwrap(), 0.40));
        assert!(result.probability("extra_class_10").is_none());

        let top = result.top_level();
        assert!(close(top.recyclable, 0.95));
        assert!(close(top.non_recyclable, 0.05));
        assert_eq!(result.verdict(), Verdict::Recyclable);
        assert!(result.is_recyclable());
        assert_eq!(result.confidence(), 0.95);
        assert_eq!(result.predicted_subcategory(), Some("cardboard"));
    }

    #[test]
    fn test_shorter_vector_zero_fills_tail() {
        let aggregator = waste_aggregator();
        let raw = [0.05, 0.05, 0.60, 0.10, 0.05, 0.05, 0.05, 0.05];

        let result = aggregator.aggregate(&raw);

        // The last two taxonomy entries are zero-filled, keeping the key
        // set invariant.
        assert_eq!(result.class_probs().len(), 10);
        assert_eq!(result.probability("plastic"), Some(0.0));
        assert_eq!(result.probability("shoes"), Some(0.0));

        // Known mass only covers the first eight entries.
        let top = result.top_level();
        assert!(close(top.recyclable, 0.30));
        assert!(close(top.non_recyclable, 0.70));
        assert_eq!(result.verdict(), Verdict::NonRecyclable);
        assert_eq!(result.confidence(), 0.70);
        assert_eq!(result.predicted_subcategory(), Some("trash"));
    }

    #[test]
    fn test_longer_vector_exposes_overflow_keys() {
        let aggregator = waste_aggregator();
        let mut raw = vec![0.0f32; 12];
        raw[3] = 0.30;
        raw[10] = 0.10;
        raw[11] = 0.60;

        let result = aggregator.aggregate(&raw);

        assert_eq!(result.class_probs().len(), 12);
        assert!(close(result.probability("extra_class_10").unwrap(), 0.10));
        assert!(close(result.probability("extra_class_11").unwrap(), 0.60));

        // Overflow values never contribute to the top-level masses.
        let top = result.top_level();
        assert!(close(top.recyclable, 0.30));
        assert!(close(top.non_recyclable, 0.0));

        // But an overflow class can still win the subcategory argmax.
        assert_eq!(result.predicted_subcategory(), Some("extra_class_11"));
    }

    #[test]
    fn test_mass_partition_is_exact() {
        let aggregator = waste_aggregator();
        let raw = [0.12, 0.08, 0.15, 0.10, 0.05, 0.09, 0.11, 0.07, 0.13, 0.10];

        let result = aggregator.aggregate(&raw);
        let top = result.top_level();
        let known: f32 = raw.iter().sum();
        assert!(close(top.recyclable + top.non_recyclable, known));
    }

    #[test]
    fn test_all_recyclable_clamps_residual_to_zero() {
        let taxonomy = Taxonomy::new(
            vec!["glass".to_string(), "metal".to_string()],
            ["glass", "metal"],
        )
        .unwrap();
        let aggregator = PredictionAggregator::new(taxonomy);

        let result = aggregator.aggregate(&[0.7, 0.3]);
        assert_eq!(result.top_level().non_recyclable, 0.0);
        assert_eq!(result.verdict(), Verdict::Recyclable);
        assert_eq!(result.confidence(), 1.0);
    }

    #[test]
    fn test_tie_resolves_to_recyclable() {
        let taxonomy = Taxonomy::new(
            vec!["glass".to_string(), "trash".to_string()],
            ["glass"],
        )
        .unwrap();
        let aggregator = PredictionAggregator::new(taxonomy);

        let result = aggregator.aggregate(&[0.25, 0.25]);
        assert_eq!(result.verdict(), Verdict::Recyclable);
        assert!(result.is_recyclable());
        assert_eq!(result.confidence(), 0.25);
    }

    #[test]
    fn test_empty_vector_degrades_gracefully() {
        let aggregator = waste_aggregator();
        let result = aggregator.aggregate(&[]);

        assert_eq!(result.class_probs().len(), 10);
        assert!(result.class_probs().iter().all(|p| p.probability == 0.0));
        assert_eq!(result.top_level().recyclable, 0.0);
        assert_eq!(result.top_level().non_recyclable, 0.0);
        // The zero-zero tie resolves to Recyclable like any other tie.
        assert_eq!(result.verdict(), Verdict::Recyclable);
        assert_eq!(result.confidence(), 0.0);
        assert_eq!(result.predicted_subcategory(), None);
    }

    #[test]
    fn test_argmax_prefers_first_of_equal_maxima() {
        let aggregator = waste_aggregator();
        let raw = [0.1, 0.4, 0.4, 0.1];
        let result = aggregator.aggregate(&raw);
        assert_eq!(result.predicted_subcategory(), Some("biological"));
    }

    #[test]
    fn test_confidence_rounding() {
        let taxonomy = Taxonomy::new(
            vec!["glass".to_string(), "trash".to_string()],
            ["glass"],
        )
        .unwrap();
        let aggregator = PredictionAggregator::new(taxonomy);

        let result = aggregator.aggregate(&[0.87654, 0.1]);
        assert_eq!(result.confidence(), 0.877);
        // The unrounded mass is still reported in the top-level pair.
        assert!(close(result.top_level().recyclable, 0.87654));
    }
}

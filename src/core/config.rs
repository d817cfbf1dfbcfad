//! Configuration for the classification pipeline.
//!
//! This module provides the label taxonomy, the recyclable subset, and the
//! classifier configuration, together with the validation that runs once at
//! initialization. Malformed configuration (duplicate labels, recyclable
//! entries absent from the taxonomy, zero input dimensions) is rejected here,
//! never per-request.

use image::imageops::FilterType;
use std::collections::HashSet;
use thiserror::Error;

/// Errors that can occur during configuration validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error indicating that a taxonomy label appears more than once.
    #[error("duplicate taxonomy label: {label}")]
    DuplicateLabel {
        /// The repeated label.
        label: String,
    },

    /// Error indicating that a recyclable-set entry is not in the taxonomy.
    #[error("recyclable set entry not present in taxonomy: {label}")]
    DanglingRecyclable {
        /// The entry without a taxonomy counterpart.
        label: String,
    },

    /// Error indicating that a configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// A message describing the configuration error.
        message: String,
    },
}

/// An ordered label taxonomy with a recyclable subset.
///
/// The order of the labels is significant: it must match the class ordering
/// of the external model's output vector. Construction validates that labels
/// are unique and that every recyclable entry names a taxonomy label, so a
/// `Taxonomy` value always satisfies both invariants.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    labels: Vec<String>,
    recyclable: Vec<bool>,
}

impl Taxonomy {
    /// Creates a taxonomy from an ordered label list and a recyclable subset.
    ///
    /// # Arguments
    ///
    /// * `labels` - The ordered subcategory names, index-aligned with the
    ///   model's output classes.
    /// * `recyclable` - The names counting toward the "Recyclable" verdict.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a label is duplicated or a recyclable
    /// entry does not appear among the labels.
    pub fn new<I, S>(labels: Vec<String>, recyclable: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        for label in &labels {
            if !seen.insert(label.as_str()) {
                return Err(ConfigError::DuplicateLabel {
                    label: label.clone(),
                });
            }
        }

        let recyclable_set: HashSet<String> = recyclable.into_iter().map(Into::into).collect();
        for entry in &recyclable_set {
            if !seen.contains(entry.as_str()) {
                return Err(ConfigError::DanglingRecyclable {
                    label: entry.clone(),
                });
            }
        }

        let recyclable = labels
            .iter()
            .map(|label| recyclable_set.contains(label.as_str()))
            .collect();

        Ok(Self { labels, recyclable })
    }

    /// Returns the number of labels in the taxonomy.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if the taxonomy has no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the label at the given class index, if it exists.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Returns the ordered labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns true if the class at the given index counts as recyclable.
    ///
    /// Indices outside the taxonomy are never recyclable.
    pub fn is_recyclable(&self, index: usize) -> bool {
        self.recyclable.get(index).copied().unwrap_or(false)
    }
}

/// The default waste taxonomy: ten subcategories, seven of them recyclable.
impl Default for Taxonomy {
    fn default() -> Self {
        const LABELS: [&str; 10] = [
            "battery",
            "biological",
            "trash",
            "cardboard",
            "clothes",
            "glass",
            "metal",
            "paper",
            "plastic",
            "shoes",
        ];
        const RECYCLABLE: [&str; 7] = [
            "cardboard",
            "clothes",
            "glass",
            "metal",
            "paper",
            "plastic",
            "shoes",
        ];

        Self {
            labels: LABELS.map(String::from).to_vec(),
            recyclable: LABELS
                .iter()
                .map(|label| RECYCLABLE.contains(label))
                .collect(),
        }
    }
}

/// Configuration for the waste classifier.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Target input shape as (height, width).
    pub input_shape: (u32, u32),
    /// Resizing filter used when scaling images to the input shape.
    pub resize_filter: FilterType,
    /// The label taxonomy with its recyclable subset.
    pub taxonomy: Taxonomy,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            input_shape: (160, 160),
            resize_filter: FilterType::CatmullRom,
            taxonomy: Taxonomy::default(),
        }
    }
}

impl ClassifierConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if either input dimension is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (height, width) = self.input_shape;
        if height == 0 || width == 0 {
            return Err(ConfigError::InvalidConfig {
                message: format!("input shape must be non-zero, got {height}x{width}"),
            });
        }
        Ok(())
    }
}

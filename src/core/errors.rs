//! Error types for the classification pipeline.
//!
//! This module defines the errors that can occur while classifying an image,
//! including image decoding errors, model loading errors, inference errors,
//! and configuration errors, along with utility constructors that attach
//! context to the underlying cause.

use crate::core::config::ConfigError;
use std::path::Path;
use thiserror::Error;

/// Enum representing the errors that can occur in the classification pipeline.
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// The input bytes could not be decoded as an image.
    ///
    /// This is a recoverable, user-facing condition: the caller is expected
    /// to substitute a placeholder result rather than surface a crash.
    #[error("invalid image")]
    InvalidImage(#[source] image::ImageError),

    /// A model file could not be loaded into an inference session.
    #[error("failed to load model from {path}: {context}")]
    ModelLoad {
        /// The path of the model file.
        path: std::path::PathBuf,
        /// Additional context about the failure.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A model backend failed during a forward pass.
    #[error("inference with model {model_name} failed: {context}")]
    Inference {
        /// The name of the model for error context.
        model_name: String,
        /// Additional context about the failure.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error indicating invalid input.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Error indicating a configuration problem, detected at initialization.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Error from the ONNX Runtime session.
    #[error(transparent)]
    Session(#[from] ort::Error),

    /// Error from tensor operations.
    #[error("tensor operation")]
    Tensor(#[from] ndarray::ShapeError),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

impl ClassifyError {
    /// Creates a ClassifyError for a model loading failure.
    pub fn model_load(
        path: &Path,
        context: &str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ModelLoad {
            path: path.to_path_buf(),
            context: context.to_string(),
            source: Box::new(source),
        }
    }

    /// Creates a ClassifyError for an inference failure.
    pub fn inference(
        model_name: &str,
        context: &str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Inference {
            model_name: model_name.to_string(),
            context: context.to_string(),
            source: Box::new(source),
        }
    }
}

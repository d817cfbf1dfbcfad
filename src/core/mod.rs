//! Core types for the classification pipeline.
//!
//! This module contains the fundamental building blocks shared across the
//! pipeline:
//! - Error handling
//! - Taxonomy and classifier configuration
//! - Tensor type aliases
//! - The model backend boundary and its ONNX Runtime implementation
//!
//! It also re-exports the commonly used types for convenience.

pub mod config;
pub mod errors;
pub mod inference;
pub mod tensor;

pub use config::{ClassifierConfig, ConfigError, Taxonomy};
pub use errors::ClassifyError;
pub use inference::{ModelBackend, OrtModel};
pub use tensor::Tensor4D;

//! The model boundary and its ONNX Runtime implementation.
//!
//! The classifier treats the model as an opaque synchronous function from a
//! batched image tensor to a per-class probability vector. [`ModelBackend`]
//! captures that contract; [`OrtModel`] implements it on top of ONNX Runtime.
//! The returned vector's length is whatever the model produced and is not
//! reconciled against the taxonomy here; the aggregator absorbs any mismatch.

use crate::core::errors::ClassifyError;
use crate::core::tensor::Tensor4D;
use ort::logging::LogLevel;
use ort::session::Session;
use ort::value::TensorRef;
use std::path::Path;
use std::sync::Mutex;

/// An opaque classification model.
///
/// Implementations must be safe for concurrent read-only use: the pipeline
/// holds the backend behind a shared handle that is invoked, never mutated,
/// for the lifetime of the process.
pub trait ModelBackend: Send + Sync + std::fmt::Debug {
    /// Runs a forward pass on a single batched image tensor.
    ///
    /// Returns the flattened per-class probability vector for the first (and
    /// only) batch element. All values are expected to be non-negative.
    fn predict(&self, input: &Tensor4D) -> Result<Vec<f32>, ClassifyError>;
}

/// A classification model backed by an ONNX Runtime session.
#[derive(Debug)]
pub struct OrtModel {
    /// The ONNX Runtime session, serialized behind a mutex because `run`
    /// takes `&mut self`.
    session: Mutex<Session>,
    /// The name of the input tensor.
    input_name: String,
    /// The name of the output tensor.
    output_name: String,
    /// The model name for error context.
    model_name: String,
}

impl OrtModel {
    /// Creates a new OrtModel, discovering the input tensor name from the
    /// session metadata.
    pub fn new(model_path: impl AsRef<Path>) -> Result<Self, ClassifyError> {
        Self::with_input_name(model_path, None)
    }

    /// Creates a new OrtModel with an explicit input tensor name.
    ///
    /// # Arguments
    ///
    /// * `model_path` - Path to the ONNX model file.
    /// * `input_name` - The input tensor name, or `None` to use the first
    ///   input declared by the model.
    ///
    /// # Errors
    ///
    /// Returns a `ClassifyError` if the session cannot be created or the
    /// model declares no inputs or outputs.
    pub fn with_input_name(
        model_path: impl AsRef<Path>,
        input_name: Option<&str>,
    ) -> Result<Self, ClassifyError> {
        let path = model_path.as_ref();
        let session = Session::builder()?
            .with_log_level(LogLevel::Error)?
            .commit_from_file(path)
            .map_err(|e| ClassifyError::model_load(path, "failed to create ONNX session", e))?;

        let input_name = match input_name {
            Some(name) => name.to_string(),
            None => session
                .inputs
                .first()
                .map(|input| input.name.clone())
                .ok_or_else(|| ClassifyError::InvalidInput {
                    message: format!("model at {} declares no inputs", path.display()),
                })?,
        };
        let output_name = session
            .outputs
            .first()
            .map(|output| output.name.clone())
            .ok_or_else(|| ClassifyError::InvalidInput {
                message: format!("model at {} declares no outputs", path.display()),
            })?;
        let model_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown_model")
            .to_string();

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            output_name,
            model_name,
        })
    }

    /// Returns the model name associated with this backend.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

impl ModelBackend for OrtModel {
    fn predict(&self, input: &Tensor4D) -> Result<Vec<f32>, ClassifyError> {
        let input_shape = input.shape().to_vec();

        let input_tensor = TensorRef::from_array_view(input.view()).map_err(|e| {
            ClassifyError::inference(
                &self.model_name,
                &format!("failed to convert input tensor with shape {input_shape:?}"),
                e,
            )
        })?;
        let inputs = ort::inputs![self.input_name.as_str() => input_tensor];

        let mut session = self
            .session
            .lock()
            .map_err(|_| ClassifyError::InvalidInput {
                message: "failed to acquire session lock".to_string(),
            })?;
        let outputs = session.run(inputs).map_err(|e| {
            ClassifyError::inference(
                &self.model_name,
                &format!(
                    "forward pass failed with input '{}' -> output '{}'",
                    self.input_name, self.output_name
                ),
                e,
            )
        })?;

        let (output_shape, output_data) = outputs[self.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| {
                ClassifyError::inference(
                    &self.model_name,
                    &format!(
                        "failed to extract output tensor '{}' as f32",
                        self.output_name
                    ),
                    e,
                )
            })?;

        // The first axis is the batch dimension; keep the first element's
        // classes, flattened across any remaining axes.
        let batch_size = output_shape.first().copied().unwrap_or(1).max(1) as usize;
        let per_image = output_data.len() / batch_size;
        Ok(output_data[..per_image].to_vec())
    }
}

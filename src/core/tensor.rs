//! Tensor type aliases used at the model boundary.

/// A 4-dimensional tensor represented as a 4D array of f32 values.
///
/// The pipeline uses the NHWC layout: `(batch, height, width, channels)`.
pub type Tensor4D = ndarray::Array4<f32>;

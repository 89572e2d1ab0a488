use apot_math::{ShapeError, Tensor};
use thiserror::Error;

use crate::QuantizedTensor;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuantError {
    #[error("Invalid quantizer config: {0}")]
    InvalidConfig(String),
    /// Capability gap in this version; callers must not retry.
    #[error("Operation not supported: {0}")]
    Unsupported(&'static str),
    #[error("Expected {expected} representation")]
    RepresentationMismatch { expected: &'static str },
    #[error("Shape error: {0}")]
    Shape(#[from] ShapeError),
}

/// Quantizer interface shared by the APoT and uniform quantizers.
///
/// `quantize` is pure: the same input always yields the same codes, and the
/// output shape equals the input shape.
pub trait Quantizer {
    /// Returns the integer code of the nearest level for every element
    fn quantize(&self, input: &Tensor) -> QuantizedTensor;

    fn dequantize(&self, quantized: &QuantizedTensor) -> Result<Tensor, QuantError>;
}

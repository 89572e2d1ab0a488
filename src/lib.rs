//! # mini-apot
//!
//! Additive power-of-two (APoT) non-uniform quantization.
//!
//! Re-exports the workspace crates:
//! - [`apot_math`]: [`Tensor`], the shape-carrying `f32` buffer
//! - [`apot_core`]: [`ApotQuantizer`], [`LevelTable`], [`UniformQuantizer`] and the [`Quantizer`] trait

pub use apot_core::{
    ApotQuantizer, LevelTable, QuantError, QuantizedData, QuantizedTensor, Quantizer,
    QuantizerConfig, Representation, UniformQuantizer,
};
pub use apot_math::{ShapeError, Tensor};

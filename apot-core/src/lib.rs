//! # apot-core
//!
//! Additive power-of-two (APoT) non-uniform quantization.
//!
//! This crate defines:
//! - [`Quantizer`]: quantize a [`Tensor`](apot_math::Tensor) and (where supported) map it back
//! - [`QuantizerConfig`]: bit width `b`, bits per additive term `k`, signedness
//! - [`LevelTable`]: sorted APoT levels paired with their canonical codes
//! - [`ApotQuantizer`]: nearest-level quantization with int or reduced-precision output
//! - [`UniformQuantizer`]: affine per-tensor quantization, the `k = 1` reference
//!
//! With `k = 1` the APoT level set degenerates to an evenly spaced grid, so
//! the two quantizers agree code for code on the unit range.

pub mod apot;
pub mod config;
pub mod levels;
pub mod quantized;
pub mod quantizer;
pub mod uniform;

pub use apot::ApotQuantizer;
pub use config::QuantizerConfig;
pub use levels::LevelTable;
pub use quantized::{QuantizedData, QuantizedTensor, Representation};
pub use quantizer::{QuantError, Quantizer};
pub use uniform::UniformQuantizer;

//! # apot-math
//!
//! Shape-carrying `f32` tensors for the APoT quantization workspace.
//!
//! This crate provides [`Tensor`]: a contiguous, row-major buffer of `f32`
//! values paired with its shape. Quantizers in `apot-core` consume tensors
//! elementwise and hand back results with the same shape.
//!
//! **No numeric dependencies** (besides `thiserror` for error types) so the buffer
//! type stays auditable in isolation.

pub mod ops;
pub mod tensor;

pub use tensor::{ShapeError, Tensor};

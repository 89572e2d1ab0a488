use apot_math::Tensor;
use tracing::debug;

use crate::{QuantError, QuantizedData, QuantizedTensor, Quantizer};

/// Affine per-tensor uniform quantizer
///
/// Formula: q = clamp(round_half_even(x / scale) + zero_point, qmin, qmax)
/// Reconstruction: x_hat = (q - zero_point) * scale
///
/// This is the reference the APoT quantizer reduces to when `k = 1`:
/// [`UniformQuantizer::unit_range`] spaces `2^b` codes evenly over `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformQuantizer {
    scale: f64,
    zero_point: i32,
    qmin: u32,
    qmax: u32,
}

impl UniformQuantizer {
    pub fn new(scale: f64, zero_point: i32, qmin: u32, qmax: u32) -> Result<Self, QuantError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(QuantError::InvalidConfig(format!(
                "scale must be finite and positive, got {}",
                scale
            )));
        }
        if qmin > qmax {
            return Err(QuantError::InvalidConfig(format!(
                "qmin {} exceeds qmax {}",
                qmin, qmax
            )));
        }
        Ok(Self {
            scale,
            zero_point,
            qmin,
            qmax,
        })
    }

    /// `2^b` evenly spaced codes over `[0, 1]`, scale `1 / (2^b - 1)`
    pub fn unit_range(bit_width: u32) -> Result<Self, QuantError> {
        if bit_width == 0 || bit_width > 31 {
            return Err(QuantError::InvalidConfig(format!(
                "bit_width {} out of range 1..=31",
                bit_width
            )));
        }
        let qmax = (1u32 << bit_width) - 1;
        Self::new(1.0 / qmax as f64, 0, 0, qmax)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn zero_point(&self) -> i32 {
        self.zero_point
    }

    pub fn quantize_value(&self, x: f32) -> u32 {
        // NaN lands on the zero point
        let x = if x.is_nan() { 0.0 } else { x as f64 };
        let q = (x / self.scale).round_ties_even() + self.zero_point as f64;
        q.clamp(self.qmin as f64, self.qmax as f64) as u32
    }

    pub fn dequantize_value(&self, q: u32) -> f32 {
        ((q as f64 - self.zero_point as f64) * self.scale) as f32
    }
}

impl Quantizer for UniformQuantizer {
    fn quantize(&self, input: &Tensor) -> QuantizedTensor {
        debug!(elements = input.len(), scale = self.scale, "Uniform quantize");
        let codes = input
            .as_slice()
            .iter()
            .map(|&x| self.quantize_value(x))
            .collect();
        QuantizedTensor::with_shape(input.shape().to_vec(), QuantizedData::Codes(codes))
    }

    fn dequantize(&self, quantized: &QuantizedTensor) -> Result<Tensor, QuantError> {
        let codes = quantized
            .codes()
            .ok_or(QuantError::RepresentationMismatch { expected: "int" })?;
        let data = codes.iter().map(|&q| self.dequantize_value(q)).collect();
        Ok(Tensor::new(data, quantized.shape().to_vec())?)
    }
}

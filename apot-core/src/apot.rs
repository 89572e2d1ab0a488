use apot_math::Tensor;
use tracing::{debug, warn};

use crate::{
    LevelTable, QuantError, QuantizedData, QuantizedTensor, Quantizer, QuantizerConfig,
    Representation,
};

/// Additive power-of-two quantizer
///
/// Holds an immutable [`LevelTable`] built once from its config; quantization
/// is a pure nearest-level search, so one instance can serve any number of
/// concurrent callers.
///
/// # Example
/// ```
/// use apot_core::{ApotQuantizer, Quantizer, Representation};
/// use apot_math::Tensor;
///
/// let q = ApotQuantizer::create(4, 1, false).unwrap();
/// let input = Tensor::from_f32(&[0.0, 0.33, 0.66, 1.0]);
///
/// let codes = q.quantize(&input);
/// assert_eq!(codes.codes(), Some(&[0, 5, 10, 15][..]));
///
/// let levels = q.quantize_apot(&input, Representation::ReducedPrecision);
/// assert_eq!(levels.levels().unwrap()[3], 1.0);
///
/// assert!(q.dequantize(&codes).is_err());
/// assert!(q.alpha().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ApotQuantizer {
    table: LevelTable,
}

impl ApotQuantizer {
    pub fn new(config: QuantizerConfig) -> Result<Self, QuantError> {
        Ok(Self {
            table: LevelTable::build(&config)?,
        })
    }

    /// Shorthand for `new(QuantizerConfig::new(b, k, signed)?)`
    pub fn create(bit_width: u32, level_bits: u32, signed: bool) -> Result<Self, QuantError> {
        Self::new(QuantizerConfig::new(bit_width, level_bits, signed)?)
    }

    pub fn config(&self) -> &QuantizerConfig {
        self.table.config()
    }

    pub fn level_table(&self) -> &LevelTable {
        &self.table
    }

    pub fn quantization_levels(&self) -> &[f64] {
        self.table.levels()
    }

    pub fn level_indices(&self) -> &[u32] {
        self.table.codes()
    }

    pub fn float_to_code(&self, x: f32) -> u32 {
        self.table.codes()[self.table.nearest(x as f64)]
    }

    /// Reduced-precision value: the nearest level itself
    pub fn float_to_level(&self, x: f32) -> f64 {
        self.table.levels()[self.table.nearest(x as f64)]
    }

    /// Quantize every element to its nearest level, keeping the input shape
    pub fn quantize_apot(&self, input: &Tensor, repr: Representation) -> QuantizedTensor {
        debug!(elements = input.len(), ?repr, "APoT quantize");
        let nan_count = input.as_slice().iter().filter(|x| x.is_nan()).count();
        if nan_count > 0 {
            warn!(nan_count, "NaN inputs mapped to the level nearest zero");
        }

        let positions = input.as_slice().iter().map(|&x| self.table.nearest(x as f64));
        let data = match repr {
            Representation::Int => {
                QuantizedData::Codes(positions.map(|p| self.table.codes()[p]).collect())
            }
            Representation::ReducedPrecision => {
                QuantizedData::Levels(positions.map(|p| self.table.levels()[p]).collect())
            }
        };
        QuantizedTensor::with_shape(input.shape().to_vec(), data)
    }

    /// Boolean-flag form of [`ApotQuantizer::quantize_apot`]
    pub fn quantize_with(&self, input: &Tensor, use_int_repr: bool) -> QuantizedTensor {
        let repr = if use_int_repr {
            Representation::Int
        } else {
            Representation::ReducedPrecision
        };
        self.quantize_apot(input, repr)
    }

    /// Clipping bound accessor. Not supported in this version.
    pub fn alpha(&self) -> Result<f32, QuantError> {
        Err(QuantError::Unsupported("alpha"))
    }
}

impl Quantizer for ApotQuantizer {
    fn quantize(&self, input: &Tensor) -> QuantizedTensor {
        self.quantize_apot(input, Representation::Int)
    }

    /// Not supported in this version, for any input.
    fn dequantize(&self, _quantized: &QuantizedTensor) -> Result<Tensor, QuantError> {
        Err(QuantError::Unsupported("dequantize"))
    }
}

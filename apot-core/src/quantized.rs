use serde::{Deserialize, Serialize};

use apot_math::ShapeError;

/// Output mode of APoT quantization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Representation {
    /// Canonical integer code of the nearest level
    Int,
    /// The nearest level's value itself
    ReducedPrecision,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuantizedData {
    Codes(Vec<u32>),
    Levels(Vec<f64>),
}

/// Quantized values with the shape of the tensor they came from
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizedTensor {
    shape: Vec<usize>,
    data: QuantizedData,
}

impl QuantizedTensor {
    pub fn from_codes(shape: Vec<usize>, codes: Vec<u32>) -> Result<Self, ShapeError> {
        check_count(&shape, codes.len())?;
        Ok(Self {
            shape,
            data: QuantizedData::Codes(codes),
        })
    }

    pub fn from_levels(shape: Vec<usize>, levels: Vec<f64>) -> Result<Self, ShapeError> {
        check_count(&shape, levels.len())?;
        Ok(Self {
            shape,
            data: QuantizedData::Levels(levels),
        })
    }

    /// Caller guarantees one element per shape slot
    pub(crate) fn with_shape(shape: Vec<usize>, data: QuantizedData) -> Self {
        Self { shape, data }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn len(&self) -> usize {
        match &self.data {
            QuantizedData::Codes(c) => c.len(),
            QuantizedData::Levels(l) => l.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn data(&self) -> &QuantizedData {
        &self.data
    }

    pub fn representation(&self) -> Representation {
        match self.data {
            QuantizedData::Codes(_) => Representation::Int,
            QuantizedData::Levels(_) => Representation::ReducedPrecision,
        }
    }

    pub fn codes(&self) -> Option<&[u32]> {
        match &self.data {
            QuantizedData::Codes(c) => Some(c),
            QuantizedData::Levels(_) => None,
        }
    }

    pub fn levels(&self) -> Option<&[f64]> {
        match &self.data {
            QuantizedData::Levels(l) => Some(l),
            QuantizedData::Codes(_) => None,
        }
    }

    /// Codes narrowed to bytes (the `uint8` view); `None` for level data
    /// or when a code exceeds 255.
    pub fn to_u8(&self) -> Option<Vec<u8>> {
        self.codes()?
            .iter()
            .map(|&c| u8::try_from(c).ok())
            .collect()
    }
}

fn check_count(shape: &[usize], actual: usize) -> Result<(), ShapeError> {
    let expected: usize = shape.iter().product();
    if expected != actual {
        return Err(ShapeError::ElementCount {
            shape: shape.to_vec(),
            expected,
            actual,
        });
    }
    Ok(())
}

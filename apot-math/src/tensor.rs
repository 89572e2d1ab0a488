use thiserror::Error;

/// Dense row-major `f32` tensor.
///
/// Invariant: `shape.iter().product::<usize>() == data.len()`.
/// A rank-0 tensor (empty shape) holds exactly one element.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    pub(crate) data: Vec<f32>,
    pub(crate) shape: Vec<usize>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Shape {shape:?} needs {expected} elements, got {actual}")]
    ElementCount {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },
    #[error("Shape mismatch: {0:?} vs {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),
}

pub(crate) fn element_count(shape: &[usize]) -> usize {
    shape.iter().product()
}

impl Tensor {
    /// Build a tensor from raw data and a shape, validating the element count.
    pub fn new(data: Vec<f32>, shape: Vec<usize>) -> Result<Self, ShapeError> {
        let expected = element_count(&shape);
        if expected != data.len() {
            return Err(ShapeError::ElementCount {
                shape,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, shape })
    }

    /// Rank-1 tensor copied from a slice
    pub fn from_f32(data: &[f32]) -> Self {
        Self {
            data: data.to_vec(),
            shape: vec![data.len()],
        }
    }

    pub fn zeros(shape: &[usize]) -> Self {
        Self {
            data: vec![0.0; element_count(shape)],
            shape: shape.to_vec(),
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Returns the number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

}

use super::{ShapeError, Tensor};
use crate::tensor::element_count;

impl Tensor {
    /// Element at a row-major multi-index, `None` when out of bounds
    /// or when the index rank does not match.
    pub fn get(&self, index: &[usize]) -> Option<f32> {
        if index.len() != self.rank() {
            return None;
        }
        let mut offset = 0usize;
        for (&i, &dim) in index.iter().zip(self.shape()) {
            if i >= dim {
                return None;
            }
            offset = offset * dim + i;
        }
        self.as_slice().get(offset).copied()
    }

    /// Same data under a new shape
    pub fn reshape(&self, shape: &[usize]) -> Result<Self, ShapeError> {
        if element_count(shape) != self.len() {
            return Err(ShapeError::ShapeMismatch(self.shape().to_vec(), shape.to_vec()));
        }
        Ok(Tensor {
            data: self.data.clone(),
            shape: shape.to_vec(),
        })
    }

    /// Elementwise map, shape preserved
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(f32) -> f32,
    {
        let data = self.data.iter().map(|&x| f(x)).collect();
        Tensor {
            data,
            shape: self.shape.clone(),
        }
    }

    /// Largest absolute value, `0.0` for an empty tensor
    pub fn max_abs(&self) -> f32 {
        self.as_slice().iter().map(|x| x.abs()).fold(0.0f32, f32::max)
    }
}

//! Dense travel cost matrix.

use serde::{Deserialize, Serialize};

use crate::error::InvalidProblemError;

/// A dense n×n integer travel cost matrix stored in row-major order.
///
/// Costs are opaque to the solver: they may be asymmetric and are usually
/// derived from coordinates by the caller. Entries are non-negative and the
/// diagonal is zero.
///
/// # Examples
///
/// ```
/// use tw_routing::distance::CostMatrix;
///
/// let cm = CostMatrix::from_rows(vec![
///     vec![0, 5, 8],
///     vec![5, 0, 3],
///     vec![9, 3, 0],
/// ]).unwrap();
/// assert_eq!(cm.get(2, 0), 9);
/// assert_eq!(cm.size(), 3);
/// assert!(!cm.is_symmetric());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCostMatrix")]
pub struct CostMatrix {
    data: Vec<i64>,
    size: usize,
}

impl CostMatrix {
    /// Creates a matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size * size],
            size,
        }
    }

    /// Builds a matrix from nested rows, validating shape and values.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self, InvalidProblemError> {
        let size = rows.len();
        if size == 0 {
            return Err(InvalidProblemError::EmptyMatrix);
        }
        let mut data = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(InvalidProblemError::MatrixShape {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            data.extend(values);
        }
        let matrix = Self { data, size };
        matrix.validate()?;
        Ok(matrix)
    }

    /// Checks the storage length, non-negativity and the zero diagonal.
    pub fn validate(&self) -> Result<(), InvalidProblemError> {
        if self.size == 0 {
            return Err(InvalidProblemError::EmptyMatrix);
        }
        let expected = self.size.saturating_mul(self.size);
        if self.data.len() != expected {
            return Err(InvalidProblemError::MatrixLength {
                size: self.size,
                len: self.data.len(),
                expected,
            });
        }
        for from in 0..self.size {
            for to in 0..self.size {
                let cost = self.get(from, to);
                if cost < 0 {
                    return Err(InvalidProblemError::NegativeCost { from, to, cost });
                }
                if from == to && cost != 0 {
                    return Err(InvalidProblemError::NonZeroDiagonal { stop: from, cost });
                }
            }
        }
        Ok(())
    }

    /// Returns the cost from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> i64 {
        self.data[from * self.size + to]
    }

    /// Sets the cost from `from` to `to`.
    pub fn set(&mut self, from: usize, to: usize, cost: i64) {
        self.data[from * self.size + to] = cost;
    }

    /// Number of stops covered by this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| ((i + 1)..self.size).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Returns a copy with row and column `stop` removed.
    pub fn without(&self, stop: usize) -> Self {
        let size = self.size - 1;
        let mut data = Vec::with_capacity(size * size);
        for from in (0..self.size).filter(|&i| i != stop) {
            for to in (0..self.size).filter(|&j| j != stop) {
                data.push(self.get(from, to));
            }
        }
        Self { data, size }
    }

    /// Returns a copy grown by one stop, with `to_new[i]` the cost from `i`
    /// to the new stop and `from_new[j]` the cost from the new stop to `j`.
    pub fn with_appended(&self, to_new: &[i64], from_new: &[i64]) -> Self {
        let size = self.size + 1;
        let mut data = Vec::with_capacity(size * size);
        for from in 0..self.size {
            data.extend((0..self.size).map(|to| self.get(from, to)));
            data.push(to_new[from]);
        }
        data.extend_from_slice(&from_new[..self.size]);
        data.push(0);
        Self { data, size }
    }
}

/// Wire shape of [`CostMatrix`], validated on the way in.
#[derive(Deserialize)]
struct RawCostMatrix {
    data: Vec<i64>,
    size: usize,
}

impl TryFrom<RawCostMatrix> for CostMatrix {
    type Error = InvalidProblemError;

    fn try_from(raw: RawCostMatrix) -> Result<Self, Self::Error> {
        let matrix = Self {
            data: raw.data,
            size: raw.size,
        };
        matrix.validate()?;
        Ok(matrix)
    }
}

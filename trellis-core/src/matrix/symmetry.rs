//! Antisymmetry check.

use std::ops::Neg;

use crate::error::{GraphError, GraphResult};

/// Check that `matrix[i][j] == -matrix[j][i]` for every cell.
///
/// The diagonal is included, so any non-zero diagonal entry fails the check.
/// Returns `Ok(false)` at the first violating pair.
///
/// # Errors
///
/// [`GraphError::Shape`] if any row's length differs from the number of rows.
pub fn is_antisymmetric<T, R>(matrix: &[R]) -> GraphResult<bool>
where
    T: Copy + PartialEq + Neg<Output = T>,
    R: AsRef<[T]>,
{
    let n = matrix.len();
    for (row, values) in matrix.iter().enumerate() {
        let len = values.as_ref().len();
        if len != n {
            return Err(GraphError::Shape {
                row,
                len,
                expected: n,
            });
        }
    }

    for j in 0..n {
        for i in j..n {
            if matrix[i].as_ref()[j] != -matrix[j].as_ref()[i] {
                return Ok(false);
            }
        }
    }

    Ok(true)
}

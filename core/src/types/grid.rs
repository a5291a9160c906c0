use crate::error::{Result, SliceposError};

/// Row-major 2-D grid of samples
///
/// Rows run along y (north to south), columns along x (west to east).
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

/// Pixel intensities of one slice
pub type Image = Grid<f64>;

/// Phantom mask, `true` on phantom material
pub type Mask = Grid<bool>;

impl<T> Grid<T> {
    /// Wraps a row-major buffer
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `data.len() != rows * cols`
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        let expected = rows.checked_mul(cols).ok_or_else(|| {
            SliceposError::InvalidInput(format!("grid size {} x {} overflows", rows, cols))
        })?;

        if data.len() != expected {
            return Err(SliceposError::InvalidInput(format!(
                "grid size mismatch: expected {} samples for {} x {}, got {}",
                expected,
                rows,
                cols,
                data.len()
            )));
        }

        Ok(Self { rows, cols, data })
    }

    /// Builds a grid by evaluating `f(row, col)` for every cell
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Cell at (row, col), `None` outside the grid
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Signed lookup used by samplers that may step outside the grid
    pub fn get_signed(&self, row: isize, col: isize) -> Option<&T> {
        if row < 0 || col < 0 {
            return None;
        }
        self.get(row as usize, col as usize)
    }

    /// Full row as a slice
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row < self.rows {
            let start = row * self.cols;
            Some(&self.data[start..start + self.cols])
        } else {
            None
        }
    }

    /// Converts every cell, keeping the shape
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl Grid<bool> {
    /// Number of foreground cells
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// `true` at (row, col); anything outside the grid is background
    pub fn is_set(&self, row: isize, col: isize) -> bool {
        self.get_signed(row, col).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec_checks_size() {
        assert!(Grid::from_vec(2, 3, vec![0.0; 6]).is_ok());
        let err = Grid::from_vec(2, 3, vec![0.0; 5]).unwrap_err();
        assert!(matches!(err, SliceposError::InvalidInput(_)));
    }

    #[test]
    fn test_indexing_is_row_major() {
        let grid = Grid::from_fn(3, 4, |r, c| (r * 10 + c) as f64);
        assert_eq!(grid.shape(), (3, 4));
        assert_eq!(grid.get(1, 2), Some(&12.0));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get_signed(-1, 0), None);
        assert_eq!(grid.row(2).unwrap(), &[20.0, 21.0, 22.0, 23.0]);
    }

    #[test]
    fn test_mask_helpers() {
        let mask = Grid::from_fn(4, 4, |r, c| r >= 1 && c < 2);
        assert_eq!(mask.count(), 6);
        assert!(mask.is_set(1, 0));
        assert!(!mask.is_set(0, 0));
        assert!(!mask.is_set(-1, 0));
        assert!(!mask.is_set(1, 7));
    }
}

//! Systems of hyperplanes and forward elimination to triangular form

use std::ops::Index;

use log::{debug, trace};
use num_traits::{Signed, Zero};

use crate::error::{LinSysError, Result};
use crate::hyperplane::Hyperplane;
use crate::scalar::{self, Scalar, NEAR_ZERO_TOLERANCE};

/// Options for [`LinearSystem::compute_triangular_form_with`]
#[derive(Debug, Clone)]
pub struct TriangularFormOptions {
    /// Coefficients with absolute value below this are treated as zero
    pub tolerance: f64,
}

impl Default for TriangularFormOptions {
    fn default() -> Self {
        Self {
            tolerance: NEAR_ZERO_TOLERANCE,
        }
    }
}

/// Ordered rows of hyperplanes sharing one dimension.
///
/// Row order is significant. Every row write checks the dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    planes: Vec<Hyperplane>,
    dimension: usize,
}

impl LinearSystem {
    /// Create a system from its rows
    ///
    /// # Errors
    /// [`LinSysError::EmptySystem`] for no rows and
    /// [`LinSysError::DimensionMismatch`] if the rows disagree on dimension.
    pub fn new(planes: Vec<Hyperplane>) -> Result<Self> {
        let dimension = planes
            .first()
            .ok_or(LinSysError::EmptySystem)?
            .dimension();
        if let Some(bad) = planes.iter().find(|p| p.dimension() != dimension) {
            return Err(LinSysError::dimension_mismatch(dimension, bad.dimension()));
        }
        Ok(Self { planes, dimension })
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.planes.len()
    }

    /// Always false; a system has at least one row
    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    /// Number of variables
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Rows in order
    pub fn planes(&self) -> &[Hyperplane] {
        &self.planes
    }

    /// Consume the system, returning its rows
    pub fn into_planes(self) -> Vec<Hyperplane> {
        self.planes
    }

    /// Row `i`, if present
    pub fn get(&self, i: usize) -> Option<&Hyperplane> {
        self.planes.get(i)
    }

    /// Row `i`
    ///
    /// # Errors
    /// [`LinSysError::RowOutOfBounds`] if `i` is not a row.
    pub fn row(&self, i: usize) -> Result<&Hyperplane> {
        self.planes.get(i).ok_or(LinSysError::RowOutOfBounds {
            row: i,
            nrows: self.len(),
        })
    }

    fn check_row(&self, i: usize) -> Result<()> {
        if i >= self.len() {
            return Err(LinSysError::RowOutOfBounds {
                row: i,
                nrows: self.len(),
            });
        }
        Ok(())
    }

    /// Replace row `i`
    ///
    /// # Errors
    /// [`LinSysError::DimensionMismatch`] if `plane` has another dimension,
    /// [`LinSysError::RowOutOfBounds`] if `i` is not a row.
    pub fn set_row(&mut self, i: usize, plane: Hyperplane) -> Result<()> {
        if plane.dimension() != self.dimension {
            return Err(LinSysError::dimension_mismatch(
                self.dimension,
                plane.dimension(),
            ));
        }
        self.check_row(i)?;
        self.planes[i] = plane;
        Ok(())
    }

    /// Exchange rows `row1` and `row2`
    pub fn swap_rows(&mut self, row1: usize, row2: usize) -> Result<()> {
        self.check_row(row1)?;
        self.check_row(row2)?;
        trace!("swap rows {row1} and {row2}");
        self.planes.swap(row1, row2);
        Ok(())
    }

    /// Replace `row` with `coefficient` times itself
    ///
    /// # Errors
    /// [`LinSysError::ZeroScalar`] if `coefficient` is zero.
    pub fn multiply_coefficient_and_row(&mut self, coefficient: &Scalar, row: usize) -> Result<()> {
        if coefficient.is_zero() {
            return Err(LinSysError::ZeroScalar { row });
        }
        let scaled = self.row(row)?.scaled(coefficient);
        trace!("multiply row {row} by {coefficient}");
        self.set_row(row, scaled)
    }

    /// Replace `row_to_be_added_to` with itself plus `coefficient` times `row_to_add`
    pub fn add_multiple_times_row_to_row(
        &mut self,
        coefficient: &Scalar,
        row_to_add: usize,
        row_to_be_added_to: usize,
    ) -> Result<()> {
        let source = self.row(row_to_add)?;
        let combined = self
            .row(row_to_be_added_to)?
            .plus_multiple_of(coefficient, source)?;
        trace!("add {coefficient} times row {row_to_add} to row {row_to_be_added_to}");
        self.set_row(row_to_be_added_to, combined)
    }

    /// Pivot column of each row, `None` for rows with an all near-zero normal
    pub fn indices_of_first_nonzero_terms_in_each_row(&self) -> Vec<Option<usize>> {
        self.planes
            .iter()
            .map(Hyperplane::first_nonzero_index)
            .collect()
    }

    /// A new system in triangular form with the same solution set.
    ///
    /// The receiver is left untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use linsys::{Hyperplane, LinearSystem};
    ///
    /// let system = LinearSystem::new(vec![
    ///     Hyperplane::plane("0", "1", "1", "1").unwrap(),
    ///     Hyperplane::plane("1", "-1", "1", "2").unwrap(),
    ///     Hyperplane::plane("1", "2", "-5", "3").unwrap(),
    /// ])
    /// .unwrap();
    ///
    /// let triangular = system.compute_triangular_form().unwrap();
    /// assert_eq!(
    ///     triangular.indices_of_first_nonzero_terms_in_each_row(),
    ///     vec![Some(0), Some(1), Some(2)]
    /// );
    /// assert_eq!(triangular[2], Hyperplane::plane("0", "0", "-9", "-2").unwrap());
    /// ```
    pub fn compute_triangular_form(&self) -> Result<LinearSystem> {
        self.compute_triangular_form_with(&TriangularFormOptions::default())
    }

    /// [`compute_triangular_form`](Self::compute_triangular_form) with a custom tolerance
    ///
    /// # Errors
    /// [`LinSysError::InvalidScalar`] for a non-finite tolerance and
    /// [`LinSysError::InvalidTolerance`] for one that is zero or negative.
    pub fn compute_triangular_form_with(
        &self,
        options: &TriangularFormOptions,
    ) -> Result<LinearSystem> {
        let tolerance = scalar::from_f64(options.tolerance)?;
        if !tolerance.is_positive() {
            return Err(LinSysError::InvalidTolerance {
                tolerance: options.tolerance.to_string(),
            });
        }
        let mut system = self.clone();
        system.triangularize_inplace(&tolerance)?;
        Ok(system)
    }

    fn triangularize_inplace(&mut self, tolerance: &Scalar) -> Result<()> {
        let num_equations = self.len();
        let num_variables = self.dimension;
        debug!("triangular form: {num_equations} equations, {num_variables} variables");

        // The column cursor is shared across rows and never moves back.
        let mut j = 0;
        for i in 0..num_equations {
            while j < num_variables {
                if self.is_near_zero_at(i, j, tolerance)
                    && !self.swap_with_row_below_for_nonzero_coefficient(i, j, tolerance)?
                {
                    j += 1;
                    continue;
                }
                debug!("pivot for row {i} in column {j}");
                self.clear_coefficients_below(i, j)?;
                j += 1;
                break;
            }
        }

        debug!(
            "triangular form done, pivots {:?}",
            self.indices_of_first_nonzero_terms_in_each_row()
        );
        Ok(())
    }

    fn coefficient_at(&self, row: usize, col: usize) -> Scalar {
        self.planes[row]
            .coefficient(col)
            .cloned()
            .unwrap_or_else(Scalar::zero)
    }

    fn is_near_zero_at(&self, row: usize, col: usize, tolerance: &Scalar) -> bool {
        self.coefficient_at(row, col).abs() < *tolerance
    }

    /// Swap the first row below `row` with a non-near-zero coefficient in `col` into `row`.
    fn swap_with_row_below_for_nonzero_coefficient(
        &mut self,
        row: usize,
        col: usize,
        tolerance: &Scalar,
    ) -> Result<bool> {
        match ((row + 1)..self.len()).find(|&k| !self.is_near_zero_at(k, col, tolerance)) {
            Some(k) => {
                self.swap_rows(row, k)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Eliminate `col` from every row below `row`
    fn clear_coefficients_below(&mut self, row: usize, col: usize) -> Result<()> {
        let beta = self.coefficient_at(row, col);
        for k in (row + 1)..self.len() {
            let gamma = self.coefficient_at(k, col);
            let alpha = -gamma / &beta;
            self.add_multiple_times_row_to_row(&alpha, row, k)?;
        }
        Ok(())
    }
}

impl Index<usize> for LinearSystem {
    type Output = Hyperplane;

    fn index(&self, i: usize) -> &Self::Output {
        &self.planes[i]
    }
}

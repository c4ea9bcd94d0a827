//! Exact fixed-dimension vectors

use std::f64::consts::PI;
use std::ops::Index;

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use crate::error::{LinSysError, Result};
use crate::scalar::{
    self, is_near_zero_within, near_zero_tolerance, round_half_even, IntoScalar, Scalar,
    ANGLE_ROUNDING_PLACES,
};

/// Immutable coordinate tuple over exact scalars.
///
/// Every operation returns a new vector. Equality is exact and component-wise.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Vector {
    coordinates: Vec<Scalar>,
}

impl Vector {
    /// Create a vector from any sequence of values convertible to [`Scalar`].
    ///
    /// # Errors
    /// [`LinSysError::InvalidVector`] if the sequence is empty, or
    /// [`LinSysError::InvalidScalar`] if an element fails to convert.
    ///
    /// # Example
    ///
    /// ```
    /// use linsys::Vector;
    ///
    /// let v = Vector::new(["1.5", "-2", "0"]).unwrap();
    /// assert_eq!(v.dimension(), 3);
    /// ```
    pub fn new<I, S>(coordinates: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: IntoScalar,
    {
        let coordinates = coordinates
            .into_iter()
            .map(IntoScalar::into_scalar)
            .collect::<Result<Vec<_>>>()?;
        Self::from_scalars(coordinates)
    }

    /// Create a vector from already-exact coordinates
    pub fn from_scalars(coordinates: Vec<Scalar>) -> Result<Self> {
        if coordinates.is_empty() {
            return Err(LinSysError::InvalidVector {
                message: "The coordinates must be nonempty".to_string(),
            });
        }
        Ok(Self { coordinates })
    }

    /// Zero vector of the given dimension
    pub fn zeros(dimension: usize) -> Result<Self> {
        Self::from_scalars(vec![Scalar::zero(); dimension])
    }

    /// Number of coordinates
    pub fn dimension(&self) -> usize {
        self.coordinates.len()
    }

    /// Coordinates in order
    pub fn coordinates(&self) -> &[Scalar] {
        &self.coordinates
    }

    /// Coordinate `i`, if present
    pub fn get(&self, i: usize) -> Option<&Scalar> {
        self.coordinates.get(i)
    }

    /// Iterate over the coordinates
    pub fn iter(&self) -> std::slice::Iter<'_, Scalar> {
        self.coordinates.iter()
    }

    fn check_dimension(&self, other: &Vector) -> Result<()> {
        if self.dimension() != other.dimension() {
            return Err(LinSysError::dimension_mismatch(
                self.dimension(),
                other.dimension(),
            ));
        }
        Ok(())
    }

    fn zip_with(&self, other: &Vector, f: impl Fn(&Scalar, &Scalar) -> Scalar) -> Result<Vector> {
        self.check_dimension(other)?;
        let coordinates = self
            .coordinates
            .iter()
            .zip(other.coordinates.iter())
            .map(|(x, y)| f(x, y))
            .collect();
        Ok(Vector { coordinates })
    }

    /// Component-wise sum
    pub fn plus(&self, other: &Vector) -> Result<Vector> {
        self.zip_with(other, |x, y| x + y)
    }

    /// Component-wise difference
    pub fn minus(&self, other: &Vector) -> Result<Vector> {
        self.zip_with(other, |x, y| x - y)
    }

    /// Multiply every coordinate by `k`
    pub fn times_scalar(&self, k: &Scalar) -> Vector {
        Vector {
            coordinates: self.coordinates.iter().map(|x| x * k).collect(),
        }
    }

    /// Exact dot product
    pub fn dot_product(&self, other: &Vector) -> Result<Scalar> {
        self.check_dimension(other)?;
        Ok(self
            .coordinates
            .iter()
            .zip(other.coordinates.iter())
            .fold(Scalar::zero(), |acc, (x, y)| acc + x * y))
    }

    fn squared_magnitude(&self) -> Scalar {
        self.coordinates
            .iter()
            .fold(Scalar::zero(), |acc, x| acc + x * x)
    }

    /// Euclidean norm, exact for perfect squares and otherwise truncated to
    /// [`scalar::DECIMAL_PLACES`] decimal places.
    pub fn magnitude(&self) -> Scalar {
        scalar::sqrt(&self.squared_magnitude())
    }

    /// Unit vector in the same direction
    ///
    /// # Errors
    /// [`LinSysError::ZeroVector`] if the vector is zero within tolerance.
    pub fn normalized(&self) -> Result<Vector> {
        let magnitude = self.magnitude();
        if self.is_zero() || magnitude.is_zero() {
            return Err(LinSysError::ZeroVector {
                operation: "normalize",
            });
        }
        Ok(self.times_scalar(&magnitude.recip()))
    }

    /// Magnitude below the default near-zero tolerance
    pub fn is_zero(&self) -> bool {
        self.is_zero_within(&near_zero_tolerance())
    }

    /// Magnitude below `tolerance`
    pub fn is_zero_within(&self, tolerance: &Scalar) -> bool {
        // |v| < t  <=>  |v|^2 < t^2, without going through the truncated root
        self.squared_magnitude() < tolerance * tolerance
    }

    /// Dot product is zero within tolerance
    pub fn is_orthogonal_to(&self, other: &Vector) -> Result<bool> {
        let dot = self.dot_product(other)?;
        Ok(is_near_zero_within(&dot, &near_zero_tolerance()))
    }

    /// Cosine of the angle between the two vectors, rounded to
    /// [`ANGLE_ROUNDING_PLACES`] so it never leaves `[-1, 1]`.
    fn rounded_cosine_with(&self, other: &Vector) -> Result<Scalar> {
        self.check_dimension(other)?;
        let (u1, u2) = match (self.normalized(), other.normalized()) {
            (Ok(u1), Ok(u2)) => (u1, u2),
            _ => {
                return Err(LinSysError::ZeroVector {
                    operation: "compute an angle",
                })
            }
        };
        let cosine = u1.dot_product(&u2)?;
        Ok(round_half_even(&cosine, ANGLE_ROUNDING_PLACES))
    }

    /// Angle in radians
    pub fn angle_with(&self, other: &Vector) -> Result<f64> {
        let cosine = self.rounded_cosine_with(other)?;
        Ok(scalar::to_f64(&cosine).clamp(-1.0, 1.0).acos())
    }

    /// Angle in degrees
    pub fn angle_in_degrees_with(&self, other: &Vector) -> Result<f64> {
        Ok(self.angle_with(other)?.to_degrees())
    }

    /// True if either vector is zero or the angle between them is 0 or pi
    pub fn is_parallel_to(&self, other: &Vector) -> Result<bool> {
        self.check_dimension(other)?;
        if self.is_zero() || other.is_zero() {
            return Ok(true);
        }
        let angle = self.angle_with(other)?;
        Ok(angle == 0.0 || angle == PI)
    }

    /// Projection of `self` onto the direction of `basis`
    pub fn projection_on(&self, basis: &Vector) -> Result<Vector> {
        let u = basis.normalized().map_err(|_| LinSysError::ZeroVector {
            operation: "project onto a basis",
        })?;
        let weight = self.dot_product(&u)?;
        Ok(u.times_scalar(&weight))
    }

    /// `self` minus its projection onto `basis`
    pub fn component_orthogonal_to(&self, basis: &Vector) -> Result<Vector> {
        let projection = self.projection_on(basis)?;
        self.minus(&projection)
    }

    /// Cross product. Two 2D vectors are embedded in the `z = 0` plane.
    pub fn cross_product_with(&self, other: &Vector) -> Result<Vector> {
        self.check_dimension(other)?;
        let c = &self.coordinates;
        let d = &other.coordinates;
        let coordinates = match self.dimension() {
            3 => vec![
                &c[1] * &d[2] - &d[1] * &c[2],
                -(&c[0] * &d[2] - &d[0] * &c[2]),
                &c[0] * &d[1] - &d[0] * &c[1],
            ],
            2 => vec![
                Scalar::zero(),
                Scalar::zero(),
                &c[0] * &d[1] - &d[0] * &c[1],
            ],
            dimension => {
                return Err(LinSysError::UnsupportedDimension {
                    operation: "cross product",
                    dimension,
                })
            }
        };
        Ok(Vector { coordinates })
    }

    /// Area of the parallelogram spanned by the two vectors
    pub fn area_of_parallelogram_with(&self, other: &Vector) -> Result<Scalar> {
        Ok(self.cross_product_with(other)?.magnitude())
    }

    /// Area of the triangle spanned by the two vectors
    pub fn area_of_triangle_with(&self, other: &Vector) -> Result<Scalar> {
        let half = Scalar::new(BigInt::one(), BigInt::from(2));
        Ok(self.area_of_parallelogram_with(other)? * half)
    }

    /// Index of the first coordinate not within the default tolerance of zero
    pub fn first_nonzero_index(&self) -> Option<usize> {
        self.first_nonzero_index_within(&near_zero_tolerance())
    }

    /// Index of the first coordinate not within `tolerance` of zero.
    ///
    /// Exact zeros never qualify, whatever the tolerance.
    pub fn first_nonzero_index_within(&self, tolerance: &Scalar) -> Option<usize> {
        self.coordinates
            .iter()
            .position(|x| !x.is_zero() && x.abs() >= *tolerance)
    }
}

impl Index<usize> for Vector {
    type Output = Scalar;

    fn index(&self, i: usize) -> &Self::Output {
        &self.coordinates[i]
    }
}

impl<'a> IntoIterator for &'a Vector {
    type Item = &'a Scalar;
    type IntoIter = std::slice::Iter<'a, Scalar>;

    fn into_iter(self) -> Self::IntoIter {
        self.coordinates.iter()
    }
}

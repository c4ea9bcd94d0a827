//! Hyperplanes `normal · x = constant` (lines in 2D, planes in 3D)

use num_traits::Zero;

use crate::error::{LinSysError, Result};
use crate::scalar::{is_near_zero, IntoScalar, Scalar};
use crate::vector::Vector;

/// The set of points `x` with `normal_vector · x = constant_term`.
///
/// The basepoint is computed once at construction; every change produces a
/// new hyperplane.
#[derive(Debug, Clone)]
pub struct Hyperplane {
    normal_vector: Vector,
    constant_term: Scalar,
    basepoint: Option<Vector>,
}

/// Kind of a hyperplane whose normal vector is all near-zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    /// `0 = 0`, satisfied everywhere
    AlwaysTrue,
    /// `0 = c` with `c != 0`, satisfied nowhere
    Contradiction,
}

/// Result of intersecting two lines in the plane
#[derive(Debug, Clone, PartialEq)]
pub enum LineIntersection {
    /// The lines cross at a single point
    Point(Vector),
    /// The lines are the same line
    Coincident,
    /// The lines are parallel and distinct
    Parallel,
}

impl Hyperplane {
    /// Create a hyperplane from a normal vector and an exact constant term
    pub fn new(normal_vector: Vector, constant_term: Scalar) -> Self {
        let basepoint = compute_basepoint(&normal_vector, &constant_term);
        Self {
            normal_vector,
            constant_term,
            basepoint,
        }
    }

    /// Create a hyperplane, converting the constant term
    pub fn with_constant<S: IntoScalar>(normal_vector: Vector, constant_term: S) -> Result<Self> {
        Ok(Self::new(normal_vector, constant_term.into_scalar()?))
    }

    /// Create a hyperplane from its coefficients and constant term
    ///
    /// # Example
    ///
    /// ```
    /// use linsys::Hyperplane;
    ///
    /// let p = Hyperplane::from_coefficients(["1", "-1", "1"], "2").unwrap();
    /// assert_eq!(p.dimension(), 3);
    /// assert_eq!(p.to_string(), "x_1 - x_2 + x_3 = 2");
    /// ```
    pub fn from_coefficients<I, S, C>(coefficients: I, constant_term: C) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: IntoScalar,
        C: IntoScalar,
    {
        Self::with_constant(Vector::new(coefficients)?, constant_term)
    }

    /// Line `a x_1 + b x_2 = c`
    pub fn line<S: IntoScalar>(a: S, b: S, c: S) -> Result<Self> {
        Self::from_coefficients([a, b], c)
    }

    /// Plane `a x_1 + b x_2 + c x_3 = d`
    pub fn plane<S: IntoScalar>(a: S, b: S, c: S, d: S) -> Result<Self> {
        Self::from_coefficients([a, b, c], d)
    }

    /// `0 = 0` in the given dimension
    pub fn zero(dimension: usize) -> Result<Self> {
        Ok(Self::new(Vector::zeros(dimension)?, Scalar::zero()))
    }

    /// `0 = constant_term` in the given dimension
    pub fn constant_only<S: IntoScalar>(dimension: usize, constant_term: S) -> Result<Self> {
        Self::with_constant(Vector::zeros(dimension)?, constant_term)
    }

    /// Normal vector
    pub fn normal_vector(&self) -> &Vector {
        &self.normal_vector
    }

    /// Constant term
    pub fn constant_term(&self) -> &Scalar {
        &self.constant_term
    }

    /// Dimension of the ambient space
    pub fn dimension(&self) -> usize {
        self.normal_vector.dimension()
    }

    /// A point on the hyperplane, `None` when the normal vector is all near-zero
    pub fn basepoint(&self) -> Option<&Vector> {
        self.basepoint.as_ref()
    }

    /// Coefficient of variable `j`
    pub fn coefficient(&self, j: usize) -> Option<&Scalar> {
        self.normal_vector.get(j)
    }

    /// Pivot column: the first coefficient that is not near zero.
    ///
    /// `None` marks a degenerate hyperplane (`0 = c`).
    pub fn first_nonzero_index(&self) -> Option<usize> {
        self.normal_vector.first_nonzero_index()
    }

    /// Pivot column against a custom tolerance
    pub fn first_nonzero_index_within(&self, tolerance: &Scalar) -> Option<usize> {
        self.normal_vector.first_nonzero_index_within(tolerance)
    }

    /// Pivot column for callers that require a non-degenerate hyperplane
    ///
    /// # Errors
    /// [`LinSysError::NoNonzeroElements`] if every coefficient is near zero.
    pub fn pivot_index(&self) -> Result<usize> {
        self.first_nonzero_index()
            .ok_or(LinSysError::NoNonzeroElements)
    }

    /// All coefficients near zero
    pub fn is_degenerate(&self) -> bool {
        self.first_nonzero_index().is_none()
    }

    /// Classify a degenerate hyperplane; `None` if it has a pivot
    pub fn degeneracy(&self) -> Option<Degeneracy> {
        if !self.is_degenerate() {
            return None;
        }
        if is_near_zero(&self.constant_term) {
            Some(Degeneracy::AlwaysTrue)
        } else {
            Some(Degeneracy::Contradiction)
        }
    }

    /// Normal vectors are parallel
    pub fn is_parallel_to(&self, other: &Hyperplane) -> Result<bool> {
        self.normal_vector.is_parallel_to(&other.normal_vector)
    }

    /// `(k n, k c)`
    pub fn scaled(&self, k: &Scalar) -> Hyperplane {
        Hyperplane::new(
            self.normal_vector.times_scalar(k),
            &self.constant_term * k,
        )
    }

    /// `(n + k n_other, c + k c_other)`
    pub fn plus_multiple_of(&self, k: &Scalar, other: &Hyperplane) -> Result<Hyperplane> {
        let normal_vector = self
            .normal_vector
            .plus(&other.normal_vector.times_scalar(k))?;
        let constant_term = &self.constant_term + k * &other.constant_term;
        Ok(Hyperplane::new(normal_vector, constant_term))
    }

    /// Intersect two lines in the plane
    ///
    /// # Errors
    /// [`LinSysError::DimensionMismatch`] if the dimensions differ and
    /// [`LinSysError::UnsupportedDimension`] outside 2D.
    pub fn intersection_with(&self, other: &Hyperplane) -> Result<LineIntersection> {
        if self.dimension() != other.dimension() {
            return Err(LinSysError::dimension_mismatch(
                self.dimension(),
                other.dimension(),
            ));
        }
        if self.dimension() != 2 {
            return Err(LinSysError::UnsupportedDimension {
                operation: "line intersection",
                dimension: self.dimension(),
            });
        }

        let (a, b) = (&self.normal_vector[0], &self.normal_vector[1]);
        let (c, d) = (&other.normal_vector[0], &other.normal_vector[1]);
        let (k1, k2) = (&self.constant_term, &other.constant_term);

        let denom = a * d - b * c;
        if is_near_zero(&denom) {
            return Ok(if self == other {
                LineIntersection::Coincident
            } else {
                LineIntersection::Parallel
            });
        }

        let x = (d * k1 - b * k2) / &denom;
        let y = (a * k2 - c * k1) / &denom;
        Ok(LineIntersection::Point(Vector::from_scalars(vec![x, y])?))
    }
}

fn compute_basepoint(normal_vector: &Vector, constant_term: &Scalar) -> Option<Vector> {
    let k = normal_vector.first_nonzero_index()?;
    let mut coordinates = vec![Scalar::zero(); normal_vector.dimension()];
    coordinates[k] = constant_term / &normal_vector[k];
    Vector::from_scalars(coordinates).ok()
}

impl PartialEq for Hyperplane {
    /// Same geometric locus, regardless of scale.
    fn eq(&self, other: &Self) -> bool {
        if self.dimension() != other.dimension() {
            return false;
        }

        let self_degenerate = self.is_degenerate();
        let other_degenerate = other.is_degenerate();
        if self_degenerate || other_degenerate {
            return self_degenerate
                && other_degenerate
                && is_near_zero(&(&self.constant_term - &other.constant_term));
        }

        if !self.is_parallel_to(other).unwrap_or(false) {
            return false;
        }

        match (&self.basepoint, &other.basepoint) {
            (Some(b1), Some(b2)) => b1
                .minus(b2)
                .and_then(|diff| diff.is_orthogonal_to(&self.normal_vector))
                .unwrap_or(false),
            _ => false,
        }
    }
}

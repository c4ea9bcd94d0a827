#![warn(missing_docs)]
//! Exact-arithmetic linear systems library
//!
//! This crate provides small, fixed-dimension linear algebra over exact
//! rationals, including:
//! - `Vector`: Immutable coordinate tuples with dot products, norms and
//!   parallel/orthogonal tests
//! - `Hyperplane`: Lines and planes `normal · x = constant` with geometric equality
//! - `LinearSystem`: Row operations and forward elimination to triangular form
//!
//! # Example
//!
//! ```
//! use linsys::{Hyperplane, LinearSystem};
//!
//! let system = LinearSystem::new(vec![
//!     Hyperplane::plane("1", "1", "1", "1").unwrap(),
//!     Hyperplane::plane("1", "1", "1", "2").unwrap(),
//! ])
//! .unwrap();
//!
//! let triangular = system.compute_triangular_form().unwrap();
//! println!("{triangular}");
//! assert_eq!(triangular[1], Hyperplane::constant_only(3, "1").unwrap());
//! ```

pub mod error;
pub mod format;
pub mod hyperplane;
pub mod linear_system;
pub mod scalar;
pub mod vector;

// Re-export main types
pub use error::{LinSysError, Result};
pub use hyperplane::{Degeneracy, Hyperplane, LineIntersection};
pub use linear_system::{LinearSystem, TriangularFormOptions};
pub use scalar::{to_scalar, IntoScalar, Scalar, NEAR_ZERO_TOLERANCE};
pub use vector::Vector;

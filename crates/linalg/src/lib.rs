//! Dense matrix operations for small quality-tier transition matrices.
//!
//! Two operations, both allocating fresh output and never touching their
//! inputs:
//!
//! - [`multiply`]: the ordinary matrix product `A · B`.
//! - [`invert`]: Gauss-Jordan inversion with diagonal pivots, eliminating
//!   from the last row upwards.
//!
//! # Quick start
//!
//! ```rust
//! use ndarray::array;
//! use upcycle_linalg::{invert, multiply};
//!
//! let a = array![[0.5, 0.25], [0.0, 0.5]];
//! let inv = invert(&a).unwrap();
//! let id = multiply(&a, &inv).unwrap();
//! assert!((id[[0, 0]] - 1.0).abs() < 1e-12);
//! assert!(id[[0, 1]].abs() < 1e-12);
//! ```

mod error;
mod inverse;
mod product;

pub use error::LinalgError;
pub use inverse::{PIVOT_TOLERANCE, invert};
pub use product::multiply;

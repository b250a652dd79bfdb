//! Concurrent matrix multiplication, five ways.
//!
//! I built this to see how much the synchronization discipline matters
//! once you parallelize a plain triple loop. Every variant computes the
//! same `C = A · B` for A (p × q) and B stored pre-transposed as B^T
//! (r × q); they only differ in how they split the work and who gets to
//! write the output:
//!
//! - [`multiply_sequential`]: single-threaded reference
//! - [`multiply_inner`]: one task per output cell, no locks at all
//! - [`multiply_outer_contended`]: one task per k, a lock per scalar add (deliberately awful)
//! - [`multiply_outer_batched`]: one task per k, one locked merge per task
//! - [`multiply_outer_reduced`]: one task per k, buffers moved to a single reducer over a channel
//!
//! ## Usage
//!
//! ```
//! use concmul::{generate_seeded, multiply_inner, multiply_sequential};
//!
//! let a = generate_seeded(64, 32, 1).unwrap();   // p × q
//! let bt = generate_seeded(48, 32, 2).unwrap();  // r × q, i.e. B^T
//!
//! let c = multiply_inner(&a, &bt).unwrap();
//! assert_eq!((c.rows(), c.cols()), (64, 48));
//! assert_eq!(c, multiply_sequential(&a, &bt).unwrap());
//! ```
//!
//! To time all of them on the same inputs and cross-check the outputs,
//! see [`harness`].

pub mod config;
pub mod error;
pub mod harness;
pub mod matrix;
pub mod threaded;

pub use config::BenchConfig;
pub use error::{MatmulError, Result};
pub use harness::Algorithm;
pub use matrix::Matrix;
pub use matrix::generate::{generate, generate_seeded};
pub use matrix::naive::multiply_sequential;
pub use threaded::inner::multiply_inner;
pub use threaded::outer_batched::multiply_outer_batched;
pub use threaded::outer_contended::multiply_outer_contended;
pub use threaded::outer_reduced::multiply_outer_reduced;

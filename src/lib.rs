//! # lpmat Core
//!
//! Sparse matrix engine for an incremental Simplex tableau.
//!
//! This library provides:
//! - A cross-indexed sparse matrix with row and column views kept in sync
//! - Row operations for basis exchange and pivoting of new rows
//! - Scoped rollback of matrix dimensions and variable registrations
//! - A register mapping external variable ids to dense local columns
//! - A small language for describing and replaying tableau systems
//!
//! ## Architecture
//!
//! - [`matrix`] - [`StaticMatrix`], its cells, diagnostics and self-checks
//! - [`register`] - [`VarRegister`] for external/local variable ids
//! - [`tableau`] - [`Tableau`] keeping matrix, register and basis in lock-step
//! - [`dsl`] - Parser for the system description language
//! - [`system`] - Named systems replayed from parsed descriptions
//!
//! ## Usage
//!
//! ```bash
//! lpmat system.lp
//! ```
//!
//! ```text
//! .int x y
//! s = x + 2 y
//! .pivot s x
//! ```
//!
//! prints `x = -2*y + s` followed by diagnostics.
//!
//! ## Coefficients
//!
//! Every structure is generic over a [`Coefficient`] type. Exact solving uses
//! `BigRational`; `f64` works for the same operations with rounding.

pub mod dsl;
pub mod error;
pub mod matrix;
pub mod numeric;
pub mod register;
pub mod system;
pub mod tableau;
pub mod term;

// Re-export main types for convenience
pub use error::{LpError, Result};
pub use matrix::{BasisHeading, StaticMatrix};
pub use numeric::Coefficient;
pub use register::{VarRegister, NO_EXTERNAL};
pub use system::System;
pub use tableau::{Tableau, TableauConfig, DEFAULT_COLUMN_CAPACITY, DEFAULT_ROW_CAPACITY};
pub use term::LinearTerm;

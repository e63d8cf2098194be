//! Tableau driver.
//!
//! A [`Tableau`] keeps a [`StaticMatrix`](crate::matrix::StaticMatrix), a
//! [`VarRegister`](crate::register::VarRegister) and the basis heading in
//! lock-step. Every row is kept in solved form:
//!
//! ```text
//! x_b - Σ c_k·x_k = 0        (coefficient one on the basic x_b,
//!                             all x_k nonbasic)
//! ```
//!
//! New definitions are substituted against the current basis on insertion,
//! basis exchanges keep the solved form, and scopes roll back the matrix, the
//! register and the basis together. Choosing which variables to exchange is
//! left to the caller.

mod config;
mod driver;

pub use config::TableauConfig;
pub use driver::Tableau;

/// Default number of rows reserved by a new tableau.
pub const DEFAULT_ROW_CAPACITY: usize = 64;

/// Default number of columns reserved by a new tableau.
pub const DEFAULT_COLUMN_CAPACITY: usize = 128;

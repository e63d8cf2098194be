//! Named systems built from the description language.
//!
//! A [`System`] replays a parsed [`SystemAst`](crate::dsl::SystemAst) onto a
//! [`Tableau`](crate::tableau::Tableau) over exact rationals, resolving
//! variable names to external ids along the way.

mod model;
mod report;

pub use model::System;

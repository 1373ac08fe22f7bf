//! Expression IR for predicate conditions.
//!
//! Conditions are plain [`Expr`] trees. The optimizer only distinguishes
//! columns, literals, comparisons, conjunctions and disjunctions; every other
//! node is carried through untouched apart from column substitution.

mod expr;
mod literal;

pub use expr::{BinaryOp, ColumnKey, Expr, UnaryOp};
pub use literal::Literal;

//! constprop - constant propagation for SQL filter conditions.
//!
//! A filter such as `WHERE a = b AND b = c AND c < 5 AND d = 1 AND e > d`
//! carries facts that can be pushed into its other conditions. Propagation
//! rewrites it into
//!
//! ```text
//! a = b AND b = c AND c < 5 AND d = 1 AND e > 1 AND a < 5 AND b < 5
//! ```
//!
//! and turns conditions that can never hold together, such as
//! `a = 1 AND a = 2`, into a single `FALSE`.
//!
//! # Crates
//!
//! - [`constprop_common`]: error type and data types;
//! - [`constprop_ir`]: the [`Expr`] tree conditions are written in;
//! - [`constprop_optimizer`]: the [`ConstantPropagator`] itself.
//!
//! # Example
//!
//! ```rust
//! use constprop::{BinaryOp, ConstantPropagator, Expr, Literal};
//!
//! let conditions = vec![
//!     Expr::binary(Expr::column("a"), BinaryOp::Eq, Expr::literal(Literal::Int64(1))),
//!     Expr::binary(Expr::column("b"), BinaryOp::Gt, Expr::column("a")),
//! ];
//!
//! let propagated = ConstantPropagator::default().propagate(&conditions);
//! assert_eq!(
//!     propagated[1],
//!     Expr::binary(Expr::column("b"), BinaryOp::Gt, Expr::literal(Literal::Int64(1))),
//! );
//! ```

pub use constprop_common::error::{Error, Result};
pub use constprop_common::types::DataType;
pub use constprop_ir::{BinaryOp, ColumnKey, Expr, Literal, UnaryOp};
pub use constprop_optimizer::{
    ConstantPropagator, DEFAULT_MAX_PROPAGATE_COLUMNS, LogObserver, NoopObserver,
    PropagationEvent, PropagationObserver, PropagationSettings, fold_constants,
    propagate_constants, propagate_predicate,
};

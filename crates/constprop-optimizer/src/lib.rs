//! Constant propagation for SQL filter conditions.
//!
//! [`ConstantPropagator`] takes a set of implicitly ANDed conditions and
//! rewrites it using the `column = constant` and `column = column` facts it
//! contains. The rewrite never changes which rows satisfy the conditions.

mod events;
mod planner;
mod settings;
#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod tests;

use constprop_ir::Expr;
pub use events::{LogObserver, NoopObserver, PropagationEvent, PropagationObserver};
pub use planner::predicate::{
    collect_columns, combine_or_predicates, combine_predicates, split_and_predicates,
    split_or_predicates,
};
pub use planner::{ConstantPropagator, fold_constants};
pub use settings::{DEFAULT_MAX_PROPAGATE_COLUMNS, PropagationSettings};

/// Propagates constants through `conditions` with the default settings.
pub fn propagate_constants(conditions: &[Expr]) -> Vec<Expr> {
    ConstantPropagator::default().propagate(conditions)
}

/// Propagates constants through a single predicate with the default settings.
pub fn propagate_predicate(predicate: &Expr) -> Expr {
    ConstantPropagator::default().propagate_predicate(predicate)
}

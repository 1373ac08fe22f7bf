//! Diagnostics raised while propagating constants.
//!
//! The propagator never writes output itself. It reports what happened to a
//! [`PropagationObserver`]; [`LogObserver`] renders events through the `log`
//! facade and is what [`ConstantPropagator::default`] uses.
//!
//! [`ConstantPropagator::default`]: crate::ConstantPropagator

use constprop_ir::{ColumnKey, Expr, Literal};

const LOG_TARGET: &str = "constprop::propagation";

#[derive(Debug, Clone, PartialEq)]
pub enum PropagationEvent {
    /// The condition set references more distinct columns than allowed; it
    /// was returned unchanged.
    ColumnLimitExceeded { columns: usize, max: usize },
    /// A column was compared for equality with NULL.
    NullEquality { column: ColumnKey },
    /// A column was bound to two different constants.
    ConflictingConstants {
        column: ColumnKey,
        existing: Literal,
        incoming: Literal,
    },
    /// A column was bound to two constants whose types cannot be compared.
    /// The second fact is left in place untouched.
    IncomparableConstants {
        column: ColumnKey,
        existing: Literal,
        incoming: Literal,
    },
    /// A conjunct folded to FALSE once constants were substituted into it.
    FoldedToFalse { condition: Expr },
    /// Substitution stopped after the round budget with work possibly left.
    RoundLimitReached { rounds: usize },
}

impl PropagationEvent {
    /// Whether the event made the whole condition set collapse to FALSE.
    pub fn is_contradiction(&self) -> bool {
        matches!(
            self,
            PropagationEvent::NullEquality { .. }
                | PropagationEvent::ConflictingConstants { .. }
                | PropagationEvent::FoldedToFalse { .. }
        )
    }
}

pub trait PropagationObserver: Send + Sync {
    fn on_event(&self, event: &PropagationEvent);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl PropagationObserver for LogObserver {
    fn on_event(&self, event: &PropagationEvent) {
        match event {
            PropagationEvent::ColumnLimitExceeded { columns, max } => log::warn!(
                target: LOG_TARGET,
                "too many columns in a single CNF: the column count is {}, the max count is {}",
                columns,
                max
            ),
            PropagationEvent::RoundLimitReached { rounds } => log::warn!(
                target: LOG_TARGET,
                "equality propagation stopped after {} rounds",
                rounds
            ),
            PropagationEvent::NullEquality { column } => log::debug!(
                target: LOG_TARGET,
                "{} = NULL can never hold, conditions folded to FALSE",
                column
            ),
            PropagationEvent::ConflictingConstants {
                column,
                existing,
                incoming,
            } => log::debug!(
                target: LOG_TARGET,
                "{} bound to both {} and {}, conditions folded to FALSE",
                column,
                existing,
                incoming
            ),
            PropagationEvent::FoldedToFalse { condition } => log::debug!(
                target: LOG_TARGET,
                "{} folds to FALSE, conditions folded to FALSE",
                condition
            ),
            PropagationEvent::IncomparableConstants {
                column,
                existing,
                incoming,
            } => log::debug!(
                target: LOG_TARGET,
                "{} bound to {} and {} of incomparable types, keeping the first",
                column,
                existing,
                incoming
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PropagationObserver for NoopObserver {
    fn on_event(&self, _event: &PropagationEvent) {}
}

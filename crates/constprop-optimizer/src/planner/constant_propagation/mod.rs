//! Constant propagation over a conjunction of predicates.
//!
//! Given `a = b AND b = c AND c < 5 AND d = 1 AND e > d` the propagator
//! substitutes `d` by `1` everywhere (`e > 1`) and, because `a`, `b` and `c`
//! hold the same value, adds `a < 5` and `b < 5`. A column bound to two
//! different constants, or compared with NULL for equality, turns the whole
//! conjunction into a single `FALSE`.
//!
//! Work happens in a fixed order:
//!
//! 1. every input condition is split into its conjuncts and the referenced
//!    columns get dense ids; past the column cap the input is returned as is;
//! 2. `column = constant` facts are substituted into the other conjuncts until
//!    nothing new is found ([`equality`]);
//! 3. inequalities are copied across columns linked by `column = column`
//!    conjuncts of the input ([`equivalence`]);
//! 4. each branch of a top-level `OR` is propagated on its own
//!    ([`disjunction`]).

mod column_index;
mod disjunction;
mod equality;
mod equivalence;

use std::slice;
use std::sync::Arc;

use constprop_ir::{BinaryOp, Expr, Literal};

use self::column_index::ColumnIndex;
use crate::events::{LogObserver, PropagationEvent, PropagationObserver};
use crate::planner::predicate::{collect_columns_into, combine_predicates, split_and_predicates};
use crate::settings::PropagationSettings;

/// Entry point for propagating constants through condition sets.
///
/// The propagator holds no per-call state; every call to
/// [`propagate`](Self::propagate) runs a fresh solver.
#[derive(Clone)]
pub struct ConstantPropagator {
    settings: PropagationSettings,
    observer: Arc<dyn PropagationObserver>,
}

impl Default for ConstantPropagator {
    fn default() -> Self {
        Self::new(PropagationSettings::default())
    }
}

impl ConstantPropagator {
    pub fn new(settings: PropagationSettings) -> Self {
        Self {
            settings,
            observer: Arc::new(LogObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn PropagationObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn settings(&self) -> &PropagationSettings {
        &self.settings
    }

    /// Propagates constants through `conditions`, which are implicitly ANDed.
    ///
    /// The result is again an implicit conjunction: the surviving input
    /// conjuncts in their original order followed by the derived ones, or a
    /// single `FALSE` when the conditions cannot all hold. When the conditions
    /// reference more columns than the configured cap the input is returned
    /// unchanged.
    pub fn propagate(&self, conditions: &[Expr]) -> Vec<Expr> {
        PropagationSolver::new(&self.settings, self.observer.as_ref()).solve(conditions)
    }

    /// Propagates constants through a single filter predicate and re-ANDs the
    /// result.
    pub fn propagate_predicate(&self, predicate: &Expr) -> Expr {
        combine_predicates(self.propagate(slice::from_ref(predicate)))
            .unwrap_or_else(|| predicate.clone())
    }
}

/// A comparison between a bare column and a literal, in either order.
pub(crate) struct ColumnConstant<'e> {
    pub(crate) column: &'e Expr,
    pub(crate) constant: &'e Literal,
    pub(crate) op: BinaryOp,
    pub(crate) constant_on_left: bool,
}

impl<'e> ColumnConstant<'e> {
    pub(crate) fn match_condition(condition: &'e Expr) -> Option<Self> {
        let Expr::BinaryOp { left, op, right } = condition else {
            return None;
        };
        if !op.is_comparison() {
            return None;
        }
        let (left, right) = (left.as_ref(), right.as_ref());
        match (left, right) {
            (Expr::Column { .. }, Expr::Literal(constant)) => Some(Self {
                column: left,
                constant,
                op: *op,
                constant_on_left: false,
            }),
            (Expr::Literal(constant), Expr::Column { .. }) => Some(Self {
                column: right,
                constant,
                op: *op,
                constant_on_left: true,
            }),
            _ => None,
        }
    }

    /// The same comparison against another column, keeping operand order.
    pub(crate) fn with_column(&self, column: &Expr) -> Expr {
        let constant = Expr::Literal(self.constant.clone());
        if self.constant_on_left {
            Expr::binary(constant, self.op, column.clone())
        } else {
            Expr::binary(column.clone(), self.op, constant)
        }
    }
}

/// State of a single propagation call. Never reused across calls.
pub(crate) struct PropagationSolver<'a> {
    settings: &'a PropagationSettings,
    observer: &'a dyn PropagationObserver,
    columns: ColumnIndex,
    conditions: Vec<Expr>,
    forever_false: bool,
}

impl<'a> PropagationSolver<'a> {
    pub(crate) fn new(
        settings: &'a PropagationSettings,
        observer: &'a dyn PropagationObserver,
    ) -> Self {
        Self {
            settings,
            observer,
            columns: ColumnIndex::new(),
            conditions: Vec::new(),
            forever_false: false,
        }
    }

    pub(crate) fn solve(mut self, conditions: &[Expr]) -> Vec<Expr> {
        let mut referenced = Vec::new();
        for condition in conditions {
            self.conditions.extend(split_and_predicates(condition));
            collect_columns_into(condition, &mut referenced);
        }
        for column in referenced {
            self.columns.insert(column);
        }

        let max = self.settings.max_propagate_columns;
        if self.columns.len() > max {
            self.observer.on_event(&PropagationEvent::ColumnLimitExceeded {
                columns: self.columns.len(),
                max,
            });
            return conditions.to_vec();
        }

        // Column equivalences come from the conjuncts as written, before
        // substitution rewrites any of them.
        let direct_equalities = self.direct_equalities();

        self.propagate_equalities();
        if self.forever_false {
            return self.conditions;
        }
        self.propagate_inequalities(&direct_equalities);
        self.propagate_disjunctions();
        self.conditions
    }

    fn collapse_to_false(&mut self, event: PropagationEvent) {
        self.observer.on_event(&event);
        self.forever_false = true;
        self.conditions = vec![Expr::literal_false()];
    }
}

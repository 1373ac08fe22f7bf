use constprop_ir::Expr;

use super::PropagationSolver;
use crate::planner::predicate::{
    combine_or_predicates, combine_predicates, is_disjunction, split_and_predicates,
    split_or_predicates,
};

impl PropagationSolver<'_> {
    /// Propagates inside every branch of each top-level `OR` conjunct.
    ///
    /// Each branch gets its own solver, so a fact from one branch never
    /// reaches another: `(a = 1 AND b = a) OR (c = a)` leaves the right
    /// branch untouched.
    pub(super) fn propagate_disjunctions(&mut self) {
        for i in 0..self.conditions.len() {
            if !is_disjunction(&self.conditions[i]) {
                continue;
            }

            let branches: Vec<Expr> = split_or_predicates(&self.conditions[i])
                .iter()
                .map(|branch| self.propagate_branch(branch))
                .collect();

            if let Some(rebuilt) = combine_or_predicates(branches) {
                self.conditions[i] = rebuilt;
            }
        }
    }

    fn propagate_branch(&self, branch: &Expr) -> Expr {
        let conjuncts = split_and_predicates(branch);
        let solved = PropagationSolver::new(self.settings, self.observer).solve(&conjuncts);
        combine_predicates(solved).unwrap_or_else(|| branch.clone())
    }
}

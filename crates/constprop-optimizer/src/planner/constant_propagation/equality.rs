use constprop_ir::{BinaryOp, Expr, Literal};

use super::{ColumnConstant, PropagationSolver};
use crate::events::PropagationEvent;
use crate::planner::constant_folding::fold_constants;
use crate::planner::predicate::substitute_columns;

enum Binding {
    New,
    Known,
    Incomparable(Literal),
    Conflict(Literal),
}

fn bind(slot: &mut Option<Literal>, value: &Literal) -> Binding {
    match slot {
        None => {
            *slot = Some(value.clone());
            Binding::New
        }
        Some(existing) => match existing.sql_eq(value) {
            Some(true) => Binding::Known,
            Some(false) => Binding::Conflict(existing.clone()),
            None => Binding::Incomparable(existing.clone()),
        },
    }
}

impl PropagationSolver<'_> {
    /// Substitutes `column = constant` facts into the remaining conjuncts
    /// until a round finds no new fact.
    ///
    /// `a = d AND b * 2 = c AND c = d + 2 AND b = 1 AND a = 4` picks `b = 1`
    /// and `a = 4` first, which turns `a = d` into `4 = d`; the next round
    /// picks `d = 4` and rewrites `c = d + 2` into `c = 4 + 2`.
    pub(super) fn propagate_equalities(&mut self) {
        if self.columns.is_empty() {
            return;
        }

        let mut bindings: Vec<Option<Literal>> = vec![None; self.columns.len()];
        let mut visited = vec![false; self.conditions.len()];
        let max_rounds = self.settings.max_propagate_columns;

        for _ in 0..max_rounds {
            let batch = self.pick_new_equalities(&mut visited, &mut bindings);
            if self.forever_false || batch.is_empty() {
                return;
            }

            let fold = self.settings.fold_constants;
            let mut folded_false = None;
            for (condition, done) in self.conditions.iter_mut().zip(&visited) {
                if *done {
                    continue;
                }
                let substituted = substitute_columns(condition, &batch);
                if !fold {
                    *condition = substituted;
                    continue;
                }
                let folded = fold_constants(&substituted);
                if folded.is_literal_false() && folded_false.is_none() {
                    folded_false = Some(substituted);
                }
                *condition = folded;
            }

            if let Some(condition) = folded_false {
                self.collapse_to_false(PropagationEvent::FoldedToFalse { condition });
                return;
            }
        }

        if bindings.iter().any(Option::is_none) {
            self.observer
                .on_event(&PropagationEvent::RoundLimitReached { rounds: max_rounds });
        }
    }

    /// Scans the unvisited conjuncts for `column = constant` and records new
    /// bindings. Collapses the conditions to FALSE on a NULL or conflicting
    /// binding, in which case the returned batch is empty.
    fn pick_new_equalities(
        &mut self,
        visited: &mut [bool],
        bindings: &mut [Option<Literal>],
    ) -> Vec<(Expr, Literal)> {
        let mut batch = Vec::new();
        let mut contradiction = None;

        for (i, condition) in self.conditions.iter().enumerate() {
            if visited[i] {
                continue;
            }
            let Some(fact) = ColumnConstant::match_condition(condition) else {
                continue;
            };
            if fact.op != BinaryOp::Eq {
                continue;
            }
            visited[i] = true;

            let Some(column) = fact.column.column_key() else {
                continue;
            };
            if fact.constant.is_null() {
                contradiction = Some(PropagationEvent::NullEquality { column });
                break;
            }
            let Some(id) = self.columns.id(fact.column) else {
                continue;
            };

            match bind(&mut bindings[id], fact.constant) {
                Binding::New => batch.push((fact.column.clone(), fact.constant.clone())),
                Binding::Known => {}
                Binding::Incomparable(existing) => {
                    self.observer
                        .on_event(&PropagationEvent::IncomparableConstants {
                            column,
                            existing,
                            incoming: fact.constant.clone(),
                        });
                }
                Binding::Conflict(existing) => {
                    contradiction = Some(PropagationEvent::ConflictingConstants {
                        column,
                        existing,
                        incoming: fact.constant.clone(),
                    });
                    break;
                }
            }
        }

        match contradiction {
            Some(event) => {
                self.collapse_to_false(event);
                Vec::new()
            }
            None => batch,
        }
    }
}

use constprop_ir::{BinaryOp, Expr};
use rustc_hash::FxHashSet;

use super::{ColumnConstant, PropagationSolver};

/// Symmetric reachability matrix over column ids.
pub(crate) struct EquivalenceMatrix {
    size: usize,
    cells: Vec<bool>,
}

impl EquivalenceMatrix {
    pub(crate) fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    pub(crate) fn connect(&mut self, a: usize, b: usize) {
        self.cells[a * self.size + b] = true;
        self.cells[b * self.size + a] = true;
    }

    pub(crate) fn is_connected(&self, a: usize, b: usize) -> bool {
        self.cells[a * self.size + b]
    }

    /// Floyd-Warshall style transitive closure.
    pub(crate) fn close(&mut self) {
        let n = self.size;
        for k in 0..n {
            for i in 0..n {
                if !self.cells[i * n + k] {
                    continue;
                }
                for j in 0..n {
                    if self.cells[k * n + j] {
                        self.cells[i * n + j] = true;
                    }
                }
            }
        }
    }

    /// Columns known equal to `id`, excluding `id` itself.
    pub(crate) fn equivalents(&self, id: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.size).filter(move |&to| to != id && self.is_connected(id, to))
    }
}

impl PropagationSolver<'_> {
    /// Id pairs of the `column = column` conjuncts currently in the list.
    pub(super) fn direct_equalities(&self) -> Vec<(usize, usize)> {
        self.conditions
            .iter()
            .filter_map(|condition| match condition {
                Expr::BinaryOp {
                    left,
                    op: BinaryOp::Eq,
                    right,
                } => {
                    let l = self.columns.id(left)?;
                    let r = self.columns.id(right)?;
                    Some((l, r))
                }
                _ => None,
            })
            .collect()
    }

    /// Copies every `column <op> constant` inequality onto the columns
    /// equivalent to its column. `a = b AND b = c AND c < 5` gains `a < 5`
    /// and `b < 5`.
    ///
    /// Only the conditions present when the pass starts are scanned; the
    /// copies it appends are not themselves copied again.
    pub(super) fn propagate_inequalities(&mut self, direct_equalities: &[(usize, usize)]) {
        if direct_equalities.is_empty() {
            return;
        }

        let mut matrix = EquivalenceMatrix::new(self.columns.len());
        for &(l, r) in direct_equalities {
            matrix.connect(l, r);
        }
        matrix.close();

        let mut present: FxHashSet<Expr> = self.conditions.iter().cloned().collect();
        let scanned = self.conditions.len();
        for i in 0..scanned {
            let derived: Vec<Expr> = {
                let Some(fact) = ColumnConstant::match_condition(&self.conditions[i]) else {
                    continue;
                };
                if !fact.op.is_inequality() {
                    continue;
                }
                let Some(id) = self.columns.id(fact.column) else {
                    continue;
                };
                matrix
                    .equivalents(id)
                    .map(|to| fact.with_column(self.columns.column(to)))
                    .collect()
            };

            for condition in derived {
                if present.insert(condition.clone()) {
                    self.conditions.push(condition);
                }
            }
        }
    }
}

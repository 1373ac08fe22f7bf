use constprop_ir::{BinaryOp, Expr, Literal};

pub fn split_and_predicates(expr: &Expr) -> Vec<Expr> {
    match expr {
        Expr::BinaryOp {
            left,
            op: BinaryOp::And,
            right,
        } => {
            let mut result = split_and_predicates(left);
            result.extend(split_and_predicates(right));
            result
        }
        other => vec![other.clone()],
    }
}

pub fn split_or_predicates(expr: &Expr) -> Vec<Expr> {
    match expr {
        Expr::BinaryOp {
            left,
            op: BinaryOp::Or,
            right,
        } => {
            let mut result = split_or_predicates(left);
            result.extend(split_or_predicates(right));
            result
        }
        other => vec![other.clone()],
    }
}

pub fn combine_predicates(predicates: Vec<Expr>) -> Option<Expr> {
    predicates
        .into_iter()
        .reduce(|acc, pred| Expr::binary(acc, BinaryOp::And, pred))
}

pub fn combine_or_predicates(predicates: Vec<Expr>) -> Option<Expr> {
    predicates
        .into_iter()
        .reduce(|acc, pred| Expr::binary(acc, BinaryOp::Or, pred))
}

pub fn is_disjunction(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::BinaryOp {
            op: BinaryOp::Or,
            ..
        }
    )
}

pub fn collect_columns(expr: &Expr) -> Vec<&Expr> {
    let mut columns = Vec::new();
    collect_columns_into(expr, &mut columns);
    columns
}

pub fn collect_columns_into<'e>(expr: &'e Expr, columns: &mut Vec<&'e Expr>) {
    match expr {
        Expr::Column { .. } => columns.push(expr),
        Expr::Literal(_) => {}
        Expr::BinaryOp { left, right, .. } => {
            collect_columns_into(left, columns);
            collect_columns_into(right, columns);
        }
        Expr::UnaryOp { expr, .. } => collect_columns_into(expr, columns),
        Expr::ScalarFunction { args, .. } => {
            for arg in args {
                collect_columns_into(arg, columns);
            }
        }
        Expr::Cast { expr, .. } => collect_columns_into(expr, columns),
        Expr::IsNull { expr, .. } => collect_columns_into(expr, columns),
        Expr::InList { expr, list, .. } => {
            collect_columns_into(expr, columns);
            for item in list {
                collect_columns_into(item, columns);
            }
        }
        Expr::Between {
            expr, low, high, ..
        } => {
            collect_columns_into(expr, columns);
            collect_columns_into(low, columns);
            collect_columns_into(high, columns);
        }
    }
}

/// Rebuilds `expr` with every occurrence of each column in `replacements`
/// swapped for its constant, at any depth of the tree.
pub fn substitute_columns(expr: &Expr, replacements: &[(Expr, Literal)]) -> Expr {
    match expr {
        Expr::Column { .. } => replacements
            .iter()
            .find(|(column, _)| column == expr)
            .map(|(_, value)| Expr::Literal(value.clone()))
            .unwrap_or_else(|| expr.clone()),
        _ => expr.map_children(|child| substitute_columns(child, replacements)),
    }
}

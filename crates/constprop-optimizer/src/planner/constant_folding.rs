use constprop_ir::{BinaryOp, Expr, Literal, UnaryOp};

/// Evaluates every subtree whose operands are all literals.
///
/// Only rewrites that hold under SQL three-valued logic are applied:
/// `FALSE AND x` becomes `FALSE` but `a = a` is left alone, since it is NULL
/// when `a` is. Arithmetic that would overflow or divide by zero stays
/// unevaluated.
pub fn fold_constants(expr: &Expr) -> Expr {
    match expr {
        Expr::BinaryOp { left, op, right } => {
            fold_binary(fold_constants(left), *op, fold_constants(right))
        }
        Expr::UnaryOp { op, expr } => fold_unary(*op, fold_constants(expr)),
        Expr::IsNull { expr, negated } => match fold_constants(expr) {
            Expr::Literal(value) => Expr::Literal(Literal::Bool(value.is_null() != *negated)),
            operand => Expr::IsNull {
                expr: Box::new(operand),
                negated: *negated,
            },
        },
        _ => expr.map_children(fold_constants),
    }
}

fn fold_binary(left: Expr, op: BinaryOp, right: Expr) -> Expr {
    let evaluated = match (&left, &right) {
        (Expr::Literal(l), Expr::Literal(r)) => evaluate(l, op, r),
        _ => None,
    };

    match (evaluated, op) {
        (Some(value), _) => Expr::Literal(value),
        (None, BinaryOp::And) => fold_and(left, right),
        (None, BinaryOp::Or) => fold_or(left, right),
        (None, _) => Expr::binary(left, op, right),
    }
}

fn evaluate(left: &Literal, op: BinaryOp, right: &Literal) -> Option<Literal> {
    if left.is_null() || right.is_null() {
        return None;
    }
    if !op.is_comparison() {
        return left.checked_arithmetic(op, right);
    }

    let ordering = left.compare(right)?;
    let holds = match op {
        BinaryOp::Eq => ordering.is_eq(),
        BinaryOp::NotEq => ordering.is_ne(),
        BinaryOp::Lt => ordering.is_lt(),
        BinaryOp::LtEq => ordering.is_le(),
        BinaryOp::Gt => ordering.is_gt(),
        BinaryOp::GtEq => ordering.is_ge(),
        _ => return None,
    };
    Some(Literal::Bool(holds))
}

fn fold_and(left: Expr, right: Expr) -> Expr {
    match (left.as_literal(), right.as_literal()) {
        (Some(Literal::Bool(false)), _) | (_, Some(Literal::Bool(false))) => {
            Expr::literal_false()
        }
        (Some(Literal::Bool(true)), _) => right,
        (_, Some(Literal::Bool(true))) => left,
        _ => Expr::binary(left, BinaryOp::And, right),
    }
}

fn fold_or(left: Expr, right: Expr) -> Expr {
    match (left.as_literal(), right.as_literal()) {
        (Some(Literal::Bool(true)), _) | (_, Some(Literal::Bool(true))) => {
            Expr::Literal(Literal::Bool(true))
        }
        (Some(Literal::Bool(false)), _) => right,
        (_, Some(Literal::Bool(false))) => left,
        _ => Expr::binary(left, BinaryOp::Or, right),
    }
}

fn fold_unary(op: UnaryOp, operand: Expr) -> Expr {
    match (op, operand) {
        (_, Expr::Literal(Literal::Null)) => Expr::Literal(Literal::Null),
        (UnaryOp::Not, Expr::Literal(Literal::Bool(b))) => Expr::Literal(Literal::Bool(!b)),
        (
            UnaryOp::Not,
            Expr::UnaryOp {
                op: UnaryOp::Not,
                expr,
            },
        ) => *expr,
        (UnaryOp::Minus, Expr::Literal(value)) => match value.checked_neg() {
            Some(negated) => Expr::Literal(negated),
            None => Expr::UnaryOp {
                op,
                expr: Box::new(Expr::Literal(value)),
            },
        },
        (op, operand) => Expr::UnaryOp {
            op,
            expr: Box::new(operand),
        },
    }
}

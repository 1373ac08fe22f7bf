#![allow(dead_code)]

use constprop_ir::{BinaryOp, Expr, Literal};

pub(crate) fn col(name: &str) -> Expr {
    Expr::column(name)
}

pub(crate) fn qcol(table: &str, name: &str, index: usize) -> Expr {
    Expr::qualified_column(table, name, index)
}

pub(crate) fn lit_i64(v: i64) -> Expr {
    Expr::Literal(Literal::Int64(v))
}

pub(crate) fn lit_str(v: &str) -> Expr {
    Expr::Literal(Literal::String(v.to_string()))
}

pub(crate) fn lit_null() -> Expr {
    Expr::Literal(Literal::Null)
}

pub(crate) fn binary(left: Expr, op: BinaryOp, right: Expr) -> Expr {
    Expr::binary(left, op, right)
}

pub(crate) fn eq(left: Expr, right: Expr) -> Expr {
    binary(left, BinaryOp::Eq, right)
}

pub(crate) fn ne(left: Expr, right: Expr) -> Expr {
    binary(left, BinaryOp::NotEq, right)
}

pub(crate) fn lt(left: Expr, right: Expr) -> Expr {
    binary(left, BinaryOp::Lt, right)
}

pub(crate) fn le(left: Expr, right: Expr) -> Expr {
    binary(left, BinaryOp::LtEq, right)
}

pub(crate) fn gt(left: Expr, right: Expr) -> Expr {
    binary(left, BinaryOp::Gt, right)
}

pub(crate) fn ge(left: Expr, right: Expr) -> Expr {
    binary(left, BinaryOp::GtEq, right)
}

pub(crate) fn and(left: Expr, right: Expr) -> Expr {
    binary(left, BinaryOp::And, right)
}

pub(crate) fn or(left: Expr, right: Expr) -> Expr {
    binary(left, BinaryOp::Or, right)
}

pub(crate) fn add(left: Expr, right: Expr) -> Expr {
    binary(left, BinaryOp::Add, right)
}

pub(crate) fn mul(left: Expr, right: Expr) -> Expr {
    binary(left, BinaryOp::Mul, right)
}

pub(crate) fn is_false(conditions: &[Expr]) -> bool {
    conditions.len() == 1 && conditions[0].is_literal_false()
}

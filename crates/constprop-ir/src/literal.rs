use std::cmp::Ordering;
use std::fmt;

use constprop_common::DataType;
use ordered_float::OrderedFloat;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::BinaryOp;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Literal {
    Null,
    Bool(bool),
    Int64(i64),
    Float64(OrderedFloat<f64>),
    Numeric(Decimal),
    String(String),
    Bytes(Vec<u8>),
}

impl Literal {
    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Literal::Null => DataType::Unknown,
            Literal::Bool(_) => DataType::Bool,
            Literal::Int64(_) => DataType::Int64,
            Literal::Float64(_) => DataType::Float64,
            Literal::Numeric(_) => DataType::Numeric,
            Literal::String(_) => DataType::String,
            Literal::Bytes(_) => DataType::Bytes,
        }
    }

    /// SQL value equality between two constants.
    ///
    /// Returns `None` when the answer is unknown: either side is NULL, or the
    /// values belong to types that cannot be compared without a cast.
    /// Numeric types compare by value, so `1`, `1.0` and `NUMERIC '1.00'` are
    /// all equal. Floats use total ordering, so NaN equals NaN.
    pub fn sql_eq(&self, other: &Literal) -> Option<bool> {
        if self.is_null() || other.is_null() {
            return None;
        }
        if !self.data_type().is_comparable_with(&other.data_type()) {
            return None;
        }
        match (self, other) {
            (Literal::Bool(l), Literal::Bool(r)) => Some(l == r),
            (Literal::Int64(l), Literal::Int64(r)) => Some(l == r),
            (Literal::Float64(l), Literal::Float64(r)) => Some(l == r),
            (Literal::Numeric(l), Literal::Numeric(r)) => Some(l == r),
            (Literal::String(l), Literal::String(r)) => Some(l == r),
            (Literal::Bytes(l), Literal::Bytes(r)) => Some(l == r),
            (Literal::Int64(i), Literal::Float64(f)) | (Literal::Float64(f), Literal::Int64(i)) => {
                Some((*i as f64) == f.0)
            }
            (Literal::Int64(i), Literal::Numeric(d)) | (Literal::Numeric(d), Literal::Int64(i)) => {
                Some(Decimal::from(*i) == *d)
            }
            (Literal::Float64(f), Literal::Numeric(d))
            | (Literal::Numeric(d), Literal::Float64(f)) => {
                Decimal::try_from(f.0).ok().map(|converted| converted == *d)
            }
            _ => None,
        }
    }

    /// Ordering between two non-NULL constants of the same type.
    pub fn compare(&self, other: &Literal) -> Option<Ordering> {
        match (self, other) {
            (Literal::Bool(l), Literal::Bool(r)) => Some(l.cmp(r)),
            (Literal::Int64(l), Literal::Int64(r)) => Some(l.cmp(r)),
            (Literal::Float64(l), Literal::Float64(r)) => Some(l.cmp(r)),
            (Literal::Numeric(l), Literal::Numeric(r)) => Some(l.cmp(r)),
            (Literal::String(l), Literal::String(r)) => Some(l.cmp(r)),
            (Literal::Bytes(l), Literal::Bytes(r)) => Some(l.cmp(r)),
            _ => None,
        }
    }

    /// Arithmetic or concatenation between two constants of the same type.
    ///
    /// `None` on overflow, division by zero, or operand types the operator
    /// does not apply to.
    pub fn checked_arithmetic(&self, op: BinaryOp, other: &Literal) -> Option<Literal> {
        match (self, other) {
            (Literal::Int64(l), Literal::Int64(r)) => match op {
                BinaryOp::Add => l.checked_add(*r),
                BinaryOp::Sub => l.checked_sub(*r),
                BinaryOp::Mul => l.checked_mul(*r),
                BinaryOp::Div => l.checked_div(*r),
                BinaryOp::Mod => l.checked_rem(*r),
                _ => None,
            }
            .map(Literal::Int64),
            (Literal::Float64(l), Literal::Float64(r)) => {
                let value = match op {
                    BinaryOp::Add => l.0 + r.0,
                    BinaryOp::Sub => l.0 - r.0,
                    BinaryOp::Mul => l.0 * r.0,
                    BinaryOp::Div if r.0 != 0.0 => l.0 / r.0,
                    _ => return None,
                };
                Some(Literal::Float64(OrderedFloat(value)))
            }
            (Literal::Numeric(l), Literal::Numeric(r)) => match op {
                BinaryOp::Add => l.checked_add(*r),
                BinaryOp::Sub => l.checked_sub(*r),
                BinaryOp::Mul => l.checked_mul(*r),
                BinaryOp::Div => l.checked_div(*r),
                BinaryOp::Mod => l.checked_rem(*r),
                _ => None,
            }
            .map(Literal::Numeric),
            (Literal::String(l), Literal::String(r)) if op == BinaryOp::Concat => {
                Some(Literal::String(format!("{}{}", l, r)))
            }
            _ => None,
        }
    }

    pub fn checked_neg(&self) -> Option<Literal> {
        match self {
            Literal::Int64(v) => v.checked_neg().map(Literal::Int64),
            Literal::Float64(v) => Some(Literal::Float64(-*v)),
            Literal::Numeric(v) => Some(Literal::Numeric(-*v)),
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => write!(f, "NULL"),
            Literal::Bool(true) => write!(f, "TRUE"),
            Literal::Bool(false) => write!(f, "FALSE"),
            Literal::Int64(v) => write!(f, "{}", v),
            Literal::Float64(v) => write!(f, "{}", v.0),
            Literal::Numeric(v) => write!(f, "NUMERIC '{}'", v),
            Literal::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Literal::Bytes(b) => {
                write!(f, "b'")?;
                for byte in b {
                    write!(f, "\\x{:02x}", byte)?;
                }
                write!(f, "'")
            }
        }
    }
}

use std::fmt;

use constprop_common::DataType;
use serde::{Deserialize, Serialize};

use crate::Literal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Concat,
}

impl BinaryOp {
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Eq
                | BinaryOp::NotEq
                | BinaryOp::Lt
                | BinaryOp::LtEq
                | BinaryOp::Gt
                | BinaryOp::GtEq
        )
    }

    /// Comparisons other than `=` whose truth carries over between columns
    /// known to hold equal values.
    pub fn is_inequality(&self) -> bool {
        self.is_comparison() && *self != BinaryOp::Eq
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Eq => "=",
            BinaryOp::NotEq => "<>",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "AND",
            BinaryOp::Or => "OR",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Concat => "||",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,
    Minus,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expr {
    Column {
        table: Option<String>,
        name: String,
        index: Option<usize>,
    },
    Literal(Literal),
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    UnaryOp {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    ScalarFunction {
        name: String,
        args: Vec<Expr>,
    },
    Cast {
        expr: Box<Expr>,
        data_type: DataType,
        safe: bool,
    },
    IsNull {
        expr: Box<Expr>,
        negated: bool,
    },
    InList {
        expr: Box<Expr>,
        list: Vec<Expr>,
        negated: bool,
    },
    Between {
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
        negated: bool,
    },
}

/// Identity of a column reference, stable for the lifetime of a plan.
///
/// Two column expressions denote the same column exactly when their keys are
/// equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnKey {
    pub table: Option<String>,
    pub name: String,
    pub index: Option<usize>,
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.table {
            Some(table) => write!(f, "{}.{}", table, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl Expr {
    pub fn column(name: impl Into<String>) -> Self {
        Expr::Column {
            table: None,
            name: name.into(),
            index: None,
        }
    }

    pub fn qualified_column(table: impl Into<String>, name: impl Into<String>, index: usize) -> Self {
        Expr::Column {
            table: Some(table.into()),
            name: name.into(),
            index: Some(index),
        }
    }

    pub fn literal(value: Literal) -> Self {
        Expr::Literal(value)
    }

    pub fn literal_false() -> Self {
        Expr::Literal(Literal::Bool(false))
    }

    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Self {
        Expr::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn is_literal_false(&self) -> bool {
        matches!(self, Expr::Literal(Literal::Bool(false)))
    }

    pub fn column_key(&self) -> Option<ColumnKey> {
        match self {
            Expr::Column { table, name, index } => Some(ColumnKey {
                table: table.clone(),
                name: name.clone(),
                index: *index,
            }),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Expr::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// Rebuilds this node with `f` applied to each direct child. Leaves are
    /// cloned as they are.
    pub fn map_children(&self, mut f: impl FnMut(&Expr) -> Expr) -> Expr {
        match self {
            Expr::Column { .. } | Expr::Literal(_) => self.clone(),
            Expr::BinaryOp { left, op, right } => Expr::BinaryOp {
                left: Box::new(f(left.as_ref())),
                op: *op,
                right: Box::new(f(right.as_ref())),
            },
            Expr::UnaryOp { op, expr } => Expr::UnaryOp {
                op: *op,
                expr: Box::new(f(expr.as_ref())),
            },
            Expr::ScalarFunction { name, args } => Expr::ScalarFunction {
                name: name.clone(),
                args: args.iter().map(&mut f).collect(),
            },
            Expr::Cast {
                expr,
                data_type,
                safe,
            } => Expr::Cast {
                expr: Box::new(f(expr.as_ref())),
                data_type: *data_type,
                safe: *safe,
            },
            Expr::IsNull { expr, negated } => Expr::IsNull {
                expr: Box::new(f(expr.as_ref())),
                negated: *negated,
            },
            Expr::InList {
                expr,
                list,
                negated,
            } => {
                let expr = Box::new(f(expr.as_ref()));
                Expr::InList {
                    expr,
                    list: list.iter().map(&mut f).collect(),
                    negated: *negated,
                }
            }
            Expr::Between {
                expr,
                low,
                high,
                negated,
            } => Expr::Between {
                expr: Box::new(f(expr.as_ref())),
                low: Box::new(f(low.as_ref())),
                high: Box::new(f(high.as_ref())),
                negated: *negated,
            },
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Column { table, name, .. } => match table {
                Some(table) => write!(f, "{}.{}", table, name),
                None => write!(f, "{}", name),
            },
            Expr::Literal(lit) => write!(f, "{}", lit),
            Expr::BinaryOp { left, op, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
            Expr::UnaryOp {
                op: UnaryOp::Not,
                expr,
            } => write!(f, "(NOT {})", expr),
            Expr::UnaryOp {
                op: UnaryOp::Minus,
                expr,
            } => write!(f, "(-{})", expr),
            Expr::ScalarFunction { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Expr::Cast {
                expr,
                data_type,
                safe,
            } => {
                let func = if *safe { "SAFE_CAST" } else { "CAST" };
                write!(f, "{}({} AS {})", func, expr, data_type)
            }
            Expr::IsNull { expr, negated } => {
                let not = if *negated { " NOT" } else { "" };
                write!(f, "({} IS{} NULL)", expr, not)
            }
            Expr::InList {
                expr,
                list,
                negated,
            } => {
                let not = if *negated { " NOT" } else { "" };
                write!(f, "({}{} IN (", expr, not)?;
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "))")
            }
            Expr::Between {
                expr,
                low,
                high,
                negated,
            } => {
                let not = if *negated { " NOT" } else { "" };
                write!(f, "({}{} BETWEEN {} AND {})", expr, not, low, high)
            }
        }
    }
}

//! Comparison operators and `(operator, value)` pairs for WHERE clauses.
//!
//! A WHERE mapping pairs each column with an explicit [`Condition`]:
//!
//! ```ignore
//! use sqlchain::condition::{eq, gt, Op};
//!
//! builder.and_where([
//!     ("age", gt(18)),
//!     ("status", eq("active")),
//!     ("deleted_at", (Op::Is, None::<i64>).into()),
//! ])?;
//! ```

use crate::error::StmtResult;
use crate::ident::Ident;
use crate::value::Value;

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    Like,
    NotLike,
    /// Case-insensitive LIKE (PostgreSQL ILIKE)
    Ilike,
    NotIlike,
    /// `IS`, for comparing against `NULL` / booleans
    Is,
    IsNot,
}

impl Op {
    pub fn as_sql(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Ne => "<>",
            Op::Lt => "<",
            Op::Lte => "<=",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Like => "LIKE",
            Op::NotLike => "NOT LIKE",
            Op::Ilike => "ILIKE",
            Op::NotIlike => "NOT ILIKE",
            Op::Is => "IS",
            Op::IsNot => "IS NOT",
        }
    }
}

/// An operator together with the value it compares against.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub op: Op,
    pub value: Value,
}

impl Condition {
    pub fn new(op: Op, value: impl Into<Value>) -> Self {
        Self {
            op,
            value: value.into(),
        }
    }

    /// Render `<column> <op> <literal>`.
    pub(crate) fn write_sql(&self, column: &Ident, out: &mut String) -> StmtResult<()> {
        column.write_sql(out);
        out.push(' ');
        out.push_str(self.op.as_sql());
        out.push(' ');
        self.value.write_literal(out)
    }
}

impl<V: Into<Value>> From<(Op, V)> for Condition {
    fn from((op, value): (Op, V)) -> Self {
        Condition::new(op, value)
    }
}

pub fn eq(value: impl Into<Value>) -> Condition {
    Condition::new(Op::Eq, value)
}

pub fn ne(value: impl Into<Value>) -> Condition {
    Condition::new(Op::Ne, value)
}

pub fn lt(value: impl Into<Value>) -> Condition {
    Condition::new(Op::Lt, value)
}

pub fn lte(value: impl Into<Value>) -> Condition {
    Condition::new(Op::Lte, value)
}

pub fn gt(value: impl Into<Value>) -> Condition {
    Condition::new(Op::Gt, value)
}

pub fn gte(value: impl Into<Value>) -> Condition {
    Condition::new(Op::Gte, value)
}

pub fn like(pattern: impl Into<Value>) -> Condition {
    Condition::new(Op::Like, pattern)
}

pub fn not_like(pattern: impl Into<Value>) -> Condition {
    Condition::new(Op::NotLike, pattern)
}

pub fn ilike(pattern: impl Into<Value>) -> Condition {
    Condition::new(Op::Ilike, pattern)
}

pub fn not_ilike(pattern: impl Into<Value>) -> Condition {
    Condition::new(Op::NotIlike, pattern)
}

/// `<column> IS NULL`
pub fn is_null() -> Condition {
    Condition::new(Op::Is, Value::Null)
}

/// `<column> IS NOT NULL`
pub fn is_not_null() -> Condition {
    Condition::new(Op::IsNot, Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(column: &str, cond: impl Into<Condition>) -> String {
        let cond: Condition = cond.into();
        let mut out = String::new();
        cond.write_sql(&Ident::parse(column).unwrap(), &mut out).unwrap();
        out
    }

    #[test]
    fn renders_operator_between_column_and_literal() {
        assert_eq!(render("age", gt(18)), "age > 18");
        assert_eq!(render("name", eq("bob")), "name = 'bob'");
        assert_eq!(render("name", ne("bob")), "name <> 'bob'");
        assert_eq!(render("users.email", ilike("%@x.io")), "users.email ILIKE '%@x.io'");
    }

    #[test]
    fn explicit_pairs_convert() {
        assert_eq!(render("score", (Op::Lte, 9.5)), "score <= 9.5");
        assert_eq!(render("title", (Op::NotLike, "draft%")), "title NOT LIKE 'draft%'");
    }

    #[test]
    fn null_checks() {
        assert_eq!(render("deleted_at", is_null()), "deleted_at IS NULL");
        assert_eq!(render("deleted_at", is_not_null()), "deleted_at IS NOT NULL");
    }

    #[test]
    fn invalid_literal_is_reported() {
        let mut out = String::new();
        let err = eq(f64::NAN)
            .write_sql(&Ident::parse("x").unwrap(), &mut out)
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }
}

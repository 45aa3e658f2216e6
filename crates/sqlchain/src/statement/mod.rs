//! Fluent SQL statement builder.
//!
//! A [`StatementBuilder`] accumulates chained calls into a single statement.
//! Nothing is executed here; see [`crate::ExecutingStatement`] for that.
//!
//! # Example
//!
//! ```ignore
//! use sqlchain::condition::{eq, gt};
//! use sqlchain::StatementBuilder;
//!
//! let mut stmt = StatementBuilder::new();
//! stmt.select(["id", "email"])?
//!     .from("users")?
//!     .join("orders", [("id", "user_id")])?
//!     .and_where([("users.status", eq("active"))])?
//!     .and_where([("orders.total", gt(100))])?;
//!
//! assert_eq!(
//!     stmt.build()?,
//!     "SELECT id, email FROM users INNER JOIN orders ON users.id = orders.user_id \
//!      WHERE users.status = 'active' AND orders.total > 100"
//! );
//! ```

mod builder;


use std::fmt;

pub use builder::StatementBuilder;

/// Start a new, empty statement.
pub fn statement() -> StatementBuilder {
    StatementBuilder::new()
}

/// The DDL/DML category that decides how a statement is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Create,
    Insert,
    Drop,
    Delete,
}

impl StatementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StatementKind::Select => "SELECT",
            StatementKind::Create => "CREATE",
            StatementKind::Insert => "INSERT",
            StatementKind::Drop => "DROP",
            StatementKind::Delete => "DELETE",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuilderState {
    /// Nothing has been started yet.
    #[default]
    Empty,
    /// A statement has been started and modifiers may be applied.
    Assembling,
    /// `build()` has been called. Further mutation is possible but logged.
    Finalized,
}

/// Join flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    /// Rendered as `FULL OUTER JOIN`, the keyword order PostgreSQL accepts.
    Outer,
}

impl JoinKind {
    pub fn keyword(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Outer => "FULL OUTER JOIN",
        }
    }
}

/// Trailing behaviour of a `DROP TABLE` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropBehavior {
    Restrict,
    Cascade,
}

impl DropBehavior {
    pub fn keyword(self) -> &'static str {
        match self {
            DropBehavior::Restrict => "RESTRICT",
            DropBehavior::Cascade => "CASCADE",
        }
    }
}

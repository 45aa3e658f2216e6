//! # sqlchain
//!
//! A fluent SQL statement builder with a pluggable execution backend.
//!
//! - **Chainable**: each call appends to or sets part of one pending statement
//! - **Validated**: table and column names are checked identifiers, values are
//!   rendered with explicit literal quoting, bad input is an `InvalidArgument`
//! - **Backend-agnostic**: execution goes through the [`Backend`] trait;
//!   `tokio_postgres::Client` and `deadpool_postgres::Pool` work out of the box
//! - **Observable**: executed SQL is reported through `tracing`
//!
//! ## Building
//!
//! ```ignore
//! use sqlchain::condition::{eq, gt};
//!
//! let mut stmt = sqlchain::statement();
//! stmt.from("users")?
//!     .and_where([("age", gt(18))])?
//!     .and_where([("status", eq("active"))])?;
//! assert_eq!(
//!     stmt.build()?,
//!     "SELECT * FROM users WHERE age > 18 AND status = 'active'"
//! );
//!
//! let mut ddl = sqlchain::statement();
//! ddl.drop("sessions")?.cascade()?;
//! assert_eq!(ddl.build()?, "DROP TABLE sessions CASCADE");
//! ```
//!
//! ## Executing
//!
//! ```ignore
//! let pool = sqlchain::create_pool("postgres://app@localhost/shop")?;
//!
//! let mut builder = sqlchain::statement();
//! builder.delete("sessions")?.and_where([("expired", eq(true))])?;
//!
//! let rows = ExecutingStatement::new(builder, &pool).run().await?;
//! ```

pub mod backend;
pub mod condition;
pub mod config;
pub mod error;
pub mod executor;
pub mod ident;
pub mod log;
pub mod statement;
pub mod value;

pub use backend::Backend;
pub use condition::{Condition, Op};
pub use config::PoolConfig;
pub use error::{BoxError, StmtError, StmtResult};
pub use executor::ExecutingStatement;
pub use ident::Ident;
pub use log::StatementLog;
pub use statement::{
    BuilderState, DropBehavior, JoinKind, StatementBuilder, StatementKind, statement,
};
pub use value::Value;

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use backend::PoolBackendError;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_from_config, create_pool_with_config};

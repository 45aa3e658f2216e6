//! Running built statements against a [`Backend`].

use crate::backend::Backend;
use crate::error::{StmtError, StmtResult};
use crate::log::StatementLog;
use crate::statement::StatementBuilder;

/// A statement builder bound to a backend.
///
/// The builder is owned; the backend is borrowed so that any number of
/// statements can share one pool.
///
/// # Example
///
/// ```ignore
/// let pool = sqlchain::create_pool("postgres://localhost/app")?;
///
/// let mut stmt = ExecutingStatement::new(StatementBuilder::new(), &pool);
/// stmt.builder_mut().from("users")?.and_where([("id", eq(1))])?;
/// let rows = stmt.run().await?;
/// ```
#[derive(Debug)]
pub struct ExecutingStatement<'a, B: Backend> {
    builder: StatementBuilder,
    backend: &'a B,
    log: StatementLog,
}

impl<'a, B: Backend> ExecutingStatement<'a, B> {
    pub fn new(builder: StatementBuilder, backend: &'a B) -> Self {
        Self {
            builder,
            backend,
            log: StatementLog::default(),
        }
    }

    /// Override how executed SQL is logged.
    pub fn with_log(mut self, log: StatementLog) -> Self {
        self.log = log;
        self
    }

    pub fn builder(&self) -> &StatementBuilder {
        &self.builder
    }

    pub fn builder_mut(&mut self) -> &mut StatementBuilder {
        &mut self.builder
    }

    pub fn backend(&self) -> &'a B {
        self.backend
    }

    pub fn into_builder(self) -> StatementBuilder {
        self.builder
    }

    /// Build the statement and execute it once.
    ///
    /// Build failures are returned before the backend is contacted. Backend
    /// failures come back as [`StmtError::Backend`] with the original error as
    /// their source. Nothing is retried.
    pub async fn run(&mut self) -> StmtResult<Vec<B::Row>> {
        let sql = self.builder.build()?;
        let kind = self.builder.kind();

        self.log.executing(kind, &sql);
        match self.backend.execute(&sql).await {
            Ok(rows) => Ok(rows),
            Err(err) => {
                self.log.failed(kind, &sql, &err);
                Err(StmtError::backend(err))
            }
        }
    }
}

//! Backend capability: the single seam between statement text and a database.
//!
//! Anything that can take finalized statement text and hand back rows can back
//! an [`ExecutingStatement`](crate::ExecutingStatement). Pooling, locking and
//! transport are the implementor's business.

use std::future::Future;
use tokio_postgres::Row;

/// Executes finalized statement text.
pub trait Backend: Send + Sync {
    /// Row type produced by this backend.
    type Row: Send;
    /// Failure reported by this backend.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Execute `statement` and return every row it produced.
    ///
    /// Called exactly once per [`ExecutingStatement::run`](crate::ExecutingStatement::run).
    fn execute(
        &self,
        statement: &str,
    ) -> impl Future<Output = Result<Vec<Self::Row>, Self::Error>> + Send;
}

impl Backend for tokio_postgres::Client {
    type Row = Row;
    type Error = tokio_postgres::Error;

    async fn execute(&self, statement: &str) -> Result<Vec<Row>, tokio_postgres::Error> {
        self.query(statement, &[]).await
    }
}

impl<B: Backend + ?Sized> Backend for std::sync::Arc<B> {
    type Row = B::Row;
    type Error = B::Error;

    fn execute(
        &self,
        statement: &str,
    ) -> impl Future<Output = Result<Vec<Self::Row>, Self::Error>> + Send {
        (**self).execute(statement)
    }
}

#[cfg(feature = "pool")]
pub use pooled::PoolBackendError;

#[cfg(feature = "pool")]
mod pooled {
    use super::Backend;
    use deadpool_postgres::{Pool, PoolError};
    use thiserror::Error;
    use tokio_postgres::Row;

    /// Failure of a pooled execution: either no connection or a failed query.
    #[derive(Debug, Error)]
    pub enum PoolBackendError {
        #[error("could not check out a connection: {0}")]
        Checkout(#[from] PoolError),

        #[error(transparent)]
        Query(#[from] tokio_postgres::Error),
    }

    impl Backend for Pool {
        type Row = Row;
        type Error = PoolBackendError;

        async fn execute(&self, statement: &str) -> Result<Vec<Row>, PoolBackendError> {
            let client = self.get().await?;
            Ok(client.query(statement, &[]).await?)
        }
    }
}

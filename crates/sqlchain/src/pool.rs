//! Connection pool construction.
//!
//! A [`deadpool_postgres::Pool`] implements [`Backend`](crate::Backend), so the
//! pools built here can be handed straight to
//! [`ExecutingStatement::new`](crate::ExecutingStatement::new).

use crate::config::PoolConfig;
use crate::error::{StmtError, StmtResult};
use deadpool_postgres::{Manager, ManagerConfig, Pool, PoolBuilder, RecyclingMethod};
use tokio_postgres::NoTls;
use tokio_postgres::Socket;
use tokio_postgres::tls::{MakeTlsConnect, TlsConnect};

/// Create a pool from a database URL with default settings and no TLS.
///
/// ```ignore
/// let pool = sqlchain::create_pool("postgres://app@localhost/shop")?;
/// ```
pub fn create_pool(database_url: &str) -> StmtResult<Pool> {
    create_pool_from_config(&PoolConfig::from_url(database_url))
}

/// Create a pool from a database URL with a custom size.
pub fn create_pool_with_config(database_url: &str, max_size: usize) -> StmtResult<Pool> {
    create_pool_from_config(&PoolConfig::from_url(database_url).max_size(max_size))
}

/// Create a pool from [`PoolConfig`] (URL or host/user/password/database).
pub fn create_pool_from_config(config: &PoolConfig) -> StmtResult<Pool> {
    create_pool_with_tls(config, NoTls)
}

/// Create a pool using a custom TLS connector.
pub fn create_pool_with_tls<T>(config: &PoolConfig, tls: T) -> StmtResult<Pool>
where
    T: MakeTlsConnect<Socket> + Clone + Sync + Send + 'static,
    T::Stream: Sync + Send,
    T::TlsConnect: Sync + Send,
    <T::TlsConnect as TlsConnect<Socket>>::Future: Send,
{
    let max_size = config.max_size;
    create_pool_with_manager_config(config, tls, default_manager_config(), |builder| {
        builder.max_size(max_size)
    })
}

/// Create a pool with an injected `ManagerConfig` and `PoolBuilder` tuning.
pub fn create_pool_with_manager_config<T>(
    config: &PoolConfig,
    tls: T,
    manager_config: ManagerConfig,
    configure_pool: impl FnOnce(PoolBuilder) -> PoolBuilder,
) -> StmtResult<Pool>
where
    T: MakeTlsConnect<Socket> + Clone + Sync + Send + 'static,
    T::Stream: Sync + Send,
    T::TlsConnect: Sync + Send,
    <T::TlsConnect as TlsConnect<Socket>>::Future: Send,
{
    let pg_config = config.to_pg_config()?;
    let mgr = Manager::from_config(pg_config, tls, manager_config);
    let pool = configure_pool(Pool::builder(mgr))
        .build()
        .map_err(|e| StmtError::Pool(e.to_string()))?;

    tracing::debug!(
        target: "sqlchain.pool",
        max_size = config.max_size,
        "connection pool created"
    );
    Ok(pool)
}

fn default_manager_config() -> ManagerConfig {
    ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    }
}

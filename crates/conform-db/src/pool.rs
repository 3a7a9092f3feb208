//! Connection pool management.

use conform_common::{Error, Result};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::migrations;

/// Type alias for the database connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled database connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Initialize a file-backed pool, creating the database and running
/// pending migrations.
pub fn init_pool(db_path: &str) -> Result<DbPool> {
    let manager = SqliteConnectionManager::file(db_path)
        .with_init(|conn| conn.execute_batch("PRAGMA journal_mode = WAL;"));
    build_pool(manager)
}

/// Initialize an in-memory pool for tests. The database disappears with
/// the pool.
pub fn init_memory_pool() -> Result<DbPool> {
    build_pool(SqliteConnectionManager::memory())
}

fn build_pool(manager: SqliteConnectionManager) -> Result<DbPool> {
    let pool = Pool::builder()
        .max_size(4)
        .build(manager)
        .map_err(|e| Error::database(format!("failed to create connection pool: {e}")))?;

    let conn = pool
        .get()
        .map_err(|e| Error::database(format!("failed to get connection for migrations: {e}")))?;
    migrations::run_migrations(&conn)?;

    Ok(pool)
}

/// Get a connection from the pool, mapping the r2d2 error.
pub fn get_conn(pool: &DbPool) -> Result<PooledConnection> {
    pool.get()
        .map_err(|e| Error::database(format!("failed to get connection from pool: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_pool_initializes_with_schema() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='frame_ranges'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn pool_hands_out_multiple_connections() {
        let pool = init_memory_pool().unwrap();
        let _c1 = get_conn(&pool).unwrap();
        let _c2 = get_conn(&pool).unwrap();
        assert!(get_conn(&pool).is_ok());
    }
}

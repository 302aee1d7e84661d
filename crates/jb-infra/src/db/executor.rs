use std::sync::Arc;

use anyhow::Result;
use diesel::connection::SimpleConnection;
use diesel::SqliteConnection;
use tracing::info;

use crate::db::pool::DbPool;
use crate::db::ports::DbExecutor;

/// Runs closures against a pooled SQLite connection. Cheap to clone.
#[derive(Clone)]
pub struct DieselSqliteExecutor {
    pool: Arc<DbPool>,
}

impl DieselSqliteExecutor {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Fold the WAL back into the main database file. Called once on
    /// graceful shutdown, after the listener stopped accepting work.
    pub fn checkpoint(&self) -> Result<()> {
        self.run(|conn| {
            conn.batch_execute("PRAGMA wal_checkpoint(TRUNCATE);")?;
            Ok(())
        })?;
        info!("Database WAL checkpointed");
        Ok(())
    }
}

impl DbExecutor for DieselSqliteExecutor {
    fn run<T>(&self, f: impl FnOnce(&mut SqliteConnection) -> Result<T>) -> Result<T> {
        let mut conn = self.pool.get()?;
        f(&mut conn)
    }
}

use crate::error::{GatewayError, Result};
use rusqlite::Connection;
use std::path::Path;
use tokio::sync::Mutex;

pub struct Storage {
    conn: Mutex<Connection>,
}

impl Storage {
    pub async fn new(db_path: &Path) -> Result<Self> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                GatewayError::internal(format!("Failed to create directory: {}", e))
            })?;
        }

        let conn = Connection::open(db_path)?;
        Self::with_connection(conn).await
    }

    pub async fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn).await
    }

    async fn with_connection(conn: Connection) -> Result<Self> {
        let storage = Self {
            conn: Mutex::new(conn),
        };

        storage.init_schema().await?;
        Ok(storage)
    }

    async fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock().await;

        // One signed-in account per (network, contract)
        conn.execute(
            "CREATE TABLE IF NOT EXISTS sessions (
                network_id TEXT NOT NULL,
                contract_id TEXT NOT NULL,
                account_id TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                PRIMARY KEY (network_id, contract_id)
            )",
            [],
        )?;

        Ok(())
    }

    pub async fn get_connection(&self) -> tokio::sync::MutexGuard<'_, Connection> {
        self.conn.lock().await
    }
}

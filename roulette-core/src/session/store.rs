use crate::error::Result;
use crate::session::Storage;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub network_id: String,
    pub contract_id: String,
    pub account_id: String,
    pub created_at: chrono::DateTime<Utc>,
}

pub struct SessionStore<'a> {
    storage: &'a Storage,
}

impl<'a> SessionStore<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub async fn save_session(&self, session: &SessionData) -> Result<()> {
        let conn = self.storage.get_connection().await;

        conn.execute(
            "INSERT OR REPLACE INTO sessions (network_id, contract_id, account_id, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                session.network_id,
                session.contract_id,
                session.account_id,
                session.created_at.timestamp(),
            ],
        )?;

        Ok(())
    }

    pub async fn load_session(
        &self,
        network_id: &str,
        contract_id: &str,
    ) -> Result<Option<SessionData>> {
        let conn = self.storage.get_connection().await;

        let session = conn
            .query_row(
                "SELECT network_id, contract_id, account_id, created_at
                 FROM sessions WHERE network_id = ?1 AND contract_id = ?2",
                params![network_id, contract_id],
                |row| {
                    Ok(SessionData {
                        network_id: row.get(0)?,
                        contract_id: row.get(1)?,
                        account_id: row.get(2)?,
                        created_at: chrono::DateTime::from_timestamp(row.get(3)?, 0)
                            .unwrap_or_else(Utc::now),
                    })
                },
            )
            .optional()?;

        Ok(session)
    }

    pub async fn list_sessions(&self) -> Result<Vec<SessionData>> {
        let conn = self.storage.get_connection().await;

        let mut stmt = conn.prepare(
            "SELECT network_id, contract_id, account_id, created_at
             FROM sessions ORDER BY created_at DESC",
        )?;

        let session_iter = stmt.query_map([], |row| {
            Ok(SessionData {
                network_id: row.get(0)?,
                contract_id: row.get(1)?,
                account_id: row.get(2)?,
                created_at: chrono::DateTime::from_timestamp(row.get(3)?, 0)
                    .unwrap_or_else(Utc::now),
            })
        })?;

        let mut sessions = Vec::new();
        for session in session_iter {
            sessions.push(session?);
        }

        Ok(sessions)
    }

    pub async fn delete_session(&self, network_id: &str, contract_id: &str) -> Result<bool> {
        let conn = self.storage.get_connection().await;

        let removed = conn.execute(
            "DELETE FROM sessions WHERE network_id = ?1 AND contract_id = ?2",
            params![network_id, contract_id],
        )?;

        Ok(removed > 0)
    }
}

use std::sync::Arc;

use brokerdesk_core::ServiceError;
use brokerdesk_sql::{Row, SQLStore, Value};

use crate::model::Bc;

/// SQL schema for the bcs collection. The full document lives in the
/// `data` JSON column; `created_at` is extracted alongside it.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS bcs (
        id         TEXT PRIMARY KEY,
        data       TEXT NOT NULL,
        created_at TEXT
    )",
];

/// Persistent storage for brokerage contracts, backed by SQLStore (SQLite).
pub struct BcStore {
    db: Arc<dyn SQLStore>,
}

impl BcStore {
    /// Create a new BcStore and initialise the schema.
    pub fn new(db: Arc<dyn SQLStore>) -> Result<Self, ServiceError> {
        for stmt in SCHEMA {
            db.exec(stmt, &[])
                .map_err(|e| ServiceError::Storage(format!("bc schema init: {e}")))?;
        }
        Ok(Self { db })
    }

    /// Read every contract, in store iteration order.
    pub fn list(&self) -> Result<Vec<Bc>, ServiceError> {
        let rows = self
            .db
            .query("SELECT data FROM bcs", &[])
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        rows.iter().map(row_to_bc).collect()
    }

    /// Get a contract by id.
    pub fn get(&self, id: &str) -> Result<Bc, ServiceError> {
        let rows = self
            .db
            .query(
                "SELECT data FROM bcs WHERE id = ?1",
                &[Value::Text(id.to_string())],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        let row = rows
            .first()
            .ok_or_else(|| ServiceError::NotFound(format!("bc {id} not found")))?;

        row_to_bc(row)
    }

    /// Insert a freshly created contract.
    pub fn insert(&self, bc: &Bc) -> Result<(), ServiceError> {
        let data =
            serde_json::to_string(bc).map_err(|e| ServiceError::Internal(e.to_string()))?;

        self.db
            .exec(
                "INSERT INTO bcs (id, data, created_at) VALUES (?1, ?2, ?3)",
                &[
                    Value::Text(bc.id.clone()),
                    Value::Text(data),
                    match &bc.created_at {
                        Some(t) => Value::Text(t.clone()),
                        None => Value::Null,
                    },
                ],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        Ok(())
    }

    /// Merge a partial patch into the contract with the given id and
    /// return the updated document.
    pub fn update(&self, id: &str, patch: &serde_json::Value) -> Result<Bc, ServiceError> {
        let current = self.get(id)?;
        let updated = current.merged(patch)?;

        let data =
            serde_json::to_string(&updated).map_err(|e| ServiceError::Internal(e.to_string()))?;

        let affected = self
            .db
            .exec(
                "UPDATE bcs SET data = ?1 WHERE id = ?2",
                &[Value::Text(data), Value::Text(id.to_string())],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        if affected == 0 {
            return Err(ServiceError::NotFound(format!("bc {id} not found")));
        }

        Ok(updated)
    }

    /// Delete a contract by id.
    pub fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let affected = self
            .db
            .exec(
                "DELETE FROM bcs WHERE id = ?1",
                &[Value::Text(id.to_string())],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        if affected == 0 {
            return Err(ServiceError::NotFound(format!("bc {id} not found")));
        }

        Ok(())
    }
}

/// Deserialize a Bc from a row's `data` JSON column.
fn row_to_bc(row: &Row) -> Result<Bc, ServiceError> {
    let json = row
        .get_str("data")
        .ok_or_else(|| ServiceError::Storage("missing data column".into()))?;
    serde_json::from_str(json).map_err(|e| ServiceError::Storage(format!("bad bc json: {e}")))
}

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use crate::error::SQLError;
use crate::traits::{Row, SQLStore, Value};

/// SqliteStore is a SQLStore implementation backed by rusqlite (bundled
/// SQLite). One connection behind a mutex; writes are single-statement
/// atomic, last writer wins.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a SQLite database at the given path.
    pub fn open(path: &Path) -> Result<Self, SQLError> {
        let conn = Connection::open(path)
            .map_err(|e| SQLError::Connection(e.to_string()))?;

        // Enable WAL mode for better concurrent read performance.
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|e| SQLError::Connection(e.to_string()))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite database (useful for tests).
    pub fn open_in_memory() -> Result<Self, SQLError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| SQLError::Connection(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

/// Convert our Value enum to rusqlite's ToSql.
fn bind_params(params: &[Value]) -> Vec<Box<dyn rusqlite::types::ToSql + '_>> {
    params
        .iter()
        .map(|v| -> Box<dyn rusqlite::types::ToSql + '_> {
            match v {
                Value::Null => Box::new(rusqlite::types::Null),
                Value::Integer(i) => Box::new(*i),
                Value::Real(f) => Box::new(*f),
                Value::Text(s) => Box::new(s.as_str()),
            }
        })
        .collect()
}

impl SQLStore for SqliteStore {
    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, SQLError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| SQLError::Query(e.to_string()))?;

        let bound = bind_params(params);
        let param_refs: Vec<&dyn rusqlite::types::ToSql> =
            bound.iter().map(|b| b.as_ref()).collect();

        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| SQLError::Query(e.to_string()))?;

        let column_names: Vec<String> = stmt
            .column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let rows = stmt
            .query_map(param_refs.as_slice(), |row| {
                let mut columns = Vec::new();
                for (i, name) in column_names.iter().enumerate() {
                    let val = row_value_at(row, i);
                    columns.push((name.clone(), val));
                }
                Ok(Row { columns })
            })
            .map_err(|e| SQLError::Query(e.to_string()))?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row.map_err(|e| SQLError::Query(e.to_string()))?);
        }
        Ok(result)
    }

    fn exec(&self, sql: &str, params: &[Value]) -> Result<u64, SQLError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| SQLError::Execution(e.to_string()))?;

        let bound = bind_params(params);
        let param_refs: Vec<&dyn rusqlite::types::ToSql> =
            bound.iter().map(|b| b.as_ref()).collect();

        let affected = conn
            .execute(sql, param_refs.as_slice())
            .map_err(|e| SQLError::Execution(e.to_string()))?;

        Ok(affected as u64)
    }
}

/// Extract a Value from a rusqlite row at a given column index.
fn row_value_at(row: &rusqlite::Row, idx: usize) -> Value {
    // Try integer first, then real, then text, then null.
    if let Ok(i) = row.get::<_, i64>(idx) {
        return Value::Integer(i);
    }
    if let Ok(f) = row.get::<_, f64>(idx) {
        return Value::Real(f);
    }
    if let Ok(s) = row.get::<_, String>(idx) {
        return Value::Text(s);
    }
    Value::Null
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .exec(
                "CREATE TABLE docs (id TEXT PRIMARY KEY, data TEXT NOT NULL, seq INTEGER)",
                &[],
            )
            .unwrap();
        store
    }

    #[test]
    fn exec_and_query_roundtrip() {
        let store = test_store();
        let affected = store
            .exec(
                "INSERT INTO docs (id, data, seq) VALUES (?1, ?2, ?3)",
                &[
                    Value::Text("d1".into()),
                    Value::Text("{\"k\":1}".into()),
                    Value::Integer(7),
                ],
            )
            .unwrap();
        assert_eq!(affected, 1);

        let rows = store
            .query("SELECT data, seq FROM docs WHERE id = ?1", &[Value::Text("d1".into())])
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get_str("data"), Some("{\"k\":1}"));
        assert_eq!(rows[0].get_i64("seq"), Some(7));
    }

    #[test]
    fn exec_reports_affected_rows() {
        let store = test_store();
        store
            .exec(
                "INSERT INTO docs (id, data) VALUES (?1, ?2)",
                &[Value::Text("d1".into()), Value::Text("{}".into())],
            )
            .unwrap();

        let affected = store
            .exec("DELETE FROM docs WHERE id = ?1", &[Value::Text("nope".into())])
            .unwrap();
        assert_eq!(affected, 0);

        let affected = store
            .exec("DELETE FROM docs WHERE id = ?1", &[Value::Text("d1".into())])
            .unwrap();
        assert_eq!(affected, 1);
    }

    #[test]
    fn null_params_bind() {
        let store = test_store();
        store
            .exec(
                "INSERT INTO docs (id, data, seq) VALUES (?1, ?2, ?3)",
                &[Value::Text("d2".into()), Value::Text("{}".into()), Value::Null],
            )
            .unwrap();

        let rows = store.query("SELECT seq FROM docs WHERE id = 'd2'", &[]).unwrap();
        assert!(matches!(rows[0].get("seq"), Some(Value::Null)));
    }
}

use std::sync::Arc;

use brokerdesk_core::ServiceError;
use brokerdesk_sql::{Row, SQLStore, Value};

use crate::model::Job;

/// SQL schema for the jobs collection. The row id is the business `jobNo`;
/// the full document lives in the `data` JSON column.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS jobs (
        id   TEXT PRIMARY KEY,
        data TEXT NOT NULL
    )",
];

/// Persistent storage for jobs, backed by SQLStore (SQLite).
pub struct JobStore {
    db: Arc<dyn SQLStore>,
}

impl JobStore {
    /// Create a new JobStore and initialise the schema.
    pub fn new(db: Arc<dyn SQLStore>) -> Result<Self, ServiceError> {
        for stmt in SCHEMA {
            db.exec(stmt, &[])
                .map_err(|e| ServiceError::Storage(format!("job schema init: {e}")))?;
        }
        Ok(Self { db })
    }

    /// Read every job document, in store iteration order.
    pub fn list(&self) -> Result<Vec<Job>, ServiceError> {
        let rows = self
            .db
            .query("SELECT data FROM jobs", &[])
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        rows.iter().map(row_to_job).collect()
    }

    /// Write the document keyed by `jobNo`, inserting if absent.
    pub fn upsert(&self, job: &Job) -> Result<(), ServiceError> {
        let data =
            serde_json::to_string(job).map_err(|e| ServiceError::Internal(e.to_string()))?;

        self.db
            .exec(
                "INSERT INTO jobs (id, data) VALUES (?1, ?2) \
                 ON CONFLICT(id) DO UPDATE SET data = excluded.data",
                &[Value::Text(job.job_no.clone()), Value::Text(data)],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        Ok(())
    }
}

/// Deserialize a Job from a row's `data` JSON column.
fn row_to_job(row: &Row) -> Result<Job, ServiceError> {
    let json = row
        .get_str("data")
        .ok_or_else(|| ServiceError::Storage("missing data column".into()))?;
    serde_json::from_str(json).map_err(|e| ServiceError::Storage(format!("bad job json: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use brokerdesk_sql::SqliteStore;

    fn test_store() -> JobStore {
        let db = Arc::new(SqliteStore::open_in_memory().unwrap());
        JobStore::new(db).unwrap()
    }

    fn make_job(job_no: &str, overall: f64) -> Job {
        Job {
            job_no: job_no.into(),
            overall,
            commodity: "".into(),
            location: "".into(),
            origin: "".into(),
        }
    }

    #[test]
    fn empty_list() {
        let store = test_store();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn upsert_creates_then_replaces() {
        let store = test_store();
        store.upsert(&make_job("J1", 100.0)).unwrap();
        store.upsert(&make_job("J2", 5.0)).unwrap();

        // Second upsert on the same key must replace, not duplicate.
        store.upsert(&make_job("J1", 250.0)).unwrap();

        let jobs = store.list().unwrap();
        assert_eq!(jobs.len(), 2);
        let j1 = jobs.iter().find(|j| j.job_no == "J1").unwrap();
        assert_eq!(j1.overall, 250.0);
    }

    #[test]
    fn upsert_overwrites_all_fields() {
        let store = test_store();
        let mut job = make_job("J1", 10.0);
        job.commodity = "wheat".into();
        job.location = "pune".into();
        store.upsert(&job).unwrap();

        // A later upsert with empty metadata clears the old values.
        store.upsert(&make_job("J1", 10.0)).unwrap();

        let jobs = store.list().unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].commodity, "");
        assert_eq!(jobs[0].location, "");
    }
}

pub mod api;
pub mod model;
pub mod store;

use std::sync::Arc;

use axum::Router;
use brokerdesk_core::{Module, ServiceError};
use brokerdesk_sql::SQLStore;

use store::JobStore;

/// The Job module — job records keyed by business job number.
///
/// Jobs track an aggregate quantity plus commodity metadata. Writes are
/// upserts on `jobNo`; jobs are never deleted through this interface.
pub struct JobModule {
    store: Arc<JobStore>,
}

impl JobModule {
    /// Create the job module and initialise its collection schema.
    pub fn new(db: Arc<dyn SQLStore>) -> Result<Self, ServiceError> {
        Ok(Self {
            store: Arc::new(JobStore::new(db)?),
        })
    }
}

impl Module for JobModule {
    fn name(&self) -> &str {
        "job"
    }

    fn routes(&self) -> Router {
        api::router(Arc::clone(&self.store))
    }
}

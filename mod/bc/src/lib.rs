pub mod api;
pub mod model;
pub mod store;

use std::sync::Arc;

use axum::Router;
use brokerdesk_core::{Module, ServiceError};
use brokerdesk_sql::SQLStore;

use store::BcStore;

/// The BC module — brokerage contract records.
///
/// Contracts carry a store-assigned id and a server-stamped creation time;
/// everything else is opaque front-office data mutated by partial merge.
pub struct BcModule {
    store: Arc<BcStore>,
}

impl BcModule {
    /// Create the bc module and initialise its collection schema.
    pub fn new(db: Arc<dyn SQLStore>) -> Result<Self, ServiceError> {
        Ok(Self {
            store: Arc::new(BcStore::new(db)?),
        })
    }
}

impl Module for BcModule {
    fn name(&self) -> &str {
        "bc"
    }

    fn routes(&self) -> Router {
        api::router(Arc::clone(&self.store))
    }
}

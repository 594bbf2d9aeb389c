use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use brokerdesk_core::ServiceError;

use crate::model::{Job, UpsertJobRequest};
use crate::store::JobStore;

type StoreState = Arc<JobStore>;

pub fn router(store: Arc<JobStore>) -> Router {
    Router::new()
        .route("/jobs", get(list_jobs).post(upsert_job))
        .with_state(store)
}

// ---------------------------------------------------------------------------
// GET /jobs
// ---------------------------------------------------------------------------

async fn list_jobs(State(store): State<StoreState>) -> Result<Json<Vec<Job>>, ServiceError> {
    Ok(Json(store.list()?))
}

// ---------------------------------------------------------------------------
// POST /jobs
// ---------------------------------------------------------------------------

async fn upsert_job(
    State(store): State<StoreState>,
    Json(req): Json<UpsertJobRequest>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let job = req.into_job()?;
    store.upsert(&job)?;
    Ok(Json(serde_json::json!({ "success": true })))
}

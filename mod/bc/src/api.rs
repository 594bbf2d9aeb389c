use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};

use brokerdesk_core::{ServiceError, new_id, now_rfc3339};

use crate::model::{Bc, BcInput};
use crate::store::BcStore;

type StoreState = Arc<BcStore>;

pub fn router(store: Arc<BcStore>) -> Router {
    Router::new()
        .route("/bcs", get(list_bcs).post(create_bc))
        .route("/bcs/{id}", put(update_bc).delete(delete_bc))
        .with_state(store)
}

// ---------------------------------------------------------------------------
// GET /bcs
// ---------------------------------------------------------------------------

async fn list_bcs(State(store): State<StoreState>) -> Result<Json<Vec<Bc>>, ServiceError> {
    Ok(Json(store.list()?))
}

// ---------------------------------------------------------------------------
// POST /bcs
// ---------------------------------------------------------------------------

async fn create_bc(
    State(store): State<StoreState>,
    Json(input): Json<BcInput>,
) -> Result<Json<Bc>, ServiceError> {
    let bc = Bc::new(new_id(), now_rfc3339(), input);
    store.insert(&bc)?;
    Ok(Json(bc))
}

// ---------------------------------------------------------------------------
// PUT /bcs/:id
// ---------------------------------------------------------------------------

async fn update_bc(
    State(store): State<StoreState>,
    Path(id): Path<String>,
    Json(input): Json<BcInput>,
) -> Result<Json<Bc>, ServiceError> {
    let updated = store.update(&id, &input.into_patch())?;
    Ok(Json(updated))
}

// ---------------------------------------------------------------------------
// DELETE /bcs/:id
// ---------------------------------------------------------------------------

async fn delete_bc(
    State(store): State<StoreState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    store.delete(&id)?;
    Ok(Json(serde_json::json!({ "success": true })))
}

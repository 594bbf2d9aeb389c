//! Route registration — collects all module routes + system endpoints.

use axum::Router;
use axum::response::IntoResponse;
use axum::routing::get;
use tower_http::cors::CorsLayer;

/// Build the complete router.
///
/// Every module's routes are merged and nested under `/api`; the system
/// endpoints live at the root. Cross-origin requests are allowed from any
/// origin — the frontends are served elsewhere.
pub fn build_router(module_routes: Vec<Router>) -> Router {
    let mut api = Router::new();
    for routes in module_routes {
        api = api.merge(routes);
    }

    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
        .nest("/api", api)
        .layer(CorsLayer::permissive())
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "brokerdeskd",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

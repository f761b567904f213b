use axum::routing::post;
use axum::{Router, routing::get};

use super::handlers;
use super::handlers::probes::{healthz, livez};
use super::state::AppState;
use crate::prelude::Result;

pub async fn build_routes() -> Result<Router> {
    let state = AppState::new().await?;
    let app = Router::new()
        .route("/candidates", post(handlers::candidates::upload))
        .route("/candidates", get(handlers::candidates::list))
        .route("/candidates/search", get(handlers::search::search))
        .route("/candidates/ask", post(handlers::search::ask))
        .route("/candidates/{candidate_id}", get(handlers::candidates::detail))
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .with_state(state);

    Ok(app)
}

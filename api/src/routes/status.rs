use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use margin_sdk::SnapshotStatus;
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

/// GET /status
///
/// Row counts, load time and generation of the snapshot being served.
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<SnapshotStatus> {
    Json(state.sdk.status())
}

/// POST /recarregar
///
/// Re-read all source tables and swap in the new snapshot. On failure the
/// previous snapshot keeps being served.
pub async fn reload(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SnapshotStatus>, AppError> {
    let status = state.sdk.reload().await?;
    info!(
        "reloaded on request: {} products (generation {})",
        status.products, status.generation
    );
    Ok(Json(status))
}

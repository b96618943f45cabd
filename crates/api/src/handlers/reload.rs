use crate::{dto::ReloadResponse, errors::ApiError, state::AppState};
use axum::{extract::State, Json};
use tapguard_application::use_cases::ReloadKind;
use tracing::{debug, instrument};

async fn reload(state: &AppState, kind: ReloadKind) -> Result<Json<ReloadResponse>, ApiError> {
    let blocked_domains = state.reload.execute(kind).await?;
    debug!(kind = %kind, blocked_domains, "Reload request completed");

    Ok(Json(ReloadResponse {
        status: "ok",
        blocked_domains,
    }))
}

#[instrument(skip(state), name = "api_update_all")]
pub async fn update_all(State(state): State<AppState>) -> Result<Json<ReloadResponse>, ApiError> {
    reload(&state, ReloadKind::All).await
}

#[instrument(skip(state), name = "api_update_block")]
pub async fn update_block(
    State(state): State<AppState>,
) -> Result<Json<ReloadResponse>, ApiError> {
    reload(&state, ReloadKind::Block).await
}

#[instrument(skip(state), name = "api_update_white")]
pub async fn update_white(
    State(state): State<AppState>,
) -> Result<Json<ReloadResponse>, ApiError> {
    reload(&state, ReloadKind::White).await
}

#[instrument(skip(state), name = "api_update_black")]
pub async fn update_black(
    State(state): State<AppState>,
) -> Result<Json<ReloadResponse>, ApiError> {
    reload(&state, ReloadKind::Black).await
}

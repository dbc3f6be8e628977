//! Area API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::models::{Area, AreaCreate, AreaUpdate};
use crate::db::repository::AreaRepository;
use crate::utils::AppResult;
use crate::utils::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_required_text};

/// GET /areas - 获取所有配送区域
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Area>>> {
    let repo = AreaRepository::new(state.db.clone());
    let areas = repo.find_all().await?;
    Ok(Json(areas))
}

/// POST /areas - 创建配送区域
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AreaCreate>,
) -> AppResult<(StatusCode, Json<Area>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.delivery_time, "delivery_time", MAX_SHORT_TEXT_LEN)?;

    let repo = AreaRepository::new(state.db.clone());
    let area = repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(area)))
}

/// PUT /areas/{id} - 更新配送区域
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AreaUpdate>,
) -> AppResult<Json<Area>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }

    let repo = AreaRepository::new(state.db.clone());
    let area = repo.update(&id, payload).await?;
    Ok(Json(area))
}

/// DELETE /areas/{id} - 删除配送区域
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = AreaRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(Json(true))
}

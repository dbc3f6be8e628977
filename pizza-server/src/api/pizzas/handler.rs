//! Pizza API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::models::{Pizza, PizzaCreate, PizzaUpdate};
use crate::db::repository::PizzaRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// GET /pizzas - 获取完整菜单
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Pizza>>> {
    let repo = PizzaRepository::new(state.db.clone());
    let pizzas = repo.find_all().await?;
    Ok(Json(pizzas))
}

/// GET /pizzas/{id} - 获取单个披萨
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Pizza>> {
    let repo = PizzaRepository::new(state.db.clone());
    let pizza = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Pizza"))?;
    Ok(Json(pizza))
}

/// POST /pizzas - 创建披萨
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PizzaCreate>,
) -> AppResult<(StatusCode, Json<Pizza>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_required_text(&payload.category, "category", MAX_NAME_LEN)?;
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;

    let repo = PizzaRepository::new(state.db.clone());
    let pizza = repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(pizza)))
}

/// PUT /pizzas/{id} - 更新披萨
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PizzaUpdate>,
) -> AppResult<Json<Pizza>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;

    let repo = PizzaRepository::new(state.db.clone());
    let pizza = repo.update(&id, payload).await?;
    Ok(Json(pizza))
}

/// DELETE /pizzas/{id} - 删除披萨
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = PizzaRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(Json(true))
}

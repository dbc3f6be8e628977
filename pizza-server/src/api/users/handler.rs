//! User API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::models::{LoginRequest, UserCreate, UserResponse, UserStatus, UserUpdate};
use crate::db::repository::UserRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, time};

/// GET /users - 获取所有用户 (管理面板)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<UserResponse>>> {
    let repo = UserRepository::new(state.db.clone());
    let users = repo.find_all().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// POST /users - 注册 / 管理员创建用户
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_email(&payload.email)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.password, "password", MAX_PASSWORD_LEN)?;

    let repo = UserRepository::new(state.db.clone());
    let user = repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// PUT /users/{id} - 更新用户
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<UserResponse>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(email) = &payload.email {
        validate_email(email)?;
    }
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.password, "password", MAX_PASSWORD_LEN)?;

    let repo = UserRepository::new(state.db.clone());
    let user = repo.update(&id, payload).await?;
    Ok(Json(user.into()))
}

/// DELETE /users/{id} - 删除用户
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = UserRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(Json(true))
}

/// POST /users/login - 明文邮箱+密码匹配
///
/// 统一的失败消息，避免暴露邮箱是否已注册。
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<UserResponse>> {
    let repo = UserRepository::new(state.db.clone());

    let user = repo
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| AppError::validation("Invalid email or password"))?;

    if user.password.is_empty() || user.password != payload.password {
        return Err(AppError::validation("Invalid email or password"));
    }
    if user.status == UserStatus::Inactive {
        return Err(AppError::validation("Account is inactive"));
    }

    let id = user.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
    let user = repo.touch_login(&id, time::now_millis()).await?;

    Ok(Json(user.into()))
}

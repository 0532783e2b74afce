use axum::{
  extract::{Path, State},
  response::Json as JsonResponse,
  routing::{get, post},
  Router,
};

use super::model::{AuthResponse, LoginRequest, MessageResponse, RegisterRequest, UpdateUserRequest, UserProfile};
use crate::{
  state::{AppState, SharedAppState},
  utils::payload::{Patch, Payload},
  AppError,
};

pub fn user_routes() -> Router<SharedAppState> {
  Router::new()
    .route("/register", post(register_handler))
    .route("/login", post(login_handler))
    .route("/users", get(list_users_handler))
    .route(
      "/users/{user_id}",
      get(get_user_handler).put(update_user_handler).delete(delete_user_handler),
    )
}

pub async fn register_handler(
  State(state): State<SharedAppState>,
  payload: Result<Payload<RegisterRequest>, AppError>,
) -> Result<JsonResponse<AuthResponse>, AppError> {
  let Payload(req) = payload.map_err(AppError::with_success_flag)?;

  let user = state
    .register(req)
    .await
    .map_err(|e| AppError::from(e).with_success_flag())?;

  Ok(JsonResponse(AuthResponse {
    success: true,
    user: user.into(),
  }))
}

pub async fn login_handler(
  State(state): State<SharedAppState>,
  payload: Result<Payload<LoginRequest>, AppError>,
) -> Result<JsonResponse<AuthResponse>, AppError> {
  let Payload(req) = payload.map_err(AppError::with_success_flag)?;

  let user = state
    .login(req)
    .await
    .map_err(|e| AppError::from(e).with_success_flag())?;

  Ok(JsonResponse(AuthResponse {
    success: true,
    user: user.into(),
  }))
}

pub async fn list_users_handler(State(state): State<SharedAppState>) -> Result<JsonResponse<Vec<UserProfile>>, AppError> {
  let users = state.list_users().await?;
  Ok(JsonResponse(users.into_iter().map(UserProfile::from).collect()))
}

pub async fn get_user_handler(
  State(state): State<SharedAppState>,
  Path(user_id): Path<i64>,
) -> Result<JsonResponse<UserProfile>, AppError> {
  state
    .get_user(user_id)
    .await
    .map(|user| JsonResponse(user.into()))
    .map_err(Into::into)
}

pub async fn update_user_handler(
  State(state): State<SharedAppState>,
  Path(user_id): Path<i64>,
  payload: Result<Patch<UpdateUserRequest>, AppError>,
) -> Result<JsonResponse<MessageResponse>, AppError> {
  // A missing row is reported before anything about the body.
  let Patch(patch) = match payload {
    Ok(patch) => patch,
    Err(e) => {
      state.get_user(user_id).await?;
      return Err(e);
    }
  };

  state.update_user(user_id, patch).await?;
  Ok(JsonResponse(MessageResponse::new("User updated successfully")))
}

pub async fn delete_user_handler(
  State(state): State<SharedAppState>,
  Path(user_id): Path<i64>,
) -> Result<JsonResponse<MessageResponse>, AppError> {
  state.delete_user(user_id).await?;
  Ok(JsonResponse(MessageResponse::new("User deleted successfully")))
}

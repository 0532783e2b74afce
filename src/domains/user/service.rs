use async_trait::async_trait;
use std::error::Error;

use super::{
  model::{LoginRequest, RegisterRequest, UpdateUserRequest, User},
  repository::{RepositoryError, UserRepository},
};
use crate::impl_service_error_conversions;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const USER_NOT_FOUND: &str = "User not found";
pub const REGISTER_FAILED: &str = "Error registering user";
pub const UPDATE_FAILED: &str = "Error updating user";

#[derive(Debug)]
pub enum UserServiceError {
  Unauthorized(String),
  ValidationError(String),
  /// A write the store refused; the transaction has been rolled back.
  PersistenceError(String),
  InternalServerError(String),
  UserNotFound(String),
}

impl Error for UserServiceError {}

impl std::fmt::Display for UserServiceError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      UserServiceError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
      UserServiceError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
      UserServiceError::PersistenceError(msg) => write!(f, "Persistence Error: {}", msg),
      UserServiceError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
      UserServiceError::UserNotFound(msg) => write!(f, "User Not Found: {}", msg),
    }
  }
}

impl_service_error_conversions!(UserServiceError, InternalServerError, UserNotFound, ValidationError);

#[async_trait]
pub trait UserService: Send + Sync {
  async fn register(&self, req: RegisterRequest) -> Result<User, UserServiceError>;
  async fn login(&self, req: LoginRequest) -> Result<User, UserServiceError>;
  async fn list_users(&self) -> Result<Vec<User>, UserServiceError>;
  async fn get_user(&self, id: i64) -> Result<User, UserServiceError>;
  async fn update_user(&self, id: i64, patch: UpdateUserRequest) -> Result<User, UserServiceError>;
  async fn delete_user(&self, id: i64) -> Result<(), UserServiceError>;
}

pub struct UserServiceImpl<U> {
  user_repository: U,
}

impl<U> UserServiceImpl<U>
where
  U: UserRepository,
{
  pub fn new(user_repository: U) -> Self {
    Self { user_repository }
  }
}

#[async_trait]
impl<U> UserService for UserServiceImpl<U>
where
  U: UserRepository,
{
  async fn register(&self, req: RegisterRequest) -> Result<User, UserServiceError> {
    let user = self.user_repository.create(&req).await.map_err(|e| match e {
      RepositoryError::Conflict(msg) => {
        tracing::info!(email = ?req.email, "registration rejected: {}", msg);
        UserServiceError::ValidationError(msg)
      }
      other => {
        tracing::warn!(error = %other, "registration rolled back");
        UserServiceError::PersistenceError(REGISTER_FAILED.to_string())
      }
    })?;

    tracing::info!(user_id = user.id, "user registered");
    Ok(user)
  }

  async fn login(&self, req: LoginRequest) -> Result<User, UserServiceError> {
    let user = self
      .user_repository
      .find_by_credentials(&req)
      .await?
      .ok_or_else(|| UserServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    tracing::debug!(user_id = user.id, "login succeeded");
    Ok(user)
  }

  async fn list_users(&self) -> Result<Vec<User>, UserServiceError> {
    Ok(self.user_repository.find_all().await?)
  }

  async fn get_user(&self, id: i64) -> Result<User, UserServiceError> {
    self
      .user_repository
      .find_by_id(id)
      .await?
      .ok_or_else(|| UserServiceError::UserNotFound(USER_NOT_FOUND.to_string()))
  }

  async fn update_user(&self, id: i64, patch: UpdateUserRequest) -> Result<User, UserServiceError> {
    let user = self.user_repository.update(id, &patch).await.map_err(|e| match e {
      RepositoryError::NotFound(msg) => UserServiceError::UserNotFound(msg),
      other => {
        tracing::warn!(user_id = id, error = %other, "update rolled back");
        UserServiceError::PersistenceError(UPDATE_FAILED.to_string())
      }
    })?;

    tracing::info!(user_id = id, "user updated");
    Ok(user)
  }

  async fn delete_user(&self, id: i64) -> Result<(), UserServiceError> {
    self.user_repository.delete(id).await?;
    tracing::info!(user_id = id, "user deleted");
    Ok(())
  }
}

use std::{future::Future, sync::Arc};

use sqlx::SqlitePool;

use crate::domains::user::{
  model::{LoginRequest, RegisterRequest, UpdateUserRequest, User},
  repository::SqlxUserRepository,
  service::{UserService, UserServiceError, UserServiceImpl},
};

pub trait AppState: Clone + Send + Sync + 'static {
  fn register(&self, req: RegisterRequest) -> impl Future<Output = Result<User, UserServiceError>> + Send;
  fn login(&self, req: LoginRequest) -> impl Future<Output = Result<User, UserServiceError>> + Send;
  fn list_users(&self) -> impl Future<Output = Result<Vec<User>, UserServiceError>> + Send;
  fn get_user(&self, id: i64) -> impl Future<Output = Result<User, UserServiceError>> + Send;
  fn update_user(
    &self,
    id: i64,
    patch: UpdateUserRequest,
  ) -> impl Future<Output = Result<User, UserServiceError>> + Send;
  fn delete_user(&self, id: i64) -> impl Future<Output = Result<(), UserServiceError>> + Send;
}

/// Application state built from an explicit storage handle. Each pool gets
/// its own state, so nothing is shared between independently built apps.
#[derive(Clone)]
pub struct SharedAppState {
  pub user_service: Arc<UserServiceImpl<SqlxUserRepository>>,
}

impl SharedAppState {
  pub fn new(pool: SqlitePool) -> Self {
    let user_repository = SqlxUserRepository::new(pool);
    let user_service = Arc::new(UserServiceImpl::new(user_repository));

    Self { user_service }
  }
}

impl AppState for SharedAppState {
  async fn register(&self, req: RegisterRequest) -> Result<User, UserServiceError> {
    self.user_service.register(req).await
  }

  async fn login(&self, req: LoginRequest) -> Result<User, UserServiceError> {
    self.user_service.login(req).await
  }

  async fn list_users(&self) -> Result<Vec<User>, UserServiceError> {
    self.user_service.list_users().await
  }

  async fn get_user(&self, id: i64) -> Result<User, UserServiceError> {
    self.user_service.get_user(id).await
  }

  async fn update_user(&self, id: i64, patch: UpdateUserRequest) -> Result<User, UserServiceError> {
    self.user_service.update_user(id, patch).await
  }

  async fn delete_user(&self, id: i64) -> Result<(), UserServiceError> {
    self.user_service.delete_user(id).await
  }
}

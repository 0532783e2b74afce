use async_trait::async_trait;
use sqlx::SqlitePool;

use super::model::{LoginRequest, RegisterRequest, UpdateUserRequest, User};

#[derive(Debug)]
pub enum RepositoryError {
  DatabaseError(sqlx::Error),
  NotFound(String),
  Conflict(String),
}

impl std::error::Error for RepositoryError {}

impl std::fmt::Display for RepositoryError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      RepositoryError::DatabaseError(e) => write!(f, "Database error: {}", e),
      RepositoryError::NotFound(msg) => write!(f, "Not found: {}", msg),
      RepositoryError::Conflict(msg) => write!(f, "Conflict: {}", msg),
    }
  }
}

impl From<sqlx::Error> for RepositoryError {
  fn from(err: sqlx::Error) -> Self {
    RepositoryError::DatabaseError(err)
  }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
  async fn create(&self, req: &RegisterRequest) -> Result<User, RepositoryError>;
  async fn find_by_credentials(&self, req: &LoginRequest) -> Result<Option<User>, RepositoryError>;
  async fn find_all(&self) -> Result<Vec<User>, RepositoryError>;
  async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError>;
  async fn update(&self, id: i64, patch: &UpdateUserRequest) -> Result<User, RepositoryError>;
  async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}

pub struct SqlxUserRepository {
  pub pool: SqlitePool,
}

impl SqlxUserRepository {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
  async fn create(&self, req: &RegisterRequest) -> Result<User, RepositoryError> {
    let mut tx = self.pool.begin().await?;

    if User::email_taken(&mut *tx, req.email.as_deref()).await? {
      return Err(RepositoryError::Conflict("Email already exists".to_string()));
    }

    // Dropping `tx` on an early return rolls the insert back.
    let user = User::create_with_executor(&mut *tx, req).await?;
    tx.commit().await?;

    Ok(user)
  }

  async fn find_by_credentials(&self, req: &LoginRequest) -> Result<Option<User>, RepositoryError> {
    Ok(User::find_by_credentials(&self.pool, req.email.as_deref(), req.password.as_deref()).await?)
  }

  async fn find_all(&self) -> Result<Vec<User>, RepositoryError> {
    Ok(User::find_all(&self.pool).await?)
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
    Ok(User::find_by_id(&self.pool, id).await?)
  }

  async fn update(&self, id: i64, patch: &UpdateUserRequest) -> Result<User, RepositoryError> {
    let mut tx = self.pool.begin().await?;

    let mut user = User::find_by_id(&mut *tx, id)
      .await?
      .ok_or_else(|| RepositoryError::NotFound("User not found".to_string()))?;

    user.apply(patch);
    user.save(&mut *tx).await?;
    tx.commit().await?;

    Ok(user)
  }

  async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
    if !User::delete_by_id(&self.pool, id).await? {
      return Err(RepositoryError::NotFound("User not found".to_string()));
    }
    Ok(())
  }
}

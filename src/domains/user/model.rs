use serde::{Deserialize, Deserializer, Serialize};
use sqlx::{FromRow, SqliteExecutor};

/// A persisted account row. Never serialized directly; responses go
/// through [`UserProfile`] so the password cannot leak.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
  pub id: i64,
  pub name: Option<String>,
  pub surname: Option<String>,
  pub email: Option<String>,
  pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserProfile {
  pub id: i64,
  pub name: Option<String>,
  pub surname: Option<String>,
  pub email: Option<String>,
}

impl From<User> for UserProfile {
  fn from(user: User) -> Self {
    Self {
      id: user.id,
      name: user.name,
      surname: user.surname,
      email: user.email,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RegisterRequest {
  pub name: Option<String>,
  pub surname: Option<String>,
  pub email: Option<String>,
  pub password: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoginRequest {
  pub email: Option<String>,
  pub password: Option<String>,
}

/// Field-level patch. The outer `Option` records whether the key was sent at
/// all; the inner one carries an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateUserRequest {
  #[serde(default, deserialize_with = "present")]
  pub name: Option<Option<String>>,
  #[serde(default, deserialize_with = "present")]
  pub surname: Option<Option<String>>,
  #[serde(default, deserialize_with = "present")]
  pub email: Option<Option<String>>,
  #[serde(default, deserialize_with = "present")]
  pub password: Option<Option<String>>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
  D: Deserializer<'de>,
{
  Option::<String>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
  pub success: bool,
  pub user: UserProfile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
  pub message: String,
}

impl MessageResponse {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
    }
  }
}

impl User {
  /// Overwrites only the fields present in `patch`.
  pub fn apply(&mut self, patch: &UpdateUserRequest) {
    if let Some(name) = &patch.name {
      self.name = name.clone();
    }
    if let Some(surname) = &patch.surname {
      self.surname = surname.clone();
    }
    if let Some(email) = &patch.email {
      self.email = email.clone();
    }
    if let Some(password) = &patch.password {
      self.password = password.clone();
    }
  }

  pub async fn create_with_executor<'e, E>(executor: E, req: &RegisterRequest) -> Result<User, sqlx::Error>
  where
    E: SqliteExecutor<'e>,
  {
    let user = sqlx::query_as::<_, User>(
      r#"
        INSERT INTO users (name, surname, email, password)
        VALUES (?, ?, ?, ?)
        RETURNING id, name, surname, email, password
      "#,
    )
    .bind(&req.name)
    .bind(&req.surname)
    .bind(&req.email)
    .bind(&req.password)
    .fetch_one(executor)
    .await?;

    Ok(user)
  }

  /// Uses `IS` so that an absent email matches a stored `NULL` email.
  pub async fn email_taken<'e, E>(executor: E, email: Option<&str>) -> Result<bool, sqlx::Error>
  where
    E: SqliteExecutor<'e>,
  {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE email IS ? LIMIT 1")
      .bind(email)
      .fetch_optional(executor)
      .await?;

    Ok(row.is_some())
  }

  /// Exact match on both columns. Like [`User::email_taken`], a missing
  /// value matches a stored `NULL`.
  pub async fn find_by_credentials<'e, E>(
    executor: E,
    email: Option<&str>,
    password: Option<&str>,
  ) -> Result<Option<User>, sqlx::Error>
  where
    E: SqliteExecutor<'e>,
  {
    let user = sqlx::query_as::<_, User>(
      r#"
        SELECT id, name, surname, email, password
        FROM users
        WHERE email IS ? AND password IS ?
        ORDER BY id
        LIMIT 1
      "#,
    )
    .bind(email)
    .bind(password)
    .fetch_optional(executor)
    .await?;

    Ok(user)
  }

  pub async fn find_all<'e, E>(executor: E) -> Result<Vec<User>, sqlx::Error>
  where
    E: SqliteExecutor<'e>,
  {
    let users = sqlx::query_as::<_, User>("SELECT id, name, surname, email, password FROM users ORDER BY id")
      .fetch_all(executor)
      .await?;

    Ok(users)
  }

  pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<User>, sqlx::Error>
  where
    E: SqliteExecutor<'e>,
  {
    let user = sqlx::query_as::<_, User>("SELECT id, name, surname, email, password FROM users WHERE id = ?")
      .bind(id)
      .fetch_optional(executor)
      .await?;

    Ok(user)
  }

  pub async fn save<'e, E>(&self, executor: E) -> Result<(), sqlx::Error>
  where
    E: SqliteExecutor<'e>,
  {
    sqlx::query("UPDATE users SET name = ?, surname = ?, email = ?, password = ? WHERE id = ?")
      .bind(&self.name)
      .bind(&self.surname)
      .bind(&self.email)
      .bind(&self.password)
      .bind(self.id)
      .execute(executor)
      .await?;

    Ok(())
  }

  /// Returns whether a row was removed.
  pub async fn delete_by_id<'e, E>(executor: E, id: i64) -> Result<bool, sqlx::Error>
  where
    E: SqliteExecutor<'e>,
  {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
      .bind(id)
      .execute(executor)
      .await?;

    Ok(result.rows_affected() > 0)
  }
}

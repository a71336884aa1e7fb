//! PostgreSQL 用户 Repository

use farmsync_common::{ExternalUserId, OwnerId};
use farmsync_domain::{Email, HashedPassword, User};
use farmsync_errors::{AppError, AppResult};
use sqlx::PgPool;
use uuid::Uuid;

use super::is_unique_violation;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i32,
    external_id: Uuid,
    email: String,
    password_hash: String,
    name: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: OwnerId::new(row.id),
            external_id: ExternalUserId::from_uuid(row.external_id),
            email: row.email,
            password_hash: row.password_hash,
            name: row.name,
        }
    }
}

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &Email) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, external_id, email, password_hash, name
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find user: {}", e)))?;

        Ok(row.map(User::from))
    }

    pub async fn find_by_id(&self, id: OwnerId) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, external_id, email, password_hash, name
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find user: {}", e)))?;

        Ok(row.map(User::from))
    }

    pub async fn exists_by_email(&self, email: &Email) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to check email: {}", e)))?;

        Ok(exists)
    }

    /// 注册新用户，邮箱重复时返回 Conflict
    pub async fn create(
        &self,
        email: &Email,
        password: &HashedPassword,
        name: &str,
    ) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (external_id, email, password_hash, name)
            VALUES ($1, $2, $3, $4)
            RETURNING id, external_id, email, password_hash, name
            "#,
        )
        .bind(ExternalUserId::new().0)
        .bind(email.as_str())
        .bind(password.as_str())
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("Email already exists")
            } else {
                AppError::database(format!("Failed to create user: {}", e))
            }
        })?;

        Ok(row.into())
    }
}

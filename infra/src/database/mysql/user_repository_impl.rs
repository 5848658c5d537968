//! MySQL implementation of the UserRepository trait.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE users (
//!     id            CHAR(36)     PRIMARY KEY,
//!     full_name     VARCHAR(255) NOT NULL,
//!     email         VARCHAR(254) NULL,
//!     phone         VARCHAR(20)  NULL,
//!     password_hash VARCHAR(255) NOT NULL,
//!     is_verified   BOOLEAN      NOT NULL DEFAULT FALSE,
//!     created_at    TIMESTAMP(6) NOT NULL,
//!     updated_at    TIMESTAMP(6) NOT NULL,
//!     UNIQUE KEY uq_users_email (email),
//!     UNIQUE KEY uq_users_phone (phone)
//! );
//! ```
//!
//! The unique keys on email and phone are what catches a duplicate account
//! committed concurrently through another path.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use tracing::{debug, error};
use uuid::Uuid;

use onbo_core::domain::entities::user::User;
use onbo_core::errors::DomainError;
use onbo_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(db_err("id"))?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid UUID in users.id: {}", e),
            })?,
            full_name: row.try_get("full_name").map_err(db_err("full_name"))?,
            email: row.try_get("email").map_err(db_err("email"))?,
            phone: row.try_get("phone").map_err(db_err("phone"))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(db_err("password_hash"))?,
            is_verified: row.try_get("is_verified").map_err(db_err("is_verified"))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(db_err("created_at"))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(db_err("updated_at"))?,
        })
    }

    async fn find_by_column(
        &self,
        query: &str,
        value: &str,
    ) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Database query failed: {}", e),
            })?;

        match row {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }
}

fn db_err(column: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::Internal {
        message: format!("Failed to read users.{}: {}", column, e),
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, full_name, email, phone, password_hash,
           is_verified, created_at, updated_at
    FROM users
"#;

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE email = ? LIMIT 1", SELECT_COLUMNS);
        self.find_by_column(&query, email).await
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE phone = ? LIMIT 1", SELECT_COLUMNS);
        self.find_by_column(&query, phone).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, full_name, email, phone, password_hash,
                is_verified, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.full_name)
            .bind(&user.email)
            .bind(&user.phone)
            .bind(&user.password_hash)
            .bind(user.is_verified)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db)
                    if db.kind() == sqlx::error::ErrorKind::UniqueViolation =>
                {
                    DomainError::Validation {
                        message: "Contact address already registered".to_string(),
                    }
                }
                _ => {
                    error!(user_id = %user.id, error = %e, "Failed to insert user");
                    DomainError::Internal {
                        message: format!("Failed to insert user: {}", e),
                    }
                }
            })?;

        debug!(user_id = %user.id, "Inserted user");
        Ok(user)
    }
}

use axum::async_trait;
use sqlx::PgPool;
use tokio::sync::Mutex;

use crate::user::model::{NewUser, User};

/// The persistence boundary for users. Handlers and services only ever see
/// this trait, so tests can swap in [`MemoryDirectory`].
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn create(&self, new_user: NewUser) -> anyhow::Result<User>;
}

/// Postgres-backed directory over the `users` table.
pub struct PgDirectory {
    db: PgPool,
}

impl PgDirectory {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserDirectory for PgDirectory {
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password, created_on, is_admin, access_token
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password, created_on, is_admin, access_token
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn create(&self, new_user: NewUser) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password, created_on, is_admin, access_token
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }
}

/// In-memory directory used by tests and `AppState::fake()`.
#[derive(Default)]
pub struct MemoryDirectory {
    users: Mutex<Vec<User>>,
}

impl MemoryDirectory {
    pub fn seeded(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }
}

#[async_trait]
impl UserDirectory for MemoryDirectory {
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.lock().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.lock().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, new_user: NewUser) -> anyhow::Result<User> {
        let mut users = self.users.lock().await;
        let user = User {
            id: users.len() as i64 + 1,
            username: new_user.username,
            email: new_user.email,
            password: new_user.password,
            created_on: time::OffsetDateTime::now_utc(),
            is_admin: false,
            access_token: None,
        };
        users.push(user.clone());
        Ok(user)
    }
}

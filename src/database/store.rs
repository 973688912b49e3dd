use serde::Serialize;
use sqlx::{postgres::PgPoolOptions, sqlite::SqlitePoolOptions, PgPool, SqlitePool};
use thiserror::Error;
use tracing::info;

use crate::database::provider::{self, DatabaseProvider, ProviderError};

/// Errors from the persistence gateway
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid connection string: {0}")]
    InvalidConnectionString(#[from] ProviderError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// A single todo row. `id` is assigned by the database and immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub done: bool,
}

/// Persistence gateway over the two supported engines. The variant is fixed
/// at startup by `provider::classify`; request handlers never branch on it.
pub enum TodoStore {
    Embedded(SqlitePool),
    Server(PgPool),
}

impl TodoStore {
    /// Connect to the database selected by the connection-string shape.
    pub async fn connect(connection_string: &str) -> Result<Self, StoreError> {
        match provider::classify(connection_string) {
            DatabaseProvider::EmbeddedFile => {
                let url = provider::database_url(connection_string, DatabaseProvider::EmbeddedFile)?;
                let pool = SqlitePoolOptions::new().connect(&url).await?;
                info!("connected to embedded database");
                Ok(TodoStore::Embedded(pool))
            }
            DatabaseProvider::ClientServer => {
                let url = provider::database_url(connection_string, DatabaseProvider::ClientServer)?;
                let pool = PgPoolOptions::new().connect(&url).await?;
                info!("connected to database server");
                Ok(TodoStore::Server(pool))
            }
        }
    }

    /// Create the todos table if it does not exist. Safe to call on every
    /// startup; callers decide whether a failure here is fatal.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        match self {
            TodoStore::Embedded(pool) => {
                sqlx::query(
                    "CREATE TABLE IF NOT EXISTS todos (
                         id INTEGER PRIMARY KEY AUTOINCREMENT,
                         title TEXT NOT NULL DEFAULT '',
                         done BOOLEAN NOT NULL DEFAULT 0
                     )",
                )
                .execute(pool)
                .await?;
            }
            TodoStore::Server(pool) => {
                sqlx::query(
                    "CREATE TABLE IF NOT EXISTS todos (
                         id BIGSERIAL PRIMARY KEY,
                         title TEXT NOT NULL DEFAULT '',
                         done BOOLEAN NOT NULL DEFAULT FALSE
                     )",
                )
                .execute(pool)
                .await?;
            }
        }
        Ok(())
    }

    /// List every todo in id order. Read-only.
    pub async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let todos = match self {
            TodoStore::Embedded(pool) => {
                sqlx::query_as::<_, Todo>("SELECT id, title, done FROM todos ORDER BY id")
                    .fetch_all(pool)
                    .await?
            }
            TodoStore::Server(pool) => {
                sqlx::query_as::<_, Todo>("SELECT id, title, done FROM todos ORDER BY id")
                    .fetch_all(pool)
                    .await?
            }
        };
        Ok(todos)
    }

    /// Insert a todo and return the stored row including its assigned id.
    pub async fn create(&self, title: &str, done: bool) -> Result<Todo, StoreError> {
        let todo = match self {
            TodoStore::Embedded(pool) => {
                sqlx::query_as::<_, Todo>(
                    "INSERT INTO todos (title, done) VALUES (?, ?) RETURNING id, title, done",
                )
                .bind(title)
                .bind(done)
                .fetch_one(pool)
                .await?
            }
            TodoStore::Server(pool) => {
                sqlx::query_as::<_, Todo>(
                    "INSERT INTO todos (title, done) VALUES ($1, $2) RETURNING id, title, done",
                )
                .bind(title)
                .bind(done)
                .fetch_one(pool)
                .await?
            }
        };
        Ok(todo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single connection so every query sees the same in-memory database
    async fn memory_store() -> TodoStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite");
        let store = TodoStore::Embedded(pool);
        store.init_schema().await.expect("schema init");
        store
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let store = memory_store().await;
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_assigns_distinct_ids() {
        let store = memory_store().await;
        let first = store.create("buy milk", false).await.unwrap();
        let second = store.create("walk dog", true).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.title, "buy milk");
        assert!(!first.done);
        assert!(second.done);
    }

    #[tokio::test]
    async fn test_list_returns_created_rows_in_id_order() {
        let store = memory_store().await;
        let a = store.create("a", false).await.unwrap();
        let b = store.create("b", true).await.unwrap();

        let todos = store.list().await.unwrap();
        assert_eq!(todos, vec![a, b]);
    }

    #[tokio::test]
    async fn test_init_schema_is_idempotent() {
        let store = memory_store().await;
        store.init_schema().await.unwrap();
        store.create("still works", false).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_title_is_allowed() {
        let store = memory_store().await;
        let todo = store.create("", false).await.unwrap();
        assert_eq!(todo.title, "");
    }
}

//! SQLite persistence layer for Huddle.
//!
//! This crate provides async database operations for meetings, agents,
//! and users using SQLx with SQLite. Meeting status transitions are
//! exposed only as single conditional updates (`UPDATE ... WHERE id = ?
//! AND status = ?`) so that duplicate or out-of-order webhook
//! deliveries can never corrupt the lifecycle.
//!
//! # Example
//!
//! ```no_run
//! use database::{Database, models::Meeting, meeting};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:huddle.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     let m = Meeting::new("m1", "Weekly sync", "user-1", "agent-1");
//!     meeting::create_meeting(db.pool(), &m).await?;
//!
//!     // Conditional transition: only fires while the row is `upcoming`
//!     let started = meeting::start_meeting(db.pool(), "m1").await?;
//!     assert!(started.is_some());
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod error;
pub mod meeting;
pub mod models;
pub mod user;

pub use error::{DatabaseError, Result};
pub use models::{Agent, Meeting, MeetingStatus, User};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    /// High enough to handle concurrent webhook deliveries.
    const DEFAULT_POOL_SIZE: u32 = 20;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    /// For in-memory test databases use [`Self::connect_with_pool_size`]
    /// with a pool size of 1, since each SQLite connection gets its own
    /// in-memory database.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!("Connected to database: {} (pool size: {})", url, pool_size);

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> Database {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1).await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_meeting_crud() {
        let db = test_db().await;

        user::create_user(
            db.pool(),
            &User {
                id: "u1".to_string(),
                name: "Alice".to_string(),
            },
        )
        .await
        .unwrap();

        agent::create_agent(
            db.pool(),
            &Agent {
                id: "a1".to_string(),
                name: "Notetaker".to_string(),
                instructions: "Take notes.".to_string(),
                user_id: "u1".to_string(),
            },
        )
        .await
        .unwrap();

        // Create
        let m = Meeting::new("m1", "Weekly sync", "u1", "a1");
        meeting::create_meeting(db.pool(), &m).await.unwrap();

        // Read
        let fetched = meeting::get_meeting(db.pool(), "m1").await.unwrap();
        assert_eq!(fetched.name, "Weekly sync");
        assert_eq!(fetched.status, MeetingStatus::Upcoming);
        assert!(fetched.started_at.is_none());

        // List
        let all = meeting::list_meetings(db.pool()).await.unwrap();
        assert_eq!(all.len(), 1);

        // Delete
        meeting::delete_meeting(db.pool(), "m1").await.unwrap();
        let result = meeting::get_meeting(db.pool(), "m1").await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }
}

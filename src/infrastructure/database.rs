//! Pooled SQLite connection

use crate::infrastructure::settings::Settings;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::ops::Deref;
use std::str::FromStr;

pub struct DatabaseConnection {
    connection: SqlitePool,
}

impl DatabaseConnection {
    /// Opens the pool described by `DATABASE_URL` and brings the schema up to date.
    pub async fn connect(settings: &Settings) -> Result<DatabaseConnection, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(&settings.database_url)?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        sqlx::migrate!().run(&pool).await?;

        Ok(DatabaseConnection { connection: pool })
    }

    pub fn from_pool(pool: SqlitePool) -> DatabaseConnection {
        DatabaseConnection { connection: pool }
    }
}

impl Deref for DatabaseConnection {
    type Target = SqlitePool;

    fn deref(&self) -> &Self::Target {
        &self.connection
    }
}

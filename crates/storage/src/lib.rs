use anyhow::{Context, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use shared::domain::{ProjectFolder, ProjectFolderId};

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // Every connection to an in-memory database is a separate database.
        let max_connections = if is_in_memory(database_url) { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(connect_options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    pub async fn create_project_folder(
        &self,
        user_email: &str,
        name: &str,
    ) -> Result<ProjectFolderId> {
        let rec =
            sqlx::query("INSERT INTO project_folders (user_email, name) VALUES (?, ?) RETURNING id")
                .bind(user_email)
                .bind(name)
                .fetch_one(&self.pool)
                .await
                .with_context(|| format!("failed to create project folder '{name}'"))?;
        Ok(ProjectFolderId(rec.get::<i64, _>(0)))
    }

    /// Folders owned by `user_email`, ordered by name ascending.
    pub async fn list_project_folders(&self, user_email: &str) -> Result<Vec<ProjectFolder>> {
        let rows = sqlx::query(
            "SELECT id, name
             FROM project_folders
             WHERE user_email = ?
             ORDER BY name ASC, id ASC",
        )
        .bind(user_email)
        .fetch_all(&self.pool)
        .await
        .context("failed to list project folders")?;
        Ok(rows
            .into_iter()
            .map(|r| ProjectFolder {
                id: ProjectFolderId(r.get::<i64, _>(0)),
                name: r.get::<String, _>(1),
            })
            .collect())
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.starts_with("sqlite::memory:") || database_url.contains("mode=memory")
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if is_in_memory(database_url) || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

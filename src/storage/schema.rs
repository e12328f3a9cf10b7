use super::Store;
use crate::{Error, Result};

/// Table definitions, applied in order. All are idempotent.
const TABLES: &[(&str, &str)] = &[
    (
        "pillHistory",
        r#"
        CREATE TABLE IF NOT EXISTS pillHistory (
            pill_id INTEGER NOT NULL,
            event_type TEXT NOT NULL,
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    ),
    (
        "pillSchedule",
        r#"
        CREATE TABLE IF NOT EXISTS pillSchedule (
            pill_id INTEGER NOT NULL,
            dispense_time TIME NOT NULL
        )
        "#,
    ),
    (
        "motion",
        r#"
        CREATE TABLE IF NOT EXISTS motion (
            room_id INTEGER NOT NULL,
            event_type TEXT NOT NULL,
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    ),
    (
        "recipes",
        r#"
        CREATE TABLE IF NOT EXISTS recipes (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            estimated_time INTEGER NOT NULL,
            ingredients TEXT NOT NULL
        )
        "#,
    ),
    (
        "steps",
        r#"
        CREATE TABLE IF NOT EXISTS steps (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            recipe_id INTEGER NOT NULL,
            step_order INTEGER NOT NULL,
            name TEXT NOT NULL,
            duration INTEGER NOT NULL,
            instructions TEXT NOT NULL,
            input TEXT NOT NULL,
            output TEXT NOT NULL,
            FOREIGN KEY (recipe_id) REFERENCES recipes(id) ON DELETE CASCADE
        )
        "#,
    ),
    (
        "potState",
        r#"
        CREATE TABLE IF NOT EXISTS potState (
            recipe_id INTEGER NOT NULL,
            current_step INTEGER NOT NULL
        )
        "#,
    ),
    (
        "idx_steps_recipe_order",
        "CREATE INDEX IF NOT EXISTS idx_steps_recipe_order ON steps(recipe_id, step_order)",
    ),
];

impl Store {
    /// Create any missing tables inside one transaction.
    pub(super) async fn migrate(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for (name, ddl) in TABLES {
            sqlx::query(*ddl)
                .execute(&mut *tx)
                .await
                .map_err(|e| Error::internal(format!("Migration failed ({}): {}", name, e)))?;
        }

        tx.commit().await?;

        tracing::debug!(tables = TABLES.len(), "Schema initialised");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn migrate_is_idempotent() {
        let store = Store::in_memory().await.unwrap();
        store.migrate().await.unwrap();
        store.migrate().await.unwrap();
    }

    #[tokio::test]
    async fn creates_every_table() {
        let store = Store::in_memory().await.unwrap();
        let names: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
                .fetch_all(&store.pool)
                .await
                .unwrap();
        let names: Vec<String> = names.into_iter().map(|(n,)| n).collect();

        for table in ["pillHistory", "pillSchedule", "motion", "recipes", "steps", "potState"] {
            assert!(names.iter().any(|n| n == table), "missing table {table}");
        }
    }
}

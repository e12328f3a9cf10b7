use super::Store;
use crate::types::PotState;
use crate::Result;

impl Store {
    /// All pot-state rows. At most one exists when writes go through this store.
    pub async fn pot_state(&self) -> Result<Vec<PotState>> {
        let rows = sqlx::query_as("SELECT recipe_id, current_step FROM potState ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Make `state` the only pot-state row.
    ///
    /// Delete and insert share one transaction so concurrent callers never
    /// observe zero rows or leave duplicates behind.
    pub async fn replace_pot_state(&self, state: PotState) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM potState").execute(&mut *tx).await?;
        sqlx::query("INSERT INTO potState (recipe_id, current_step) VALUES (?, ?)")
            .bind(state.recipe_id)
            .bind(state.current_step)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            recipe_id = state.recipe_id,
            current_step = state.current_step,
            "Pot state replaced"
        );
        Ok(())
    }

    /// Move the recipe on the pot to `state.current_step`.
    ///
    /// Returns the number of rows changed; `0` when that recipe is not on the pot.
    pub async fn update_current_step(&self, state: PotState) -> Result<u64> {
        let result = sqlx::query("UPDATE potState SET current_step = ? WHERE recipe_id = ?")
            .bind(state.current_step)
            .bind(state.recipe_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn clear_pot_state(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM potState").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

use super::Store;
use crate::types::{NewStep, Recipe, RecipeDetail, RecipeId, RecipeRow, Step};
use crate::{Error, Result};

const STEP_COLUMNS: &str =
    "id, recipe_id, step_order, name, duration, instructions, input, output";

impl Store {
    /// Insert a recipe under its client-supplied id.
    ///
    /// A duplicate id fails on the primary key constraint.
    pub async fn create_recipe(&self, recipe: &Recipe) -> Result<()> {
        let ingredients = serde_json::to_string(&recipe.ingredients)?;

        sqlx::query(
            "INSERT INTO recipes (id, name, estimated_time, ingredients) VALUES (?, ?, ?, ?)",
        )
        .bind(recipe.id)
        .bind(&recipe.name)
        .bind(recipe.estimated_time)
        .bind(ingredients)
        .execute(&self.pool)
        .await?;

        tracing::debug!(recipe_id = recipe.id, name = %recipe.name, "Recipe created");
        Ok(())
    }

    /// Fetch a recipe and its steps, ordered by `step_order`.
    pub async fn get_recipe(&self, id: RecipeId) -> Result<RecipeDetail> {
        let row: RecipeRow = sqlx::query_as(
            "SELECT id, name, estimated_time, ingredients FROM recipes WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::not_found(format!("recipe not found: {}", id)))?;

        let steps: Vec<Step> = sqlx::query_as(&format!(
            "SELECT {STEP_COLUMNS} FROM steps WHERE recipe_id = ? ORDER BY step_order ASC, id ASC"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(RecipeDetail {
            recipe: row.try_into()?,
            steps,
        })
    }

    /// Delete every recipe. Their steps go with them (`ON DELETE CASCADE`).
    pub async fn reset_recipes(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM recipes").execute(&self.pool).await?;

        tracing::info!(rows = result.rows_affected(), "Recipes reset");
        Ok(result.rows_affected())
    }

    /// Insert a step and return it with its assigned id.
    pub async fn add_step(&self, step: NewStep) -> Result<Step> {
        let result = sqlx::query(
            r#"
            INSERT INTO steps (recipe_id, step_order, name, duration, instructions, input, output)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(step.recipe_id)
        .bind(step.step_order)
        .bind(&step.name)
        .bind(step.duration)
        .bind(&step.instructions)
        .bind(&step.input)
        .bind(&step.output)
        .execute(&self.pool)
        .await?;

        Ok(step.into_step(result.last_insert_rowid()))
    }

    /// Steps at a given position of a recipe. Duplicates are all returned.
    pub async fn find_steps(&self, recipe_id: RecipeId, step_order: i64) -> Result<Vec<Step>> {
        let steps = sqlx::query_as(&format!(
            "SELECT {STEP_COLUMNS} FROM steps WHERE recipe_id = ? AND step_order = ? ORDER BY id"
        ))
        .bind(recipe_id)
        .bind(step_order)
        .fetch_all(&self.pool)
        .await?;

        Ok(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soup() -> Recipe {
        Recipe {
            id: 1,
            name: "Soup".into(),
            estimated_time: 20,
            ingredients: vec!["water".into(), "salt".into()],
        }
    }

    fn step(recipe_id: RecipeId, step_order: i64, name: &str) -> NewStep {
        NewStep {
            recipe_id,
            step_order,
            name: name.into(),
            duration: 5,
            instructions: format!("Do {name}"),
            input: "pot".into(),
            output: "pot".into(),
        }
    }

    #[tokio::test]
    async fn recipe_round_trips_with_empty_steps() {
        let store = Store::in_memory().await.unwrap();
        store.create_recipe(&soup()).await.unwrap();

        let detail = store.get_recipe(1).await.unwrap();
        assert_eq!(detail.recipe, soup());
        assert!(detail.steps.is_empty());
    }

    #[tokio::test]
    async fn missing_recipe_is_not_found() {
        let store = Store::in_memory().await.unwrap();
        let err = store.get_recipe(99).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(err.to_string(), "recipe not found: 99");
    }

    #[tokio::test]
    async fn duplicate_recipe_id_is_rejected() {
        let store = Store::in_memory().await.unwrap();
        store.create_recipe(&soup()).await.unwrap();
        let err = store.create_recipe(&soup()).await.unwrap_err();
        assert!(matches!(err, Error::Database(_)));
    }

    #[tokio::test]
    async fn steps_come_back_sorted() {
        let store = Store::in_memory().await.unwrap();
        store.create_recipe(&soup()).await.unwrap();

        for order in [3, 1, 2] {
            store.add_step(step(1, order, &format!("s{order}"))).await.unwrap();
        }

        let detail = store.get_recipe(1).await.unwrap();
        let orders: Vec<i64> = detail.steps.iter().map(|s| s.step_order).collect();
        assert_eq!(orders, [1, 2, 3]);
    }

    #[tokio::test]
    async fn add_step_assigns_ids() {
        let store = Store::in_memory().await.unwrap();
        store.create_recipe(&soup()).await.unwrap();

        let first = store.add_step(step(1, 1, "boil")).await.unwrap();
        let second = store.add_step(step(1, 2, "season")).await.unwrap();
        assert!(second.id > first.id);
        assert_eq!(first.name, "boil");
    }

    #[tokio::test]
    async fn step_for_unknown_recipe_is_rejected() {
        let store = Store::in_memory().await.unwrap();
        let err = store.add_step(step(5, 1, "orphan")).await.unwrap_err();
        assert!(matches!(err, Error::Database(_)));
    }

    #[tokio::test]
    async fn find_steps_returns_duplicates() {
        let store = Store::in_memory().await.unwrap();
        store.create_recipe(&soup()).await.unwrap();
        store.add_step(step(1, 2, "a")).await.unwrap();
        store.add_step(step(1, 2, "b")).await.unwrap();
        store.add_step(step(1, 3, "c")).await.unwrap();

        let found = store.find_steps(1, 2).await.unwrap();
        let names: Vec<&str> = found.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert!(store.find_steps(1, 9).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reset_recipes_cascades_to_steps() {
        let store = Store::in_memory().await.unwrap();
        store.create_recipe(&soup()).await.unwrap();
        store.add_step(step(1, 1, "boil")).await.unwrap();

        assert_eq!(store.reset_recipes().await.unwrap(), 1);
        assert!(store.find_steps(1, 1).await.unwrap().is_empty());

        // Re-creating the same id starts with a clean step list
        store.create_recipe(&soup()).await.unwrap();
        assert!(store.get_recipe(1).await.unwrap().steps.is_empty());
    }
}

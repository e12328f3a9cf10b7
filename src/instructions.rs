//! Step tables for recipes driven by spoken or typed instructions
//!
//! The pot's voice front-end posts the text of the instruction it just read
//! out. The table maps that text back to a 1-based step position.

use std::collections::HashMap;

use crate::types::RecipeId;

/// Recipe used when an instruction arrives without a recipe id
pub const DEFAULT_RECIPE_ID: RecipeId = 1;

/// Position reported for text that matches no step
pub const UNKNOWN_STEP: i64 = 0;

const PASTA_STEPS: [&str; 6] = [
    "Fill the pot with water",
    "Bring the water to a boil",
    "Add the pasta",
    "Stir and cook for ten minutes",
    "Drain the pasta",
    "Serve and enjoy",
];

/// Ordered instruction lists keyed by recipe id
#[derive(Debug, Clone)]
pub struct InstructionTable {
    recipes: HashMap<RecipeId, Vec<String>>,
}

impl InstructionTable {
    pub fn empty() -> Self {
        Self {
            recipes: HashMap::new(),
        }
    }

    /// Register (or replace) the instruction list for a recipe.
    pub fn insert<I, S>(&mut self, recipe_id: RecipeId, steps: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recipes
            .insert(recipe_id, steps.into_iter().map(Into::into).collect());
    }

    pub fn steps(&self, recipe_id: RecipeId) -> Option<&[String]> {
        self.recipes.get(&recipe_id).map(Vec::as_slice)
    }

    /// 1-based position of `message` in the recipe's list.
    ///
    /// Surrounding whitespace is ignored; the rest must match exactly.
    pub fn position(&self, recipe_id: RecipeId, message: &str) -> Option<i64> {
        let message = message.trim();
        self.steps(recipe_id)?
            .iter()
            .position(|step| step == message)
            .map(|idx| idx as i64 + 1)
    }
}

impl Default for InstructionTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.insert(DEFAULT_RECIPE_ID, PASTA_STEPS);
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_has_six_steps() {
        let table = InstructionTable::default();
        assert_eq!(table.steps(DEFAULT_RECIPE_ID).map(<[String]>::len), Some(6));
    }

    #[test]
    fn positions_are_one_based() {
        let table = InstructionTable::default();
        assert_eq!(table.position(DEFAULT_RECIPE_ID, "Fill the pot with water"), Some(1));
        assert_eq!(table.position(DEFAULT_RECIPE_ID, "Add the pasta"), Some(3));
        assert_eq!(table.position(DEFAULT_RECIPE_ID, "Serve and enjoy"), Some(6));
    }

    #[test]
    fn trims_whitespace_but_is_case_sensitive() {
        let table = InstructionTable::default();
        assert_eq!(table.position(DEFAULT_RECIPE_ID, "  Add the pasta\n"), Some(3));
        assert_eq!(table.position(DEFAULT_RECIPE_ID, "add the pasta"), None);
    }

    #[test]
    fn unknown_recipe_or_text_is_none() {
        let table = InstructionTable::default();
        assert_eq!(table.position(DEFAULT_RECIPE_ID, "Make coffee"), None);
        assert_eq!(table.position(42, "Add the pasta"), None);
    }

    #[test]
    fn custom_recipes_can_be_registered() {
        let mut table = InstructionTable::empty();
        table.insert(7, ["Crack the eggs", "Whisk"]);
        assert_eq!(table.position(7, "Whisk"), Some(2));
        assert_eq!(table.position(DEFAULT_RECIPE_ID, "Add the pasta"), None);
    }
}

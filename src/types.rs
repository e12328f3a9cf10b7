//! Core types for carepot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{Error, Result};

/// Recipe identifier (client-supplied)
pub type RecipeId = i64;

/// A dispenser event recorded against a pill slot.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct PillHistoryEvent {
    pub pill_id: i64,
    pub event_type: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPillEvent {
    pub pill_id: i64,
    pub event_type: String,
}

/// Scheduled dispense time for a pill slot.
///
/// Entries carry no identifier; duplicates are indistinguishable.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct PillScheduleEntry {
    pub pill_id: i64,
    /// Time of day, e.g. `"08:30"`
    pub dispense_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct MotionEvent {
    pub room_id: i64,
    pub event_type: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMotionEvent {
    pub room_id: i64,
    pub event_type: String,
}

/// Recipe as exchanged over the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    /// Minutes
    pub estimated_time: i64,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

/// Recipe as stored; ingredients are a JSON array in a TEXT column.
#[derive(Debug, Clone, FromRow)]
pub struct RecipeRow {
    pub id: RecipeId,
    pub name: String,
    pub estimated_time: i64,
    pub ingredients: String,
}

impl TryFrom<RecipeRow> for Recipe {
    type Error = Error;

    fn try_from(row: RecipeRow) -> Result<Self> {
        Ok(Self {
            id: row.id,
            name: row.name,
            estimated_time: row.estimated_time,
            ingredients: serde_json::from_str(&row.ingredients)?,
        })
    }
}

/// Recipe together with its steps ordered by `step_order`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Step {
    pub id: i64,
    pub recipe_id: RecipeId,
    /// 1-based position within the recipe
    pub step_order: i64,
    pub name: String,
    pub duration: i64,
    pub instructions: String,
    pub input: String,
    pub output: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewStep {
    pub recipe_id: RecipeId,
    pub step_order: i64,
    pub name: String,
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub output: String,
}

impl NewStep {
    pub fn into_step(self, id: i64) -> Step {
        Step {
            id,
            recipe_id: self.recipe_id,
            step_order: self.step_order,
            name: self.name,
            duration: self.duration,
            instructions: self.instructions,
            input: self.input,
            output: self.output,
        }
    }
}

/// Which recipe is on the pot and how far along it is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct PotState {
    pub recipe_id: RecipeId,
    pub current_step: i64,
}

/// Body accepted by `POST /current-recipe`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CurrentRecipeRequest {
    /// Explicit recipe and step position
    Explicit {
        recipe_id: RecipeId,
        step_order: i64,
    },
    /// Human instruction text, resolved through the instruction table
    Instruction { message: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecipeQuery {
    pub id: RecipeId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StepQuery {
    pub recipe_id: RecipeId,
    pub step_order: i64,
}

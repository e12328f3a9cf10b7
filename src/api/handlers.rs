//! API handlers
//!
//! Inserts and updates map storage failures to 400; reads and bulk resets
//! map them to 500 (see [`ApiError`]).

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::Serialize;

use crate::api::{ApiError, AppState};
use crate::instructions::{DEFAULT_RECIPE_ID, UNKNOWN_STEP};
use crate::types::{
    CurrentRecipeRequest, MotionEvent, NewMotionEvent, NewPillEvent, NewStep, PillHistoryEvent,
    PillScheduleEntry, PotState, Recipe, RecipeDetail, RecipeQuery, Step, StepQuery,
};
use crate::Error;

type JsonBody<T> = Result<Json<T>, JsonRejection>;
type QueryParams<T> = Result<Query<T>, QueryRejection>;

const DELETED: &str = "Deleted successfully.";

/// Health check; also proves the database answers.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    state.store.ping().await.map_err(ApiError::read)?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: state.store.location().to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

/// Response for bulk deletes
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
    pub deleted: u64,
}

impl DeleteResponse {
    fn new(deleted: u64) -> Self {
        Self {
            message: DELETED,
            deleted,
        }
    }
}

// ---- pill history ----

pub async fn create_pill_event(
    State(state): State<AppState>,
    payload: JsonBody<NewPillEvent>,
) -> Result<Json<PillHistoryEvent>, ApiError> {
    let Json(event) = payload?;
    let recorded = state
        .store
        .record_pill_event(event)
        .await
        .map_err(ApiError::write)?;

    Ok(Json(recorded))
}

pub async fn list_pill_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<PillHistoryEvent>>, ApiError> {
    let history = state
        .store
        .list_pill_history()
        .await
        .map_err(ApiError::read)?;
    Ok(Json(history))
}

pub async fn reset_pill_history(
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let deleted = state
        .store
        .reset_pill_history()
        .await
        .map_err(ApiError::read)?;
    Ok(Json(DeleteResponse::new(deleted)))
}

// ---- pill schedule ----

pub async fn create_pill_schedule(
    State(state): State<AppState>,
    payload: JsonBody<PillScheduleEntry>,
) -> Result<Json<PillScheduleEntry>, ApiError> {
    let Json(entry) = payload?;
    state
        .store
        .add_pill_schedule(&entry)
        .await
        .map_err(ApiError::write)?;

    Ok(Json(entry))
}

pub async fn list_pill_schedule(
    State(state): State<AppState>,
) -> Result<Json<Vec<PillScheduleEntry>>, ApiError> {
    let schedule = state
        .store
        .list_pill_schedule()
        .await
        .map_err(ApiError::read)?;
    Ok(Json(schedule))
}

#[derive(Debug, Serialize)]
pub struct ScheduleDeleteResponse {
    #[serde(flatten)]
    pub entry: PillScheduleEntry,
    pub deleted: u64,
}

/// Delete every schedule entry matching the body's exact pair.
pub async fn delete_pill_schedule(
    State(state): State<AppState>,
    payload: JsonBody<PillScheduleEntry>,
) -> Result<Json<ScheduleDeleteResponse>, ApiError> {
    let Json(entry) = payload?;
    let deleted = state
        .store
        .remove_pill_schedule(&entry)
        .await
        .map_err(ApiError::write)?;

    Ok(Json(ScheduleDeleteResponse { entry, deleted }))
}

// ---- motion ----

pub async fn create_motion_event(
    State(state): State<AppState>,
    payload: JsonBody<NewMotionEvent>,
) -> Result<Json<MotionEvent>, ApiError> {
    let Json(event) = payload?;
    let recorded = state
        .store
        .record_motion_event(event)
        .await
        .map_err(ApiError::write)?;

    Ok(Json(recorded))
}

pub async fn list_motion_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<MotionEvent>>, ApiError> {
    let events = state
        .store
        .list_motion_events()
        .await
        .map_err(ApiError::read)?;
    Ok(Json(events))
}

pub async fn reset_motion_events(
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let deleted = state
        .store
        .reset_motion_events()
        .await
        .map_err(ApiError::read)?;
    Ok(Json(DeleteResponse::new(deleted)))
}

// ---- recipes and steps ----

pub async fn create_recipe(
    State(state): State<AppState>,
    payload: JsonBody<Recipe>,
) -> Result<Json<Recipe>, ApiError> {
    let Json(recipe) = payload?;
    state
        .store
        .create_recipe(&recipe)
        .await
        .map_err(ApiError::write)?;

    Ok(Json(recipe))
}

pub async fn get_recipe(
    State(state): State<AppState>,
    params: QueryParams<RecipeQuery>,
) -> Result<Json<RecipeDetail>, ApiError> {
    let Query(query) = params?;
    let detail = state
        .store
        .get_recipe(query.id)
        .await
        .map_err(ApiError::read)?;
    Ok(Json(detail))
}

/// Bulk-reset of every recipe together with its steps.
pub async fn reset_recipes(
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let deleted = state
        .store
        .reset_recipes()
        .await
        .map_err(ApiError::read)?;
    Ok(Json(DeleteResponse::new(deleted)))
}

pub async fn create_step(
    State(state): State<AppState>,
    payload: JsonBody<NewStep>,
) -> Result<Json<Step>, ApiError> {
    let Json(step) = payload?;
    let stored = state.store.add_step(step).await.map_err(ApiError::write)?;
    Ok(Json(stored))
}

pub async fn find_steps(
    State(state): State<AppState>,
    params: QueryParams<StepQuery>,
) -> Result<Json<Vec<Step>>, ApiError> {
    let Query(query) = params?;
    let steps = state
        .store
        .find_steps(query.recipe_id, query.step_order)
        .await
        .map_err(ApiError::read)?;
    Ok(Json(steps))
}

// ---- current recipe ----

pub async fn get_current_recipe(
    State(state): State<AppState>,
) -> Result<Json<Vec<PotState>>, ApiError> {
    let rows = state.store.pot_state().await.map_err(ApiError::read)?;
    Ok(Json(rows))
}

/// Replace the pot state, either explicitly or from an instruction's text.
pub async fn set_current_recipe(
    State(state): State<AppState>,
    payload: JsonBody<CurrentRecipeRequest>,
) -> Result<Json<PotState>, ApiError> {
    let Json(request) = payload?;

    let pot = match request {
        CurrentRecipeRequest::Explicit {
            recipe_id,
            step_order,
        } => PotState {
            recipe_id,
            current_step: step_order,
        },
        CurrentRecipeRequest::Instruction { message } => {
            resolve_instruction(&state, &message).map_err(ApiError::write)?
        }
    };

    state
        .store
        .replace_pot_state(pot)
        .await
        .map_err(ApiError::write)?;

    Ok(Json(pot))
}

fn resolve_instruction(state: &AppState, message: &str) -> crate::Result<PotState> {
    let current_step = match state.instructions.position(DEFAULT_RECIPE_ID, message) {
        Some(position) => position,
        None if state.reject_unknown_instructions => {
            return Err(Error::invalid_request(format!(
                "instruction does not match any step of recipe {}: {:?}",
                DEFAULT_RECIPE_ID, message
            )));
        }
        None => {
            tracing::warn!(%message, "Instruction matched no step; storing step {}", UNKNOWN_STEP);
            UNKNOWN_STEP
        }
    };

    Ok(PotState {
        recipe_id: DEFAULT_RECIPE_ID,
        current_step,
    })
}

#[derive(Debug, Serialize)]
pub struct CurrentStepResponse {
    #[serde(flatten)]
    pub state: PotState,
    pub updated: u64,
}

/// Advance the recipe on the pot. Succeeds even when nothing matched.
pub async fn update_current_step(
    State(state): State<AppState>,
    payload: JsonBody<PotState>,
) -> Result<Json<CurrentStepResponse>, ApiError> {
    let Json(pot) = payload?;
    let updated = state
        .store
        .update_current_step(pot)
        .await
        .map_err(ApiError::write)?;

    Ok(Json(CurrentStepResponse {
        state: pot,
        updated,
    }))
}

pub async fn clear_current_recipe(
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let deleted = state
        .store
        .clear_pot_state()
        .await
        .map_err(ApiError::read)?;
    Ok(Json(DeleteResponse::new(deleted)))
}

use chrono::Utc;

use super::Store;
use crate::types::{MotionEvent, NewMotionEvent};
use crate::Result;

impl Store {
    pub async fn record_motion_event(&self, event: NewMotionEvent) -> Result<MotionEvent> {
        let created_at = Utc::now();

        sqlx::query("INSERT INTO motion (room_id, event_type, created_at) VALUES (?, ?, ?)")
            .bind(event.room_id)
            .bind(&event.event_type)
            .bind(created_at)
            .execute(&self.pool)
            .await?;

        Ok(MotionEvent {
            room_id: event.room_id,
            event_type: event.event_type,
            created_at,
        })
    }

    pub async fn list_motion_events(&self) -> Result<Vec<MotionEvent>> {
        let rows = sqlx::query_as("SELECT room_id, event_type, created_at FROM motion ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    pub async fn reset_motion_events(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM motion").execute(&self.pool).await?;

        tracing::info!(rows = result.rows_affected(), "Motion events reset");
        Ok(result.rows_affected())
    }
}

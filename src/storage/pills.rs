use chrono::Utc;

use super::Store;
use crate::types::{NewPillEvent, PillHistoryEvent, PillScheduleEntry};
use crate::Result;

impl Store {
    /// Append a dispenser event stamped with the current time.
    pub async fn record_pill_event(&self, event: NewPillEvent) -> Result<PillHistoryEvent> {
        let created_at = Utc::now();

        sqlx::query("INSERT INTO pillHistory (pill_id, event_type, created_at) VALUES (?, ?, ?)")
            .bind(event.pill_id)
            .bind(&event.event_type)
            .bind(created_at)
            .execute(&self.pool)
            .await?;

        tracing::debug!(pill_id = event.pill_id, event_type = %event.event_type, "Pill event recorded");

        Ok(PillHistoryEvent {
            pill_id: event.pill_id,
            event_type: event.event_type,
            created_at,
        })
    }

    pub async fn list_pill_history(&self) -> Result<Vec<PillHistoryEvent>> {
        let rows = sqlx::query_as(
            "SELECT pill_id, event_type, created_at FROM pillHistory ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Delete every pill event. Returns the number of rows removed.
    pub async fn reset_pill_history(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM pillHistory")
            .execute(&self.pool)
            .await?;

        tracing::info!(rows = result.rows_affected(), "Pill history reset");
        Ok(result.rows_affected())
    }

    pub async fn add_pill_schedule(&self, entry: &PillScheduleEntry) -> Result<()> {
        sqlx::query("INSERT INTO pillSchedule (pill_id, dispense_time) VALUES (?, ?)")
            .bind(entry.pill_id)
            .bind(&entry.dispense_time)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn list_pill_schedule(&self) -> Result<Vec<PillScheduleEntry>> {
        let rows = sqlx::query_as("SELECT pill_id, dispense_time FROM pillSchedule ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Remove every entry matching the exact (pill_id, dispense_time) pair.
    ///
    /// Zero matches is not an error; the caller gets `0` back.
    pub async fn remove_pill_schedule(&self, entry: &PillScheduleEntry) -> Result<u64> {
        let result = sqlx::query("DELETE FROM pillSchedule WHERE pill_id = ? AND dispense_time = ?")
            .bind(entry.pill_id)
            .bind(&entry.dispense_time)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(pill_id: i64, time: &str) -> PillScheduleEntry {
        PillScheduleEntry {
            pill_id,
            dispense_time: time.to_string(),
        }
    }

    #[tokio::test]
    async fn pill_event_is_listed_with_timestamp() {
        let store = Store::in_memory().await.unwrap();
        let before = Utc::now();

        let recorded = store
            .record_pill_event(NewPillEvent {
                pill_id: 3,
                event_type: "dispensed".into(),
            })
            .await
            .unwrap();

        let history = store.list_pill_history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].pill_id, 3);
        assert_eq!(history[0].event_type, "dispensed");
        assert!(history[0].created_at >= before);
        assert_eq!(history[0].created_at, recorded.created_at);
    }

    #[tokio::test]
    async fn reset_clears_pill_history() {
        let store = Store::in_memory().await.unwrap();
        for pill_id in 1..=3 {
            store
                .record_pill_event(NewPillEvent {
                    pill_id,
                    event_type: "taken".into(),
                })
                .await
                .unwrap();
        }

        assert_eq!(store.reset_pill_history().await.unwrap(), 3);
        assert!(store.list_pill_history().await.unwrap().is_empty());
        assert_eq!(store.reset_pill_history().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn remove_schedule_only_touches_exact_matches() {
        let store = Store::in_memory().await.unwrap();
        store.add_pill_schedule(&entry(1, "08:00")).await.unwrap();
        store.add_pill_schedule(&entry(1, "20:00")).await.unwrap();
        store.add_pill_schedule(&entry(2, "08:00")).await.unwrap();

        let removed = store.remove_pill_schedule(&entry(1, "08:00")).await.unwrap();
        assert_eq!(removed, 1);

        let remaining = store.list_pill_schedule().await.unwrap();
        assert_eq!(remaining, vec![entry(1, "20:00"), entry(2, "08:00")]);
    }

    #[tokio::test]
    async fn remove_schedule_deletes_all_duplicates() {
        let store = Store::in_memory().await.unwrap();
        store.add_pill_schedule(&entry(4, "12:00")).await.unwrap();
        store.add_pill_schedule(&entry(4, "12:00")).await.unwrap();

        assert_eq!(store.remove_pill_schedule(&entry(4, "12:00")).await.unwrap(), 2);
        assert!(store.list_pill_schedule().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn remove_missing_schedule_is_not_an_error() {
        let store = Store::in_memory().await.unwrap();
        store.add_pill_schedule(&entry(1, "08:00")).await.unwrap();

        assert_eq!(store.remove_pill_schedule(&entry(9, "23:59")).await.unwrap(), 0);
        assert_eq!(store.list_pill_schedule().await.unwrap().len(), 1);
    }
}

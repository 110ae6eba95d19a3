// region:    --- Imports
use crate::auction::model::{HistoryRecord, NewHistoryRecord};
use sqlx::{Postgres, Transaction};
// endregion: --- Imports

// region:    --- Queries

/// 종료 기록 추가 (append 전용)
pub const INSERT_HISTORY: &str = r#"
    INSERT INTO auction_history (title, description, owner_id, created_at, closed_at, winner_id, final_price)
    VALUES ($1, $2, $3, $4, $5, $6, $7)
    RETURNING id, title, description, owner_id, created_at, closed_at, winner_id, final_price
"#;

// endregion: --- Queries

// region:    --- Store Operations

/// 종료 기록 추가
pub async fn insert_history(
    tx: &mut Transaction<'_, Postgres>,
    record: &NewHistoryRecord,
) -> Result<HistoryRecord, sqlx::Error> {
    sqlx::query_as::<_, HistoryRecord>(INSERT_HISTORY)
        .bind(&record.title)
        .bind(record.description.as_deref())
        .bind(record.owner_id)
        .bind(record.created_at)
        .bind(record.closed_at)
        .bind(record.winner_id)
        .bind(record.final_price)
        .fetch_one(&mut **tx)
        .await
}

// endregion: --- Store Operations

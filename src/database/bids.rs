// region:    --- Imports
use crate::auction::model::Bid;
use chrono::{DateTime, Utc};
use sqlx::{Postgres, Transaction};
// endregion: --- Imports

// region:    --- Queries

/// 입찰 기록 추가
pub const INSERT_BID: &str = r#"
    INSERT INTO bids (auction_id, user_id, amount, timestamp)
    VALUES ($1, $2, $3, $4)
    RETURNING id, auction_id, user_id, amount, timestamp
"#;

/// 경매의 전체 입찰 조회 (커밋 순서)
pub const LIST_BIDS: &str = r#"
    SELECT id, auction_id, user_id, amount, timestamp
    FROM bids
    WHERE auction_id = $1
    ORDER BY timestamp ASC, id ASC
"#;

/// 입찰 존재 여부
pub const HAS_BIDS: &str = "SELECT EXISTS (SELECT 1 FROM bids WHERE auction_id = $1)";

/// 경매의 입찰 일괄 삭제
pub const DELETE_BIDS: &str = "DELETE FROM bids WHERE auction_id = $1";

// endregion: --- Queries

// region:    --- Store Operations

/// 입찰 기록 추가
pub async fn insert_bid(
    tx: &mut Transaction<'_, Postgres>,
    auction_id: i64,
    user_id: i64,
    amount: f64,
    timestamp: DateTime<Utc>,
) -> Result<Bid, sqlx::Error> {
    sqlx::query_as::<_, Bid>(INSERT_BID)
        .bind(auction_id)
        .bind(user_id)
        .bind(amount)
        .bind(timestamp)
        .fetch_one(&mut **tx)
        .await
}

/// 경매의 전체 입찰 조회
pub async fn list_bids(
    tx: &mut Transaction<'_, Postgres>,
    auction_id: i64,
) -> Result<Vec<Bid>, sqlx::Error> {
    sqlx::query_as::<_, Bid>(LIST_BIDS)
        .bind(auction_id)
        .fetch_all(&mut **tx)
        .await
}

/// 입찰 존재 여부 확인
pub async fn has_bids(
    tx: &mut Transaction<'_, Postgres>,
    auction_id: i64,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(HAS_BIDS)
        .bind(auction_id)
        .fetch_one(&mut **tx)
        .await
}

/// 경매의 입찰 일괄 삭제
pub async fn delete_bids(
    tx: &mut Transaction<'_, Postgres>,
    auction_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(DELETE_BIDS)
        .bind(auction_id)
        .execute(&mut **tx)
        .await?;
    Ok(result.rows_affected())
}

// endregion: --- Store Operations

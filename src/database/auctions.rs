// region:    --- Imports
use crate::auction::model::{Auction, AuctionUpdate};
use chrono::{DateTime, Utc};
use sqlx::{Postgres, Transaction};
// endregion: --- Imports

// region:    --- Queries

/// 경매 단건 조회
pub const FIND_AUCTION: &str =
    "SELECT id, title, description, owner_id, starting_price, current_price, created_at FROM auctions WHERE id = $1";

/// 경매 생성. 현재 가격은 시작 가격으로 초기화된다
pub const INSERT_AUCTION: &str = r#"
    INSERT INTO auctions (title, description, owner_id, starting_price, current_price, created_at)
    VALUES ($1, $2, $3, $4, $5, $6)
    RETURNING id, title, description, owner_id, starting_price, current_price, created_at
"#;

/// 현재 가격 갱신
pub const UPDATE_CURRENT_PRICE: &str = "UPDATE auctions SET current_price = $1 WHERE id = $2";

/// 허용된 필드 수정. 시작 가격을 바꾸면 현재 가격도 같이 재설정된다
pub const APPLY_AUCTION_UPDATE: &str = r#"
    UPDATE auctions
    SET title = COALESCE($1, title),
        description = COALESCE($2, description),
        starting_price = COALESCE($3, starting_price),
        current_price = COALESCE($3, current_price)
    WHERE id = $4
    RETURNING id, title, description, owner_id, starting_price, current_price, created_at
"#;

/// 경매 삭제
pub const DELETE_AUCTION: &str = "DELETE FROM auctions WHERE id = $1";

// endregion: --- Queries

// region:    --- Store Operations

/// 경매 단건 조회
pub async fn find_auction(
    tx: &mut Transaction<'_, Postgres>,
    auction_id: i64,
) -> Result<Option<Auction>, sqlx::Error> {
    sqlx::query_as::<_, Auction>(FIND_AUCTION)
        .bind(auction_id)
        .fetch_optional(&mut **tx)
        .await
}

/// 경매 생성
pub async fn insert_auction(
    tx: &mut Transaction<'_, Postgres>,
    title: &str,
    description: Option<&str>,
    owner_id: i64,
    starting_price: f64,
    created_at: DateTime<Utc>,
) -> Result<Auction, sqlx::Error> {
    sqlx::query_as::<_, Auction>(INSERT_AUCTION)
        .bind(title)
        .bind(description)
        .bind(owner_id)
        .bind(starting_price)
        .bind(starting_price)
        .bind(created_at)
        .fetch_one(&mut **tx)
        .await
}

/// 현재 가격 갱신
pub async fn update_current_price(
    tx: &mut Transaction<'_, Postgres>,
    auction_id: i64,
    price: f64,
) -> Result<(), sqlx::Error> {
    sqlx::query(UPDATE_CURRENT_PRICE)
        .bind(price)
        .bind(auction_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// 허용된 필드 수정
pub async fn apply_update(
    tx: &mut Transaction<'_, Postgres>,
    auction_id: i64,
    update: &AuctionUpdate,
) -> Result<Auction, sqlx::Error> {
    sqlx::query_as::<_, Auction>(APPLY_AUCTION_UPDATE)
        .bind(update.title.as_deref())
        .bind(update.description.as_deref())
        .bind(update.starting_price)
        .bind(auction_id)
        .fetch_one(&mut **tx)
        .await
}

/// 경매 삭제
pub async fn delete_auction(
    tx: &mut Transaction<'_, Postgres>,
    auction_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(DELETE_AUCTION)
        .bind(auction_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

// endregion: --- Store Operations

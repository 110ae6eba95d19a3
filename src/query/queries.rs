/// 경매 조회
pub const GET_AUCTION: &str =
    "SELECT id, title, description, owner_id, starting_price, current_price, created_at FROM auctions WHERE id = $1";

/// 입찰 이력 조회 (최신 순)
pub const GET_BID_HISTORY: &str = r#"
    SELECT id, auction_id, user_id, amount, timestamp
    FROM bids
    WHERE auction_id = $1
    ORDER BY timestamp DESC, id DESC
"#;

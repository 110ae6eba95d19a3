// region:    --- Imports
use crate::audit::AuditSink;
use crate::auction::model::Bid;
use crate::bidding::retry::RetryPolicy;
use crate::database::{auctions, bids, DatabaseManager};
use crate::error::EngineError;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
// endregion: --- Imports

// region:    --- Commands

/// 입찰 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlaceBidCommand {
    pub auction_id: i64,
    pub user_id: i64,
    pub amount: f64,
}

/// 입찰 처리
///
/// 한 트랜잭션 안에서 경매를 읽고, 금액을 검증하고, 현재 가격을 갱신하고,
/// 입찰 기록을 추가한다. 일시적 충돌이면 시퀀스 전체를 정책에 따라 재시도한다.
pub async fn handle_place_bid(
    cmd: PlaceBidCommand,
    db_manager: &DatabaseManager,
    policy: &RetryPolicy,
    audit: &impl AuditSink,
) -> Result<Bid, EngineError> {
    info!("{:<12} --> 입찰 요청 처리 시작: {:?}", "Command", cmd);

    // 금액 사전 검증. 읽기 전에 거른다
    if !cmd.amount.is_finite() || cmd.amount <= 0.0 {
        return Err(EngineError::invalid_amount(cmd.amount));
    }

    let bid = policy
        .run(|_attempt| {
            let cmd = cmd.clone();
            async move { place_bid_tx(cmd, db_manager).await }
        })
        .await?;

    // 커밋된 입찰마다 감사 이벤트 하나
    audit
        .emit(
            cmd.user_id,
            "bid",
            &format!("경매 {} 입찰 금액 {}", cmd.auction_id, cmd.amount),
        )
        .await;

    info!(
        "{:<12} --> 입찰 완료: id={} amount={}",
        "Command", bid.id, bid.amount
    );
    Ok(bid)
}

/// 입찰 트랜잭션 한 번 수행
async fn place_bid_tx(
    cmd: PlaceBidCommand,
    db_manager: &DatabaseManager,
) -> Result<Bid, EngineError> {
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                // 경매 조회
                let auction = auctions::find_auction(tx, cmd.auction_id)
                    .await?
                    .ok_or_else(|| EngineError::auction_not_found(cmd.auction_id))?;

                // 입찰 금액은 현재 가격보다 높아야 한다
                if cmd.amount <= auction.current_price {
                    return Err(EngineError::low_bid(auction.current_price));
                }

                // 현재 가격 갱신과 입찰 추가는 같은 원자적 단위 안에서 일어난다
                auctions::update_current_price(tx, cmd.auction_id, cmd.amount).await?;
                let bid =
                    bids::insert_bid(tx, cmd.auction_id, cmd.user_id, cmd.amount, Utc::now())
                        .await?;
                Ok(bid)
            })
        })
        .await
}

// endregion: --- Commands

// region:    --- Imports
use crate::audit::AuditSink;
use crate::auction::model::{Auction, AuctionUpdate};
use crate::database::{auctions, bids, DatabaseManager};
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use tracing::info;
// endregion: --- Imports

// region:    --- Commands

/// 경매 수정 명령. 역할 확인은 호출자(HTTP 핸들러) 몫이다
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EditAuctionCommand {
    pub auction_id: i64,
    pub update: AuctionUpdate,
}

/// 경매 수정 처리
///
/// 입찰이 하나라도 있으면 시작 가격은 잠긴다. 시작 가격을 바꾸는 수정은
/// 현재 가격도 같은 값으로 재설정한다(입찰이 없는 동안 두 값은 같다).
pub async fn handle_edit_auction(
    cmd: EditAuctionCommand,
    editor_id: i64,
    db_manager: &DatabaseManager,
    audit: &impl AuditSink,
) -> Result<Auction, EngineError> {
    info!("{:<12} --> 경매 수정 처리 시작: {:?}", "Command", cmd);

    if cmd.update.is_empty() {
        return Err(EngineError::empty_update());
    }
    if let Some(price) = cmd.update.starting_price {
        if !price.is_finite() || price <= 0.0 {
            return Err(EngineError::invalid_price(price));
        }
    }

    let auction_id = cmd.auction_id;
    let updated = edit_auction_tx(cmd, db_manager).await?;

    audit
        .emit(editor_id, "edit_auction", &format!("경매 {} 수정", auction_id))
        .await;

    Ok(updated)
}

/// 수정 트랜잭션 수행
async fn edit_auction_tx(
    cmd: EditAuctionCommand,
    db_manager: &DatabaseManager,
) -> Result<Auction, EngineError> {
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                // 경매 존재 확인
                if auctions::find_auction(tx, cmd.auction_id).await?.is_none() {
                    return Err(EngineError::auction_not_found(cmd.auction_id));
                }

                // 입찰이 있으면 시작 가격 변경 금지
                if cmd.update.starting_price.is_some()
                    && bids::has_bids(tx, cmd.auction_id).await?
                {
                    return Err(EngineError::price_locked());
                }

                let updated = auctions::apply_update(tx, cmd.auction_id, &cmd.update).await?;
                Ok(updated)
            })
        })
        .await
}

// endregion: --- Commands

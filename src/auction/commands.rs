// region:    --- Imports
use crate::audit::AuditSink;
use crate::auction::model::Auction;
use crate::database::{auctions, DatabaseManager};
use crate::error::EngineError;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
// endregion: --- Imports

// region:    --- Commands

/// 경매 생성 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateAuctionCommand {
    pub title: String,
    pub description: Option<String>,
    pub starting_price: f64,
}

/// 경매 생성 처리. 현재 가격은 시작 가격으로 출발한다
pub async fn handle_create_auction(
    cmd: CreateAuctionCommand,
    owner_id: i64,
    db_manager: &DatabaseManager,
    audit: &impl AuditSink,
) -> Result<Auction, EngineError> {
    info!("{:<12} --> 경매 생성 처리 시작: {:?}", "Command", cmd);

    if !cmd.starting_price.is_finite() || cmd.starting_price <= 0.0 {
        return Err(EngineError::invalid_price(cmd.starting_price));
    }

    let created = create_auction_tx(cmd, owner_id, db_manager).await?;

    audit
        .emit(
            owner_id,
            "create_auction",
            &format!("경매 생성: {}", created.title),
        )
        .await;

    info!("{:<12} --> 경매 생성 완료: id={}", "Command", created.id);
    Ok(created)
}

/// 생성 트랜잭션 수행
async fn create_auction_tx(
    cmd: CreateAuctionCommand,
    owner_id: i64,
    db_manager: &DatabaseManager,
) -> Result<Auction, EngineError> {
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let auction = auctions::insert_auction(
                    tx,
                    &cmd.title,
                    cmd.description.as_deref(),
                    owner_id,
                    cmd.starting_price,
                    Utc::now(),
                )
                .await?;
                Ok(auction)
            })
        })
        .await
}

// endregion: --- Commands

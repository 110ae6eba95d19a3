// region:    --- Imports
use crate::audit::AuditSink;
use crate::auction::model::Bid;
use crate::auth::AuthUser;
use crate::database::{auctions, bids, history, DatabaseManager};
use crate::error::EngineError;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
// endregion: --- Imports

// region:    --- Commands

/// 경매 종료 명령
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct CloseAuctionCommand {
    pub auction_id: i64,
}

/// 종료 결과 요약
#[derive(Debug, Serialize, Deserialize)]
pub struct ClosingSummary {
    pub winner_id: Option<i64>,
    pub final_price: f64,
}

/// 낙찰자 결정. 최고 금액이 이기고, 동률이면 먼저 들어온 입찰이 이긴다
pub fn select_winner(bids: &[Bid]) -> Option<&Bid> {
    bids.iter().fold(None, |best, bid| match best {
        None => Some(bid),
        Some(b) if bid.amount > b.amount => Some(bid),
        Some(b) if bid.amount == b.amount && bid.timestamp < b.timestamp => Some(bid),
        other => other,
    })
}

/// 경매 종료 처리
///
/// 경매 읽기, 권한 확인, 낙찰자 결정, 기록 보관, 활성 레코드 삭제까지
/// 전부 한 트랜잭션이다. 종료는 일회성 전이라 재시도하지 않는다. 이미
/// 종료된 경매를 다시 종료하면 NotFound가 된다.
pub async fn handle_close_auction(
    cmd: CloseAuctionCommand,
    requester: AuthUser,
    db_manager: &DatabaseManager,
    audit: &impl AuditSink,
) -> Result<ClosingSummary, EngineError> {
    info!(
        "{:<12} --> 경매 종료 처리 시작: id={} requester={}",
        "Command", cmd.auction_id, requester.id
    );

    let summary = close_auction_tx(cmd, requester, db_manager).await?;

    audit
        .emit(
            requester.id,
            "close_auction",
            &format!("경매 {} 종료", cmd.auction_id),
        )
        .await;

    info!(
        "{:<12} --> 경매 종료 완료: id={} winner={:?} final_price={}",
        "Command", cmd.auction_id, summary.winner_id, summary.final_price
    );
    Ok(summary)
}

/// 종료 트랜잭션 수행
async fn close_auction_tx(
    cmd: CloseAuctionCommand,
    requester: AuthUser,
    db_manager: &DatabaseManager,
) -> Result<ClosingSummary, EngineError> {
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                // 경매 조회
                let auction = auctions::find_auction(tx, cmd.auction_id)
                    .await?
                    .ok_or_else(|| EngineError::auction_not_found(cmd.auction_id))?;

                // 소유자 또는 관리자만 종료할 수 있다
                if auction.owner_id != requester.id && !requester.is_admin() {
                    return Err(EngineError::Forbidden(
                        "이 경매를 종료할 권한이 없습니다.".to_string(),
                    ));
                }

                // 낙찰자 결정 후 기록으로 전환
                let all_bids = bids::list_bids(tx, cmd.auction_id).await?;
                let winner = select_winner(&all_bids);
                let record = auction.close(winner, Utc::now());
                let stored = history::insert_history(tx, &record).await?;

                // 활성 레코드와 입찰은 기록 추가와 같은 원자적 단위로 삭제된다
                auctions::delete_auction(tx, cmd.auction_id).await?;
                bids::delete_bids(tx, cmd.auction_id).await?;

                Ok(ClosingSummary {
                    winner_id: stored.winner_id,
                    final_price: stored.final_price,
                })
            })
        })
        .await
}

// endregion: --- Commands

// region:    --- Tests
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn bid(id: i64, user_id: i64, amount: f64, timestamp_secs: i64) -> Bid {
        Bid {
            id,
            auction_id: 1,
            user_id,
            amount,
            timestamp: DateTime::from_timestamp(timestamp_secs, 0).unwrap(),
        }
    }

    #[test]
    fn no_bids_means_no_winner() {
        assert!(select_winner(&[]).is_none());
    }

    #[test]
    fn single_bid_wins() {
        let bids = vec![bid(1, 10, 150.0, 1)];
        let winner = select_winner(&bids).unwrap();
        assert_eq!(winner.user_id, 10);
    }

    #[test]
    fn highest_amount_wins() {
        let bids = vec![
            bid(1, 10, 150.0, 1),
            bid(2, 20, 200.0, 2),
            bid(3, 30, 175.0, 3),
        ];
        let winner = select_winner(&bids).unwrap();
        assert_eq!(winner.user_id, 20);
        assert_eq!(winner.amount, 200.0);
    }

    #[test]
    fn equal_amounts_earliest_timestamp_wins() {
        let bids = vec![bid(1, 10, 200.0, 2), bid(2, 20, 200.0, 1)];
        let winner = select_winner(&bids).unwrap();
        assert_eq!(winner.user_id, 20);
    }

    #[test]
    fn equal_amounts_and_timestamps_keep_first_in_commit_order() {
        // 목록은 커밋 순서(타임스탬프, id 순)로 정렬되어 들어온다
        let bids = vec![bid(1, 10, 200.0, 1), bid(2, 20, 200.0, 1)];
        let winner = select_winner(&bids).unwrap();
        assert_eq!(winner.id, 1);
    }
}
// endregion: --- Tests

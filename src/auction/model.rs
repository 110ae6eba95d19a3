// region:    --- Imports
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
// endregion: --- Imports

// region:    --- Models

/// 활성 경매 모델
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Auction {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: i64,
    pub starting_price: f64,
    pub current_price: f64,
    pub created_at: DateTime<Utc>,
}

/// 입찰 모델. 생성 후 불변
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Bid {
    pub id: i64,
    pub auction_id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

/// 종료된 경매 기록 모델
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct HistoryRecord {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub closed_at: DateTime<Utc>,
    pub winner_id: Option<i64>,
    pub final_price: f64,
}

/// 저장 전의 종료 기록
#[derive(Debug, Clone)]
pub struct NewHistoryRecord {
    pub title: String,
    pub description: Option<String>,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub closed_at: DateTime<Utc>,
    pub winner_id: Option<i64>,
    pub final_price: f64,
}

// endregion: --- Models

// region:    --- Lifecycle

/// 경매 수명 주기. 활성 → 종료 단방향 전이만 존재한다
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuctionPhase {
    Active,
    Archived,
}

impl AuctionPhase {
    /// 종료 전이. 이미 종료된 경매는 전이할 수 없다
    pub fn archive(self) -> Option<AuctionPhase> {
        match self {
            AuctionPhase::Active => Some(AuctionPhase::Archived),
            AuctionPhase::Archived => None,
        }
    }
}

impl Auction {
    /// 활성 테이블에 있는 경매는 항상 활성 상태다
    pub fn phase(&self) -> AuctionPhase {
        AuctionPhase::Active
    }

    /// 경매 종료 전이. 활성 레코드를 소비해 종료 기록을 만든다
    ///
    /// 낙찰자가 없으면 최종 가격은 현재 가격(= 입찰이 없으므로 시작 가격)이다.
    pub fn close(self, winner: Option<&Bid>, closed_at: DateTime<Utc>) -> NewHistoryRecord {
        let final_price = match winner {
            Some(bid) => bid.amount,
            None => self.current_price,
        };
        NewHistoryRecord {
            title: self.title,
            description: self.description,
            owner_id: self.owner_id,
            created_at: self.created_at,
            closed_at,
            winner_id: winner.map(|bid| bid.user_id),
            final_price,
        }
    }
}

impl HistoryRecord {
    /// 기록 테이블에 있는 경매는 항상 종료 상태다
    pub fn phase(&self) -> AuctionPhase {
        AuctionPhase::Archived
    }
}

// endregion: --- Lifecycle

// region:    --- Update Model

/// 수정 가능한 필드 집합. 정의되지 않은 필드는 역직렬화 단계에서 거부된다
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct AuctionUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub starting_price: Option<f64>,
}

impl AuctionUpdate {
    /// 수정할 내용이 하나도 없는지 확인
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.starting_price.is_none()
    }
}

// endregion: --- Update Model

// region:    --- Tests
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_auction() -> Auction {
        Auction {
            id: 1,
            title: "중고 노트북".to_string(),
            description: Some("상태 좋음".to_string()),
            owner_id: 10,
            starting_price: 100.0,
            current_price: 100.0,
            created_at: DateTime::from_timestamp(1_000, 0).unwrap(),
        }
    }

    fn sample_bid(user_id: i64, amount: f64) -> Bid {
        Bid {
            id: 5,
            auction_id: 1,
            user_id,
            amount,
            timestamp: DateTime::from_timestamp(2_000, 0).unwrap(),
        }
    }

    #[test]
    fn active_phase_archives_exactly_once() {
        let archived = AuctionPhase::Active.archive();
        assert_eq!(archived, Some(AuctionPhase::Archived));
        assert_eq!(AuctionPhase::Archived.archive(), None);
    }

    #[test]
    fn auction_is_active_and_record_is_archived() {
        let auction = sample_auction();
        assert_eq!(auction.phase(), AuctionPhase::Active);

        let closed_at = DateTime::from_timestamp(3_000, 0).unwrap();
        let record = auction.close(None, closed_at);
        let stored = HistoryRecord {
            id: 1,
            title: record.title,
            description: record.description,
            owner_id: record.owner_id,
            created_at: record.created_at,
            closed_at: record.closed_at,
            winner_id: record.winner_id,
            final_price: record.final_price,
        };
        assert_eq!(stored.phase(), AuctionPhase::Archived);
    }

    #[test]
    fn close_with_winner_takes_winning_amount() {
        let mut auction = sample_auction();
        auction.current_price = 250.0;
        let bid = sample_bid(42, 250.0);

        let record = auction.close(Some(&bid), DateTime::from_timestamp(3_000, 0).unwrap());
        assert_eq!(record.winner_id, Some(42));
        assert_eq!(record.final_price, 250.0);
    }

    #[test]
    fn close_without_bids_keeps_starting_price() {
        let auction = sample_auction();
        let record = auction.close(None, DateTime::from_timestamp(3_000, 0).unwrap());
        assert_eq!(record.winner_id, None);
        assert_eq!(record.final_price, 100.0);
    }

    #[test]
    fn update_with_no_fields_is_empty() {
        assert!(AuctionUpdate::default().is_empty());
        let update = AuctionUpdate {
            title: Some("새 제목".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn update_rejects_unknown_fields() {
        let value = json!({ "owner_id": 99 });
        assert!(serde_json::from_value::<AuctionUpdate>(value).is_err());

        let value = json!({ "title": "새 제목", "starting_price": 50.0 });
        let update: AuctionUpdate = serde_json::from_value(value).unwrap();
        assert_eq!(update.starting_price, Some(50.0));
    }
}
// endregion: --- Tests

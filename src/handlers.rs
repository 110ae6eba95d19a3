// region:    --- Imports
use crate::auction::commands::{handle_create_auction, CreateAuctionCommand};
use crate::auction::model::AuctionUpdate;
use crate::audit::PgAuditSink;
use crate::auth::AuthUser;
use crate::bidding::commands::{handle_place_bid, PlaceBidCommand};
use crate::bidding::retry::RetryPolicy;
use crate::closing::commands::{handle_close_auction, CloseAuctionCommand};
use crate::database::DatabaseManager;
use crate::editing::commands::{handle_edit_auction, EditAuctionCommand};
use crate::error::EngineError;
use crate::query;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;
// endregion: --- Imports

// region:    --- App State

/// 라우터 전역 상태
#[derive(Clone)]
pub struct AppState {
    pub db_manager: Arc<DatabaseManager>,
    pub audit: Arc<PgAuditSink>,
    pub retry: RetryPolicy,
}

// endregion: --- App State

// region:    --- Command Handlers

/// 입찰 요청 바디
#[derive(Debug, Deserialize)]
pub struct BidRequest {
    pub amount: f64,
}

/// 경매 생성 요청 처리
pub async fn handle_create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(cmd): Json<CreateAuctionCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 경매 생성 요청: {:?}", "Command", cmd);
    match handle_create_auction(cmd, user.id, &state.db_manager, &*state.audit).await {
        Ok(auction) => (axum::http::StatusCode::OK, Json(auction)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// 입찰 요청 처리
pub async fn handle_bid(
    State(state): State<AppState>,
    Path(auction_id): Path<i64>,
    user: AuthUser,
    Json(body): Json<BidRequest>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 입찰 요청: auction_id={} amount={}",
        "Command", auction_id, body.amount
    );
    let cmd = PlaceBidCommand {
        auction_id,
        user_id: user.id,
        amount: body.amount,
    };
    match handle_place_bid(cmd, &state.db_manager, &state.retry, &*state.audit).await {
        Ok(bid) => (axum::http::StatusCode::OK, Json(bid)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// 경매 종료 요청 처리
pub async fn handle_close(
    State(state): State<AppState>,
    Path(auction_id): Path<i64>,
    user: AuthUser,
) -> impl IntoResponse {
    info!("{:<12} --> 경매 종료 요청: id={}", "Command", auction_id);
    let cmd = CloseAuctionCommand { auction_id };
    match handle_close_auction(cmd, user, &state.db_manager, &*state.audit).await {
        Ok(summary) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "message": "경매가 종료되었습니다.",
                "winner_id": summary.winner_id,
                "final_price": summary.final_price
            })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// 경매 수정 요청 처리 (관리자 전용)
pub async fn handle_edit(
    State(state): State<AppState>,
    Path(auction_id): Path<i64>,
    user: AuthUser,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    info!("{:<12} --> 경매 수정 요청: id={}", "Command", auction_id);

    if !user.is_admin() {
        return EngineError::Forbidden("관리자 권한이 없습니다.".to_string()).into_response();
    }

    // 정의되지 않은 필드는 여기서 거부된다
    let update: AuctionUpdate = match serde_json::from_value(body) {
        Ok(update) => update,
        Err(e) => return EngineError::field_not_editable(e.to_string()).into_response(),
    };

    let cmd = EditAuctionCommand { auction_id, update };
    match handle_edit_auction(cmd, user.id, &state.db_manager, &*state.audit).await {
        Ok(auction) => (axum::http::StatusCode::OK, Json(auction)).into_response(),
        Err(e) => e.into_response(),
    }
}

// endregion: --- Command Handlers

// region:    --- Query Handlers

/// 루트 핸들러
pub async fn handle_root() -> impl IntoResponse {
    Json(json!({ "message": "경매 허브 API가 동작 중입니다." }))
}

/// 경매 조회
pub async fn handle_get_auction(
    State(state): State<AppState>,
    Path(auction_id): Path<i64>,
) -> impl IntoResponse {
    info!("{:<12} --> 경매 조회 id: {}", "HandlerQuery", auction_id);
    match query::handlers::get_auction(&state.db_manager, auction_id).await {
        Ok(Some(auction)) => Json(auction).into_response(),
        Ok(None) => EngineError::auction_not_found(auction_id).into_response(),
        Err(e) => e.into_response(),
    }
}

/// 입찰 이력 조회
pub async fn handle_get_bid_history(
    State(state): State<AppState>,
    Path(auction_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 입찰 이력 조회 id: {}",
        "HandlerQuery", auction_id
    );
    match query::handlers::get_bid_history(&state.db_manager, auction_id).await {
        Ok(bids) => Json(bids).into_response(),
        Err(e) => e.into_response(),
    }
}

// endregion: --- Query Handlers

// region:    --- Imports
use crate::audit::PgAuditSink;
use crate::bidding::retry::RetryPolicy;
use crate::config::AppConfig;
use crate::database::DatabaseManager;
use crate::handlers::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Modules
mod auction;
mod audit;
mod auth;
mod bidding;
mod closing;
mod config;
mod database;
mod editing;
mod error;
mod handlers;
mod query;

// endregion: --- Modules

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    // 환경 변수에서 설정 로드
    let config = AppConfig::from_env();

    // DatabaseManager 생성
    let db_manager = match DatabaseManager::connect(&config).await {
        Ok(manager) => Arc::new(manager),
        Err(e) => {
            error!("{:<12} --> 데이터베이스 연결 실패: {:?}", "Main", e);
            return Err(e.into());
        }
    };

    // 데이터베이스 초기화
    if let Err(e) = db_manager.initialize_database().await {
        error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
        return Err(e.into());
    }
    info!("{:<12} --> 데이터베이스 초기화 성공", "Main");

    // 감사 로그 싱크와 재시도 정책 구성
    let audit = Arc::new(PgAuditSink::new(db_manager.get_pool()));
    let state = AppState {
        db_manager: Arc::clone(&db_manager),
        audit,
        retry: RetryPolicy::default(),
    };

    // 테스트 페이지를 위한 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 라우터 설정
    let routes_all = Router::new()
        .route("/", get(handlers::handle_root))
        .route("/auctions", post(handlers::handle_create))
        .route(
            "/auctions/:id",
            get(handlers::handle_get_auction).patch(handlers::handle_edit),
        )
        .route("/auctions/:id/bids", get(handlers::handle_get_bid_history))
        .route("/auctions/:id/bid", post(handlers::handle_bid))
        .route("/auctions/:id/close", post(handlers::handle_close))
        .layer(cors)
        .with_state(state);

    // 리스너 생성
    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main

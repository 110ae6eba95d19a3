// region:    --- Imports
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::warn;
// endregion: --- Imports

// region:    --- Audit Sink

/// 감사 이벤트 기록
pub const INSERT_AUDIT_LOG: &str =
    "INSERT INTO audit_log (user_id, action, details, timestamp) VALUES ($1, $2, $3, $4)";

/// 성공한 변경마다 감사 이벤트 하나를 받는 싱크
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn emit(&self, user_id: i64, action: &str, details: &str);
}

/// audit_log 테이블에 기록하는 구현체
pub struct PgAuditSink {
    pool: Arc<PgPool>,
}

impl PgAuditSink {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// 기록 실패는 변경 자체를 실패시키지 않는다 (fire-and-forget)
#[async_trait]
impl AuditSink for PgAuditSink {
    async fn emit(&self, user_id: i64, action: &str, details: &str) {
        let result = sqlx::query(INSERT_AUDIT_LOG)
            .bind(user_id)
            .bind(action)
            .bind(details)
            .bind(Utc::now())
            .execute(&*self.pool)
            .await;

        if let Err(e) = result {
            warn!("{:<12} --> 감사 이벤트 기록 실패: {:?}", "Audit", e);
        }
    }
}

// endregion: --- Audit Sink

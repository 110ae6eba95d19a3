// region:    --- Imports
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;
// endregion: --- Imports

// region:    --- Error Codes

/// 클라이언트 응답 바디에 실리는 에러 코드
pub mod codes {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INVALID_AMOUNT: &str = "INVALID_AMOUNT";
    pub const LOW_BID: &str = "LOW_BID";
    pub const INVALID_PRICE: &str = "INVALID_PRICE";
    pub const FIELD_NOT_EDITABLE: &str = "FIELD_NOT_EDITABLE";
    pub const EMPTY_UPDATE: &str = "EMPTY_UPDATE";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const PRICE_LOCKED: &str = "PRICE_LOCKED";
    pub const MAX_RETRIES_EXCEEDED: &str = "MAX_RETRIES_EXCEEDED";
    pub const INTERNAL: &str = "INTERNAL";
}

// endregion: --- Error Codes

// region:    --- EngineError

/// 경매 엔진 공통 에러
#[derive(Debug, Error)]
pub enum EngineError {
    /// 대상이 존재하지 않음
    #[error("{0}")]
    NotFound(String),

    /// 요청 내용이 규칙을 위반함
    #[error("{message}")]
    InvalidInput { code: &'static str, message: String },

    /// 인증 실패
    #[error("{0}")]
    Unauthorized(String),

    /// 권한 부족
    #[error("{0}")]
    Forbidden(String),

    /// 비즈니스 규칙 충돌
    #[error("{message}")]
    Conflict { code: &'static str, message: String },

    /// 스토어가 보고한 일시적 쓰기 충돌. 재시도 대상
    #[error("일시적 트랜잭션 충돌: {0}")]
    TransientConflict(String),

    /// 그 외 데이터베이스 오류
    #[error("데이터베이스 오류: {0}")]
    Database(#[source] sqlx::Error),
}

impl EngineError {
    pub fn auction_not_found(auction_id: i64) -> Self {
        Self::NotFound(format!("경매를 찾을 수 없습니다: {}", auction_id))
    }

    pub fn invalid_amount(amount: f64) -> Self {
        Self::InvalidInput {
            code: codes::INVALID_AMOUNT,
            message: format!("입찰 금액이 올바르지 않습니다: {}", amount),
        }
    }

    pub fn low_bid(current_price: f64) -> Self {
        Self::InvalidInput {
            code: codes::LOW_BID,
            message: format!("입찰 금액이 현재 가격({})보다 낮습니다.", current_price),
        }
    }

    pub fn invalid_price(price: f64) -> Self {
        Self::InvalidInput {
            code: codes::INVALID_PRICE,
            message: format!("시작 가격은 0보다 커야 합니다: {}", price),
        }
    }

    pub fn field_not_editable(detail: String) -> Self {
        Self::InvalidInput {
            code: codes::FIELD_NOT_EDITABLE,
            message: format!("편집할 수 없는 필드입니다: {}", detail),
        }
    }

    pub fn empty_update() -> Self {
        Self::InvalidInput {
            code: codes::EMPTY_UPDATE,
            message: "수정할 내용이 없습니다.".to_string(),
        }
    }

    pub fn price_locked() -> Self {
        Self::Conflict {
            code: codes::PRICE_LOCKED,
            message: "이미 입찰이 있어 시작 가격을 변경할 수 없습니다.".to_string(),
        }
    }

    pub fn retry_exhausted() -> Self {
        Self::Conflict {
            code: codes::MAX_RETRIES_EXCEEDED,
            message: "최대 재시도 횟수 초과".to_string(),
        }
    }

    /// 재시도로 해소될 수 있는 충돌인지 확인
    pub fn is_transient_conflict(&self) -> bool {
        matches!(self, Self::TransientConflict(_))
    }

    /// HTTP 상태 코드와 에러 코드 매핑
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, codes::NOT_FOUND),
            Self::InvalidInput { code, .. } => (StatusCode::BAD_REQUEST, code),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, codes::UNAUTHORIZED),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, codes::FORBIDDEN),
            Self::Conflict { code, .. } if *code == codes::MAX_RETRIES_EXCEEDED => {
                (StatusCode::SERVICE_UNAVAILABLE, code)
            }
            Self::Conflict { code, .. } => (StatusCode::BAD_REQUEST, code),
            Self::TransientConflict(_) => (StatusCode::INTERNAL_SERVER_ERROR, codes::INTERNAL),
            Self::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, codes::INTERNAL),
        }
    }
}

/// sqlx 오류 분류. 직렬화 실패(40001)와 교착(40P01)은 재시도 대상으로 본다
impl From<sqlx::Error> for EngineError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db_err) = e.as_database_error() {
            if matches!(db_err.code().as_deref(), Some("40001") | Some("40P01")) {
                return Self::TransientConflict(db_err.message().to_string());
            }
        }
        Self::Database(e)
    }
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("{:<12} --> 내부 오류: {:?}", "Error", self);
        }
        (status, Json(json!({ "error": self.to_string(), "code": code }))).into_response()
    }
}

// endregion: --- EngineError

// region:    --- Tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let (status, code) = EngineError::auction_not_found(7).status_and_code();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, codes::NOT_FOUND);
    }

    #[test]
    fn low_bid_maps_to_400() {
        let (status, code) = EngineError::low_bid(150.0).status_and_code();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, codes::LOW_BID);
    }

    #[test]
    fn price_locked_maps_to_400() {
        let (status, code) = EngineError::price_locked().status_and_code();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, codes::PRICE_LOCKED);
    }

    #[test]
    fn retry_exhausted_maps_to_503() {
        let (status, code) = EngineError::retry_exhausted().status_and_code();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(code, codes::MAX_RETRIES_EXCEEDED);
    }

    #[test]
    fn forbidden_maps_to_403() {
        let err = EngineError::Forbidden("권한이 없습니다.".to_string());
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(code, codes::FORBIDDEN);
    }

    #[test]
    fn transient_conflict_is_retryable() {
        let err = EngineError::TransientConflict("could not serialize access".to_string());
        assert!(err.is_transient_conflict());
        let (status, _) = err.status_and_code();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn non_transient_database_error_is_not_retryable() {
        let err = EngineError::from(sqlx::Error::RowNotFound);
        assert!(!err.is_transient_conflict());
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, codes::INTERNAL);
    }
}
// endregion: --- Tests

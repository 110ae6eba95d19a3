// region:    --- Imports
use crate::database::DatabaseManager;
use crate::error::EngineError;
use crate::handlers::AppState;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
// endregion: --- Imports

// region:    --- Identity

/// 사용자 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// 저장된 역할 문자열 해석. 알 수 없는 값은 일반 사용자로 본다
    pub fn parse(value: &str) -> Role {
        match value {
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }
}

/// 인증이 끝난 호출자. 유닛들은 이미 해석된 신원만 받는다
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: i64,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// endregion: --- Identity

// region:    --- Token Resolver

/// API 토큰으로 사용자 조회
pub const FIND_USER_BY_TOKEN: &str = "SELECT id, role FROM users WHERE api_token = $1";

/// 토큰을 사용자 id와 역할로 해석한다. 발급은 이 시스템 밖의 일이다
pub async fn resolve_token(
    db_manager: &DatabaseManager,
    token: &str,
) -> Result<Option<AuthUser>, EngineError> {
    let row = sqlx::query_as::<_, (i64, String)>(FIND_USER_BY_TOKEN)
        .bind(token)
        .fetch_optional(db_manager.pool())
        .await
        .map_err(EngineError::from)?;
    Ok(row.map(|(id, role)| AuthUser {
        id,
        role: Role::parse(&role),
    }))
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = EngineError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| EngineError::Unauthorized("인증 토큰이 없습니다.".to_string()))?;

        match resolve_token(&state.db_manager, token).await? {
            Some(user) => Ok(user),
            None => Err(EngineError::Unauthorized(
                "유효하지 않은 토큰입니다.".to_string(),
            )),
        }
    }
}

// endregion: --- Token Resolver

// region:    --- Tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_string_parses_to_admin_role() {
        assert_eq!(Role::parse("admin"), Role::Admin);
        assert!(AuthUser {
            id: 1,
            role: Role::parse("admin")
        }
        .is_admin());
    }

    #[test]
    fn unknown_role_strings_degrade_to_user() {
        assert_eq!(Role::parse("user"), Role::User);
        assert_eq!(Role::parse("superuser"), Role::User);
        assert_eq!(Role::parse(""), Role::User);
    }
}
// endregion: --- Tests

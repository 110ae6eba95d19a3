// region:    --- Imports
use crate::error::EngineError;
use std::future::Future;
use std::time::Duration;
use tracing::warn;
// endregion: --- Imports

// region:    --- Retry Policy

/// 일시적 충돌에 대한 재시도 정책
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            backoff: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    /// 작업 실행. 일시적 충돌이면 백오프 후 처음부터 다시 시도한다
    ///
    /// 한도를 다 쓰면 MAX_RETRIES_EXCEEDED 충돌로 끝난다. 일시적이지 않은
    /// 오류는 재시도 없이 그대로 반환된다.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, EngineError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, EngineError>>,
    {
        let mut attempt = 1;
        loop {
            match op(attempt).await {
                Err(e) if e.is_transient_conflict() => {
                    if attempt >= self.max_attempts {
                        warn!(
                            "{:<12} --> 재시도 한도({}) 초과: {}",
                            "Retry", self.max_attempts, e
                        );
                        return Err(EngineError::retry_exhausted());
                    }
                    warn!(
                        "{:<12} --> 일시적 충돌, 재시도 {}/{}: {}",
                        "Retry", attempt, self.max_attempts, e
                    );
                    tokio::time::sleep(self.backoff).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }
}

// endregion: --- Retry Policy

// endregion: --- Tests

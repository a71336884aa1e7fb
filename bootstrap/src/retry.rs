//! 启动阶段的退避重试
//!
//! 只在进程启动建连时使用，数据库可能比服务晚就绪。请求路径上不重试

use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

/// 指数退避（每次翻倍，封顶 `max_delay`）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    /// 总尝试次数，0 按 1 处理
    pub attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            attempts: 5,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl Backoff {
    pub fn new(attempts: u32, initial_delay: Duration, max_delay: Duration) -> Self {
        Self {
            attempts,
            initial_delay,
            max_delay,
        }
    }

    /// 两次尝试之间的等待序列，长度为 `attempts - 1`
    pub fn delays(&self) -> impl Iterator<Item = Duration> + '_ {
        (0..self.attempts.saturating_sub(1)).map(|n| {
            self.initial_delay
                .saturating_mul(2u32.saturating_pow(n))
                .min(self.max_delay)
        })
    }
}

/// 执行 `operation` 直到成功或用尽尝试次数，失败时返回最后一次的错误
pub async fn retry_startup<F, Fut, T, E>(backoff: &Backoff, what: &str, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut delays = backoff.delays();
    let mut attempt = 1u32;

    loop {
        let error = match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    info!(what, attempt, "Startup step succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) => e,
        };

        let Some(delay) = delays.next() else {
            warn!(what, attempt, error = %error, "Startup step failed, giving up");
            return Err(error);
        };

        warn!(
            what,
            attempt,
            error = %error,
            retry_in_ms = delay.as_millis() as u64,
            "Startup step failed, retrying"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

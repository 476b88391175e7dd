//! When, and how often, a gateway call is tried again.
//!
//! Order mutations are never replayed unless the config opts in with
//! [`RetryConfig::retry_mutations`]: a placement that timed out may still
//! have reached the exchange.

use crate::error::HttpError;
use crate::shared::ServiceMethod;

use rand::Rng;
use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Extra attempts after the first one. Zero disables retrying.
    pub max_retries: u32,
    /// Wait before the first retry; later waits grow by `multiplier`.
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
    /// Spread each wait by up to a quarter either way.
    pub jitter: bool,
    /// 5xx statuses worth another attempt.
    pub server_statuses: Vec<u16>,
    /// Retry on 429, waiting for `Retry-After` when the gateway sends one.
    pub retry_rate_limited: bool,
    /// Apply this config to order mutations as well as reads.
    pub retry_mutations: bool,
}

impl Default for RetryConfig {
    /// Three retries for read-only methods with exponential backoff.
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(10),
            multiplier: 2.0,
            jitter: true,
            server_statuses: vec![502, 503, 504],
            retry_rate_limited: true,
            retry_mutations: false,
        }
    }
}

impl RetryConfig {
    /// Every call is tried exactly once.
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Whether calls to `method` may be retried at all under this config.
    pub fn allows(&self, method: ServiceMethod) -> bool {
        self.max_retries > 0 && (self.retry_mutations || method.is_idempotent())
    }

    /// Whether `error` is transient under this config.
    pub fn should_retry(&self, error: &HttpError) -> bool {
        match error {
            HttpError::ServerError { status, .. } => self.server_statuses.contains(status),
            HttpError::RateLimited { .. } => self.retry_rate_limited,
            HttpError::Timeout => true,
            HttpError::Reqwest(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }

    /// Backoff before retry number `retry` (0 for the first retry).
    pub fn backoff(&self, retry: u32) -> Duration {
        let grown = self.base_delay.as_secs_f64() * self.multiplier.powi(retry as i32);
        let wait = Duration::try_from_secs_f64(grown)
            .unwrap_or(self.max_delay)
            .min(self.max_delay);
        if self.jitter && !wait.is_zero() {
            wait.mul_f64(rand::thread_rng().gen_range(0.75..=1.25))
        } else {
            wait
        }
    }

    fn wait_after(&self, error: &HttpError, retry: u32) -> Duration {
        match error {
            HttpError::RateLimited {
                retry_after_ms: Some(ms),
            } => Duration::from_millis(*ms),
            _ => self.backoff(retry),
        }
    }
}

/// Run `op` for `method`, retrying transient failures as `config` allows.
///
/// Errors that are not transient come back on the first attempt, before any
/// wait. Once the retries are used up the last error is wrapped in
/// [`HttpError::MaxRetriesExceeded`].
pub async fn run<T, F, Fut>(
    config: &RetryConfig,
    method: ServiceMethod,
    mut op: F,
) -> Result<T, HttpError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, HttpError>>,
{
    if !config.allows(method) {
        return op().await;
    }

    let mut retry = 0;
    loop {
        let error = match op().await {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };
        if !config.should_retry(&error) {
            return Err(error);
        }
        if retry == config.max_retries {
            tracing::warn!(%method, attempts = retry + 1, error = %error, "giving up on gateway call");
            return Err(HttpError::MaxRetriesExceeded {
                attempts: retry + 1,
                last_error: error.to_string(),
            });
        }

        let wait = config.wait_after(&error, retry);
        retry += 1;
        tracing::debug!(
            %method,
            retry,
            max = config.max_retries,
            wait_ms = wait.as_millis() as u64,
            error = %error,
            "retrying gateway call"
        );
        futures_timer::Delay::new(wait).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::time::Instant;

    fn instant() -> RetryConfig {
        RetryConfig {
            base_delay: Duration::ZERO,
            jitter: false,
            ..RetryConfig::default()
        }
    }

    fn unavailable() -> HttpError {
        HttpError::ServerError {
            status: 503,
            body: String::new(),
        }
    }

    #[test]
    fn test_default_retries_reads_only() {
        let config = RetryConfig::default();
        assert!(config.allows(ServiceMethod::Brief));
        assert!(config.allows(ServiceMethod::MarketState));
        assert!(!config.allows(ServiceMethod::PlaceOrder));
        assert!(!config.allows(ServiceMethod::CancelOrder));

        let everything = RetryConfig {
            retry_mutations: true,
            ..RetryConfig::default()
        };
        assert!(everything.allows(ServiceMethod::PlaceOrder));
        assert!(!RetryConfig::disabled().allows(ServiceMethod::Brief));
    }

    #[test]
    fn test_should_retry() {
        let config = RetryConfig::default();
        assert!(config.should_retry(&unavailable()));
        assert!(config.should_retry(&HttpError::Timeout));
        assert!(config.should_retry(&HttpError::RateLimited { retry_after_ms: None }));
        assert!(!config.should_retry(&HttpError::ServerError {
            status: 500,
            body: String::new(),
        }));
        assert!(!config.should_retry(&HttpError::Unauthorized));
        assert!(!config.should_retry(&HttpError::BadRequest("bad".into())));

        let patient = RetryConfig {
            retry_rate_limited: false,
            ..RetryConfig::default()
        };
        assert!(!patient.should_retry(&HttpError::RateLimited { retry_after_ms: None }));
    }

    #[test]
    fn test_backoff_grows_and_caps() {
        let config = RetryConfig {
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(350),
            jitter: false,
            ..RetryConfig::default()
        };
        assert_eq!(config.backoff(0), Duration::from_millis(100));
        assert_eq!(config.backoff(1), Duration::from_millis(200));
        assert_eq!(config.backoff(2), Duration::from_millis(350));
        assert_eq!(config.backoff(200), Duration::from_millis(350));
    }

    #[test]
    fn test_backoff_jitter_bounds() {
        let config = RetryConfig {
            base_delay: Duration::from_secs(1),
            ..RetryConfig::default()
        };
        for _ in 0..20 {
            let wait = config.backoff(0);
            assert!(
                (Duration::from_millis(750)..=Duration::from_millis(1250)).contains(&wait),
                "{wait:?}"
            );
        }
    }

    #[test]
    fn test_run_exhausts_retries() {
        let calls = Cell::new(0u32);
        let result = tokio_test::block_on(run(&instant(), ServiceMethod::Brief, || {
            calls.set(calls.get() + 1);
            async { Err::<(), _>(unavailable()) }
        }));
        assert_eq!(calls.get(), 4);
        match result {
            Err(HttpError::MaxRetriesExceeded { attempts, last_error }) => {
                assert_eq!(attempts, 4);
                assert!(last_error.contains("503"), "{last_error}");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_run_recovers_after_transient_error() {
        let calls = Cell::new(0u32);
        let result = tokio_test::block_on(run(&instant(), ServiceMethod::Brief, || {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move {
                if n < 3 {
                    Err(HttpError::Timeout)
                } else {
                    Ok(n)
                }
            }
        }));
        assert_eq!(result.unwrap(), 3);
    }

    #[test]
    fn test_run_does_not_wait_on_final_error() {
        // A 429 the config will not retry returns at once, whatever the
        // Retry-After says.
        let config = RetryConfig {
            retry_rate_limited: false,
            ..instant()
        };
        let calls = Cell::new(0u32);
        let started = Instant::now();
        let result = tokio_test::block_on(run(&config, ServiceMethod::Brief, || {
            calls.set(calls.get() + 1);
            async {
                Err::<(), _>(HttpError::RateLimited {
                    retry_after_ms: Some(60_000),
                })
            }
        }));
        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(calls.get(), 1);
        assert!(matches!(result, Err(HttpError::RateLimited { .. })));
    }

    #[test]
    fn test_run_never_replays_mutations_by_default() {
        let calls = Cell::new(0u32);
        let result = tokio_test::block_on(run(&instant(), ServiceMethod::PlaceOrder, || {
            calls.set(calls.get() + 1);
            async { Err::<(), _>(unavailable()) }
        }));
        assert_eq!(calls.get(), 1);
        assert!(matches!(result, Err(HttpError::ServerError { status: 503, .. })));
    }

    #[test]
    fn test_run_honours_retry_after() {
        let calls = Cell::new(0u32);
        let started = Instant::now();
        let result = tokio_test::block_on(run(&instant(), ServiceMethod::Brief, || {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move {
                if n == 1 {
                    Err(HttpError::RateLimited {
                        retry_after_ms: Some(50),
                    })
                } else {
                    Ok(())
                }
            }
        }));
        assert!(result.is_ok());
        assert_eq!(calls.get(), 2);
        assert!(started.elapsed() >= Duration::from_millis(50));
    }
}

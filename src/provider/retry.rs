use crate::provider::error::ProviderError;
use reqwest::StatusCode;
use std::time::Duration;

/// Statuses worth another attempt; anything else is the caller's fault.
const RETRY_STATUSES: [StatusCode; 3] = [
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::GATEWAY_TIMEOUT,
];

/// Delay before the next attempt after `consecutive_failures` failures.
///
/// The first retry is immediate. After that the delay is
/// `factor * 2^(failures - 1)` seconds, capped at `max`.
pub fn backoff_delay(factor: f64, consecutive_failures: u32, max: Duration) -> Duration {
    if consecutive_failures <= 1 || factor <= 0.0 {
        return Duration::ZERO;
    }
    let exponent = (consecutive_failures - 1).min(62) as i32;
    let seconds = factor * 2f64.powi(exponent);
    if !seconds.is_finite() || seconds >= max.as_secs_f64() {
        return max;
    }
    Duration::from_secs_f64(seconds)
}

/// Whether a failed attempt should be retried.
pub fn is_retryable(error: &ProviderError) -> bool {
    match error {
        ProviderError::NetworkRequest(_, source) => {
            source.is_connect() || source.is_timeout() || source.is_request() || source.is_body()
        }
        ProviderError::BodyRead(..) => true,
        ProviderError::HttpStatus { status, .. } => RETRY_STATUSES.contains(status),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: Duration = Duration::from_secs(120);

    #[test]
    fn test_backoff_schedule() {
        let delays: Vec<Duration> = (1..=5).map(|n| backoff_delay(0.2, n, MAX)).collect();
        assert_eq!(delays[0], Duration::ZERO);
        assert_eq!(delays[1], Duration::from_secs_f64(0.4));
        assert_eq!(delays[2], Duration::from_secs_f64(0.8));
        assert_eq!(delays[3], Duration::from_secs_f64(1.6));
        assert_eq!(delays[4], Duration::from_secs_f64(3.2));
    }

    #[test]
    fn test_backoff_is_capped() {
        assert_eq!(backoff_delay(0.2, 30, MAX), MAX);
        assert_eq!(backoff_delay(1.0, u32::MAX, Duration::from_secs(5)), Duration::from_secs(5));
    }

    #[test]
    fn test_zero_factor_never_waits() {
        assert_eq!(backoff_delay(0.0, 4, MAX), Duration::ZERO);
    }

    #[test]
    fn test_status_retryability() {
        let status = |status| ProviderError::HttpStatus {
            url: "https://example.invalid".to_string(),
            status,
            reason: String::new(),
        };
        assert!(is_retryable(&status(StatusCode::INTERNAL_SERVER_ERROR)));
        assert!(is_retryable(&status(StatusCode::BAD_GATEWAY)));
        assert!(is_retryable(&status(StatusCode::GATEWAY_TIMEOUT)));
        assert!(!is_retryable(&status(StatusCode::BAD_REQUEST)));
        assert!(!is_retryable(&status(StatusCode::NOT_FOUND)));
        assert!(!is_retryable(&ProviderError::MissingHourly));
    }
}

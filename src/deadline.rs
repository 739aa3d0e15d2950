use std::time::Duration;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tokio::time::Instant;

use crate::error::{AppError, Violation};
use crate::state::SharedState;

pub const TIMEOUT_HEADER: &str = "grpc-timeout";

/// Time budget for one RPC, counted from when the request was accepted.
///
/// Taken from the caller's `grpc-timeout` header when present, otherwise the
/// server's configured request timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    budget: Duration,
    expires_at: Instant,
}

impl Deadline {
    /// Start a budget that runs from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            budget,
            expires_at: Instant::now() + budget,
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    pub fn exceeded(&self) -> AppError {
        AppError::DeadlineExceeded(format!(
            "call exceeded {}ms deadline",
            self.budget.as_millis()
        ))
    }
}

/// Parse a `grpc-timeout` value: at most 8 ASCII digits followed by one unit
/// (`H`, `M`, `S`, `m`, `u`, `n`).
pub fn parse_timeout(value: &str) -> Option<Duration> {
    if value.len() < 2 || !value.is_ascii() {
        return None;
    }
    let (digits, unit) = value.split_at(value.len() - 1);
    if digits.len() > 8 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let amount: u64 = digits.parse().ok()?;

    let duration = match unit {
        "H" => Duration::from_secs(amount * 60 * 60),
        "M" => Duration::from_secs(amount * 60),
        "S" => Duration::from_secs(amount),
        "m" => Duration::from_millis(amount),
        "u" => Duration::from_micros(amount),
        "n" => Duration::from_nanos(amount),
        _ => return None,
    };
    Some(duration)
}

impl FromRequestParts<SharedState> for Deadline {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(TIMEOUT_HEADER) else {
            return Ok(Deadline::after(state.config.request_timeout));
        };

        header
            .to_str()
            .ok()
            .and_then(parse_timeout)
            .map(Deadline::after)
            .ok_or_else(|| {
                AppError::invalid(
                    Violation::InvalidTimeout,
                    format!("invalid {TIMEOUT_HEADER} header"),
                )
            })
    }
}

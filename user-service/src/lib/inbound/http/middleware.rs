use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderName;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;

const BEARER_SCHEME: &str = "bearer";

pub const X_PROCESS_TIME: HeaderName = HeaderName::from_static("x-process-time");

/// Request extension holding the user resolved from the bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Rejects requests without a valid bearer token, otherwise stores the
/// resolved user in the request extensions.
///
/// Every rejection carries the same message; the reason is only logged.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&req)?;
    let user = state.auth_gate.authorize(token).await?;

    req.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Result<&str, ApiError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| rejected("missing Authorization header"))?;

    let value = value
        .to_str()
        .map_err(|_| rejected("non-ASCII Authorization header"))?;

    // Auth scheme names are case-insensitive
    match value.trim().split_once(' ') {
        Some((scheme, token))
            if scheme.eq_ignore_ascii_case(BEARER_SCHEME) && !token.trim().is_empty() =>
        {
            Ok(token.trim())
        }
        _ => Err(rejected("not a Bearer credential")),
    }
}

fn rejected(reason: &'static str) -> ApiError {
    tracing::debug!(reason, "Bearer token rejected");
    ApiError::from(auth::AuthError::Unauthorized)
}

/// Adds the handling time in seconds as `X-Process-Time`.
pub async fn record_process_time(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let mut response = next.run(req).await;

    let elapsed = format!("{:.6}", started.elapsed().as_secs_f64());
    if let Ok(value) = HeaderValue::from_str(&elapsed) {
        response.headers_mut().insert(X_PROCESS_TIME, value);
    }

    response
}

/// `Host` header allow-list.
///
/// Entries are exact host names or `*.domain` wildcards; an empty list or a
/// `*` entry accepts every host. Ports are ignored.
#[derive(Debug, Clone)]
pub struct AllowedHosts {
    patterns: Vec<String>,
    any: bool,
}

impl AllowedHosts {
    pub fn new(patterns: &[String]) -> Self {
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_ascii_lowercase()).collect();
        let any = patterns.is_empty() || patterns.iter().any(|p| p == "*");
        Self { patterns, any }
    }

    pub fn permits(&self, host: &str) -> bool {
        if self.any {
            return true;
        }

        let host = strip_port(host).to_ascii_lowercase();
        self.patterns.iter().any(|pattern| match pattern.strip_prefix("*.") {
            Some(domain) => host
                .strip_suffix(domain)
                .is_some_and(|rest| rest.ends_with('.')),
            None => &host == pattern,
        })
    }
}

impl Default for AllowedHosts {
    fn default() -> Self {
        Self::new(&[])
    }
}

fn strip_port(host: &str) -> &str {
    // Bracketed IPv6 literal, optionally followed by a port
    if let Some(rest) = host.strip_prefix('[') {
        return rest.split(']').next().unwrap_or(rest);
    }
    host.split(':').next().unwrap_or(host)
}

/// Rejects requests whose `Host` header is not allowed with 400.
pub async fn check_host(
    State(allowed): State<Arc<AllowedHosts>>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if !allowed.permits(host) {
        tracing::warn!(host = %host, "Request rejected by host allow-list");
        return Err(ApiError::BadRequest("Invalid host header".to_string()));
    }

    Ok(next.run(req).await)
}

use std::sync::Arc;
use std::time::Duration;

use auth::AuthConfig;
use auth::AuthGate;
use auth::Clock;
use auth::SystemClock;
use auth::UserDirectory;
use axum::body::Body;
use axum::http::HeaderValue;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::AllowOrigin;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::request_id::MakeRequestUuid;
use tower_http::request_id::PropagateRequestIdLayer;
use tower_http::request_id::SetRequestIdLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_user::create_user;
use super::handlers::current_user::current_user;
use super::handlers::delete_user::delete_user;
use super::handlers::get_user::get_user;
use super::handlers::health::health;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::update_user::update_user;
use super::middleware::authenticate;
use super::middleware::check_host;
use super::middleware::record_process_time;
use super::middleware::AllowedHosts;
use crate::domain::user::directory::RepositoryUserDirectory;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;
use crate::domain::user::service::UserService;

/// Gate resolving bearer tokens to user accounts.
pub type UserAuthGate = AuthGate<dyn UserDirectory<Record = User>>;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub auth_gate: Arc<UserAuthGate>,
}

impl AppState {
    /// Wire the user service and the auth gate over one repository.
    pub fn new<UR: UserRepository>(repository: Arc<UR>, config: &AuthConfig) -> Self {
        Self::with_clock(repository, config, Arc::new(SystemClock))
    }

    pub fn with_clock<UR: UserRepository>(
        repository: Arc<UR>,
        config: &AuthConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let directory: Arc<dyn UserDirectory<Record = User>> =
            Arc::new(RepositoryUserDirectory::new(Arc::clone(&repository)));

        Self {
            user_service: Arc::new(UserService::new(repository)),
            auth_gate: Arc::new(AuthGate::with_clock(directory, config, clock)),
        }
    }
}

/// Build the HTTP application.
///
/// Outermost first: request id, tracing, request id echo, processing time,
/// host allow-list, CORS.
pub fn create_router(
    state: AppState,
    allowed_origins: &[String],
    allowed_hosts: &[String],
) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/api/auth/login", post(login))
        .route("/api/users", post(create_user));

    let protected_routes = Router::new()
        .route("/api/auth/me", get(current_user))
        .route("/api/users", get(list_users))
        .route(
            "/api/users/:user_id",
            get(get_user)
                .patch(update_user)
                .put(update_user)
                .delete(delete_user),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    // Headers stay out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default();

            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
                request_id = %request_id,
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    // Last layer added runs first
    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors_layer(allowed_origins))
        .layer(middleware::from_fn_with_state(
            Arc::new(AllowedHosts::new(allowed_hosts)),
            check_host,
        ))
        .layer(middleware::from_fn(record_process_time))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(trace_layer)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

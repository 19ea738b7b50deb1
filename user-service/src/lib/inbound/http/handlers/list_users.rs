use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::Pagination;
use crate::inbound::http::router::AppState;

/// Query string for `GET /api/users`.
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    let pagination = Pagination::new(query.skip, query.limit);

    state
        .user_service
        .list_users(pagination)
        .await
        .map_err(ApiError::from)
        .map(|users| ApiSuccess::new(StatusCode::OK, users.iter().map(UserData::from).collect()))
}

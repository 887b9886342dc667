//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    domain::RoomId,
    infrastructure::dto::http::{
        CreateSessionRequest, RoomDetailDto, RoomSummaryDto, RoomsQuery, SessionDto,
    },
    ui::{
        auth::{AuthenticatedUser, session_cookie},
        state::AppState,
    },
    usecase::{CreateSessionError, GetRoomDetailError},
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Create a guest user and hand out its session
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    match state.create_session_usecase.execute(&request.name).await {
        Ok(user) => {
            let jar = CookieJar::new().add(session_cookie(&user.session_token));
            Ok((StatusCode::CREATED, jar, Json(SessionDto::from(user))))
        }
        Err(CreateSessionError::EmptyName) => Err(StatusCode::BAD_REQUEST),
        Err(CreateSessionError::NameTaken(name)) => {
            tracing::debug!("User name '{}' is already taken", name);
            Err(StatusCode::CONFLICT)
        }
        Err(CreateSessionError::Store(e)) => {
            tracing::error!("Failed to create session: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Get list of rooms, optionally filtered by `?search=`
pub async fn get_rooms(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Query(query): Query<RoomsQuery>,
) -> Result<Json<Vec<RoomSummaryDto>>, StatusCode> {
    let rooms = state
        .get_rooms_usecase
        .execute(query.search.as_deref())
        .await
        .map_err(|e| {
            tracing::error!("Failed to get rooms: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        })?;

    Ok(Json(rooms.into_iter().map(RoomSummaryDto::from).collect()))
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let room_id = parse_room_id(&room_id)?;

    match state.get_room_detail_usecase.execute(room_id).await {
        Ok(detail) => Ok(Json(RoomDetailDto::from(detail))),
        Err(GetRoomDetailError::RoomNotFound(_)) => Err(StatusCode::NOT_FOUND),
        Err(GetRoomDetailError::Store(e)) => {
            tracing::error!("Failed to get room {}: {}", room_id, e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Parse a path segment into a `RoomId`, rejecting with `400 Bad Request`
pub(crate) fn parse_room_id(raw: &str) -> Result<RoomId, StatusCode> {
    raw.parse::<i64>().map(RoomId::new).map_err(|_| {
        tracing::warn!("Invalid room_id format: '{}'", raw);
        StatusCode::BAD_REQUEST
    })
}

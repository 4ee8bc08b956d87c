use crate::error::RelayError;
use crate::registry::RoomRegistry;
use crate::relay::{EventRelay, Subscription};
use airwave_core::{RoomId, SignalFrame};
use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use futures::{Stream, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RoomRegistry>,
    pub relay: EventRelay,
}

impl AppState {
    pub fn new() -> Self {
        let registry = Arc::new(RoomRegistry::new());
        let relay = EventRelay::new(registry.clone());
        Self { registry, relay }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RoomCreated {
    room_id: RoomId,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/room/create", post(create_room))
        .route("/room/{room_id}/sse", get(subscribe_room).post(publish_event))
        .with_state(state)
}

async fn create_room(State(state): State<AppState>) -> Result<Json<RoomCreated>, RelayError> {
    let room_id = state.registry.create_room()?;
    Ok(Json(RoomCreated { room_id }))
}

async fn subscribe_room(
    Path(room_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, RelayError> {
    let room_id = parse_room_id(&room_id)?;
    let subscription: Subscription = state.relay.subscribe(&room_id)?;

    // The subscription rides inside the stream; when the client goes away
    // axum drops the body and the room slot is released with it.
    let stream =
        subscription.map(|frame| Event::default().event(frame.kind).json_data(frame.value));

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

async fn publish_event(
    Path(room_id): Path<String>,
    State(state): State<AppState>,
    Json(frame): Json<SignalFrame>,
) -> Result<&'static str, RelayError> {
    let room_id = parse_room_id(&room_id)?;
    debug!("Publishing {} frame into room {}", frame.kind, room_id);
    state.relay.publish(&room_id, frame)?;
    Ok("OK")
}

fn parse_room_id(raw: &str) -> Result<RoomId, RelayError> {
    // A token that does not even parse cannot name a registered room.
    raw.parse()
        .map_err(|_| RelayError::RoomNotFound(raw.to_owned()))
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = match &self {
            RelayError::RoomNotFound(_) => StatusCode::NOT_FOUND,
            RelayError::RoomAlreadyExists(_) => StatusCode::CONFLICT,
        };
        (status, self.to_string()).into_response()
    }
}

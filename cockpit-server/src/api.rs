//! REST API and SSE routes

use crate::state::AppState;
use crate::{clock, web_ui};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    routing::{get, patch, post, put},
    Json, Router,
};
use cockpit_core::{
    format::BoardRow,
    model::{AeroReadout, EmittedMessage},
    task::{StoreError, TaskPatch, TaskRecord},
    FieldMask,
};
use cockpit_sim::{aero, circuit, leaderboard::RACE_LAPS, Circuit};
use futures::stream::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(web_ui::serve_ui))
        // Race
        .route("/api/race", get(race_snapshot))
        .route("/api/race/start", post(race_start))
        .route("/api/race/stop", post(race_stop))
        .route("/api/race/stream", get(race_stream))
        .route("/api/leaderboard", get(leaderboard))
        .route("/api/radio", get(radio_log))
        .route("/api/radio/stream", get(narration_stream))
        .route("/api/aero", get(aero_view))
        // Circuits
        .route("/api/circuits", get(list_circuits))
        .route("/api/circuit", put(select_circuit))
        // Tasks
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/:id", patch(update_task).delete(delete_task))
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(state)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

fn store_error(err: StoreError) -> ApiError {
    let status = match &err {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Invalid(_) => StatusCode::BAD_REQUEST,
        StoreError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    if err.is_retryable() {
        tracing::warn!("Task store unavailable: {}", err);
    }
    api_error(status, err.to_string())
}

// === Race Endpoints ===

#[derive(Deserialize)]
struct FieldsQuery {
    fields: Option<String>,
}

async fn race_snapshot(
    State(state): State<AppState>,
    Query(query): Query<FieldsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mask = query.fields.map(|f| FieldMask::parse(&f));
    let json = state.snapshot_json(mask.as_ref()).await.map_err(|e| {
        tracing::error!("Failed to serialize snapshot: {}", e);
        api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    Ok(([(header::CONTENT_TYPE, "application/json")], json))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RaceStatus {
    pub running: bool,
    pub race_seconds: u32,
    pub circuit: String,
}

async fn race_status(state: &AppState) -> RaceStatus {
    let session = state.session.read().await;
    RaceStatus {
        running: session.is_running(),
        race_seconds: session.radio().elapsed(),
        circuit: session.circuit().id.to_string(),
    }
}

async fn race_start(State(state): State<AppState>) -> Json<RaceStatus> {
    clock::start(&state).await;
    Json(race_status(&state).await)
}

async fn race_stop(State(state): State<AppState>) -> Json<RaceStatus> {
    clock::stop(&state).await;
    Json(race_status(&state).await)
}

async fn race_stream(
    State(state): State<AppState>,
    Query(query): Query<FieldsQuery>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.subscribe();
    let field_mask = query.fields.map(|f| FieldMask::parse(&f));

    let stream = BroadcastStream::new(rx).filter_map(move |result| {
        let mask = field_mask.clone();
        async move {
            match result {
                Ok(snapshot) => match snapshot.to_json_filtered(mask.as_ref()) {
                    Ok(json) => Some(Ok(Event::default().data(json))),
                    Err(e) => {
                        tracing::error!("Failed to serialize snapshot: {}", e);
                        None
                    }
                },
                Err(e) => {
                    tracing::warn!("Broadcast stream error: {}", e);
                    None
                }
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardView {
    pub rows: Vec<BoardRow>,
    /// Race distance counter, e.g. `15 / 58`
    pub race_distance: String,
    pub live: bool,
}

async fn leaderboard(State(state): State<AppState>) -> Json<LeaderboardView> {
    let session = state.session.read().await;
    let board = session.leaderboard();
    Json(LeaderboardView {
        rows: board.roster().iter().map(BoardRow::from).collect(),
        race_distance: format!("{} / {}", board.race_distance(), RACE_LAPS),
        live: board.live_indicator(),
    })
}

#[derive(Deserialize)]
struct RadioQuery {
    /// Number of messages the client already has
    since: Option<usize>,
}

async fn radio_log(
    State(state): State<AppState>,
    Query(query): Query<RadioQuery>,
) -> Json<Vec<EmittedMessage>> {
    let session = state.session.read().await;
    Json(session.radio_since(query.since.unwrap_or(0)).to_vec())
}

async fn narration_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.subscribe_narration();

    let stream = BroadcastStream::new(rx).filter_map(|result| async move {
        match result {
            Ok(cue) => match Event::default().json_data(&cue) {
                Ok(event) => Some(Ok(event)),
                Err(e) => {
                    tracing::error!("Failed to serialize narration cue: {}", e);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Narration stream error: {}", e);
                None
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[derive(Deserialize)]
struct AeroQuery {
    lines: Option<usize>,
    /// Animation time in seconds
    time: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AeroView {
    pub readout: AeroReadout,
    pub drs_open: bool,
    /// SVG path data, one entry per streamline
    pub streamlines: Vec<String>,
}

const DEFAULT_STREAMLINES: usize = 12;
const MAX_STREAMLINES: usize = 40;

async fn aero_view(
    State(state): State<AppState>,
    Query(query): Query<AeroQuery>,
) -> Json<AeroView> {
    let telemetry = state.snapshot().await.telemetry;
    let lines = query
        .lines
        .unwrap_or(DEFAULT_STREAMLINES)
        .clamp(1, MAX_STREAMLINES);
    let time = query.time.unwrap_or(0.0);

    let streamlines = (0..lines)
        .map(|i| {
            aero::streamline_path(&aero::streamline(
                i,
                lines,
                time,
                telemetry.speed,
                telemetry.drs_open,
            ))
        })
        .collect();

    Json(AeroView {
        readout: aero::readout(telemetry.speed, telemetry.drs_open),
        drs_open: telemetry.drs_open,
        streamlines,
    })
}

// === Circuit Endpoints ===

async fn list_circuits() -> Json<Vec<Circuit>> {
    Json(circuit::CIRCUITS.to_vec())
}

#[derive(Deserialize)]
struct SelectCircuitRequest {
    id: String,
}

async fn select_circuit(
    State(state): State<AppState>,
    Json(request): Json<SelectCircuitRequest>,
) -> Result<Json<Circuit>, ApiError> {
    let selected = state
        .session
        .write()
        .await
        .select_circuit(&request.id)
        .copied()
        .ok_or_else(|| {
            api_error(
                StatusCode::NOT_FOUND,
                format!("unknown circuit: {}", request.id),
            )
        })?;

    state.publish_snapshot().await;
    Ok(Json(selected))
}

// === Task Endpoints ===

#[derive(Deserialize)]
struct TaskQuery {
    #[serde(rename = "userId")]
    user_id: Option<String>,
}

async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<TaskQuery>,
) -> Result<Json<Vec<TaskRecord>>, ApiError> {
    let user_id = query
        .user_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "userId is required"))?;

    let tasks = state.tasks.list(&user_id).await.map_err(store_error)?;
    Ok(Json(tasks))
}

#[derive(Deserialize)]
struct CreateTaskRequest {
    #[serde(rename = "userId")]
    user_id: Option<String>,
    text: Option<String>,
}

async fn create_task(
    State(state): State<AppState>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(user_id), Some(text)) = (request.user_id, request.text) else {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "userId and text are required",
        ));
    };

    let task = state
        .tasks
        .create(&user_id, &text)
        .await
        .map_err(store_error)?;
    tracing::debug!(id = %task.id, "Task created");

    Ok((StatusCode::CREATED, Json(task)))
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<TaskPatch>,
) -> Result<Json<TaskRecord>, ApiError> {
    if patch.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "nothing to update"));
    }

    let task = state.tasks.update(&id, patch).await.map_err(store_error)?;
    Ok(Json(task))
}

async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.tasks.delete(&id).await.map_err(store_error)?;
    Ok(StatusCode::NO_CONTENT)
}

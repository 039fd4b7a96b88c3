use crate::messages::{ClientMessage, ServerMessage};
use crate::{error::AppError, AppState};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, Query, State,
    },
    response::IntoResponse,
    Json,
};
use core_types::Year;
use dashboard::{dispatch, initial_layout, ControlId, DashboardLayout, Figure, Update};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct YearQuery {
    pub year: Option<Year>,
}

#[derive(Debug, Deserialize)]
pub struct ControlValue {
    pub value: Year,
}

/// The requested year, or the year the controls start on.
fn resolve_year(state: &AppState, query: &YearQuery) -> Result<Year, AppError> {
    query
        .year
        .or_else(|| state.dashboard.initial_year())
        .ok_or_else(|| AppError::NotFound("The dataset holds no years".to_string()))
}

/// # GET /api/layout
/// Everything the browser needs for the first render.
pub async fn get_layout(State(state): State<Arc<AppState>>) -> Result<Json<DashboardLayout>, AppError> {
    initial_layout(&state.dashboard)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("The dataset holds no years".to_string()))
}

/// # GET /api/years
pub async fn get_years(State(state): State<Arc<AppState>>) -> Json<Vec<Year>> {
    Json(state.dashboard.years().to_vec())
}

/// # POST /api/controls/:control
/// Runs the dispatch table for one control change.
pub async fn post_control(
    Path(control): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<ControlValue>,
) -> Result<Json<Vec<Update>>, AppError> {
    let control: ControlId = control.parse()?;
    Ok(Json(dispatch(&state.dashboard, control, body.value)))
}

/// # GET /api/charts/world-map
pub async fn get_world_map(
    State(state): State<Arc<AppState>>,
    Query(query): Query<YearQuery>,
) -> Result<Json<Figure>, AppError> {
    let year = resolve_year(&state, &query)?;
    Ok(Json(state.dashboard.world_map(year)))
}

/// # GET /api/charts/top-products
pub async fn get_top_products(State(state): State<Arc<AppState>>) -> Json<Figure> {
    Json(state.dashboard.top_products_bar())
}

/// # GET /api/charts/category
pub async fn get_category_pie(
    State(state): State<Arc<AppState>>,
    Query(query): Query<YearQuery>,
) -> Result<Json<Figure>, AppError> {
    let year = resolve_year(&state, &query)?;
    Ok(Json(state.dashboard.category_pie(year)))
}

/// # GET /api/charts/sub-category
pub async fn get_sub_category_pie(
    State(state): State<Arc<AppState>>,
    Query(query): Query<YearQuery>,
) -> Result<Json<Figure>, AppError> {
    let year = resolve_year(&state, &query)?;
    Ok(Json(state.dashboard.sub_category_pie(year)))
}

/// # GET /ws
/// Control changes in, chart updates out.
pub async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    tracing::info!("[WS] New client connected.");
    while let Some(msg) = socket.recv().await {
        match msg {
            Ok(Message::Text(text)) => {
                let reply = handle_client_text(&state, &text);
                let payload = match serde_json::to_string(&reply) {
                    Ok(payload) => payload,
                    Err(e) => {
                        tracing::error!(error = %e, "[WS] Failed to serialise reply.");
                        break;
                    }
                };
                if socket.send(Message::Text(payload)).await.is_err() {
                    break;
                }
            }
            Ok(Message::Close(_)) => {
                tracing::info!("[WS] Client disconnected.");
                break;
            }
            Err(e) => {
                tracing::error!(error = %e, "[WS] Error.");
                break;
            }
            _ => {}
        }
    }
    tracing::info!("[WS] Connection closed.");
}

/// Answers one text frame. Malformed frames get an error reply instead of
/// closing the socket.
pub(crate) fn handle_client_text(state: &AppState, text: &str) -> ServerMessage {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::ControlChanged(change)) => {
            ServerMessage::Updates(dispatch(&state.dashboard, change.control, change.value))
        }
        Err(e) => {
            tracing::warn!(error = %e, "[WS] Rejected client message.");
            ServerMessage::error(e.to_string())
        }
    }
}

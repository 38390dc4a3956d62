use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::figure::Figure;
use crate::graph::{self, GraphConfig};
use crate::page;
use crate::render::{render_figure, Selection};
use crate::table::{ReturnField, Table};

/// Shared by every handler; the table is never written after startup.
pub struct AppState {
    pub table: Arc<Table>,
}

impl AppState {
    pub fn new(table: Table) -> Arc<Self> {
        Arc::new(Self { table: Arc::new(table) })
    }
}

// ── Query params ─────────────────────────────────────────────────────────

/// `fields` absent means the page default (every field); `fields=` means
/// nothing selected.
#[derive(Debug, Deserialize)]
pub struct SelectionQuery {
    #[serde(default)]
    fields: Option<String>,
}

impl SelectionQuery {
    fn selection(&self) -> Result<Selection, ApiError> {
        match &self.fields {
            None => Ok(Selection::all()),
            Some(raw) => raw
                .parse()
                .map_err(|e: anyhow::Error| ApiError::BadRequest(e.to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    #[serde(default)]
    fields: Option<String>,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
}

// ── Route definitions ────────────────────────────────────────────────────

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/figure", get(api_figure))
        .route("/chart.png", get(chart_png))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<String> {
    Html(page::render_index(&ReturnField::ALL))
}

async fn api_figure(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SelectionQuery>,
) -> Result<Json<Figure>, ApiError> {
    let selection = q.selection()?;
    Ok(Json(render_figure(&state.table, selection.fields())))
}

async fn chart_png(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ChartQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let selection = SelectionQuery { fields: q.fields }.selection()?;
    let defaults = GraphConfig::default();
    let config = GraphConfig {
        width: q.width.unwrap_or(defaults.width).clamp(100, 4000),
        height: q.height.unwrap_or(defaults.height).clamp(100, 4000),
    };

    let figure = render_figure(&state.table, selection.fields());
    let png = tokio::task::spawn_blocking(move || graph::render_png(&figure, &config))
        .await
        .map_err(|e| ApiError::Internal(format!("chart task failed: {e}")))?
        .map_err(|e| ApiError::Internal(format!("{e:#}")))?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({ "status": "ok", "records": state.table.len() }))
}

/// Serve until Ctrl+C.
pub async fn serve(addr: SocketAddr, state: Arc<AppState>) -> Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Dashboard listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping");
}

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use shuttle_axum::axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::analyze::DreamAnalyzer;
use crate::config::AnalyzerConfig;
use crate::entry::{DreamEntry, MatchedSymbol};
use crate::error::{AnalyzeError, ExportError};
use crate::session::Session;

/// One process serves one session.
#[derive(Clone)]
pub struct AppState {
    session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(analyzer: Arc<DreamAnalyzer>) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::new(analyzer))),
        }
    }

    pub fn from_config(cfg: &AnalyzerConfig) -> anyhow::Result<Self> {
        Ok(Self::new(Arc::new(DreamAnalyzer::from_config(cfg)?)))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Session>, ApiError> {
        self.session.lock().map_err(|_| ApiError::Poisoned)
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/analyze", post(analyze))
        .route("/journal", get(journal))
        .route("/journal/export", get(export_journal))
        .route("/symbols", get(symbols))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Alias kept for callers that build the router as `api::router(state)`.
pub fn router(state: AppState) -> Router {
    create_router(state)
}

#[derive(Deserialize)]
struct AnalyzeReq {
    text: String,
}

#[derive(Serialize)]
struct AnalyzeResp {
    #[serde(flatten)]
    entry: DreamEntry,
    sentiment_class: &'static str,
    summary: String,
    themes: Vec<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

enum ApiError {
    BadRequest(JsonRejection),
    Analyze(AnalyzeError),
    Export(ExportError),
    Poisoned,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::BadRequest(rejection) => {
                (rejection.status(), "invalid_request", rejection.body_text())
            }
            ApiError::Analyze(e @ AnalyzeError::BlankInput) => {
                (StatusCode::UNPROCESSABLE_ENTITY, e.code(), e.to_string())
            }
            ApiError::Analyze(e @ AnalyzeError::OracleUnavailable { .. }) => {
                (StatusCode::SERVICE_UNAVAILABLE, e.code(), e.to_string())
            }
            ApiError::Export(e) => {
                error!(error = %e, "journal export failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "export_failed", e.to_string())
            }
            ApiError::Poisoned => {
                error!("session lock poisoned");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "session state is unavailable".to_string(),
                )
            }
        };
        (
            status,
            Json(ErrorBody {
                error: code,
                message,
            }),
        )
            .into_response()
    }
}

async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeReq>, JsonRejection>,
) -> Result<Json<AnalyzeResp>, ApiError> {
    let Json(body) = payload.map_err(ApiError::BadRequest)?;
    let entry = {
        let mut session = state.lock()?;
        session.analyze(&body.text).map_err(ApiError::Analyze)?
    };
    Ok(Json(AnalyzeResp {
        sentiment_class: entry.sentiment_label().css_class(),
        summary: entry.summary(),
        themes: entry.themes(),
        entry,
    }))
}

async fn journal(State(state): State<AppState>) -> Result<Json<Vec<DreamEntry>>, ApiError> {
    let rows = state.lock()?.journal_snapshot();
    Ok(Json(rows))
}

async fn export_journal(State(state): State<AppState>) -> Result<Response, ApiError> {
    // snapshot under the lock, encode without holding it
    let journal = state.lock()?.journal().clone();
    let out = journal.export_tabular().await.map_err(ApiError::Export)?;

    let disposition = format!("attachment; filename=\"{}\"", out.filename);
    let content_type = format!("{}; charset=utf-8", out.mime_type);
    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        out.bytes,
    )
        .into_response())
}

async fn symbols(State(state): State<AppState>) -> Result<Json<Vec<MatchedSymbol>>, ApiError> {
    let analyzer = state.lock()?.analyzer().clone();
    let out = analyzer
        .symbols()
        .entries()
        .iter()
        .map(|e| MatchedSymbol {
            symbol: e.key.clone(),
            meanings: e.meanings.clone(),
        })
        .collect();
    Ok(Json(out))
}

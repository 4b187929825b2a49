//! REST API Server for the WealthWise advisor
//!
//! Each endpoint maps onto one session [`Command`]. The single process-wide
//! session sits behind a mutex that is held for the whole command, gateway
//! call included, so commands run one at a time.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::AdvisorError;
use crate::gemini::AdvisorGateway;
use crate::models::PlanInput;
use crate::session::{Command, Session, SessionView};

/// =============================
/// Request Models
/// =============================

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> crate::Result<Self> {
        Ok(Self {
            success: true,
            data: Some(serde_json::to_value(data)?),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        })
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

fn status_for(error: &AdvisorError) -> StatusCode {
    match error {
        AdvisorError::Validation(_) | AdvisorError::NoPlan => StatusCode::BAD_REQUEST,
        AdvisorError::MissingCredential => StatusCode::PRECONDITION_FAILED,
        AdvisorError::ServiceFailure(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn respond(result: crate::Result<SessionView>) -> (StatusCode, Json<ApiResponse>) {
    match result.and_then(ApiResponse::success) {
        Ok(response) => (StatusCode::OK, Json(response)),
        Err(e) => (status_for(&e), Json(ApiResponse::error(e.to_string()))),
    }
}

/// Malformed bodies and paths are input errors, answered in the envelope
fn rejected(message: String) -> (StatusCode, Json<ApiResponse>) {
    respond(Err(AdvisorError::Validation(message)))
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub session: Arc<Mutex<Session>>,
    pub gateway: Arc<dyn AdvisorGateway>,
}

impl ApiState {
    pub fn new(gateway: Arc<dyn AdvisorGateway>) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::new())),
            gateway,
        }
    }

    async fn run(&self, command: Command) -> (StatusCode, Json<ApiResponse>) {
        let mut session = self.session.lock().await;
        respond(session.execute(command, self.gateway.as_ref()).await)
    }
}

/// =============================
/// Handlers
/// =============================

async fn health(State(state): State<ApiState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "ai_configured": state.gateway.has_credential(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn get_session(State(state): State<ApiState>) -> (StatusCode, Json<ApiResponse>) {
    let session = state.session.lock().await;
    respond(Ok(session.view()))
}

async fn project_wealth(
    State(state): State<ApiState>,
    body: Result<Json<PlanInput>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse>) {
    let Json(input) = match body {
        Ok(body) => body,
        Err(rejection) => return rejected(rejection.body_text()),
    };
    info!(goal = %input.goal_name, "Received projection request");
    state.run(Command::ProjectWealth(input)).await
}

async fn generate_strategy(State(state): State<ApiState>) -> (StatusCode, Json<ApiResponse>) {
    state.run(Command::GenerateStrategy).await
}

async fn ask(
    State(state): State<ApiState>,
    body: Result<Json<AskRequest>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse>) {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => return rejected(rejection.body_text()),
    };
    state.run(Command::Ask { question: req.question }).await
}

async fn delete_turn_pair(
    State(state): State<ApiState>,
    path: Result<Path<usize>, PathRejection>,
) -> (StatusCode, Json<ApiResponse>) {
    let Path(user_index) = match path {
        Ok(path) => path,
        Err(rejection) => return rejected(rejection.body_text()),
    };
    state.run(Command::DeleteTurnPair { user_index }).await
}

async fn clear_chat(State(state): State<ApiState>) -> (StatusCode, Json<ApiResponse>) {
    state.run(Command::ClearChat).await
}

/// =============================
/// Router
/// =============================

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/session", get(get_session))
        .route("/api/plan", post(project_wealth))
        .route("/api/plan/strategy", post(generate_strategy))
        .route("/api/chat", post(ask))
        .route("/api/chat/clear", post(clear_chat))
        .route("/api/chat/:user_index", delete(delete_turn_pair))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(gateway: Arc<dyn AdvisorGateway>, port: u16) -> crate::Result<()> {
    let router = create_router(ApiState::new(gateway));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}

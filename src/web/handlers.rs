use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::Analyzer;
use crate::bot::{Command, Reply};

use super::state::AppState;

// ---------------------------------------------------------------------------
// Error wrapper
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    details: String,
}

#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("Message text is empty")]
    EmptyMessage,

    #[error("Request handling was interrupted: {0}")]
    Blocking(#[from] actix_web::error::BlockingError),
}

impl actix_web::ResponseError for WebError {
    fn error_response(&self) -> HttpResponse {
        let (status, error_type) = match self {
            WebError::EmptyMessage => (actix_web::http::StatusCode::BAD_REQUEST, "Bad Request"),
            WebError::Blocking(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
            ),
        };
        HttpResponse::build(status).json(ErrorBody {
            error: error_type.to_string(),
            details: self.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    replies: Vec<Reply>,
}

#[derive(Debug, Serialize)]
struct CommandInfo {
    name: &'static str,
    description: &'static str,
}

#[derive(Debug, Serialize)]
struct CommandsResponse {
    commands: Vec<CommandInfo>,
    keyboard: Vec<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/message: route one chat message and return every reply at once.
pub async fn message(
    data: web::Data<AppState>,
    body: web::Json<MessageRequest>,
) -> Result<HttpResponse, WebError> {
    let text = body.into_inner().text;
    if text.trim().is_empty() {
        return Err(WebError::EmptyMessage);
    }

    let router = data.router.clone();
    let replies = web::block(move || router.replies(&text)).await?;
    debug!(replies = replies.len(), "webhook message handled");

    Ok(HttpResponse::Ok().json(MessageResponse { replies }))
}

/// GET /api/commands: the command menu.
pub async fn commands() -> HttpResponse {
    let commands = Command::ALL
        .iter()
        .map(|c| CommandInfo {
            name: c.name(),
            description: c.description(),
        })
        .collect();
    HttpResponse::Ok().json(CommandsResponse {
        commands,
        keyboard: Command::keyboard(),
    })
}

/// GET /api/statistics: every aggregate as JSON.
pub async fn statistics(data: web::Data<AppState>) -> Result<HttpResponse, WebError> {
    let router = data.router.clone();
    let report =
        web::block(move || Analyzer::new(router.dataset()).report(router.settings())).await?;
    Ok(HttpResponse::Ok().json(report))
}

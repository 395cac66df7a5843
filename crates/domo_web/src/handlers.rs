use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use domo_core::types::{Article, ChatMessage, Heading};
use domo_core::Error;
use domo_content::headings::extract_headings;

use crate::AppState;

const UPSTREAM_FAILURE_MESSAGE: &str =
    "Erreur lors du traitement de votre message. Veuillez réessayer.";
const INTERNAL_FAILURE_MESSAGE: &str = "Erreur interne. Veuillez réessayer.";

#[derive(Deserialize)]
pub struct ChatBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatBody>,
) -> impl IntoResponse {
    let message = match body.message {
        Some(message) if !message.is_empty() => message,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Message invalide" })),
            )
                .into_response();
        }
    };

    match state.assistant.handle(&message, &body.history).await {
        Ok(reply) => Json(json!({
            "response": reply.response,
            "articles": reply.articles,
            "success": true,
        }))
        .into_response(),
        Err(Error::Validation(message)) => {
            (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
        }
        Err(e) => {
            error!("chatbot request failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": UPSTREAM_FAILURE_MESSAGE,
                    "success": false,
                })),
            )
                .into_response()
        }
    }
}

pub async fn list_articles(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.load_all().await {
        Ok(articles) => Json(articles).into_response(),
        Err(e) => {
            error!("corpus load failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": INTERNAL_FAILURE_MESSAGE, "success": false })),
            )
                .into_response()
        }
    }
}

#[derive(Serialize)]
struct ArticleDetail {
    #[serde(flatten)]
    article: Article,
    headings: Vec<Heading>,
}

pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    match state.store.load(&slug).await {
        Ok(article) => {
            let headings = extract_headings(&article.content);
            Json(ArticleDetail { article, headings }).into_response()
        }
        // A document that fails to parse does not exist, same as a missing one.
        Err(Error::NotFound(_)) | Err(Error::Parse(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Article introuvable" })),
        )
            .into_response(),
        Err(e) => {
            error!("article load failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": INTERNAL_FAILURE_MESSAGE, "success": false })),
            )
                .into_response()
        }
    }
}

pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

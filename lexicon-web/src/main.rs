//! Servidor web Axum com WebSocket para anotação léxica em tempo real

mod config;

use std::sync::Arc;
use anyhow::Context;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use lexicon_core::{lexicon::demo_texts, AnnotationEvent, Annotator};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

/// Estado compartilhado da aplicação. A trie é construída uma vez e só lida.
struct AppState {
    annotator: Annotator,
}

#[derive(Deserialize)]
struct AnnotateRequest {
    text: String,
}

#[derive(Serialize)]
struct StatsResponse {
    nodes: usize,
    phrases: usize,
    tokens: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let annotator = config.load_annotator()?;
    info!(
        nodes = annotator.trie().node_count(),
        phrases = annotator.trie().phrase_count(),
        "léxico carregado"
    );

    let app = app(Arc::new(AppState { annotator }));

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("falha ao escutar em {}", config.addr))?;
    info!("Servidor de anotação iniciado em http://{}", config.addr);
    axum::serve(listener, app).await.context("servidor encerrado com erro")?;
    Ok(())
}

fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/annotate", post(annotate_handler))
        .route("/ws", get(ws_handler))
        .route("/demo-texts", get(demo_texts_handler))
        .route("/stats", get(stats_handler))
        .layer(cors)
        .with_state(state)
}

/// Retorna a página principal HTML
async fn index_handler() -> impl IntoResponse {
    Html(include_str!("templates/index.html"))
}

/// Anotação via HTTP POST (sem streaming)
async fn annotate_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnnotateRequest>,
) -> impl IntoResponse {
    if req.text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Texto vazio"})),
        )
            .into_response();
    }

    Json(state.annotator.annotate_report(&req.text)).into_response()
}

/// Retorna textos de demonstração
async fn demo_texts_handler() -> impl IntoResponse {
    let texts: Vec<serde_json::Value> = demo_texts()
        .iter()
        .map(|(label, text)| {
            serde_json::json!({
                "label": label,
                "text": text
            })
        })
        .collect();
    Json(texts)
}

/// Tamanho do léxico carregado
async fn stats_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let trie = state.annotator.trie();
    Json(StatsResponse {
        nodes: trie.node_count(),
        phrases: trie.phrase_count(),
        tokens: trie.dictionary().len(),
    })
}

/// Upgrade HTTP → WebSocket
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Recebe textos e devolve os eventos da anotação, um por mensagem
async fn handle_websocket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket conectado");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                // Aceita {"text": ...} ou texto puro
                let text = match serde_json::from_str::<AnnotateRequest>(&text) {
                    Ok(req) => req.text,
                    Err(_) => text,
                };
                if text.trim().is_empty() {
                    continue;
                }

                debug!("Anotando via WebSocket: {} chars", text.len());
                let events = match collect_events(Arc::clone(&state), text).await {
                    Ok(events) => events,
                    Err(err) => {
                        warn!("falha na anotação: {err}");
                        continue;
                    }
                };

                for event in &events {
                    if let Ok(json) = serde_json::to_string(event) {
                        if socket.send(Message::Text(json)).await.is_err() {
                            return; // cliente desconectou
                        }
                    }
                }
            }
            Message::Close(_) => {
                info!("WebSocket desconectado");
                return;
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            _ => {}
        }
    }
}

/// Roda o pipeline (síncrono) fora do runtime e coleta todos os eventos
async fn collect_events(
    state: Arc<AppState>,
    text: String,
) -> Result<Vec<AnnotationEvent>, tokio::task::JoinError> {
    tokio::task::spawn_blocking(move || {
        let (tx, rx) = std::sync::mpsc::channel();
        state.annotator.annotate_streaming(&text, tx);
        rx.try_iter().collect()
    })
    .await
}

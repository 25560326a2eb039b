//! REST API Endpoints
//!
//! Proof lookup plus health and status endpoints.

use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Run the API server
pub async fn run_server(listen: String, state: AppState) -> anyhow::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&listen).await?;
    tracing::info!(address = %listen, "API server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/getProof", get(get_proof))
        .route("/health", get(health))
        .route("/status", get(status))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Any origin may call the API from a browser
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT])
}

type PlainTextError = (StatusCode, &'static str);

/// Look up the Merkle proof for a wallet address
async fn get_proof(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<String>>, PlainTextError> {
    // A repeated parameter resolves to its first value
    let address = params
        .iter()
        .find(|(key, _)| key == "address")
        .map(|(_, value)| value.as_str());

    let address = match address {
        Some(address) if !address.is_empty() => address,
        _ => {
            metrics::counter!("proof_lookups_total", "outcome" => "invalid").increment(1);
            return Err((StatusCode::BAD_REQUEST, "Address is required"));
        }
    };

    match state.index().lookup(address) {
        Some(wallet) => {
            metrics::counter!("proof_lookups_total", "outcome" => "found").increment(1);
            debug!(address, proof_len = wallet.proof.len(), "Proof found");
            Ok(Json(wallet.proof.clone()))
        }
        None => {
            metrics::counter!("proof_lookups_total", "outcome" => "not_found").increment(1);
            debug!(address, "Address not found");
            Err((StatusCode::NOT_FOUND, "Address not found"))
        }
    }
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    wallets: usize,
}

/// Health check endpoint
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        wallets: state.index().wallet_count(),
    })
}

/// Status response
#[derive(Serialize)]
struct StatusResponse {
    root_hash: String,
    wallets: usize,
    addresses: usize,
    duplicates: usize,
    uptime_secs: u64,
}

/// Status endpoint
async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let index = state.index();
    Json(StatusResponse {
        root_hash: index.root_hash().to_string(),
        wallets: index.wallet_count(),
        addresses: index.address_count(),
        duplicates: index.duplicate_count(),
        uptime_secs: state.uptime_secs(),
    })
}

//! triage-server: Symptom Triage HTTP Server binary entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use triage_core::DoctorRecord;
use triage_server::ai::{CompletionModel, GeminiClient};
use triage_server::config::Config;
use triage_server::state::AppState;
use triage_server::store::{InMemoryConversationStore, InMemoryDoctorDirectory};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    // Load configuration
    let config = Config::from_env();

    // Create the completion model (None if GEMINI_API_KEY not set)
    let model: Option<Arc<dyn CompletionModel>> = config
        .gemini_api_key
        .as_ref()
        .map(|key| Arc::new(GeminiClient::new(key.clone())) as Arc<dyn CompletionModel>);

    // Log startup info
    if model.is_some() {
        tracing::info!("Gemini API key configured, symptom analysis enabled");
    } else {
        tracing::warn!("GEMINI_API_KEY not set, chat and analysis endpoints disabled");
    }
    tracing::info!("Rate limiting: {} requests/second", config.rate_limit_rps);

    // Seed the doctor directory
    let doctors = load_doctor_directory(config.doctor_directory.as_deref());
    tracing::info!("Doctor directory loaded with {} records", doctors.len());

    let state = AppState {
        model,
        store: Arc::new(InMemoryConversationStore::new()),
        directory: Arc::new(InMemoryDoctorDirectory::new(doctors)),
    };

    // Build application
    let app = triage_server::build_app(state, &config);

    // Start server
    let addr: SocketAddr = config.bind_address.parse().expect("Invalid bind address");
    tracing::info!("Starting symptom triage server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    tracing::info!("Server shutdown complete");
}

/// Load the doctor directory seed file, falling back to an empty directory
/// when it is missing or malformed
fn load_doctor_directory(path: Option<&str>) -> Vec<DoctorRecord> {
    let Some(path) = path else {
        tracing::warn!("DOCTOR_DIRECTORY not set, doctor lookup will find nothing");
        return Vec::new();
    };

    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(doctors) => doctors,
            Err(e) => {
                tracing::warn!(error = %e, path, "Failed to parse doctor directory file");
                Vec::new()
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, path, "Failed to read doctor directory file");
            Vec::new()
        }
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}

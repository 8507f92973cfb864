//! listbot - a conversational list keeper
//!
//! Each chat owns a set of named lists stored as plain text files; users
//! create, view, edit and delete them through `/list` commands handled by a
//! per-chat dialogue state machine.

mod api;
mod book;
mod config;
mod grammar;
mod runtime;
mod session;
mod state_machine;
mod store;

use api::{create_router, AppState};
use config::{AllowList, BotConfig};
use runtime::SessionRegistry;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "listbot=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = BotConfig::from_env()?;
    match &config.allowed_users {
        AllowList::Everyone => {
            tracing::warn!("LISTBOT_ALLOWED_USERS is '*', every user may use the bot");
        }
        AllowList::Only(users) if users.is_empty() => {
            tracing::warn!("LISTBOT_ALLOWED_USERS is empty or unset, every message will be rejected");
        }
        AllowList::Only(users) => tracing::info!(users = users.len(), "Allow-list loaded"),
    }

    std::fs::create_dir_all(&config.workspace)?;
    let registry = Arc::new(SessionRegistry::new(&config.workspace));
    tracing::info!(workspace = %registry.root().display(), "Session registry ready");

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = create_router(AppState::new(Arc::clone(&registry), config));

    tracing::info!("listbot listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    registry.shutdown().await;
    tracing::info!("listbot stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("Shutdown requested");
}

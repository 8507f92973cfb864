//! HTTP gateway
//!
//! Transports (chat platform adapters, scripts, tests) relay each user
//! message here and forward the reply back to the chat.

mod handlers;
mod types;

pub use handlers::create_router;

use crate::config::BotConfig;
use crate::runtime::SessionRegistry;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SessionRegistry>,
    pub config: Arc<BotConfig>,
}

impl AppState {
    pub fn new(registry: Arc<SessionRegistry>, config: BotConfig) -> Self {
        Self {
            registry,
            config: Arc::new(config),
        }
    }
}

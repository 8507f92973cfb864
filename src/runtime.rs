//! Session registry
//!
//! Every chat gets its own session, created on the first message and kept
//! until shutdown. A session runs in a dedicated task fed by an mpsc inbox,
//! so one chat's messages are handled strictly in order while different
//! chats proceed independently.

mod executor;

use crate::session::Session;
use crate::store::ListError;
use executor::{run_session, Envelope};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, Mutex, OnceCell, RwLock};
use tokio::task::{JoinError, JoinSet};

/// Messages that may queue up for one chat before senders wait
const INBOX_CAPACITY: usize = 32;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Cannot open workspace of chat {chat_id}: {source}")]
    Workspace {
        chat_id: i64,
        #[source]
        source: ListError,
    },
    #[error("Opening the session of chat {chat_id} panicked: {source}")]
    Bootstrap {
        chat_id: i64,
        #[source]
        source: JoinError,
    },
    #[error("Session of chat {0} is closed")]
    SessionClosed(i64),
}

/// Inbox of a chat's worker, filled once its session has opened
type SessionSlot = Arc<OnceCell<mpsc::Sender<Envelope>>>;

/// Owner of all chat sessions
pub struct SessionRegistry {
    root: PathBuf,
    sessions: RwLock<HashMap<i64, SessionSlot>>,
    workers: Mutex<JoinSet<()>>,
}

impl SessionRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            sessions: RwLock::new(HashMap::new()),
            workers: Mutex::new(JoinSet::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Storage directory of a chat
    pub fn chat_dir(&self, chat_id: i64) -> PathBuf {
        self.root.join(chat_id.to_string())
    }

    /// Number of chats with a running session
    #[cfg(test)]
    pub async fn session_count(&self) -> usize {
        self.sessions
            .read()
            .await
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    /// Hand a message to the chat's session and wait for the reply.
    ///
    /// The reply is empty when the message needs no answer, otherwise one
    /// or more lines joined by `\n`.
    pub async fn deliver(
        &self,
        chat_id: i64,
        user_id: i64,
        display_name: &str,
        text: &str,
    ) -> Result<String, RegistryError> {
        let inbox = self.get_or_create(chat_id).await?;

        let (reply_tx, reply_rx) = oneshot::channel();
        let envelope = Envelope {
            user_id,
            display_name: display_name.to_string(),
            text: text.to_string(),
            reply_tx,
        };
        inbox
            .send(envelope)
            .await
            .map_err(|_| RegistryError::SessionClosed(chat_id))?;
        reply_rx
            .await
            .map_err(|_| RegistryError::SessionClosed(chat_id))
    }

    /// Get the inbox of a chat, starting its session if needed.
    ///
    /// The map lock is only held to find or insert the chat's slot. Opening
    /// the session happens afterwards, so a slow workspace delays only the
    /// messages of its own chat. A failed open leaves the slot empty and the
    /// next message tries again.
    async fn get_or_create(&self, chat_id: i64) -> Result<mpsc::Sender<Envelope>, RegistryError> {
        let slot = self.slot(chat_id).await;
        let inbox = slot.get_or_try_init(|| self.start_session(chat_id)).await?;
        Ok(inbox.clone())
    }

    async fn slot(&self, chat_id: i64) -> SessionSlot {
        if let Some(slot) = self.sessions.read().await.get(&chat_id) {
            return Arc::clone(slot);
        }
        // Another message for the same chat may have inserted it meanwhile
        Arc::clone(self.sessions.write().await.entry(chat_id).or_default())
    }

    /// Open the chat's workspace on the blocking pool and spawn its worker
    async fn start_session(&self, chat_id: i64) -> Result<mpsc::Sender<Envelope>, RegistryError> {
        let dir = self.chat_dir(chat_id);
        let session = tokio::task::spawn_blocking(move || Session::open(chat_id, dir))
            .await
            .map_err(|source| RegistryError::Bootstrap { chat_id, source })?
            .map_err(|source| RegistryError::Workspace { chat_id, source })?;

        let (inbox, rx) = mpsc::channel(INBOX_CAPACITY);
        let mut workers = self.workers.lock().await;
        workers.spawn(run_session(session, rx));
        tracing::info!(chat_id, workers = workers.len(), "Created session");

        Ok(inbox)
    }

    /// Stop every session worker after it has drained its inbox
    pub async fn shutdown(&self) {
        // Dropping the slots drops the inboxes, which ends each worker loop
        let slots = std::mem::take(&mut *self.sessions.write().await);
        let mut workers = std::mem::take(&mut *self.workers.lock().await);
        tracing::info!(sessions = slots.len(), workers = workers.len(), "Shutting down sessions");
        drop(slots);

        while let Some(result) = workers.join_next().await {
            if let Err(e) = result {
                tracing::error!(error = %e, "Session worker did not stop cleanly");
            }
        }
    }
}

//! Per-chat conversation session

use crate::book::ListBook;
use crate::state_machine::{Machine, State};
use crate::store::{FileStore, ListError, ListResult, ListStore};
use std::fs;
use std::path::PathBuf;

/// Dialogue state and lists of one chat
pub struct Session<S: ListStore> {
    chat_id: i64,
    book: ListBook<S>,
    machine: Machine,
}

impl Session<FileStore> {
    /// Open the session stored in `dir`, creating the directory if needed
    pub fn open(chat_id: i64, dir: PathBuf) -> ListResult<Self> {
        fs::create_dir_all(&dir).map_err(|e| ListError::io(&dir, e))?;
        let book = ListBook::open(FileStore::new(dir))?;
        tracing::info!(chat_id, lists = book.len(), "Opened session");
        Ok(Self::new(chat_id, book))
    }
}

impl<S: ListStore> Session<S> {
    pub fn new(chat_id: i64, book: ListBook<S>) -> Self {
        Self {
            chat_id,
            book,
            machine: Machine::new(),
        }
    }

    pub fn chat_id(&self) -> i64 {
        self.chat_id
    }

    pub fn state(&self) -> State {
        self.machine.state()
    }

    /// Process one message and return the reply (possibly empty)
    pub fn deliver(&mut self, user_id: i64, display_name: &str, text: &str) -> String {
        let span = tracing::debug_span!("deliver", chat_id = self.chat_id, user_id, user = %display_name);
        let _guard = span.enter();

        let reply = self.machine.process(&mut self.book, text);
        let state = self.state();
        tracing::debug!(
            state = %state,
            editing = state.is_editing(),
            reply_len = reply.len(),
            "Processed message"
        );
        reply
    }
}

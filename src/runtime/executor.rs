//! Session worker loop

use crate::session::Session;
use crate::store::ListStore;
use tokio::sync::{mpsc, oneshot};

/// One inbound message waiting for its session
#[derive(Debug)]
pub struct Envelope {
    pub user_id: i64,
    pub display_name: String,
    pub text: String,
    pub reply_tx: oneshot::Sender<String>,
}

/// Drain `inbox` one message at a time until every sender is gone.
///
/// List files are touched synchronously, so each message runs on the
/// blocking pool with the session moved in and handed back afterwards.
pub async fn run_session<S>(mut session: Session<S>, mut inbox: mpsc::Receiver<Envelope>)
where
    S: ListStore + 'static,
{
    let chat_id = session.chat_id();
    tracing::info!(chat_id, "Starting session worker");

    while let Some(envelope) = inbox.recv().await {
        let Envelope {
            user_id,
            display_name,
            text,
            reply_tx,
        } = envelope;

        let result = tokio::task::spawn_blocking(move || {
            let reply = session.deliver(user_id, &display_name, &text);
            (session, reply)
        })
        .await;

        match result {
            Ok((returned, reply)) => {
                session = returned;
                // The caller may have given up waiting
                let _ = reply_tx.send(reply);
            }
            Err(e) => {
                tracing::error!(chat_id, error = %e, "Session worker failed");
                return;
            }
        }
    }

    tracing::info!(chat_id, "Session worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::ListBook;
    use crate::store::memory::MemoryStore;

    fn envelope(text: &str) -> (Envelope, oneshot::Receiver<String>) {
        let (reply_tx, reply_rx) = oneshot::channel();
        let envelope = Envelope {
            user_id: 1,
            display_name: "tester".to_string(),
            text: text.to_string(),
            reply_tx,
        };
        (envelope, reply_rx)
    }

    #[tokio::test]
    async fn test_worker_answers_in_order() {
        let book = ListBook::open(MemoryStore::new()).unwrap();
        let (tx, rx) = mpsc::channel(8);
        let worker = tokio::spawn(run_session(Session::new(3, book), rx));

        let mut replies = Vec::new();
        for text in ["/list new l", "a", "b", "/end", "/list view l"] {
            let (env, reply_rx) = envelope(text);
            tx.send(env).await.unwrap();
            replies.push(reply_rx);
        }

        let mut out = Vec::new();
        for rx in replies {
            out.push(rx.await.unwrap());
        }
        assert_eq!(out[3], "New list 'l' created with 2 items");
        assert_eq!(out[4], "--- l ---\n[0] a\n[1] b");

        drop(tx);
        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_worker_survives_dropped_reply_receiver() {
        let book = ListBook::open(MemoryStore::new()).unwrap();
        let (tx, rx) = mpsc::channel(8);
        let worker = tokio::spawn(run_session(Session::new(3, book), rx));

        let (env, reply_rx) = envelope("/list new l");
        drop(reply_rx);
        tx.send(env).await.unwrap();

        let (env, reply_rx) = envelope("/end");
        tx.send(env).await.unwrap();
        assert_eq!(reply_rx.await.unwrap(), "New list 'l' created with 0 items");

        drop(tx);
        worker.await.unwrap();
    }
}

//! Per-user message queues: one unbounded channel and one worker task per user id.
//!
//! Messages of one user are handled strictly in arrival order (the next one waits until the handler
//! chain has finished the previous one); different users are handled in parallel.

use dashmap::DashMap;
use relay_core::{HandlerChain, Message};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

type QueueSender = mpsc::UnboundedSender<Message>;

/// Routes inbound messages into per-user queues drained by the handler chain.
pub struct UserQueues {
    chain: HandlerChain,
    queues: DashMap<i64, QueueSender>,
}

impl UserQueues {
    pub fn new(chain: HandlerChain) -> Self {
        Self {
            chain,
            queues: DashMap::new(),
        }
    }

    /// Number of users with a live queue.
    pub fn user_count(&self) -> usize {
        self.queues.len()
    }

    /// Queues `message` behind earlier messages of the same user. Must be called inside a tokio runtime.
    pub fn enqueue(&self, message: Message) {
        let user_id = message.user.id;
        let tx = self
            .queues
            .entry(user_id)
            .or_insert_with(|| self.spawn_worker(user_id))
            .clone();

        if let Err(mpsc::error::SendError(message)) = tx.send(message) {
            error!(user_id, "User queue closed; restarting worker");
            let tx = self.spawn_worker(user_id);
            if tx.send(message).is_err() {
                error!(user_id, "Failed to queue message");
                return;
            }
            self.queues.insert(user_id, tx);
        }
    }

    fn spawn_worker(&self, user_id: i64) -> QueueSender {
        let (tx, rx) = mpsc::unbounded_channel::<Message>();
        info!(user_id, "Starting user queue");
        tokio::spawn(Self::process_queue_loop(rx, self.chain.clone(), user_id));
        tx
    }

    /// Consumes items from the user's queue and runs the handler chain for each.
    async fn process_queue_loop(
        mut rx: mpsc::UnboundedReceiver<Message>,
        chain: HandlerChain,
        user_id: i64,
    ) {
        while let Some(message) = rx.recv().await {
            debug!(user_id, message_id = %message.id, "Processing queued message");
            if let Err(e) = chain.handle(&message).await {
                error!(error = %e, user_id, "Handler chain failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use relay_core::{Chat, Handler, HandlerResponse, User};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn message(user_id: i64, content: &str) -> Message {
        Message {
            id: content.to_string(),
            user: User {
                id: user_id,
                username: None,
                first_name: None,
                last_name: None,
            },
            chat: Chat {
                id: user_id,
                chat_type: "private".to_string(),
            },
            content: content.to_string(),
            message_type: "text".to_string(),
            created_at: Utc::now(),
        }
    }

    /// Records (user, content) on start and end; the first message of each user is slow.
    struct SlowRecorder {
        log: Arc<Mutex<Vec<String>>>,
        done: mpsc::UnboundedSender<()>,
    }

    #[async_trait]
    impl Handler for SlowRecorder {
        async fn handle(&self, message: &Message) -> relay_core::Result<HandlerResponse> {
            self.log
                .lock()
                .unwrap()
                .push(format!("start {}", message.content));
            if message.content.ends_with("-1") {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            self.log
                .lock()
                .unwrap()
                .push(format!("end {}", message.content));
            let _ = self.done.send(());
            Ok(HandlerResponse::Stop)
        }
    }

    /// **Test: one user's messages never overlap and keep their order; users run in parallel.**
    ///
    /// **Setup:** handler sleeps on each user's first message.
    /// **Action:** enqueue a-1, a-2, b-1 (user 1: a-*, user 2: b-*).
    /// **Expected:** a-2 starts only after a-1 ends; b-1 starts before a-1 ends.
    #[tokio::test]
    async fn test_per_user_order_and_parallelism() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (done_tx, mut done_rx) = mpsc::unbounded_channel();
        let chain = HandlerChain::new().add_handler(Arc::new(SlowRecorder {
            log: log.clone(),
            done: done_tx,
        }));
        let queues = UserQueues::new(chain);

        queues.enqueue(message(1, "a-1"));
        queues.enqueue(message(1, "a-2"));
        queues.enqueue(message(2, "b-1"));
        assert_eq!(queues.user_count(), 2);

        for _ in 0..3 {
            tokio::time::timeout(Duration::from_secs(5), done_rx.recv())
                .await
                .unwrap()
                .unwrap();
        }

        let log = log.lock().unwrap().clone();
        let pos = |entry: &str| log.iter().position(|e| e == entry).unwrap();
        assert!(pos("end a-1") < pos("start a-2"));
        assert!(pos("start b-1") < pos("end a-1"));
    }
}

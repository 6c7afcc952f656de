//! Integration tests for [`relay_core::HandlerChain`].
//!
//! Covers: a command-style handler short-circuiting the chain, pass-through to the next handler,
//! before() stopping the chain, and after() seeing the final response in reverse order.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use relay_core::{Chat, Handler, HandlerChain, HandlerResponse, Message, User};

fn create_test_message(content: &str) -> Message {
    Message {
        id: "test_message_id".to_string(),
        content: content.to_string(),
        user: User {
            id: 123,
            username: Some("test_user".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 456,
            chat_type: "private".to_string(),
        },
        message_type: "text".to_string(),
        created_at: Utc::now(),
    }
}

/// Records every phase it runs into a shared log, and answers `handle` with a fixed response.
struct RecordingHandler {
    name: &'static str,
    log: Arc<Mutex<Vec<String>>>,
    response: HandlerResponse,
    allow: bool,
}

impl RecordingHandler {
    fn new(name: &'static str, log: Arc<Mutex<Vec<String>>>, response: HandlerResponse) -> Self {
        Self {
            name,
            log,
            response,
            allow: true,
        }
    }

    fn blocking(mut self) -> Self {
        self.allow = false;
        self
    }

    fn push(&self, entry: String) {
        self.log.lock().unwrap().push(entry);
    }
}

#[async_trait::async_trait]
impl Handler for RecordingHandler {
    async fn before(&self, _message: &Message) -> relay_core::Result<bool> {
        self.push(format!("{}:before", self.name));
        Ok(self.allow)
    }

    async fn handle(&self, _message: &Message) -> relay_core::Result<HandlerResponse> {
        self.push(format!("{}:handle", self.name));
        Ok(self.response.clone())
    }

    async fn after(&self, _message: &Message, response: &HandlerResponse) -> relay_core::Result<()> {
        self.push(format!("{}:after:{:?}", self.name, response));
        Ok(())
    }
}

/// **Test: Continue passes the message to the next handler, whose Reply ends the chain.**
///
/// **Setup:** "commands" returns Continue, "pipeline" returns Reply("Hi").
/// **Action:** `chain.handle(&message)`.
/// **Expected:** Reply("Hi"); before runs first→last, after runs last→first with the final reply.
#[tokio::test]
async fn test_continue_then_reply() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(RecordingHandler::new(
            "commands",
            log.clone(),
            HandlerResponse::Continue,
        )))
        .add_handler(Arc::new(RecordingHandler::new(
            "pipeline",
            log.clone(),
            HandlerResponse::Reply("Hi".to_string()),
        )));

    let response = chain.handle(&create_test_message("Hello")).await.unwrap();

    assert_eq!(response, HandlerResponse::Reply("Hi".to_string()));
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "commands:before",
            "pipeline:before",
            "commands:handle",
            "pipeline:handle",
            "pipeline:after:Reply(\"Hi\")",
            "commands:after:Reply(\"Hi\")",
        ]
    );
}

/// **Test: Stop from the first handler keeps later handlers from handling.**
///
/// **Setup:** "commands" returns Stop (e.g. it answered /help itself).
/// **Action:** `chain.handle(&message)`.
/// **Expected:** Stop; "pipeline" never handles.
#[tokio::test]
async fn test_stop_short_circuits() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(RecordingHandler::new(
            "commands",
            log.clone(),
            HandlerResponse::Stop,
        )))
        .add_handler(Arc::new(RecordingHandler::new(
            "pipeline",
            log.clone(),
            HandlerResponse::Reply("unused".to_string()),
        )));

    let response = chain.handle(&create_test_message("/help")).await.unwrap();

    assert_eq!(response, HandlerResponse::Stop);
    let log = log.lock().unwrap();
    assert!(!log.contains(&"pipeline:handle".to_string()));
    assert!(log.contains(&"pipeline:after:Stop".to_string()));
}

/// **Test: before() returning false stops the chain before any handle.**
///
/// **Setup:** first handler blocks in before.
/// **Action:** `chain.handle(&message)`.
/// **Expected:** Stop; no handle and no after entries.
#[tokio::test]
async fn test_before_false_stops_chain() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(
            RecordingHandler::new("gate", log.clone(), HandlerResponse::Continue).blocking(),
        ))
        .add_handler(Arc::new(RecordingHandler::new(
            "pipeline",
            log.clone(),
            HandlerResponse::Reply("unused".to_string()),
        )));

    let response = chain.handle(&create_test_message("Hello")).await.unwrap();

    assert_eq!(response, HandlerResponse::Stop);
    assert_eq!(*log.lock().unwrap(), vec!["gate:before"]);
}

/// **Test: Ignore behaves like Continue; an empty chain yields Continue.**
#[tokio::test]
async fn test_ignore_and_empty_chain() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new().add_handler(Arc::new(RecordingHandler::new(
        "skip",
        log.clone(),
        HandlerResponse::Ignore,
    )));
    assert_eq!(chain.len(), 1);
    let response = chain.handle(&create_test_message("x")).await.unwrap();
    assert_eq!(response, HandlerResponse::Continue);

    let empty = HandlerChain::new();
    assert!(empty.is_empty());
    let response = empty.handle(&create_test_message("x")).await.unwrap();
    assert_eq!(response, HandlerResponse::Continue);
}

//! crates/najm_core/src/chat.rs
//!
//! The assistant conversation for one page session.
//!
//! The session moves `Idle -> AwaitingResponse -> Idle` and admits exactly one
//! outstanding advice request. The log is append-only and lives only in memory.
//!
//! An accepted request resolves on its own task, so the session returns to
//! `Idle` even when the caller stops waiting for the answer.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::catalog::{advice_fallback, EMPTY_ADVICE_REPLY};
use crate::domain::{ChatTurn, Language};
use crate::ports::{AdviceService, PortError, PortResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    AwaitingResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    EmptyPrompt,
    /// A previous request has not resolved yet.
    Busy,
}

/// Represents the result of `ChatSession::submit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was recorded and no request was made.
    Rejected(RejectReason),
    /// The assistant turn that closed the exchange.
    Answered(ChatTurn),
}

struct ChatLog {
    state: ChatState,
    turns: Vec<ChatTurn>,
}

pub struct ChatSession {
    advice: Arc<dyn AdviceService>,
    timeout: Option<Duration>,
    log: Arc<Mutex<ChatLog>>,
}

impl ChatSession {
    pub fn new(advice: Arc<dyn AdviceService>) -> Self {
        Self {
            advice,
            timeout: None,
            log: Arc::new(Mutex::new(ChatLog {
                state: ChatState::Idle,
                turns: Vec::new(),
            })),
        }
    }

    /// Bounds how long a single advice request may take before it counts as failed.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub async fn state(&self) -> ChatState {
        self.log.lock().await.state
    }

    pub async fn turns(&self) -> Vec<ChatTurn> {
        self.log.lock().await.turns.clone()
    }

    /// Sends a visitor question to the advice service and records both sides.
    ///
    /// The log lock is released while the service works, so observers can read
    /// the pending user turn and a concurrent submit is turned away as `Busy`.
    pub async fn submit(&self, prompt: &str, language: Language) -> SubmitOutcome {
        if prompt.trim().is_empty() {
            return SubmitOutcome::Rejected(RejectReason::EmptyPrompt);
        }
        {
            let mut log = self.log.lock().await;
            if log.state == ChatState::AwaitingResponse {
                info!("Chat request ignored: another one is still outstanding");
                return SubmitOutcome::Rejected(RejectReason::Busy);
            }
            log.turns.push(ChatTurn::user(prompt));
            log.state = ChatState::AwaitingResponse;
        }

        let resolution = tokio::spawn(resolve(
            self.advice.clone(),
            self.timeout,
            self.log.clone(),
            prompt.to_string(),
            language,
        ));
        match resolution.await {
            Ok(turn) => SubmitOutcome::Answered(turn),
            Err(e) => {
                // The resolving task panicked before it could close the exchange.
                error!("Advice task failed: {}", e);
                let turn = ChatTurn::assistant(advice_fallback(language));
                let mut log = self.log.lock().await;
                log.turns.push(turn.clone());
                log.state = ChatState::Idle;
                SubmitOutcome::Answered(turn)
            }
        }
    }
}

/// Runs one advice request to completion and closes the exchange in the log.
async fn resolve(
    advice: Arc<dyn AdviceService>,
    timeout: Option<Duration>,
    log: Arc<Mutex<ChatLog>>,
    prompt: String,
    language: Language,
) -> ChatTurn {
    let started = Instant::now();
    let reply = match request_advice(advice.as_ref(), timeout, &prompt, language).await {
        Ok(text) if text.trim().is_empty() => {
            warn!("Advice service returned an empty reply");
            EMPTY_ADVICE_REPLY.to_string()
        }
        Ok(text) => text,
        Err(e) => {
            error!("Advice request failed: {}", e);
            advice_fallback(language).to_string()
        }
    };
    info!("⏱️ Advice took: {:?}", started.elapsed());

    let turn = ChatTurn::assistant(reply);
    let mut log = log.lock().await;
    log.turns.push(turn.clone());
    log.state = ChatState::Idle;
    turn
}

async fn request_advice(
    advice: &dyn AdviceService,
    timeout: Option<Duration>,
    prompt: &str,
    language: Language,
) -> PortResult<String> {
    let call = advice.get_travel_advice(prompt, language);
    match timeout {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .map_err(|_| PortError::Unavailable(format!("no reply within {:?}", limit)))?,
        None => call.await,
    }
}

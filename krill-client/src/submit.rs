//! Commerce submission state machine
//!
//! Drives one operation request through
//! `Idle → Sending → {Succeeded | RetryPending → Sending → {Succeeded |
//! Failed} | Failed}`. Exactly one retry is ever attempted, and only for
//! the known-retryable rejection; a retried failure is final. Client-side
//! timeouts fail immediately without a retry. Cancellation is honored
//! before the first send and before the retry send, never after a request
//! has been committed to the wire.

use crate::builder::to_payload;
use crate::retry::{is_retryable_rejection, repair_payload};
use crate::{ClientError, ClientResult};
use async_trait::async_trait;
use serde_json::Value;
use shared::operation::request::OperationRequest;
use shared::operation::response::OperationResponse;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

/// The unified commerce operation endpoint
pub const UNIFIED_OPERATION_PATH: &str = "/api/user/unified";

/// Raw transport reply: status plus the unparsed body, so rejection
/// bodies stay available for retry matching.
#[derive(Debug, Clone)]
pub struct TransportReply {
    pub status: u16,
    pub body: String,
}

impl TransportReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport seam for operation submission; implemented by `HttpClient`
/// and by test doubles.
#[async_trait]
pub trait CommerceTransport {
    async fn post_operation(&self, payload: &Value) -> ClientResult<TransportReply>;
}

/// Lifecycle of one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Sending,
    RetryPending,
    Succeeded,
    Failed,
}

/// One submission flow over a transport. `submit` takes `&mut self`, so a
/// flow can never have two requests in flight.
#[derive(Debug)]
pub struct SubmissionMachine<T> {
    transport: T,
    state: SubmissionState,
}

impl<T: CommerceTransport> SubmissionMachine<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Submit one operation request.
    ///
    /// Cancellation before the first send leaves the flow idle with
    /// nothing sent. Cancellation between a retryable rejection and the
    /// retry send skips the retry; the first attempt stands as the
    /// outcome of record and the flow reports cancellation.
    pub async fn submit(
        &mut self,
        request: &OperationRequest,
        cancel: &CancellationToken,
    ) -> ClientResult<OperationResponse> {
        if matches!(
            self.state,
            SubmissionState::Sending | SubmissionState::RetryPending
        ) {
            return Err(ClientError::AlreadyInFlight);
        }

        let correlation_id = Uuid::new_v4();
        let mut payload = Value::Object(to_payload(request)?);

        if cancel.is_cancelled() {
            self.state = SubmissionState::Idle;
            info!(%correlation_id, "Submission cancelled before send");
            return Err(ClientError::Cancelled);
        }

        self.state = SubmissionState::Sending;
        info!(%correlation_id, kind = %request.kind(), "Submitting operation");

        let reply = match self.transport.post_operation(&payload).await {
            Ok(reply) => reply,
            Err(error) => return self.fail(correlation_id, error),
        };

        if reply.is_success() {
            return self.succeed(correlation_id, &reply);
        }

        let message = rejection_message(&reply);
        if !is_retryable_rejection(&message) {
            return self.fail(
                correlation_id,
                ClientError::Api {
                    status: reply.status,
                    message,
                },
            );
        }

        self.state = SubmissionState::RetryPending;
        warn!(%correlation_id, status = reply.status, %message, "Retryable rejection, repairing payload");

        if cancel.is_cancelled() {
            info!(%correlation_id, "Submission cancelled before retry");
            return self.fail(correlation_id, ClientError::Cancelled);
        }

        repair_payload(&mut payload);
        self.state = SubmissionState::Sending;

        let reply = match self.transport.post_operation(&payload).await {
            Ok(reply) => reply,
            Err(error) => return self.fail(correlation_id, error),
        };

        if reply.is_success() {
            return self.succeed(correlation_id, &reply);
        }

        // Second rejection is final regardless of its message
        let message = rejection_message(&reply);
        self.fail(
            correlation_id,
            ClientError::Api {
                status: reply.status,
                message,
            },
        )
    }

    fn succeed(
        &mut self,
        correlation_id: Uuid,
        reply: &TransportReply,
    ) -> ClientResult<OperationResponse> {
        let response: OperationResponse = serde_json::from_str(&reply.body).map_err(|e| {
            self.state = SubmissionState::Failed;
            ClientError::InvalidResponse(e.to_string())
        })?;
        self.state = SubmissionState::Succeeded;
        info!(%correlation_id, status = reply.status, "Operation accepted");
        Ok(response)
    }

    fn fail(
        &mut self,
        correlation_id: Uuid,
        error: ClientError,
    ) -> ClientResult<OperationResponse> {
        self.state = SubmissionState::Failed;
        warn!(%correlation_id, %error, "Submission failed");
        Err(error)
    }
}

/// The server's failure text, or a status-code message when unparsable
fn rejection_message(reply: &TransportReply) -> String {
    serde_json::from_str::<OperationResponse>(&reply.body)
        .ok()
        .and_then(|r| r.failure_message().map(str::to_string))
        .unwrap_or_else(|| format!("HTTP {}", reply.status))
}

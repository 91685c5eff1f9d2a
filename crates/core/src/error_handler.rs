//! Error normalization for failed HTTP calls.
//!
//! Every entity service funnels its failures through this module. A [`TransportFailure`] is
//! turned into a single human-readable message, two diagnostic lines are written, and the
//! operation terminates with a [`NormalizedFailure`] carrying that message.
//!
//! ## Message derivation
//!
//! In priority order:
//! 1. A client-side failure (no usable response) uses the fault's own description.
//! 2. A server response uses `server returned code {status} with body "{body}"`.
//! 3. An `errors` response header holding a JSON array whose first element has a non-empty
//!    `errorMessage` string overrides the message with that string. Anything else in the header
//!    is ignored.
//!
//! Derivation is pure: the same failure always yields the same message.
//!
//! ## Fallback values
//!
//! Each handler is built with a fallback value for its operation. The fallback is never
//! substituted for the failure; `handle` always returns `Err`. Callers that want to recover
//! read it back through [`FailureHandler::fallback`].

use crate::constants::{ERRORS_HEADER, ERROR_MESSAGE_FIELD, UNKNOWN_NETWORK_ERROR};
use crate::diagnostics::DiagnosticLog;
use crate::transport::{FailureBody, TransportFailure};
use http::HeaderMap;
use std::sync::Arc;

/// The terminal error of a failed service operation.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct NormalizedFailure {
    message: String,
    failure: TransportFailure,
}

impl NormalizedFailure {
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The transport failure the message was derived from.
    pub fn failure(&self) -> &TransportFailure {
        &self.failure
    }

    pub fn into_message(self) -> String {
        self.message
    }
}

/// Result type of every entity service operation.
pub type ServiceResult<T> = Result<T, NormalizedFailure>;

/// Identifies the call site of a failed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationContext<T> {
    service_name: String,
    operation_name: String,
    fallback: T,
}

impl<T> OperationContext<T> {
    pub fn new(
        service_name: impl Into<String>,
        operation_name: impl Into<String>,
        fallback: T,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            operation_name: operation_name.into(),
            fallback,
        }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn operation_name(&self) -> &str {
        &self.operation_name
    }

    pub fn fallback(&self) -> &T {
        &self.fallback
    }

    /// The summary diagnostic line for a failure of this operation.
    pub fn summary(&self, message: &str) -> String {
        format!(
            "{}::{} failed: {}",
            self.service_name, self.operation_name, message
        )
    }
}

/// Derives the normalized message for `failure`.
pub fn derive_message(failure: &TransportFailure) -> String {
    let message = match (&failure.body, failure.status) {
        (FailureBody::ClientSide(description), _) => description.clone(),
        (FailureBody::Server(body), Some(status)) => {
            format!("server returned code {} with body \"{}\"", status, body)
        }
        // No status or no body: treat as a client-side failure without a description.
        _ if failure.status_text.is_empty() => UNKNOWN_NETWORK_ERROR.to_string(),
        _ => failure.status_text.clone(),
    };

    first_binding_error_message(&failure.headers).unwrap_or(message)
}

/// Reads the `errorMessage` of the first binding error in the `errors` header, if any.
///
/// Only a non-empty JSON string counts; numbers, booleans and other non-string values are ignored.
fn first_binding_error_message(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(ERRORS_HEADER)?.to_str().ok()?;
    let errors: serde_json::Value = serde_json::from_str(raw).ok()?;
    let message = errors
        .as_array()?
        .first()?
        .get(ERROR_MESSAGE_FIELD)?
        .as_str()?;

    if message.is_empty() {
        None
    } else {
        Some(message.to_owned())
    }
}

/// Creates per-service handlers that share one diagnostic log.
#[derive(Clone)]
pub struct HttpErrorHandler {
    log: Arc<dyn DiagnosticLog>,
}

impl HttpErrorHandler {
    pub fn new(log: Arc<dyn DiagnosticLog>) -> Self {
        Self { log }
    }

    /// Binds a handler factory to `service_name`. Has no side effects.
    pub fn create_handler(&self, service_name: impl Into<String>) -> ServiceErrorHandler {
        ServiceErrorHandler {
            service_name: service_name.into(),
            log: Arc::clone(&self.log),
        }
    }
}

impl std::fmt::Debug for HttpErrorHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpErrorHandler").finish_non_exhaustive()
    }
}

/// Handler factory bound to one service name.
#[derive(Clone)]
pub struct ServiceErrorHandler {
    service_name: String,
    log: Arc<dyn DiagnosticLog>,
}

impl ServiceErrorHandler {
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Builds the failure handler for one operation. Has no side effects.
    pub fn handler<T>(&self, operation_name: impl Into<String>, fallback: T) -> FailureHandler<T> {
        FailureHandler {
            context: OperationContext::new(self.service_name.clone(), operation_name, fallback),
            log: Arc::clone(&self.log),
        }
    }
}

impl std::fmt::Debug for ServiceErrorHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceErrorHandler")
            .field("service_name", &self.service_name)
            .finish_non_exhaustive()
    }
}

/// Handles the failure of one operation.
pub struct FailureHandler<T> {
    context: OperationContext<T>,
    log: Arc<dyn DiagnosticLog>,
}

impl<T> FailureHandler<T> {
    pub fn context(&self) -> &OperationContext<T> {
        &self.context
    }

    pub fn fallback(&self) -> &T {
        self.context.fallback()
    }

    /// Normalizes `failure`, logs it, and fails the operation with the derived message.
    ///
    /// Always returns `Err`. The result type `R` is whatever the failed operation would have
    /// produced and is independent of the fallback type.
    pub fn handle<R>(&self, failure: TransportFailure) -> ServiceResult<R> {
        let message = derive_message(&failure);

        self.log.write(&format!("{:?}", failure));
        self.log.write(&self.context.summary(&message));

        Err(NormalizedFailure { message, failure })
    }
}

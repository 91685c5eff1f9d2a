//! Entity services for the clinic REST API.
//!
//! Each service wraps one resource collection and routes every failure through its own
//! [`ServiceErrorHandler`](crate::error_handler::ServiceErrorHandler). The shared request,
//! encode and decode plumbing lives in [`RestResource`].

pub mod owner;
pub mod pet;
pub mod pet_type;
pub mod specialty;
pub mod vet;
pub mod visit;

pub use owner::OwnerService;
pub use pet::PetService;
pub use pet_type::PetTypeService;
pub use specialty::SpecialtyService;
pub use vet::VetService;
pub use visit::VisitService;

use crate::config::ClientConfig;
use crate::error_handler::{FailureHandler, HttpErrorHandler, ServiceErrorHandler, ServiceResult};
use crate::transport::{HttpTransport, TransportFailure, TransportRequest, TransportResponse};
use http::Method;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Transport, base URL and error handler shared by the operations of one service.
#[derive(Clone)]
pub(crate) struct RestResource {
    transport: Arc<dyn HttpTransport>,
    base_url: Url,
    errors: ServiceErrorHandler,
}

impl RestResource {
    pub(crate) fn new(
        transport: Arc<dyn HttpTransport>,
        cfg: &ClientConfig,
        errors: &HttpErrorHandler,
        service_name: &str,
    ) -> Self {
        Self {
            transport,
            base_url: cfg.api_base_url().clone(),
            errors: errors.create_handler(service_name),
        }
    }

    pub(crate) fn handler<T>(&self, operation: &str, fallback: T) -> FailureHandler<T> {
        self.errors.handler(operation, fallback)
    }

    /// Resolves `segments` beneath the API base URL, percent-encoding each segment.
    pub(crate) fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) async fn get<R, F>(&self, url: Url, on_error: &FailureHandler<F>) -> ServiceResult<R>
    where
        R: DeserializeOwned,
    {
        let response = self
            .send(TransportRequest::new(Method::GET, url), on_error)
            .await?;
        decode(response, on_error)
    }

    pub(crate) async fn post<B, R, F>(
        &self,
        url: Url,
        body: &B,
        on_error: &FailureHandler<F>,
    ) -> ServiceResult<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let request = TransportRequest::new(Method::POST, url).with_body(encode(body, on_error)?);
        let response = self.send(request, on_error).await?;
        decode(response, on_error)
    }

    /// PUT whose response body is ignored.
    pub(crate) async fn put<B, F>(
        &self,
        url: Url,
        body: &B,
        on_error: &FailureHandler<F>,
    ) -> ServiceResult<()>
    where
        B: Serialize,
    {
        let request = TransportRequest::new(Method::PUT, url).with_body(encode(body, on_error)?);
        self.send(request, on_error).await.map(|_| ())
    }

    /// DELETE whose response body is ignored.
    pub(crate) async fn delete<F>(&self, url: Url, on_error: &FailureHandler<F>) -> ServiceResult<()> {
        self.send(TransportRequest::new(Method::DELETE, url), on_error)
            .await
            .map(|_| ())
    }

    async fn send<F>(
        &self,
        request: TransportRequest,
        on_error: &FailureHandler<F>,
    ) -> ServiceResult<TransportResponse> {
        match self.transport.send(request).await {
            Ok(response) => Ok(response),
            Err(failure) => on_error.handle(failure),
        }
    }
}

fn encode<B: Serialize, F>(body: &B, on_error: &FailureHandler<F>) -> ServiceResult<serde_json::Value> {
    serde_json::to_value(body).or_else(|e| {
        on_error.handle(TransportFailure::client_side(format!(
            "failed to serialize request body: {e}"
        )))
    })
}

fn decode<R: DeserializeOwned, F>(
    response: TransportResponse,
    on_error: &FailureHandler<F>,
) -> ServiceResult<R> {
    serde_json::from_str(&response.body).or_else(|e| {
        let mut failure = TransportFailure::client_side(format!(
            "failed to parse response body: {e}"
        ))
        .with_status(response.status);
        failure.headers = response.headers;
        on_error.handle(failure)
    })
}

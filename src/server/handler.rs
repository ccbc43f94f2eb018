// src/server/handler.rs
use hyper::{header::HeaderValue, Body, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;
use tower::Service;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::api::StatusApi;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Adapts [`StatusApi`] to hyper. API errors are rendered as responses, so
/// the service itself never fails.
#[derive(Clone)]
pub struct RequestHandler {
    api: Arc<StatusApi>,
}

impl RequestHandler {
    pub fn new(api: Arc<StatusApi>) -> Self {
        Self { api }
    }
}

impl Service<Request<Body>> for RequestHandler {
    type Response = Response<Body>;
    type Error = Infallible;
    type Future = futures::future::BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let api = self.api.clone();
        let request_id = Uuid::new_v4();
        let span = info_span!(
            "request",
            id = %request_id,
            method = %req.method(),
            path = %req.uri().path(),
        );

        Box::pin(
            async move {
                let start = Instant::now();

                let mut response = match api.handle(req).await {
                    Ok(response) => response,
                    Err(err) => {
                        warn!(%err, "request rejected");
                        err.into()
                    }
                };

                if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
                    response.headers_mut().insert(REQUEST_ID_HEADER, value);
                }

                info!(
                    status = response.status().as_u16(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "request complete"
                );
                Ok(response)
            }
            .instrument(span),
        )
    }
}

// src/api/responses.rs
use super::error::ApiError;
use crate::health::ProbeResult;
use crate::services::ServiceDescriptor;
use chrono::{DateTime, Utc};
use hyper::{header, Body, Response, StatusCode};
use serde::Serialize;
use std::collections::BTreeMap;

pub const SYSTEM_NAME: &str = "home-brain";

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct Liveness<'a> {
    pub status: &'static str,
    pub version: &'a str,
    pub system: &'static str,
}

impl<'a> Liveness<'a> {
    pub fn alive(version: &'a str) -> Self {
        Self {
            status: "alive",
            version,
            system: SYSTEM_NAME,
        }
    }
}

/// One service's entry, shared by the aggregate and single-service bodies.
#[derive(Debug, Serialize)]
pub struct ServiceReport<'a> {
    pub healthy: bool,
    pub status: String,
    pub url: &'a str,
}

impl<'a> ServiceReport<'a> {
    pub fn new(service: &'a ServiceDescriptor, result: ProbeResult) -> Self {
        Self {
            healthy: result.healthy,
            status: result.message,
            url: &service.public_url,
        }
    }
}

/// Body of `GET /api/services`.
#[derive(Debug, Serialize)]
pub struct AggregateReport<'a> {
    pub timestamp: DateTime<Utc>,
    pub services: BTreeMap<&'a str, ServiceReport<'a>>,
}

/// Body of `GET /api/services/{name}`.
#[derive(Debug, Serialize)]
pub struct SingleServiceReport<'a> {
    pub service: &'a str,
    #[serde(flatten)]
    pub report: ServiceReport<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody<'a> {
    pub error: &'a str,
}

pub(crate) fn json<T: Serialize>(status: StatusCode, body: &T) -> Result<Response<Body>, ApiError> {
    let bytes = serde_json::to_vec(body)?;
    Ok(json_bytes(status, bytes))
}

pub(crate) fn json_bytes(status: StatusCode, bytes: Vec<u8>) -> Response<Body> {
    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json; charset=utf-8"),
    );
    response
}

// src/api/routes.rs
use super::error::ApiError;
use super::responses::{json, AggregateReport, Liveness, ServiceReport, SingleServiceReport};
use crate::health::Probe;
use crate::services::{ServiceDescriptor, ServiceRegistry};
use chrono::Utc;
use hyper::{Body, Method, Request, Response, StatusCode};
use std::collections::BTreeMap;
use std::sync::Arc;

const SERVICES_PREFIX: &str = "/api/services";

enum Route<'a> {
    Health,
    AllServices,
    Service(&'a str),
}

impl<'a> Route<'a> {
    fn parse(path: &'a str) -> Option<Self> {
        match path {
            "/health" => Some(Route::Health),
            SERVICES_PREFIX => Some(Route::AllServices),
            _ => path
                .strip_prefix(SERVICES_PREFIX)
                .and_then(|rest| rest.strip_prefix('/'))
                .filter(|name| !name.is_empty() && !name.contains('/'))
                .map(Route::Service),
        }
    }
}

/// Answers the status endpoints. Holds no per-request state; every call
/// probes afresh.
pub struct StatusApi {
    registry: ServiceRegistry,
    prober: Arc<dyn Probe>,
    version: String,
}

impl StatusApi {
    pub fn new(registry: ServiceRegistry, prober: Arc<dyn Probe>, version: impl Into<String>) -> Self {
        Self {
            registry,
            prober,
            version: version.into(),
        }
    }

    pub async fn handle(&self, req: Request<Body>) -> Result<Response<Body>, ApiError> {
        // Nothing is read from the body.
        let (parts, _body) = req.into_parts();
        let path = parts.uri.path();
        let route = Route::parse(path).ok_or_else(|| ApiError::NotFound(path.to_string()))?;

        if parts.method != Method::GET {
            return Err(ApiError::MethodNotAllowed(parts.method));
        }

        match route {
            Route::Health => self.health(),
            Route::AllServices => self.all_services().await,
            Route::Service(name) => {
                let service = self
                    .registry
                    .get(name)
                    .ok_or_else(|| ApiError::UnknownService(name.to_string()))?;
                self.single_service(service).await
            }
        }
    }

    fn health(&self) -> Result<Response<Body>, ApiError> {
        json(StatusCode::OK, &Liveness::alive(&self.version))
    }

    /// Always 200: downstream health travels in the body.
    async fn all_services(&self) -> Result<Response<Body>, ApiError> {
        let mut services = BTreeMap::new();
        for service in self.registry.iter() {
            let result = self.prober.probe(&service.probe_url).await;
            services.insert(service.name.as_str(), ServiceReport::new(service, result));
        }

        let report = AggregateReport {
            timestamp: Utc::now(),
            services,
        };
        json(StatusCode::OK, &report)
    }

    async fn single_service(&self, service: &ServiceDescriptor) -> Result<Response<Body>, ApiError> {
        let result = self.prober.probe(&service.probe_url).await;
        let status = if result.healthy {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };

        let body = SingleServiceReport {
            service: &service.name,
            report: ServiceReport::new(service, result),
        };
        json(status, &body)
    }
}

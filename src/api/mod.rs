// src/api/mod.rs
mod error;
mod responses;
mod routes;

pub use error::ApiError;
pub use responses::{AggregateReport, Liveness, ServiceReport, SingleServiceReport, SYSTEM_NAME};
pub use routes::StatusApi;

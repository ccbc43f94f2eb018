// src/health/mod.rs
mod prober;
mod status;

pub use prober::{HttpProber, Probe};
pub use status::ProbeResult;

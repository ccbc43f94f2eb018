// src/services/mod.rs
mod descriptor;
mod registry;

pub use descriptor::ServiceDescriptor;
pub use registry::ServiceRegistry;

// src/services/registry.rs
use super::descriptor::ServiceDescriptor;
use crate::config::ServiceConfig;
use anyhow::Result;
use std::sync::Arc;

/// Fixed table of known services, in report order. Built once at startup
/// and shared read-only between request tasks.
#[derive(Debug, Clone)]
pub struct ServiceRegistry {
    services: Arc<[ServiceDescriptor]>,
}

impl ServiceRegistry {
    pub fn new(services: Vec<ServiceDescriptor>) -> Self {
        Self {
            services: services.into(),
        }
    }

    pub fn from_config(configs: &[ServiceConfig]) -> Result<Self> {
        let services = configs
            .iter()
            .map(ServiceDescriptor::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(services))
    }

    pub fn get(&self, name: &str) -> Option<&ServiceDescriptor> {
        self.services.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceDescriptor> {
        self.services.iter()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

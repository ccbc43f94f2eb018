// src/services/descriptor.rs
use crate::config::ServiceConfig;
use anyhow::Result;
use url::Url;

/// A downstream service the status server reports on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub name: String,
    pub probe_url: Url,
    pub public_url: String,
}

impl ServiceDescriptor {
    pub fn new(name: impl Into<String>, probe_url: Url, public_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            probe_url,
            public_url: public_url.into(),
        }
    }
}

impl TryFrom<&ServiceConfig> for ServiceDescriptor {
    type Error = anyhow::Error;

    fn try_from(config: &ServiceConfig) -> Result<Self> {
        Ok(Self::new(
            config.name.clone(),
            config.parsed_probe_url()?,
            config.public_url.clone(),
        ))
    }
}

// src/config/models.rs
use anyhow::{bail, ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub app: AppConfig,
    pub probe: ProbeConfig,
    pub services: Vec<ServiceConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            app: AppConfig::default(),
            probe: ProbeConfig::default(),
            services: default_services(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.server.port != 0, "server.port must be non-zero");
        ensure!(self.probe.timeout_secs > 0, "probe.timeout_secs must be greater than 0");
        ensure!(!self.services.is_empty(), "at least one service must be configured");

        let mut seen = HashSet::new();
        for service in &self.services {
            service.validate()?;
            if !seen.insert(service.name.as_str()) {
                bail!("duplicate service name: {}", service.name);
            }
        }

        self.server.socket_addr()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("invalid server.host: {}", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Reported as `version` by `/health`.
    pub version: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self { timeout_secs: 5 }
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    /// Internal address polled by the probe; must be http or https.
    pub probe_url: String,
    /// Address handed back to clients, rendered verbatim.
    pub public_url: String,
}

impl ServiceConfig {
    fn validate(&self) -> Result<()> {
        ensure!(!self.name.is_empty(), "service name must not be empty");
        ensure!(
            !self.name.contains('/'),
            "service name must not contain '/': {}",
            self.name
        );
        self.parsed_probe_url()?;
        Url::parse(&self.public_url)
            .with_context(|| format!("service {}: invalid public_url", self.name))?;
        Ok(())
    }

    pub fn parsed_probe_url(&self) -> Result<Url> {
        let url = Url::parse(&self.probe_url)
            .with_context(|| format!("service {}: invalid probe_url", self.name))?;
        ensure!(
            matches!(url.scheme(), "http" | "https"),
            "service {}: probe_url scheme must be http or https, got {}",
            self.name,
            url.scheme()
        );
        Ok(url)
    }
}

// Stock deployment: photo library and media server inside the cluster.
impl ServiceConfig {
    pub fn immich() -> Self {
        Self::known(
            "immich",
            "http://immich-server.immich.svc.cluster.local/api/server-info/ping",
            "https://immich.kanokgan.com",
        )
    }

    pub fn jellyfin() -> Self {
        Self::known(
            "jellyfin",
            "http://jellyfin.jellyfin.svc.cluster.local:8096/health",
            "https://jellyfin.kanokgan.com",
        )
    }

    fn known(name: &str, probe_url: &str, public_url: &str) -> Self {
        Self {
            name: name.to_string(),
            probe_url: probe_url.to_string(),
            public_url: public_url.to_string(),
        }
    }
}

pub fn default_services() -> Vec<ServiceConfig> {
    vec![ServiceConfig::immich(), ServiceConfig::jellyfin()]
}

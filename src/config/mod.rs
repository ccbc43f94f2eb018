// src/config/mod.rs
mod models;

pub use models::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Prefix for environment overrides, e.g. `HOME_BRAIN_SERVER__PORT=9090`.
pub const ENV_PREFIX: &str = "HOME_BRAIN";

/// Load configuration: built-in defaults, then the file at `path` if it
/// exists (format picked from the extension), then environment overrides.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    load_layered(path.as_ref(), ENV_PREFIX)
}

fn load_layered(path: &Path, env_prefix: &str) -> Result<Config> {
    let settings = ::config::Config::builder()
        .add_source(::config::File::from(path).required(false))
        .add_source(
            // Values stay strings; `app.version=1.0` must not become 1.
            ::config::Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .with_context(|| format!("Failed to read config from {}", path.display()))?;

    let config: Config = settings
        .try_deserialize()
        .context("Failed to parse config")?;

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // Each test reads its own prefix so variables set elsewhere in the
    // process cannot leak in.
    const UNSET_PREFIX: &str = "HOME_BRAIN_TEST_UNSET";

    fn temp_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "home-brain-{}-{}",
            std::process::id(),
            name
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_defaults_match_stock_deployment() {
        let config = Config::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.probe.timeout(), std::time::Duration::from_secs(5));
        assert_eq!(config.app.version, env!("CARGO_PKG_VERSION"));

        let names: Vec<_> = config.services.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["immich", "jellyfin"]);
        assert_eq!(config.services[0].public_url, "https://immich.kanokgan.com");
        assert_eq!(
            config.services[1].probe_url,
            "http://jellyfin.jellyfin.svc.cluster.local:8096/health"
        );
        config.validate().unwrap();
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = load_layered(Path::new("/nonexistent/home-brain.yaml"), UNSET_PREFIX).unwrap();
        assert_eq!(config.services.len(), 2);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_yaml_file_overrides_defaults() {
        let path = temp_config(
            "override.yaml",
            r#"
server:
  port: 9090
app:
  version: "1.4.2"
probe:
  timeout_secs: 2
services:
  - name: grafana
    probe_url: "http://grafana.monitoring.svc.cluster.local:3000/api/health"
    public_url: "https://grafana.example.com"
"#,
        );

        let config = load_layered(&path, UNSET_PREFIX).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.app.version, "1.4.2");
        assert_eq!(config.probe.timeout_secs, 2);
        assert_eq!(config.services.len(), 1);
        assert_eq!(config.services[0].name, "grafana");
    }

    #[test]
    fn test_env_overrides_keep_string_values_intact() {
        let prefix = "HOME_BRAIN_TEST_ENV";
        std::env::set_var("HOME_BRAIN_TEST_ENV_SERVER__PORT", "9090");
        std::env::set_var("HOME_BRAIN_TEST_ENV_APP__VERSION", "1.0");
        std::env::set_var("HOME_BRAIN_TEST_ENV_PROBE__TIMEOUT_SECS", "3");

        let config = load_layered(Path::new("/nonexistent/home-brain.yaml"), prefix);

        std::env::remove_var("HOME_BRAIN_TEST_ENV_SERVER__PORT");
        std::env::remove_var("HOME_BRAIN_TEST_ENV_APP__VERSION");
        std::env::remove_var("HOME_BRAIN_TEST_ENV_PROBE__TIMEOUT_SECS");

        let config = config.unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.app.version, "1.0");
        assert_eq!(config.probe.timeout_secs, 3);
        assert_eq!(config.services.len(), 2);
    }

    #[test]
    fn test_validate_rejects_duplicate_names() {
        let mut config = Config::default();
        config.services.push(ServiceConfig::immich());

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate service name"));
    }

    #[test]
    fn test_validate_rejects_bad_services() {
        let mut config = Config::default();
        config.services[0].name = "photos/immich".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.services[0].probe_url = "ftp://immich.local/ping".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.services[0].probe_url = "not a url".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.services[1].public_url = "jellyfin.kanokgan.com".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.services.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout_and_bad_host() {
        let mut config = Config::default();
        config.probe.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.server.host = "not an address".to_string();
        assert!(config.validate().is_err());
    }
}

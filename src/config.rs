//! Environment-driven configuration

use std::env;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::layout::{LayoutType, MAX_ITERATIONS};
use crate::view::ViewSettings;

/// Server configuration read from `GRAPH_VIEW_*` variables
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub file_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub layout_type: LayoutType,
    pub iterations: usize,
    pub seed: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            file_path: PathBuf::from("memory.jsonl"),
            host: "127.0.0.1".to_string(),
            port: 3030,
            layout_type: LayoutType::Force,
            iterations: 300,
            seed: 42,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup (testable without
    /// touching the process environment)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = ServerConfig::default();
        let current_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        let file_path = match lookup("GRAPH_VIEW_FILE_PATH") {
            Some(path) if Path::new(&path).is_absolute() => PathBuf::from(path),
            Some(path) => current_dir.join(path),
            None => current_dir.join(&defaults.file_path),
        };

        let host = lookup("GRAPH_VIEW_HOST").unwrap_or(defaults.host);
        let port = parse_or("GRAPH_VIEW_PORT", lookup("GRAPH_VIEW_PORT"), defaults.port);
        let layout_type = parse_or("GRAPH_VIEW_LAYOUT", lookup("GRAPH_VIEW_LAYOUT"), defaults.layout_type);
        let iterations = parse_or(
            "GRAPH_VIEW_ITERATIONS",
            lookup("GRAPH_VIEW_ITERATIONS"),
            defaults.iterations,
        )
        .clamp(1, MAX_ITERATIONS);
        let seed = parse_or("GRAPH_VIEW_SEED", lookup("GRAPH_VIEW_SEED"), defaults.seed);

        Self {
            file_path,
            host,
            port,
            layout_type,
            iterations,
            seed,
        }
    }

    /// Socket address string for binding
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Initial view settings derived from this configuration
    pub fn view_settings(&self) -> ViewSettings {
        let mut settings = ViewSettings {
            layout_type: self.layout_type,
            ..ViewSettings::default()
        };
        settings.params.iterations = self.iterations;
        settings.params.seed = self.seed;
        settings
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, value: Option<String>, default: T) -> T {
    match value {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                warn!(key, value = %raw, "Invalid configuration value, using default");
                default
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[]));
        assert_eq!(config.port, 3030);
        assert_eq!(config.layout_type, LayoutType::Force);
        assert!(config.file_path.is_absolute());
        assert!(config.file_path.ends_with("memory.jsonl"));
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("GRAPH_VIEW_FILE_PATH", "/tmp/graph.json"),
            ("GRAPH_VIEW_PORT", "8080"),
            ("GRAPH_VIEW_LAYOUT", "circular"),
            ("GRAPH_VIEW_ITERATIONS", "5000"),
            ("GRAPH_VIEW_SEED", "9"),
        ]));
        assert_eq!(config.file_path, PathBuf::from("/tmp/graph.json"));
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.layout_type, LayoutType::Circular);
        assert_eq!(config.iterations, 1000);

        let settings = config.view_settings();
        assert_eq!(settings.params.seed, 9);
        assert_eq!(settings.layout_type, LayoutType::Circular);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("GRAPH_VIEW_PORT", "not-a-port"),
            ("GRAPH_VIEW_LAYOUT", "spiral"),
        ]));
        assert_eq!(config.port, 3030);
        assert_eq!(config.layout_type, LayoutType::Force);
    }
}

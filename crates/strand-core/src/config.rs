//! Server and static-mount configuration.
//!
//! Configuration is built in code and passed down by ownership; there is
//! deliberately no environment-variable or CLI surface.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A static asset mount: a URL prefix mapped to a directory of
/// pre-built files, served as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticMount {
    /// URL prefix (e.g., "/static").
    pub prefix: String,
    /// Directory the prefix maps to.
    pub dir: PathBuf,
}

impl StaticMount {
    /// Create a new static mount. The prefix is normalized to start
    /// with a slash and carry no trailing slash.
    pub fn new(prefix: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        let mut prefix = prefix.into();
        if !prefix.starts_with('/') {
            prefix.insert(0, '/');
        }
        while prefix.len() > 1 && prefix.ends_with('/') {
            prefix.pop();
        }
        Self {
            prefix,
            dir: dir.into(),
        }
    }
}

/// Configuration for one demo server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Application name (used in logs).
    pub app_name: String,
    /// Listening port.
    pub port: u16,
    /// Optional static asset mount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_mount: Option<StaticMount>,
}

impl ServerConfig {
    /// Create a configuration with the demo default port.
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            port: 3000,
            static_mount: None,
        }
    }

    /// Set the listening port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Mount a static asset directory.
    pub fn with_static_mount(mut self, prefix: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        self.static_mount = Some(StaticMount::new(prefix, dir));
        self
    }

    /// Socket address to bind.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ServerConfig::new("demo");
        assert_eq!(config.app_name, "demo");
        assert_eq!(config.port, 3000);
        assert!(config.static_mount.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = ServerConfig::new("demo")
            .with_port(5173)
            .with_static_mount("/static", "public");

        assert_eq!(config.addr().port(), 5173);
        let mount = config.static_mount.unwrap();
        assert_eq!(mount.prefix, "/static");
        assert_eq!(mount.dir, PathBuf::from("public"));
    }

    #[test]
    fn test_mount_prefix_normalization() {
        assert_eq!(StaticMount::new("static", "public").prefix, "/static");
        assert_eq!(StaticMount::new("/static/", "public").prefix, "/static");
    }
}

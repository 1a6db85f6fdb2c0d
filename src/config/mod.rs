// Configuration module entry point
// Loads layered configuration and holds runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::Config;

/// Prefix for environment overrides, e.g. `CURRENCY__SERVER__PORT=9090`
const ENV_PREFIX: &str = "CURRENCY";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("performance.shutdown_timeout", 10)?
            .set_default("http.server_name", "currency-server")?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::load_from("nonexistent-test-config").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.access_log_format, "combined");
        assert_eq!(config.http.max_body_size, 1_048_576);
        assert_eq!(config.performance.shutdown_timeout, 10);
        assert!(config.store.seed_file.is_none());
        assert_eq!(
            config.get_socket_addr().unwrap(),
            "127.0.0.1:8080".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 9191\n\n[http]\nserver_name = \"fx\"\n\n[store]\nseed_file = \"seed.toml\""
        )
        .unwrap();

        let config = Config::load_from(&file.path().display().to_string()).unwrap();
        assert_eq!(config.server.port, 9191);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.http.server_name, "fx");
        assert_eq!(config.store.seed_file.as_deref(), Some("seed.toml"));
    }

    #[test]
    fn test_invalid_address() {
        let mut config = Config::load_from("nonexistent-test-config").unwrap();
        config.server.host = "not an ip".to_string();
        assert!(config.get_socket_addr().is_err());
    }
}

use anyhow::Context;
use serde::Deserialize;

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_log_errors() -> bool {
    true
}

/// Runtime configuration.
///
/// Every ambient switch lives here and is read once at startup; nothing in
/// the dispatch path consults the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Address the listener binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Whether unhandled dispatch errors are reported through the terminal
    /// finalizer's logging hook.
    #[serde(default = "default_log_errors")]
    pub log_errors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            log_errors: default_log_errors(),
        }
    }
}

impl Config {
    /// Loads configuration from the YAML file named by `RELAY_CONFIG`,
    /// falling back to defaults when the variable is unset. A `LISTEN`
    /// env var overrides the bind address either way.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var("RELAY_CONFIG") {
            Ok(path) => {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading config file {}", path))?;
                Self::from_yaml(&text)?
            }
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var("LISTEN") {
            cfg.listen_addr = addr;
        }

        Ok(cfg)
    }

    /// Parses a configuration document directly.
    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(text).context("parsing YAML config")
    }
}

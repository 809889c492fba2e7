use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Runtime configuration, loaded once at startup and never mutated.
///
/// Read from the YAML file named by the `STATICD_CONFIG` environment
/// variable (default `staticd.yaml`). A missing or unreadable file falls
/// back to the defaults below; every field may be omitted individually.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the listening socket binds to.
    pub listen_addr: String,
    /// Document root all servable resources live under.
    pub root_dir: PathBuf,
    /// Root-relative targets denied regardless of existence,
    /// e.g. `/admin.html`.
    pub forbidden: Vec<String>,
    /// Seconds a connection may sit idle before it is dropped. Also the
    /// value advertised in the `Keep-Alive` response header.
    pub idle_timeout_secs: u64,
    /// Bytes received per read-readiness signal.
    pub recv_buffer_size: usize,
    /// Bodies larger than this many bytes are streamed from disk in
    /// chunks of this size instead of materialized in memory.
    pub chunk_size: usize,
    /// Log connection lifecycle detail in addition to request lines.
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            root_dir: PathBuf::from("webroot"),
            forbidden: Vec::new(),
            idle_timeout_secs: 5,
            recv_buffer_size: 1024,
            chunk_size: 1024,
            verbose: false,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let path = std::env::var("STATICD_CONFIG")
            .unwrap_or_else(|_| "staticd.yaml".to_string());

        match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_yaml::from_str(&raw) {
                Ok(cfg) => cfg,
                Err(err) => {
                    eprintln!("ignoring malformed config {path}: {err}");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn forbidden_set(&self) -> HashSet<String> {
        self.forbidden.iter().cloned().collect()
    }
}

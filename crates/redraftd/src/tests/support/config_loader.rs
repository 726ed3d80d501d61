//! Configuration loaders for success and failure paths.

use std::ffi::OsString;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use tempfile::TempDir;

use redraft_config::{Config, SocketEndpoint};

use crate::bootstrap::ConfigLoader;

/// Places the daemon socket inside a temporary directory.
pub(crate) struct TestConfigLoader {
    dir: TempDir,
    max_attempts: u32,
}

impl TestConfigLoader {
    pub(crate) fn new() -> Self {
        Self {
            dir: TempDir::new().expect("socket directory"),
            max_attempts: Config::default().max_attempts(),
        }
    }

    pub(crate) const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub(crate) fn socket_path(&self) -> String {
        self.dir
            .path()
            .join("run")
            .join("redraftd.sock")
            .to_str()
            .expect("utf8 socket path")
            .to_owned()
    }
}

impl ConfigLoader for TestConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(Config {
            daemon_socket: SocketEndpoint::unix(self.socket_path()),
            max_attempts: self.max_attempts,
            ..Config::default()
        })
    }
}

/// Fails by handing the loader an unsupported socket scheme.
pub(crate) struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("redraftd"),
            OsString::from("--daemon-socket"),
            OsString::from("invalid://socket"),
        ];
        Config::load_from_iter(args)
    }
}

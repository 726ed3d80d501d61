//! Scenario world for bootstrap and dispatch behaviour.

use std::cell::RefCell;
use std::str::FromStr;

use serde_json::Value;

use redraft_providers::ScriptedReply;

use crate::bootstrap::{BootstrapError, ConfigLoader, Daemon, bootstrap_with};
use crate::dispatch::{ApiRequest, ApiResponse};

use super::config_loader::{FailingConfigLoader, TestConfigLoader};
use super::providers::ScriptedProviderFactory;
use super::reporter::RecordingHealthReporter;

/// A quoted string value from a Gherkin feature file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct QuotedString(pub(crate) String);

impl FromStr for QuotedString {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim_matches('"').to_owned()))
    }
}

pub(crate) struct TestWorld {
    loader: Box<dyn ConfigLoader>,
    socket_path: Option<String>,
    pub(crate) providers: ScriptedProviderFactory,
    pub(crate) reporter: RecordingHealthReporter,
    daemon: Option<Daemon>,
    bootstrap_error: Option<BootstrapError>,
    response: Option<ApiResponse>,
}

impl TestWorld {
    fn new() -> Self {
        let loader = TestConfigLoader::new();
        Self {
            socket_path: Some(loader.socket_path()),
            loader: Box::new(loader),
            providers: ScriptedProviderFactory::new([]),
            reporter: RecordingHealthReporter::default(),
            daemon: None,
            bootstrap_error: None,
            response: None,
        }
    }

    pub(crate) fn use_failing_loader(&mut self) {
        self.loader = Box::new(FailingConfigLoader);
        self.socket_path = None;
    }

    pub(crate) fn use_successful_loader(&mut self) {
        self.install(TestConfigLoader::new());
    }

    pub(crate) fn limit_attempts(&mut self, max_attempts: u32) {
        self.install(TestConfigLoader::new().with_max_attempts(max_attempts));
    }

    fn install(&mut self, loader: TestConfigLoader) {
        self.socket_path = Some(loader.socket_path());
        self.loader = Box::new(loader);
    }

    pub(crate) fn script(&mut self, replies: impl IntoIterator<Item = ScriptedReply>) {
        self.providers = ScriptedProviderFactory::new(replies);
    }

    pub(crate) fn bootstrap(&mut self) {
        match bootstrap_with(self.loader.as_ref(), &self.reporter, &self.providers) {
            Ok(daemon) => self.daemon = Some(daemon),
            Err(error) => self.bootstrap_error = Some(error),
        }
    }

    pub(crate) const fn daemon(&self) -> Option<&Daemon> {
        self.daemon.as_ref()
    }

    pub(crate) const fn bootstrap_error(&self) -> Option<&BootstrapError> {
        self.bootstrap_error.as_ref()
    }

    pub(crate) fn socket_path(&self) -> Option<&str> {
        self.socket_path.as_deref()
    }

    /// Sends one raw request line through the router.
    pub(crate) fn send(&mut self, line: &str) {
        if self.daemon.is_none() {
            self.bootstrap();
        }
        let daemon = self.daemon.as_ref().expect("daemon bootstrapped");
        let response = ApiRequest::parse(line.as_bytes())
            .and_then(|request| daemon.router().route(request))
            .unwrap_or_else(|error| ApiResponse::from_error(&error));
        self.response = Some(response);
    }

    pub(crate) const fn response(&self) -> &ApiResponse {
        self.response.as_ref().expect("a response was recorded")
    }

    pub(crate) const fn body(&self) -> &Value {
        self.response().body()
    }
}

pub(crate) fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::new())
}

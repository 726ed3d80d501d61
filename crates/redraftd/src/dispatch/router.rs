//! Path and method routing.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use redraft_core::{MetricsEngine, RevisionRequest};
use redraft_providers::RewriteProvider;

use crate::revision::{Orchestrator, RevisionOutcome};

use super::errors::DispatchError;
use super::request::ApiRequest;
use super::response::ApiResponse;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

const ALLOWED_METHOD: &str = "POST";

/// Known routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `POST /revise`
    Revise,
    /// `POST /metrics`
    Metrics,
}

impl Route {
    /// Resolves a path.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownPath`] for any other path.
    pub fn parse(path: &str) -> Result<Self, DispatchError> {
        match path.trim_end_matches('/') {
            "/revise" => Ok(Self::Revise),
            "/metrics" => Ok(Self::Metrics),
            _ => Err(DispatchError::unknown_path(path)),
        }
    }

    /// Canonical path.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Revise => "/revise",
            Self::Metrics => "/metrics",
        }
    }
}

#[derive(Debug, Deserialize)]
struct MetricsPayload {
    text: String,
}

/// Routes parsed requests to the orchestrator or the metrics engine.
pub struct ApiRouter {
    orchestrator: Orchestrator<Arc<dyn RewriteProvider>>,
    metrics: MetricsEngine,
}

impl ApiRouter {
    /// Creates a router around `orchestrator`.
    #[must_use]
    pub fn new(orchestrator: Orchestrator<Arc<dyn RewriteProvider>>) -> Self {
        Self {
            orchestrator,
            metrics: MetricsEngine::default(),
        }
    }

    /// Serves one request.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] for routing, validation, and revision
    /// failures; its [`DispatchError::status`] gives the response status.
    pub fn route(&self, request: ApiRequest) -> Result<ApiResponse, DispatchError> {
        let route = Route::parse(request.path())?;
        if !request.method().eq_ignore_ascii_case(ALLOWED_METHOD) {
            return Err(DispatchError::method_not_allowed(
                request.method(),
                route.as_str(),
            ));
        }
        debug!(target: DISPATCH_TARGET, route = route.as_str(), "routing request");

        match route {
            Route::Revise => self.revise(request.into_body()),
            Route::Metrics => self.metrics(request.into_body()),
        }
    }

    fn revise(&self, body: Value) -> Result<ApiResponse, DispatchError> {
        let request: RevisionRequest = parse_body(body)?;
        request
            .validate()
            .map_err(|error| DispatchError::invalid_payload(error.to_string()))?;

        match self.orchestrator.revise(&request)? {
            RevisionOutcome::Revised(result) => Ok(ApiResponse::ok(to_value(&*result)?)),
            RevisionOutcome::Denied(_) => Ok(ApiResponse::refusal()),
        }
    }

    fn metrics(&self, body: Value) -> Result<ApiResponse, DispatchError> {
        let payload: MetricsPayload = parse_body(body)?;
        if payload.text.trim().is_empty() {
            return Err(DispatchError::invalid_payload("text must not be empty"));
        }
        let result = self.metrics.analyze(&payload.text);
        Ok(ApiResponse::ok(to_value(&result)?))
    }
}

fn parse_body<T: serde::de::DeserializeOwned>(body: Value) -> Result<T, DispatchError> {
    if body.is_null() {
        return Err(DispatchError::invalid_payload("request body is missing"));
    }
    serde_json::from_value(body).map_err(|error| DispatchError::invalid_payload(error.to_string()))
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, DispatchError> {
    serde_json::to_value(value).map_err(DispatchError::SerializeResponse)
}

// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking the Kubernetes API, the Rollout watch and the freeze gateway.

use crate::error::{FreezerError, GatewayError, Result};
use crate::freeze::{FreezeGateway, FreezeRequest};
use crate::kubernetes::{EventSource, Subscription};
use crate::types::{RolloutEvent, RolloutPhase, RolloutSnapshot};
use futures::channel::mpsc;
use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A mock HTTP service that returns predefined responses based on request paths.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(("GET".to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    /// Every request seen so far as `METHOD path?query`
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        self.responses
            .lock()
            .unwrap()
            .get(&(method.to_string(), path.to_string()))
            .cloned()
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = Pin<
        Box<dyn Future<Output = std::result::Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let path_and_query = req
            .uri()
            .path_and_query()
            .map(|p| p.as_str().to_string())
            .unwrap_or_else(|| path.clone());
        self.requests
            .lock()
            .unwrap()
            .push(format!("{} {}", method, path_and_query));

        let response = self.find_response(&method, &path);

        Box::pin(async move {
            let (status, body) = response.unwrap_or_else(|| (404, not_found_json(&path)));
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// A 404 Status object
pub fn not_found_json(path: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("the server could not find the requested resource ({})", path),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}

/// A 401 Status object, as served for a rejected bearer token
pub fn unauthorized_json() -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": "Unauthorized",
        "reason": "Unauthorized",
        "code": 401
    })
    .to_string()
}

/// A Rollout object as served by the API
pub fn rollout_json(
    namespace: &str,
    name: &str,
    repository: Option<&str>,
    phase: &str,
) -> serde_json::Value {
    let annotations = match repository {
        Some(repository) => serde_json::json!({ "repository": repository }),
        None => serde_json::json!({}),
    };
    serde_json::json!({
        "apiVersion": "argoproj.io/v1alpha1",
        "kind": "Rollout",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "resourceVersion": "1",
            "annotations": annotations
        },
        "spec": { "replicas": 1 },
        "status": { "phase": phase }
    })
}

/// A newline-delimited watch response body
pub fn watch_body(events: &[(&str, serde_json::Value)]) -> String {
    events
        .iter()
        .map(|(kind, object)| {
            format!("{}\n", serde_json::json!({ "type": kind, "object": object }))
        })
        .collect()
}

/// A snapshot for feeding the reconcile loop directly
pub fn snapshot(name: &str, repository: Option<&str>, phase: RolloutPhase) -> RolloutSnapshot {
    let mut annotations = BTreeMap::new();
    if let Some(repository) = repository {
        annotations.insert("repository".to_string(), repository.to_string());
    }
    RolloutSnapshot {
        name: name.to_string(),
        namespace: Some("default".to_string()),
        annotations,
        phase,
    }
}

/// Event source backed by a channel the test keeps feeding
pub struct FakeEventSource {
    events: Mutex<Option<mpsc::UnboundedReceiver<Result<RolloutEvent>>>>,
    fail_watch: bool,
    stops: Arc<AtomicUsize>,
}

impl FakeEventSource {
    pub fn new() -> (Self, mpsc::UnboundedSender<Result<RolloutEvent>>) {
        let (tx, rx) = mpsc::unbounded();
        let source = Self {
            events: Mutex::new(Some(rx)),
            fail_watch: false,
            stops: Arc::new(AtomicUsize::new(0)),
        };
        (source, tx)
    }

    /// A source whose subscription ends after the given events
    pub fn with_events(events: Vec<RolloutEvent>) -> Self {
        let (source, tx) = Self::new();
        for event in events {
            tx.unbounded_send(Ok(event)).unwrap();
        }
        source
    }

    /// A source whose subscription is rejected with 401 Unauthorized
    pub fn failing() -> Self {
        let (mut source, _) = Self::new();
        source.fail_watch = true;
        source
    }

    /// How often a subscription handed out by this source was stopped
    pub fn stop_count(&self) -> Arc<AtomicUsize> {
        self.stops.clone()
    }
}

impl EventSource for FakeEventSource {
    async fn watch(&self) -> Result<Subscription> {
        if self.fail_watch {
            return Err(FreezerError::KubeError(kube::Error::Api(
                kube::core::ErrorResponse {
                    status: "Failure".to_string(),
                    message: "Unauthorized".to_string(),
                    reason: "Unauthorized".to_string(),
                    code: 401,
                },
            )));
        }
        let events = self
            .events
            .lock()
            .unwrap()
            .take()
            .expect("FakeEventSource supports a single subscription");
        let stops = self.stops.clone();
        Ok(Subscription::new(events).on_stop(move || {
            stops.fetch_add(1, Ordering::SeqCst);
        }))
    }
}

/// Gateway that records every request, optionally failing for one repository
#[derive(Clone, Default)]
pub struct RecordingGateway {
    calls: Arc<Mutex<Vec<FreezeRequest>>>,
    fail_for: Option<String>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(repository: &str) -> Self {
        Self {
            fail_for: Some(repository.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<FreezeRequest> {
        self.calls.lock().unwrap().clone()
    }
}

impl FreezeGateway for RecordingGateway {
    async fn set_freeze(&self, request: &FreezeRequest) -> std::result::Result<(), GatewayError> {
        self.calls.lock().unwrap().push(request.clone());
        if self.fail_for.as_deref() == Some(request.repository.as_str()) {
            return Err(GatewayError::BadStatus("500 Internal Server Error".to_string()));
        }
        Ok(())
    }
}

//! Backend access for route requests.
//!
//! `RouteBackend` is the seam between the view core and the network:
//! - `HttpBackend` talks to the deployed service over reqwest
//! - `InMemoryBackend` serves canned responses (fixtures, tests)

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::RouteError;
use crate::protocol::{FindRouteRequest, FindRouteResponse, Priority, Route, RoutePriority};

/// Type alias for a boxed future that can be sent between threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Source of routes for a `(source, destination, priority)` query.
///
/// Methods return boxed futures for dyn-compatibility.
pub trait RouteBackend: Send + Sync {
    fn find_route(&self, request: FindRouteRequest) -> BoxFuture<'_, Result<Route, RouteError>>;
}

pub struct HttpBackend {
    config: ClientConfig,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> Result<Self, RouteError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .map_err(|e| RouteError::Transport(e.to_string()))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl RouteBackend for HttpBackend {
    fn find_route(&self, request: FindRouteRequest) -> BoxFuture<'_, Result<Route, RouteError>> {
        let url = self.config.find_route_url();
        Box::pin(async move {
            debug!(%url, priority = %request.priority, "requesting route");
            let resp = self
                .client
                .post(&url)
                .json(&request)
                .send()
                .await
                .map_err(|e| {
                    warn!(priority = %request.priority, "route request failed: {e}");
                    RouteError::Transport(e.to_string())
                })?;

            let status = resp.status().as_u16();
            let body = resp
                .bytes()
                .await
                .map_err(|e| RouteError::Transport(e.to_string()))?;
            decode_response(status, &body)
        })
    }
}

/// Maps an HTTP status and body onto the route/error taxonomy.
///
/// A non-2xx answer that still carries `{success: false, error}` keeps the
/// backend's message; anything else non-2xx is reported by status.
pub fn decode_response(status: u16, body: &[u8]) -> Result<Route, RouteError> {
    let success_status = (200..300).contains(&status);
    match serde_json::from_slice::<FindRouteResponse>(body) {
        Ok(envelope) if success_status => envelope.into_result(),
        Ok(envelope) => match envelope.into_result() {
            Err(err @ RouteError::Backend(_)) => Err(err),
            _ => Err(RouteError::Status { status }),
        },
        Err(err) if success_status => Err(RouteError::Malformed(err.to_string())),
        Err(_) => Err(RouteError::Status { status }),
    }
}

/// Canned backend keyed by priority.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    responses: HashMap<Priority, Result<Route, RouteError>>,
    delays: HashMap<Priority, Duration>,
    calls: AtomicUsize,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, priority: Priority, result: Result<Route, RouteError>) -> Self {
        self.responses.insert(priority, result);
        self
    }

    /// Serves `route` for every priority, re-labelled with the priority asked for.
    pub fn with_route_for_all(mut self, route: Route) -> Self {
        for priority in Priority::ALL {
            let mut r = route.clone();
            r.priority = RoutePriority::Known(priority);
            self.responses.insert(priority, Ok(r));
        }
        self
    }

    /// Holds the answer for `priority` back by `delay`.
    pub fn with_delay(mut self, priority: Priority, delay: Duration) -> Self {
        self.delays.insert(priority, delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RouteBackend for InMemoryBackend {
    fn find_route(&self, request: FindRouteRequest) -> BoxFuture<'_, Result<Route, RouteError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = self
            .responses
            .get(&request.priority)
            .cloned()
            .unwrap_or_else(|| {
                Err(RouteError::Backend(format!(
                    "no route for priority {}",
                    request.priority
                )))
            });
        let delay = self.delays.get(&request.priority).copied();
        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Location;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn route(priority: Priority) -> Route {
        Route {
            source: Location::new(22.57, 88.36, "A"),
            destination: Location::new(22.52, 88.33, "B"),
            coordinates: vec![[88.36, 22.57], [88.33, 22.52]],
            distance_km: 7.4,
            duration_min: 21.0,
            average_aqi: 88.0,
            priority: priority.into(),
            aqi_data: Vec::new(),
        }
    }

    #[test]
    fn decodes_success_envelope() {
        let body = serde_json::to_vec(&FindRouteResponse {
            success: true,
            route: Some(route(Priority::Shortest)),
            error: None,
        })
        .unwrap();
        assert_eq!(decode_response(200, &body), Ok(route(Priority::Shortest)));
    }

    #[test]
    fn non_2xx_keeps_backend_message() {
        let body = serde_json::to_vec(&json!({
            "success": false,
            "error": "Could not geocode source address: Nowhere"
        }))
        .unwrap();
        assert_eq!(
            decode_response(400, &body),
            Err(RouteError::Backend(
                "Could not geocode source address: Nowhere".to_string()
            ))
        );
    }

    #[test]
    fn non_2xx_without_envelope_reports_status() {
        assert_eq!(
            decode_response(502, b"<html>Bad Gateway</html>"),
            Err(RouteError::Status { status: 502 })
        );
    }

    #[test]
    fn garbage_on_2xx_is_malformed() {
        assert!(matches!(
            decode_response(200, b"not json"),
            Err(RouteError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn in_memory_backend_counts_calls_and_relabels() {
        let backend = InMemoryBackend::new().with_route_for_all(route(Priority::Shortest));
        let got = backend
            .find_route(FindRouteRequest::new("A", "B", Priority::O3))
            .await
            .unwrap();
        assert_eq!(got.priority, RoutePriority::Known(Priority::O3));
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn in_memory_backend_fails_unknown_priorities() {
        let backend = InMemoryBackend::new();
        let got = backend
            .find_route(FindRouteRequest::new("A", "B", Priority::Co))
            .await;
        assert!(matches!(got, Err(RouteError::Backend(_))));
    }
}

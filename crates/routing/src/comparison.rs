use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;
use tracing::{debug, info, warn};

use crate::client::RouteBackend;
use crate::error::{ComparisonError, RouteError};
use crate::protocol::{FindRouteRequest, Priority, Route};

/// Results of one "compare all" round, in fixed priority order.
#[derive(Debug)]
pub struct ComparisonOutcome {
    results: Vec<(Priority, Result<Route, RouteError>)>,
    arrival: Vec<Priority>,
}

impl ComparisonOutcome {
    /// Buffers results in whatever order they arrived and reorders them by
    /// [`Priority::rank`].
    pub fn from_arrivals(arrived: Vec<(Priority, Result<Route, RouteError>)>) -> Self {
        let arrival = arrived.iter().map(|(p, _)| *p).collect();
        let mut results = arrived;
        results.sort_by_key(|(p, _)| p.rank());
        Self { results, arrival }
    }

    pub fn results(&self) -> &[(Priority, Result<Route, RouteError>)] {
        &self.results
    }

    /// Order in which responses came back from the backend.
    pub fn arrival_order(&self) -> &[Priority] {
        &self.arrival
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|(_, r)| r.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    /// Keeps the successful routes; individual failures are logged and dropped.
    pub fn into_routes(self) -> Result<Vec<Route>, ComparisonError> {
        let attempted = self.results.len();
        let mut routes = Vec::with_capacity(attempted);
        for (priority, result) in self.results {
            match result {
                Ok(route) => routes.push(route),
                Err(err) => warn!(%priority, "dropping failed comparison route: {err}"),
            }
        }
        if routes.is_empty() {
            return Err(ComparisonError::NoRoutes { attempted });
        }
        Ok(routes)
    }
}

/// Requests one route per priority concurrently.
///
/// Completion order is not significant; the outcome is always in
/// [`Priority::ALL`] order.
pub async fn fetch_all<B>(backend: &B, source: &str, destination: &str) -> ComparisonOutcome
where
    B: RouteBackend + ?Sized,
{
    info!(source, destination, "fetching all route priorities");
    let mut in_flight: FuturesUnordered<_> = Priority::ALL
        .into_iter()
        .map(|priority| {
            let request = FindRouteRequest::new(source, destination, priority);
            async move { (priority, backend.find_route(request).await) }
        })
        .collect();

    let mut arrived = Vec::with_capacity(Priority::ALL.len());
    while let Some((priority, result)) = in_flight.next().await {
        match &result {
            Ok(route) => debug!(
                %priority,
                distance_km = route.distance_km,
                average_aqi = route.average_aqi,
                "comparison route arrived"
            ),
            Err(err) => debug!(%priority, "comparison route failed: {err}"),
        }
        arrived.push((priority, result));
    }

    let outcome = ComparisonOutcome::from_arrivals(arrived);
    info!(
        succeeded = outcome.succeeded(),
        failed = outcome.failed(),
        "comparison round complete"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::client::InMemoryBackend;
    use crate::protocol::{Location, RoutePriority};
    use pretty_assertions::assert_eq;

    fn route(priority: Priority) -> Route {
        Route {
            source: Location::new(22.57, 88.36, "A"),
            destination: Location::new(22.52, 88.33, "B"),
            coordinates: vec![[88.36, 22.57], [88.33, 22.52]],
            distance_km: 7.0 + priority.rank() as f64,
            duration_min: 20.0,
            average_aqi: 90.0,
            priority: priority.into(),
            aqi_data: Vec::new(),
        }
    }

    fn priorities(routes: &[Route]) -> Vec<RoutePriority> {
        routes.iter().map(|r| r.priority.clone()).collect()
    }

    #[tokio::test]
    async fn results_follow_fixed_order_not_arrival_order() {
        let backend = InMemoryBackend::new()
            .with_response(Priority::Shortest, Ok(route(Priority::Shortest)))
            .with_response(Priority::Balanced, Ok(route(Priority::Balanced)))
            .with_delay(Priority::Shortest, Duration::from_millis(40));

        let outcome = fetch_all(&backend, "A", "B").await;
        assert_eq!(backend.calls(), 8);
        assert_eq!(outcome.arrival_order().last(), Some(&Priority::Shortest));

        let order: Vec<Priority> = outcome.results().iter().map(|(p, _)| *p).collect();
        assert_eq!(order, Priority::ALL.to_vec());

        let routes = outcome.into_routes().unwrap();
        assert_eq!(
            priorities(&routes),
            vec![Priority::Shortest.into(), Priority::Balanced.into()]
        );
    }

    #[tokio::test]
    async fn partial_failures_are_dropped() {
        let mut backend = InMemoryBackend::new();
        for p in [Priority::Cleanest, Priority::Co, Priority::So2] {
            backend = backend.with_response(p, Ok(route(p)));
        }
        backend = backend.with_response(
            Priority::Pm25,
            Err(RouteError::Transport("connection reset".to_string())),
        );

        let outcome = fetch_all(&backend, "A", "B").await;
        assert_eq!(outcome.succeeded(), 3);
        assert_eq!(outcome.failed(), 5);
        let routes = outcome.into_routes().unwrap();
        assert_eq!(
            priorities(&routes),
            vec![
                Priority::Cleanest.into(),
                Priority::Co.into(),
                Priority::So2.into()
            ]
        );
    }

    #[tokio::test]
    async fn all_failures_are_an_aggregate_error() {
        let backend = InMemoryBackend::new();
        let outcome = fetch_all(&backend, "A", "B").await;
        assert_eq!(
            outcome.into_routes(),
            Err(ComparisonError::NoRoutes { attempted: 8 })
        );
    }

    #[test]
    fn pollutant_priorities_carry_pollutant_type() {
        let requests: Vec<FindRouteRequest> = Priority::ALL
            .into_iter()
            .map(|p| FindRouteRequest::new("A", "B", p))
            .collect();
        let with_type: Vec<Priority> = requests
            .iter()
            .filter(|r| r.pollutant_type.is_some())
            .map(|r| r.priority)
            .collect();
        assert_eq!(
            with_type,
            vec![
                Priority::Pm25,
                Priority::Pm10,
                Priority::Co,
                Priority::O3,
                Priority::So2
            ]
        );
    }
}

use std::sync::Arc;

use routing::{RouteBackend, fetch_all};
use tracing::debug;

use crate::controller::Viewer;
use crate::event::{FetchPlan, Reaction, UiEvent};

/// Drives a [`Viewer`] against a backend, running each fetch plan to
/// completion before returning.
pub struct Session<B: RouteBackend + ?Sized> {
    viewer: Viewer,
    backend: Arc<B>,
}

impl<B: RouteBackend + ?Sized> Session<B> {
    pub fn new(viewer: Viewer, backend: Arc<B>) -> Self {
        Self { viewer, backend }
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Handles `event` and, if it issued a request, the request's completion.
    /// The returned reaction carries the commands of both steps.
    pub async fn dispatch(&mut self, event: UiEvent) -> Reaction {
        let reaction = self.viewer.handle(event);
        let Some(plan) = reaction.fetch.clone() else {
            return reaction;
        };
        let completion = self.run(plan).await;
        reaction.chain(completion)
    }

    async fn run(&mut self, plan: FetchPlan) -> Reaction {
        match plan {
            FetchPlan::Single { ticket, request } => {
                debug!(priority = %request.priority, "fetching single route");
                let result = self.backend.find_route(request).await;
                self.viewer.complete_single(ticket, result)
            }
            FetchPlan::Comparison {
                ticket,
                source,
                destination,
            } => {
                let outcome = fetch_all(self.backend.as_ref(), &source, &destination).await;
                self.viewer.complete_comparison(ticket, outcome)
            }
        }
    }
}

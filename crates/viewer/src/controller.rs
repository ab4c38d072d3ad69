use routing::{ComparisonOutcome, FindRouteRequest, Priority, Route, RouteError};
use scene::MapSurface;
use tracing::{debug, info, warn};

use crate::commands::{CommandBuffer, RenderCommand};
use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::event::{FetchPlan, Outcome, Reaction, RequestTicket, UiEvent};
use crate::map::MapRenderer;
use crate::state::{ViewMode, ViewState};

/// Current contents of the address fields and the priority selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub source: String,
    pub destination: String,
    pub priority: Priority,
}

impl FormState {
    pub fn is_complete(&self) -> bool {
        !self.source.trim().is_empty() && !self.destination.trim().is_empty()
    }

    /// Returns the trimmed addresses.
    pub fn validate(&self) -> Result<(String, String), ViewerError> {
        if !self.is_complete() {
            return Err(ViewerError::Validation);
        }
        Ok((
            self.source.trim().to_string(),
            self.destination.trim().to_string(),
        ))
    }
}

/// Root of the route viewer: view state, map surface model and form input.
#[derive(Debug)]
pub struct Viewer {
    config: ViewerConfig,
    map: MapRenderer,
    surface: MapSurface,
    state: ViewState,
    form: FormState,
    in_flight: usize,
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            map: MapRenderer::new(&config),
            config,
            surface: MapSurface::new(),
            state: ViewState::new(),
            form: FormState::default(),
            in_flight: 0,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn surface(&self) -> &MapSurface {
        &self.surface
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Requests issued and not yet completed.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn handle(&mut self, event: UiEvent) -> Reaction {
        match event {
            UiEvent::SourceChanged(source) => {
                self.form.source = source;
                Reaction::unchanged()
            }
            UiEvent::DestinationChanged(destination) => {
                self.form.destination = destination;
                Reaction::unchanged()
            }
            UiEvent::PriorityChanged(priority) => {
                self.form.priority = priority;
                if self.form.is_complete() {
                    self.find_route()
                } else {
                    Reaction::unchanged()
                }
            }
            UiEvent::InputSubmitted | UiEvent::FindRouteClicked => self.find_route(),
            UiEvent::CompareAllClicked => self.compare_all(),
            UiEvent::CheckpointRowClicked(index) => self.on_row_clicked(index),
            UiEvent::CheckpointMarkerClicked(index) => self.on_marker_clicked(index),
            UiEvent::Reset => self.reset(),
        }
    }

    pub fn find_route(&mut self) -> Reaction {
        let mut out = CommandBuffer::new();
        let (source, destination) = match self.form.validate() {
            Ok(addresses) => addresses,
            Err(err) => return fail(out, err),
        };

        let ticket = self.issue(&mut out);
        let priority = self.form.priority;
        info!(%source, %destination, %priority, "requesting route");
        let request = FindRouteRequest::new(source, destination, priority);
        react(out, Some(FetchPlan::Single { ticket, request }), Outcome::Pending)
    }

    pub fn compare_all(&mut self) -> Reaction {
        let mut out = CommandBuffer::new();
        let (source, destination) = match self.form.validate() {
            Ok(addresses) => addresses,
            Err(err) => return fail(out, err),
        };

        let ticket = self.issue(&mut out);
        info!(%source, %destination, "requesting route comparison");
        react(
            out,
            Some(FetchPlan::Comparison {
                ticket,
                source,
                destination,
            }),
            Outcome::Pending,
        )
    }

    /// Applies the result of a single-route fetch.
    pub fn complete_single(
        &mut self,
        ticket: RequestTicket,
        result: Result<Route, RouteError>,
    ) -> Reaction {
        let mut out = CommandBuffer::new();
        self.end_loading(&mut out);

        if !self.state.is_current(ticket.epoch()) {
            debug!(epoch = ticket.epoch().value(), "discarding stale route result");
            return react(out, None, Outcome::Discarded);
        }

        match result {
            Ok(route) => {
                self.state
                    .enter_single(route, &self.map, &mut self.surface, &mut out);
                react(out, None, Outcome::Applied)
            }
            Err(err) => {
                warn!("route request failed: {err}");
                fail(out, err.into())
            }
        }
    }

    /// Applies the buffered results of a compare-all round.
    pub fn complete_comparison(
        &mut self,
        ticket: RequestTicket,
        outcome: ComparisonOutcome,
    ) -> Reaction {
        let mut out = CommandBuffer::new();
        self.end_loading(&mut out);

        if !self.state.is_current(ticket.epoch()) {
            debug!(
                epoch = ticket.epoch().value(),
                "discarding stale comparison result"
            );
            return react(out, None, Outcome::Discarded);
        }

        let applied = outcome
            .into_routes()
            .map_err(ViewerError::from)
            .and_then(|routes| {
                self.state
                    .enter_comparison(routes, &self.map, &mut self.surface, &mut out)
            });
        match applied {
            Ok(()) => react(out, None, Outcome::Applied),
            Err(err) => {
                warn!("route comparison failed: {err}");
                fail(out, err)
            }
        }
    }

    /// Clears the map and panels. Outstanding requests become stale.
    pub fn reset(&mut self) -> Reaction {
        let mut out = CommandBuffer::new();
        self.state.reset(&self.map, &mut self.surface, &mut out);
        react(out, None, Outcome::Applied)
    }

    fn on_row_clicked(&mut self, index: usize) -> Reaction {
        if self.state.mode() != ViewMode::Single {
            return Reaction::unchanged();
        }
        let Some(id) = self.state.primitives().checkpoint_marker(index) else {
            debug!(index, "no checkpoint marker for row");
            return Reaction::unchanged();
        };
        let Some(center) = self
            .state
            .active_route()
            .and_then(|route| route.aqi_data.get(index))
            .and_then(|checkpoint| checkpoint.location.as_ref())
            .map(|location| location.position())
        else {
            return Reaction::unchanged();
        };

        let mut out = CommandBuffer::new();
        self.state.selection_mut().select(index);
        out.emit(RenderCommand::FlyTo {
            center,
            zoom: self.config.fly_to_zoom,
        });
        out.emit(RenderCommand::HighlightRow { index });
        out.emit(RenderCommand::OpenPopup { id });
        react(out, None, Outcome::Applied)
    }

    fn on_marker_clicked(&mut self, index: usize) -> Reaction {
        if self.state.primitives().checkpoint_marker(index).is_none() {
            return Reaction::unchanged();
        }
        let mut out = CommandBuffer::new();
        self.state.selection_mut().select(index);
        out.emit(RenderCommand::HighlightRow { index });
        out.emit(RenderCommand::ScrollRowIntoView { index });
        react(out, None, Outcome::Applied)
    }

    fn issue(&mut self, out: &mut CommandBuffer) -> RequestTicket {
        let epoch = self.state.supersede();
        if self.in_flight == 0 {
            out.emit(RenderCommand::SetLoading { visible: true });
        }
        self.in_flight += 1;
        RequestTicket::new(epoch)
    }

    fn end_loading(&mut self, out: &mut CommandBuffer) {
        if self.in_flight == 0 {
            warn!("completion without an outstanding request");
            return;
        }
        self.in_flight -= 1;
        if self.in_flight == 0 {
            out.emit(RenderCommand::SetLoading { visible: false });
        }
    }
}

fn fail(mut out: CommandBuffer, err: ViewerError) -> Reaction {
    out.emit(RenderCommand::Alert {
        message: err.user_message(),
    });
    react(out, None, Outcome::Failed(err))
}

fn react(mut out: CommandBuffer, fetch: Option<FetchPlan>, outcome: Outcome) -> Reaction {
    Reaction {
        commands: out.drain(),
        fetch,
        outcome,
    }
}

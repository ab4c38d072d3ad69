use foundation::ids::Epoch;
use routing::{FindRouteRequest, Priority};

use crate::commands::RenderCommand;
use crate::error::ViewerError;

/// Input from the host UI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    SourceChanged(String),
    DestinationChanged(String),
    PriorityChanged(Priority),
    /// Enter pressed in either address field.
    InputSubmitted,
    FindRouteClicked,
    CompareAllClicked,
    CheckpointRowClicked(usize),
    CheckpointMarkerClicked(usize),
    Reset,
}

/// Correlates a backend completion with the request that produced it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    epoch: Epoch,
}

impl RequestTicket {
    pub(crate) fn new(epoch: Epoch) -> Self {
        Self { epoch }
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }
}

/// Work the host must perform before calling back into the viewer.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchPlan {
    Single {
        ticket: RequestTicket,
        request: FindRouteRequest,
    },
    /// One request per priority, see `routing::fetch_all`.
    Comparison {
        ticket: RequestTicket,
        source: String,
        destination: String,
    },
}

impl FetchPlan {
    pub fn ticket(&self) -> RequestTicket {
        match self {
            FetchPlan::Single { ticket, .. } | FetchPlan::Comparison { ticket, .. } => *ticket,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing to do for this event in the current state.
    Unchanged,
    /// A fetch was issued; the view changes when it completes.
    Pending,
    Applied,
    /// The completion belonged to a superseded request.
    Discarded,
    Failed(ViewerError),
}

/// Everything produced by one call into the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    pub commands: Vec<RenderCommand>,
    pub fetch: Option<FetchPlan>,
    pub outcome: Outcome,
}

impl Reaction {
    pub fn unchanged() -> Self {
        Self {
            commands: Vec::new(),
            fetch: None,
            outcome: Outcome::Unchanged,
        }
    }

    /// Appends `next` after this reaction. The later outcome and fetch win.
    pub fn chain(mut self, next: Reaction) -> Reaction {
        self.commands.extend(next.commands);
        Reaction {
            commands: self.commands,
            fetch: next.fetch,
            outcome: next.outcome,
        }
    }
}

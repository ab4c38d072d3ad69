use foundation::ids::Epoch;
use routing::Route;
use scene::MapSurface;
use scene::entity::PrimitiveId;
use scene::selection::CheckpointSelection;
use tracing::debug;

use crate::commands::CommandBuffer;
use crate::error::ViewerError;
use crate::map::MapRenderer;
use crate::panel;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Idle,
    Single,
    Comparison,
}

/// A checkpoint circle and the `aqi_data` index it was drawn from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CheckpointMarker {
    pub index: usize,
    pub id: PrimitiveId,
}

/// Every primitive the viewer currently has on the map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedPrimitives {
    pub source_marker: Option<PrimitiveId>,
    pub dest_marker: Option<PrimitiveId>,
    pub route_lines: Vec<PrimitiveId>,
    pub checkpoint_markers: Vec<CheckpointMarker>,
}

impl RenderedPrimitives {
    pub fn len(&self) -> usize {
        usize::from(self.source_marker.is_some())
            + usize::from(self.dest_marker.is_some())
            + self.route_lines.len()
            + self.checkpoint_markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ids(&self) -> Vec<PrimitiveId> {
        self.source_marker
            .into_iter()
            .chain(self.dest_marker)
            .chain(self.route_lines.iter().copied())
            .chain(self.checkpoint_markers.iter().map(|m| m.id))
            .collect()
    }

    pub fn checkpoint_marker(&self, index: usize) -> Option<PrimitiveId> {
        self.checkpoint_markers
            .iter()
            .find(|m| m.index == index)
            .map(|m| m.id)
    }
}

/// Which view is showing and what it put on the map.
///
/// Every transition tears the previous view down completely before drawing
/// the next one, so primitives never accumulate across views.
#[derive(Debug, Default)]
pub struct ViewState {
    mode: ViewMode,
    active_route: Option<Route>,
    comparison_routes: Vec<Route>,
    primitives: RenderedPrimitives,
    selection: CheckpointSelection,
    epoch: Epoch,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn active_route(&self) -> Option<&Route> {
        self.active_route.as_ref()
    }

    pub fn comparison_routes(&self) -> &[Route] {
        &self.comparison_routes
    }

    pub fn primitives(&self) -> &RenderedPrimitives {
        &self.primitives
    }

    pub fn selection(&self) -> &CheckpointSelection {
        &self.selection
    }

    pub(crate) fn selection_mut(&mut self) -> &mut CheckpointSelection {
        &mut self.selection
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Invalidates every request issued so far and returns the new epoch.
    pub fn supersede(&mut self) -> Epoch {
        self.epoch = self.epoch.next();
        self.epoch
    }

    pub fn is_current(&self, epoch: Epoch) -> bool {
        self.epoch == epoch
    }

    pub fn enter_single(
        &mut self,
        route: Route,
        map: &MapRenderer,
        surface: &mut MapSurface,
        out: &mut CommandBuffer,
    ) {
        self.teardown(map, surface, out);
        self.primitives = map.draw_single(&route, surface, out);
        panel::show_single(&route, out);
        debug!(
            primitives = self.primitives.len(),
            checkpoints = self.primitives.checkpoint_markers.len(),
            "entered single-route view"
        );
        self.active_route = Some(route);
        self.mode = ViewMode::Single;
        self.epoch = self.epoch.next();
    }

    /// Fails without touching the current view when `routes` is empty.
    pub fn enter_comparison(
        &mut self,
        routes: Vec<Route>,
        map: &MapRenderer,
        surface: &mut MapSurface,
        out: &mut CommandBuffer,
    ) -> Result<(), ViewerError> {
        if routes.is_empty() {
            return Err(ViewerError::EmptyComparison);
        }
        self.teardown(map, surface, out);
        self.primitives = map.draw_comparison(&routes, surface, out);
        panel::show_comparison(&routes, out);
        debug!(
            routes = routes.len(),
            primitives = self.primitives.len(),
            "entered comparison view"
        );
        self.comparison_routes = routes;
        self.mode = ViewMode::Comparison;
        self.epoch = self.epoch.next();
        Ok(())
    }

    pub fn reset(&mut self, map: &MapRenderer, surface: &mut MapSurface, out: &mut CommandBuffer) {
        self.teardown(map, surface, out);
        self.mode = ViewMode::Idle;
        self.epoch = self.epoch.next();
    }

    fn teardown(&mut self, map: &MapRenderer, surface: &mut MapSurface, out: &mut CommandBuffer) {
        map.remove_all(&mut self.primitives, surface, out);
        panel::hide_all(out);
        self.active_route = None;
        self.comparison_routes.clear();
        self.selection.clear();
    }
}

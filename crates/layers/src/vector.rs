use foundation::bounds::GeoBounds;
use routing::Route;
use scene::components::{CircleMarker, PinIcon, PinMarker, Polyline, Popup};

use crate::labels::{checkpoint_popup, comparison_popup, endpoint_popup};
use crate::layer::{COMPARISON_ROUTE_LINE, CheckpointStyle, LineStyle, SINGLE_ROUTE_LINE};
use crate::symbology::{classify, priority_color};

/// Map primitives for one route, before they are placed on the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleRouteSnapshot {
    pub source: PinMarker,
    pub destination: PinMarker,
    pub line: Option<Polyline>,
    /// Keyed by index into `Route::aqi_data`.
    pub checkpoints: Vec<(usize, CircleMarker)>,
}

impl SingleRouteSnapshot {
    pub fn bounds(&self) -> Option<GeoBounds> {
        self.line.as_ref().and_then(Polyline::bounds)
    }
}

/// Map primitives for the comparison view: shared endpoints, one line per route.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSnapshot {
    pub source: PinMarker,
    pub destination: PinMarker,
    pub lines: Vec<Polyline>,
}

impl ComparisonSnapshot {
    pub fn bounds(&self) -> Option<GeoBounds> {
        self.lines
            .iter()
            .filter_map(Polyline::bounds)
            .reduce(|acc, b| acc.union(&b))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RouteLayer {
    pub checkpoint_style: CheckpointStyle,
}

impl RouteLayer {
    pub fn new(checkpoint_style: CheckpointStyle) -> Self {
        Self { checkpoint_style }
    }

    pub fn extract_single(&self, route: &Route) -> SingleRouteSnapshot {
        let (source, destination) = endpoint_markers(route);
        SingleRouteSnapshot {
            source,
            destination,
            line: route_line(
                route,
                classify(route.average_aqi).color,
                SINGLE_ROUTE_LINE,
                None,
            ),
            checkpoints: self.checkpoint_markers(route),
        }
    }

    /// Returns `None` when there is nothing to compare.
    pub fn extract_comparison(&self, routes: &[Route]) -> Option<ComparisonSnapshot> {
        let first = routes.first()?;
        let (source, destination) = endpoint_markers(first);
        let lines = routes
            .iter()
            .filter_map(|route| {
                route_line(
                    route,
                    priority_color(&route.priority),
                    COMPARISON_ROUTE_LINE,
                    Some(comparison_popup(route)),
                )
            })
            .collect();
        Some(ComparisonSnapshot {
            source,
            destination,
            lines,
        })
    }

    fn checkpoint_markers(&self, route: &Route) -> Vec<(usize, CircleMarker)> {
        let style = self.checkpoint_style;
        route
            .located_checkpoints()
            .map(|(index, checkpoint, location)| {
                let marker = CircleMarker {
                    center: location.position(),
                    radius_px: style.radius_px,
                    fill_color: classify(checkpoint.aqi).color,
                    fill_opacity: style.fill_opacity,
                    stroke_color: style.stroke_color,
                    stroke_weight: style.stroke_weight,
                    stroke_opacity: style.stroke_opacity,
                    popup: checkpoint_popup(index, checkpoint),
                };
                (index, marker)
            })
            .collect()
    }
}

fn endpoint_markers(route: &Route) -> (PinMarker, PinMarker) {
    let source = PinMarker::new(
        route.source.position(),
        PinIcon::Source,
        endpoint_popup(PinIcon::Source, &route.source),
    );
    let destination = PinMarker::new(
        route.destination.position(),
        PinIcon::Destination,
        endpoint_popup(PinIcon::Destination, &route.destination),
    );
    (source, destination)
}

/// An empty coordinate list yields no line rather than a degenerate one.
fn route_line(
    route: &Route,
    color: &'static str,
    style: LineStyle,
    popup: Option<Popup>,
) -> Option<Polyline> {
    if route.coordinates.is_empty() {
        return None;
    }
    Some(Polyline {
        path: route.path().collect(),
        color,
        weight: style.weight,
        opacity: style.opacity,
        popup,
    })
}

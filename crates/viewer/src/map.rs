//! Map renderer: turns route snapshots into primitives on the surface.

use foundation::bounds::GeoBounds;
use layers::vector::RouteLayer;
use routing::Route;
use scene::MapSurface;
use scene::components::Primitive;
use scene::entity::PrimitiveId;
use tracing::{debug, warn};

use crate::commands::{CommandBuffer, RenderCommand};
use crate::config::ViewerConfig;
use crate::state::{CheckpointMarker, RenderedPrimitives};

#[derive(Debug, Clone, Copy)]
pub struct MapRenderer {
    layer: RouteLayer,
    fit_padding: [u32; 2],
}

impl MapRenderer {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            layer: RouteLayer::new(config.checkpoint_style),
            fit_padding: config.fit_padding,
        }
    }

    /// Source pin, destination pin, the AQI-colored line and one circle per
    /// located checkpoint, then fits the viewport to the line.
    pub fn draw_single(
        &self,
        route: &Route,
        surface: &mut MapSurface,
        out: &mut CommandBuffer,
    ) -> RenderedPrimitives {
        let snapshot = self.layer.extract_single(route);
        let bounds = snapshot.bounds();
        let mut rendered = RenderedPrimitives {
            source_marker: Some(add(surface, out, Primitive::Pin(snapshot.source))),
            dest_marker: Some(add(surface, out, Primitive::Pin(snapshot.destination))),
            ..RenderedPrimitives::default()
        };
        if let Some(line) = snapshot.line {
            rendered
                .route_lines
                .push(add(surface, out, Primitive::Polyline(line)));
        }
        for (index, marker) in snapshot.checkpoints {
            let id = add(surface, out, Primitive::Circle(marker));
            rendered.checkpoint_markers.push(CheckpointMarker { index, id });
        }
        self.fit(bounds, out);
        rendered
    }

    /// One line per route in the given order, shared endpoints taken from
    /// the first route. No checkpoint markers.
    pub fn draw_comparison(
        &self,
        routes: &[Route],
        surface: &mut MapSurface,
        out: &mut CommandBuffer,
    ) -> RenderedPrimitives {
        let Some(snapshot) = self.layer.extract_comparison(routes) else {
            return RenderedPrimitives::default();
        };
        let bounds = snapshot.bounds();
        let mut rendered = RenderedPrimitives {
            source_marker: Some(add(surface, out, Primitive::Pin(snapshot.source))),
            dest_marker: Some(add(surface, out, Primitive::Pin(snapshot.destination))),
            ..RenderedPrimitives::default()
        };
        for line in snapshot.lines {
            rendered
                .route_lines
                .push(add(surface, out, Primitive::Polyline(line)));
        }
        self.fit(bounds, out);
        rendered
    }

    /// Removes everything in `rendered` from the surface and leaves it empty.
    pub fn remove_all(
        &self,
        rendered: &mut RenderedPrimitives,
        surface: &mut MapSurface,
        out: &mut CommandBuffer,
    ) {
        for id in rendered.ids() {
            if surface.remove(id).is_none() {
                warn!(?id, "primitive already gone from map surface");
                continue;
            }
            out.emit(RenderCommand::RemovePrimitive { id });
        }
        *rendered = RenderedPrimitives::default();
    }

    pub fn fit(&self, bounds: Option<GeoBounds>, out: &mut CommandBuffer) {
        match bounds {
            Some(bounds) => out.emit(RenderCommand::FitBounds {
                bounds,
                padding: self.fit_padding,
            }),
            None => debug!("no route geometry to fit"),
        }
    }
}

fn add(surface: &mut MapSurface, out: &mut CommandBuffer, primitive: Primitive) -> PrimitiveId {
    let id = surface.add(primitive.clone());
    out.emit(RenderCommand::AddPrimitive { id, primitive });
    id
}

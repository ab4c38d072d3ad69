use foundation::bounds::GeoBounds;
use foundation::geo::LatLng;
use scene::components::Primitive;
use scene::entity::PrimitiveId;
use serde::Serialize;

use crate::panel::{CheckpointRow, ComparisonCard, PollutantReading, PollutantSummary, RouteInfo};

/// Side-panel containers the host owns.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelId {
    RouteInfo,
    PollutantDetails,
    WaypointDetails,
    ComparisonPanel,
}

impl PanelId {
    pub const ALL: [PanelId; 4] = [
        PanelId::RouteInfo,
        PanelId::PollutantDetails,
        PanelId::WaypointDetails,
        PanelId::ComparisonPanel,
    ];
}

/// One instruction for the host's map or DOM.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RenderCommand {
    AddPrimitive {
        id: PrimitiveId,
        primitive: Primitive,
    },
    RemovePrimitive {
        id: PrimitiveId,
    },
    FitBounds {
        bounds: GeoBounds,
        padding: [u32; 2],
    },
    /// Smooth pan/zoom.
    FlyTo {
        center: LatLng,
        zoom: u8,
    },
    OpenPopup {
        id: PrimitiveId,
    },
    ShowRouteInfo {
        info: RouteInfo,
    },
    ShowPollutantSummary {
        summary: PollutantSummary,
        readings: Vec<PollutantReading>,
    },
    ShowCheckpointList {
        rows: Vec<CheckpointRow>,
    },
    ShowComparison {
        cards: Vec<ComparisonCard>,
    },
    HidePanel {
        panel: PanelId,
    },
    /// Marks the row active and deselects every other row.
    HighlightRow {
        index: usize,
    },
    ScrollRowIntoView {
        index: usize,
    },
    SetLoading {
        visible: bool,
    },
    Alert {
        message: String,
    },
}

/// Ordered sink for render commands produced while handling one event.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    commands: Vec<RenderCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn drain(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }
}

#[cfg(test)]
mod tests {
    use super::{CommandBuffer, PanelId, RenderCommand};

    #[test]
    fn drain_clears_commands() {
        let mut buf = CommandBuffer::new();
        buf.emit(RenderCommand::SetLoading { visible: true });
        buf.emit(RenderCommand::HidePanel {
            panel: PanelId::RouteInfo,
        });
        assert_eq!(buf.len(), 2);
        let drained = buf.drain();
        assert_eq!(drained.len(), 2);
        assert!(buf.is_empty());
    }

    #[test]
    fn commands_serialize_with_op_tag() {
        let json = serde_json::to_value(RenderCommand::HidePanel {
            panel: PanelId::WaypointDetails,
        })
        .unwrap();
        assert_eq!(json["op"], "hide_panel");
        assert_eq!(json["panel"], "waypoint_details");
    }
}

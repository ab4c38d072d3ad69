use serde::Serialize;

use crate::components::marker::{CircleMarker, PinMarker};
use crate::components::polyline::Polyline;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Pin,
    Circle,
    Polyline,
}

/// Anything the map surface can hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Pin(PinMarker),
    Circle(CircleMarker),
    Polyline(Polyline),
}

impl Primitive {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Pin(_) => PrimitiveKind::Pin,
            Primitive::Circle(_) => PrimitiveKind::Circle,
            Primitive::Polyline(_) => PrimitiveKind::Polyline,
        }
    }
}

use foundation::handles::Handle;
use serde::Serialize;

/// Identifies one primitive drawn on the map surface.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PrimitiveId(pub Handle);

impl PrimitiveId {
    pub fn index(&self) -> u32 {
        self.0.index()
    }

    pub fn generation(&self) -> u32 {
        self.0.generation()
    }
}

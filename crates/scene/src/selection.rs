/// Exclusive checkpoint selection shared by the map and the side panel.
///
/// Both surfaces address checkpoints by their index in the route's
/// `aqi_data`, so a single index is enough to keep them in step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckpointSelection {
    active: Option<usize>,
}

impl CheckpointSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Makes `index` the only selected checkpoint.
    ///
    /// Returns the previously selected index when it differs.
    pub fn select(&mut self, index: usize) -> Option<usize> {
        let previous = self.active.replace(index);
        previous.filter(|p| *p != index)
    }

    pub fn clear(&mut self) -> Option<usize> {
        self.active.take()
    }
}

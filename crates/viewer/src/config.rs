use layers::CheckpointStyle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerConfig {
    /// Pixel padding applied when fitting the viewport to route bounds.
    pub fit_padding: [u32; 2],
    /// Zoom level used when flying to a checkpoint from the list.
    pub fly_to_zoom: u8,
    pub checkpoint_style: CheckpointStyle,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            fit_padding: [50, 50],
            fly_to_zoom: 15,
            checkpoint_style: CheckpointStyle::default(),
        }
    }
}

/// Stroke settings for route polylines.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineStyle {
    pub weight: f32,
    pub opacity: f32,
}

impl LineStyle {
    pub const fn new(weight: f32, opacity: f32) -> Self {
        Self { weight, opacity }
    }
}

pub const SINGLE_ROUTE_LINE: LineStyle = LineStyle::new(6.0, 0.8);
pub const COMPARISON_ROUTE_LINE: LineStyle = LineStyle::new(5.0, 0.7);

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CheckpointStyle {
    pub radius_px: f32,
    pub stroke_color: &'static str,
    pub stroke_weight: f32,
    pub stroke_opacity: f32,
    pub fill_opacity: f32,
}

impl Default for CheckpointStyle {
    fn default() -> Self {
        Self {
            radius_px: 10.0,
            stroke_color: "#fff",
            stroke_weight: 2.0,
            stroke_opacity: 1.0,
            fill_opacity: 0.9,
        }
    }
}

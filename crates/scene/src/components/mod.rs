pub mod marker;
pub mod polyline;
pub mod popup;
pub mod primitive;

pub use marker::*;
pub use polyline::*;
pub use popup::*;
pub use primitive::*;

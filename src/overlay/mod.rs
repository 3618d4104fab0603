pub mod display_list;
pub mod frame_loop;
pub mod geometry;
pub mod pixmap;
pub mod renderer;
pub mod surface;

pub use display_list::{DisplayList, DrawCommand};
pub use frame_loop::{ExpressionSource, OverlayLoop};
pub use geometry::FaceSketch;
pub use pixmap::PixmapSurface;
pub use renderer::ExpressionRenderer;
pub use surface::DrawingSurface;

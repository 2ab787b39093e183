//! Rendering abstraction layer
//!
//! Views draw through the [`RenderSurface`] capability instead of calling a
//! drawing library directly, so selection and statistics logic stays
//! unit-testable without a display. The egui-backed surface paints for the
//! application; the recording surface captures draw calls for tests.

mod egui_surface;
mod recording;
mod scale;
mod surface;

pub use egui_surface::EguiSurface;
pub use recording::RecordingSurface;
pub use scale::LinearScale;
pub use surface::{AxisOrientation, AxisSpec, Gesture, HeatCell, Marker, RenderSurface};

use egui::{Color32, Pos2, Rect, Vec2};

use crate::surface::{AxisSpec, Gesture, HeatCell, Marker, RenderSurface};

/// Surface that records draw calls instead of painting. Used to assert on
/// view output in tests without a display.
#[derive(Default)]
pub struct RecordingSurface {
    pub frames: usize,
    pub markers: Vec<Marker>,
    pub cells: Vec<HeatCell>,
    pub axes: Vec<AxisSpec>,
    pub labels: Vec<(Pos2, String, Color32)>,
    pub titles: Vec<String>,
    pub brush: Option<Rect>,
    pub pending_gestures: Vec<Gesture>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSurface for RecordingSurface {
    fn begin_frame(&mut self, _size: Vec2) {
        self.frames += 1;
        self.markers.clear();
        self.cells.clear();
        self.axes.clear();
        self.labels.clear();
        self.titles.clear();
        self.brush = None;
    }

    fn draw_markers(&mut self, markers: &[Marker]) {
        self.markers.extend_from_slice(markers);
    }

    fn draw_cells(&mut self, cells: &[HeatCell]) {
        self.cells.extend_from_slice(cells);
    }

    fn draw_axis(&mut self, axis: &AxisSpec) {
        self.axes.push(axis.clone());
    }

    fn draw_label(&mut self, pos: Pos2, text: &str, color: Color32) {
        self.labels.push((pos, text.to_string(), color));
    }

    fn draw_title(&mut self, text: &str) {
        self.titles.push(text.to_string());
    }

    fn draw_brush_rect(&mut self, rect: Option<Rect>) {
        self.brush = rect;
    }

    fn end_frame(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_frame_resets_the_scene() {
        let mut surface = RecordingSurface::new();
        surface.begin_frame(Vec2::new(100.0, 100.0));
        surface.draw_title("first");
        surface.begin_frame(Vec2::new(100.0, 100.0));
        assert_eq!(surface.frames, 2);
        assert!(surface.titles.is_empty());
    }
}

use egui::{Color32, Pos2, Rect, Stroke, Vec2};

use crate::scale::LinearScale;

/// A positioned scatter marker, keyed by record index for enter/update/exit
/// reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub key: usize,
    pub pos: Pos2,
    pub radius: f32,
    pub fill: Color32,
    pub opacity: f32,
    pub stroke: Stroke,
}

/// One heatmap cell, keyed by its (row, col) dimension pair.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatCell {
    pub row: String,
    pub col: String,
    pub rect: Rect,
    pub fill: Color32,
    pub label: String,
    pub label_color: Color32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisOrientation {
    Bottom,
    Left,
}

/// An axis drawn from a linear scale.
#[derive(Debug, Clone)]
pub struct AxisSpec {
    pub orientation: AxisOrientation,
    pub scale: LinearScale,
    /// Pixel offset of the axis line perpendicular to its orientation
    /// (y for bottom axes, x for left axes).
    pub offset: f32,
    pub ticks: usize,
    pub caption: String,
}

/// Pointer gestures dispatched by a surface, in surface-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    DragStart { pos: Pos2 },
    DragMove { pos: Pos2 },
    DragEnd { pos: Pos2 },
    CellClick { row: String, col: String },
}

/// Generic 2-D rendering surface capability.
///
/// One frame is `begin_frame`, any number of draw calls, `end_frame`.
pub trait RenderSurface {
    fn begin_frame(&mut self, size: Vec2);

    fn draw_markers(&mut self, markers: &[Marker]);

    fn draw_cells(&mut self, cells: &[HeatCell]);

    fn draw_axis(&mut self, axis: &AxisSpec);

    /// A free-standing text label (dimension names, captions).
    fn draw_label(&mut self, pos: Pos2, text: &str, color: Color32);

    /// The view's headline text.
    fn draw_title(&mut self, text: &str);

    /// The in-progress brush rectangle, if any.
    fn draw_brush_rect(&mut self, rect: Option<Rect>);

    fn end_frame(&mut self);
}

//! Scatterplot view: brush gesture to selection, highlight from selection.

use std::sync::Arc;

use ahash::AHashMap;
use egui::{Color32, Pos2, Rect, Stroke, Vec2};
use serde_json::{json, Value};

use lv_core::{DataSet, Record, SelectionSet};
use lv_render::{AxisOrientation, AxisSpec, Gesture, LinearScale, Marker, RenderSurface};

use crate::adapter::{ViewAdapter, ViewConfig, ViewId};

/// Configuration for the scatterplot view
#[derive(Debug, Clone)]
pub struct ScatterplotConfig {
    /// X-axis dimension
    pub x_dimension: String,

    /// Y-axis dimension
    pub y_dimension: String,

    /// Base point radius
    pub point_radius: f32,

    /// Opacity of unselected markers
    pub default_opacity: f32,

    /// Plot margins (top, right, bottom, left)
    pub margin: (f32, f32, f32, f32),
}

impl Default for ScatterplotConfig {
    fn default() -> Self {
        Self {
            x_dimension: String::new(),
            y_dimension: String::new(),
            point_radius: 3.0,
            default_opacity: 0.3,
            margin: (24.0, 10.0, 40.0, 60.0),
        }
    }
}

const MARKER_FILL: Color32 = Color32::from_rgb(70, 130, 180); // steelblue
const HIGHLIGHT_STROKE: Stroke = Stroke {
    width: 2.0,
    color: Color32::RED,
};

/// Brush gesture state: Idle -> Dragging -> Idle.
#[derive(Debug, Clone, Copy, PartialEq)]
enum BrushState {
    Idle,
    Dragging { anchor: Pos2 },
}

/// Scatterplot view adapter
pub struct ScatterplotView {
    id: ViewId,
    title: String,
    pub config: ScatterplotConfig,

    // State
    dataset: Arc<DataSet>,
    size: Vec2,
    x_scale: LinearScale,
    y_scale: LinearScale,
    markers: Vec<Marker>,
    brush: BrushState,
    brush_rect: Option<Rect>,
    last_selection: SelectionSet,
    initialized: bool,
}

impl ScatterplotView {
    /// Create a new scatterplot view
    pub fn new(title: impl Into<String>, config: ScatterplotConfig) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            title: title.into(),
            config,
            dataset: Arc::new(DataSet::default()),
            size: Vec2::ZERO,
            x_scale: LinearScale::new((0.0, 1.0), (0.0, 1.0)),
            y_scale: LinearScale::new((0.0, 1.0), (1.0, 0.0)),
            markers: Vec::new(),
            brush: BrushState::Idle,
            brush_rect: None,
            last_selection: SelectionSet::empty(),
            initialized: false,
        }
    }

    /// Change the active dimension pair and rebind markers.
    pub fn set_dimensions(&mut self, x_dimension: impl Into<String>, y_dimension: impl Into<String>) {
        self.config.x_dimension = x_dimension.into();
        self.config.y_dimension = y_dimension.into();
        self.rebind();
    }

    /// Projected screen position of a record over the active dimensions.
    /// `None` when either coordinate is missing or non-finite.
    pub fn project(&self, record: &Record) -> Option<Pos2> {
        let x = record.numeric(&self.config.x_dimension)?;
        let y = record.numeric(&self.config.y_dimension)?;
        Some(Pos2::new(self.x_scale.scale(x), self.y_scale.scale(y)))
    }

    /// Recompute axis domains and reconcile markers keyed by record index.
    /// Independent of the brush machinery.
    fn rebind(&mut self) {
        let (top, right, bottom, left) = self.config.margin;

        let x_extent = self.dataset.numeric_extent(&self.config.x_dimension);
        let y_extent = self.dataset.numeric_extent(&self.config.y_dimension);
        let (Some(x_extent), Some(y_extent)) = (x_extent, y_extent) else {
            self.markers.clear();
            return;
        };

        self.x_scale = LinearScale::new(x_extent, (left, self.size.x - right));
        self.y_scale = LinearScale::new(y_extent, (self.size.y - bottom, top));

        // Enter/update/exit keyed by record index: existing markers keep
        // their styling, new records enter with defaults, markers whose
        // record is gone exit.
        let mut retained: AHashMap<usize, Marker> =
            self.markers.drain(..).map(|m| (m.key, m)).collect();

        for record in self.dataset.records() {
            let Some(pos) = self.project(record) else {
                continue;
            };
            let mut marker = retained.remove(&record.index()).unwrap_or(Marker {
                key: record.index(),
                pos,
                radius: self.config.point_radius,
                fill: MARKER_FILL,
                opacity: self.config.default_opacity,
                stroke: Stroke::NONE,
            });
            marker.pos = pos;
            self.markers.push(marker);
        }

        tracing::debug!(
            markers = self.markers.len(),
            x = %self.config.x_dimension,
            y = %self.config.y_dimension,
            "scatterplot rebound"
        );
    }

    /// Records whose projected position falls inside the rectangle,
    /// inclusive of the boundaries, in dataset order.
    fn rect_membership(&self, rect: &Rect) -> SelectionSet {
        let indices = self
            .markers
            .iter()
            .filter(|m| rect.contains(m.pos))
            .map(|m| m.key)
            .collect();
        SelectionSet::new(indices)
    }

    /// Restyle every marker from a selection. Opacity and stroke are the
    /// only channels used to indicate membership.
    fn apply_highlight(&mut self, selection: &SelectionSet) {
        let selected = selection.index_set();
        for marker in &mut self.markers {
            if selected.contains(&marker.key) {
                marker.opacity = 1.0;
                marker.stroke = HIGHLIGHT_STROKE;
            } else {
                marker.opacity = self.config.default_opacity;
                marker.stroke = Stroke::NONE;
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

impl ViewAdapter for ScatterplotView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn initialize(&mut self, config: ViewConfig, dataset: Arc<DataSet>) {
        self.size = config.size;
        self.dataset = dataset;
        self.brush = BrushState::Idle;
        self.brush_rect = None;
        self.last_selection = SelectionSet::empty();
        self.rebind();
        self.initialized = true;
    }

    fn teardown(&mut self) {
        self.markers.clear();
        self.brush = BrushState::Idle;
        self.brush_rect = None;
        self.dataset = Arc::new(DataSet::default());
        self.initialized = false;
    }

    fn handle_gesture(&mut self, gesture: &Gesture) -> Option<SelectionSet> {
        match gesture {
            Gesture::DragStart { pos } => {
                self.brush = BrushState::Dragging { anchor: *pos };
                self.brush_rect = None;
                // A fresh drag starts from "nothing selected".
                if !self.last_selection.is_empty() {
                    return Some(SelectionSet::empty());
                }
                None
            }
            Gesture::DragMove { pos } => {
                if let BrushState::Dragging { anchor } = self.brush {
                    let rect = Rect::from_two_pos(anchor, *pos);
                    self.brush_rect = Some(rect);
                    // Local-only highlight during the gesture; the store is
                    // not touched until drag-end.
                    let candidate = self.rect_membership(&rect);
                    self.apply_highlight(&candidate);
                }
                None
            }
            Gesture::DragEnd { pos } => {
                let BrushState::Dragging { anchor } = self.brush else {
                    return None;
                };
                self.brush = BrushState::Idle;
                self.brush_rect = None;

                let rect = Rect::from_two_pos(anchor, *pos);
                if rect.width() == 0.0 && rect.height() == 0.0 {
                    // Degenerate drag: commit a clear.
                    return Some(SelectionSet::empty());
                }
                let selection = self.rect_membership(&rect);
                tracing::debug!(selected = selection.len(), "brush ended");
                Some(selection)
            }
            Gesture::CellClick { .. } => None,
        }
    }

    fn update_selected_items(&mut self, selection: &SelectionSet) {
        self.last_selection = selection.clone();
        self.apply_highlight(selection);
    }

    fn render(&mut self, surface: &mut dyn RenderSurface) {
        surface.begin_frame(self.size);
        if !self.initialized || self.markers.is_empty() {
            // Defined empty state: no axes, no markers.
            surface.end_frame();
            return;
        }

        surface.draw_title(&self.title);
        surface.draw_axis(&AxisSpec {
            orientation: AxisOrientation::Bottom,
            scale: self.x_scale,
            offset: self.size.y - self.config.margin.2,
            ticks: 5,
            caption: self.config.x_dimension.clone(),
        });
        surface.draw_axis(&AxisSpec {
            orientation: AxisOrientation::Left,
            scale: self.y_scale,
            offset: self.config.margin.3,
            ticks: 5,
            caption: self.config.y_dimension.clone(),
        });
        surface.draw_markers(&self.markers);
        surface.draw_brush_rect(self.brush_rect);
        surface.end_frame();
    }

    fn save_config(&self) -> Value {
        json!({
            "x_dimension": self.config.x_dimension,
            "y_dimension": self.config.y_dimension,
            "point_radius": self.config.point_radius,
            "default_opacity": self.config.default_opacity,
        })
    }

    fn load_config(&mut self, config: Value) {
        if let Some(x) = config.get("x_dimension").and_then(|v| v.as_str()) {
            self.config.x_dimension = x.to_string();
        }
        if let Some(y) = config.get("y_dimension").and_then(|v| v.as_str()) {
            self.config.y_dimension = y.to_string();
        }
        if let Some(radius) = config.get("point_radius").and_then(|v| v.as_f64()) {
            self.config.point_radius = radius as f32;
        }
        if let Some(opacity) = config.get("default_opacity").and_then(|v| v.as_f64()) {
            self.config.default_opacity = opacity as f32;
        }
        self.rebind();
    }
}

//! Correlation heatmap view: cell-click selection, live matrix recompute.

use std::sync::Arc;

use egui::{Color32, Pos2, Rect, Vec2};
use serde_json::{json, Value};

use lv_core::{compute_matrix, CorrelationMatrix, DataSet, SelectionSet};
use lv_render::{Gesture, HeatCell, RenderSurface};

use crate::adapter::{ViewAdapter, ViewConfig, ViewId};
use crate::colors;

/// Configuration for the heatmap view
#[derive(Debug, Clone)]
pub struct HeatmapConfig {
    /// Ordered dimension list, fixed per session.
    pub dimensions: Vec<String>,

    /// Whether to print the correlation value in each cell
    pub show_values: bool,

    /// Plot margins (top, right, bottom, left)
    pub margin: (f32, f32, f32, f32),
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            dimensions: Vec::new(),
            show_values: true,
            margin: (40.0, 10.0, 50.0, 80.0),
        }
    }
}

/// Heatmap view adapter
pub struct HeatmapView {
    id: ViewId,
    title: String,
    pub config: HeatmapConfig,

    // State
    dataset: Arc<DataSet>,
    size: Vec2,
    matrix: CorrelationMatrix,
    label: String,
    cells: Vec<HeatCell>,
    last_selection: SelectionSet,
    initialized: bool,
}

impl HeatmapView {
    /// Create a new heatmap view
    pub fn new(title: impl Into<String>, config: HeatmapConfig) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            title: title.into(),
            config,
            dataset: Arc::new(DataSet::default()),
            size: Vec2::ZERO,
            matrix: CorrelationMatrix::default(),
            label: "All Data".to_string(),
            cells: Vec::new(),
            last_selection: SelectionSet::empty(),
            initialized: false,
        }
    }

    /// Label describing the subset behind the displayed matrix.
    pub fn active_label(&self) -> &str {
        &self.label
    }

    /// The currently displayed matrix.
    pub fn matrix(&self) -> &CorrelationMatrix {
        &self.matrix
    }

    /// Recompute the displayed matrix for the active subset. Runs on every
    /// selection change; never cached or diffed cell-by-cell.
    fn recompute(&mut self, selection: &SelectionSet) {
        if selection.is_empty() {
            let records: Vec<_> = self.dataset.records().iter().collect();
            self.matrix = compute_matrix(&records, &self.config.dimensions);
            self.label = "All Data".to_string();
        } else {
            let records = self.dataset.select(selection);
            self.matrix = compute_matrix(&records, &self.config.dimensions);
            self.label = format!("Selection ({} records)", selection.len());
        }
        tracing::debug!(label = %self.label, "heatmap matrix recomputed");
        self.rebuild_cells();
    }

    /// Lay out one cell per ordered (row, col) dimension pair. The color
    /// domain is symmetric at +-max_abs of the displayed matrix.
    fn rebuild_cells(&mut self) {
        self.cells.clear();
        let n = self.config.dimensions.len();
        if n == 0 || self.dataset.is_empty() {
            return;
        }

        let (top, right, bottom, left) = self.config.margin;
        let grid_w = (self.size.x - left - right).max(0.0);
        let grid_h = (self.size.y - top - bottom).max(0.0);
        let cell_w = grid_w / n as f32;
        let cell_h = grid_h / n as f32;
        let max_abs = self.matrix.max_abs();

        for cell in self.matrix.cells() {
            let row_idx = self.dimension_index(&cell.row);
            let col_idx = self.dimension_index(&cell.col);
            let (Some(row_idx), Some(col_idx)) = (row_idx, col_idx) else {
                continue;
            };

            let min = Pos2::new(
                left + col_idx as f32 * cell_w,
                top + row_idx as f32 * cell_h,
            );
            let rect = Rect::from_min_size(min, Vec2::new(cell_w, cell_h));

            let label = if self.config.show_values {
                format!("{:.2}", cell.value)
            } else {
                String::new()
            };
            let label_color = if cell.value.abs() > 0.5 {
                Color32::WHITE
            } else {
                Color32::BLACK
            };

            self.cells.push(HeatCell {
                row: cell.row.clone(),
                col: cell.col.clone(),
                rect,
                fill: colors::correlation_color(cell.value, max_abs),
                label,
                label_color,
            });
        }
    }

    fn dimension_index(&self, dimension: &str) -> Option<usize> {
        self.config.dimensions.iter().position(|d| d == dimension)
    }

    /// The fixed click heuristic: joint top-quartile membership for the
    /// clicked cell's dimension pair, computed over the full dataset.
    fn top_quartile_selection(&self, row: &str, col: &str) -> SelectionSet {
        let row_threshold = self.dataset.percentile_threshold(row, 0.75);
        let col_threshold = self.dataset.percentile_threshold(col, 0.75);
        let (Some(row_threshold), Some(col_threshold)) = (row_threshold, col_threshold) else {
            return SelectionSet::empty();
        };

        let indices = self
            .dataset
            .records()
            .iter()
            .filter(|r| {
                matches!(r.numeric(row), Some(v) if v >= row_threshold)
                    && matches!(r.numeric(col), Some(v) if v >= col_threshold)
            })
            .map(|r| r.index())
            .collect();
        SelectionSet::new(indices)
    }

    #[cfg(test)]
    pub(crate) fn cells(&self) -> &[HeatCell] {
        &self.cells
    }
}

impl ViewAdapter for HeatmapView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn initialize(&mut self, config: ViewConfig, dataset: Arc<DataSet>) {
        self.size = config.size;
        self.dataset = dataset;
        self.last_selection = SelectionSet::empty();
        self.recompute(&SelectionSet::empty());
        self.initialized = true;
    }

    fn teardown(&mut self) {
        self.cells.clear();
        self.matrix = CorrelationMatrix::default();
        self.dataset = Arc::new(DataSet::default());
        self.initialized = false;
    }

    fn handle_gesture(&mut self, gesture: &Gesture) -> Option<SelectionSet> {
        match gesture {
            Gesture::CellClick { row, col } => {
                let selection = self.top_quartile_selection(row, col);
                tracing::debug!(
                    row = %row,
                    col = %col,
                    selected = selection.len(),
                    "heatmap cell clicked"
                );
                Some(selection)
            }
            _ => None,
        }
    }

    fn update_selected_items(&mut self, selection: &SelectionSet) {
        self.last_selection = selection.clone();
        self.recompute(selection);
    }

    fn render(&mut self, surface: &mut dyn RenderSurface) {
        surface.begin_frame(self.size);
        if !self.initialized || self.dataset.is_empty() || self.cells.is_empty() {
            // Defined empty state: no cells, no labels.
            surface.end_frame();
            return;
        }

        surface.draw_title(&format!("{}: {}", self.title, self.label));
        surface.draw_cells(&self.cells);

        // Dimension labels along the left and bottom edges.
        let (top, right, bottom, left) = self.config.margin;
        let n = self.config.dimensions.len() as f32;
        let cell_w = (self.size.x - left - right).max(0.0) / n;
        let cell_h = (self.size.y - top - bottom).max(0.0) / n;
        let text = Color32::GRAY;
        for (i, dimension) in self.config.dimensions.iter().enumerate() {
            surface.draw_label(
                Pos2::new(left - 40.0, top + (i as f32 + 0.5) * cell_h),
                dimension,
                text,
            );
            surface.draw_label(
                Pos2::new(
                    left + (i as f32 + 0.5) * cell_w,
                    self.size.y - bottom + 14.0,
                ),
                dimension,
                text,
            );
        }
        surface.end_frame();
    }

    fn save_config(&self) -> Value {
        json!({
            "dimensions": self.config.dimensions,
            "show_values": self.config.show_values,
        })
    }

    fn load_config(&mut self, config: Value) {
        if let Some(dimensions) = config.get("dimensions").and_then(|v| v.as_array()) {
            self.config.dimensions = dimensions
                .iter()
                .filter_map(|d| d.as_str().map(str::to_string))
                .collect();
        }
        if let Some(show) = config.get("show_values").and_then(|v| v.as_bool()) {
            self.config.show_values = show;
        }
        self.recompute(&self.last_selection.clone());
    }
}

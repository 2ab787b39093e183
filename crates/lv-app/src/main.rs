//! Main application entry point

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use eframe::egui::{self, Vec2};
use parking_lot::RwLock;
use tracing::{error, info};

use lv_core::DataSet;
use lv_data::CsvTable;
use lv_render::EguiSurface;
use lv_views::{
    CoordinatorShell, HeatmapConfig, HeatmapView, ScatterplotConfig, ScatterplotView, ViewConfig,
    ViewId,
};

/// Chart pixel size shared by both views.
const VIEW_SIZE: Vec2 = Vec2::new(600.0, 500.0);

/// Upper bound on heatmap dimensions so cells stay readable.
const MAX_HEATMAP_DIMENSIONS: usize = 6;

/// Main application state
struct LinkedExplorerApp {
    shell: CoordinatorShell,
    scatter: Arc<RwLock<ScatterplotView>>,
    scatter_id: ViewId,
    heatmap: Arc<RwLock<HeatmapView>>,
    heatmap_id: ViewId,
}

impl LinkedExplorerApp {
    fn new(dataset: Arc<DataSet>, dimensions: Vec<String>) -> Self {
        // Dimensions with at least one finite value, in header order.
        let numeric: Vec<String> = dimensions
            .into_iter()
            .filter(|d| dataset.numeric_extent(d).is_some())
            .collect();

        let (x_dimension, y_dimension) = match &numeric[..] {
            [] => (String::new(), String::new()),
            [only] => (only.clone(), only.clone()),
            [x, y, ..] => (x.clone(), y.clone()),
        };
        let heatmap_dimensions: Vec<String> = numeric
            .iter()
            .take(MAX_HEATMAP_DIMENSIONS)
            .cloned()
            .collect();
        info!(
            scatter = %format!("{} x {}", x_dimension, y_dimension),
            heatmap = heatmap_dimensions.len(),
            "composing views"
        );

        let mut shell = CoordinatorShell::new(dataset);
        let scatter = Arc::new(RwLock::new(ScatterplotView::new(
            format!("{} vs {}", x_dimension, y_dimension),
            ScatterplotConfig {
                x_dimension,
                y_dimension,
                ..Default::default()
            },
        )));
        let heatmap = Arc::new(RwLock::new(HeatmapView::new(
            "Correlation Matrix",
            HeatmapConfig {
                dimensions: heatmap_dimensions,
                ..Default::default()
            },
        )));

        let config = ViewConfig { size: VIEW_SIZE };
        let scatter_id = shell.add_view(scatter.clone(), config.clone());
        let heatmap_id = shell.add_view(heatmap.clone(), config);

        Self {
            shell,
            scatter,
            scatter_id,
            heatmap,
            heatmap_id,
        }
    }

    fn show_view(
        &self,
        ui: &mut egui::Ui,
        view: &Arc<RwLock<dyn lv_views::ViewAdapter>>,
        view_id: ViewId,
    ) {
        let mut surface = EguiSurface::new(ui, VIEW_SIZE);
        view.write().render(&mut surface);
        // Gestures are collected after drawing so cell clicks resolve
        // against this frame's geometry.
        for gesture in surface.take_gestures() {
            self.shell.dispatch(view_id, &gesture);
        }
    }
}

impl eframe::App for LinkedExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.shell.selection_summary());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal_top(|ui| {
                let scatter: Arc<RwLock<dyn lv_views::ViewAdapter>> = self.scatter.clone();
                self.show_view(ui, &scatter, self.scatter_id);
                let heatmap: Arc<RwLock<dyn lv_views::ViewAdapter>> = self.heatmap.clone();
                self.show_view(ui, &heatmap, self.heatmap_id);
            });
        });
    }
}

/// Load the dataset named on the command line. Until a file loads
/// successfully the app runs over an empty dataset and draws nothing.
fn load_dataset() -> (Arc<DataSet>, Vec<String>) {
    let Some(path) = std::env::args().nth(1).map(PathBuf::from) else {
        info!("no dataset argument, starting empty (usage: linkedviews <data.csv>)");
        return (Arc::new(DataSet::default()), Vec::new());
    };

    match CsvTable::load_with_dimensions(&path) {
        Ok((dataset, dimensions)) => (Arc::new(dataset), dimensions),
        Err(e) => {
            error!(path = %path.display(), error = %e, "failed to load dataset");
            (Arc::new(DataSet::default()), Vec::new())
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting linked-views explorer");
    let (dataset, dimensions) = load_dataset();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1260.0, 600.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Linked Views Explorer",
        options,
        Box::new(|_cc| Box::new(LinkedExplorerApp::new(dataset, dimensions))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}

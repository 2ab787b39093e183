use egui::{
    Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, TextStyle, Ui, Vec2,
};

use crate::surface::{AxisOrientation, AxisSpec, Gesture, HeatCell, Marker, RenderSurface};

/// egui-backed rendering surface.
///
/// Allocates its painter region on construction, translating pointer input
/// into [`Gesture`] values in surface-local coordinates. Cell clicks are
/// resolved during `draw_cells`, once cell geometry is known.
pub struct EguiSurface {
    painter: egui::Painter,
    rect: Rect,
    text_color: Color32,
    hover_pos: Option<Pos2>,
    click_pos: Option<Pos2>,
    gestures: Vec<Gesture>,
}

impl EguiSurface {
    pub fn new(ui: &mut Ui, desired_size: Vec2) -> Self {
        let (response, painter) = ui.allocate_painter(desired_size, Sense::click_and_drag());
        let rect = response.rect;
        let to_local = |p: Pos2| Pos2::new(p.x - rect.min.x, p.y - rect.min.y);

        let mut gestures = Vec::new();
        if let Some(pos) = response.interact_pointer_pos().map(to_local) {
            if response.drag_started() {
                gestures.push(Gesture::DragStart { pos });
            } else if response.dragged() {
                gestures.push(Gesture::DragMove { pos });
            } else if response.drag_released() {
                gestures.push(Gesture::DragEnd { pos });
            }
        }

        let click_pos = if response.clicked() {
            response.interact_pointer_pos().map(to_local)
        } else {
            None
        };

        Self {
            painter,
            rect,
            text_color: ui.style().visuals.text_color(),
            hover_pos: response.hover_pos().map(to_local),
            click_pos,
            gestures,
        }
    }

    /// Gestures collected from this frame's input, in dispatch order. Call
    /// after the view has drawn so cell clicks have been resolved.
    pub fn take_gestures(&mut self) -> Vec<Gesture> {
        std::mem::take(&mut self.gestures)
    }

    fn to_screen(&self, pos: Pos2) -> Pos2 {
        Pos2::new(self.rect.min.x + pos.x, self.rect.min.y + pos.y)
    }

    fn small_font(&self) -> FontId {
        TextStyle::Small.resolve(&egui::Style::default())
    }
}

impl RenderSurface for EguiSurface {
    fn begin_frame(&mut self, _size: Vec2) {}

    fn draw_markers(&mut self, markers: &[Marker]) {
        for marker in markers {
            let center = self.to_screen(marker.pos);
            let fill = marker.fill.gamma_multiply(marker.opacity);
            self.painter.circle(center, marker.radius, fill, marker.stroke);

            // Hover ring so a point under the pointer stays findable among
            // low-opacity unselected markers.
            if let Some(hover) = self.hover_pos {
                let d = marker.pos.distance(hover);
                if d <= marker.radius + 2.0 {
                    self.painter.circle_stroke(
                        center,
                        marker.radius + 2.0,
                        Stroke::new(1.0, self.text_color),
                    );
                }
            }
        }
    }

    fn draw_cells(&mut self, cells: &[HeatCell]) {
        for cell in cells {
            let rect = Rect::from_min_max(
                self.to_screen(cell.rect.min),
                self.to_screen(cell.rect.max),
            );
            self.painter.rect_filled(rect, 0.0, cell.fill);
            self.painter
                .rect_stroke(rect, 0.0, Stroke::new(1.0, Color32::WHITE));

            if !cell.label.is_empty() {
                self.painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    &cell.label,
                    self.small_font(),
                    cell.label_color,
                );
            }

            if let Some(hover) = self.hover_pos {
                if cell.rect.contains(hover) {
                    self.painter
                        .rect_stroke(rect, 0.0, Stroke::new(2.0, self.text_color));
                }
            }

            if let Some(click) = self.click_pos {
                if cell.rect.contains(click) {
                    self.gestures.push(Gesture::CellClick {
                        row: cell.row.clone(),
                        col: cell.col.clone(),
                    });
                }
            }
        }
        // A click only resolves to one cell.
        self.click_pos = None;
    }

    fn draw_axis(&mut self, axis: &AxisSpec) {
        let (r0, r1) = axis.scale.range();
        let (lo, hi) = (r0.min(r1), r0.max(r1));
        let stroke = Stroke::new(1.0, self.text_color);
        let font = self.small_font();

        match axis.orientation {
            AxisOrientation::Bottom => {
                let y = axis.offset;
                self.painter.line_segment(
                    [self.to_screen(Pos2::new(lo, y)), self.to_screen(Pos2::new(hi, y))],
                    stroke,
                );
                for i in 0..=axis.ticks {
                    let t = i as f32 / axis.ticks.max(1) as f32;
                    let x = r0 + t * (r1 - r0);
                    self.painter.line_segment(
                        [
                            self.to_screen(Pos2::new(x, y)),
                            self.to_screen(Pos2::new(x, y + 4.0)),
                        ],
                        stroke,
                    );
                    self.painter.text(
                        self.to_screen(Pos2::new(x, y + 6.0)),
                        Align2::CENTER_TOP,
                        format_tick(axis.scale.invert(x)),
                        font.clone(),
                        self.text_color,
                    );
                }
                if !axis.caption.is_empty() {
                    self.painter.text(
                        self.to_screen(Pos2::new((lo + hi) / 2.0, y + 22.0)),
                        Align2::CENTER_TOP,
                        &axis.caption,
                        font,
                        self.text_color,
                    );
                }
            }
            AxisOrientation::Left => {
                let x = axis.offset;
                self.painter.line_segment(
                    [self.to_screen(Pos2::new(x, lo)), self.to_screen(Pos2::new(x, hi))],
                    stroke,
                );
                for i in 0..=axis.ticks {
                    let t = i as f32 / axis.ticks.max(1) as f32;
                    let y = r0 + t * (r1 - r0);
                    self.painter.line_segment(
                        [
                            self.to_screen(Pos2::new(x - 4.0, y)),
                            self.to_screen(Pos2::new(x, y)),
                        ],
                        stroke,
                    );
                    self.painter.text(
                        self.to_screen(Pos2::new(x - 6.0, y)),
                        Align2::RIGHT_CENTER,
                        format_tick(axis.scale.invert(y)),
                        font.clone(),
                        self.text_color,
                    );
                }
                if !axis.caption.is_empty() {
                    self.painter.text(
                        self.to_screen(Pos2::new(x, lo - 8.0)),
                        Align2::LEFT_BOTTOM,
                        &axis.caption,
                        font,
                        self.text_color,
                    );
                }
            }
        }
    }

    fn draw_label(&mut self, pos: Pos2, text: &str, color: Color32) {
        self.painter.text(
            self.to_screen(pos),
            Align2::CENTER_CENTER,
            text,
            self.small_font(),
            color,
        );
    }

    fn draw_title(&mut self, text: &str) {
        self.painter.text(
            Pos2::new(self.rect.center().x, self.rect.min.y + 4.0),
            Align2::CENTER_TOP,
            text,
            FontId::proportional(14.0),
            self.text_color,
        );
    }

    fn draw_brush_rect(&mut self, rect: Option<Rect>) {
        if let Some(rect) = rect {
            let rect = Rect::from_min_max(self.to_screen(rect.min), self.to_screen(rect.max));
            self.painter
                .rect_filled(rect, 0.0, Color32::from_rgba_unmultiplied(120, 120, 160, 40));
            self.painter
                .rect_stroke(rect, 0.0, Stroke::new(1.0, Color32::from_gray(160)));
        }
    }

    fn end_frame(&mut self) {}
}

fn format_tick(value: f64) -> String {
    if value.abs() >= 1000.0 || value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

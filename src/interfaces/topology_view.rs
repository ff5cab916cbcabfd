use crate::domain::topology::{
    Bounds, Connection, LabelText, ModuleId, Point, SelectableShape, ShapeForm, TopologyLayout,
};
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;

const BASE_FONT_SIZE: f32 = 13.0;
const LINE_HEIGHT: f32 = 15.0;
const MIN_SCALE: f32 = 0.35;
const MAX_SCALE: f32 = 1.6;

/// Maps diagram coordinates onto the canvas rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    origin: egui::Pos2,
    extent_min: Point,
    scale: f32,
}

impl CanvasTransform {
    /// Fits `extent` into `canvas`, keeping the aspect ratio.
    pub fn fit(extent: Bounds, canvas: egui::Rect) -> Self {
        let sx = canvas.width() / extent.width.max(1.0);
        let sy = canvas.height() / extent.height.max(1.0);
        let scale = sx.min(sy).clamp(MIN_SCALE, MAX_SCALE);
        Self {
            origin: canvas.min,
            extent_min: extent.top_left(),
            scale,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn to_screen(&self, p: Point) -> egui::Pos2 {
        egui::pos2(
            self.origin.x + (p.x - self.extent_min.x) * self.scale,
            self.origin.y + (p.y - self.extent_min.y) * self.scale,
        )
    }

    pub fn to_diagram(&self, pos: egui::Pos2) -> Point {
        Point::new(
            (pos.x - self.origin.x) / self.scale + self.extent_min.x,
            (pos.y - self.origin.y) / self.scale + self.extent_min.y,
        )
    }

    pub fn rect(&self, b: Bounds) -> egui::Rect {
        egui::Rect::from_min_max(
            self.to_screen(b.top_left()),
            self.to_screen(Point::new(b.right(), b.bottom())),
        )
    }

    fn font(&self) -> egui::FontId {
        egui::FontId::proportional(BASE_FONT_SIZE * self.scale)
    }
}

/// Paints the topology and returns the module clicked this frame, if any.
///
/// `has_data` marks shapes whose module has catalog metrics.
pub fn render_topology(
    ui: &mut egui::Ui,
    layout: &TopologyLayout,
    selected: Option<ModuleId>,
    has_data: impl Fn(ModuleId) -> bool,
) -> Option<ModuleId> {
    let extent = layout.extent();
    let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click());
    let t = CanvasTransform::fit(extent, response.rect);

    painter.rect_filled(response.rect, DesignSystem::ROUNDING_MEDIUM, DesignSystem::BG_CANVAS);

    let hovered = response
        .hover_pos()
        .and_then(|pos| layout.hit_test(t.to_diagram(pos)));

    // Groups go underneath everything else
    for group in &layout.groups {
        let rect = t.rect(group.bounds);
        let highlighted = group.selectable.is_some()
            && (group.selectable == selected || group.selectable == hovered);
        if group.dashed {
            let stroke = egui::Stroke::new(DesignSystem::WIRE_WIDTH, DesignSystem::GROUP_CPU_L2);
            let outline = [
                rect.left_top(),
                rect.right_top(),
                rect.right_bottom(),
                rect.left_bottom(),
                rect.left_top(),
            ];
            painter.extend(egui::Shape::dashed_line(
                &outline,
                stroke,
                8.0 * t.scale(),
                5.0 * t.scale(),
            ));
        } else {
            let color = if highlighted {
                DesignSystem::ACCENT_PRIMARY
            } else {
                DesignSystem::GROUP_L3
            };
            if group.selectable == selected && selected.is_some() {
                painter.rect_filled(
                    rect,
                    DesignSystem::ROUNDING_SMALL,
                    DesignSystem::ACCENT_PRIMARY.linear_multiply(0.12),
                );
            }
            painter.rect_stroke(
                rect,
                DesignSystem::ROUNDING_SMALL,
                egui::Stroke::new(1.5, color),
                egui::StrokeKind::Inside,
            );
        }
        if let Some(label) = &group.label {
            paint_label(&painter, &t, label, DesignSystem::TEXT_SECONDARY);
        }
    }

    for connection in &layout.connections {
        paint_connection(&painter, &t, connection);
    }

    let (bus_start, bus_end) = layout.bus_line;
    let bus_color = if selected == Some(ModuleId::Bus) || hovered == Some(ModuleId::Bus) {
        DesignSystem::ACCENT_PRIMARY
    } else {
        DesignSystem::BUS
    };
    painter.line_segment(
        [t.to_screen(bus_start), t.to_screen(bus_end)],
        egui::Stroke::new(DesignSystem::BUS_WIDTH * t.scale().max(0.5), bus_color),
    );

    for shape in &layout.shapes {
        let state = ShapeState {
            selected: selected == Some(shape.id),
            hovered: hovered == Some(shape.id),
            has_data: has_data(shape.id),
        };
        paint_shape(&painter, &t, shape, state);
    }

    for port in &layout.ports {
        painter.circle_filled(t.to_screen(port.pos), 4.0 * t.scale(), DesignSystem::DANGER);
    }

    for label in &layout.labels {
        let color = if label.emphasis {
            DesignSystem::ACCENT_SECONDARY
        } else {
            DesignSystem::TEXT_SECONDARY
        };
        paint_label(&painter, &t, label, color);
    }

    if hovered.is_some() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }

    if response.clicked() {
        response
            .interact_pointer_pos()
            .and_then(|pos| layout.hit_test(t.to_diagram(pos)))
    } else {
        None
    }
}

#[derive(Clone, Copy)]
struct ShapeState {
    selected: bool,
    hovered: bool,
    has_data: bool,
}

fn paint_shape(
    painter: &egui::Painter,
    t: &CanvasTransform,
    shape: &SelectableShape,
    state: ShapeState,
) {
    let rect = t.rect(shape.bounds);
    let mut fill = DesignSystem::module_fill(shape.palette);
    if state.hovered && !state.selected {
        fill = fill.gamma_multiply(0.85);
    }
    let stroke = if state.selected {
        egui::Stroke::new(DesignSystem::SELECTION_WIDTH, DesignSystem::ACCENT_PRIMARY)
    } else {
        egui::Stroke::new(1.0, DesignSystem::BORDER_SUBTLE)
    };

    match shape.form {
        ShapeForm::Rect => {
            painter.rect_filled(rect, DesignSystem::ROUNDING_SMALL, fill);
            painter.rect_stroke(
                rect,
                DesignSystem::ROUNDING_SMALL,
                stroke,
                egui::StrokeKind::Outside,
            );
        }
        ShapeForm::Ellipse => {
            let radius = rect.width().min(rect.height()) / 2.0;
            painter.circle_filled(rect.center(), radius, fill);
            painter.circle_stroke(rect.center(), radius, stroke);
        }
    }

    for (i, line) in shape.label.iter().enumerate() {
        let pos = shape.bounds.top_left().offset(5.0, 5.0 + i as f32 * LINE_HEIGHT);
        painter.text(
            t.to_screen(pos),
            egui::Align2::LEFT_TOP,
            line,
            t.font(),
            DesignSystem::TEXT_ON_MODULE,
        );
    }

    if state.has_data && shape.form == ShapeForm::Rect {
        let dot = t.to_screen(Point::new(shape.bounds.right() - 10.0, shape.bounds.y + 10.0));
        painter.circle_filled(dot, 4.0 * t.scale(), DesignSystem::SUCCESS);
    }
}

fn paint_connection(painter: &egui::Painter, t: &CanvasTransform, connection: &Connection) {
    let points: Vec<egui::Pos2> = connection.points.iter().map(|p| t.to_screen(*p)).collect();
    painter.line(
        points,
        egui::Stroke::new(DesignSystem::WIRE_WIDTH * t.scale().max(0.5), DesignSystem::WIRE),
    );
    if let Some(label) = &connection.label {
        paint_label(painter, t, label, DesignSystem::TEXT_MUTED);
    }
}

fn paint_label(painter: &egui::Painter, t: &CanvasTransform, label: &LabelText, color: egui::Color32) {
    let font = if label.emphasis {
        egui::FontId::proportional(BASE_FONT_SIZE * 1.2 * t.scale())
    } else {
        t.font()
    };
    painter.text(
        t.to_screen(label.pos),
        egui::Align2::LEFT_TOP,
        &label.text,
        font,
        color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_round_trip() {
        let extent = Bounds::new(0.0, 20.0, 1200.0, 1000.0);
        let canvas = egui::Rect::from_min_size(egui::pos2(10.0, 40.0), egui::vec2(600.0, 800.0));
        let t = CanvasTransform::fit(extent, canvas);
        assert_eq!(t.scale(), 0.5);

        let p = Point::new(275.0, 400.0);
        let back = t.to_diagram(t.to_screen(p));
        assert!((back.x - p.x).abs() < 1e-3);
        assert!((back.y - p.y).abs() < 1e-3);
        assert_eq!(t.to_screen(Point::new(0.0, 20.0)), egui::pos2(10.0, 40.0));
    }

    #[test]
    fn test_scale_is_clamped() {
        let extent = Bounds::new(0.0, 0.0, 1000.0, 1000.0);
        let tiny = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(50.0, 50.0));
        assert_eq!(CanvasTransform::fit(extent, tiny).scale(), MIN_SCALE);
        let huge = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(9000.0, 9000.0));
        assert_eq!(CanvasTransform::fit(extent, huge).scale(), MAX_SCALE);
    }
}
